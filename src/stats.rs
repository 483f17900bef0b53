//! Simulation statistics collection and reporting.
//!
//! Tracks cycle counts, the per-class instruction mix, and stalls split by
//! cause, and renders them as the fixed-format report file, a JSON export,
//! or a console summary.

use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::isa::InstClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Clock cycles elapsed, including the cycle in which `HLT` retired.
    pub cycles: u64,
    /// Instructions that passed through execute.
    pub instructions: u64,

    /// `ADD`, `SUB`, `MUL`, `INC`.
    pub inst_arithmetic: u64,
    /// `AND`, `OR`, `NOT`, `XOR`.
    pub inst_logical: u64,
    /// `LOAD`, `STORE`.
    pub inst_data: u64,
    /// `JMP`, `BEQZ`.
    pub inst_control: u64,
    /// `HLT`.
    pub inst_halt: u64,

    /// Cycles decode spent waiting on a pending source register.
    pub stalls_data: u64,
    /// Cycles charged to jumps and branches.
    pub stalls_control: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions: 0,
            inst_arithmetic: 0,
            inst_logical: 0,
            inst_data: 0,
            inst_control: 0,
            inst_halt: 0,
            stalls_data: 0,
            stalls_control: 0,
        }
    }
}

impl SimStats {
    /// Counts one executed instruction of the given class.
    pub fn record(&mut self, class: InstClass) {
        self.instructions += 1;
        match class {
            InstClass::Arithmetic => self.inst_arithmetic += 1,
            InstClass::Logical => self.inst_logical += 1,
            InstClass::Data => self.inst_data += 1,
            InstClass::Control => self.inst_control += 1,
            InstClass::Halt => self.inst_halt += 1,
        }
    }

    /// Total stalls of both kinds.
    pub fn total_stalls(&self) -> u64 {
        self.stalls_data + self.stalls_control
    }

    /// Cycles per instruction, or 0 when nothing executed.
    pub fn cpi(&self) -> f64 {
        if self.instructions == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions as f64
        }
    }

    /// Writes the fixed-format statistics report.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Total number of instructions executed: {}",
            self.instructions
        )?;
        writeln!(out, "Number of instructions in each class-")?;
        writeln!(out, "Arithmetic Instructions     :{}", self.inst_arithmetic)?;
        writeln!(out, "Logical Instructions        :{}", self.inst_logical)?;
        writeln!(out, "Data Instructions           :{}", self.inst_data)?;
        writeln!(out, "Control Instructions        :{}", self.inst_control)?;
        writeln!(out, "Halt Instructions           :{}", self.inst_halt)?;
        writeln!(
            out,
            "Cycles per Instruction(CPI) :{}",
            format_significant(self.cpi())
        )?;
        writeln!(out, "Total number of stalls      :{}", self.total_stalls())?;
        writeln!(out, "Data stalls (RAW)           :{}", self.stalls_data)?;
        writeln!(out, "Control stalls              :{}", self.stalls_control)?;
        Ok(())
    }

    /// Serializes the counters, plus derived CPI and stall total, as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("cpi".to_string(), serde_json::json!(self.cpi()));
            obj.insert(
                "stalls_total".to_string(),
                serde_json::json!(self.total_stalls()),
            );
        }
        serde_json::to_string_pretty(&value)
    }

    /// Prints a formatted summary of all simulation statistics.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions);
        println!("sim_ipc                  {:.4}", self.instructions as f64 / cyc);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("----------------------------------------------------------");
        println!("STALLS");
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stalls_data,
            pct(self.stalls_data, cyc)
        );
        println!(
            "  stalls.control         {} ({:.2}%)",
            self.stalls_control,
            pct(self.stalls_control, cyc)
        );
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        let rows = [
            ("op.arithmetic", self.inst_arithmetic),
            ("op.logical", self.inst_logical),
            ("op.data", self.inst_data),
            ("op.control", self.inst_control),
            ("op.halt", self.inst_halt),
        ];
        for (name, count) in rows {
            println!("  {:<22} {} ({:.2}%)", name, count, pct(count, instr));
        }
        println!("==========================================================");
    }
}

/// Formats a value with at most six significant digits and no trailing
/// zeros, the way C++ streams print a `double` by default.
///
/// Values of 1e6 and above keep their integer digits.
pub fn format_significant(val: f64) -> String {
    if val == 0.0 || !val.is_finite() {
        return format!("{}", val);
    }
    let magnitude = val.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let fixed = format!("{:.*}", decimals, val);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
