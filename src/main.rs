//! Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, loads the three hexadecimal initializers, runs the pipeline
//! until `HLT` retires, and writes the data store dump and the statistics
//! report.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pipeline_sim::config::Config;
use pipeline_sim::core::Cpu;
use pipeline_sim::sim::loader;

/// Command-line arguments for the pipeline simulator.
///
/// Every path defaults to the value in the configuration file, which in turn
/// defaults to the fixed names `RF.txt`, `ICache.txt`, `DCache.txt`,
/// `ODCache.txt`, and `Output.txt` in the working directory.
#[derive(Parser, Debug)]
#[command(author, version, about = "Five-Stage Pipeline Simulator")]
struct Args {
    #[arg(short, long)]
    config: Option<String>,

    /// Register file initializer.
    #[arg(long)]
    registers: Option<String>,

    /// Instruction store initializer.
    #[arg(long)]
    icache: Option<String>,

    /// Data store initializer.
    #[arg(long)]
    dcache: Option<String>,

    /// Final data store dump.
    #[arg(long)]
    dcache_out: Option<String>,

    /// Statistics report.
    #[arg(short, long)]
    output: Option<String>,

    /// Statistics as JSON.
    #[arg(long)]
    json: Option<String>,

    /// Trace every pipeline stage to stderr.
    #[arg(long)]
    trace: bool,
}

impl Args {
    fn apply(self, config: &mut Config) {
        let files = &mut config.files;
        if let Some(p) = self.registers {
            files.register_file = p;
        }
        if let Some(p) = self.icache {
            files.instruction_cache = p;
        }
        if let Some(p) = self.dcache {
            files.data_cache = p;
        }
        if let Some(p) = self.dcache_out {
            files.data_cache_out = p;
        }
        if let Some(p) = self.output {
            files.stats_out = p;
        }
        if self.json.is_some() {
            files.stats_json = self.json;
        }
        config.general.trace_instructions |= self.trace;
    }
}

fn init_tracing(trace: bool) {
    let default = if trace || cfg!(feature = "always-trace") {
        "trace"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Main entry point for the pipeline simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses command-line arguments and the optional TOML file.
/// 2. **Loader**: Reads the register, instruction, and data initializers.
/// 3. **Simulation Loop**: Ticks the CPU until `HLT` reaches writeback or a
///    fatal error occurs.
/// 4. **Teardown**: Writes the data store dump and the report, prints the
///    summary.
fn main() {
    let args = Args::parse();

    let mut config = match args.config.as_deref().map(Config::from_file) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
        None => Config::default(),
    };
    args.apply(&mut config);
    init_tracing(config.general.trace_instructions);

    let (system, regs) = match loader::load_machine(&config) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    };

    let mut cpu = Cpu::new(system, regs, &config);

    if let Err(e) = cpu.run() {
        eprintln!("\n[!] FATAL: {}", e);
        cpu.dump_state();
        cpu.stats.print();
        process::exit(1);
    }

    if let Err(e) = loader::write_outputs(&config, &cpu.bus.dcache, &cpu.stats) {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    }

    println!("[*] Halted after {} cycles", cpu.stats.cycles);
    cpu.stats.print();
}
