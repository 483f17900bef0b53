//! Pipeline Latch Interface.
//!
//! Defines the common behaviour of the latches between stages so the flush
//! protocol can clear all four uniformly.

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of an instruction as it moves between stages.
/// They must support flushing (discarding their contents when a control
/// transfer redirects the PC) and checking for emptiness.
pub trait PipelineLatch {
    /// Clears the latch.
    ///
    /// Called by the memory stage when a jump or taken branch redirects
    /// fetch, discarding anything younger than the control instruction.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if there is no instruction in the latch, `false` otherwise.
    fn is_empty(&self) -> bool;
}
