//! Test module organization.
//!
//! This module organizes all integration tests for the pipeline simulator.


/// Register file and error reporting tests.
mod common_tests;





/// Per-stage pipeline behaviour: stalls, redirects, flush, halt.
mod pipeline_tests;
