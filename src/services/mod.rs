//! Runtime services around the editor: terminal modes and logging

pub mod terminal_modes;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
