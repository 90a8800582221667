//! Support library for the `smallworld` binary.
//!
//! Exposes the command pipeline and logging setup so doctests and unit tests
//! can drive generation without spawning a subprocess.

pub mod cli;
pub mod logging;
