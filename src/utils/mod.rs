//! Process-level helpers for the CLI.

pub mod interrupt;

pub use interrupt::InterruptGuard;
