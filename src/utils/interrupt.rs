//! Interrupt handling for batch runs.
//!
//! Turns termination requests into a shared cancellation flag that the
//! pipeline checks between files:
//! - SIGINT (Ctrl+C) via ctrlc handler
//! - SIGHUP (terminal hangup) via signal_hook
//!
//! The pipeline reacts by abandoning the current archive. Its staging
//! directory is still removed before the process exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owns the cancellation flag shared with [`crate::pipeline::BatchPipeline`].
pub struct InterruptGuard {
    interrupted: Arc<AtomicBool>,
}

impl Default for InterruptGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptGuard {
    pub fn new() -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register SIGINT (Ctrl+C) and SIGHUP (terminal hangup) handlers.
    ///
    /// Both set the same flag. Safe to call multiple times; only the first
    /// ctrlc registration in a process takes effect.
    pub fn register_signal_handlers(&self) {
        let flag = self.interrupted.clone();
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        })
        .ok();

        #[cfg(unix)]
        {
            use signal_hook::consts::SIGHUP;
            use signal_hook::flag::register;
            let _ = register(SIGHUP, self.interrupted.clone());
        }
    }

    /// Flag to hand to the pipeline.
    pub fn flag(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    /// Whether the flag was set (by a signal or [`InterruptGuard::interrupt`]).
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Set the flag without a signal.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}

