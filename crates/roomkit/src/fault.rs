//! Process-wide fault observability.
//!
//! Background tasks can fail in ways no room sees: a panic inside a
//! spawned task unwinds into the runtime, not into a lifecycle callback.
//! The hook installed here makes sure such faults at least reach the
//! logs. It is installed once per process, lives for the process
//! lifetime, and only observes — it never aborts or recovers.

use std::sync::OnceLock;

static HOOKS: OnceLock<()> = OnceLock::new();

/// Installs the process-wide panic hook. Idempotent — only the first
/// call has any effect, so rooms can call it freely during create.
///
/// The hook logs the panic through `tracing` and then chains to the
/// previously installed hook, preserving whatever the host process set
/// up (e.g. the default stderr backtrace printer).
pub fn install_process_hooks() {
    HOOKS.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(panic = %info, "uncaught panic");
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_process_hooks_is_idempotent() {
        // Repeated installation must not stack hooks or panic.
        install_process_hooks();
        install_process_hooks();
        install_process_hooks();
    }
}
