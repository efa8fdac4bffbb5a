//! Injected logging seam for the checker, cycle detector and orchestrator.

/// Receives progress and diagnostic messages from the engine.
pub trait Diagnostics: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards to `tracing` under the `depfence` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "depfence", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "depfence", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "depfence", "{message}");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
