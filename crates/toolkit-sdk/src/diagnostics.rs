// Diagnostic tracing bootstrap.
// Internal toolkit diagnostics go through the `tracing` crate; this sets up
// the global subscriber for processes that want them on stderr.

use crate::env::EnvironmentProvider;

/// Initialize the global tracing subscriber for toolkit diagnostics.
///
/// The default directive level is DEBUG when the runner requests step debug
/// logging (`RUNNER_DEBUG=1`), INFO otherwise; `RUST_LOG` directives apply on
/// top. Safe to call more than once; later calls are no-ops.
pub fn init_diagnostics(env: &dyn EnvironmentProvider) {
    let level = if env.get("RUNNER_DEBUG").as_deref() == Some("1") {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnvironment;

    #[test]
    fn repeated_init_is_safe() {
        let env = MemoryEnvironment::with_vars([("RUNNER_DEBUG", "1")]);
        init_diagnostics(&env);
        init_diagnostics(&env);
    }
}
