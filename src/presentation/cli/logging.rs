use tracing::Subscriber;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Handle on the installed log filter
///
/// The subscriber is installed before `config.yaml` is read, so `verbose: true`
/// from the file raises the level through this handle afterwards.
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogControl {
    /// Switch the filter to `debug`. A filter chosen through `RUST_LOG` is left
    /// alone. Returns true when the filter was replaced.
    pub fn enable_debug(&self) -> bool {
        if self.from_env {
            return false;
        }
        self.handle.reload(EnvFilter::new("debug")).is_ok()
    }
}

/// Build the stderr subscriber. `env_filter` wins over `verbose` when present.
pub fn build(
    verbose: bool,
    env_filter: Option<EnvFilter>,
) -> (LogControl, impl Subscriber + Send + Sync + 'static) {
    let from_env = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });

    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    (LogControl { handle, from_env }, subscriber)
}

/// Install the global subscriber (`RUST_LOG`, else debug with `-v`, else info)
pub fn init(verbose: bool) -> LogControl {
    let (control, subscriber) = build(verbose, EnvFilter::try_from_default_env().ok());
    subscriber.init();
    control
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_enable_debug_raises_level() {
        let (control, subscriber) = build(false, None);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::INFO));
            assert!(!tracing::enabled!(Level::DEBUG));

            assert!(control.enable_debug());

            assert!(tracing::enabled!(Level::DEBUG));
        });
    }

    #[test]
    fn test_env_filter_is_kept() {
        let (control, subscriber) = build(true, Some(EnvFilter::new("warn")));

        tracing::subscriber::with_default(subscriber, || {
            assert!(!control.enable_debug());
            assert!(!tracing::enabled!(Level::INFO));
            assert!(tracing::enabled!(Level::WARN));
        });
    }
}
