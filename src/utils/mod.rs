//! Utilities: logging setup (verbosity flags -> tracing filter).
//!
//! Key items:
//!   LogLevel / derive_level
//!   init_logging

/// Logging helpers.
pub mod logging {
    use tracing_subscriber::EnvFilter;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub enum LogLevel {
        Error = 0,
        Warn = 1,
        Debug = 2,
        Trace = 3,
    }

    impl LogLevel {
        /// Filter directive understood by `EnvFilter`.
        pub fn as_directive(&self) -> &'static str {
            match self {
                LogLevel::Error => "error",
                LogLevel::Warn => "warn",
                LogLevel::Debug => "debug",
                LogLevel::Trace => "trace",
            }
        }
    }

    /// `-q` wins over `-v`. Default is warn: calibredb output goes to stdout,
    /// so the log stream stays quiet unless asked.
    pub fn derive_level(verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        match verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    /// RUST_LOG when set, otherwise the flag-derived level.
    pub fn filter_for(level: LogLevel) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
    }

    /// Install the global subscriber. Logs go to stderr; stdout carries results.
    pub fn init_logging(level: LogLevel) {
        // A subscriber may already be set (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter_for(level))
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn quiet_overrides_verbose() {
            assert_eq!(derive_level(2, true), LogLevel::Error);
        }

        #[test]
        fn verbosity_steps() {
            assert_eq!(derive_level(0, false), LogLevel::Warn);
            assert_eq!(derive_level(1, false), LogLevel::Debug);
            assert_eq!(derive_level(5, false), LogLevel::Trace);
            assert_eq!(LogLevel::Debug.as_directive(), "debug");
        }
    }
}

pub use logging::{derive_level, init_logging};
