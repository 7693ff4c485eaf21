use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat, log::mk_filter};

/// Subscriber settings. Output always goes to stderr.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `info,jh_client=debug`.
    pub level: String,
    pub with_targets: bool,
    /// ANSI colours in `text` output; off when stderr is not a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color: std::io::stderr().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Set the filter directive, rejecting anything `EnvFilter` cannot parse.
    pub fn with_level(mut self, level: &str) -> Result<Self, LoggerError> {
        let level = level.trim();
        mk_filter(level)?;
        self.level = level.to_string();
        Ok(self)
    }

    pub fn with_format(mut self, format: &str) -> Result<Self, LoggerError> {
        self.format = format.parse()?;
        if self.format != LoggerFormat::Text {
            self.use_color = false;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_checked_up_front() {
        let cfg = LoggerConfig::default().with_level(" debug,jh_client=trace ").unwrap();
        assert_eq!(cfg.level, "debug,jh_client=trace");

        let err = LoggerConfig::default().with_level("jh_client=loud").unwrap_err();
        assert!(
            matches!(err, LoggerError::InvalidLogLevel { ref directive, .. } if directive == "jh_client=loud")
        );
    }

    #[test]
    fn json_output_never_colours() {
        let cfg = LoggerConfig {
            use_color: true,
            ..LoggerConfig::default()
        }
        .with_format("json")
        .unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert!(!cfg.use_color);
    }
}
