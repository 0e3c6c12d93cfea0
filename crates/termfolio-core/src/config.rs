//! Configuration management for Termfolio

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Prefix for environment overrides, e.g. `TERMFOLIO__TICKER__ENABLED=false`
pub const ENV_PREFIX: &str = "TERMFOLIO";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interpreter and window configuration
    pub terminal: TerminalConfig,

    /// Background animation configuration
    pub matrix: MatrixConfig,

    /// Headline ticker configuration
    pub ticker: TickerConfig,

    /// Static content configuration
    pub content: ContentConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Terminal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// User shown in the prompt
    pub user: String,
    /// Host shown in the prompt
    pub host: String,
    /// UI tick (frame) interval
    #[serde(with = "humantime_serde")]
    pub tick_rate: Duration,
    /// How long only the background is visible at startup
    #[serde(with = "humantime_serde")]
    pub boot_delay: Duration,
    /// Delay between "Opening x.txt..." and the section appearing
    #[serde(with = "humantime_serde")]
    pub section_delay: Duration,
    /// Delay between the goodbye message and quitting
    #[serde(with = "humantime_serde")]
    pub exit_delay: Duration,
    /// Maximum number of remembered commands
    pub history_limit: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            user: "kenzo".to_string(),
            host: "whitehat".to_string(),
            tick_rate: Duration::from_millis(33),
            boot_delay: Duration::from_millis(500),
            section_delay: Duration::from_millis(500),
            exit_delay: Duration::from_millis(1000),
            history_limit: 500,
        }
    }
}

impl TerminalConfig {
    /// The `user@host:~$` prompt
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$", self.user, self.host)
    }

    /// The fake working directory
    pub fn home_dir(&self) -> String {
        format!("/home/{}/{}", self.user, self.host)
    }
}

/// Matrix rain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Draw the background at all
    pub enabled: bool,
    /// Glyphs the rain is drawn from
    pub charset: String,
    /// Terminal cells per rain column
    pub column_width: u16,
    /// Fraction of trail brightness lost per frame
    pub fade: f64,
    /// A drop past the bottom restarts when a uniform draw exceeds this
    pub reset_threshold: f64,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            charset: "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()_+-=[]{}|;:,.<>?".to_string(),
            column_width: 2,
            fade: 0.05,
            reset_threshold: 0.975,
        }
    }
}

/// Headline ticker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Poll remote sources; when false only the fallback list is shown
    pub enabled: bool,
    /// Time between aggregation passes
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Headlines kept after aggregation
    pub max_headlines: usize,
    /// Headlines taken from each source
    pub per_source_limit: usize,
    /// Ticks per one-character scroll step
    pub scroll_every: u32,
    /// User agent sent to the sources (GitHub rejects requests without one)
    pub user_agent: String,
    /// Source endpoints
    pub sources: SourcesConfig,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval: Duration::from_secs(300),
            request_timeout: Duration::from_secs(10),
            max_headlines: 20,
            per_source_limit: 8,
            scroll_every: 3,
            user_agent: concat!("termfolio/", env!("CARGO_PKG_VERSION")).to_string(),
            sources: SourcesConfig::default(),
        }
    }
}

/// Endpoints for the three headline sources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// DeFiLlama hacks feed
    pub defillama_url: String,
    /// GitHub global security advisories
    pub github_advisories_url: String,
    /// Hacker News (Algolia) search
    pub hackernews_url: String,
    /// Query sent to the Hacker News search
    pub hackernews_query: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            defillama_url: "https://api.llama.fi/hacks".to_string(),
            github_advisories_url: "https://api.github.com/advisories".to_string(),
            hackernews_url: "https://hn.algolia.com/api/v1/search_by_date".to_string(),
            hackernews_query: "exploit".to_string(),
        }
    }
}

/// Static content configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory blog post paths are resolved against
    pub root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
    /// Directory for the TUI log file (platform data dir when unset)
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    /// Directory for the TUI log file: `dir`, else the platform data dir
    pub fn resolve_dir(&self) -> Result<PathBuf> {
        self.dir
            .clone()
            .or_else(default_log_dir)
            .ok_or_else(|| Error::config("no platform data directory for logs; set logging.dir"))
    }
}

impl Config {
    /// Load configuration: defaults, then a TOML file, then environment.
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path() {
                    debug!(path = %path.display(), "Checking platform config file");
                    builder = builder.add_source(config::File::from(path).required(false));
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the UI or the ticker cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.terminal.tick_rate.is_zero() {
            return Err(Error::validation("terminal.tick_rate must be non-zero"));
        }
        if self.terminal.history_limit == 0 {
            return Err(Error::validation("terminal.history_limit must be at least 1"));
        }
        if self.matrix.charset.is_empty() {
            return Err(Error::validation("matrix.charset must not be empty"));
        }
        if self.matrix.column_width == 0 {
            return Err(Error::validation("matrix.column_width must be at least 1"));
        }
        if !(self.matrix.fade > 0.0 && self.matrix.fade <= 1.0) {
            return Err(Error::validation("matrix.fade must be in (0, 1]"));
        }
        if !(0.0..1.0).contains(&self.matrix.reset_threshold) {
            return Err(Error::validation("matrix.reset_threshold must be in [0, 1)"));
        }
        if self.ticker.poll_interval.is_zero() {
            return Err(Error::validation("ticker.poll_interval must be non-zero"));
        }
        if self.ticker.scroll_every == 0 {
            return Err(Error::validation("ticker.scroll_every must be at least 1"));
        }

        let sources = &self.ticker.sources;
        for (key, value) in [
            ("ticker.sources.defillama_url", &sources.defillama_url),
            ("ticker.sources.github_advisories_url", &sources.github_advisories_url),
            ("ticker.sources.hackernews_url", &sources.hackernews_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| Error::validation(format!("{key} is not a valid URL: {e}")))?;
        }

        Ok(())
    }
}

/// `<platform config dir>/termfolio.toml`
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "whitehat", "termfolio")
        .map(|dirs| dirs.config_dir().join("termfolio.toml"))
}

/// `<platform data dir>/logs`
pub fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "whitehat", "termfolio")
        .map(|dirs| dirs.data_local_dir().join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.terminal.prompt(), "kenzo@whitehat:~$");
        assert_eq!(config.terminal.home_dir(), "/home/kenzo/whitehat");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[terminal]
user = "alice"
section_delay = "250ms"

[ticker]
enabled = false
poll_interval = "1m"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.terminal.user, "alice");
        assert_eq!(config.terminal.host, "whitehat");
        assert_eq!(config.terminal.section_delay, Duration::from_millis(250));
        assert!(!config.ticker.enabled);
        assert_eq!(config.ticker.poll_interval, Duration::from_secs(60));
        assert_eq!(config.matrix.reset_threshold, 0.975);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        const KEY: &str = "TERMFOLIO__TICKER__MAX_HEADLINES";
        let previous = std::env::var(KEY).ok();
        std::env::set_var(KEY, "7");

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[ticker]\nmax_headlines = 12").unwrap();
        let result = Config::load(Some(file.path()));

        match previous {
            Some(value) => std::env::set_var(KEY, value),
            None => std::env::remove_var(KEY),
        }
        assert_eq!(result.unwrap().ticker.max_headlines, 7);
    }

    #[test]
    fn test_log_dir_prefers_explicit_setting() {
        let logging = LoggingConfig {
            dir: Some(PathBuf::from("/var/log/termfolio")),
            ..LoggingConfig::default()
        };
        assert_eq!(logging.resolve_dir().unwrap(), PathBuf::from("/var/log/termfolio"));
    }

    #[test]
    fn test_config_error_message() {
        let err = Error::config("no platform data directory for logs; set logging.dir");
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.matrix.reset_threshold = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.matrix.charset.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ticker.sources.hackernews_url = "not a url".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hackernews_url"));
    }
}
