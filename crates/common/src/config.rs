use crate::error::ReplyAiError;
use crate::Result;
use config::{Config, ConfigError, Environment, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// How user text is preprocessed before it is sent upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreprocessorMode {
    /// Run the external preprocessing script
    Command,
    /// Clean the text in-process
    Builtin,
}

impl FromStr for PreprocessorMode {
    type Err = ReplyAiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "command" => Ok(Self::Command),
            "builtin" => Ok(Self::Builtin),
            other => Err(ReplyAiError::config(format!(
                "알 수 없는 전처리 모드입니다: {} (command 또는 builtin)",
                other
            ))),
        }
    }
}

/// ReplyAI application configuration
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat completion API key (`openai.api.key`)
    pub openai_api_key: String,

    /// Chat completion model (`openai.model`)
    pub openai_model: String,

    /// Chat completion API base URL (`openai.base_url`)
    pub openai_base_url: String,

    /// Deadline for one upstream round trip, in seconds (`openai.timeout_secs`)
    pub request_timeout_secs: u64,

    /// Preprocessor implementation (`preprocessor.mode`)
    pub preprocessor_mode: PreprocessorMode,

    /// Preprocessor executable (`preprocessor.command`)
    pub preprocessor_command: String,

    /// Script passed as the first argument (`preprocessor.script`)
    pub preprocessor_script: String,

    /// Working directory of the preprocessor child (`preprocessor.working_dir`)
    pub preprocessor_working_dir: PathBuf,

    /// Optional preprocessor deadline; `None` waits for natural exit
    pub preprocessor_timeout_secs: Option<u64>,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Maximum accepted JSON body size in bytes
    pub max_payload_bytes: usize,

    /// Log level
    pub log_level: String,

    /// Log directory; console only when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            request_timeout_secs: 30,
            preprocessor_mode: PreprocessorMode::Command,
            preprocessor_command: "python".to_string(),
            preprocessor_script: "preprocess.py".to_string(),
            preprocessor_working_dir: PathBuf::from("../python-preprocessing"),
            preprocessor_timeout_secs: None,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            max_payload_bytes: 256 * 1024,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// The API key never reaches the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &if self.openai_api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("preprocessor_mode", &self.preprocessor_mode)
            .field("preprocessor_command", &self.preprocessor_command)
            .field("preprocessor_script", &self.preprocessor_script)
            .field("preprocessor_working_dir", &self.preprocessor_working_dir)
            .field("preprocessor_timeout_secs", &self.preprocessor_timeout_secs)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("max_payload_bytes", &self.max_payload_bytes)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from `.env`, an optional `application.*` file and
    /// `REPLYAI_`-prefixed environment variables
    ///
    /// `REPLYAI_OPENAI__API__KEY` maps to `openai.api.key`. The plain
    /// `OPENAI_API_KEY` variable is honoured when no key is configured.
    pub fn load() -> Result<Self> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let settings = Config::builder()
            .add_source(File::with_name("application").required(false))
            .add_source(env_source(ENV_PREFIX))
            .build()
            .map_err(|e| ReplyAiError::config(format!("설정을 불러올 수 없습니다: {}", e)))?;

        let mut config = Self::from_settings(&settings)?;

        if config.openai_api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                config.openai_api_key = key;
            }
        }

        Ok(config)
    }

    /// Build configuration from an already assembled key/value store
    ///
    /// Keys that are absent fall back to [`AppConfig::default`].
    pub fn from_settings(settings: &Config) -> Result<Self> {
        let defaults = Self::default();

        let preprocessor_mode = match lookup::<String>(settings, "preprocessor.mode")? {
            Some(mode) => mode.parse()?,
            None => defaults.preprocessor_mode,
        };

        Ok(Self {
            openai_api_key: lookup(settings, "openai.api.key")?
                .unwrap_or(defaults.openai_api_key),
            openai_model: lookup(settings, "openai.model")?
                .unwrap_or(defaults.openai_model),
            openai_base_url: lookup(settings, "openai.base_url")?
                .unwrap_or(defaults.openai_base_url),
            request_timeout_secs: lookup(settings, "openai.timeout_secs")?
                .unwrap_or(defaults.request_timeout_secs),
            preprocessor_mode,
            preprocessor_command: lookup(settings, "preprocessor.command")?
                .unwrap_or(defaults.preprocessor_command),
            preprocessor_script: lookup(settings, "preprocessor.script")?
                .unwrap_or(defaults.preprocessor_script),
            preprocessor_working_dir: lookup::<String>(settings, "preprocessor.working_dir")?
                .map(PathBuf::from)
                .unwrap_or(defaults.preprocessor_working_dir),
            preprocessor_timeout_secs: lookup(settings, "preprocessor.timeout_secs")?,
            server_host: lookup(settings, "server.host")?
                .unwrap_or(defaults.server_host),
            server_port: lookup(settings, "server.port")?
                .unwrap_or(defaults.server_port),
            max_payload_bytes: lookup(settings, "server.max_payload_bytes")?
                .unwrap_or(defaults.max_payload_bytes),
            log_level: lookup(settings, "log.level")?
                .unwrap_or(defaults.log_level),
            log_dir: lookup::<String>(settings, "log.dir")?.map(PathBuf::from),
        })
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Upstream round-trip deadline
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Preprocessor deadline, if any
    pub fn preprocessor_timeout(&self) -> Option<Duration> {
        self.preprocessor_timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration
    ///
    /// A missing API key is not an error here; it is reported per request.
    pub fn validate(&self) -> Result<()> {
        if !self.openai_base_url.starts_with("http://")
            && !self.openai_base_url.starts_with("https://")
        {
            return Err(ReplyAiError::config(
                "openai.base_url은 http:// 또는 https:// 로 시작해야 합니다.",
            ));
        }

        if self.openai_model.trim().is_empty() {
            return Err(ReplyAiError::config("openai.model이 비어 있습니다."));
        }

        if self.request_timeout_secs == 0 {
            return Err(ReplyAiError::config("openai.timeout_secs는 0보다 커야 합니다."));
        }

        if self.preprocessor_mode == PreprocessorMode::Command
            && self.preprocessor_command.trim().is_empty()
        {
            return Err(ReplyAiError::config("preprocessor.command가 비어 있습니다."));
        }

        if self.preprocessor_timeout_secs == Some(0) {
            return Err(ReplyAiError::config(
                "preprocessor.timeout_secs는 0보다 커야 합니다.",
            ));
        }

        if self.server_port == 0 {
            return Err(ReplyAiError::config("server.port는 0일 수 없습니다."));
        }

        Ok(())
    }
}

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "REPLYAI";

/// Environment source mapping `<PREFIX>_A__B` to the key `a.b`
fn env_source(prefix: &str) -> Environment {
    Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
}

/// Read an optional key, treating absence as `None` and type errors as failures
fn lookup<T: DeserializeOwned>(settings: &Config, key: &str) -> Result<Option<T>> {
    match settings.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ReplyAiError::config(format!(
            "설정 값이 올바르지 않습니다 ({}): {}",
            key, e
        ))),
    }
}
