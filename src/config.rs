use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;

const CONFIG_PATH_REL_HOME: &str = ".config/gemibot/config.toml";
const CONFIG_PATH_ENV: &str = "GEMIBOT_CONFIG";
/// Upper bound for `history.max_turns`
pub const MAX_HISTORY_TURNS: usize = 100;

/// Bot configuration
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub gemini: Gemini,
    pub history: History,
    pub reply: Reply,
    pub health: Health,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct General {
    pub discord_token: String,
    /// "Playing ..." status shown under the bot's name
    pub presence: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Gemini {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_seconds: u64,
    /// System instruction sent with every request
    pub system: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct History {
    /// Number of question/answer pairs retained per user
    pub max_turns: usize,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Reply {
    /// Longest reply sent as a single message
    pub message_limit: usize,
    /// Segment size once a reply exceeds `message_limit`
    pub chunk_size: usize,
    pub follow_up_delay_ms: u64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Health {
    pub port: u16,
}

impl Default for General {
    fn default() -> Self {
        Self {
            discord_token: String::new(),
            presence: crate::text::PRESENCE.to_owned(),
        }
    }
}

impl Default for Gemini {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash-exp".to_owned(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            timeout_seconds: 60,
            system: crate::text::SYSTEM_INSTRUCTION.to_owned(),
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self { max_turns: 10 }
    }
}

impl Default for Reply {
    fn default() -> Self {
        Self {
            message_limit: 2000,
            chunk_size: 1900,
            follow_up_delay_ms: 500,
        }
    }
}

impl Default for Health {
    fn default() -> Self {
        Self { port: 10000 }
    }
}

/// Source of environment variables.  Abstracted so overrides can be tested without touching the
/// process environment.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl ReadEnv for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Config {
    fn config_path(env: &impl ReadEnv) -> Result<PathBuf> {
        if let Some(path) = env.var(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::home_dir()
            .map(|p| p.join(CONFIG_PATH_REL_HOME))
            .ok_or(anyhow!("Could not find home directory"))
    }

    /// Load the configuration file (if any), apply environment overrides, and validate.
    pub async fn load() -> Result<Self> {
        Self::load_with(&ProcessEnv).await
    }

    pub async fn load_with(env: &impl ReadEnv) -> Result<Self> {
        let path = Self::config_path(env)?;

        let mut config = match tokio::fs::File::open(&path).await {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents).await.map_err(|e| {
                    anyhow!(
                        "Could not read configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?;

                Self::from_toml_str(&contents).map_err(|e| {
                    anyhow!(
                        "Could not parse configuration at `{}`: {}",
                        path.to_string_lossy(),
                        e
                    )
                })?
            }
            // Environment-only deployments have no file at all.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                return Err(anyhow!(
                    "Could not open configuration at `{}`: {}",
                    path.to_string_lossy(),
                    e
                ))
            }
        };

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_env(&mut self, env: &impl ReadEnv) -> Result<()> {
        if let Some(token) = env.var("DISCORD_TOKEN") {
            self.general.discord_token = token;
        }
        if let Some(key) = env.var("GEMINI_API_KEY") {
            self.gemini.api_key = key;
        }
        if let Some(model) = env.var("GEMINI_MODEL").filter(|m| !m.is_empty()) {
            self.gemini.model = model;
        }
        if let Some(port) = env.var("PORT") {
            self.health.port = port
                .parse()
                .map_err(|e| anyhow!("Invalid PORT `{}`: {}", port, e))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.discord_token.trim().is_empty() {
            return Err(anyhow!(
                "Missing Discord token: set DISCORD_TOKEN or general.discord_token"
            ));
        }
        if self.gemini.api_key.trim().is_empty() {
            return Err(anyhow!(
                "Missing Gemini API key: set GEMINI_API_KEY or gemini.api_key"
            ));
        }
        if self.history.max_turns == 0 || self.history.max_turns > MAX_HISTORY_TURNS {
            return Err(anyhow!(
                "history.max_turns must be between 1 and {}",
                MAX_HISTORY_TURNS
            ));
        }
        if self.reply.chunk_size == 0 || self.reply.chunk_size > self.reply.message_limit {
            return Err(anyhow!(
                "reply.chunk_size must be between 1 and reply.message_limit ({})",
                self.reply.message_limit
            ));
        }
        Ok(())
    }
}

impl Gemini {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Reply {
    pub fn follow_up_delay(&self) -> Duration {
        Duration::from_millis(self.follow_up_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct InMemoryEnv(HashMap<&'static str, String>);

    impl InMemoryEnv {
        fn new(pairs: &[(&'static str, &str)]) -> Self {
            Self(pairs.iter().map(|(k, v)| (*k, v.to_string())).collect())
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.history.max_turns, 10);
        assert_eq!(cfg.reply.message_limit, 2000);
        assert_eq!(cfg.reply.chunk_size, 1900);
        assert_eq!(cfg.reply.follow_up_delay(), Duration::from_millis(500));
        assert_eq!(cfg.health.port, 10000);
        assert_eq!(cfg.gemini.model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg = Config::from_toml_str(
            r#"
[general]
discord_token = "TOK"

[history]
max_turns = 3
"#,
        )
        .unwrap();
        assert_eq!(cfg.general.discord_token, "TOK");
        assert_eq!(cfg.general.presence, crate::text::PRESENCE);
        assert_eq!(cfg.history.max_turns, 3);
        assert_eq!(cfg.gemini.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut cfg = Config::from_toml_str(
            r#"
[general]
discord_token = "FILE"

[gemini]
api_key = "FILE-KEY"
model = "file-model"
"#,
        )
        .unwrap();
        let env = InMemoryEnv::new(&[
            ("DISCORD_TOKEN", "ENV"),
            ("GEMINI_API_KEY", "ENV-KEY"),
            ("GEMINI_MODEL", "env-model"),
            ("PORT", "8080"),
        ]);
        cfg.apply_env(&env).unwrap();
        assert_eq!(cfg.general.discord_token, "ENV");
        assert_eq!(cfg.gemini.api_key, "ENV-KEY");
        assert_eq!(cfg.gemini.model, "env-model");
        assert_eq!(cfg.health.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_error() {
        let mut cfg = Config::default();
        let env = InMemoryEnv::new(&[("PORT", "not-a-port")]);
        assert!(cfg.apply_env(&env).is_err());
    }

    #[test]
    fn test_missing_credentials_fail_validation() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_err());

        cfg.general.discord_token = "TOK".into();
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("GEMINI_API_KEY"));

        cfg.gemini.api_key = "KEY".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_max_turns_is_bounded() {
        let mut cfg = Config::default();
        cfg.general.discord_token = "TOK".into();
        cfg.gemini.api_key = "KEY".into();

        cfg.history.max_turns = 0;
        assert!(cfg.validate().is_err());
        cfg.history.max_turns = MAX_HISTORY_TURNS;
        assert!(cfg.validate().is_ok());
        cfg.history.max_turns = usize::MAX;
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("history.max_turns"));
    }

    #[test]
    fn test_chunk_size_must_fit_limit() {
        let mut cfg = Config::default();
        cfg.general.discord_token = "TOK".into();
        cfg.gemini.api_key = "KEY".into();
        cfg.reply.chunk_size = 2500;
        assert!(cfg.validate().is_err());
        cfg.reply.chunk_size = 0;
        assert!(cfg.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_from_file_path_env() {
        let f = write_toml(
            r#"
[general]
discord_token = "FROM-FILE"

[gemini]
api_key = "KEY"
"#,
        );
        let path = f.path().to_string_lossy().to_string();
        let env = InMemoryEnv::new(&[(CONFIG_PATH_ENV, &path)]);
        let cfg = Config::load_with(&env).await.unwrap();
        assert_eq!(cfg.general.discord_token, "FROM-FILE");
    }

    #[tokio::test]
    async fn test_load_without_file_uses_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml").to_string_lossy().to_string();
        let env = InMemoryEnv::new(&[
            (CONFIG_PATH_ENV, &path),
            ("DISCORD_TOKEN", "TOK"),
            ("GEMINI_API_KEY", "KEY"),
        ]);
        let cfg = Config::load_with(&env).await.unwrap();
        assert_eq!(cfg.general.discord_token, "TOK");
        assert_eq!(cfg.gemini.api_key, "KEY");
    }

    #[tokio::test]
    async fn test_load_without_credentials_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml").to_string_lossy().to_string();
        let env = InMemoryEnv::new(&[(CONFIG_PATH_ENV, &path)]);
        assert!(Config::load_with(&env).await.is_err());
    }

    #[tokio::test]
    async fn test_load_unparseable_file_is_error() {
        let f = write_toml("this is = = not toml");
        let path = f.path().to_string_lossy().to_string();
        let env = InMemoryEnv::new(&[(CONFIG_PATH_ENV, &path)]);
        let err = Config::load_with(&env).await.unwrap_err().to_string();
        assert!(err.contains("Could not parse configuration"));
    }
}
