//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that supplies or overrides the Google TTS key.
pub const GOOGLE_KEY_ENV: &str = "VOCABTUTOR_GOOGLE_API_KEY";

/// Top-level vocabtutor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Where vocabulary files are read from.
    #[serde(default)]
    pub data: DataConfig,
    /// Where scores are persisted.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Pronunciation backends.
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Vocabulary file location. Files live at `<lang>/<level>.dat` under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum DataConfig {
    Directory {
        #[serde(default = "default_data_dir")]
        path: PathBuf,
    },
    Http {
        base_url: String,
    },
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig::Directory {
            path: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the score file.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share").join("vocabtutor"))
        .unwrap_or_else(|_| PathBuf::from(".vocabtutor"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Remote synthesis; absent or empty key means local only.
    #[serde(default)]
    pub google: Option<GoogleConfig>,
    #[serde(default)]
    pub local: LocalSpeechConfig,
}

impl SpeechConfig {
    /// The remote configuration, if a non-empty credential is present.
    pub fn remote(&self) -> Option<&GoogleConfig> {
        self.google
            .as_ref()
            .filter(|g| !g.api_key.trim().is_empty())
    }
}

/// Google Cloud Text-to-Speech settings.
///
/// Note: Custom Debug impl masks the API key to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_audio_encoding")]
    pub audio_encoding: String,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("audio_encoding", &self.audio_encoding)
            .finish()
    }
}

fn default_audio_encoding() -> String {
    "MP3".to_string()
}

/// Local speech engine and audio player commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSpeechConfig {
    /// Synthesis program (espeak-ng compatible flags).
    #[serde(default = "default_engine")]
    pub program: String,
    /// Program that plays an audio file given as its last argument.
    #[serde(default = "default_player")]
    pub player: String,
    #[serde(default = "default_player_args")]
    pub player_args: Vec<String>,
}

impl Default for LocalSpeechConfig {
    fn default() -> Self {
        Self {
            program: default_engine(),
            player: default_player(),
            player_args: default_player_args(),
        }
    }
}

fn default_engine() -> String {
    "espeak-ng".to_string()
}
fn default_player() -> String {
    "mpg123".to_string()
}
fn default_player_args() -> Vec<String> {
    vec!["-q".to_string()]
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    // Substituted values are copied as-is and never rescanned.
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `vocabtutor.toml` in the current directory
/// 2. `~/.config/vocabtutor/config.toml`
///
/// `VOCABTUTOR_GOOGLE_API_KEY` overrides the remote synthesis key.
pub fn load_config() -> Result<TutorConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TutorConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("vocabtutor.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TutorConfig::default(),
    };

    if let Ok(key) = std::env::var(GOOGLE_KEY_ENV) {
        config
            .speech
            .google
            .get_or_insert_with(|| GoogleConfig {
                api_key: String::new(),
                base_url: None,
                audio_encoding: default_audio_encoding(),
            })
            .api_key = key;
    }

    Ok(config)
}

/// Parse a TOML string and resolve `${VAR}` references.
pub fn parse_config(content: &str) -> Result<TutorConfig> {
    let mut config: TutorConfig = toml::from_str(content)?;

    if let Some(google) = config.speech.google.as_mut() {
        google.api_key = resolve_env_vars(&google.api_key);
        google.base_url = google.base_url.as_deref().map(resolve_env_vars);
    }
    if let DataConfig::Http { base_url } = &mut config.data {
        *base_url = resolve_env_vars(base_url);
    }

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("vocabtutor"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_VOCABTUTOR_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_VOCABTUTOR_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_VOCABTUTOR_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_VOCABTUTOR_UNSET_VAR}"), "");
        std::env::remove_var("_VOCABTUTOR_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_VOCABTUTOR_SELF_REF", "${_VOCABTUTOR_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a${_VOCABTUTOR_SELF_REF}b"),
            "a${_VOCABTUTOR_SELF_REF}b"
        );
        std::env::remove_var("_VOCABTUTOR_SELF_REF");

        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
    }

    #[test]
    fn default_config() {
        let config = TutorConfig::default();
        assert_eq!(
            config.data,
            DataConfig::Directory {
                path: PathBuf::from("./data")
            }
        );
        assert!(config.speech.remote().is_none());
        assert_eq!(config.speech.local.program, "espeak-ng");
        assert_eq!(config.speech.local.player_args, vec!["-q"]);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[data]
source = "http"
base_url = "https://vocab.example.com"

[storage]
dir = "/tmp/vocabtutor-scores"

[speech.google]
api_key = "secret-key"

[speech.local]
program = "espeak"
player = "afplay"
player_args = []
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(
            config.data,
            DataConfig::Http {
                base_url: "https://vocab.example.com".into()
            }
        );
        assert_eq!(config.storage.dir, PathBuf::from("/tmp/vocabtutor-scores"));
        let google = config.speech.remote().unwrap();
        assert_eq!(google.api_key, "secret-key");
        assert_eq!(google.audio_encoding, "MP3");
        assert!(config.speech.local.player_args.is_empty());
    }

    #[test]
    fn empty_key_is_not_configured() {
        let config = parse_config("[speech.google]\napi_key = \"  \"\n").unwrap();
        assert!(config.speech.google.is_some());
        assert!(config.speech.remote().is_none());
    }

    #[test]
    fn debug_masks_api_key() {
        let config = parse_config("[speech.google]\napi_key = \"top-secret\"\n").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn directory_source_defaults_path() {
        let config = parse_config("[data]\nsource = \"directory\"\n").unwrap();
        assert_eq!(config.data, DataConfig::default());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/vocabtutor.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocabtutor.toml");
        std::fs::write(&path, "[storage]\ndir = \"scores\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.storage.dir, PathBuf::from("scores"));
    }
}
