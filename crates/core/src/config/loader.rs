//! Settings loader.
//!
//! Settings come from two layers:
//! - an optional `blogi.toml` file
//! - environment variables, which win over the file
//!
//! The environment is passed in as a lookup function so callers (and tests)
//! decide where values come from; nothing below reads process state directly.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::FileSettings;
use crate::config::models::Settings;
use std::path::Path;
use std::path::PathBuf;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "blogi.toml";

pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_BRAVE_SEARCH_API_KEY: &str = "BRAVE_SEARCH_API_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_USERAPI_API_KEY: &str = "USERAPI_AI_API_KEY";
pub const ENV_USERAPI_ACCOUNT_HASH: &str = "USERAPI_AI_ACCOUNT_HASH";
pub const ENV_POSTS_DIR: &str = "BLOGI_POSTS_DIR";
pub const ENV_PROMPTS_DIR: &str = "BLOGI_PROMPTS_DIR";
pub const ENV_MODEL: &str = "BLOGI_MODEL";

/// Loads settings from `path` (or `blogi.toml` if present) and overlays the
/// environment.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - an explicitly given file cannot be read
/// - the file is not valid TOML
/// - a limit is zero
///
/// # Example
///
/// ```rust,no_run
/// use blogi_core::config::loader::load_settings;
///
/// let settings = load_settings(None, |key| std::env::var(key).ok())?;
/// println!("Posts go to {}", settings.posts_dir.display());
/// # Ok::<(), blogi_core::config::ConfigError>(())
/// ```
pub fn load_settings<F>(path: Option<&Path>, env: F) -> ConfigResult<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match path {
        Some(path) => read_file_settings(path)?,
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if default_path.exists() {
                read_file_settings(default_path)?
            } else {
                FileSettings::default()
            }
        }
    };

    let settings = resolve(file, env);
    validate(&settings, path.unwrap_or(Path::new(DEFAULT_SETTINGS_FILE)))?;
    Ok(settings)
}

/// Parses a `blogi.toml` file.
fn read_file_settings(path: &Path) -> ConfigResult<FileSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies the environment layer on top of the file layer.
fn resolve<F>(file: FileSettings, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());
    let defaults = Settings::default();
    let mut credentials = file.credentials;

    // Environment wins over the file
    for (key, slot) in [
        (ENV_ANTHROPIC_API_KEY, &mut credentials.anthropic_api_key),
        (ENV_BRAVE_SEARCH_API_KEY, &mut credentials.brave_search_api_key),
        (ENV_OPENAI_API_KEY, &mut credentials.openai_api_key),
        (ENV_USERAPI_API_KEY, &mut credentials.userapi_api_key),
        (ENV_USERAPI_ACCOUNT_HASH, &mut credentials.userapi_account_hash),
    ] {
        if let Some(value) = env(key) {
            *slot = Some(value);
        }
    }

    Settings {
        posts_dir: env(ENV_POSTS_DIR)
            .map(PathBuf::from)
            .or(file.posts_dir)
            .unwrap_or(defaults.posts_dir),
        prompts_dir: env(ENV_PROMPTS_DIR).map(PathBuf::from).or(file.prompts_dir),
        model: env(ENV_MODEL).or(file.model).unwrap_or(defaults.model),
        image_prompt_model: file
            .image_prompt_model
            .unwrap_or(defaults.image_prompt_model),
        limits: file.limits,
        credentials,
    }
}

fn validate(settings: &Settings, path: &Path) -> ConfigResult<()> {
    let limits = &settings.limits;
    let zero = [
        ("limits.max_search_results", limits.max_search_results as u64),
        ("limits.max_content_chars", limits.max_content_chars as u64),
        ("limits.fetch_timeout_secs", limits.fetch_timeout_secs),
        ("limits.request_timeout_secs", limits.request_timeout_secs),
    ]
    .into_iter()
    .find(|(_, value)| *value == 0);

    if let Some((name, _)) = zero {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: format!("{name} must be greater than zero"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let settings = resolve(FileSettings::default(), env_from(&[]));

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.limits.max_search_results, 3);
        assert_eq!(settings.limits.max_content_chars, 10_000);
        assert_eq!(settings.limits.fetch_timeout_secs, 30);
        assert_eq!(settings.model, "claude-3-haiku-20240307");
    }

    #[test]
    fn test_load_full_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blogi.toml");
        fs::write(
            &path,
            r#"
posts_dir = "ai_blog/content/posts"
prompts_dir = "prompts"
model = "claude-3-5-sonnet"

[limits]
max_search_results = 5
fetch_timeout_secs = 10

[credentials]
brave_search_api_key = "brave-from-file"
"#,
        )
        .unwrap();

        let settings = load_settings(Some(&path), env_from(&[])).unwrap();

        assert_eq!(settings.posts_dir, PathBuf::from("ai_blog/content/posts"));
        assert_eq!(settings.prompts_dir, Some(PathBuf::from("prompts")));
        assert_eq!(settings.model, "claude-3-5-sonnet");
        assert_eq!(settings.limits.max_search_results, 5);
        assert_eq!(settings.limits.fetch_timeout_secs, 10);
        // Unset limits keep their defaults
        assert_eq!(settings.limits.max_content_chars, 10_000);
        assert_eq!(
            settings.credentials.brave_search_api_key.as_deref(),
            Some("brave-from-file")
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blogi.toml");
        fs::write(
            &path,
            "posts_dir = \"from-file\"\n[credentials]\nanthropic_api_key = \"file-key\"\n",
        )
        .unwrap();

        let env = env_from(&[
            (ENV_ANTHROPIC_API_KEY, "env-key"),
            (ENV_POSTS_DIR, "from-env"),
            (ENV_USERAPI_ACCOUNT_HASH, "hash"),
        ]);
        let settings = load_settings(Some(&path), env).unwrap();

        assert_eq!(settings.credentials.anthropic_api_key.as_deref(), Some("env-key"));
        assert_eq!(settings.credentials.userapi_account_hash.as_deref(), Some("hash"));
        assert_eq!(settings.posts_dir, PathBuf::from("from-env"));
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let env = env_from(&[(ENV_ANTHROPIC_API_KEY, "  "), (ENV_MODEL, "")]);
        let settings = resolve(FileSettings::default(), env);

        assert_eq!(settings.credentials.anthropic_api_key, None);
        assert_eq!(settings.model, "claude-3-haiku-20240307");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load_settings(Some(&temp.path().join("nope.toml")), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blogi.toml");
        fs::write(&path, "posts_dir = [unclosed").unwrap();

        let result = load_settings(Some(&path), env_from(&[]));
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blogi.toml");
        fs::write(&path, "[limits]\nmax_search_results = 0\n").unwrap();

        let result = load_settings(Some(&path), env_from(&[]));
        match result {
            Err(ConfigError::InvalidConfig { reason, .. }) => {
                assert!(reason.contains("max_search_results"));
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
