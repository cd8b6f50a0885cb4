//! Configuration management for efpp.
//!
//! The [`Config`] struct holds the few knobs a preprocessing run has. Every default
//! reproduces the fixed eFortran behaviour, so a run without any `efpp.toml` behaves
//! exactly like the classic preprocessor. Configuration can be loaded from:
//! - A TOML file (`efpp.toml`) in the working directory
//! - Code, via `Config { .. Default::default() }`

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::error::Error;

/// Config file name searched for in the working directory
pub const CONFIG_FILE_NAME: &str = "efpp.toml";

/// Rule file name, relative to the working directory
pub const DEFAULT_ALIAS_FILE: &str = "efpp_alias.list";

// Default values
fn default_alias_file() -> PathBuf {
    PathBuf::from(DEFAULT_ALIAS_FILE)
}
fn default_member_separator() -> char {
    '%'
}
fn default_file_placeholder() -> String {
    "__FILE__".to_string()
}
fn default_routine_placeholder() -> String {
    "__ROUTINE__".to_string()
}
fn default_line_placeholder() -> String {
    "__LINE__".to_string()
}

/// Main configuration struct for efpp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Alias rule file (default: `efpp_alias.list`)
    pub alias_file: PathBuf,

    /// Seed the alias table with the built-in type/intent shorthands (default: true)
    pub builtin_aliases: bool,

    /// Character that replaces member-access dots (default: `%`)
    pub member_separator: char,

    /// Expands to the enclosing program/module name (default: `__FILE__`)
    pub file_placeholder: String,

    /// Expands to the enclosing routine path (default: `__ROUTINE__`)
    pub routine_placeholder: String,

    /// Expands to the current line number (default: `__LINE__`)
    pub line_placeholder: String,

    /// Fail the run when a program/module lacks `implicit none` (default: true)
    pub require_implicit_none: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so only explicitly set keys override the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub alias_file: Option<PathBuf>,
    pub builtin_aliases: Option<bool>,
    pub member_separator: Option<char>,
    pub file_placeholder: Option<String>,
    pub routine_placeholder: Option<String>,
    pub line_placeholder: Option<String>,
    pub require_implicit_none: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            alias_file: default_alias_file(),
            builtin_aliases: true,
            member_separator: default_member_separator(),
            file_placeholder: default_file_placeholder(),
            routine_placeholder: default_routine_placeholder(),
            line_placeholder: default_line_placeholder(),
            require_implicit_none: true,
        }
    }
}

impl Config {
    /// Validate configuration values
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        let sep = self.member_separator;
        if sep == '.' || sep.is_alphanumeric() || sep == '_' || sep.is_whitespace() {
            return Some(format!("member_separator {sep:?} must be a punctuation character"));
        }
        let placeholders = [
            ("file_placeholder", &self.file_placeholder),
            ("routine_placeholder", &self.routine_placeholder),
            ("line_placeholder", &self.line_placeholder),
        ];
        for (key, value) in placeholders {
            if value.is_empty() {
                return Some(format!("{key} must not be empty"));
            }
        }
        if self.file_placeholder == self.routine_placeholder
            || self.file_placeholder == self.line_placeholder
            || self.routine_placeholder == self.line_placeholder
        {
            return Some("placeholders must be distinct".to_string());
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&contents, path)
    }

    /// Parse configuration text; `origin` only labels error messages
    pub fn from_toml_str(contents: &str, origin: &Path) -> anyhow::Result<Self> {
        let partial: PartialConfig =
            toml::from_str(contents).map_err(|e| Error::InvalidConfig {
                path: origin.to_path_buf(),
                message: e.message().to_string(),
            })?;
        let mut config = Self::default();
        config.apply_partial(partial);
        if let Some(message) = config.validate() {
            return Err(Error::InvalidConfig {
                path: origin.to_path_buf(),
                message,
            }
            .into());
        }
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(v) = partial.alias_file {
            self.alias_file = v;
        }
        if let Some(v) = partial.builtin_aliases {
            self.builtin_aliases = v;
        }
        if let Some(v) = partial.member_separator {
            self.member_separator = v;
        }
        if let Some(v) = partial.file_placeholder {
            self.file_placeholder = v;
        }
        if let Some(v) = partial.routine_placeholder {
            self.routine_placeholder = v;
        }
        if let Some(v) = partial.line_placeholder {
            self.line_placeholder = v;
        }
        if let Some(v) = partial.require_implicit_none {
            self.require_implicit_none = v;
        }
    }

    /// Find `efpp.toml` in `dir`
    #[must_use]
    pub fn discover_config_file(dir: &Path) -> Option<PathBuf> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    /// Load `efpp.toml` from `dir` if present, defaults otherwise
    ///
    /// A relative `alias_file` stays relative to the working directory, like the
    /// default rule file.
    pub fn from_directory(dir: &Path) -> anyhow::Result<Self> {
        match Self::discover_config_file(dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::from_toml_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.alias_file, PathBuf::from("efpp_alias.list"));
        assert!(config.builtin_aliases);
        assert_eq!(config.member_separator, '%');
        assert_eq!(config.file_placeholder, "__FILE__");
        assert_eq!(config.routine_placeholder, "__ROUTINE__");
        assert_eq!(config.line_placeholder, "__LINE__");
        assert!(config.require_implicit_none);
        assert!(config.validate().is_none());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_keys() {
        let config = Config::from_toml_str(
            "require_implicit_none = false\nline_placeholder = \"@LINE@\"\n",
            Path::new("efpp.toml"),
        )
        .unwrap();
        assert!(!config.require_implicit_none);
        assert_eq!(config.line_placeholder, "@LINE@");
        assert_eq!(config.file_placeholder, "__FILE__");
        assert_eq!(config.member_separator, '%');
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml_str("", Path::new("efpp.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_toml_str("indent = 3\n", Path::new("efpp.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_separator() {
        let config = Config {
            member_separator: '.',
            ..Default::default()
        };
        assert!(config.validate().is_some());

        let config = Config {
            member_separator: 'x',
            ..Default::default()
        };
        assert!(config.validate().is_some());
    }

    #[test]
    fn test_validate_placeholders_distinct() {
        let config = Config {
            routine_placeholder: "__FILE__".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate().as_deref(),
            Some("placeholders must be distinct")
        );
    }

    #[test]
    fn test_from_directory_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_directory(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_directory_with_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "alias_file = \"rules.list\"\nbuiltin_aliases = false\n",
        )
        .unwrap();
        let config = Config::from_directory(dir.path()).unwrap();
        assert_eq!(config.alias_file, PathBuf::from("rules.list"));
        assert!(!config.builtin_aliases);
    }
}
