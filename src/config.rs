//! Configuration management for exproto.
//!
//! This module provides the [`Config`] struct which controls extraction
//! behavior. Configuration can be loaded from:
//! - TOML files (`exproto.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the
//! input file up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["exproto.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_cpp_command() -> String {
    "cpp".to_string()
}
fn default_cpp_args() -> Vec<String> {
    // -C keeps comments in the preprocessed output so comment association
    // still works after expansion
    vec!["-C".to_string()]
}

/// Main configuration struct for exproto
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Include each prototype's associated comment in the output (default: false)
    #[serde(default)]
    pub include_comments: bool,

    /// Include prototypes of static functions (default: false)
    #[serde(default)]
    pub include_statics: bool,

    /// Run the external preprocessor over the input before scanning (default: false)
    #[serde(default)]
    pub use_cpp: bool,

    /// Preprocessor executable (default: "cpp")
    #[serde(default = "default_cpp_command")]
    pub cpp_command: String,

    /// Base arguments always passed to the preprocessor (default: ["-C"])
    #[serde(default = "default_cpp_args")]
    pub cpp_args: Vec<String>,

    /// Emit debug diagnostics on stderr (default: false)
    #[serde(default)]
    pub debug: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub include_comments: Option<bool>,
    pub include_statics: Option<bool>,
    pub use_cpp: Option<bool>,
    pub cpp_command: Option<String>,
    pub cpp_args: Option<Vec<String>>,
    pub debug: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            include_comments: false,
            include_statics: false,
            use_cpp: false,
            cpp_command: default_cpp_command(),
            cpp_args: default_cpp_args(),
            debug: false,
        }
    }
}

impl Config {
    /// Validate configuration values
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.cpp_command.trim().is_empty() {
            return Some("cpp_command must not be empty".to_string());
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.include_comments {
            self.include_comments = v;
        }
        if let Some(v) = partial.include_statics {
            self.include_statics = v;
        }
        if let Some(v) = partial.use_cpp {
            self.use_cpp = v;
        }
        if let Some(v) = &partial.cpp_command {
            self.cpp_command.clone_from(v);
        }
        if let Some(v) = &partial.cpp_args {
            self.cpp_args.clone_from(v);
        }
        if let Some(v) = partial.debug {
            self.debug = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home
    /// directory config. Returns paths in order of priority (least specific
    /// first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.include_comments);
        assert!(!config.include_statics);
        assert!(!config.use_cpp);
        assert_eq!(config.cpp_command, "cpp");
        assert_eq!(config.cpp_args, vec!["-C"]);
        assert!(!config.debug);
    }

    #[test]
    fn test_config_apply_partial() {
        let mut base = Config::default();

        let partial = PartialConfig {
            include_comments: Some(true),
            cpp_command: Some("clang-cpp".to_string()),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert!(base.include_comments);
        assert_eq!(base.cpp_command, "clang-cpp");
        // Other fields should remain at defaults
        assert!(!base.include_statics);
        assert_eq!(base.cpp_args, vec!["-C"]);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config::default();
        base.include_statics = true;

        let partial = PartialConfig {
            include_comments: Some(true),
            ..Default::default()
        };

        base.apply_partial(&partial);
        // include_statics should be preserved (not reset to default)
        assert!(base.include_statics);
        assert!(base.include_comments);
    }

    #[test]
    fn test_parse_toml() {
        let partial: PartialConfig = toml::from_str(
            "include_comments = true\ncpp_args = [\"-C\", \"-I/usr/include\"]\n",
        )
        .unwrap();
        let mut config = Config::default();
        config.apply_partial(&partial);
        assert!(config.include_comments);
        assert_eq!(config.cpp_args, vec!["-C", "-I/usr/include"]);
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exproto.toml");
        std::fs::write(&path, "include_statics = true\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert!(config.include_statics);
        assert!(!config.include_comments);
    }

    #[test]
    fn test_from_toml_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exproto.toml");
        std::fs::write(&path, "include_statics = \"maybe\"\n").unwrap();

        assert!(Config::from_toml_file(&path).is_err());
    }

    #[test]
    fn test_discover_config_files_finds_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("src");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(dir.path().join("exproto.toml"), "use_cpp = true\n").unwrap();

        let input = sub.join("main.c");
        std::fs::write(&input, "int f(void);\n").unwrap();

        let files = Config::discover_config_files(&input);
        assert!(files.iter().any(|p| p == &dir.path().join("exproto.toml")));
    }

    #[test]
    fn test_from_discovered_files_returns_default_when_empty() {
        // When no config files exist, should return default config
        let path = PathBuf::from("/nonexistent/unique/path/file.c");
        let config = Config::from_discovered_files(&path);
        assert!(!config.use_cpp);
        assert_eq!(config.cpp_command, "cpp");
    }

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(config.validate().is_none(), "Default config should be valid");
    }

    #[test]
    fn test_validate_empty_cpp_command() {
        let config = Config {
            cpp_command: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_some());
        assert!(config.validate().unwrap().contains("cpp_command"));
    }
}
