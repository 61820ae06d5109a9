use crate::code_block::DEFAULT_THEME;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub code: CodeConfig,
    pub keybindings: KeybindingConfig,
}

/// Which sidebar presentation the shell shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Pick by terminal width against `mobile_breakpoint`
    #[default]
    Auto,
    Desktop,
    Mobile,
}

impl LayoutMode {
    pub fn from_string(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(LayoutMode::Auto),
            "desktop" => Ok(LayoutMode::Desktop),
            "mobile" => Ok(LayoutMode::Mobile),
            _ => Err(format!("Unknown layout mode: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Auto => "auto",
            LayoutMode::Desktop => "desktop",
            LayoutMode::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sidebar_width: u16,
    /// Terminals narrower than this many columns get the mobile layout
    pub mobile_breakpoint: u16,
    pub mode: LayoutMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    pub show_line_numbers: bool,
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: char,
    pub toggle_menu: char,
    pub back: char,
    pub home: char,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_width: 32,
            mobile_breakpoint: 100,
            mode: LayoutMode::Auto,
        }
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: 'q',
            toggle_menu: 'm',
            back: 'b',
            home: 'h',
        }
    }
}

impl Config {
    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        log::info!("Config::load_from_file: loaded {}", path.display());
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsError;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.layout.sidebar_width, 32);
        assert_eq!(config.layout.mobile_breakpoint, 100);
        assert_eq!(config.layout.mode, LayoutMode::Auto);
        assert!(config.code.show_line_numbers);
        assert_eq!(config.code.theme, "base16-ocean.dark");
        assert_eq!(config.keybindings.toggle_menu, 'm');
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"layout": {"mode": "mobile"}, "code": {"show_line_numbers": false}}"#)
            .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.layout.mode, LayoutMode::Mobile);
        assert_eq!(config.layout.sidebar_width, 32);
        assert!(!config.code.show_line_numbers);
        assert_eq!(config.keybindings.quit, 'q');
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.json");
        let mut config = Config::default();
        config.layout.sidebar_width = 40;
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_matches!(Config::load(Some(path.as_path())), Err(DocsError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        assert_matches!(Config::load(Some(path.as_path())), Err(DocsError::Io(_)));
    }

    #[test]
    fn test_layout_mode_parsing() {
        assert_eq!(LayoutMode::from_string("Desktop"), Ok(LayoutMode::Desktop));
        assert_eq!(LayoutMode::from_string("auto"), Ok(LayoutMode::Auto));
        assert!(LayoutMode::from_string("tablet").is_err());
    }
}
