use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: ColumnConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Width in pixels given to a column the first time it is shown
    pub default_width: u32,

    /// Widths below this are clamped
    pub min_width: u32,

    /// Separator used by the persisted column order string
    pub order_delimiter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Prefix that switches the column filter to regex mode
    pub regex_prefix: String,

    /// Separator for OR-ed substring terms
    pub term_separator: String,

    /// What a malformed regex does to column visibility
    pub invalid_pattern: InvalidPatternPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPatternPolicy {
    /// Leave the filter-driven visibility from the last valid expression
    #[default]
    KeepPrevious,
    /// Treat the expression as empty and show every column
    ShowAll,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            default_width: 75,
            min_width: 15,
            order_delimiter: "\t".to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            regex_prefix: "regex:".to_string(),
            term_separator: ",".to_string(),
            invalid_pattern: InvalidPatternPolicy::KeepPrevious,
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if config.columns.default_width < config.columns.min_width {
            config.columns.default_width = config.columns.min_width;
        }
        if config.columns.order_delimiter.is_empty() {
            config.columns.order_delimiter = ColumnConfig::default().order_delimiter;
        }
        if config.filter.regex_prefix.is_empty() {
            config.filter.regex_prefix = FilterConfig::default().regex_prefix;
        }

        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("column-view").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Column view configuration
# Location: ~/.config/column-view/config.toml (Linux)
#           %APPDATA%\column-view\config.toml (Windows)

[columns]
# Width in pixels for a column shown for the first time
default_width = 75

# Minimum column width in pixels
min_width = 15

# Separator for the saved column order (tab by default)
order_delimiter = "\t"

[filter]
# Prefix that turns the column filter into a whole-title regex
regex_prefix = "regex:"

# Separator for "any of" substring terms, e.g. "MW,Struct"
term_separator = ","

# Malformed regex handling: "keep_previous" or "show_all"
invalid_pattern = "keep_previous"
"#
        .to_string()
    }
}
