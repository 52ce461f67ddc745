use serde::Deserialize;
use std::fs;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Cells per side
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Window is square, this many pixels per side
    #[serde(default = "default_window_width")]
    pub window_width: usize,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct AnimationConfig {
    /// Search steps (expansions or path marks) advanced per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: usize,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_show_grid_lines")]
    pub show_grid_lines: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_rows() -> usize { 50 }
fn default_window_width() -> usize { 650 }
fn default_steps_per_frame() -> usize { 1 }
fn default_window_title() -> String { "Path Finding Visualizer".to_string() }
fn default_show_grid_lines() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            window_width: default_window_width(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            show_grid_lines: default_show_grid_lines(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: false,
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            animation: AnimationConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", CONFIG_PATH);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", CONFIG_PATH, e);
                    log::warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                log::info!("No {} found, using default configuration", CONFIG_PATH);
                Config::default()
            }
        }
    }

    /// Parse a TOML document; zero rows or zero steps fall back to defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(contents)?;
        if config.grid.rows == 0 {
            log::warn!("grid.rows must be positive, using {}", default_rows());
            config.grid.rows = default_rows();
        }
        if config.animation.steps_per_frame == 0 {
            config.animation.steps_per_frame = default_steps_per_frame();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            rows = 20

            [animation]
            steps_per_frame = 5

            [logging]
            enable_action_log = true
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.rows, 20);
        assert_eq!(config.grid.window_width, 650);
        assert_eq!(config.animation.steps_per_frame, 5);
        assert!(config.logging.enable_action_log);
        assert_eq!(config.logging.action_log_path, "action_log.json");
        assert_eq!(config.visual, VisualConfig::default());
    }

    #[test]
    fn test_zero_values_fall_back() {
        let config = Config::from_toml_str("[grid]\nrows = 0\n[animation]\nsteps_per_frame = 0\n").unwrap();
        assert_eq!(config.grid.rows, 50);
        assert_eq!(config.animation.steps_per_frame, 1);
    }

    #[test]
    fn test_bad_type_is_error() {
        assert!(Config::from_toml_str("[grid]\nrows = \"many\"\n").is_err());
    }
}
