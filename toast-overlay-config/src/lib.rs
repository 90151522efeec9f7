use std::path::{Path, PathBuf};

pub const ID: &str = "toast-overlay";

/// File name looked up inside the per-user configuration directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Pin the overlay to the top-right corner at full available height.
    /// When false the overlay sits bottom-right and grows upward with the card count.
    pub fixed_height_overlay: bool,
    /// Render a header line on each card showing the time left before expiry.
    pub show_header_chrome: bool,
    /// Give each card a close button that dismisses it.
    pub interactive_close: bool,
    /// Seconds a card stays on screen before it expires.
    pub default_lifetime_secs: u32,
    /// Width of the overlay and of every card, in screen units.
    pub card_width: u32,
    /// Vertical gap between stacked cards.
    pub card_gap: u32,
    /// Card height as a fraction of `card_width`.
    pub card_height_ratio: f32,
    /// Distance kept between the overlay and the right screen edge.
    pub screen_inset: u32,
    /// Vertical margin subtracted from the available screen height.
    pub screen_margin: u32,
    /// Cards held back from the computed capacity.
    pub capacity_headroom: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            fixed_height_overlay: true,
            show_header_chrome: false,
            interactive_close: true,
            default_lifetime_secs: 300,
            card_width: 300,
            card_gap: 10,
            card_height_ratio: 0.6,
            screen_inset: 3,
            screen_margin: 10,
            capacity_headroom: 0,
        }
    }
}

impl ToastConfig {
    /// Height of a single card derived from its width.
    pub fn card_height(&self) -> u32 {
        (self.card_width as f32 * self.card_height_ratio.max(0.0)).floor() as u32
    }

    /// Lifetime handed to new cards; never zero.
    pub fn lifetime_secs(&self) -> u32 {
        self.default_lifetime_secs.max(1)
    }

    /// Location of the per-user config file, if a home directory is known.
    pub fn path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.config_dir().join(ID).join(CONFIG_FILE))
    }

    /// Load the per-user config. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default(Self::path())
    }

    /// Like [`Self::load`], falling back to the defaults on any error.
    pub fn load_or_warn() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!("{}, using default config", err);
            Self::default()
        })
    }

    fn load_or_default(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                tracing::debug!("No home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ToastConfig::default();

        assert!(config.fixed_height_overlay);
        assert!(!config.show_header_chrome);
        assert!(config.interactive_close);
        assert_eq!(config.default_lifetime_secs, 300);
        assert_eq!(config.card_width, 300);
        assert_eq!(config.card_gap, 10);
        assert_eq!(config.card_height(), 180);
        assert_eq!(config.screen_inset, 3);
        assert_eq!(config.screen_margin, 10);
        assert_eq!(config.capacity_headroom, 0);
    }

    #[test]
    fn test_config_serialization() {
        let config = ToastConfig::default();
        let json = serde_json::to_string(&config).unwrap();

        assert!(json.contains("fixed_height_overlay"));
        assert!(json.contains("show_header_chrome"));
        assert!(json.contains("interactive_close"));
        assert!(json.contains("default_lifetime_secs"));
    }

    #[test]
    fn test_config_deserialization_with_defaults() {
        // Partial file: everything missing falls back to defaults
        let partial = r#"{ "default_lifetime_secs": 3 }"#;

        let config: ToastConfig = serde_json::from_str(partial).unwrap();

        assert_eq!(config.default_lifetime_secs, 3);
        assert!(config.fixed_height_overlay);
        assert_eq!(config.card_width, 300);
    }

    #[test]
    fn test_config_deserialization_full() {
        let full = r#"
            fixed_height_overlay = false
            show_header_chrome = true
            interactive_close = false
            default_lifetime_secs = 3
            card_width = 200
            card_gap = 5
            card_height_ratio = 0.5
            screen_inset = 0
            screen_margin = 20
            capacity_headroom = 1
        "#;

        let config: ToastConfig = toml::from_str(full).unwrap();

        assert!(!config.fixed_height_overlay);
        assert!(config.show_header_chrome);
        assert!(!config.interactive_close);
        assert_eq!(config.default_lifetime_secs, 3);
        assert_eq!(config.card_height(), 100);
        assert_eq!(config.card_gap, 5);
        assert_eq!(config.screen_margin, 20);
        assert_eq!(config.capacity_headroom, 1);
    }

    #[test]
    fn test_zero_lifetime_is_clamped() {
        let config = ToastConfig {
            default_lifetime_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.lifetime_secs(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("{}-config-test-{}", ID, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);

        let written = ToastConfig {
            show_header_chrome: true,
            default_lifetime_secs: 42,
            ..Default::default()
        };
        std::fs::write(&path, toml::to_string(&written).unwrap()).unwrap();

        let loaded = ToastConfig::load_from(&path).unwrap();
        assert_eq!(loaded, written);

        std::fs::write(&path, "card_width = \"wide\"").unwrap();
        assert!(matches!(
            ToastConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("toast-overlay-does-not-exist.toml");
        assert!(matches!(
            ToastConfig::load_from(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_config_yields_defaults() {
        let path = std::env::temp_dir().join("toast-overlay-absent").join(CONFIG_FILE);
        assert_eq!(
            ToastConfig::load_or_default(Some(path)).unwrap(),
            ToastConfig::default()
        );
        assert_eq!(
            ToastConfig::load_or_default(None).unwrap(),
            ToastConfig::default()
        );
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("{}-malformed-{}", ID, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "fixed_height_overlay = [").unwrap();

        assert!(matches!(
            ToastConfig::load_or_default(Some(path)),
            Err(ConfigError::Parse { .. })
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
