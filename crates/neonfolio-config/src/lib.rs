//! Configuration for the neonfolio terminal portfolio.
//!
//! Settings come from a TOML file: an explicit path, or `config.toml` in the
//! platform config directory, or built-in defaults when neither exists.

mod error;
mod profile;

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use neonfolio_core::{
    BinaryCounterParams, ColorTheme, FrameRate, RainParams, ScrambleParams, TypewriterParams,
};
use serde::Deserialize;
use tracing::{debug, info};

pub use error::ConfigError;
pub use profile::{Contact, Profile, Skill, Stat, TimelineEntry};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Largest allowed `start_window + reveal_window`, which bounds every
/// scramble run to that many frames.
pub const MAX_SCRAMBLE_FRAMES: u32 = 600;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for every random choice; the clock is used when unset.
    pub seed: Option<u64>,
    /// Render rate.
    pub frame_rate: FrameRate,
    /// Accent color.
    pub color_theme: ColorTheme,
    /// Whether scanlines start enabled.
    pub scanlines: bool,
    pub rain: RainParams,
    pub scramble: ScrambleParams,
    pub typewriter: TypewriterParams,
    pub binary_counter: BinaryCounterParams,
    pub profile: Profile,
}

impl Config {
    /// Default config file location for this platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "neonfolio", "neonfolio")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load and validate a specific file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|source| ConfigError::Parse { path: None, source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tuning parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probability = |name: &'static str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field: name,
                    reason: format!("{value} is not a probability"),
                })
            }
        };
        probability("rain.restart_probability", self.rain.restart_probability)?;
        probability("scramble.reseed_probability", self.scramble.reseed_probability)?;

        if self.rain.glyph_size == 0 {
            return Err(ConfigError::invalid("rain.glyph_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.rain.fade_alpha) {
            return Err(ConfigError::invalid("rain.fade_alpha", "must be within 0..=1"));
        }
        if !(self.rain.brightness_ramp.is_finite() && self.rain.brightness_ramp > 0.0) {
            return Err(ConfigError::invalid(
                "rain.brightness_ramp",
                "must be a positive finite number",
            ));
        }
        if self.scramble.start_window == 0 {
            return Err(ConfigError::invalid("scramble.start_window", "must be at least 1"));
        }
        if self.scramble.reveal_window == 0 {
            return Err(ConfigError::invalid("scramble.reveal_window", "must be at least 1"));
        }
        if self.scramble.max_reveal_frame() >= MAX_SCRAMBLE_FRAMES {
            return Err(ConfigError::Invalid {
                field: "scramble.start_window",
                reason: format!(
                    "start_window + reveal_window must be at most {MAX_SCRAMBLE_FRAMES}"
                ),
            });
        }
        for skill in &self.profile.skills {
            if skill.progress > 100 {
                return Err(ConfigError::Invalid {
                    field: "profile.skills.progress",
                    reason: format!("{} has progress {} over 100", skill.name, skill.progress),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rain.restart_probability, 0.025);
        assert_eq!(config.scramble.reseed_probability, 0.28);
        assert!(!config.profile.name.is_empty());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            seed = 42
            frame_rate = "fast"
            color_theme = "violet"

            [rain]
            restart_probability = 0.1

            [scramble]
            repeat_delay_ms = 500

            [profile]
            name = "Sam Example"
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.frame_rate, FrameRate::Fast);
        assert_eq!(config.color_theme, ColorTheme::Violet);
        assert_eq!(config.rain.restart_probability, 0.1);
        assert_eq!(config.rain.fade_alpha, 0.05);
        assert_eq!(config.scramble.repeat_delay_ms, 500);
        assert_eq!(config.scramble.start_window, 40);
        assert_eq!(config.profile.name, "Sam Example");
        assert_eq!(config.profile.headline, Profile::default().headline);
    }

    #[test]
    fn rejects_bad_probabilities() {
        let err = Config::from_toml("[rain]\nrestart_probability = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "rain.restart_probability", .. }
        ));
    }

    #[test]
    fn rejects_zero_glyph_size() {
        let err = Config::from_toml("[rain]\nglyph_size = 0\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid rain.glyph_size: must be at least 1");
    }

    #[test]
    fn rejects_windows_that_never_settle() {
        let err = Config::from_toml(
            "[scramble]\nstart_window = 4294967295\nreveal_window = 4294967295\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "scramble.start_window", .. }
        ));

        let config = Config::from_toml("[scramble]\nstart_window = 300\nreveal_window = 300\n");
        assert!(config.is_ok());
        let err = Config::from_toml("[scramble]\nstart_window = 300\nreveal_window = 301\n");
        assert!(err.is_err());
    }

    #[test]
    fn rejects_non_finite_brightness_ramp() {
        for value in ["nan", "inf", "-1.0"] {
            let err = Config::from_toml(&format!("[rain]\nbrightness_ramp = {value}\n"))
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid { field: "rain.brightness_ramp", .. }
            ));
        }
        let err = Config::from_toml("[rain]\nfade_alpha = nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rain.fade_alpha", .. }));
    }

    #[test]
    fn rejects_unknown_theme() {
        let err = Config::from_toml("color_theme = \"plaid\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/neonfolio.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn reads_a_file_from_disk() {
        let path = std::env::temp_dir().join(format!("neonfolio-{}.toml", std::process::id()));
        fs::write(&path, "scanlines = true\n[typewriter]\nchar_delay_ms = 50\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(config.scanlines);
        assert_eq!(config.typewriter.char_delay_ms, 50);
    }
}
