//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use neonfolio_config::Config;
use neonfolio_core::{ColorTheme, FrameRate};

#[derive(Parser, Debug)]
#[command(name = "neonfolio", version, about)]
pub struct Cli {
    /// Config file. Defaults to `config.toml` in the platform config
    /// directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for every random effect, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render rate: slow, medium or fast.
    #[arg(long)]
    pub frame_rate: Option<FrameRate>,

    /// Accent color: cyan, green, violet, blue, amber or pink.
    #[arg(long)]
    pub theme: Option<ColorTheme>,

    /// Write logs to this file (filter with NEONFOLIO_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Let command-line flags override the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }
        if let Some(theme) = self.theme {
            config.color_theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "neonfolio",
            "--seed",
            "7",
            "--frame-rate",
            "fast",
            "--theme",
            "pink",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.frame_rate, FrameRate::Fast);
        assert_eq!(config.color_theme, ColorTheme::Pink);
    }

    #[test]
    fn rejects_unknown_frame_rate() {
        assert!(Cli::try_parse_from(["neonfolio", "--frame-rate", "warp"]).is_err());
    }
}
