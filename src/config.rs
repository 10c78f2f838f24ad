use anyhow::Result;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::models::{RawSettings, Settings, DEFAULT_REROLL_SEED, DEFAULT_WORDS_TARGET};
use crate::render::{RenderStyle, DEFAULT_HIDE_CHAR};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RenderConfig {
    /// 0 means "use the terminal width when there is one"
    #[serde(default)]
    pub width: usize,
    #[serde(alias = "hideChar")]
    pub hide_char: Option<String>,
}

impl RenderConfig {
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            hide_char: self
                .hide_char
                .as_deref()
                .and_then(|s| s.chars().next())
                .unwrap_or(DEFAULT_HIDE_CHAR),
            width: (self.width > 0).then_some(self.width),
            ansi: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub poem: RawSettings,
    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut builder = with_defaults()?;

        if let Some(proj_dirs) = ProjectDirs::from("", "", "blackout") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                builder = builder.add_source(File::from(config_path));
            }
        }

        builder = builder.add_source(environment());

        let cfg = builder.build()?;
        let app_config: AppConfig = cfg.try_deserialize()?;

        Ok(app_config)
    }

    /// Normalized settings; out-of-range values have already fallen back to defaults.
    pub fn settings(&self) -> Settings {
        Settings::from(self.poem.clone())
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
    let defaults = Settings::default();

    Ok(Config::builder()
        .set_default("poem.enabled", defaults.enabled)?
        .set_default("poem.words_target", DEFAULT_WORDS_TARGET as i64)?
        .set_default("poem.mode", defaults.mode.as_str())?
        .set_default("poem.reroll_seed", DEFAULT_REROLL_SEED as i64)?
        .set_default("render.width", 0_i64)?
        .set_default("render.hide_char", DEFAULT_HIDE_CHAR.to_string())?)
}

// BLACKOUT_POEM__WORDS_TARGET=12 and friends
fn environment() -> Environment {
    Environment::with_prefix("BLACKOUT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
