use color_eyre::eyre::{Result, WrapErr};
use mizuki_traits::ForwardRefToTracing;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    /// The id of the guild the bot is in. Slash commands are registered here.
    pub guild_id: u64,
    /// The help text for the bot. `/help`
    pub help_text: Option<Arc<String>>,
    /// The reaction added to monitored images, and the one users add to ask for metadata.
    #[serde(default = "default_inspect_emoji")]
    pub inspect_emoji: String,
    #[serde(default)]
    pub embed_colors: EmbedColors,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct EmbedColors {
    /// Metadata was found.
    pub success: u32,
    /// Listings and other neutral replies.
    pub info: u32,
    /// Nothing usable was found.
    pub error: u32,
}

impl Default for EmbedColors {
    fn default() -> Self {
        EmbedColors {
            success: 0xDDAACC,
            info: 0x0099FF,
            error: 0xFF0000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            guild_id: 0,
            help_text: None,
            inspect_emoji: default_inspect_emoji(),
            embed_colors: EmbedColors::default(),
        }
    }
}

fn default_inspect_emoji() -> String {
    "🔍".to_owned()
}

impl Config {
    /// Fetches the config from the config file in the root directory.
    pub fn create_from_file(config_path: impl AsRef<Path>) -> Result<Config> {
        let file = std::fs::read_to_string(config_path).wrap_err("Could not read config file")?;

        toml::from_str(&file).wrap_err("Could not parse config file")
    }

    /// Reloads the config file. A file that no longer parses leaves the current config in place.
    pub fn reload(&mut self, config_path: impl AsRef<Path>) {
        if let Some(config) = Config::create_from_file(config_path).trace_err_ok() {
            *self = config;
        }
    }
}
