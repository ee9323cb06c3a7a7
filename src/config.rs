//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    error::ConfigError,
    timer::{SignalType, TimerConfig},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "speech-timer")]
#[command(about = "A speech practice timer server with green/yellow/red signal cards")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// JSON timer configuration (thresholds and cards)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Green signal threshold in seconds
    #[arg(long)]
    pub green: Option<u32>,

    /// Yellow signal threshold in seconds
    #[arg(long)]
    pub yellow: Option<u32>,

    /// Red signal threshold in seconds
    #[arg(long)]
    pub red: Option<u32>,

    /// Hard stop in seconds
    #[arg(long)]
    pub total: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timer configuration from the config file (or defaults) with threshold overrides applied
    pub fn timer_config(&self) -> Result<TimerConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => TimerConfig::from_json_file(path)?,
            None => TimerConfig::default(),
        };

        if self.green.is_none() && self.yellow.is_none() && self.red.is_none() && self.total.is_none() {
            return Ok(base);
        }

        let green = self.green.unwrap_or(base.green_time);
        let yellow = self.yellow.unwrap_or(base.yellow_time);
        let red = self.red.unwrap_or(base.red_time);
        let total = self.total.unwrap_or(base.total_time);

        let mut config = base;
        config.green_time = green;
        config.yellow_time = yellow;
        config.red_time = red;
        config.total_time = total;
        for card in &mut config.cards {
            card.time = match card.signal_type {
                SignalType::Green => green,
                SignalType::Yellow => yellow,
                SignalType::Red => red,
            };
        }
        config.validate()?;
        Ok(config)
    }
}
