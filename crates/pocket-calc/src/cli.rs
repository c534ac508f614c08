//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::CalculatorConfig;
use crate::error::AppResult;

/// Four-function decimal calculator.
///
/// Without `--press`, opens a terminal window with a clickable keypad.
#[derive(Debug, Parser)]
#[command(name = "pocket-calc", version, about, long_about = None)]
pub struct Cli {
    /// Press keypad buttons by label (e.g. "7+3="), print the display and exit
    #[arg(short, long, value_name = "LABELS")]
    pub press: Option<String>,

    /// Fractional digits kept by division
    #[arg(long, value_name = "N", env = "POCKET_CALC_DIVISION_SCALE")]
    pub division_scale: Option<u32>,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. "debug", "pocket_calc=trace")
    #[arg(long, value_name = "LEVEL", env = "POCKET_CALC_LOG", default_value = "warn")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Builds the calculator configuration: file first, then flags
    pub fn calculator_config(&self) -> AppResult<CalculatorConfig> {
        let mut config = match &self.config {
            Some(path) => CalculatorConfig::from_json_file(path)?,
            None => CalculatorConfig::default(),
        };
        if let Some(scale) = self.division_scale {
            config = config.with_division_scale(scale);
        }
        config.validate()
    }
}
