use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::pipeline::analyze::AnalysisOptions;

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment is valid. The .env
/// file is loaded automatically at startup via dotenvy, and command-line
/// flags override whatever is loaded here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory that receives the xlsx/csv/report files (PPTXSIM_OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// Write similarity_report.txt (PPTXSIM_EMIT_REPORT, default on)
    pub emit_report: bool,
    /// Remove English stop words before vectorizing (PPTXSIM_STOP_WORDS, default off)
    pub stop_words: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            emit_report: true,
            stop_words: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `load` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            output_dir: lookup("PPTXSIM_OUTPUT_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            emit_report: parse_flag("PPTXSIM_EMIT_REPORT", lookup("PPTXSIM_EMIT_REPORT"))?
                .unwrap_or(defaults.emit_report),
            stop_words: parse_flag("PPTXSIM_STOP_WORDS", lookup("PPTXSIM_STOP_WORDS"))?
                .unwrap_or(defaults.stop_words),
        })
    }

    /// Options for a pipeline run.
    pub fn analysis_options(&self, quiet: bool) -> AnalysisOptions {
        AnalysisOptions {
            output_dir: self.output_dir.clone(),
            emit_report: self.emit_report,
            stop_words: self.stop_words,
            quiet,
        }
    }
}

/// Parse a boolean env value. Unset or blank means "use the default".
fn parse_flag(key: &str, value: Option<String>) -> Result<Option<bool>> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        other => anyhow::bail!(
            "{key}={other} is not a boolean.\n\
             Use one of: 1/0, true/false, yes/no, on/off."
        ),
    }
}
