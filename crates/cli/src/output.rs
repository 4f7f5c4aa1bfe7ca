//! Result rendering for stdout

use clap::ValueEnum;
use serde::Serialize;
use textbridge_core::application::constants::ERROR_PREFIX;
use textbridge_core::Utf16Text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Lossy host string
    #[default]
    Text,
    /// Hex code units, space separated
    Units,
    /// JSON object with units, text and error flag
    Json,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    units: &'a Utf16Text,
    text: String,
    is_error: bool,
}

/// Whether a bridged result carries the error prefix
pub fn is_error(text: &Utf16Text) -> bool {
    text.starts_with_str(ERROR_PREFIX)
}

pub fn render(text: &Utf16Text, mode: OutputMode) -> serde_json::Result<String> {
    match mode {
        OutputMode::Text => Ok(text.to_string_lossy()),
        OutputMode::Units => Ok(text
            .as_units()
            .iter()
            .map(|u| format!("{:04X}", u))
            .collect::<Vec<_>>()
            .join(" ")),
        OutputMode::Json => serde_json::to_string(&JsonResult {
            units: text,
            text: text.to_string_lossy(),
            is_error: is_error(text),
        }),
    }
}
