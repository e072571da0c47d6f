//! Renders a command's result as JSON (the default, stable machine format)
//! or pretty-printed JSON, per `--format`.

use crate::cli::{GlobalFlags, OutputFormat};

pub fn print(flags: &GlobalFlags, value: &impl serde::Serialize) {
    if flags.quiet {
        return;
    }
    let rendered = match flags.format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
    .unwrap_or_else(|e| format!("{{\"error\":\"failed to serialize output: {e}\"}}"));
    println!("{rendered}");
}
