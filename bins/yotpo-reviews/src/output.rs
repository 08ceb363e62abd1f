//! Terminal output

use anyhow::Result;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::Value;
use yotpo_api_client::ApiRequest;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured summary followed by pretty JSON
    Text,
    /// Pretty JSON only
    Json,
}

/// Print a request that was not sent
pub fn print_request(request: &ApiRequest, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(request)?),
        OutputFormat::Text => {
            println!("{} {}", "⚑ dry run".yellow(), request.to_string().bold());
            if let Some(params) = &request.params {
                println!("{}", serde_json::to_string_pretty(params)?);
            }
        }
    }
    Ok(())
}

/// Print the response to a sent request
pub fn print_response(request: &ApiRequest, response: &Value, format: OutputFormat) -> Result<()> {
    let pretty = serde_json::to_string_pretty(response)?;
    match format {
        OutputFormat::Json => println!("{pretty}"),
        OutputFormat::Text => {
            println!("{} {}", "✓".green(), request.to_string().bold());
            println!("{pretty}");
        }
    }
    Ok(())
}
