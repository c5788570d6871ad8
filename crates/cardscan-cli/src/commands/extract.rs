//! Extract command - classify OCR text that was produced elsewhere.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use cardscan_core::storage::{FileRecordWriter, OutputTarget, RecordWriter};
use cardscan_core::CardParser;

use super::{format_fields, load_config, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with OCR output ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    info!("Extracting contact fields from {} bytes", text.len());

    let result = CardParser::from_config(&config.extraction).parse(&text);
    let output = format_fields(&result.fields, args.format)?;

    if let Some(path) = &args.output {
        let written = FileRecordWriter.write_record(&OutputTarget::from_path(path), &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            written.display()
        );
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
