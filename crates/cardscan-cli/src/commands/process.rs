//! Process command - read a single business card image.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardscan_core::storage::{FileRecordWriter, OutputTarget, RecordWriter, UploadStore};
use cardscan_core::{CardParser, CardReader};

use super::{build_engine, format_fields, load_config, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Card image (PNG, JPEG, TIFF, BMP)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, conflicts_with = "save")]
    output: Option<PathBuf>,

    /// Write to the configured output location instead of stdout
    #[arg(long)]
    save: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "vcard")]
    format: OutputFormat,

    /// Keep a timestamped copy of the image in the upload directory
    #[arg(long)]
    keep_upload: bool,

    /// Print extraction warnings and the raw OCR text
    #[arg(long)]
    show_text: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !matches!(
        extension.as_str(),
        "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "webp"
    ) {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Processing file: {}", args.input.display());

    if args.keep_upload || config.output.keep_uploads {
        let store = UploadStore::new(&config.output.upload_dir);
        let stored = store.save_file(&args.input, chrono::Local::now().naive_local())?;
        debug!("Kept upload at {}", stored.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message("Running OCR...");

    let reader = CardReader::new(build_engine(&config)?)
        .with_parser(CardParser::from_config(&config.extraction));
    let scan = match reader.scan_path(&args.input) {
        Ok(scan) => scan,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.finish_and_clear();

    if args.show_text {
        eprintln!("{}", style("OCR text:").bold());
        eprintln!("{}", scan.ocr.text.trim_end());
        for warning in &scan.extraction.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let target = match (&args.output, args.save) {
        (Some(path), _) => Some(OutputTarget::from_path(path)),
        (None, true) => Some(OutputTarget::new(
            &config.output.directory,
            config.output.file_name.clone(),
        )),
        (None, false) => None,
    };

    if let Some(target) = target {
        let path = match args.format {
            OutputFormat::Vcard => scan.save_vcard(&FileRecordWriter, &target)?,
            format => {
                let content = format_fields(scan.fields(), format)?;
                FileRecordWriter.write_record(&target, &content)?
            }
        };
        println!(
            "{} Output written to {}",
            style("✓").green(),
            path.display()
        );
    } else {
        let output = format_fields(scan.fields(), args.format)?;
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    debug!(
        "Total processing time: {:?} (OCR {}ms)",
        start.elapsed(),
        scan.ocr.processing_time_ms
    );

    Ok(())
}
