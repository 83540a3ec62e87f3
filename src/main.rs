//! edinet-figures CLI - Financial figure extraction from EDINET XBRL filings

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use edinet_figures::config::DEFAULT_LIMIT;
use edinet_figures::{
    BlockSource, Config, CsvSink, FilingProcessor, JsonSink, LogReporter, ManifestSource,
    ReportSink, XbrlFile,
};

/// Financial figure extraction from EDINET XBRL filings
#[derive(ClapParser)]
#[command(name = "edinet-figures")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract labelled figures from one text block
    Extract {
        /// Input XBRL file
        input: PathBuf,

        /// Text block element name, e.g. BalanceSheetTextBlock
        #[arg(short, long)]
        block: String,

        /// Label to search for (repeatable, order sets priority)
        #[arg(short, long = "label", required = true)]
        labels: Vec<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Extract every filing listed in a manifest and write a report
    Process {
        /// JSON manifest of filings
        manifest: PathBuf,

        /// Report file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Maximum number of filings to process
        #[arg(short, long, env = "DEFAULT_COMPANY_COUNT", default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Base directory for relative document paths
        #[arg(long, env = "XBRL_FOLDER")]
        xbrl_dir: Option<PathBuf>,

        /// Skip filings that carry a fund code
        #[arg(long)]
        skip_funds: bool,

        /// Do not skip asset management filers
        #[arg(long)]
        keep_all_filers: bool,

        /// Also save the run summary as JSON
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// List the known text blocks present in an XBRL file
    Blocks {
        /// Input XBRL file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let reporter = LogReporter::new();

    match cli.command {
        Commands::Extract {
            input,
            block,
            labels,
            json,
        } => {
            let file = XbrlFile::open(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            let result = file.extract(&block, &labels, &reporter);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} {} [{}]", "✓".green().bold(), input.display(), block);
                for (label, value) in result.iter() {
                    match value {
                        Some(v) => println!("  {}: {}", label, v),
                        None => println!("  {}: {}", label, "null".dimmed()),
                    }
                }
            }
        }

        Commands::Process {
            manifest,
            output,
            format,
            limit,
            xbrl_dir,
            skip_funds,
            keep_all_filers,
            summary: summary_path,
        } => {
            let mut config = Config::new()
                .with_limit(limit)
                .with_xbrl_dir(xbrl_dir)
                .with_skip_fund_filings(skip_funds);
            if keep_all_filers {
                config = config.with_skip_words(Vec::new());
            }

            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?,
                )),
                None => Box::new(io::stdout().lock()),
            };
            let mut sink: Box<dyn ReportSink> = match format {
                Format::Csv => Box::new(CsvSink::new(writer)),
                Format::Json => Box::new(JsonSink::new(writer)),
            };

            let start = Instant::now();
            let source = ManifestSource::from_config(&manifest, &config);
            let processor = FilingProcessor::new(&config, &reporter);
            let summary = processor
                .run(&source, sink.as_mut())
                .with_context(|| format!("Failed to process {}", manifest.display()))?;

            eprintln!("{} {}", "✓".green().bold(), summary);
            eprintln!("  Time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
            if let Some(path) = output {
                eprintln!("  Report: {}", path.display());
            }
            if let Some(path) = summary_path {
                summary
                    .save(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("  Summary: {}", path.display());
            }
        }

        Commands::Blocks { input } => {
            let file = XbrlFile::open(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let present = file
                .present_blocks()
                .with_context(|| format!("Failed to parse {}", input.display()))?;

            println!("{}", input.display());
            for block in edinet_figures::TextBlock::ALL {
                if present.contains(&block) {
                    println!("  {} {}", "✓".green().bold(), block);
                } else {
                    println!("  {} {}", "✗".red(), block);
                }
            }
        }
    }

    Ok(())
}
