use anyhow::{anyhow, Context as AnyhowContext, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use reflow_chunks::{ChunkList, Language};
use reflow_cleanup::run_cleanup;

mod models;
mod report;

use models::{DumpConfig, DumpOutput, TokenRecord};

#[derive(Parser)]
#[command(name = "reflow-dump")]
#[command(about = "Build a chunk stream from token records, clean it up and dump it", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON array of token records (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Language of the tokens; repeat for a mixed set (overrides the config file)
    #[arg(short, long = "lang")]
    lang: Vec<Language>,

    /// TOML file with `[chunks]` and `[cleanup]` tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dump the stream exactly as loaded
    #[arg(long)]
    no_cleanup: bool,

    /// Print JSON instead of one line per chunk
    #[arg(long)]
    json: bool,

    /// Record which pass changed what and print it after the dump
    #[arg(long)]
    trace: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DumpConfig::default(),
    };
    if !cli.lang.is_empty() {
        config.chunks.languages = cli.lang.iter().copied().collect();
    }
    if cli.trace {
        config.chunks.record_provenance = true;
    }
    config
        .chunks
        .validate()
        .map_err(|e| anyhow!("Invalid [chunks] config: {e}"))?;

    let source = read_input(cli.input.as_deref())?;
    let records: Vec<TokenRecord> =
        serde_json::from_str(&source).context("Input is not a JSON array of token records")?;

    let mut list = ChunkList::with_config(config.chunks.clone())?;
    list.extend(records.into_iter().map(TokenRecord::into_chunk));
    let languages: Vec<&str> = list.languages().iter().map(Language::as_str).collect();
    log::info!("Loaded {} chunk(s) as {}", list.len(), languages.join("+"));

    let report = if cli.no_cleanup {
        None
    } else {
        let report = run_cleanup(&mut list, &config.cleanup).context("Cleanup failed")?;
        log::info!("Cleanup made {} change(s)", report.total());
        Some(report)
    };

    if cli.json {
        let output = DumpOutput::new(&list, report.as_ref());
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::render_text(&list, report.as_ref()));
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<DumpConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
