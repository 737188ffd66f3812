//! Command-line interface for iso4-rs
//!
//! Usage:
//!   iso4 [OPTIONS] [TITLE]...
//!   echo "Journal of the American Chemical Society" | iso4

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use iso4_rs::{ltwa, Abbreviator};

/// Abbreviate journal titles according to ISO 4
#[derive(Debug, Parser)]
#[command(name = "iso4", version, about)]
struct Cli {
    /// Titles to abbreviate (read from stdin, one per line, when omitted)
    titles: Vec<String>,

    /// Directory holding ltwa_<date> files and the trie cache
    #[arg(short, long, env = "ISO4_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Use this LTWA file instead of the newest one in the data directory
    #[arg(short = 'f', long)]
    dict: Option<PathBuf>,

    /// Rebuild the tries instead of using the cached snapshot
    #[arg(long)]
    no_cache: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Download an LTWA file (or zip archive) into the data directory first
    #[cfg(feature = "download")]
    #[arg(long, value_name = "URL")]
    fetch: Option<String>,
}

#[derive(Serialize)]
struct Output {
    title: String,
    abbreviation: String,
}

/// Abbreviate `titles` into `out`.
///
/// Plain output is written line by line as titles come in; JSON output is
/// a single array written once the input ends.
fn write_abbreviations<I, W>(
    abbreviator: &Abbreviator,
    titles: I,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    if json {
        let results = titles
            .into_iter()
            .map(|title| {
                title.map(|title| Output {
                    abbreviation: abbreviator.abbreviate_title(&title),
                    title,
                })
            })
            .collect::<io::Result<Vec<_>>>()
            .context("reading titles")?;
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
        return Ok(());
    }

    for title in titles {
        let title = title.context("reading titles")?;
        let abbreviation = abbreviator.abbreviate_title(&title);
        if !abbreviation.is_empty() {
            writeln!(out, "{}", abbreviation)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    #[cfg(feature = "download")]
    if let Some(ref url) = cli.fetch {
        let file = ltwa::download(url, &cli.data_dir)
            .with_context(|| format!("downloading LTWA from {}", url))?;
        log::info!("LTWA {} ready at {}", file.version, file.path.display());
    }

    let dictionary = match cli.dict {
        Some(ref path) => ltwa::load_file(path)
            .with_context(|| format!("reading LTWA file {}", path.display()))?,
        None => ltwa::load_dir(&cli.data_dir, !cli.no_cache)
            .with_context(|| format!("loading LTWA from {}", cli.data_dir.display()))?,
    };
    let abbreviator = Abbreviator::new(dictionary);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.titles.is_empty() {
        write_abbreviations(&abbreviator, io::stdin().lock().lines(), cli.json, &mut out)?;
    } else {
        write_abbreviations(&abbreviator, cli.titles.into_iter().map(io::Result::Ok), cli.json, &mut out)?;
    }

    Ok(())
}
