use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use static_search_core::{analyze, Document, Index};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory full-text index over text and HTML files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the input and report document and term counts
    Stats {
        #[command(flatten)]
        source: Source,
    },
    /// Index the input, then print the documents matching each word as JSON lines
    Lookup {
        #[command(flatten)]
        source: Source,
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Args)]
struct Source {
    /// Input path (file or directory)
    #[arg(long)]
    input: PathBuf,
    /// Base URL that relative file paths are joined onto
    #[arg(long)]
    base_url: Option<Url>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Html,
    Text,
}

#[derive(Serialize)]
struct Stats {
    num_docs: usize,
    num_terms: usize,
}

#[derive(Serialize)]
struct LookupHit<'a> {
    word: &'a str,
    stems: Vec<String>,
    docs: Vec<&'a Document>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { source } => {
            let index = build_index(&source)?;
            let stdout = io::stdout();
            stats(&index, &mut stdout.lock())
        }
        Commands::Lookup { source, words } => {
            let index = build_index(&source)?;
            let stdout = io::stdout();
            lookup(&index, &words, &mut stdout.lock())
        }
    }
}

fn build_index(source: &Source) -> Result<Index> {
    let mut index = Index::new();
    for (path, kind) in collect_files(&source.input)? {
        let rel = match path.strip_prefix(&source.input) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => Path::new(path.file_name().unwrap_or_default()),
        };
        let url = doc_url(source.base_url.as_ref(), rel);
        let f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
        let reader = BufReader::new(f);
        let added = match kind {
            Kind::Html => index.add_html(&url, reader),
            Kind::Text => {
                let title = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
                index.add_text(&url, title, &modified_date(&path), reader)
            }
        };
        added.with_context(|| format!("indexing {}", path.display()))?;
    }
    tracing::info!(input = %source.input.display(), num_docs = index.len(), "ingested documents");
    Ok(index)
}

fn stats<W: Write>(index: &Index, out: &mut W) -> Result<()> {
    let stats = Stats { num_docs: index.len(), num_terms: index.num_terms() };
    tracing::info!(num_docs = stats.num_docs, num_terms = stats.num_terms, "index built");
    serde_json::to_writer(&mut *out, &stats)?;
    out.write_all(b"\n")?;
    Ok(())
}

fn lookup<W: Write>(index: &Index, words: &[String], out: &mut W) -> Result<()> {
    for word in words {
        let hit = LookupHit { word: word.as_str(), stems: analyze(word).collect(), docs: index.lookup(word) };
        serde_json::to_writer(&mut *out, &hit)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn kind_of(path: &Path) -> Option<Kind> {
    match path.extension().and_then(|s| s.to_str())?.to_ascii_lowercase().as_str() {
        "html" | "htm" => Some(Kind::Html),
        "txt" | "md" => Some(Kind::Text),
        _ => None,
    }
}

/// Indexable files under `input`, in a stable order.
fn collect_files(input: &Path) -> Result<Vec<(PathBuf, Kind)>> {
    let mut files: Vec<(PathBuf, Kind)> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", input.display()))?;
            let p = entry.path();
            if !p.is_file() { continue; }
            if let Some(kind) = kind_of(p) {
                files.push((p.to_path_buf(), kind));
            }
        }
    } else if input.is_file() {
        if let Some(kind) = kind_of(input) {
            files.push((input.to_path_buf(), kind));
        }
    } else {
        bail!("input {} is neither a file nor a directory", input.display());
    }
    Ok(files)
}

fn doc_url(base: Option<&Url>, rel: &Path) -> String {
    let rel = rel.to_string_lossy().replace('\\', "/");
    match base {
        Some(base) => base.join(&rel).map(String::from).unwrap_or_else(|_| format!("{base}{rel}")),
        None => rel,
    }
}

fn modified_date(path: &Path) -> String {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| time::OffsetDateTime::from(t).format(&time::format_description::well_known::Rfc3339).ok())
        .unwrap_or_default()
}
