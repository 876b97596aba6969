use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lince_core::corpus::parse_article;
use lince_core::persist::{save_snapshot, SnapshotMeta, SNAPSHOT_VERSION};
use lince_core::Indexer;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Parser)]
#[command(name = "lince-indexer")]
#[command(about = "Build a boolean inverted index over a JSONL article corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a corpus file or directory and write a snapshot
    Build {
        /// Corpus root: a line-record .json file, or a directory of them
        #[arg(long)]
        input: String,
        /// Output snapshot file
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build(&input, &output),
    }
}

fn build(input: &str, output: &str) -> Result<()> {
    let root = Path::new(input);
    let mut indexer = Indexer::new();

    if root.is_file() {
        index_file(&mut indexer, root)?;
    } else if root.is_dir() {
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("json") {
                index_file(&mut indexer, p)?;
            }
        }
    } else {
        bail!("{} is not a file nor a directory", root.display());
    }

    let index = indexer.freeze();
    let stats = index.stats();
    tracing::info!(
        documents = stats.documents,
        articles = stats.articles,
        terms = stats.terms,
        "build complete"
    );
    println!("Indexed files:    {}", stats.documents);
    println!("Indexed articles: {}", stats.articles);
    println!("Indexed terms:    {}", stats.terms);

    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    let meta = SnapshotMeta {
        version: SNAPSHOT_VERSION,
        created_at,
        num_docs: stats.documents as u32,
        num_articles: stats.articles as u32,
    };
    save_snapshot(Path::new(output), &meta, &index)?;
    Ok(())
}

fn index_file(indexer: &mut Indexer, path: &Path) -> Result<()> {
    tracing::info!(file = %path.display(), "indexing");
    indexer.add_document(path);
    let f = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    for (record, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let article = parse_article(&line)
            .with_context(|| format!("{}:{}", path.display(), record + 1))?;
        indexer.add_article(&article.url, &article.text, record as u32);
    }
    Ok(())
}
