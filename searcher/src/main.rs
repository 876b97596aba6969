use anyhow::{bail, Context, Result};
use clap::Parser;
use lince_core::corpus::{parse_article, Article};
use lince_core::normalize::SnowballNormalizer;
use lince_core::persist::load_snapshot;
use lince_core::{ArtId, Index, QueryEngine};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Display cap per query unless --all is given.
const SHOW_MAX: usize = 10;

#[derive(Parser)]
#[command(name = "lince-searcher")]
#[command(about = "Solve boolean queries against a built index snapshot", long_about = None)]
struct Cli {
    /// Snapshot file produced by the indexer
    #[arg(long)]
    index: String,
    /// Queries to solve; ignored when --queries is given
    query: Vec<String>,
    /// File with one query per line; lines starting with '#' are echoed
    #[arg(long)]
    queries: Option<String>,
    /// Print every result instead of the first 10
    #[arg(long, default_value_t = false)]
    all: bool,
    /// Print each article's summary under its title
    #[arg(long, default_value_t = false)]
    snippet: bool,
    /// Print only the number of results per query
    #[arg(short = 'C', long, default_value_t = false)]
    count: bool,
    /// Lines of --queries are "query<TAB>expected count"; compare and report
    #[arg(short = 'T', long, default_value_t = false)]
    test: bool,
    /// Fold query terms with the Spanish snowball stemmer
    #[arg(long, default_value_t = false)]
    stem: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let (_, index) = load_snapshot(Path::new(&cli.index))?;
    let mut engine = QueryEngine::new(&index);
    if cli.stem {
        engine = engine.with_normalizer(Box::new(SnowballNormalizer::spanish()));
    }

    let queries: Vec<String> = match &cli.queries {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("cannot open query file {path}"))?;
            BufReader::new(f).lines().collect::<std::io::Result<_>>()?
        }
        None => cli.query.clone(),
    };
    if queries.is_empty() {
        bail!("no queries given; pass them as arguments or via --queries");
    }
    tracing::info!(queries = queries.len(), stem = cli.stem, "solving queries");

    if cli.test {
        solve_and_test(&engine, &queries)
    } else if cli.count {
        solve_and_count(&engine, &queries)
    } else {
        solve_and_show(&engine, &index, &queries, &cli)
    }
}

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

fn solve_and_count(engine: &QueryEngine, queries: &[String]) -> Result<()> {
    for query in queries {
        if is_comment(query) {
            println!("{query}");
            continue;
        }
        let results = engine.solve(query)?;
        println!("{query}\t{}", results.len());
    }
    Ok(())
}

fn solve_and_test(engine: &QueryEngine, lines: &[String]) -> Result<()> {
    let mut failures = 0usize;
    for line in lines {
        if is_comment(line) {
            println!("{line}");
            continue;
        }
        let (query, expected) = line
            .split_once('\t')
            .with_context(|| format!("test line without expected count: {line}"))?;
        let expected: usize = expected
            .trim()
            .parse()
            .with_context(|| format!("bad expected count in: {line}"))?;
        let got = engine.solve(query)?.len();
        if got == expected {
            println!("{query}\t{got}");
        } else {
            println!(">>>> {query}\texpected {expected}, got {got} <<<<");
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} queries differ from the reference counts");
    }
    Ok(())
}

fn solve_and_show(engine: &QueryEngine, index: &Index, queries: &[String], cli: &Cli) -> Result<()> {
    for query in queries {
        if is_comment(query) {
            println!("{query}");
            continue;
        }
        let results = engine.solve(query)?;
        println!("{query}\t{} articles", results.len());
        let stop = if cli.all {
            results.len()
        } else {
            results.len().min(SHOW_MAX)
        };
        for (rank, &art) in results[..stop].iter().enumerate() {
            let article = fetch_record(index, art)?;
            println!("{}. [{art}] {}", rank + 1, article.url);
            println!("   {}", article.title);
            if cli.snippet {
                println!("   {}", article.summary);
            }
        }
    }
    Ok(())
}

/// Re-read an article's raw record from its owning document file.
fn fetch_record(index: &Index, art: ArtId) -> Result<Article> {
    let entry = index.article(art).context("unknown article id")?;
    let path = index.document_path(entry.doc).context("unknown document id")?;
    let f = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let line = BufReader::new(f)
        .lines()
        .nth(entry.record as usize)
        .context("record offset past end of document")??;
    parse_article(&line)
}
