//! Corpus record parsing.
//!
//! A corpus file holds one JSON article per line, as produced by the
//! crawler: `url`, `title`, `summary` and a `sections` array whose entries
//! carry a name, a body and nested `subsections`. Indexing works over a
//! single concatenated text field assembled here; its assembly order is
//! fixed because token positions depend on it.

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawArticle {
    url: String,
    title: String,
    summary: String,
    #[serde(default)]
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct Section {
    name: String,
    text: String,
    #[serde(default)]
    subsections: Vec<Subsection>,
}

#[derive(Debug, Deserialize)]
struct Subsection {
    name: String,
    text: String,
}

/// One parsed corpus record.
#[derive(Debug, Clone)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub summary: String,
    /// Title, summary and every section/subsection name and body,
    /// newline-joined. This is the field the index tokenizes.
    pub text: String,
}

/// Parse one corpus line into an [`Article`]. A record that does not decode
/// is a fatal ingestion error for the caller to propagate.
pub fn parse_article(line: &str) -> Result<Article> {
    let raw: RawArticle = serde_json::from_str(line).context("malformed corpus record")?;

    let mut sections_text = String::new();
    for sec in &raw.sections {
        sections_text.push_str(&sec.name);
        sections_text.push('\n');
        sections_text.push_str(&sec.text);
        sections_text.push('\n');
        let subs: Vec<String> = sec
            .subsections
            .iter()
            .map(|sub| format!("{}\n{}\n", sub.name, sub.text))
            .collect();
        sections_text.push_str(&subs.join("\n"));
        sections_text.push_str("\n\n");
    }

    let text = format!("{}\n\n{}\n\n{}", raw.title, raw.summary, sections_text);
    Ok(Article {
        url: raw.url,
        title: raw.title,
        summary: raw.summary,
        text,
    })
}
