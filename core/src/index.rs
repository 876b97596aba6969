//! Index state and the frozen read-only surface queries run against.
//!
//! The inverted index maps each term to an ordered map from article id to
//! that article's position list. Article ids are dense and assigned in
//! first-seen order, so the ordered map's key iteration yields every posting
//! list already sorted, with no re-sorting at query time.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

pub type ArtId = u32;
pub type DocId = u32;

/// Ascending, duplicate-free sequence of article ids.
pub type PostingList = Vec<ArtId>;

/// Where an article lives: its owning document and the zero-based record
/// (line) offset inside that document, enough to re-fetch the raw record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleEntry {
    pub doc: DocId,
    pub record: u32,
}

/// Everything a build session accumulates. Owned mutably by the builder,
/// then frozen inside an [`Index`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct IndexState {
    /// term -> article id -> strictly increasing token positions
    pub index: HashMap<String, BTreeMap<ArtId, Vec<u32>>>,
    /// doc id -> source file path
    pub docs: Vec<PathBuf>,
    /// article id -> (doc, record offset)
    pub articles: Vec<ArticleEntry>,
    /// URLs already indexed; duplicates are skipped, not re-counted
    pub urls: HashSet<String>,
}

/// Counts over a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub documents: usize,
    pub articles: usize,
    pub terms: usize,
}

/// A frozen index. Immutable after construction and safe to share across
/// threads; all query-phase reads go through this type.
#[derive(Debug)]
pub struct Index {
    pub(crate) state: IndexState,
}

impl Index {
    pub(crate) fn new(state: IndexState) -> Self {
        Self { state }
    }

    /// Number of known articles; the query-time universe is `[0, article_count)`.
    pub fn article_count(&self) -> u32 {
        self.state.articles.len() as u32
    }

    pub fn document_count(&self) -> usize {
        self.state.docs.len()
    }

    pub fn term_count(&self) -> usize {
        self.state.index.len()
    }

    /// Ascending list of article ids holding `term`; empty if unindexed.
    pub fn postings(&self, term: &str) -> PostingList {
        match self.state.index.get(term) {
            Some(entries) => entries.keys().copied().collect(),
            None => Vec::new(),
        }
    }

    /// Position list of `term` inside one article, if any.
    pub fn positions(&self, term: &str, art: ArtId) -> Option<&[u32]> {
        self.state
            .index
            .get(term)
            .and_then(|entries| entries.get(&art))
            .map(Vec::as_slice)
    }

    pub(crate) fn positional_entries(&self, term: &str) -> Option<&BTreeMap<ArtId, Vec<u32>>> {
        self.state.index.get(term)
    }

    /// Every indexed term, in arbitrary order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.state.index.keys().map(String::as_str)
    }

    pub fn article(&self, art: ArtId) -> Option<&ArticleEntry> {
        self.state.articles.get(art as usize)
    }

    pub fn document_path(&self, doc: DocId) -> Option<&Path> {
        self.state.docs.get(doc as usize).map(PathBuf::as_path)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.state.docs.len(),
            articles: self.state.articles.len(),
            terms: self.state.index.len(),
        }
    }
}
