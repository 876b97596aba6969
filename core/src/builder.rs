//! Build-phase owner of the index state.

use crate::index::{ArtId, ArticleEntry, DocId, Index, IndexState};
use crate::tokenizer::tokenize;
use std::path::PathBuf;

/// Accumulates documents and articles into an inverted index. All state is
/// strictly additive during a build session; [`Indexer::freeze`] ends the
/// session and hands the state over to the read-only [`Index`].
#[derive(Debug, Default)]
pub struct Indexer {
    state: IndexState,
}

impl Indexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next document id for `path`. Must be called before the
    /// articles contained in that document are added.
    pub fn add_document(&mut self, path: impl Into<PathBuf>) -> DocId {
        let id = self.state.docs.len() as DocId;
        self.state.docs.push(path.into());
        id
    }

    /// Index one article of the current (most recently registered) document.
    ///
    /// `record` is the zero-based record offset of the article inside its
    /// document. `full_text` is the pre-concatenated text field the corpus
    /// layer assembles; every token position stored for this article refers
    /// to that field.
    ///
    /// Returns `None` without touching any state when `url` was already
    /// indexed; the duplicate is skipped, not re-counted.
    pub fn add_article(&mut self, url: &str, full_text: &str, record: u32) -> Option<ArtId> {
        assert!(
            !self.state.docs.is_empty(),
            "add_document must be called before add_article"
        );
        if self.state.urls.contains(url) {
            return None;
        }

        let artid = self.state.articles.len() as ArtId;
        let doc = (self.state.docs.len() - 1) as DocId;
        self.state.articles.push(ArticleEntry { doc, record });
        self.state.urls.insert(url.to_string());

        for (pos, token) in tokenize(full_text).into_iter().enumerate() {
            self.state
                .index
                .entry(token)
                .or_default()
                .entry(artid)
                .or_default()
                .push(pos as u32);
        }
        Some(artid)
    }

    /// End the build session, freezing the accumulated state.
    pub fn freeze(self) -> Index {
        tracing::debug!(
            documents = self.state.docs.len(),
            articles = self.state.articles.len(),
            terms = self.state.index.len(),
            "freezing index"
        );
        Index::new(self.state)
    }
}
