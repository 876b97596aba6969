//! Boolean information-retrieval engine: a position-tracked inverted index
//! over a corpus of structured articles, plus an AND/OR/NOT query evaluator
//! with phrase matching.
//!
//! Build phase: an [`Indexer`] exclusively owns all index state and is fed
//! documents and articles; [`Indexer::freeze`] turns it into an immutable
//! [`Index`]. Query phase: a [`QueryEngine`] borrows the frozen index and
//! resolves queries without locking, so the index can be shared across any
//! number of concurrent readers.

pub mod builder;
pub mod corpus;
pub mod index;
pub mod normalize;
pub mod persist;
pub mod positional;
pub mod postings;
pub mod query;
pub mod tokenizer;

pub use builder::Indexer;
pub use index::{ArtId, ArticleEntry, DocId, Index, IndexStats, PostingList};
pub use query::{QueryEngine, QuerySyntaxError};
