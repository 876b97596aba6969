//! Snapshot persistence: the whole index state in one bincode file.
//!
//! The snapshot is an opaque unit — inverted index, article table, document
//! table and URL set together — so a restored index is indistinguishable
//! from the one that was saved, for every operation.

use crate::index::{Index, IndexState};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::Path;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub version: u32,
    pub created_at: String,
    pub num_docs: u32,
    pub num_articles: u32,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    meta: &'a SnapshotMeta,
    state: &'a IndexState,
}

#[derive(Deserialize)]
struct SnapshotFile {
    meta: SnapshotMeta,
    state: IndexState,
}

pub fn save_snapshot(path: &Path, meta: &SnapshotMeta, index: &Index) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let bytes = bincode::serialize(&SnapshotRef {
        meta,
        state: &index.state,
    })?;
    let mut f = File::create(path)
        .with_context(|| format!("cannot create snapshot {}", path.display()))?;
    f.write_all(&bytes)?;
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        articles = meta.num_articles,
        "snapshot written"
    );
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<(SnapshotMeta, Index)> {
    let mut f =
        File::open(path).with_context(|| format!("cannot open snapshot {}", path.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let snapshot: SnapshotFile = bincode::deserialize(&buf)
        .with_context(|| format!("undecodable snapshot {}", path.display()))?;
    if snapshot.meta.version != SNAPSHOT_VERSION {
        bail!(
            "unsupported snapshot version {} (expected {})",
            snapshot.meta.version,
            SNAPSHOT_VERSION
        );
    }
    tracing::info!(
        path = %path.display(),
        articles = snapshot.meta.num_articles,
        "snapshot loaded"
    );
    Ok((snapshot.meta, Index::new(snapshot.state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Indexer;

    fn meta_for(index: &Index) -> SnapshotMeta {
        SnapshotMeta {
            version: SNAPSHOT_VERSION,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            num_docs: index.document_count() as u32,
            num_articles: index.article_count(),
        }
    }

    #[test]
    fn round_trip_preserves_state() {
        let mut indexer = Indexer::new();
        indexer.add_document("corpus.json");
        indexer.add_article("u0", "gato perro", 0);
        indexer.add_article("u1", "perro", 1);
        let index = indexer.freeze();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        save_snapshot(&path, &meta_for(&index), &index).unwrap();

        let (meta, restored) = load_snapshot(&path).unwrap();
        assert_eq!(meta.num_articles, 2);
        assert_eq!(restored.article_count(), index.article_count());
        assert_eq!(restored.postings("perro"), index.postings("perro"));
        assert_eq!(restored.positions("gato", 0), index.positions("gato", 0));
        assert_eq!(restored.document_path(0), index.document_path(0));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let mut indexer = Indexer::new();
        indexer.add_document("corpus.json");
        indexer.add_article("u0", "gato", 0);
        let index = indexer.freeze();

        let mut meta = meta_for(&index);
        meta.version = SNAPSHOT_VERSION + 1;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        save_snapshot(&path, &meta, &index).unwrap();
        assert!(load_snapshot(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_snapshot(Path::new("/nonexistent/index.bin")).is_err());
    }
}
