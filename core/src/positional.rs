//! Phrase resolution over per-term position lists.

use crate::index::{ArtId, Index, PostingList};

/// Articles in which `terms` occur as a consecutive run in exactly this
/// order. `terms` must hold at least two terms; single-term lookups belong
/// to the plain posting lookup.
///
/// Candidates are seeded from the first term's postings. For every start
/// position the remaining terms are walked in order, each required to occur
/// at the previous position plus one within the same article. An article is
/// emitted at most once, on the first start position that completes the
/// walk.
pub fn phrase_postings(index: &Index, terms: &[&str]) -> PostingList {
    debug_assert!(terms.len() >= 2, "phrase needs at least two terms");
    let Some(first) = index.positional_entries(terms[0]) else {
        return Vec::new();
    };

    let mut res: PostingList = Vec::new();
    for (&artid, positions) in first {
        if phrase_starts_anywhere(index, &terms[1..], artid, positions) {
            res.push(artid);
        }
    }
    res
}

fn phrase_starts_anywhere(index: &Index, rest: &[&str], artid: ArtId, starts: &[u32]) -> bool {
    'starts: for &start in starts {
        let mut pos = start;
        for term in rest {
            match index.positions(term, artid) {
                Some(plist) if plist.binary_search(&(pos + 1)).is_ok() => pos += 1,
                _ => continue 'starts,
            }
        }
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Indexer;

    fn small_index() -> Index {
        let mut indexer = Indexer::new();
        indexer.add_document("corpus.json");
        indexer.add_article("u0", "la casa verde del pueblo", 0);
        indexer.add_article("u1", "verde casa", 1);
        indexer.add_article("u2", "una casa y otra casa verde", 2);
        indexer.freeze()
    }

    #[test]
    fn matches_exact_order_only() {
        let index = small_index();
        assert_eq!(phrase_postings(&index, &["casa", "verde"]), vec![0, 2]);
        assert_eq!(phrase_postings(&index, &["verde", "casa"]), vec![1]);
    }

    #[test]
    fn three_term_phrase() {
        let index = small_index();
        assert_eq!(phrase_postings(&index, &["la", "casa", "verde"]), vec![0]);
        assert!(phrase_postings(&index, &["casa", "verde", "casa"]).is_empty());
    }

    #[test]
    fn unindexed_first_term_is_empty() {
        let index = small_index();
        assert!(phrase_postings(&index, &["perro", "verde"]).is_empty());
    }

    #[test]
    fn later_start_positions_are_tried() {
        // "casa" at positions 1 and 4 in article 2; only the second start
        // is followed by "verde".
        let index = small_index();
        assert_eq!(phrase_postings(&index, &["casa", "verde"]), vec![0, 2]);
    }

    #[test]
    fn each_article_reported_once() {
        let mut indexer = Indexer::new();
        indexer.add_document("corpus.json");
        indexer.add_article("u0", "gato negro gato negro", 0);
        let index = indexer.freeze();
        assert_eq!(phrase_postings(&index, &["gato", "negro"]), vec![0]);
    }
}
