//! Optional term-normalization capabilities the query evaluator consults.
//!
//! Both capabilities are seams: an engine without a configured normalizer or
//! wildcard resolver degrades to exact-term lookup, it never fails.

use crate::index::Index;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;

/// Folds a term to its canonical form (e.g. a stem). Query terms and index
/// terms folding to the same canonical form are treated as equivalent.
pub trait TermNormalizer {
    fn normalize(&self, term: &str) -> String;
}

/// Expands a wildcard pattern (`*`/`?`) to the index terms it matches.
pub trait WildcardResolver {
    fn resolve(&self, pattern: &str, index: &Index) -> Vec<String>;
}

/// Snowball-stemmer-backed normalizer. The corpus is Spanish Wikipedia, so
/// [`SnowballNormalizer::spanish`] is the usual choice.
pub struct SnowballNormalizer {
    stemmer: Stemmer,
}

impl SnowballNormalizer {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            stemmer: Stemmer::create(algorithm),
        }
    }

    pub fn spanish() -> Self {
        Self::new(Algorithm::Spanish)
    }
}

impl TermNormalizer for SnowballNormalizer {
    fn normalize(&self, term: &str) -> String {
        self.stemmer.stem(term).into_owned()
    }
}

/// Canonical form -> every index term folding to it. Built once per engine
/// configuration by scanning the frozen vocabulary.
pub struct FoldedTerms {
    map: HashMap<String, Vec<String>>,
}

impl FoldedTerms {
    pub fn build(index: &Index, normalizer: &dyn TermNormalizer) -> Self {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for term in index.terms() {
            map.entry(normalizer.normalize(term))
                .or_default()
                .push(term.to_string());
        }
        tracing::debug!(terms = index.term_count(), folds = map.len(), "built fold map");
        Self { map }
    }

    /// Index terms folding to `canonical`; empty when nothing does.
    pub fn expand(&self, canonical: &str) -> &[String] {
        self.map.get(canonical).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Indexer;

    #[test]
    fn spanish_stems_fold_inflections() {
        let n = SnowballNormalizer::spanish();
        assert_eq!(n.normalize("gatos"), n.normalize("gato"));
        assert_eq!(n.normalize("casas"), n.normalize("casa"));
    }

    #[test]
    fn fold_map_groups_equivalent_terms() {
        let mut indexer = Indexer::new();
        indexer.add_document("corpus.json");
        indexer.add_article("u0", "gato gatos perro", 0);
        let index = indexer.freeze();

        let normalizer = SnowballNormalizer::spanish();
        let folded = FoldedTerms::build(&index, &normalizer);
        let mut terms = folded.expand(&normalizer.normalize("gato")).to_vec();
        terms.sort();
        assert_eq!(terms, vec!["gato", "gatos"]);
        assert!(folded.expand("zorro").is_empty());
    }
}
