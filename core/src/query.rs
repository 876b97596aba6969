//! Boolean/phrase query evaluation over a frozen index.
//!
//! Queries are flat, space-delimited expressions. The reserved uppercase
//! words `AND`, `OR` and `NOT` are operators; any maximal run of other
//! tokens is one operand — a single-term lookup, or a phrase when the run
//! has two or more terms. Double quotes are stripped before splitting, so
//! `"casa verde"` and `casa verde` are the same phrase operand.
//!
//! Evaluation is strictly left to right with no binding-strength difference
//! between AND and OR: `a OR b AND c` is `(a OR b) AND c`. That reduction
//! order is part of the engine's contract and is pinned by tests.

use crate::index::{Index, PostingList};
use crate::normalize::{FoldedTerms, TermNormalizer, WildcardResolver};
use crate::positional::phrase_postings;
use crate::postings::{complement, intersect, union};
use thiserror::Error;

/// Malformed query: an operator with no operand to apply to, or operators
/// chained together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query syntax error: {0}")]
pub struct QuerySyntaxError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
    Not,
}

impl Op {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "AND" => Some(Op::And),
            "OR" => Some(Op::Or),
            "NOT" => Some(Op::Not),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Op::And => "AND",
            Op::Or => "OR",
            Op::Not => "NOT",
        }
    }
}

enum Elem {
    Op(Op),
    Operand(PostingList),
}

/// Read-only query evaluator borrowing a frozen [`Index`].
///
/// Optionally configured with a [`TermNormalizer`] (term folding, e.g.
/// stemming) and/or a [`WildcardResolver`]; without them every operand is an
/// exact-term lookup.
pub struct QueryEngine<'a> {
    index: &'a Index,
    normalizer: Option<Box<dyn TermNormalizer>>,
    folded: Option<FoldedTerms>,
    wildcards: Option<Box<dyn WildcardResolver>>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self {
            index,
            normalizer: None,
            folded: None,
            wildcards: None,
        }
    }

    /// Fold query terms and index terms through `normalizer`; a term's
    /// postings become the union over all index terms sharing its canonical
    /// form. Builds the fold map once, up front.
    pub fn with_normalizer(mut self, normalizer: Box<dyn TermNormalizer>) -> Self {
        self.folded = Some(FoldedTerms::build(self.index, normalizer.as_ref()));
        self.normalizer = Some(normalizer);
        self
    }

    /// Expand operands containing `*` or `?` through `resolver`.
    pub fn with_wildcards(mut self, resolver: Box<dyn WildcardResolver>) -> Self {
        self.wildcards = Some(resolver);
        self
    }

    /// Resolve `query` to the ascending list of matching article ids.
    ///
    /// An empty or all-whitespace query resolves to an empty list. A term
    /// absent from the index resolves to an empty operand, not an error.
    pub fn solve(&self, query: &str) -> Result<PostingList, QuerySyntaxError> {
        let cleaned = query.replace('"', " ");
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        self.reduce(self.resolve_operands(&tokens))
    }

    /// Pass 1: operator tokens stay markers; each maximal non-operator run
    /// becomes one resolved posting list.
    fn resolve_operands(&self, tokens: &[&str]) -> Vec<Elem> {
        let mut elems = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if let Some(op) = Op::parse(tokens[i]) {
                elems.push(Elem::Op(op));
                i += 1;
            } else {
                let mut j = i + 1;
                while j < tokens.len() && Op::parse(tokens[j]).is_none() {
                    j += 1;
                }
                let run = &tokens[i..j];
                let postings = if run.len() == 1 {
                    self.term_postings(run[0])
                } else {
                    phrase_postings(self.index, run)
                };
                elems.push(Elem::Operand(postings));
                i = j;
            }
        }
        elems
    }

    /// Pass 2: left-to-right reduction into an accumulator.
    fn reduce(&self, elems: Vec<Elem>) -> Result<PostingList, QuerySyntaxError> {
        let mut it = elems.into_iter();
        let mut acc = self.operand(&mut it, "at the start of the query")?;
        while let Some(elem) = it.next() {
            match elem {
                Elem::Op(Op::And) => {
                    let rhs = self.operand(&mut it, "after AND")?;
                    acc = intersect(&acc, &rhs);
                }
                Elem::Op(Op::Or) => {
                    let rhs = self.operand(&mut it, "after OR")?;
                    acc = union(&acc, &rhs);
                }
                Elem::Op(Op::Not) => {
                    return Err(QuerySyntaxError(
                        "NOT cannot directly follow a term".to_string(),
                    ));
                }
                Elem::Operand(_) => {
                    return Err(QuerySyntaxError(
                        "expected AND, OR or NOT between terms".to_string(),
                    ));
                }
            }
        }
        Ok(acc)
    }

    /// One operand, optionally negated by a single leading NOT.
    fn operand(
        &self,
        it: &mut impl Iterator<Item = Elem>,
        context: &str,
    ) -> Result<PostingList, QuerySyntaxError> {
        match it.next() {
            Some(Elem::Operand(p)) => Ok(p),
            Some(Elem::Op(Op::Not)) => match it.next() {
                Some(Elem::Operand(p)) => Ok(complement(&p, self.index.article_count())),
                Some(Elem::Op(op)) => Err(QuerySyntaxError(format!(
                    "expected a term after NOT, found {}",
                    op.as_str()
                ))),
                None => Err(QuerySyntaxError(
                    "expected a term after NOT, found end of query".to_string(),
                )),
            },
            Some(Elem::Op(op)) => Err(QuerySyntaxError(format!(
                "expected a term {context}, found {}",
                op.as_str()
            ))),
            None => Err(QuerySyntaxError(format!(
                "expected a term {context}, found end of query"
            ))),
        }
    }

    fn term_postings(&self, term: &str) -> PostingList {
        if term.contains('*') || term.contains('?') {
            if let Some(resolver) = &self.wildcards {
                let mut acc = Vec::new();
                for t in resolver.resolve(term, self.index) {
                    acc = union(&acc, &self.index.postings(&t));
                }
                return acc;
            }
        }
        if let (Some(normalizer), Some(folded)) = (&self.normalizer, &self.folded) {
            let canonical = normalizer.normalize(term);
            let mut acc = Vec::new();
            for t in folded.expand(&canonical) {
                acc = union(&acc, &self.index.postings(t));
            }
            return acc;
        }
        self.index.postings(term)
    }
}
