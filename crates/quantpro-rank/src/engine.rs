use std::collections::HashSet;

use tracing::debug;

use quantpro_core::types::ScoredDoc;

use crate::index::Bm25Index;
use crate::tokenizer::tokenize;

/// BM25 tuning constants.
///
/// `k1` controls term-frequency saturation, `b` how strongly scores are
/// normalised by document length (0 disables it, 1 applies it fully).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self { Self { k1: 1.5, b: 0.75 } }
}

/// Fits a collection once and scores any number of queries against it.
#[derive(Debug, Clone, Default)]
pub struct Bm25Engine {
    params: Bm25Params,
    index: Bm25Index,
}

impl Bm25Engine {
    pub fn new(params: Bm25Params) -> Self { Self { params, index: Bm25Index::default() } }

    pub fn params(&self) -> Bm25Params { self.params }

    pub fn index(&self) -> &Bm25Index { &self.index }

    /// Replaces the fitted collection with `documents`.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        self.index = Bm25Index::fit(documents);
        debug!(
            documents = self.index.len(),
            vocabulary = self.index.vocabulary_len(),
            avgdl = self.index.avgdl(),
            "fitted bm25 index"
        );
    }

    /// Scores every fitted document against `query`, in collection order.
    ///
    /// Documents sharing no term with the query score `0.0`. An unfit or
    /// empty engine returns an empty vector.
    pub fn score(&self, query: &str) -> Vec<ScoredDoc> {
        if self.index.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        let terms: Vec<(String, f64)> = tokenize(query)
            .into_iter()
            .filter(|term| seen.insert(term.clone()))
            .filter_map(|term| self.index.idf(&term).map(|idf| (term, idf)))
            .collect();

        (0..self.index.len())
            .map(|doc| {
                let score = terms.iter().map(|(term, idf)| self.term_score(doc, term, *idf)).sum::<f64>();
                ScoredDoc { index: doc, score }
            })
            .collect()
    }

    fn term_score(&self, doc: usize, term: &str, idf: f64) -> f64 {
        let tf = self.index.term_freq(doc, term);
        if tf == 0 {
            return 0.0;
        }
        let Bm25Params { k1, b } = self.params;
        let tf = tf as f64;
        let doc_len = self.index.doc_len(doc).unwrap_or(0) as f64;
        let avgdl = self.index.avgdl();
        let length_ratio = if avgdl > 0.0 { doc_len / avgdl } else { 0.0 };
        idf * tf * (k1 + 1.0) / (tf + k1 * (1.0 - b + b * length_ratio))
    }
}
