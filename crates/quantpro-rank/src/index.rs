use std::collections::{HashMap, HashSet};

use crate::tokenizer::tokenize;

/// Collection statistics for one fitted corpus.
///
/// Built in a single pass by [`Bm25Index::fit`] and never updated afterwards;
/// a new collection means a new index.
#[derive(Debug, Clone, Default)]
pub struct Bm25Index {
    term_freqs: Vec<HashMap<String, usize>>,
    doc_lens: Vec<usize>,
    avgdl: f64,
    doc_freqs: HashMap<String, usize>,
    idf: HashMap<String, f64>,
}

impl Bm25Index {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        if documents.is_empty() {
            return Self::default();
        }

        let mut term_freqs = Vec::with_capacity(documents.len());
        let mut doc_lens = Vec::with_capacity(documents.len());
        let mut doc_freqs: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc.as_ref());
            doc_lens.push(tokens.len());

            let mut seen = HashSet::new();
            let mut freqs: HashMap<String, usize> = HashMap::new();
            for token in tokens {
                if seen.insert(token.clone()) {
                    *doc_freqs.entry(token.clone()).or_default() += 1;
                }
                *freqs.entry(token).or_default() += 1;
            }
            term_freqs.push(freqs);
        }

        let n = documents.len();
        let total: usize = doc_lens.iter().sum();
        let avgdl = total as f64 / n as f64;
        let idf = doc_freqs.iter().map(|(term, &df)| (term.clone(), idf(n, df))).collect();

        Self { term_freqs, doc_lens, avgdl, doc_freqs, idf }
    }

    /// Number of documents in the collection.
    pub fn len(&self) -> usize { self.doc_lens.len() }

    pub fn is_empty(&self) -> bool { self.doc_lens.is_empty() }

    /// Mean token count per document, `0.0` for an empty collection.
    pub fn avgdl(&self) -> f64 { self.avgdl }

    pub fn doc_len(&self, doc: usize) -> Option<usize> { self.doc_lens.get(doc).copied() }

    /// Number of documents containing `term` at least once.
    pub fn doc_freq(&self, term: &str) -> usize { self.doc_freqs.get(term).copied().unwrap_or(0) }

    /// Occurrences of `term` in document `doc`.
    pub fn term_freq(&self, doc: usize, term: &str) -> usize {
        self.term_freqs.get(doc).and_then(|freqs| freqs.get(term)).copied().unwrap_or(0)
    }

    /// IDF weight of `term`, or `None` when the term never occurs.
    pub fn idf(&self, term: &str) -> Option<f64> { self.idf.get(term).copied() }

    /// Number of distinct terms in the collection.
    pub fn vocabulary_len(&self) -> usize { self.idf.len() }
}

/// Smoothed inverse document frequency, `ln((n - df + 0.5) / (df + 0.5) + 1)`.
///
/// Stays positive even when `df == n`.
pub fn idf(n: usize, df: usize) -> f64 {
    let n = n as f64;
    let df = df as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}
