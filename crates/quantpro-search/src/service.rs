use std::path::Path;

use serde::Serialize;
use tracing::debug;

use quantpro_core::error::Result;
use quantpro_core::record_store::CsvRecordStore;
use quantpro_core::traits::RecordSource;
use quantpro_core::types::{Record, ScoredDoc};
use quantpro_rank::{Bm25Engine, Bm25Params};

use crate::catalog::DomainCatalog;

/// Answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub domain: String,
    pub query: String,
    pub dataset: String,
    pub count: usize,
    pub results: Vec<Record>,
}

/// Routes a query to a domain and ranks that domain's records.
///
/// Holds only immutable configuration; every call loads its records and
/// builds its index from scratch.
pub struct DomainSearchService<S> {
    catalog: DomainCatalog,
    source: S,
    params: Bm25Params,
}

impl<S: RecordSource> DomainSearchService<S> {
    pub fn new(catalog: DomainCatalog, source: S, params: Bm25Params) -> Self { Self { catalog, source, params } }

    pub fn catalog(&self) -> &DomainCatalog { &self.catalog }

    pub fn params(&self) -> Bm25Params { self.params }

    /// Returns at most `max_results` records of the resolved domain, best
    /// first. Records sharing no term with the query are never returned.
    pub fn search(&self, query: &str, domain: Option<&str>, max_results: usize) -> Result<SearchOutcome> {
        let schema = self.catalog.resolve(query, domain)?;
        let records = self.source.load(&schema.dataset)?;

        let documents: Vec<String> = records.iter().map(|record| schema.document_for(record)).collect();
        let mut engine = Bm25Engine::new(self.params);
        engine.fit(&documents);
        let hits = top_hits(engine.score(query), max_results);

        debug!(
            domain = %schema.name,
            dataset = %schema.dataset,
            records = records.len(),
            hits = hits.len(),
            "search complete"
        );

        let results: Vec<Record> =
            hits.iter().filter_map(|hit| records.get(hit.index)).map(|record| schema.project(record)).collect();
        Ok(SearchOutcome {
            domain: schema.name.clone(),
            query: query.to_string(),
            dataset: schema.dataset.clone(),
            count: results.len(),
            results,
        })
    }
}

impl DomainSearchService<CsvRecordStore> {
    /// Built-in catalog over the CSV datasets in `data_dir`.
    pub fn with_data_dir(data_dir: impl AsRef<Path>, params: Bm25Params) -> Self {
        Self::new(DomainCatalog::builtin(), CsvRecordStore::new(data_dir.as_ref()), params)
    }
}

/// Keeps positive scores only, orders them best first and truncates.
///
/// The sort is stable, so equal scores keep collection order.
pub fn top_hits(mut scored: Vec<ScoredDoc>, limit: usize) -> Vec<ScoredDoc> {
    scored.retain(|hit| hit.score > 0.0);
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// One-shot search over the built-in domains with default BM25 parameters.
///
/// An empty `domain` behaves like `None` and triggers auto-detection.
pub fn search(data_dir: &Path, query: &str, domain: Option<&str>, max_results: usize) -> Result<SearchOutcome> {
    DomainSearchService::with_data_dir(data_dir, Bm25Params::default()).search(query, domain, max_results)
}
