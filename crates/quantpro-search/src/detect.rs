use tracing::debug;

use quantpro_core::error::{Error, Result};

use crate::catalog::{DomainCatalog, DomainSchema};

impl DomainCatalog {
    /// Picks the domain to search.
    ///
    /// A non-empty `explicit` name must exist in the catalog. Otherwise the
    /// domain is detected from the query text.
    pub fn resolve(&self, query: &str, explicit: Option<&str>) -> Result<&DomainSchema> {
        match explicit.filter(|name| !name.is_empty()) {
            Some(name) => self.get(name).ok_or_else(|| Error::UnknownDomain(name.to_string())),
            None => Ok(self.detect(query)),
        }
    }

    /// Counts, per domain, how many of its keywords occur anywhere in the
    /// lower-cased query. The highest count wins; equal counts go to the domain
    /// declared first, and a query matching nothing gets the fallback domain.
    pub fn detect(&self, query: &str) -> &DomainSchema {
        let query = query.to_lowercase();
        let mut best: Option<(&DomainSchema, usize)> = None;
        for domain in self.iter() {
            let hits = keyword_hits(domain, &query);
            if hits > best.map_or(0, |(_, top)| top) {
                best = Some((domain, hits));
            }
        }

        match best {
            Some((domain, hits)) => {
                debug!(domain = %domain.name, hits, "detected domain");
                domain
            }
            None => {
                let fallback = self.fallback();
                debug!(domain = %fallback.name, "no domain keywords matched, using fallback");
                fallback
            }
        }
    }
}

/// Number of `domain` keywords contained in the lower-cased `query`.
pub fn keyword_hits(domain: &DomainSchema, query: &str) -> usize {
    domain.keywords.iter().filter(|kw| query.contains(kw.as_str())).count()
}
