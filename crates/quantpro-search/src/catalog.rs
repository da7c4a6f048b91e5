//! Domain catalog: which dataset backs each domain, which of its fields are
//! indexed, which are returned, and which query fragments point at it.

use serde::{Deserialize, Serialize};

use quantpro_core::error::{Error, Result};
use quantpro_core::types::Record;

/// Static description of one searchable domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSchema {
    pub name: String,
    /// Dataset identifier handed to the record source (a CSV file name).
    pub dataset: String,
    /// Fields concatenated, in this order, into the indexed document.
    pub search_fields: Vec<String>,
    /// Fields copied, in this order, into each returned record.
    pub output_fields: Vec<String>,
    /// Lower-case fragments that vote for this domain during auto-detection.
    pub keywords: Vec<String>,
    /// Field shown as the headline of a rendered result.
    pub title_field: String,
    /// Fields shown under the headline, most important first.
    pub summary_fields: Vec<String>,
}

impl DomainSchema {
    /// Joins the record's searchable values with single spaces. Fields the
    /// record lacks are skipped.
    pub fn document_for(&self, record: &Record) -> String {
        self.search_fields
            .iter()
            .filter_map(|field| record.get(field))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn project(&self, record: &Record) -> Record { record.project(&self.output_fields) }
}

/// Ordered set of domains plus the fallback used when detection finds nothing.
///
/// Declaration order is the priority order for detection ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCatalog {
    domains: Vec<DomainSchema>,
    fallback: usize,
}

impl DomainCatalog {
    pub fn new(domains: Vec<DomainSchema>, fallback: impl Into<String>) -> Result<Self> {
        let fallback = fallback.into();
        for (i, domain) in domains.iter().enumerate() {
            if domains[..i].iter().any(|other| other.name == domain.name) {
                return Err(Error::InvalidConfig(format!("duplicate domain '{}'", domain.name)));
            }
        }
        let fallback = domains
            .iter()
            .position(|d| d.name == fallback)
            .ok_or_else(|| Error::InvalidConfig(format!("fallback domain '{fallback}' is not in the catalog")))?;
        Ok(Self { domains, fallback })
    }

    /// The five knowledge-base domains shipped with the tool.
    pub fn builtin() -> Self {
        let domains = vec![
            schema(
                "strategy",
                "strategies.csv",
                &["Strategy Name", "Category", "Keywords", "Best For", "Data Requirements"],
                &[
                    "Strategy Name", "Category", "Keywords", "Data Requirements", "Time Horizon", "Best For",
                    "Complexity", "Key Parameters", "Performance Characteristics", "Market Conditions",
                    "Capital Requirements", "Avoid For",
                ],
                &[
                    "strategy", "trading", "algorithm", "arbitrage", "ofi", "hawkes", "kalman", "momentum",
                    "mean-reversion", "pairs", "market-making", "statistical", "execution", "vwap", "ml", "backtest",
                ],
                "Strategy Name",
                &["Category", "Time Horizon", "Complexity", "Best For", "Capital Requirements"],
            ),
            schema(
                "indicator",
                "indicators.csv",
                &["Indicator Name", "Category", "Keywords", "Best For"],
                &[
                    "Indicator Name", "Category", "Keywords", "Formula/Description", "Time-Domain", "Best For",
                    "Parameters", "Interpretation", "Limitations", "Combine With", "Avoid For",
                ],
                &[
                    "indicator", "ema", "sma", "rsi", "macd", "bollinger", "atr", "stochastic", "adx", "vwap", "obv",
                    "tci", "signal", "oscillator", "moving average",
                ],
                "Indicator Name",
                &["Category", "Formula/Description", "Parameters", "Best For"],
            ),
            schema(
                "risk",
                "risk-management.csv",
                &["Risk Control", "Category", "Keywords", "Description", "Best For"],
                &[
                    "Risk Control", "Category", "Keywords", "Description", "Parameters", "Best For", "Implementation",
                    "Advantages", "Disadvantages", "Critical For",
                ],
                &[
                    "risk", "position", "sizing", "kelly", "stop", "loss", "drawdown", "var", "cvar", "leverage",
                    "margin", "hedge", "portfolio", "limit", "exposure",
                ],
                "Risk Control",
                &["Category", "Description", "Best For", "Critical For"],
            ),
            schema(
                "data",
                "data-sources.csv",
                &["Data Type", "Source", "Keywords", "Description", "Best For"],
                &[
                    "Data Type", "Source", "Keywords", "Description", "Format", "Frequency", "Best For",
                    "Requirements", "Typical Cost",
                ],
                &[
                    "data", "tick", "order book", "l2", "ohlcv", "bars", "futures", "options", "on-chain", "news",
                    "sentiment", "fundamental", "volume", "feed", "api",
                ],
                "Data Type",
                &["Source", "Frequency", "Best For", "Typical Cost"],
            ),
            schema(
                "anti-pattern",
                "anti-patterns.csv",
                &["Category", "Issue", "Keywords", "Description"],
                &["Category", "Issue", "Keywords", "Description", "Do", "Don't", "Severity", "Platform"],
                &[
                    "mistake", "error", "avoid", "don't", "anti-pattern", "pitfall", "bias", "overfitting",
                    "look-ahead", "survivorship", "slippage", "bug", "wrong",
                ],
                "Issue",
                &["Category", "Severity", "Don't", "Do"],
            ),
        ];
        Self { domains, fallback: 0 }
    }

    pub fn get(&self, name: &str) -> Option<&DomainSchema> { self.domains.iter().find(|d| d.name == name) }

    pub fn iter(&self) -> impl Iterator<Item = &DomainSchema> { self.domains.iter() }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.domains.iter().map(|d| d.name.as_str()) }

    /// Domain searched when detection matches no keyword.
    pub fn fallback(&self) -> &DomainSchema { &self.domains[self.fallback] }
}

fn schema(
    name: &str,
    dataset: &str,
    search_fields: &[&str],
    output_fields: &[&str],
    keywords: &[&str],
    title_field: &str,
    summary_fields: &[&str],
) -> DomainSchema {
    DomainSchema {
        name: name.to_string(),
        dataset: dataset.to_string(),
        search_fields: strings(search_fields),
        output_fields: strings(output_fields),
        keywords: strings(keywords),
        title_field: title_field.to_string(),
        summary_fields: strings(summary_fields),
    }
}

fn strings(items: &[&str]) -> Vec<String> { items.iter().map(|s| (*s).to_string()).collect() }
