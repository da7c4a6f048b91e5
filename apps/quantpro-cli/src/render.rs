use std::fmt;

use console::Style;

use quantpro_search::{DomainCatalog, SearchOutcome};

const RULE_WIDTH: usize = 100;
const MAX_SUMMARY_FIELDS: usize = 4;
const MAX_VALUE_CHARS: usize = 100;

/// Formats a search outcome for the terminal, without colour.
pub fn render_outcome(outcome: &SearchOutcome, catalog: &DomainCatalog) -> String {
    OutcomeView::new(outcome, catalog).to_string()
}

/// Terminal layout of a [`SearchOutcome`].
///
/// Each hit shows the domain's title field followed by up to four non-empty
/// summary fields, long values cut at 100 characters. With colour on, the
/// header is cyan, the count yellow and the result numbers green.
pub struct OutcomeView<'a> {
    outcome: &'a SearchOutcome,
    catalog: &'a DomainCatalog,
    palette: Palette,
}

struct Palette {
    header: Style,
    count: Style,
    number: Style,
}

impl Palette {
    fn new(enabled: bool) -> Self {
        Self {
            header: Style::new().cyan().bold().force_styling(enabled),
            count: Style::new().yellow().force_styling(enabled),
            number: Style::new().green().bold().force_styling(enabled),
        }
    }
}

impl<'a> OutcomeView<'a> {
    pub fn new(outcome: &'a SearchOutcome, catalog: &'a DomainCatalog) -> Self {
        Self { outcome, catalog, palette: Palette::new(false) }
    }

    /// Turns ANSI colour on or off; callers decide from the terminal.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.palette = Palette::new(enabled);
        self
    }
}

impl fmt::Display for OutcomeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Palette { header, count, number } = &self.palette;
        let outcome = self.outcome;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f)?;
        writeln!(f, "{}", header.apply_to(&rule))?;
        writeln!(f, "{}", header.apply_to(format!("QUERY: {}", outcome.query)))?;
        writeln!(f, "{}\n", header.apply_to(&rule))?;
        writeln!(f, "Domain: {}", outcome.domain)?;
        writeln!(f, "{}\n", count.apply_to(format!("Found {} results:", outcome.count)))?;

        if outcome.count == 0 {
            return writeln!(f, "No results found. Try a different query or domain.");
        }

        let schema = self.catalog.get(&outcome.domain);
        for (i, record) in outcome.results.iter().enumerate() {
            let title = schema.and_then(|s| record.get(&s.title_field)).unwrap_or("Unknown");
            writeln!(f, "{} {title}", number.apply_to(format!("{}.", i + 1)))?;

            let summary = schema
                .into_iter()
                .flat_map(|s| s.summary_fields.iter())
                .filter_map(|field| record.get(field).map(|value| (field, value)))
                .filter(|(_, value)| !value.is_empty() && *value != title)
                .take(MAX_SUMMARY_FIELDS);
            for (field, value) in summary {
                writeln!(f, "   {field}: {}", truncate(value, MAX_VALUE_CHARS))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Tip: Use -d to pick a domain, -n to get more results")
    }
}

/// Cuts `s` to `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
