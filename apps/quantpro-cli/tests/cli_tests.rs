use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use quantpro_cli::init::initialize_skill;
use quantpro_cli::render::{render_outcome, OutcomeView};
use quantpro_core::config::SKILL_DIR;
use quantpro_core::types::Record;
use quantpro_rank::Bm25Params;
use quantpro_search::{search, DomainCatalog, DomainSearchService, SearchOutcome};

fn data_dir() -> PathBuf {
    // apps/quantpro-cli -> apps -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().join("data")
}

#[test]
fn renders_titles_and_summaries() {
    let catalog = DomainCatalog::builtin();
    let outcome = search(&data_dir(), "kelly sizing", Some("risk"), 1).expect("search");
    let text = render_outcome(&outcome, &catalog);

    assert!(text.contains("QUERY: kelly sizing"));
    assert!(text.contains("Domain: risk"));
    assert!(text.contains("Found 1 results:"));
    assert!(text.contains("1. Kelly Criterion"));
    assert!(text.contains("Tip:"));
    let summary_lines = text.lines().filter(|l| l.starts_with("   ")).count();
    assert!((1..=4).contains(&summary_lines), "{text}");
}

#[test]
fn colour_only_adds_escape_codes() {
    let catalog = DomainCatalog::builtin();
    let outcome = search(&data_dir(), "rsi bollinger", Some("indicator"), 2).expect("search");
    let plain = render_outcome(&outcome, &catalog);
    let colored = OutcomeView::new(&outcome, &catalog).colored(true).to_string();

    assert!(!plain.contains('\u{1b}'));
    assert!(colored.contains("\u{1b}["));
    assert_eq!(console::strip_ansi_codes(&colored), plain);
    assert_eq!(OutcomeView::new(&outcome, &catalog).colored(false).to_string(), plain);
}

#[test]
fn renders_empty_outcomes_with_a_hint() {
    let catalog = DomainCatalog::builtin();
    let outcome = search(&data_dir(), "zzz_no_such_term", Some("data"), 3).expect("search");
    let text = render_outcome(&outcome, &catalog);
    assert!(text.contains("Found 0 results:"));
    assert!(text.contains("No results found."));
    assert!(!text.contains("Tip:"));
}

#[test]
fn long_values_are_truncated_and_missing_titles_marked() {
    let catalog = DomainCatalog::builtin();
    let long = "x".repeat(150);
    let record: Record = [("Category", long.as_str()), ("Time Horizon", "")].into_iter().collect();
    let outcome = SearchOutcome {
        domain: "strategy".to_string(),
        query: "q".to_string(),
        dataset: "strategies.csv".to_string(),
        count: 1,
        results: vec![record],
    };
    let text = render_outcome(&outcome, &catalog);
    assert!(text.contains("1. Unknown"));
    assert!(text.contains(&format!("   Category: {}...", "x".repeat(100))));
    assert!(!text.contains("Time Horizon:"), "empty values are skipped");
}

#[test]
fn json_output_keeps_field_order() {
    let service = DomainSearchService::with_data_dir(data_dir(), Bm25Params::default());
    let outcome = service.search("look-ahead bias", Some("anti-pattern"), 1).expect("search");
    let json = serde_json::to_value(&outcome).expect("json");
    assert_eq!(json["domain"], "anti-pattern");
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["Issue"], "Look-Ahead Bias");

    let text = serde_json::to_string(&outcome).expect("json");
    let positions: Vec<usize> = ["\"Category\"", "\"Issue\"", "\"Severity\"", "\"Platform\""]
        .iter()
        .map(|key| text.find(key).expect(key))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
}

#[test]
fn init_scaffolds_workflow_and_datasets() {
    let tmp = TempDir::new().unwrap();
    let catalog = DomainCatalog::builtin();
    let report = initialize_skill(tmp.path(), "antigravity", &data_dir(), &catalog).expect("init");

    let workflow = tmp.path().join(".agent/workflows/use-quant-skill.md");
    assert_eq!(report.workflow, workflow);
    assert!(fs::read_to_string(&workflow).unwrap().contains("AI Agent: antigravity"));
    assert!(tmp.path().join(SKILL_DIR).join("SKILL.md").is_file());

    assert_eq!(report.datasets.len(), 5);
    for schema in catalog.iter() {
        let copied = tmp.path().join(SKILL_DIR).join("data").join(&schema.dataset);
        assert_eq!(fs::read(&copied).unwrap(), fs::read(data_dir().join(&schema.dataset)).unwrap());
    }

    // The scaffolded copy is searchable on its own.
    let outcome = search(&report.data_dir, "kelly sizing", None, 1).expect("search");
    assert_eq!(outcome.results[0].get("Risk Control"), Some("Kelly Criterion"));
}

#[test]
fn init_fails_when_a_dataset_is_missing() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("strategies.csv"), "Strategy Name\nMomentum\n").unwrap();
    let target = TempDir::new().unwrap();
    let err = initialize_skill(target.path(), "antigravity", source.path(), &DomainCatalog::builtin()).unwrap_err();
    assert!(err.to_string().contains("failed to copy"), "{err}");
}

#[test]
fn init_requires_an_agent_name() {
    let target = TempDir::new().unwrap();
    assert!(initialize_skill(target.path(), "  ", &data_dir(), &DomainCatalog::builtin()).is_err());
}
