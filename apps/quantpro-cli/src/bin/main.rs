//! `quantpro`: offline search over the quant trading knowledge base.
//!
//! Usage:
//!   quantpro search "rsi bollinger" -d indicator -n 5
//!   quantpro search "kelly sizing" --json
//!   quantpro init --ai antigravity --dir ./my-project

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use quantpro_cli::init::initialize_skill;
use quantpro_cli::render::OutcomeView;
use quantpro_cli::telemetry::init_telemetry;
use quantpro_core::config::{locate_data_dir, Config, Settings};
use quantpro_rank::Bm25Params;
use quantpro_search::{DomainCatalog, DomainSearchService};

#[derive(Parser)]
#[command(name = "quantpro", version, about = "Quant trading knowledge base search")]
struct Cli {
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank the records of one domain against a query
    Search {
        /// Query words, joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Domain to search; detected from the query when omitted
        #[arg(short, long)]
        domain: Option<String>,

        /// Maximum number of results
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
        max_results: Option<u64>,

        /// Directory holding the CSV datasets
        #[arg(long)]
        data_dir: Option<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scaffold the agent workflow and knowledge base into a project
    Init {
        /// Name of the AI agent the workflow is written for
        #[arg(long)]
        ai: String,

        /// Project directory to scaffold
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Directory holding the CSV datasets to copy
        #[arg(long)]
        data_dir: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_telemetry(cli.verbose);

    let config = Config::load()?;
    let settings = config.settings();
    match cli.command {
        Command::Search { query, domain, max_results, data_dir, json } => {
            let data_dir = resolve_data_dir(data_dir.as_deref(), settings);
            let limit = match max_results {
                Some(n) => usize::try_from(n)?,
                None => settings.search.max_results,
            };
            let params = Bm25Params { k1: settings.search.k1, b: settings.search.b };
            debug!(data_dir = %data_dir.display(), limit, "searching");

            let service = DomainSearchService::with_data_dir(&data_dir, params);
            let outcome = service.search(&query.join(" "), domain.as_deref(), limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", OutcomeView::new(&outcome, service.catalog()).colored(console::colors_enabled()));
            }
        }
        Command::Init { ai, dir, data_dir } => {
            let source = resolve_data_dir(data_dir.as_deref(), settings);
            let report = initialize_skill(&dir, &ai, &source, &DomainCatalog::builtin())?;
            println!("✅ Workflow written to {}", report.workflow.display());
            println!("✅ Skill guide written to {}", report.skill_doc.display());
            println!("✅ Copied {} datasets into {}", report.datasets.len(), report.data_dir.display());
            println!("\n💡 Try: quantpro search \"momentum breakout\" --data-dir {}", report.data_dir.display());
        }
    }
    Ok(())
}

fn resolve_data_dir(flag: Option<&str>, settings: &Settings) -> PathBuf {
    locate_data_dir(flag.or(settings.data.dir.as_deref()))
}
