use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use quantpro_core::config::SKILL_DIR;
use quantpro_search::DomainCatalog;

/// Paths written by [`initialize_skill`].
#[derive(Debug, Clone)]
pub struct InitReport {
    pub workflow_dir: PathBuf,
    pub skill_dir: PathBuf,
    pub data_dir: PathBuf,
    pub datasets: Vec<PathBuf>,
    pub workflow: PathBuf,
    pub skill_doc: PathBuf,
}

/// Scaffolds the agent workflow and shared knowledge base under `target`.
///
/// Every dataset of `catalog` is copied from `source_data`; a missing dataset
/// aborts the scaffold.
pub fn initialize_skill(target: &Path, ai_name: &str, source_data: &Path, catalog: &DomainCatalog) -> Result<InitReport> {
    if ai_name.trim().is_empty() {
        bail!("--ai must name the agent");
    }

    let workflow_dir = target.join(".agent").join("workflows");
    fs::create_dir_all(&workflow_dir).with_context(|| format!("failed to create {}", workflow_dir.display()))?;
    let skill_dir = target.join(SKILL_DIR);
    let data_dir = skill_dir.join("data");
    fs::create_dir_all(&data_dir).with_context(|| format!("failed to create {}", data_dir.display()))?;

    let datasets: Vec<&str> = catalog.iter().map(|d| d.dataset.as_str()).collect();
    let pb = ProgressBar::new(datasets.len() as u64);
    pb.set_style(ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} datasets {msg}")?.progress_chars("#>-"));
    let mut copied = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        let src = source_data.join(dataset);
        let dst = data_dir.join(dataset);
        pb.set_message(dataset.to_string());
        fs::copy(&src, &dst).with_context(|| format!("failed to copy {}", src.display()))?;
        info!(src = %src.display(), dst = %dst.display(), "copied dataset");
        copied.push(dst);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let workflow = workflow_dir.join("use-quant-skill.md");
    fs::write(&workflow, workflow_doc(ai_name, catalog)).with_context(|| format!("failed to write {}", workflow.display()))?;
    let skill_doc = skill_dir.join("SKILL.md");
    fs::write(&skill_doc, skill_doc_text(catalog)).with_context(|| format!("failed to write {}", skill_doc.display()))?;

    Ok(InitReport { workflow_dir, skill_dir, data_dir, datasets: copied, workflow, skill_doc })
}

fn domain_lines(catalog: &DomainCatalog) -> String {
    catalog.iter().map(|d| format!("- **{}** (`{}`)\n", d.name, d.dataset)).collect()
}

fn workflow_doc(ai_name: &str, catalog: &DomainCatalog) -> String {
    format!(
        "---\ndescription: How to use the QuantPro skill for quantitative trading research\n---\n\n\
         # Using QuantPro Skill\n\nAI Agent: {ai_name}\n\n\
         ## Search the knowledge base\n\n\
         ```bash\n\
         # Auto-detect domain\nquantpro search \"order flow crypto\"\n\n\
         # Search a specific domain\nquantpro search \"stop loss kelly\" -d risk\n\n\
         # Get more results\nquantpro search \"rsi bollinger\" -d indicator -n 5\n\
         ```\n\n\
         ## Domains\n\n{domains}\n\
         See {SKILL_DIR}/SKILL.md for the full reference.\n",
        domains = domain_lines(catalog),
    )
}

fn skill_doc_text(catalog: &DomainCatalog) -> String {
    format!(
        "# QuantPro Skill\n\n\
         Offline BM25 search over a curated quantitative trading knowledge base.\n\n\
         ## Usage\n\n\
         ```bash\n\
         quantpro search \"query\"                 # auto-detect the domain\n\
         quantpro search \"query\" -d <domain> -n 5\n\
         quantpro search \"query\" --data-dir /path --json\n\
         ```\n\n\
         ## Domains\n\n{domains}\n\
         When no domain is given the query is matched against each domain's trigger words; \
         queries matching none search `{fallback}`.\n\n\
         ## Data\n\nCSV files live in `{SKILL_DIR}/data/`.\n",
        domains = domain_lines(catalog),
        fallback = catalog.fallback().name,
    )
}
