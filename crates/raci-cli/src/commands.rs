//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use raci_export::{ExportPlan, actions_from_issues, fill_template, write_actions_csv};
use raci_ingest::parse_template;
use raci_model::{ParsedTemplate, SnapshotStore, WorkshopId, WorkshopRoster};
use raci_validate::{ValidationRun, validate_workshop};

use crate::cli::{ExportArgs, ParseArgs, SnapshotArgs, ValidateArgs};
use raci_cli::snapshot::SnapshotFile;

pub fn run_parse(args: &ParseArgs) -> Result<ParsedTemplate> {
    let parsed = parse(&args.template)?;
    if let Some(path) = &args.json {
        let json = serde_json::to_vec_pretty(&parsed).context("serialize parsed template")?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "wrote parsed template");
    }
    Ok(parsed)
}

pub fn run_validate(args: &ValidateArgs) -> Result<(WorkshopRoster, ValidationRun)> {
    let parsed = parse(&args.template)?;
    let (roster, store) = seed_snapshot(&parsed, &args.snapshot)?;
    let run = validate_workshop(&roster, &store, &args.policy.to_policy())?;
    info!(
        issues = run.summary.issues_created,
        high = run.summary.high_severity_count(),
        "validation complete"
    );
    Ok((roster, run))
}

pub struct ExportReport {
    pub written: std::path::PathBuf,
    pub skipped: usize,
    pub unmatched: usize,
}

pub fn run_export(args: &ExportArgs) -> Result<ExportReport> {
    let bytes = read(&args.template)?;
    let template = raci_model::Workbook::from_bytes(&bytes)
        .context("template is not a readable workbook")?;
    let parsed = parse_template(&bytes)?;
    let (roster, store) = seed_snapshot(&parsed, &args.snapshot)?;

    let plan = ExportPlan::from_parsed(&parsed, &roster);
    for unmatched in &plan.unmatched {
        warn!(
            sheet = %unmatched.sheet_name,
            activity = %unmatched.text,
            "no roster entry for parsed activity; row left as parsed"
        );
    }

    let outcome = fill_template(
        &template,
        &plan,
        &store,
        WorkshopId(args.snapshot.workshop),
        Utc::now(),
    );
    for skip in &outcome.skipped {
        warn!(
            sheet = %skip.sheet_name,
            cell = %skip.cell,
            "skipped write: {:?}",
            skip.reason
        );
    }
    fs::write(&args.out, outcome.to_bytes()?)
        .with_context(|| format!("write {}", args.out.display()))?;
    info!(path = %args.out.display(), "wrote filled workbook");

    if let Some(path) = &args.actions {
        let run = validate_workshop(&roster, &store, &args.policy.to_policy())?;
        let actions = actions_from_issues(&run.issues);
        fs::write(path, write_actions_csv(&actions)?)
            .with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), actions = actions.len(), "wrote action list");
    }

    Ok(ExportReport {
        written: args.out.clone(),
        skipped: outcome.skipped.len(),
        unmatched: plan.unmatched.len(),
    })
}

fn parse(path: &Path) -> Result<ParsedTemplate> {
    let bytes = read(path)?;
    Ok(parse_template(&bytes)?)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn seed_snapshot(
    parsed: &ParsedTemplate,
    args: &SnapshotArgs,
) -> Result<(WorkshopRoster, SnapshotStore)> {
    let (roster, mut store) = SnapshotStore::from_parsed(WorkshopId(args.workshop), parsed);
    if let Some(path) = &args.assignments {
        let file = SnapshotFile::from_json(&read(path)?)?;
        file.apply(&roster, &mut store)
            .with_context(|| format!("apply assignments from {}", path.display()))?;
    }
    if let Some(path) = &args.recommended {
        let file = SnapshotFile::from_json(&read(path)?)?;
        file.apply(&roster, &mut store)
            .with_context(|| format!("apply recommended baseline from {}", path.display()))?;
    }
    Ok((roster, store))
}
