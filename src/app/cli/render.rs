//! Human-readable output for the CLI.

use std::fmt::Write;
use std::path::Path;

use crate::app::commands::{Catalog, FeatureDetail};
use crate::domain::{Outcome, RunReport};

fn marker(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => "✅",
        Outcome::Failure => "❌",
        Outcome::DryRunSkipped => "🔎",
        Outcome::NotRun => "⏭️ ",
    }
}

pub fn render_catalog(catalog: &Catalog, features_dir: &Path) -> String {
    let mut out = String::new();

    if catalog.is_empty() {
        let _ = writeln!(out, "No features discovered in {}", features_dir.display());
        return out;
    }

    let _ = writeln!(out, "Features in execution order ({}):", catalog.features.len());
    for (i, feature) in catalog.features.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} - {} v{}", i + 1, feature.id, feature.name, feature.version);
        let _ = writeln!(out, "     {}", feature.description);
        if !feature.declared_prerequisites.is_empty() {
            let _ =
                writeln!(out, "     Prerequisites: {}", feature.declared_prerequisites.join(", "));
        }
        if !feature.depends_on.is_empty() {
            let deps: Vec<&str> = feature.depends_on.iter().map(|d| d.as_str()).collect();
            let _ = writeln!(out, "     Depends on: {}", deps.join(", "));
        }
        if feature.requires_reboot {
            let _ = writeln!(out, "     Requires reboot");
        }
        if let Some(error) = &feature.metadata_error {
            let _ = writeln!(out, "     ⚠️  Metadata unavailable: {}", error);
        }
    }

    if !catalog.ordering_issues.is_empty() {
        let _ = writeln!(out, "\nOrdering issues:");
        for issue in &catalog.ordering_issues {
            let _ = writeln!(out, "  ⚠️  {}", issue);
        }
    }
    out
}

pub fn render_detail(detail: &FeatureDetail) -> String {
    let d = &detail.descriptor;
    let mut out = String::new();

    let _ = writeln!(out, "{} v{} ({})", d.name, d.version, d.id);
    let _ = writeln!(out, "{}", d.description);
    let _ = writeln!(out, "\nSource: {}", d.source_location.display());
    let _ = writeln!(out, "Requires reboot: {}", if d.requires_reboot { "yes" } else { "no" });
    if let Some(error) = &d.metadata_error {
        let _ = writeln!(out, "⚠️  Metadata unavailable: {}", error);
    }

    if !d.declared_prerequisites.is_empty() {
        let _ = writeln!(out, "\nPrerequisites:");
        for prerequisite in &d.declared_prerequisites {
            let _ = writeln!(out, "  • {}", prerequisite);
        }
    }

    if !d.depends_on.is_empty() {
        let _ = writeln!(out, "\nDepends on:");
        for dependency in &d.depends_on {
            let _ = writeln!(out, "  • {}", dependency);
        }
    }

    let source = if detail.section_present { "" } else { ", not present in settings" };
    let _ = writeln!(out, "\nConfiguration [{}{}]:", d.config_section, source);
    match (&detail.effective_config, &detail.load_error) {
        (Some(config), _) if config.is_empty() => {
            let _ = writeln!(out, "  (no settings)");
        }
        (Some(config), _) => {
            for (key, value) in config.iter() {
                let _ = writeln!(out, "  {} = {}", key, value);
            }
        }
        (None, Some(error)) => {
            let _ = writeln!(out, "  ❌ Unit failed to load: {}", error);
        }
        (None, None) => {}
    }

    if !detail.ordering_issues.is_empty() {
        let _ = writeln!(out, "\nOrdering issues:");
        for issue in &detail.ordering_issues {
            let _ = writeln!(out, "  ⚠️  {}", issue);
        }
    }
    out
}

pub fn render_report(report: &RunReport, dry_run: bool) -> String {
    let mut out = String::new();

    if dry_run {
        let _ = writeln!(out, "Dry run: no feature logic was invoked");
    }

    for entry in &report.entries {
        let _ = writeln!(
            out,
            "{} {} ({}): {}",
            marker(entry.outcome),
            entry.feature_id,
            entry.name,
            entry.message
        );
        for (key, value) in &entry.data {
            let _ = writeln!(out, "     {} = {}", key, value);
        }
    }

    let _ = writeln!(
        out,
        "\nSummary: {} succeeded, {} failed, {} skipped ({} total)",
        report.success_count,
        report.failure_count,
        report.skipped_count,
        report.total()
    );
    if report.reboot_required {
        let _ = writeln!(out, "⚠️  Reboot required to complete setup");
    }
    out
}
