//! Terminal rendering for reports and versions

use colored::{ColoredString, Colorize};
use std::fmt::Write;

use draftscore_core::{SaveOutcome, ScoreBand, ValidationReport, VersionView};

fn band_color(text: String, band: ScoreBand) -> ColoredString {
    match band {
        ScoreBand::Excellent => text.green().bold(),
        ScoreBand::Good => text.cyan().bold(),
        ScoreBand::NeedsWork => text.yellow().bold(),
        ScoreBand::Poor => text.red().bold(),
    }
}

/// Full human-readable report
pub fn report(report: &ValidationReport) -> String {
    let max_total: u32 = report.dimensions().map(|(_, r)| r.max_score).sum();
    let band = report.band();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({})",
        "Score:".bold(),
        band_color(format!("{}/{}", report.total_score, max_total), band),
        band
    );

    for (dimension, result) in report.dimensions() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}",
            dimension.label().bold(),
            band_color(format!("{}/{}", result.score, result.max_score), result.band())
        );
        for strength in &result.strengths {
            let _ = writeln!(out, "  {} {}", "+".green(), strength);
        }
        for issue in &result.issues {
            let _ = writeln!(out, "  {} {}", "-".red(), issue);
        }
    }

    let slop = &report.slop_detection;
    if !slop.is_clean() {
        let phrases: Vec<&str> = slop.flagged_phrases.iter().map(String::as_str).collect();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} -{} ({})",
            "Filler penalty:".bold(),
            slop.deduction,
            phrases.join(", ")
        );
    }
    out
}

pub fn save_outcome(outcome: &SaveOutcome) -> String {
    match outcome {
        SaveOutcome::Saved {
            version_number,
            total_versions,
            discarded,
        } => {
            let mut line = format!(
                "{} version {} of {}",
                "Saved".green(),
                version_number,
                total_versions
            );
            if *discarded > 0 {
                let _ = write!(line, " ({} versions replaced)", discarded);
            }
            line
        }
        SaveOutcome::Skipped { reason } => {
            format!("{} ({})", "Nothing to save".yellow(), reason.as_str())
        }
    }
}

/// Version header followed by the content
pub fn version(view: &VersionView) -> String {
    let mut out = format!(
        "{} {}/{}",
        "Version".bold(),
        view.version_number,
        view.total_versions
    );
    if view.can_go_back {
        out.push_str("  [back]");
    }
    if view.can_go_forward {
        out.push_str("  [forward]");
    }
    out.push('\n');
    out.push_str(&view.content);
    if !view.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn boundary(message: &str) -> ColoredString {
    message.dimmed()
}
