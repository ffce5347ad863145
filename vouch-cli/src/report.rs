//! Verdict rendering for the terminal.

use vouch_core::types::{Decision, Severity, Verdict};

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn decision_symbol(decision: Decision) -> &'static str {
    match decision {
        Decision::Accept => "✓",
        Decision::Reject => "✗",
        Decision::Uncertain => "?",
    }
}

fn severity_color(severity: Severity, use_color: bool) -> &'static str {
    if !use_color {
        return "";
    }
    match severity {
        Severity::Critical => "\x1b[1;31m", // bold red
        Severity::Error => "\x1b[31m",      // red
        Severity::Warning => "\x1b[33m",    // yellow
        Severity::Info => "\x1b[36m",       // cyan
    }
}

fn color_end(use_color: bool) -> &'static str {
    if use_color {
        "\x1b[0m"
    } else {
        ""
    }
}

/// Human-readable report.
pub fn render_text(verdict: &Verdict, use_color: bool) -> String {
    let mut out = String::new();

    out.push_str("╔══════════════════════════════════════════╗\n");
    out.push_str("║         Vouch Verification Report        ║\n");
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    out.push_str(&format!(
        "{} {} (score: {:.1})\n\n",
        decision_symbol(verdict.decision),
        verdict.decision,
        verdict.score
    ));

    if !verdict.domains_detected.is_empty() {
        out.push_str("Domains detected:\n");
        for domain in &verdict.domains_detected {
            out.push_str(&format!(
                "  {} ({:.2}): {}\n",
                domain.domain,
                domain.confidence,
                domain.signals.join(", ")
            ));
        }
        out.push('\n');
    }

    for finding in &verdict.findings {
        let cs = severity_color(finding.severity, use_color);
        let ce = color_end(use_color);
        out.push_str(&format!(
            "{cs}{}{ce}: {} [{}]\n",
            finding.severity, finding.title, finding.method_id
        ));
        out.push_str(&format!("    {}\n", finding.description));
        for evidence in &finding.evidence {
            match evidence.line_number {
                Some(line) => out.push_str(&format!(
                    "    line {line}: \"{}\" ({})\n",
                    evidence.quote, evidence.source
                )),
                None => out.push_str(&format!(
                    "    \"{}\" ({})\n",
                    evidence.quote, evidence.source
                )),
            }
        }
    }
    if !verdict.findings.is_empty() {
        out.push('\n');
    }

    let methods: Vec<&str> = verdict
        .methods_executed
        .iter()
        .map(|m| m.as_str())
        .collect();
    let counts: Vec<String> = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ]
    .iter()
    .map(|&s| (s, verdict.count_at(s)))
    .filter(|(_, n)| *n > 0)
    .map(|(s, n)| format!("{n} {s}"))
    .collect();
    let breakdown = if counts.is_empty() {
        "no findings".to_string()
    } else {
        counts.join(", ")
    };
    out.push_str(&format!(
        "─── {breakdown}; methods: {} ───\n",
        methods.join(", ")
    ));
    out.push_str(&verdict.summary);
    out.push('\n');

    out
}

/// Machine-readable report.
pub fn render_json(verdict: &Verdict) -> serde_json::Result<String> {
    serde_json::to_string_pretty(verdict)
}
