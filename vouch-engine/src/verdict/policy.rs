//! Caller-side verdict policies.

use vouch_core::types::{Decision, Severity, Verdict};

/// Downgrade a REJECT verdict to UNCERTAIN when no critical finding is
/// present.
///
/// ERROR-only rejections are soft and advisory; CRITICAL rejections are
/// hard blocks that force cannot bypass. Returns whether the verdict was
/// changed.
pub fn force_downgrade(verdict: &mut Verdict) -> bool {
    if verdict.decision != Decision::Reject {
        return false;
    }
    let has_critical = verdict
        .findings
        .iter()
        .any(|f| f.severity == Severity::Critical);
    if has_critical {
        return false;
    }
    verdict.decision = Decision::Uncertain;
    verdict
        .summary
        .push_str(" Downgraded to UNCERTAIN by force policy.");
    true
}
