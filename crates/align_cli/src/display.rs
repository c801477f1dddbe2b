//! Terminal rendering of a search report.

use align_core::{Alignment, SearchReport, SearchWarning};
use std::fmt::Write;

/// At most `max_rows` alignments, evenly spaced by index, keeping the first
/// and last.
pub fn downsample(alignments: &[Alignment], max_rows: usize) -> Vec<Alignment> {
    if alignments.len() <= max_rows {
        return alignments.to_vec();
    }
    match max_rows {
        0 => Vec::new(),
        1 => vec![alignments[0]],
        _ => {
            let last = alignments.len() - 1;
            (0..max_rows)
                .map(|i| alignments[i * last / (max_rows - 1)])
                .collect()
        }
    }
}

fn describe_warning(warning: &SearchWarning) -> String {
    match warning {
        SearchWarning::TickCapExceeded {
            required: Some(required),
            ceiling,
        } => format!(
            "search needs {required} ticks but stopped at the ceiling of {ceiling}; later alignments are missing"
        ),
        SearchWarning::TickCapExceeded {
            required: None,
            ceiling,
        } => format!("search stopped at the ceiling of {ceiling} ticks; later alignments are missing"),
        SearchWarning::ResultCapExceeded { cap } => {
            format!("collection stopped after {cap} alignments; later alignments are missing")
        }
    }
}

/// Summary lines followed by a table of at most `max_rows` alignments.
pub fn render_report(report: &SearchReport, max_rows: usize) -> String {
    let d = &report.diagnostics;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Target {:.6} (float range {:.6} .. {:.6}, {:?} precision)",
        d.resolved_range.canonical, d.resolved_range.min, d.resolved_range.max, d.precision
    );
    let _ = writeln!(
        out,
        "Delta {:.6}/tick, {} of {} ticks checked, {} alignments",
        d.delta,
        d.ticks_checked,
        d.max_ticks + 1,
        report.alignments.len()
    );
    let _ = writeln!(
        out,
        "Cache {:.3?}, search {:.3?}, {} forward steps ({:?})",
        d.elapsed_cache, d.elapsed_search, d.forward_steps, d.strategy
    );
    for warning in &d.warnings {
        let _ = writeln!(out, "warning: {}", describe_warning(warning));
    }

    if report.alignments.is_empty() {
        let _ = writeln!(out, "\nNo alignments found.");
        return out;
    }

    let rows = downsample(&report.alignments, max_rows);
    if rows.len() < report.alignments.len() {
        let _ = writeln!(
            out,
            "\nShowing {} of {} alignments.",
            rows.len(),
            report.alignments.len()
        );
    }
    let _ = writeln!(
        out,
        "\n{:>8}  {:>16}  {:>16}  {:>16}",
        "ticks", "portal", "portal min", "portal max"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>8}  {:>16.6}  {:>16.6}  {:>16.6}",
            row.ticks_since_portal, row.portal, row.portal_min, row.portal_max
        );
    }
    out
}
