use crate::fix::FixReport;
use crate::rules::RewriteResult;
use serde_json::json;
use std::io::Write;

/// Print fixed files grouped per path with ANSI colors.
pub fn print_pretty(report: &FixReport) {
    let mut out = std::io::stdout();
    write_pretty(report, &mut out);
}

fn write_pretty(report: &FixReport, out: &mut dyn Write) {
    let changed: Vec<&RewriteResult> = report.results.iter().filter(|r| r.modified).collect();

    if changed.is_empty() {
        let _ = writeln!(
            out,
            "\x1b[32m✓\x1b[0m Nothing to fix ({} files scanned, {} rules loaded)",
            report.files_scanned, report.rules_loaded
        );
        return;
    }

    for result in &changed {
        let _ = writeln!(out, "\n\x1b[4m{}\x1b[0m", result.file.display());
        let _ = writeln!(
            out,
            "  \x1b[90m{} line{} touched\x1b[0m",
            result.lines_touched,
            if result.lines_touched == 1 { "" } else { "s" }
        );
        for rule_id in &result.fired {
            let _ = writeln!(out, "  \x1b[36m{}\x1b[0m", rule_id);
        }
    }

    let verb = if report.dry_run { "would fix" } else { "fixed" };
    let _ = writeln!(
        out,
        "\n\x1b[1m{} {} of {} files ({} rules loaded)\x1b[0m",
        verb, report.files_fixed, report.files_scanned, report.rules_loaded
    );
}

/// Print the report as structured JSON.
pub fn print_json(report: &FixReport) {
    let mut out = std::io::stdout();
    write_json(report, &mut out);
}

fn write_json(report: &FixReport, out: &mut dyn Write) {
    let results: Vec<_> = report
        .results
        .iter()
        .map(|r| {
            json!({
                "file": r.file.display().to_string(),
                "modified": r.modified,
                "lines_touched": r.lines_touched,
                "fired": r.fired,
            })
        })
        .collect();

    let output = json!({
        "results": results,
        "files_scanned": report.files_scanned,
        "files_fixed": report.files_fixed,
        "rules_loaded": report.rules_loaded,
        "dry_run": report.dry_run,
    });

    let _ = writeln!(
        out,
        "{}",
        serde_json::to_string_pretty(&output).unwrap_or_default()
    );
}

/// One line per changed file, for scripting.
pub fn print_compact(report: &FixReport) {
    let mut out = std::io::stdout();
    write_compact(report, &mut out);
}

fn write_compact(report: &FixReport, out: &mut dyn Write) {
    for result in report.results.iter().filter(|r| r.modified) {
        let _ = writeln!(
            out,
            "{}: {}",
            result.file.display(),
            result.fired.join(", ")
        );
    }
    let _ = writeln!(
        out,
        "{} fixed / {} scanned",
        report.files_fixed, report.files_scanned
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report() -> FixReport {
        FixReport {
            results: vec![
                RewriteResult {
                    file: PathBuf::from("admin/agents.php"),
                    modified: true,
                    lines_touched: 4,
                    fired: vec!["comment-period".into(), "rename-agents-locals".into()],
                },
                RewriteResult {
                    file: PathBuf::from("admin/tools.php"),
                    modified: false,
                    lines_touched: 0,
                    fired: vec![],
                },
            ],
            files_scanned: 2,
            files_fixed: 1,
            rules_loaded: 5,
            dry_run: false,
        }
    }

    #[test]
    fn pretty_lists_changed_files_only() {
        let mut buf = Vec::new();
        write_pretty(&report(), &mut buf);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("admin/agents.php"));
        assert!(!text.contains("admin/tools.php"));
        assert!(text.contains("fixed 1 of 2 files"));
    }

    #[test]
    fn pretty_dry_run_wording() {
        let mut r = report();
        r.dry_run = true;
        let mut buf = Vec::new();
        write_pretty(&r, &mut buf);
        assert!(String::from_utf8(buf).unwrap().contains("would fix 1 of 2 files"));
    }

    #[test]
    fn pretty_clean_run() {
        let r = FixReport {
            results: vec![],
            files_scanned: 3,
            files_fixed: 0,
            rules_loaded: 5,
            dry_run: false,
        };
        let mut buf = Vec::new();
        write_pretty(&r, &mut buf);
        assert!(String::from_utf8(buf).unwrap().contains("Nothing to fix"));
    }

    #[test]
    fn json_is_parseable() {
        let mut buf = Vec::new();
        write_json(&report(), &mut buf);
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["files_fixed"], 1);
        assert_eq!(value["results"][0]["fired"][1], "rename-agents-locals");
    }

    #[test]
    fn compact_one_line_per_fixed_file() {
        let mut buf = Vec::new();
        write_compact(&report(), &mut buf);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("admin/agents.php: comment-period, rename-agents-locals"));
        assert!(text.contains("1 fixed / 2 scanned"));
    }
}
