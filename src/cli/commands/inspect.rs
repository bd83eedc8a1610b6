//! Inspect command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::InspectArgs;
use crate::data::{looks_shifted, missing_pct, read_csv, repair_all, Row};

/// Widest cell shown in the preview
const MAX_CELL: usize = 24;

fn cell(row: &Row, column: &str) -> String {
    let text = row.get(column).to_string();
    if text.chars().count() > MAX_CELL {
        let cut: String = text.chars().take(MAX_CELL - 1).collect();
        format!("{cut}…")
    } else {
        text
    }
}

/// Render the first `n` rows as an aligned text table.
pub fn format_preview(columns: &[String], rows: &[Row], n: usize) -> Vec<String> {
    let shown = &rows[..n.min(rows.len())];
    let cells: Vec<Vec<String>> = shown.iter().map(|r| columns.iter().map(|c| cell(r, c)).collect()).collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| cells.iter().map(|r| r[i].chars().count()).chain([c.chars().count()]).max().unwrap_or(0))
        .collect();

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{v:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(columns)];
    out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    out.extend(cells.iter().map(|r| line(r.as_slice())));
    out
}

pub fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Normal, &format!("Inspecting: {}", args.input.display()));

    let table = read_csv(&args.input).map_err(|e| format!("Load error: {e}"))?;
    let shifted = table.rows.iter().filter(|r| looks_shifted(r)).count();
    let rows = repair_all(&table.rows);

    log(level, LogLevel::Normal, &format!("  Rows: {}", rows.len()));
    log(level, LogLevel::Normal, &format!("  Columns: {}", table.columns.join(", ")));
    log(level, LogLevel::Normal, &format!("  Missing: ~{:.1}%", missing_pct(&rows)));
    if shifted > 0 {
        log(level, LogLevel::Normal, &format!("  Repaired shifted rows: {shifted}"));
    }

    if args.rows > 0 {
        log(level, LogLevel::Normal, "");
        for line in format_preview(&table.columns, &rows, args.rows) {
            log(level, LogLevel::Normal, &line);
        }
    }
    Ok(())
}
