// src/report/summary.rs
use serde::Serialize;

use crate::catalog::Category;
use crate::report::RunResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub company: String,
    pub filing_date: String,
    pub environmental: usize,
    pub social: usize,
    pub governance: usize,
    pub total: usize,
}

/// One row per processed entity, in processing order.
pub fn summary_rows(run: &RunResult) -> Vec<SummaryRow> {
    run.companies
        .iter()
        .map(|c| {
            let environmental = c.count(Category::Environmental);
            let social = c.count(Category::Social);
            let governance = c.count(Category::Governance);
            SummaryRow {
                company: c.company.clone(),
                filing_date: c.filing_date.clone(),
                environmental,
                social,
                governance,
                total: environmental + social + governance,
            }
        })
        .collect()
}

const HEADERS: [&str; 6] = [
    "Company",
    "Filing Date",
    "Environmental",
    "Social",
    "Governance",
    "Total ESG",
];

/// Fixed-width table: text columns left-aligned, counts right-aligned.
pub fn render_table(rows: &[SummaryRow]) -> String {
    if rows.is_empty() {
        return "(no entities processed)".to_string();
    }

    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.company.clone(),
                r.filing_date.clone(),
                r.environmental.to_string(),
                r.social.to_string(),
                r.governance.to_string(),
                r.total.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let fmt_line = |values: [&str; 6]| -> String {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if i < 2 {
                    format!("{:<width$}", v, width = widths[i])
                } else {
                    format!("{:>width$}", v, width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(fmt_line(HEADERS));
    for row in &cells {
        lines.push(fmt_line(row.each_ref().map(String::as_str)));
    }
    lines.join("\n")
}
