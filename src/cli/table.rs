//! Plain-text rendering of the budget grid.

use crate::currency::{format_money, format_percent, MoneyFormat};
use crate::grid::{Bucket, ColumnDef};
use crate::session::BudgetSession;

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Headers plus rows of already-formatted cells.
pub struct Table {
    pub headers: Vec<String>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Content width per column, measured in characters.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let mut lines = vec![self.render_row(&self.headers, &widths)];
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push("-".repeat(total));
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(idx, width)| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                let alignment = self.alignments.get(idx).copied().unwrap_or(Alignment::Left);
                render_cell(text, *width, alignment)
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    }
}

/// Pads `text` to `width` characters.
pub fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let remaining = width.saturating_sub(text.chars().count());
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(remaining)),
        Alignment::Right => format!("{}{}", " ".repeat(remaining), text),
    }
}

/// Category rows grouped by bucket, bucket totals, and the net cash flow line.
pub fn render_grid(session: &BudgetSession, format: &MoneyFormat) -> String {
    let columns = session.columns();
    let mut headers = vec!["Category".to_string()];
    headers.extend(columns.iter().map(|column| column.label.clone()));
    let mut alignments = vec![Alignment::Left];
    alignments.extend(columns.iter().map(|_| Alignment::Right));

    let mut rows = Vec::new();
    for bucket in Bucket::ALL {
        rows.push(vec![format!("[{}]", bucket)]);
        for category in session.registry().list_by_bucket(bucket) {
            let marker = if session.propagation_enabled(&category.id) {
                ""
            } else {
                " *"
            };
            let mut row = vec![format!("  {}{}", category.display_name, marker)];
            row.extend(
                columns
                    .iter()
                    .map(|column| format_money(session.cell_value(&category.id, column), format)),
            );
            rows.push(row);
        }
        let mut total = vec![format!("  {} total", bucket)];
        total.extend(
            columns
                .iter()
                .map(|column| format_money(session.bucket_total(bucket, column), format)),
        );
        rows.push(total);
    }

    let mut net = vec!["Net cash flow".to_string()];
    net.extend(
        columns
            .iter()
            .map(|column| format_money(session.bucket_totals(column).net_cash_flow(), format)),
    );
    rows.push(net);

    Table {
        headers,
        alignments,
        rows,
    }
    .render()
}

/// Totals, net cash flow, and allocation shares for one column.
pub fn render_summary(session: &BudgetSession, column: &ColumnDef, format: &MoneyFormat) -> String {
    let totals = session.bucket_totals(column);
    let mut rows = Vec::new();
    for bucket in Bucket::ALL {
        let share = if bucket == Bucket::Income {
            String::new()
        } else {
            format_percent(totals.percent(bucket))
        };
        rows.push(vec![
            bucket.to_string(),
            format_money(totals.get(bucket), format),
            share,
        ]);
    }
    rows.push(vec![
        "Allocated".to_string(),
        format_money(totals.allocation_base(), format),
        String::new(),
    ]);
    rows.push(vec![
        "Net cash flow".to_string(),
        format_money(totals.net_cash_flow(), format),
        String::new(),
    ]);

    Table {
        headers: vec![column.label.clone(), "Amount".into(), "Share".into()],
        alignments: vec![Alignment::Left, Alignment::Right, Alignment::Right],
        rows,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CategoryId, ViewMode};
    use chrono::NaiveDate;

    fn session() -> BudgetSession {
        BudgetSession::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    #[test]
    fn cells_pad_to_width() {
        assert_eq!(render_cell("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(render_cell("ab", 4, Alignment::Right), "  ab");
        assert_eq!(render_cell("abcdef", 4, Alignment::Right), "abcdef");
    }

    #[test]
    fn table_aligns_columns() {
        let table = Table {
            headers: vec!["Name".into(), "Total".into()],
            alignments: vec![Alignment::Left, Alignment::Right],
            rows: vec![vec!["Rent".into(), "$900".into()]],
        };
        assert_eq!(table.render(), "Name  Total\n-----------\nRent   $900");
    }

    #[test]
    fn grid_shows_dash_for_empty_cells() {
        let mut session = session();
        let column = session.column(0).unwrap();
        session.apply_edit(&CategoryId::from("rent"), &column, "150000");

        let grid = render_grid(&session, &MoneyFormat::default());
        let rent_line = grid
            .lines()
            .find(|line| line.trim_start().starts_with("Rent"))
            .expect("rent row");
        assert!(rent_line.contains("$150,000"));
        assert!(grid.contains("Living total"));
        assert!(grid.lines().next().unwrap().contains("Jan"));
        assert!(grid.contains('—'));
    }

    #[test]
    fn summary_lists_shares() {
        let mut session = session();
        session.set_view_mode(ViewMode::Monthly);
        let column = session.column(0).unwrap();
        session.apply_edit(&CategoryId::from("salary"), &column, "300000");
        session.apply_edit(&CategoryId::from("retirement"), &column, "50000");
        session.apply_edit(&CategoryId::from("rent"), &column, "150000");
        session.apply_edit(&CategoryId::from("travel"), &column, "50000");

        let summary = render_summary(&session, &column, &MoneyFormat::default());
        assert!(summary.contains("60%"));
        assert!(summary.contains("$50,000"));
        assert!(summary.contains("$250,000"));
    }
}
