use cstats_core::DisplayRow;

const HEADERS: [&str; 8] = [
    "#",
    "Name",
    "Price",
    "1h %",
    "24h %",
    "Market Cap",
    "Symbol",
    "Total Supply",
];

/// Per-column width caps so one long name cannot blow out the table.
const MAX_WIDTHS: [usize; 8] = [5, 24, 16, 10, 10, 12, 8, 24];

pub struct TableFormatter {
    widths: [usize; 8],
}

impl TableFormatter {
    pub fn new(rows: &[DisplayRow]) -> Self {
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(cells(row)) {
                *width = (*width).max(cell.chars().count());
            }
        }
        for (width, max) in widths.iter_mut().zip(MAX_WIDTHS) {
            *width = (*width).min(max);
        }

        Self { widths }
    }

    pub fn print_table(&self, rows: &[DisplayRow]) {
        for line in self.render(rows) {
            println!("{}", line);
        }
    }

    pub fn render(&self, rows: &[DisplayRow]) -> Vec<String> {
        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.line(HEADERS.map(String::from)));
        lines.push(self.border('├', '┼', '┤'));
        for row in rows {
            lines.push(self.line(cells(row)));
        }
        lines.push(self.border('└', '┴', '┘'));
        lines
    }

    fn line(&self, cells: [String; 8]) -> String {
        let body: Vec<String> = cells
            .iter()
            .zip(self.widths)
            .map(|(cell, width)| truncate(cell, width))
            .collect();
        format!("│ {} │", body.join(" │ "))
    }

    fn border(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        let middle = middle.to_string();
        format!("{}{}{}", left, segments.join(middle.as_str()), right)
    }
}

fn cells(row: &DisplayRow) -> [String; 8] {
    [
        row.rank.to_string(),
        row.name.clone(),
        row.price.clone(),
        row.hour_change.clone(),
        row.day_change.clone(),
        row.market_cap.clone(),
        row.symbol.clone(),
        row.total_supply.clone(),
    ]
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) so the change markers and
/// currency signs are measured correctly.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
