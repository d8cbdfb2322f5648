//! Minimal column layout for transaction listings. Cells are plain text;
//! overlong cells are truncated with an ellipsis.

/// Describes how a column aligns its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Configuration for a single rendered column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn new(header: &'static str, alignment: Alignment) -> Self {
        Self {
            header,
            max_width: None,
            alignment,
        }
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// A table with column metadata and rows of data to render.
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = column.header.chars().count();
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(cell.chars().count());
                    }
                }
                if let Some(max_width) = column.max_width {
                    width = width.min(max_width);
                }
                width
            })
            .collect()
    }

    fn render_row(&self, row: &[&str], widths: &[usize]) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = row.get(idx).copied().unwrap_or("");
                render_cell(text, widths[idx], column.alignment)
            })
            .collect();
        cells.join("  ").trim_end().to_string()
    }

    /// Renders headers, a rule, and every row.
    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let mut out = String::new();

        let headers: Vec<&str> = self.columns.iter().map(|column| column.header).collect();
        out.push_str(&self.render_row(&headers, &widths));
        out.push('\n');
        out.push_str(&horizontal_rule(&widths));

        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push('\n');
            out.push_str(&self.render_row(&cells, &widths));
        }

        out
    }
}

fn truncate_text(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate_text(text, width);
    let remaining = width.saturating_sub(fitted.chars().count());

    match alignment {
        Alignment::Left => format!("{}{}", fitted, " ".repeat(remaining)),
        Alignment::Right => format!("{}{}", " ".repeat(remaining), fitted),
    }
}

fn horizontal_rule(widths: &[usize]) -> String {
    let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
    "-".repeat(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            vec![
                TableColumn::new("#", Alignment::Right),
                TableColumn::new("Category", Alignment::Left),
                TableColumn::new("Amount", Alignment::Right),
            ],
            vec![
                vec!["0".into(), "salary".into(), "1000.00".into()],
                vec!["12".into(), "rent".into(), "700.00".into()],
            ],
        )
    }

    #[test]
    fn columns_expand_to_widest_cell() {
        let rendered = sample_table().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], " #  Category   Amount");
        assert_eq!(lines[2], " 0  salary    1000.00");
        assert_eq!(lines[3], "12  rent       700.00");
    }

    #[test]
    fn long_cells_are_truncated_with_ellipsis() {
        let table = Table::new(
            vec![TableColumn::new("Description", Alignment::Left).with_max_width(8)],
            vec![vec!["a very long description".into()]],
        );
        let rendered = table.render();
        assert!(rendered.lines().last().unwrap().starts_with("a very "));
        assert!(rendered.contains('…'));
    }

    #[test]
    fn rule_spans_all_columns() {
        let rendered = sample_table().render();
        let rule = rendered.lines().nth(1).unwrap();
        let header = rendered.lines().next().unwrap();
        assert_eq!(rule.len(), header.len());
        assert!(rule.chars().all(|c| c == '-'));
    }
}
