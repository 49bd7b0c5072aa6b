//! Minimal fixed-width table rendering for terminal output.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Table {
    title: String,
    headers: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column(mut self, name: impl Into<String>, align: Align) -> Self {
        self.headers.push((name.into(), align));
        self
    }

    /// Missing cells render empty; extra cells are dropped.
    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

fn write_row(
    f: &mut fmt::Formatter<'_>,
    cells: &[&str],
    headers: &[(String, Align)],
    widths: &[usize],
) -> fmt::Result {
    let line = headers
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, ((_, align), &width))| {
            let cell = cells.get(i).copied().unwrap_or("");
            match align {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

        writeln!(f, "{:^total$}", self.title)?;
        let names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        write_row(f, &names, &self.headers, &widths)?;
        writeln!(f, "{}", "-".repeat(total))?;
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            write_row(f, &cells, &self.headers, &widths)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new("Monitors")
            .column("#", Align::Right)
            .column("Model", Align::Left);
        table.add_row(vec!["1".to_string(), "VZ249".to_string()]);
        table.add_row(vec!["12".to_string(), "U2720Q".to_string()]);

        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0].trim(), "Monitors");
        assert_eq!(lines[1], " #  Model");
        assert_eq!(lines[2], "----------");
        assert_eq!(lines[3], " 1  VZ249");
        assert_eq!(lines[4], "12  U2720Q");
    }

    #[test]
    fn test_render_short_row() {
        let mut table = Table::new("T")
            .column("A", Align::Left)
            .column("Serial", Align::Left);
        table.add_row(vec!["x".to_string()]);

        let rendered = table.to_string();
        assert_eq!(rendered.lines().last(), Some("x"));
    }
}
