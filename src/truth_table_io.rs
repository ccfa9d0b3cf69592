use std::io;
use std::io::Write;

use crate::truth_table::{TruthTable, TruthTableEntry};

/// Renders a single cell; `compact` selects `T`/`F` over `True`/`False`.
pub fn render_entry(entry: &TruthTableEntry, compact: bool) -> String {
    if compact {
        entry.short().to_string()
    } else {
        entry.to_string()
    }
}

/// Renders the outcome of a single evaluation: `true`/`false`, or `T`/`F` when compact.
pub fn render_result(value: bool, compact: bool) -> String {
    if compact {
        TruthTableEntry::from_bool(value).short().to_string()
    } else {
        value.to_string()
    }
}

/// Printable view of a truth table, optionally restricted to the rows with a given result.
pub struct TruthTableWriter<'t> {
    table: &'t TruthTable,
    filter: Option<bool>,
    compact: bool,
}

impl<'t> TruthTableWriter<'t> {
    pub fn new(table: &'t TruthTable) -> Self {
        Self {
            table,
            filter: None,
            compact: false,
        }
    }

    /// Only keep rows for which the expression evaluates to `result`.
    pub fn filter(mut self, result: Option<bool>) -> Self {
        self.filter = result;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Header followed by the selected data rows.
    pub fn cells(&self) -> Vec<Vec<TruthTableEntry>> {
        let rows = self
            .table
            .rows
            .iter()
            .filter(|row| self.filter.is_none() || row.last().copied() == self.filter)
            .map(|row| row.iter().copied().map(TruthTableEntry::from_bool).collect());

        std::iter::once(self.table.header()).chain(rows).collect()
    }

    /// Writes the rows as `|`-separated columns, each padded to its widest cell.
    pub fn render_text<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let value_width = if self.compact { 1 } else { "False".len() };
        let widths: Vec<usize> = self
            .table
            .header()
            .iter()
            .map(|e| e.short().chars().count().max(value_width))
            .collect();

        for row in self.cells() {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(e, &width)| format!("{:<width$}", render_entry(e, self.compact)))
                .collect();
            writeln!(writer, "{}", line.join(" | ").trim_end())?;
        }

        Ok(())
    }

    pub fn render_csv<W: Write>(&self, writer: &mut W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for row in self.cells() {
            csv_writer.write_record(row.iter().map(|e| render_entry(e, self.compact)))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
