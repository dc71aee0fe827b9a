use std::path::Path;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Table – a rectangular grid of string cells
// ---------------------------------------------------------------------------

/// A grid of string cells. Row 0 is the header row.
///
/// Cells stay as text until a chart builder parses them; the table itself
/// never interprets values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Table { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Header row (row 0). Empty slice for an empty table.
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// All rows after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.rows.is_empty() { &[] } else { &self.rows[1..] }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell count of the header row.
    pub fn col_count(&self) -> usize {
        self.header().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Verify every row has the same cell count as the header.
    ///
    /// Operations that index across rows call this first so a ragged export
    /// fails with a format error instead of an out-of-range panic.
    pub fn ensure_rectangular(&self) -> Result<(), DataError> {
        let expected = self.col_count();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(DataError::format(format!(
                    "table is not rectangular: row {i} has {} cells, expected {expected}",
                    row.len()
                )));
            }
        }
        Ok(())
    }

    /// Read a table from a CSV file. Rows are kept verbatim, ragged or not;
    /// callers that need a rectangular table check separately.
    pub fn read_csv(path: &Path) -> Result<Table, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| DataError::from_csv(path, e))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::from_csv(path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Table { rows })
    }

    /// Write the table to a CSV file. Not atomic: a mid-write failure can
    /// leave a truncated file behind.
    pub fn write_csv(&self, path: &Path) -> Result<(), DataError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| DataError::from_csv(path, e))?;

        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| DataError::from_csv(path, e))?;
        }
        writer
            .flush()
            .map_err(|e| DataError::access(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rectangular_table_passes_check() {
        let t = Table::new(vec![row(&["a", "b"]), row(&["1", "2"])]);
        assert!(t.ensure_rectangular().is_ok());
    }

    #[test]
    fn ragged_table_is_a_format_error() {
        let t = Table::new(vec![row(&["a", "b"]), row(&["1"])]);
        let err = t.ensure_rectangular().unwrap_err();
        assert!(matches!(err, DataError::Format(_)), "got {err:?}");
    }

    #[test]
    fn csv_round_trip_is_cell_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.csv");

        let t = Table::new(vec![
            row(&["Wavelength:nm", "Run 1:Intensity"]),
            row(&["400", "0.12"]),
            row(&["401", "0.13"]),
        ]);
        t.write_csv(&path).unwrap();
        let back = Table::read_csv(&path).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn reading_a_missing_file_is_an_access_error() {
        let err = Table::read_csv(Path::new("/no/such/dir/data.csv")).unwrap_err();
        assert!(matches!(err, DataError::Access { .. }), "got {err:?}");
    }
}
