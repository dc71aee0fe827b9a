use super::error::DataError;
use super::table::Table;

// ---------------------------------------------------------------------------
// Transform engine: latest-run-first export → canonical layout
// ---------------------------------------------------------------------------
//
// The instrument exports rows as
//
//   [key, value_latest, dup_key_2, value_2, dup_key_3, value_3, ...]
//
// where position 0 is the canonical key, position 1 is the most recent run's
// value and every later pair repeats the key before its value. The canonical
// layout keeps one key column and the run values in chronological order:
//
//   [key, value_2, value_3, ..., value_latest]
//
// Duplicate-key columns are dropped without checking them against the
// canonical key; the engine trusts the export layout.

/// Reshape one row. The row must have an even length of at least 2.
pub fn reshape_row(input: &[String]) -> Result<Vec<String>, DataError> {
    if input.len() < 2 || input.len() % 2 != 0 {
        return Err(DataError::format(format!(
            "row has {} cells, expected an even count of at least 2",
            input.len()
        )));
    }

    let mut out = Vec::with_capacity(1 + input.len() / 2);
    out.push(input[0].clone());
    let mut i = 3;
    while i < input.len() {
        out.push(input[i].clone());
        i += 2;
    }
    out.push(input[1].clone());
    Ok(out)
}

/// Reshape every row of a table, the header included.
pub fn reshape_table(table: &Table) -> Result<Table, DataError> {
    table.ensure_rectangular()?;
    let rows = table
        .rows()
        .iter()
        .map(|row| reshape_row(row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Table::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reshape_moves_latest_value_to_the_end() {
        let out = reshape_row(&row(&["10", "99", "10", "88"])).unwrap();
        assert_eq!(out, row(&["10", "88", "99"]));
    }

    #[test]
    fn reshape_keeps_older_runs_in_order() {
        let out = reshape_row(&row(&["W", "V1", "Wd2", "V2", "Wd3", "V3"])).unwrap();
        assert_eq!(out, row(&["W", "V2", "V3", "V1"]));
    }

    #[test]
    fn reshape_output_shape_properties() {
        // For even L >= 4: len == 1 + L/2, out[0] == in[0], out[last] == in[1],
        // middle == odd inputs from index 3 up.
        let input = row(&["k", "v9", "k", "v2", "k", "v3", "k", "v4"]);
        let out = reshape_row(&input).unwrap();
        assert_eq!(out.len(), 1 + input.len() / 2);
        assert_eq!(out[0], input[0]);
        assert_eq!(*out.last().unwrap(), input[1]);
        assert_eq!(&out[1..out.len() - 1], &row(&["v2", "v3", "v4"])[..]);
    }

    #[test]
    fn odd_width_row_is_a_format_error() {
        let err = reshape_row(&row(&["a", "b", "c"])).unwrap_err();
        assert!(matches!(err, DataError::Format(_)));
    }

    #[test]
    fn ragged_table_fails_before_reshaping() {
        let t = Table::new(vec![row(&["a", "b", "c", "d"]), row(&["1", "2"])]);
        let err = reshape_table(&t).unwrap_err();
        assert!(matches!(err, DataError::Format(_)));
    }

    #[test]
    fn header_row_is_reshaped_like_data_rows() {
        let t = Table::new(vec![
            row(&["Wavelength:nm", "Run 3:Int", "Wavelength", "Run 1:Int"]),
            row(&["400", "0.9", "400", "0.1"]),
        ]);
        let out = reshape_table(&t).unwrap();
        assert_eq!(out.rows()[0], row(&["Wavelength:nm", "Run 1:Int", "Run 3:Int"]));
        assert_eq!(out.rows()[1], row(&["400", "0.1", "0.9"]));
    }
}
