use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::DataError;
use super::table::Table;
use super::transform;

/// Canonical tabular extension, the only one the store accepts or writes.
pub const CSV_EXT: &str = "csv";

/// Marker appended to save names derived from an unedited stem.
pub const EDITED_MARKER: &str = " (Edited)";

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// One named dataset: the backing table plus where it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Store key, derived from the source file stem.
    pub name: String,
    pub table: Table,
    /// Directory of the source file; default target for quick saves.
    pub source_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// DatasetStore
// ---------------------------------------------------------------------------

/// In-memory store of named datasets with one active dataset.
///
/// Datasets are created on load, replaced wholesale on re-load under the same
/// name and live for the process lifetime. The store provides no locking;
/// callers serialize load/transform/save.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: HashMap<String, Dataset>,
    active: Option<String>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV file as-is and make it the active dataset.
    pub fn load_raw(&mut self, path: &Path) -> Result<&Dataset, DataError> {
        let (dir, stem) = split_source_path(path)?;
        let table = Table::read_csv(path)?;
        Ok(self.register(stem, table, dir))
    }

    /// Load a latest-run-first export, reshape it to the canonical layout,
    /// round-trip the result through `"<stem> (Edited).csv"` next to the
    /// source, and make the reloaded table the active dataset.
    pub fn load_and_transform(&mut self, path: &Path) -> Result<&Dataset, DataError> {
        let (dir, stem) = split_source_path(path)?;
        let raw = Table::read_csv(path)?;
        let reshaped = transform::reshape_table(&raw)?;

        let edited = dir.join(format!("{stem}{EDITED_MARKER}.{CSV_EXT}"));
        reshaped.write_csv(&edited)?;
        let table = Table::read_csv(&edited)?;
        log::info!("reshaped {} -> {}", path.display(), edited.display());
        Ok(self.register(stem, table, dir))
    }

    fn register(&mut self, name: String, table: Table, source_dir: PathBuf) -> &Dataset {
        use std::collections::hash_map::Entry;

        self.active = Some(name.clone());
        let dataset = Dataset {
            name: name.clone(),
            table,
            source_dir,
        };
        match self.datasets.entry(name) {
            Entry::Occupied(mut entry) => {
                entry.insert(dataset);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(dataset),
        }
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Result<&Dataset, DataError> {
        self.datasets
            .get(name)
            .ok_or_else(|| DataError::not_found(format!("no dataset named '{name}'")))
    }

    /// The active dataset, or a not-found error when nothing is loaded yet.
    pub fn active(&self) -> Result<&Dataset, DataError> {
        let name = self
            .active
            .as_deref()
            .ok_or_else(|| DataError::not_found("no dataset loaded"))?;
        self.get(name)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Serialize the active dataset's table.
    ///
    /// Empty `dir` → the dataset's source directory. Empty `name` → the
    /// dataset stem with ` (Edited)` appended unless the stem already carries
    /// the marker. Any extension typed into `name` is stripped; the target is
    /// always `dir/name.csv`. Returns the resolved path.
    pub fn save(&self, dir: &str, name: &str) -> Result<PathBuf, DataError> {
        let dataset = self.active()?;

        let dir: PathBuf = if dir.is_empty() {
            dataset.source_dir.clone()
        } else {
            PathBuf::from(dir)
        };

        let mut name = if name.is_empty() {
            if dataset.name.contains(EDITED_MARKER) {
                dataset.name.clone()
            } else {
                format!("{}{}", dataset.name, EDITED_MARKER)
            }
        } else {
            name.to_string()
        };
        if let Some(dot) = name.find('.') {
            name.truncate(dot);
        }

        let target = dir.join(format!("{name}.{CSV_EXT}"));
        dataset.table.write_csv(&target)?;
        log::info!("saved dataset '{}' to {}", dataset.name, target.display());
        Ok(target)
    }

    /// Column whose header cell equals `label` exactly, header cell included.
    pub fn column_by_header(&self, label: &str) -> Result<Vec<String>, DataError> {
        let table = &self.active()?.table;
        let idx = table
            .header()
            .iter()
            .position(|h| h == label)
            .ok_or_else(|| DataError::not_found(format!("no column named '{label}'")))?;
        self.column_by_index(idx)
    }

    /// Column at `idx`, header cell included. Out of range is not-found.
    pub fn column_by_index(&self, idx: usize) -> Result<Vec<String>, DataError> {
        let table = &self.active()?.table;
        if idx >= table.col_count() {
            return Err(DataError::not_found(format!("no column at index {idx}")));
        }
        table.ensure_rectangular()?;
        Ok(table.rows().iter().map(|row| row[idx].clone()).collect())
    }

    /// Row whose column-0 cell equals `key`.
    ///
    /// The canonical column is scanned fresh on every call; nothing is
    /// accumulated across lookups.
    pub fn row_by_key(&self, key: &str) -> Result<&[String], DataError> {
        let table = &self.active()?.table;
        table
            .rows()
            .iter()
            .find(|row| row.first().is_some_and(|cell| cell == key))
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::not_found(format!("no row with key '{key}'")))
    }
}

/// Split a source path into (directory, stem), rejecting non-CSV extensions.
fn split_source_path(path: &Path) -> Result<(PathBuf, String), DataError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| DataError::format(format!("no file name in '{}'", path.display())))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ext.eq_ignore_ascii_case(CSV_EXT) {
        return Err(DataError::format(format!(
            "file is not a csv: '{stem}' at {}",
            path.display()
        )));
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    Ok((dir, stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    const RUNS_CSV: &str = "\
Wavelength:Wavelength (nm),Run 1:Intensity,Run 2:Intensity
400,0.10,0.20
401,0.11,0.21
402,0.12,0.22
";

    #[test]
    fn load_raw_registers_and_activates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "scan.csv", RUNS_CSV);

        let mut store = DatasetStore::new();
        store.load_raw(&path).unwrap();

        assert_eq!(store.active_name(), Some("scan"));
        let ds = store.get("scan").unwrap();
        assert_eq!(ds.table.row_count(), 4);
        assert_eq!(ds.source_dir, dir.path());
    }

    #[test]
    fn wrong_extension_is_a_format_error() {
        let mut store = DatasetStore::new();
        let err = store.load_raw(Path::new("scan.txt")).unwrap_err();
        assert!(matches!(err, DataError::Format(_)), "got {err:?}");
    }

    #[test]
    fn queries_before_any_load_are_not_found() {
        let store = DatasetStore::new();
        assert!(matches!(store.active(), Err(DataError::NotFound(_))));
        assert!(matches!(store.row_by_key("400"), Err(DataError::NotFound(_))));
        assert!(matches!(store.column_by_index(0), Err(DataError::NotFound(_))));
    }

    #[test]
    fn unknown_dataset_name_is_not_found() {
        let store = DatasetStore::new();
        let err = store.get("nope").unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)));
    }

    #[test]
    fn row_by_key_finds_every_present_key_and_rejects_absent_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "scan.csv", RUNS_CSV);
        let mut store = DatasetStore::new();
        store.load_raw(&path).unwrap();

        for key in ["400", "401", "402"] {
            let row = store.row_by_key(key).unwrap();
            assert_eq!(row[0], key);
        }
        // Repeated lookups stay duplicate-free: the index is rebuilt per call.
        let row = store.row_by_key("401").unwrap();
        assert_eq!(row.len(), 3);

        let err = store.row_by_key("999").unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)));
    }

    #[test]
    fn column_lookup_by_header_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "scan.csv", RUNS_CSV);
        let mut store = DatasetStore::new();
        store.load_raw(&path).unwrap();

        let col = store.column_by_header("Run 1:Intensity").unwrap();
        assert_eq!(col, vec!["Run 1:Intensity", "0.10", "0.11", "0.12"]);

        let col = store.column_by_index(0).unwrap();
        assert_eq!(col[0], "Wavelength:Wavelength (nm)");
        assert_eq!(&col[1..], ["400", "401", "402"]);

        assert!(matches!(
            store.column_by_header("missing"),
            Err(DataError::NotFound(_))
        ));
        assert!(matches!(
            store.column_by_index(9),
            Err(DataError::NotFound(_))
        ));
    }

    #[test]
    fn save_round_trip_is_cell_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "scan.csv", RUNS_CSV);
        let mut store = DatasetStore::new();
        store.load_raw(&path).unwrap();
        let original = store.active().unwrap().table.clone();

        let saved = store.save("", "").unwrap();
        assert_eq!(saved, dir.path().join("scan (Edited).csv"));

        let mut reload = DatasetStore::new();
        reload.load_raw(&saved).unwrap();
        assert_eq!(reload.active().unwrap().table, original);
    }

    #[test]
    fn save_name_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "scan (Edited).csv", RUNS_CSV);
        let mut store = DatasetStore::new();
        store.load_raw(&path).unwrap();

        // Already-edited stem does not pick up a second marker.
        let saved = store.save("", "").unwrap();
        assert_eq!(saved, dir.path().join("scan (Edited).csv"));

        // Explicit names are used verbatim, extension re-normalized.
        let saved = store.save("", "output.txt").unwrap();
        assert_eq!(saved, dir.path().join("output.csv"));

        // Explicit directory wins over the source directory.
        let other = tempfile::tempdir().unwrap();
        let saved = store
            .save(other.path().to_str().unwrap(), "copy")
            .unwrap();
        assert_eq!(saved, other.path().join("copy.csv"));
        assert!(saved.exists());
    }

    #[test]
    fn save_into_missing_directory_is_an_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "scan.csv", RUNS_CSV);
        let mut store = DatasetStore::new();
        store.load_raw(&path).unwrap();

        let err = store.save("/no/such/dir", "out").unwrap_err();
        assert!(matches!(err, DataError::Access { .. }), "got {err:?}");
    }

    #[test]
    fn load_and_transform_round_trips_through_the_edited_file() {
        let dir = tempfile::tempdir().unwrap();
        let wide = "\
Wavelength:Wavelength (nm),Run 3:Intensity,Wavelength,Run 1:Intensity,Wavelength,Run 2:Intensity
400,0.30,400,0.10,400,0.20
401,0.31,401,0.11,401,0.21
";
        let path = write_csv(dir.path(), "export.csv", wide);
        let mut store = DatasetStore::new();
        store.load_and_transform(&path).unwrap();

        let edited = dir.path().join("export (Edited).csv");
        assert!(edited.exists(), "reshaped table is written beside the source");

        let ds = store.active().unwrap();
        assert_eq!(ds.name, "export");
        assert_eq!(
            ds.table.rows()[0],
            vec![
                "Wavelength:Wavelength (nm)",
                "Run 1:Intensity",
                "Run 2:Intensity",
                "Run 3:Intensity"
            ]
        );
        assert_eq!(ds.table.rows()[1], vec!["400", "0.10", "0.20", "0.30"]);
    }

    #[test]
    fn reload_under_the_same_name_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "scan.csv", RUNS_CSV);
        let mut store = DatasetStore::new();
        store.load_raw(&path).unwrap();

        write_csv(dir.path(), "scan.csv", "Wavelength:nm,Run 1:Int\n500,1.0\n");
        store.load_raw(&path).unwrap();
        assert_eq!(store.active().unwrap().table.row_count(), 2);
    }
}
