use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use crate::domain::{GridLayout, GridStore, Projector, TimetableResult};

/// Writes timetable projections to disk and reads delimited exports back.
///
/// Exports are rendered completely in memory, written to a temporary file
/// next to the destination and renamed over it, so a failed export never
/// leaves a half-written file behind.
pub struct ExportRepository;

impl ExportRepository {
    /// Writes the tab-separated table, optionally titled. Returns the
    /// filename for the status line.
    pub fn export_text(store: &GridStore, filename: &str, with_title: bool) -> TimetableResult<String> {
        let document = Projector::render_text_document(store, with_title);
        write_atomically(Path::new(filename), document.as_bytes())?;
        tracing::info!(path = filename, cells = store.len(), "exported timetable text");
        Ok(filename.to_string())
    }

    pub fn export_csv(store: &GridStore, filename: &str) -> TimetableResult<String> {
        let document = Projector::render_csv(store)?;
        write_atomically(Path::new(filename), document.as_bytes())?;
        tracing::info!(path = filename, cells = store.len(), "exported timetable csv");
        Ok(filename.to_string())
    }

    /// Every record of a delimited file, header included.
    pub fn read_csv(filename: &str) -> TimetableResult<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(filename)?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    /// Rebuilds a timetable from a file written by [`export_csv`]. The file's
    /// days and slots must belong to `layout`.
    ///
    /// [`export_csv`]: ExportRepository::export_csv
    pub fn import_csv(layout: &GridLayout, filename: &str) -> TimetableResult<GridStore> {
        let rows = Self::read_csv(filename)?;
        let assignments = Projector::assignments_from_rows(layout, &rows)?;
        let mut store = GridStore::new(layout.clone());
        for (coord, label) in assignments {
            store.set_at(coord, label)?;
        }
        tracing::info!(path = filename, cells = store.len(), "imported timetable csv");
        Ok(store)
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> TimetableResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // The temp file would otherwise be owner-only; keep an existing target's
    // mode and give new files the usual 0644.
    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());
    let mut builder = tempfile::Builder::new();
    if let Some(perms) = existing.clone().or_else(new_file_permissions) {
        builder.permissions(perms);
    }
    let mut file = builder.tempfile_in(dir)?;
    if let Some(perms) = existing {
        file.as_file().set_permissions(perms)?;
    }
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> GridStore {
        let mut store =
            GridStore::new(GridLayout::new(["Mon", "Tue"], ["9-10", "10-11"]).unwrap());
        store.set("Mon", "9-10", "Math").unwrap();
        store
    }

    #[test]
    fn test_export_text_writes_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("week.txt");
        let filename = path.to_str().unwrap();

        let result = ExportRepository::export_text(&store(), filename, false).unwrap();
        assert_eq!(result, filename);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Time/Day\tMon\tTue\n9-10\tMath\t-\n10-11\t-\t-\n");
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("week.csv");
        std::fs::write(&path, "stale contents that are longer than the export\n".repeat(10)).unwrap();

        ExportRepository::export_csv(&store(), path.to_str().unwrap()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Time/Day,Mon,Tue\n9-10,Math,\n10-11,,\n");
    }

    #[test]
    fn test_failed_export_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("week.txt");

        let err = ExportRepository::export_text(&store(), path.to_str().unwrap(), true).unwrap_err();
        assert!(!err.is_validation());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_export_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        for mode in [0o644, 0o640] {
            let path = dir.path().join(format!("week-{mode:o}.txt"));
            std::fs::write(&path, "old\n").unwrap();
            std::fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();

            ExportRepository::export_text(&store(), path.to_str().unwrap(), false).unwrap();
            let meta = std::fs::metadata(&path).unwrap();
            assert_eq!(meta.permissions().mode() & 0o777, mode);
            assert!(std::fs::read_to_string(&path).unwrap().starts_with("Time/Day"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_new_export_is_not_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("week.csv");
        ExportRepository::export_csv(&store(), path.to_str().unwrap()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_ne!(mode, 0o600);
    }

    #[test]
    fn test_read_csv_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(ExportRepository::read_csv(path.to_str().unwrap()).is_err());
    }
}
