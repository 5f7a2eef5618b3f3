use super::persistence::PersistenceError;
use crate::domain::History;
use std::path::Path;

pub struct CsvExporter;

impl CsvExporter {
    /// Writes the history newest first with an `expression,result` header.
    ///
    /// Returns the file name on success so the caller can report it.
    pub fn export_history(history: &History, filename: &str) -> Result<String, PersistenceError> {
        let mut writer = csv::Writer::from_path(Path::new(filename))?;
        writer.write_record(["expression", "result"])?;
        for entry in history.list() {
            writer.write_record([entry.expression(), entry.result()])?;
        }
        writer.flush()?;
        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_export_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let filename = path.to_str().unwrap();

        let mut history = History::default();
        history.record("1+2", "3");
        history.record("7/2", "3.5");

        let written = CsvExporter::export_history(&history, filename).unwrap();
        assert_eq!(written, filename);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "expression,result\n7/2,3.5\n1+2,3\n");
    }

    #[test]
    fn test_export_empty_history_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        CsvExporter::export_history(&History::default(), path.to_str().unwrap()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "expression,result\n");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("history.csv");

        assert!(CsvExporter::export_history(&History::default(), path.to_str().unwrap()).is_err());
    }
}
