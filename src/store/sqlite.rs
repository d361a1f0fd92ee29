//! SQLite-backed, read-only access to the `detections` table.
//! Used by: report, handlers, state.

use std::fmt;
use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, Row, Rows};

use crate::error::{Error, Result};

const DETECTIONS_QUERY: &str = "SELECT * FROM detections ORDER BY timestamp DESC";

/// Where the detection database lives. Connections are opened per request.
pub struct DetectionStore {
    path: PathBuf,
}

/// A connection owned by a single report request; closed on drop.
pub struct StoreConnection {
    conn: Connection,
}

/// One column value, rendered as its plain string conversion.
///
/// SQLite columns are dynamically typed, so a numeric column may hold text
/// written by an ingestion client. Nothing is coerced: NULL renders empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell(Value);

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRecord {
    pub id: Cell,
    pub timestamp: Cell,
    pub event: Cell,
    pub object: Cell,
    pub detected_count: Cell,
    pub total_bottle: Cell,
    pub total_notebook: Cell,
}

/// Single-pass cursor over the query result, in store order.
pub struct Detections<'stmt> {
    rows: Rows<'stmt>,
}

impl DetectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<StoreConnection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(Error::Connection)?;
        tracing::info!(path = %self.path.display(), "detection store connected");
        Ok(StoreConnection { conn })
    }
}

impl StoreConnection {
    /// Runs the detections query once and lends `f` the resulting cursor.
    pub fn with_detections<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(Detections<'_>) -> Result<T>,
    {
        let mut stmt = self.conn.prepare(DETECTIONS_QUERY).map_err(Error::Query)?;
        let rows = stmt.query([]).map_err(Error::Query)?;
        f(Detections { rows })
    }
}

impl Iterator for Detections<'_> {
    type Item = Result<DetectionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rows.next() {
            Ok(Some(row)) => Some(DetectionRecord::from_row(row).map_err(Error::Query)),
            Ok(None) => None,
            Err(e) => Some(Err(Error::Query(e))),
        }
    }
}

impl DetectionRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let cell = |name: &str| row.get::<_, Value>(name).map(Cell::from);
        Ok(Self {
            id: cell("id")?,
            timestamp: cell("timestamp")?,
            event: cell("event")?,
            object: cell("object")?,
            detected_count: cell("detected_count")?,
            total_bottle: cell("total_bottle")?,
            total_notebook: cell("total_notebook")?,
        })
    }

    /// Field values in display column order.
    pub fn cells(&self) -> [&Cell; 7] {
        [
            &self.id,
            &self.timestamp,
            &self.event,
            &self.object,
            &self.detected_count,
            &self.total_bottle,
            &self.total_notebook,
        ]
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{i}"),
            // Shortest round-trip form: 10.0 renders as "10", not SQLite's "10.0".
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
            Value::Blob(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn collect(store: &DetectionStore) -> Result<Vec<DetectionRecord>> {
        let conn = store.connect()?;
        conn.with_detections(|rows| rows.collect())
    }

    #[test]
    fn rows_come_back_newest_first() -> Result<()> {
        let fx = fixtures::empty();
        fx.insert("2024-01-01 09:00:00", "e1", "bottle", 1, 1, 0);
        fx.insert("2024-01-01 11:00:00", "e3", "bottle", 1, 3, 0);
        fx.insert("2024-01-01 10:00:00", "e2", "bottle", 1, 2, 0);

        let records = collect(&fx.store)?;
        let stamps: Vec<String> = records.iter().map(|r| r.timestamp.to_string()).collect();
        assert_eq!(
            stamps,
            ["2024-01-01 11:00:00", "2024-01-01 10:00:00", "2024-01-01 09:00:00"]
        );
        Ok(())
    }

    #[test]
    fn empty_table_yields_no_records() -> Result<()> {
        let fx = fixtures::empty();
        assert!(collect(&fx.store)?.is_empty());
        Ok(())
    }

    #[test]
    fn columns_are_read_by_name() -> Result<()> {
        let fx = fixtures::empty();
        fx.insert_with_id(5, "2024-01-01 10:00:00", "motion", "bottle", 2, 10, 3);

        let records = collect(&fx.store)?;
        let rendered: Vec<String> = records[0].cells().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            ["5", "2024-01-01 10:00:00", "motion", "bottle", "2", "10", "3"]
        );
        Ok(())
    }

    #[test]
    fn text_in_numeric_column_is_kept_verbatim() -> Result<()> {
        let fx = fixtures::empty();
        fx.insert("2024-01-01 10:00:00", "Total bottle(s): 3, Total notebook(s): 1", "bottle, notebook", "2, 1", 3, 1);

        let records = collect(&fx.store)?;
        assert_eq!(records[0].detected_count.to_string(), "2, 1");
        assert_eq!(records[0].object.to_string(), "bottle, notebook");
        Ok(())
    }

    #[test]
    fn null_renders_as_empty_string() -> Result<()> {
        let fx = fixtures::empty();
        fx.insert("2024-01-01 10:00:00", "motion", "bottle", rusqlite::types::Null, 0, 0);

        let records = collect(&fx.store)?;
        assert_eq!(records[0].detected_count.to_string(), "");
        Ok(())
    }

    #[test]
    fn real_and_blob_cells_render_as_strings() {
        assert_eq!(Cell::from(Value::Real(1.5)).to_string(), "1.5");
        assert_eq!(Cell::from(Value::Real(10.0)).to_string(), "10");
        assert_eq!(Cell::from(Value::Real(-0.25)).to_string(), "-0.25");
        assert_eq!(Cell::from(Value::Blob(b"raw".to_vec())).to_string(), "raw");
    }

    #[test]
    fn missing_database_is_a_connection_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = DetectionStore::new(dir.path().join("absent.db"));
        assert!(matches!(store.connect(), Err(Error::Connection(_))));
    }

    #[test]
    fn missing_table_is_a_query_failure() -> Result<()> {
        let fx = fixtures::without_table();
        let conn = fx.store.connect()?;
        let result = conn.with_detections(|rows| rows.collect::<Result<Vec<_>>>());
        assert!(matches!(result, Err(Error::Query(_))));
        Ok(())
    }

    #[test]
    fn connection_is_read_only() -> Result<()> {
        let fx = fixtures::empty();
        let conn = fx.store.connect()?;
        let write = conn.conn.execute("DELETE FROM detections", []);
        assert!(write.is_err());
        Ok(())
    }
}
