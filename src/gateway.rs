use crate::errors::TrackerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

/// A rectangular block of cells with named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Worksheet {
    /// Restricts the sheet to `columns`, in that order. Short rows read as empty cells.
    pub fn select(&self, columns: &[String]) -> Result<Worksheet, TrackerError> {
        let mut indices = Vec::with_capacity(columns.len());
        let mut missing = Vec::new();
        for name in columns {
            match self.columns.iter().position(|c| c == name) {
                Some(idx) => indices.push(idx),
                None => missing.push(name.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(TrackerError::MissingColumns(missing));
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&idx| row.get(idx).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Worksheet {
            columns: columns.to_vec(),
            rows,
        })
    }
}

/// Read/write access to the workbook backing the tracker.
///
/// Reads always go to the backend; nothing is cached between calls. Writes
/// replace the whole worksheet, and two writers racing each other resolve as
/// last-writer-wins.
#[async_trait]
pub trait SheetGateway: Send + Sync {
    async fn read(&self, worksheet: &str, columns: &[String]) -> Result<Worksheet, TrackerError>;

    async fn write(&self, worksheet: &str, data: &Worksheet) -> Result<(), TrackerError>;
}

/// Workbook held in process memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    sheets: Mutex<BTreeMap<String, Worksheet>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(name: impl Into<String>, sheet: Worksheet) -> Self {
        let gateway = Self::new();
        gateway.put(name, sheet);
        gateway
    }

    pub fn put(&self, name: impl Into<String>, sheet: Worksheet) {
        self.lock().insert(name.into(), sheet);
    }

    pub fn get(&self, name: &str) -> Option<Worksheet> {
        self.lock().get(name).cloned()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Worksheet>> {
        // every mutation is a single insert, so a poisoned map is still consistent
        self.sheets.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SheetGateway for MemoryGateway {
    async fn read(&self, worksheet: &str, columns: &[String]) -> Result<Worksheet, TrackerError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TrackerError::Connection("memory sheet is offline".into()));
        }
        let sheets = self.lock();
        let sheet = sheets
            .get(worksheet)
            .ok_or_else(|| TrackerError::MissingWorksheet(worksheet.to_string()))?;
        sheet.select(columns)
    }

    async fn write(&self, worksheet: &str, data: &Worksheet) -> Result<(), TrackerError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::Persistence("memory sheet rejected the write".into()));
        }
        self.lock().insert(worksheet.to_string(), data.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_reorders_and_pads_short_rows() {
        let sheet = Worksheet {
            columns: names(&["B", "Extra", "A"]),
            rows: vec![names(&["b1", "x", "a1"]), names(&["b2"])],
        };
        let selected = sheet.select(&names(&["A", "B"])).unwrap();
        assert_eq!(selected.columns, names(&["A", "B"]));
        assert_eq!(selected.rows, vec![names(&["a1", "b1"]), names(&["", "b2"])]);
    }

    #[test]
    fn select_reports_every_missing_column() {
        let sheet = Worksheet {
            columns: names(&["Mes"]),
            rows: vec![],
        };
        let err = sheet.select(&names(&["Mes", "UsuarioA", "UsuarioB"])).unwrap_err();
        match err {
            TrackerError::MissingColumns(missing) => {
                assert_eq!(missing, names(&["UsuarioA", "UsuarioB"]))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn memory_gateway_write_then_read() {
        let gateway = MemoryGateway::new();
        let sheet = Worksheet {
            columns: names(&["Mes", "A"]),
            rows: vec![names(&["Enero", "done"])],
        };
        gateway.write("Hoja 1", &sheet).await.unwrap();
        let read = gateway.read("Hoja 1", &names(&["Mes", "A"])).await.unwrap();
        assert_eq!(read, sheet);
        assert_eq!(gateway.write_count(), 1);
    }

    #[tokio::test]
    async fn memory_gateway_failure_injection() {
        let gateway = MemoryGateway::with_sheet("Hoja 1", Worksheet::default());
        gateway.set_fail_writes(true);
        let err = gateway.write("Hoja 1", &Worksheet::default()).await.unwrap_err();
        assert!(matches!(err, TrackerError::Persistence(_)));
        assert_eq!(gateway.write_count(), 0);

        gateway.set_fail_reads(true);
        let err = gateway.read("Hoja 1", &[]).await.unwrap_err();
        assert!(matches!(err, TrackerError::Connection(_)));
    }

    #[tokio::test]
    async fn memory_gateway_missing_worksheet() {
        let gateway = MemoryGateway::new();
        let err = gateway.read("Nope", &[]).await.unwrap_err();
        assert!(matches!(err, TrackerError::MissingWorksheet(name) if name == "Nope"));
    }
}
