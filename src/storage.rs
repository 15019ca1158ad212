use crate::config::SheetLayout;
use crate::errors::TrackerError;
use crate::gateway::{SheetGateway, Worksheet};
use crate::table::TrackerTable;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{error, info};

/// On-disk workbook: named worksheets of loosely typed cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Workbook {
    #[serde(default)]
    worksheets: BTreeMap<String, StoredSheet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSheet {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

impl StoredSheet {
    fn to_worksheet(&self) -> Worksheet {
        Worksheet {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(cell_text).collect())
                .collect(),
        }
    }

    fn from_worksheet(sheet: &Worksheet) -> Self {
        Self {
            columns: sheet.columns.clone(),
            rows: sheet
                .rows
                .iter()
                .map(|row| row.iter().cloned().map(Value::String).collect())
                .collect(),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A JSON file standing in for the remote spreadsheet.
#[derive(Debug, Clone)]
pub struct JsonSheetStore {
    path: PathBuf,
}

impl JsonSheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the workbook with a blank year when the file does not exist.
    /// Returns whether a new file was written.
    pub async fn seed_if_missing(&self, layout: &SheetLayout) -> Result<bool, TrackerError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|err| TrackerError::Connection(err.to_string()))?;
        if exists {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(persistence)?;
        }

        let blank = TrackerTable::blank().to_worksheet(layout);
        let mut workbook = Workbook::default();
        workbook
            .worksheets
            .insert(layout.worksheet.clone(), StoredSheet::from_worksheet(&blank));
        persist_workbook(&self.path, &workbook).await?;

        info!(path = %self.path.display(), "seeded a blank tracker sheet");
        Ok(true)
    }
}

async fn load_workbook(path: &Path) -> Result<Workbook, TrackerError> {
    let bytes = fs::read(path).await.map_err(|err| {
        error!("failed to read tracker sheet {}: {err}", path.display());
        TrackerError::Connection(err.to_string())
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        error!("failed to parse tracker sheet {}: {err}", path.display());
        TrackerError::Connection(format!("malformed sheet file: {err}"))
    })
}

/// Replaces the file in one rename so readers never see a partial workbook.
async fn persist_workbook(path: &Path, workbook: &Workbook) -> Result<(), TrackerError> {
    let payload = serde_json::to_vec_pretty(workbook).map_err(persistence)?;
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || replace_file(&path, &payload))
        .await
        .map_err(persistence)?
}

fn replace_file(path: &Path, payload: &[u8]) -> Result<(), TrackerError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(persistence)?;
    tmp.write_all(payload).map_err(persistence)?;
    tmp.as_file().sync_all().map_err(persistence)?;
    tmp.persist(path).map_err(|err| persistence(err.error))?;
    Ok(())
}

fn persistence(err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Persistence(err.to_string())
}

#[async_trait]
impl SheetGateway for JsonSheetStore {
    async fn read(&self, worksheet: &str, columns: &[String]) -> Result<Worksheet, TrackerError> {
        let workbook = load_workbook(&self.path).await?;
        let sheet = workbook
            .worksheets
            .get(worksheet)
            .ok_or_else(|| TrackerError::MissingWorksheet(worksheet.to_string()))?;
        sheet.to_worksheet().select(columns)
    }

    async fn write(&self, worksheet: &str, data: &Worksheet) -> Result<(), TrackerError> {
        // other worksheets in the file are left alone
        let mut workbook = match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice::<Workbook>(&bytes)
                .map_err(|err| persistence(format!("malformed sheet file: {err}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Workbook::default(),
            Err(err) => return Err(persistence(err)),
        };
        workbook
            .worksheets
            .insert(worksheet.to_string(), StoredSheet::from_worksheet(data));
        persist_workbook(&self.path, &workbook).await
    }
}
