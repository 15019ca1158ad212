use crate::config::SheetLayout;
use crate::errors::TrackerError;
use crate::gateway::SheetGateway;
use crate::status::{Status, User};
use crate::table::TrackerTable;
use std::sync::Arc;
use tracing::{error, info};

/// Result of one click: the table with the cell advanced, and whether the
/// write-back succeeded. A failed save leaves `table` ahead of the sheet
/// until the next load.
#[derive(Debug)]
pub struct Toggle {
    pub table: TrackerTable,
    pub status: Status,
    pub saved: Result<(), TrackerError>,
}

#[derive(Clone)]
pub struct Tracker {
    gateway: Arc<dyn SheetGateway>,
    layout: SheetLayout,
}

impl Tracker {
    pub fn new(gateway: Arc<dyn SheetGateway>, layout: SheetLayout) -> Self {
        Self { gateway, layout }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Reads the whole table from the sheet. Never served from a cache.
    pub async fn load(&self) -> Result<TrackerTable, TrackerError> {
        let sheet = self
            .gateway
            .read(&self.layout.worksheet, &self.layout.columns())
            .await?;
        TrackerTable::from_worksheet(&sheet, &self.layout)
    }

    /// Writes all twelve rows back, including untouched raw values.
    pub async fn save(&self, table: &TrackerTable) -> Result<(), TrackerError> {
        self.gateway
            .write(&self.layout.worksheet, &table.to_worksheet(&self.layout))
            .await
    }

    /// Advances one cell and rewrites the full table.
    ///
    /// Only an out-of-range row fails outright. A save failure is reported in
    /// [`Toggle::saved`] and the in-memory change is kept.
    pub async fn toggle(
        &self,
        table: TrackerTable,
        row: usize,
        user: User,
    ) -> Result<Toggle, TrackerError> {
        let (table, status) = table.update_cell(row, user)?;
        let saved = self.save(&table).await;
        match &saved {
            Ok(()) => info!(row, %user, %status, "cell updated"),
            Err(err) => error!(row, %user, %status, "cell updated but not saved: {err}"),
        }
        Ok(Toggle {
            table,
            status,
            saved,
        })
    }
}
