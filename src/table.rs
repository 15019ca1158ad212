use crate::config::SheetLayout;
use crate::errors::TrackerError;
use crate::gateway::Worksheet;
use crate::status::{Status, User};

pub const MONTHS: usize = 12;

/// Labels used when seeding a fresh sheet.
pub const MONTH_LABELS: [&str; MONTHS] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// A stored cell. Keeps the raw value from the sheet; the status is derived
/// from it on demand, so untouched cells are written back exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    raw: String,
}

impl Cell {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn status(&self) -> Status {
        Status::normalize(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRow {
    pub month: String,
    user_a: Cell,
    user_b: Cell,
}

impl MonthRow {
    pub fn new(month: impl Into<String>, user_a: Cell, user_b: Cell) -> Self {
        Self {
            month: month.into(),
            user_a,
            user_b,
        }
    }

    pub fn cell(&self, user: User) -> &Cell {
        match user {
            User::A => &self.user_a,
            User::B => &self.user_b,
        }
    }

    pub fn status(&self, user: User) -> Status {
        self.cell(user).status()
    }

    fn cell_mut(&mut self, user: User) -> &mut Cell {
        match user {
            User::A => &mut self.user_a,
            User::B => &mut self.user_b,
        }
    }
}

/// The twelve month rows of one tracker year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerTable {
    rows: Vec<MonthRow>,
}

impl TrackerTable {
    pub fn from_rows(rows: Vec<MonthRow>) -> Result<Self, TrackerError> {
        if rows.len() != MONTHS {
            return Err(TrackerError::RowCount {
                expected: MONTHS,
                found: rows.len(),
            });
        }
        Ok(Self { rows })
    }

    /// A fresh year with every month pending.
    pub fn blank() -> Self {
        let pending = || Cell::new(Status::Pending.as_str());
        let rows = MONTH_LABELS
            .iter()
            .map(|month| MonthRow::new(*month, pending(), pending()))
            .collect();
        Self { rows }
    }

    /// Builds the table from any worksheet that carries the layout's month,
    /// user A and user B columns.
    pub fn from_worksheet(sheet: &Worksheet, layout: &SheetLayout) -> Result<Self, TrackerError> {
        let sheet = sheet.select(&layout.columns())?;
        let rows = sheet
            .rows
            .into_iter()
            .map(|row| {
                let mut cells = row.into_iter();
                let month = cells.next().unwrap_or_default();
                let user_a = Cell::new(cells.next().unwrap_or_default());
                let user_b = Cell::new(cells.next().unwrap_or_default());
                MonthRow::new(month, user_a, user_b)
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Full worksheet for writing back: every row, raw values included.
    pub fn to_worksheet(&self, layout: &SheetLayout) -> Worksheet {
        Worksheet {
            columns: layout.columns().to_vec(),
            rows: self
                .rows
                .iter()
                .map(|row| {
                    vec![
                        row.month.clone(),
                        row.user_a.raw.clone(),
                        row.user_b.raw.clone(),
                    ]
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    pub fn status(&self, row: usize, user: User) -> Option<Status> {
        self.rows.get(row).map(|r| r.status(user))
    }

    /// Advances one cell through the status cycle and returns the table with
    /// the new value. The raw value is normalized before cycling, so an
    /// unrecognised value always becomes `Done`.
    pub fn update_cell(mut self, row: usize, user: User) -> Result<(Self, Status), TrackerError> {
        let cell = self
            .rows
            .get_mut(row)
            .ok_or(TrackerError::RowOutOfRange(row))?
            .cell_mut(user);
        let next = cell.status().next();
        *cell = Cell::new(next.as_str());
        Ok((self, next))
    }
}
