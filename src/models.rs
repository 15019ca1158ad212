use crate::scoring::Scoreboard;
use crate::status::{Status, User};
use crate::table::TrackerTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub row: usize,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct RowView {
    pub index: usize,
    pub month: String,
    pub user_a: Status,
    pub user_b: Status,
    pub icon_a: &'static str,
    pub icon_b: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub worksheet: String,
    pub rows: Vec<RowView>,
    pub scores: Scoreboard,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub row: usize,
    pub user: User,
    pub status: Status,
    pub icon: &'static str,
    pub scores: Scoreboard,
}

pub fn row_views(table: &TrackerTable) -> Vec<RowView> {
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let user_a = row.status(User::A);
            let user_b = row.status(User::B);
            RowView {
                index,
                month: row.month.clone(),
                user_a,
                user_b,
                icon_a: user_a.icon(),
                icon_b: user_b.icon(),
            }
        })
        .collect()
}
