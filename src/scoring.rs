use crate::config::SheetLayout;
use crate::status::{Status, User};
use crate::table::{TrackerTable, MONTHS};
use serde::Serialize;

/// Number of months `user` has marked as done.
pub fn score(table: &TrackerTable, user: User) -> u8 {
    count(table, user, Status::Done)
}

fn count(table: &TrackerTable, user: User, status: Status) -> u8 {
    table
        .rows()
        .iter()
        .filter(|row| row.status(user) == status)
        .count() as u8
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserScore {
    pub user: User,
    pub label: String,
    pub done: u8,
    pub failed: u8,
    pub pending: u8,
    pub total: u8,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    pub user_a: UserScore,
    pub user_b: UserScore,
}

pub fn build_scoreboard(table: &TrackerTable, layout: &SheetLayout) -> Scoreboard {
    Scoreboard {
        user_a: user_score(table, User::A, &layout.user_a.label),
        user_b: user_score(table, User::B, &layout.user_b.label),
    }
}

fn user_score(table: &TrackerTable, user: User, label: &str) -> UserScore {
    let done = score(table, user);
    UserScore {
        user,
        label: label.to_string(),
        done,
        failed: count(table, user, Status::Failed),
        pending: count(table, user, Status::Pending),
        total: MONTHS as u8,
        percent: f64::from(done) * 100.0 / MONTHS as f64,
    }
}
