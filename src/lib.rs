pub mod app;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod scoring;
pub mod state;
pub mod status;
pub mod storage;
pub mod table;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::{Settings, SheetLayout};
pub use errors::{AppError, TrackerError};
pub use gateway::{MemoryGateway, SheetGateway, Worksheet};
pub use state::AppState;
pub use status::{Status, User};
pub use storage::JsonSheetStore;
pub use table::TrackerTable;
pub use tracker::Tracker;
