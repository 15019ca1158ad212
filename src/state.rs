use crate::tracker::Tracker;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub title: Arc<str>,
    pub tracker: Tracker,
    /// Held for the whole load/update/save cycle of one click.
    pub interaction: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(title: impl Into<Arc<str>>, tracker: Tracker) -> Self {
        Self {
            title: title.into(),
            tracker,
            interaction: Arc::new(Mutex::new(())),
        }
    }
}
