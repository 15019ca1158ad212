use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SHEET_PATH: &str = "data/tracker.json";

/// Which spreadsheet column belongs to a user, and how the page names them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserColumn {
    pub column: String,
    pub label: String,
}

/// Where the tracker lives inside the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub worksheet: String,
    pub month_column: String,
    pub user_a: UserColumn,
    pub user_b: UserColumn,
}

impl SheetLayout {
    /// Column identifiers in storage order: month, user A, user B.
    pub fn columns(&self) -> [String; 3] {
        [
            self.month_column.clone(),
            self.user_a.column.clone(),
            self.user_b.column.clone(),
        ]
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            worksheet: "Hoja 1".into(),
            month_column: "Mes".into(),
            user_a: UserColumn {
                column: "UsuarioA".into(),
                label: "Usuario A".into(),
            },
            user_b: UserColumn {
                column: "UsuarioB".into(),
                label: "Usuario B".into(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub sheet_path: PathBuf,
    pub title: String,
    pub layout: SheetLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            sheet_path: PathBuf::from(DEFAULT_SHEET_PATH),
            title: "Reto Anual: 1 Dulce al Mes".into(),
            layout: SheetLayout::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut settings = Settings::default();

        if let Some(port) = get("PORT").and_then(|value| value.parse::<u16>().ok()) {
            settings.port = port;
        }
        if let Some(path) = get("TRACKER_SHEET_PATH") {
            settings.sheet_path = PathBuf::from(path);
        }
        if let Some(title) = get("TRACKER_TITLE") {
            settings.title = title;
        }

        let layout = &mut settings.layout;
        if let Some(v) = get("TRACKER_WORKSHEET") {
            layout.worksheet = v;
        }
        if let Some(v) = get("TRACKER_MONTH_COLUMN") {
            layout.month_column = v;
        }
        if let Some(v) = get("TRACKER_USER_A_COLUMN") {
            layout.user_a.column = v;
        }
        if let Some(v) = get("TRACKER_USER_A_LABEL") {
            layout.user_a.label = v;
        }
        if let Some(v) = get("TRACKER_USER_B_COLUMN") {
            layout.user_b.column = v;
        }
        if let Some(v) = get("TRACKER_USER_B_LABEL") {
            layout.user_b.label = v;
        }

        settings
    }
}
