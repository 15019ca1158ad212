use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one (month, user) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Done,
    Failed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::Done, Status::Failed];

    /// Next state in the click cycle: pending -> done -> failed -> pending.
    pub fn next(self) -> Self {
        match self {
            Status::Pending => Status::Done,
            Status::Done => Status::Failed,
            Status::Failed => Status::Pending,
        }
    }

    /// Maps a raw stored value onto a status. Anything that is not one of the
    /// canonical tokens counts as pending.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "done" => Status::Done,
            "failed" => Status::Failed,
            _ => Status::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Done => "done",
            Status::Failed => "failed",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Status::Pending => "⏳",
            Status::Done => "🍩",
            Status::Failed => "❌",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two tracked people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum User {
    A,
    B,
}

impl User {
    pub const ALL: [User; 2] = [User::A, User::B];

    pub fn as_str(self) -> &'static str {
        match self {
            User::A => "a",
            User::B => "b",
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_steps_return_to_start() {
        for status in Status::ALL {
            assert_eq!(status.next().next().next(), status);
        }
    }

    #[test]
    fn cycle_order_is_fixed() {
        assert_eq!(Status::Pending.next(), Status::Done);
        assert_eq!(Status::Done.next(), Status::Failed);
        assert_eq!(Status::Failed.next(), Status::Pending);
    }

    #[test]
    fn malformed_values_normalize_to_pending() {
        for raw in ["", "xyz", "Done", " done", "null", "1"] {
            assert_eq!(Status::normalize(raw), Status::Pending, "raw {raw:?}");
            assert_eq!(Status::normalize(raw).next(), Status::Done);
        }
    }

    #[test]
    fn canonical_tokens_survive_normalization() {
        for status in Status::ALL {
            assert_eq!(Status::normalize(status.as_str()), status);
        }
    }

    #[test]
    fn user_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&User::A).unwrap(), "\"a\"");
        let user: User = serde_json::from_str("\"b\"").unwrap();
        assert_eq!(user, User::B);
    }
}
