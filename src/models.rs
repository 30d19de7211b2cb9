//! Frontend Models
//!
//! Row types mirroring the remote `tasks` and `projects` tables, plus the
//! auth session shape returned by the service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority, stored remotely as an integer (1 = most urgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Critical = 1,
    High = 2,
    Medium = 3,
    #[default]
    Low = 4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        priority as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Critical),
            2 => Ok(Priority::High),
            3 => Ok(Priority::Medium),
            4 => Ok(Priority::Low),
            other => Err(format!("priority out of range: {}", other)),
        }
    }
}

/// Task row (matches the remote `tasks` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    /// May point at a project that no longer exists; display tolerates it.
    pub project_id: Option<Uuid>,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

/// Project row (matches the remote `projects` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Authenticated user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Auth session: bearer token plus its user. Present iff signed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Date-window shortcuts in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Today,
    Upcoming,
    All,
}

impl FilterMode {
    pub fn title(&self) -> &'static str {
        match self {
            FilterMode::Today => "Today",
            FilterMode::Upcoming => "Upcoming 7 days",
            FilterMode::All => "All tasks",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FilterMode::Today => "📅",
            FilterMode::Upcoming => "📆",
            FilterMode::All => "📋",
        }
    }
}

/// Anything living in a server table row with a server-assigned id.
pub trait Row: Clone {
    fn id(&self) -> Uuid;
}

impl Row for Task {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Row for Project {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_round_trips_through_integer() {
        for priority in Priority::ALL {
            let raw = u8::from(priority);
            assert_eq!(Priority::try_from(raw), Ok(priority));
        }
        assert!(Priority::try_from(0).is_err());
        assert!(Priority::try_from(5).is_err());
    }

    #[test]
    fn priority_serializes_as_integer() {
        let json = serde_json::to_string(&Priority::Critical).unwrap();
        assert_eq!(json, "1");
        let back: Priority = serde_json::from_str("4").unwrap();
        assert_eq!(back, Priority::Low);
    }

    #[test]
    fn task_row_deserializes_server_shape() {
        let json = r#"{
            "id": "9f0c8a3e-0000-0000-0000-000000000001",
            "user_id": "9f0c8a3e-0000-0000-0000-000000000002",
            "project_id": null,
            "title": "Buy milk",
            "completed": false,
            "due_date": "2024-06-10",
            "priority": 2,
            "created_at": "2024-06-01T09:30:00+00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(
            task.due_date,
            NaiveDate::from_ymd_opt(2024, 6, 10)
        );
        assert!(task.project_id.is_none());
    }
}
