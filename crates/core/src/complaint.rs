//! Complaint category, priority, and the status state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Complaint category, assigned by the classifier collaborator rather than
/// chosen by the filer. Stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "TEXT", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Infrastructure,
    WaterSupply,
    Electricity,
    Sanitation,
    Healthcare,
    Education,
    Transportation,
    Other,
}

/// All categories, in the order the filing form presents them.
pub const ALL_CATEGORIES: [Category; 8] = [
    Category::Infrastructure,
    Category::WaterSupply,
    Category::Electricity,
    Category::Sanitation,
    Category::Healthcare,
    Category::Education,
    Category::Transportation,
    Category::Other,
];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Infrastructure => "INFRASTRUCTURE",
            Category::WaterSupply => "WATER_SUPPLY",
            Category::Electricity => "ELECTRICITY",
            Category::Sanitation => "SANITATION",
            Category::Healthcare => "HEALTHCARE",
            Category::Education => "EDUCATION",
            Category::Transportation => "TRANSPORTATION",
            Category::Other => "OTHER",
        }
    }

    /// Citizen-facing name: underscores replaced with spaces.
    pub fn display_name(self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {s}"))
    }
}

/// Complaint priority. Fixed at `medium` when filing; not user-settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complaint lifecycle status. Stored as TEXT, new complaints start PENDING.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum Status {
    Pending,
    Processing,
    Resolved,
    Rejected,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Processing => "PROCESSING",
            Status::Resolved => "RESOLVED",
            Status::Rejected => "REJECTED",
        }
    }

    /// Forward-transition table. Only consulted when transition enforcement
    /// is switched on; the default configuration lets officers set any
    /// status from any status.
    ///
    /// Self-transitions are allowed so re-submitting the current status is
    /// never an error.
    pub fn can_transition_to(self, next: Status) -> bool {
        if self == next {
            return true;
        }
        match self {
            Status::Pending => true,
            Status::Processing => matches!(next, Status::Resolved | Status::Rejected),
            Status::Resolved | Status::Rejected => false,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Status::Pending),
            "PROCESSING" => Ok(Status::Processing),
            "RESOLVED" => Ok(Status::Resolved),
            "REJECTED" => Ok(Status::Rejected),
            other => Err(format!("Unknown status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display_name_replaces_underscores() {
        assert_eq!(Category::WaterSupply.display_name(), "WATER SUPPLY");
        assert_eq!(Category::Infrastructure.display_name(), "INFRASTRUCTURE");
    }

    #[test]
    fn test_category_round_trip() {
        for category in ALL_CATEGORIES {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("POTHOLES".parse::<Category>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("PENDING".parse::<Status>().unwrap(), Status::Pending);
        assert!("pending".parse::<Status>().is_err());
        assert!("DONE".parse::<Status>().is_err());
    }

    #[test]
    fn test_pending_may_move_anywhere() {
        for next in [Status::Processing, Status::Resolved, Status::Rejected] {
            assert!(Status::Pending.can_transition_to(next));
        }
    }

    #[test]
    fn test_processing_cannot_return_to_pending() {
        assert!(!Status::Processing.can_transition_to(Status::Pending));
        assert!(Status::Processing.can_transition_to(Status::Resolved));
        assert!(Status::Processing.can_transition_to(Status::Rejected));
    }

    #[test]
    fn test_terminal_statuses_only_self_transition() {
        for terminal in [Status::Resolved, Status::Rejected] {
            assert!(terminal.can_transition_to(terminal));
            for next in [Status::Pending, Status::Processing] {
                assert!(!terminal.can_transition_to(next));
            }
        }
        assert!(!Status::Resolved.can_transition_to(Status::Rejected));
    }
}
