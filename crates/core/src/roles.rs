//! User roles and the minimum-role ordering used by the access gates.
//!
//! Roles form a total order (`CITIZEN < OFFICER < ADMIN`). Access checks
//! are always expressed as `role >= minimum` so there is a single source
//! of truth instead of per-gate allow-lists that can drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's role. Stored as TEXT in the `users` table.
///
/// Variant order matters: the derived `Ord` is the privilege order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
pub enum Role {
    Citizen,
    Officer,
    Admin,
}

impl Role {
    /// Canonical uppercase name as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Citizen => "CITIZEN",
            Role::Officer => "OFFICER",
            Role::Admin => "ADMIN",
        }
    }

    /// Whether this role satisfies a gate requiring at least `minimum`.
    pub fn satisfies(self, minimum: Role) -> bool {
        self >= minimum
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CITIZEN" => Ok(Role::Citizen),
            "OFFICER" => Ok(Role::Officer),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}
