//! AVS operator records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Operator participation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorStatus {
    Active,
    Inactive,
}

impl OperatorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorStatus::Active => "active",
            OperatorStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for OperatorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperatorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(OperatorStatus::Active),
            "inactive" => Ok(OperatorStatus::Inactive),
            _ => Err(format!(
                "Unknown operator status: '{}'. Must be one of: active, inactive",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvsOperator {
    pub id: String,
    /// Lower-cased operator address, unique across operators
    pub address: String,
    pub stake: Decimal,
    pub status: OperatorStatus,
    pub tasks_completed: u64,
    /// Reputation score in [0, 1]
    #[serde(with = "rust_decimal::serde::float")]
    pub reputation: Decimal,
    pub last_seen: DateTime<Utc>,
}

/// Body of POST /api/operators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvsOperatorCreate {
    pub address: Option<String>,
    pub stake: Option<Decimal>,
    pub status: Option<String>,
    pub tasks_completed: Option<i64>,
    pub reputation: Option<Decimal>,
    pub last_seen: Option<String>,
}
