use crate::error::CensusError;
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

/// One parsed table row: header text -> cell text.
pub type RawRow = HashMap<String, String>;

/// A domestic origin -> destination flow with its demographic breakdown.
///
/// Built once per surviving input row; `origin` and `destination` are
/// canonical, distinct, and both in the state enumeration; `count > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    pub origin: String,
    pub destination: String,
    pub count: u64,
    pub male: u64,
    pub female: u64,
    pub rural: u64,
    pub urban: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Selected entity is the destination.
    #[default]
    Inflow,
    /// Selected entity is the origin.
    Outflow,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Inflow => Direction::Outflow,
            Direction::Outflow => Direction::Inflow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Inflow => "Inflow",
            Direction::Outflow => "Outflow",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Inflow => "inflow",
            Direction::Outflow => "outflow",
        })
    }
}

impl FromStr for Direction {
    type Err = CensusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inflow" | "in" => Ok(Direction::Inflow),
            "outflow" | "out" => Ok(Direction::Outflow),
            other => Err(CensusError::InvalidValue(format!("unknown direction '{other}'"))),
        }
    }
}

/// Sort order for ranked views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Highest,
    Lowest,
}

impl Order {
    pub fn toggled(self) -> Self {
        match self {
            Order::Highest => Order::Lowest,
            Order::Lowest => Order::Highest,
        }
    }
}

impl FromStr for Order {
    type Err = CensusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "highest" | "top" => Ok(Order::Highest),
            "lowest" | "bottom" => Ok(Order::Lowest),
            other => Err(CensusError::InvalidValue(format!("unknown order '{other}'"))),
        }
    }
}

/// Parameters for every aggregation call. Not stored anywhere; callers build
/// a fresh value whenever the selection, direction or threshold changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub selected: Option<String>,
    pub direction: Direction,
    pub threshold: u64,
}

impl Query {
    /// Build a query from a raw (possibly non-canonical) entity name.
    /// Blank names select nothing.
    pub fn new(selected: Option<&str>, direction: Direction, threshold: u64) -> Self {
        let selected = selected.map(normalize).filter(|s| !s.is_empty());
        Query { selected, direction, threshold }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

/// `{name, value}` pair for bar charts: the counterpart entity and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedFlow {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CounterpartRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "Migrants")]
    #[tabled(rename = "Migrants")]
    pub migrants: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BreakdownRow {
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "Persons")]
    #[tabled(rename = "Persons")]
    pub persons: String,
    #[serde(rename = "SharePct")]
    #[tabled(rename = "SharePct")]
    pub share_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DurationRow {
    #[serde(rename = "Duration")]
    #[tabled(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Persons")]
    #[tabled(rename = "Persons")]
    pub persons: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ReasonRow {
    #[serde(rename = "Reason")]
    #[tabled(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Persons")]
    #[tabled(rename = "Persons")]
    pub persons: String,
    #[serde(rename = "Males")]
    #[tabled(rename = "Males")]
    pub males: String,
    #[serde(rename = "Females")]
    #[tabled(rename = "Females")]
    pub females: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub entity: String,
    pub direction: Direction,
    pub threshold: u64,
    pub records: usize,
    pub total: u64,
    pub male: u64,
    pub female: u64,
    pub rural: u64,
    pub urban: u64,
    pub male_female_ratio: Option<f64>,
    pub urban_share_pct: f64,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
