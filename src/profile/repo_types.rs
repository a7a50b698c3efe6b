use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// How the daily calorie target picks its base weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalorieStrategy {
    /// Recompute from the latest weight.
    #[default]
    Dynamic,
    /// Anchor to the first entry ever recorded as Fixed.
    Fixed,
}

impl CalorieStrategy {
    /// Tag stored in `user_weights.calorie_strategy`.
    pub fn as_db(self) -> &'static str {
        match self {
            CalorieStrategy::Dynamic => "DYNAMIC",
            CalorieStrategy::Fixed => "FIXED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CalorieStrategy::Dynamic => "Dynamic",
            CalorieStrategy::Fixed => "Fixed",
        }
    }
}

impl fmt::Display for CalorieStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown calorie strategy: {0}")]
pub struct UnknownStrategy(String);

impl FromStr for CalorieStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DYNAMIC" => Ok(CalorieStrategy::Dynamic),
            "FIXED" => Ok(CalorieStrategy::Fixed),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Row as read from `user_weights`.
#[derive(Debug, FromRow)]
pub struct WeightEntryRow {
    pub id: i64,
    pub user_id: i64,
    pub weight: Decimal,
    pub goal_weight: Option<Decimal>,
    pub goal_date: Option<Date>,
    pub calorie_strategy: String,
    pub recorded_at: OffsetDateTime,
}

/// One observation in a user's append-only weight log.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub id: i64,
    pub user_id: i64,
    pub weight: Decimal, // kg
    pub goal_weight: Option<Decimal>,
    pub goal_date: Option<Date>,
    pub calorie_strategy: CalorieStrategy,
    pub recorded_at: OffsetDateTime,
}

impl TryFrom<WeightEntryRow> for WeightEntry {
    type Error = UnknownStrategy;

    fn try_from(r: WeightEntryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            weight: r.weight,
            goal_weight: r.goal_weight,
            goal_date: r.goal_date,
            calorie_strategy: r.calorie_strategy.parse()?,
            recorded_at: r.recorded_at,
        })
    }
}

/// Entry about to be appended; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewWeightEntry {
    pub user_id: i64,
    pub weight: Decimal,
    pub goal_weight: Option<Decimal>,
    pub goal_date: Option<Date>,
    pub calorie_strategy: CalorieStrategy,
}
