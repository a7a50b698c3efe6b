use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use time::{macros::format_description, Date};

use crate::profile::repo_types::CalorieStrategy;

/// Raw `POST /user` form. Every field is optional and blank means absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub birth_date: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub goal_weight: Option<String>,
    pub goal_date: Option<String>,
    pub calorie_strategy: Option<String>,
}

/// Typed profile submission.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub birth_date: Option<Date>,
    pub height: Option<i32>,
    pub weight: Option<Decimal>,
    pub goal_weight: Option<Decimal>,
    pub goal_date: Option<Date>,
    pub calorie_strategy: Option<CalorieStrategy>,
}

impl ProfileUpdate {
    pub fn has_weight_data(&self) -> bool {
        self.weight.is_some()
            || self.goal_weight.is_some()
            || self.goal_date.is_some()
            || self.calorie_strategy.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub message: Option<String>,
    pub edit: Option<String>,
}

impl DashboardQuery {
    pub fn edit_requested(&self) -> bool {
        matches!(self.edit.as_deref(), Some(v) if v == "1"
            || v.eq_ignore_ascii_case("true")
            || v.eq_ignore_ascii_case("yes"))
    }
}

impl ProfileForm {
    /// Parses every field. Unparseable values become absent and are
    /// reported as `"<field>: invalid value"`.
    pub fn parse(self) -> (ProfileUpdate, Vec<String>) {
        let mut errors = Vec::new();
        let update = ProfileUpdate {
            birth_date: field(self.birth_date, "birthDate", parse_date, &mut errors),
            height: field(self.height, "height", |s| s.parse::<i32>().ok(), &mut errors),
            weight: field(self.weight, "weight", parse_kg, &mut errors),
            goal_weight: field(self.goal_weight, "goalWeight", parse_kg, &mut errors),
            goal_date: field(self.goal_date, "goalDate", parse_date, &mut errors),
            calorie_strategy: field(
                self.calorie_strategy,
                "calorieStrategy",
                |s| CalorieStrategy::from_str(s).ok(),
                &mut errors,
            ),
        };
        (update, errors)
    }
}

fn field<T>(
    raw: Option<String>,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
    errors: &mut Vec<String>,
) -> Option<T> {
    let raw = raw?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse(raw);
    if parsed.is_none() {
        errors.push(format!("{name}: invalid value"));
    }
    parsed
}

fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).ok()
}

/// Kilograms, stored with two fractional digits.
fn parse_kg(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .ok()
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
