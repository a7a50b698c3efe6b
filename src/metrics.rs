//! BMI and daily calorie derivation.
//!
//! Everything here is a pure function of the user's height, the latest weight
//! entry, the first entry recorded with the Fixed strategy and today's date.
//! The results are the display strings shown on the profile page.

use std::str::FromStr;

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};

use crate::profile::repo_types::{CalorieStrategy, WeightEntry};

/// Energy content of one kilogram of body mass.
pub const CALORIES_PER_KG: f64 = 7700.0;
/// Daily maintenance per kilogram of body weight.
pub const MAINTENANCE_PER_KG: f64 = 30.0;

pub const BMI_PROMPT: &str = "Add height and weight to compute BMI.";
pub const CALORIES_PROMPT: &str = "Add a weight entry to see daily calories.";
const HEIGHT_INVALID: &str = "Height must be greater than 0.";

pub fn bmi_text(height_cm: Option<i32>, latest: Option<&WeightEntry>) -> String {
    let (Some(height_cm), Some(latest)) = (height_cm, latest) else {
        return BMI_PROMPT.to_string();
    };
    let height_m = f64::from(height_cm) / 100.0;
    if height_m <= 0.0 {
        return HEIGHT_INVALID.to_string();
    }
    let bmi = kg(latest.weight) / (height_m * height_m);
    format!("BMI: {}", round_half_up(bmi, 1))
}

/// Entry the calorie target is computed from. A Fixed latest entry defers to
/// the Fixed baseline when one exists; everything else uses the latest entry.
pub fn base_entry<'a>(
    latest: &'a WeightEntry,
    fixed_baseline: Option<&'a WeightEntry>,
) -> &'a WeightEntry {
    match (latest.calorie_strategy, fixed_baseline) {
        (CalorieStrategy::Fixed, Some(baseline)) => baseline,
        _ => latest,
    }
}

pub fn calories_text(
    latest: Option<&WeightEntry>,
    fixed_baseline: Option<&WeightEntry>,
    today: Date,
) -> String {
    let Some(latest) = latest else {
        return CALORIES_PROMPT.to_string();
    };
    let base = base_entry(latest, fixed_baseline);
    let weight = kg(base.weight);
    let maintenance = weight * MAINTENANCE_PER_KG;

    let (Some(goal_date), Some(goal_weight)) = (base.goal_date, base.goal_weight) else {
        return format!("Maintenance: {} kcal (no goal set)", round_half_up(maintenance, 0));
    };
    let days = (goal_date - today).whole_days();
    if days <= 0 {
        return format!(
            "Maintenance: {} kcal (goal date passed)",
            round_half_up(maintenance, 0)
        );
    }

    // No clamping.
    let daily_deficit = (weight - kg(goal_weight)) * CALORIES_PER_KG / days as f64;
    let recommended = maintenance - daily_deficit;
    format!(
        "{} target: {} kcal",
        latest.calorie_strategy.label(),
        round_half_up(recommended, 0)
    )
}

fn kg(weight: Decimal) -> f64 {
    weight.to_f64().unwrap_or_default()
}

/// Rounds the shortest decimal form of `value` half-up (midpoint away from
/// zero) and prints exactly `dp` fractional digits.
pub fn round_half_up(value: f64, dp: u32) -> String {
    match Decimal::from_str(&value.to_string()) {
        Ok(d) => {
            let mut rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(dp);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        Err(_) => format!("{value:.prec$}", prec = dp as usize),
    }
}

/// Weight for a form field: trailing zeros dropped, empty when unset.
pub fn weight_value(weight: Option<Decimal>) -> String {
    weight.map(|w| w.normalize().to_string()).unwrap_or_default()
}

pub fn weight_display(weight: Option<Decimal>) -> String {
    weight
        .map(|w| w.normalize().to_string())
        .unwrap_or_else(|| "n/a".into())
}

pub fn date_value(date: Option<Date>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

pub fn date_display(date: Option<Date>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "n/a".into())
}

pub fn instant_display(at: Option<OffsetDateTime>) -> String {
    at.and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| "n/a".into())
}

pub fn strategy_display(strategy: Option<CalorieStrategy>) -> &'static str {
    strategy.map(CalorieStrategy::label).unwrap_or("n/a")
}
