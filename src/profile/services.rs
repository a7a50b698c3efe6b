use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::auth::repo::UserStore;
use crate::auth::repo_types::User;
use crate::db::StoreError;
use crate::profile::dto::ProfileUpdate;
use crate::profile::repo::WeightLogStore;
use crate::profile::repo_types::{CalorieStrategy, NewWeightEntry, WeightEntry};

pub const BIRTH_DATE_IMMUTABLE: &str = "Birth date is immutable and was not changed.";
pub const WEIGHT_REQUIRED: &str = "Weight is required when setting goals or strategy.";
pub const SAVED: &str = "Saved.";

/// `NUMERIC(6, 2)` upper bound.
const MAX_KG: i64 = 10_000;

#[derive(Debug, PartialEq)]
pub enum ProfileOutcome {
    /// Nothing was persisted.
    Rejected { errors: Vec<String>, edit_weights: bool },
    Applied { user: User, message: String },
}

/// The two weight-log views the calorie target needs.
#[derive(Debug, Default, Clone)]
pub struct WeightHistory {
    pub latest: Option<WeightEntry>,
    pub fixed_baseline: Option<WeightEntry>,
}

pub async fn load_history(
    weights: &dyn WeightLogStore,
    user_id: i64,
) -> Result<WeightHistory, StoreError> {
    Ok(WeightHistory {
        latest: weights.latest(user_id).await?,
        fixed_baseline: weights
            .first_with_strategy(user_id, CalorieStrategy::Fixed)
            .await?,
    })
}

/// Validation messages for an update, in display order.
pub fn validate(update: &ProfileUpdate) -> Vec<String> {
    let mut errors = Vec::new();
    if matches!(update.height, Some(h) if h <= 0) {
        errors.push("Height must be greater than 0.".to_string());
    }
    check_kg(update.weight, "Weight", &mut errors);
    check_kg(update.goal_weight, "Goal weight", &mut errors);
    if update.has_weight_data() && update.weight.is_none() {
        errors.push(WEIGHT_REQUIRED.to_string());
    }
    errors
}

fn check_kg(value: Option<Decimal>, label: &str, errors: &mut Vec<String>) {
    match value {
        Some(kg) if kg <= Decimal::ZERO => errors.push(format!("{label} must be greater than 0.")),
        Some(kg) if kg >= Decimal::from(MAX_KG) => errors.push(format!("{label} must be less than {MAX_KG}.")),
        _ => {}
    }
}

/// Applies a profile submission. `parse_errors` come from form decoding and
/// are reported ahead of the validation errors.
pub async fn update_profile(
    users: &dyn UserStore,
    weights: &dyn WeightLogStore,
    mut user: User,
    update: ProfileUpdate,
    parse_errors: Vec<String>,
) -> Result<ProfileOutcome, StoreError> {
    let mut errors = parse_errors;
    errors.extend(validate(&update));
    if !errors.is_empty() {
        debug!(user_id = user.id, ?errors, "profile update rejected");
        return Ok(ProfileOutcome::Rejected {
            errors,
            edit_weights: update.has_weight_data(),
        });
    }

    let mut message = String::new();
    let mut changed = false;
    if let Some(birth_date) = update.birth_date {
        match user.birth_date {
            None => {
                user.birth_date = Some(birth_date);
                changed = true;
            }
            Some(current) if current != birth_date => {
                message = BIRTH_DATE_IMMUTABLE.to_string();
            }
            Some(_) => {}
        }
    }
    if let Some(height) = update.height {
        user.height = Some(height);
        changed = true;
    }
    if changed {
        user = users.save_profile(&user).await?;
    }

    let mut weight_saved = false;
    if let Some(weight) = update.weight {
        let entry = weights
            .append(NewWeightEntry {
                user_id: user.id,
                weight,
                goal_weight: update.goal_weight,
                goal_date: update.goal_date,
                calorie_strategy: update.calorie_strategy.unwrap_or_default(),
            })
            .await?;
        info!(user_id = user.id, entry_id = entry.id, strategy = %entry.calorie_strategy, "weight recorded");
        weight_saved = true;
    }

    if message.is_empty() && (changed || weight_saved) {
        message = SAVED.to_string();
    }
    Ok(ProfileOutcome::Applied { user, message })
}
