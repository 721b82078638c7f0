use std::ops::RangeInclusive;

/// Upper bound of a serving multiplier; also the big-M of the portion link.
pub const MAX_SERVINGS: f64 = 2.0;

/// Tolerance band of the first attempt (±15% around each target).
pub const DEFAULT_TOLERANCE: f64 = 0.15;

/// Widened band used by the single retry.
pub const RELAXED_TOLERANCE: f64 = 0.25;

/// A selection indicator above this counts as chosen.
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Decimal places kept on reported servings.
pub const SERVING_DECIMALS: u32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Request defaults
// ─────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_NUTRITION_WEIGHT: f64 = 1.0;
pub const DEFAULT_TIME_WEIGHT: f64 = 0.2;
pub const DEFAULT_COST_WEIGHT: f64 = 0.2;

pub const DEFAULT_MAX_REPEAT: u32 = 2;
pub const MAX_REPEAT_RANGE: RangeInclusive<u32> = 1..=5;

pub const DEFAULT_TIME_LIMIT_SEC: u64 = 25;
pub const TIME_LIMIT_RANGE_SEC: RangeInclusive<u64> = 5..=180;

/// Preparation time assumed when a recipe omits it.
pub const DEFAULT_TIME_MIN: u32 = 20;

/// Cost assumed when a recipe omits it.
pub const DEFAULT_COST_EUR: f64 = 2.5;

/// Round to [`SERVING_DECIMALS`] places.
pub fn round_servings(value: f64) -> f64 {
    let factor = 10_f64.powi(SERVING_DECIMALS as i32);
    (value * factor).round() / factor
}
