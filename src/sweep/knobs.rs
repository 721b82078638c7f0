use rand::Rng;

use crate::models::Weights;

/// Min/max sampling range for each objective weight.
#[derive(Debug, Clone)]
pub struct WeightRanges {
    pub nutrition: (f64, f64),
    pub time: (f64, f64),
    pub cost: (f64, f64),
}

impl Default for WeightRanges {
    fn default() -> Self {
        Self {
            nutrition: (0.5, 2.0),
            time: (0.0, 1.0),
            cost: (0.0, 1.0),
        }
    }
}

impl WeightRanges {
    pub fn is_valid(&self) -> bool {
        [self.nutrition, self.time, self.cost]
            .iter()
            .all(|&(lo, hi)| lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi)
    }
}

/// Draw weights uniformly within the given ranges.
pub fn random_weights(rng: &mut impl Rng, ranges: &WeightRanges) -> Weights {
    Weights {
        nutrition: rng.gen_range(ranges.nutrition.0..=ranges.nutrition.1),
        time: rng.gen_range(ranges.time.0..=ranges.time.1),
        cost: rng.gen_range(ranges.cost.0..=ranges.cost.1),
    }
}

/// Format weights as a compact string for display.
pub fn display_weights(weights: &Weights) -> String {
    format!(
        "nutrition={:.3} time={:.3} cost={:.3}",
        weights.nutrition, weights.time, weights.cost
    )
}
