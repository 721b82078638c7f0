use serde::{Deserialize, Serialize};

/// Closed set of tracked nutrients.
///
/// Every per-key loop in the crate iterates [`NutrientKey::ALL`], so recipes,
/// targets, and daily aggregates always agree on the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    EnergyKcal,
    ProteinG,
    CarbsG,
    FatG,
    FiberG,
    B12Ug,
    IronMg,
    CalciumMg,
    ZincMg,
    IodineUg,
    SeleniumUg,
    VitaminDUg,
    AlaG,
}

impl NutrientKey {
    pub const ALL: [NutrientKey; 13] = [
        NutrientKey::EnergyKcal,
        NutrientKey::ProteinG,
        NutrientKey::CarbsG,
        NutrientKey::FatG,
        NutrientKey::FiberG,
        NutrientKey::B12Ug,
        NutrientKey::IronMg,
        NutrientKey::CalciumMg,
        NutrientKey::ZincMg,
        NutrientKey::IodineUg,
        NutrientKey::SeleniumUg,
        NutrientKey::VitaminDUg,
        NutrientKey::AlaG,
    ];

    /// Wire name of the key (matches the [`NutrientVector`] field name).
    pub fn as_str(self) -> &'static str {
        match self {
            NutrientKey::EnergyKcal => "energy_kcal",
            NutrientKey::ProteinG => "protein_g",
            NutrientKey::CarbsG => "carbs_g",
            NutrientKey::FatG => "fat_g",
            NutrientKey::FiberG => "fiber_g",
            NutrientKey::B12Ug => "b12_ug",
            NutrientKey::IronMg => "iron_mg",
            NutrientKey::CalciumMg => "calcium_mg",
            NutrientKey::ZincMg => "zinc_mg",
            NutrientKey::IodineUg => "iodine_ug",
            NutrientKey::SeleniumUg => "selenium_ug",
            NutrientKey::VitaminDUg => "vitamin_d_ug",
            NutrientKey::AlaG => "ala_g",
        }
    }
}

impl std::fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-100g-equivalent nutrient quantities.
///
/// Missing fields deserialize to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientVector {
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub b12_ug: f64,
    pub iron_mg: f64,
    pub calcium_mg: f64,
    pub zinc_mg: f64,
    pub iodine_ug: f64,
    pub selenium_ug: f64,
    pub vitamin_d_ug: f64,
    pub ala_g: f64,
}

impl NutrientVector {
    /// Quantity for one nutrient key.
    #[inline]
    pub fn get(&self, key: NutrientKey) -> f64 {
        match key {
            NutrientKey::EnergyKcal => self.energy_kcal,
            NutrientKey::ProteinG => self.protein_g,
            NutrientKey::CarbsG => self.carbs_g,
            NutrientKey::FatG => self.fat_g,
            NutrientKey::FiberG => self.fiber_g,
            NutrientKey::B12Ug => self.b12_ug,
            NutrientKey::IronMg => self.iron_mg,
            NutrientKey::CalciumMg => self.calcium_mg,
            NutrientKey::ZincMg => self.zinc_mg,
            NutrientKey::IodineUg => self.iodine_ug,
            NutrientKey::SeleniumUg => self.selenium_ug,
            NutrientKey::VitaminDUg => self.vitamin_d_ug,
            NutrientKey::AlaG => self.ala_g,
        }
    }

    /// Build a vector from a per-key function, in [`NutrientKey::ALL`] order.
    pub fn from_fn(mut f: impl FnMut(NutrientKey) -> f64) -> Self {
        Self {
            energy_kcal: f(NutrientKey::EnergyKcal),
            protein_g: f(NutrientKey::ProteinG),
            carbs_g: f(NutrientKey::CarbsG),
            fat_g: f(NutrientKey::FatG),
            fiber_g: f(NutrientKey::FiberG),
            b12_ug: f(NutrientKey::B12Ug),
            iron_mg: f(NutrientKey::IronMg),
            calcium_mg: f(NutrientKey::CalciumMg),
            zinc_mg: f(NutrientKey::ZincMg),
            iodine_ug: f(NutrientKey::IodineUg),
            selenium_ug: f(NutrientKey::SeleniumUg),
            vitamin_d_ug: f(NutrientKey::VitaminDUg),
            ala_g: f(NutrientKey::AlaG),
        }
    }

    /// `(key, quantity)` pairs in fixed key order.
    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        NutrientKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// `self + other * factor`, key by key.
    pub fn add_scaled(&self, other: &NutrientVector, factor: f64) -> Self {
        Self::from_fn(|k| self.get(k) + other.get(k) * factor)
    }

    /// First key holding a negative or non-finite quantity, if any.
    pub fn first_invalid(&self) -> Option<NutrientKey> {
        self.iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
            .map(|(k, _)| k)
    }

    /// Non-negative and finite for every key.
    pub fn is_valid(&self) -> bool {
        self.first_invalid().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_matches_fields() {
        let v = NutrientVector {
            energy_kcal: 500.0,
            iron_mg: 3.5,
            ala_g: 1.2,
            ..Default::default()
        };
        assert_eq!(v.get(NutrientKey::EnergyKcal), 500.0);
        assert_eq!(v.get(NutrientKey::IronMg), 3.5);
        assert_eq!(v.get(NutrientKey::AlaG), 1.2);
        assert_eq!(v.get(NutrientKey::ZincMg), 0.0);
    }

    #[test]
    fn test_from_fn_uses_every_key() {
        let v = NutrientVector::from_fn(|k| k as usize as f64);
        for (i, (key, value)) in v.iter().enumerate() {
            assert_eq!(key, NutrientKey::ALL[i]);
            assert_eq!(value, i as f64);
        }
    }

    #[test]
    fn test_key_names_match_wire_fields() {
        let v = NutrientVector::from_fn(|k| k as usize as f64 + 1.0);
        let json = serde_json::to_value(v).unwrap();
        for key in NutrientKey::ALL {
            assert_eq!(json[key.as_str()], v.get(key), "field {key}");
        }
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let v: NutrientVector = serde_json::from_str(r#"{"protein_g": 20}"#).unwrap();
        assert_eq!(v.protein_g, 20.0);
        assert_eq!(v.energy_kcal, 0.0);
    }

    #[test]
    fn test_validity() {
        let mut v = NutrientVector::default();
        assert!(v.is_valid());
        v.calcium_mg = -1.0;
        assert_eq!(v.first_invalid(), Some(NutrientKey::CalciumMg));
        v.calcium_mg = f64::NAN;
        assert!(!v.is_valid());
    }

    #[test]
    fn test_add_scaled() {
        let base = NutrientVector {
            protein_g: 10.0,
            ..Default::default()
        };
        let other = NutrientVector {
            protein_g: 4.0,
            fat_g: 2.0,
            ..Default::default()
        };
        let sum = base.add_scaled(&other, 1.5);
        assert!((sum.protein_g - 16.0).abs() < 1e-9);
        assert!((sum.fat_g - 3.0).abs() < 1e-9);
    }
}
