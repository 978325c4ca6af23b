use serde::{Deserialize, Serialize};
use std::fmt;

/// Flour used in the dough.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FlourType {
    #[default]
    White,
    Whole,
    /// White flour blended with `whole_grain_g` grams of whole grain.
    Mixed { whole_grain_g: f64 },
}

/// Feeding ratio of the last starter refresh (starter:flour:water).
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedingRatio {
    #[serde(rename = "1:1:1")]
    OneToOne,
    #[serde(rename = "1:2:2")]
    OneToTwo,
    #[serde(rename = "1:3:3")]
    OneToThree,
    #[default]
    #[serde(rename = "1:5:5")]
    OneToFive,
    #[serde(rename = "1:10:10")]
    OneToTen,
}

impl fmt::Display for FeedingRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeedingRatio::OneToOne => "1:1:1",
            FeedingRatio::OneToTwo => "1:2:2",
            FeedingRatio::OneToThree => "1:3:3",
            FeedingRatio::OneToFive => "1:5:5",
            FeedingRatio::OneToTen => "1:10:10",
        };
        f.write_str(s)
    }
}

/// Where the starter is in its feeding cycle when mixed into the dough.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PeakStatus {
    Rising,
    Peak,
    Falling,
    #[default]
    Normal,
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Autolyse {
    Yes,
    #[default]
    No,
}

/// Settings only read when advanced mode is on.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdvancedSettings {
    pub flour: FlourType,
    pub feeding_ratio: FeedingRatio,
    pub peak: PeakStatus,
    pub autolyse: Autolyse,
    /// Hours of refrigerated proof after shaping (0 = none).
    pub cold_proof_h: f64,
    /// Fridge temperature in °C.
    pub fridge_temp_c: f64,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        AdvancedSettings {
            flour: FlourType::White,
            feeding_ratio: FeedingRatio::OneToFive,
            peak: PeakStatus::Normal,
            autolyse: Autolyse::No,
            cold_proof_h: 0.0,
            fridge_temp_c: 4.0,
        }
    }
}

/// Input for a fermentation estimate.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecipeInputs {
    /// Ambient (dough) temperature in °C.
    pub temp_c: f64,
    pub flour_g: f64,
    pub water_g: f64,
    /// Starter weight in grams (flour + water of the levain).
    pub starter_g: f64,
    pub salt_g: f64,
    /// `None` means advanced mode is off and every advanced input takes its neutral value.
    pub advanced: Option<AdvancedSettings>,
}

impl RecipeInputs {
    /// Flour type in effect (white unless advanced mode says otherwise).
    pub fn flour_type(&self) -> FlourType {
        self.advanced.map(|a| a.flour).unwrap_or_default()
    }

    /// Cold proof hours in effect (0 unless advanced mode is on).
    pub fn cold_proof_h(&self) -> f64 {
        self.advanced.map_or(0.0, |a| a.cold_proof_h)
    }

    /// Fridge temperature in effect (4 °C unless advanced mode is on).
    pub fn fridge_temp_c(&self) -> f64 {
        self.advanced.map_or(4.0, |a| a.fridge_temp_c)
    }

    /// Total dough weight in grams.
    pub fn total_weight_g(&self) -> f64 {
        self.flour_g + self.water_g + self.starter_g + self.salt_g
    }
}
