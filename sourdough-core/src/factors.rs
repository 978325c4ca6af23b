use serde::Serialize;

use crate::error::{InputError, Result};
use crate::recipe::{AdvancedSettings, Autolyse, FeedingRatio, FlourType, PeakStatus};

/// Baseline bulk time in hours (22 °C, 20% starter, white flour).
pub const BASE_TIME_H: f64 = 5.0;
pub const BASE_TEMP_C: f64 = 22.0;
pub const BASE_STARTER_PCT: f64 = 20.0;
/// Time ratio per °C below baseline.
pub const TEMP_FACTOR: f64 = 1.15;
/// Time ratio per 5 percentage points of starter above baseline.
pub const STARTER_FACTOR: f64 = 0.85;
pub const MIN_TIME_H: f64 = 2.0;
pub const MAX_TIME_H: f64 = 24.0;

const WHOLE_GRAIN_FACTOR: f64 = 0.85;

/// Ingredient weights relative to flour, in percent.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct BakersPercentages {
    pub hydration: f64,
    pub starter_pct: f64,
    pub salt_pct: f64,
}

/// Dimensionless multipliers applied to [`BASE_TIME_H`].
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct FermentationFactors {
    pub temp: f64,
    pub starter: f64,
    pub flour: f64,
    pub peak: f64,
    pub ratio: f64,
    pub autolyse: f64,
}

impl FermentationFactors {
    /// Product of all factors.
    pub fn combined(&self) -> f64 {
        self.temp * self.starter * self.flour * self.ratio * self.peak * self.autolyse
    }
}

/// Baker's percentages. Flour must be strictly positive.
pub fn compute_bakers_percentages(
    flour_g: f64,
    water_g: f64,
    starter_g: f64,
    salt_g: f64,
) -> Result<BakersPercentages> {
    if flour_g == 0.0 {
        return Err(InputError::ZeroFlour);
    }
    if flour_g < 0.0 {
        return Err(InputError::NegativeFlour(flour_g));
    }
    Ok(BakersPercentages {
        hydration: water_g / flour_g * 100.0,
        starter_pct: starter_g / flour_g * 100.0,
        salt_pct: salt_g / flour_g * 100.0,
    })
}

/// Warmer dough ferments faster: each °C below baseline multiplies time by 1.15.
pub fn temperature_factor(temp_c: f64) -> f64 {
    TEMP_FACTOR.powf(BASE_TEMP_C - temp_c)
}

/// More starter ferments faster: each 5 points above baseline multiplies time by 0.85.
pub fn starter_factor(starter_pct: f64) -> f64 {
    STARTER_FACTOR.powf((starter_pct - BASE_STARTER_PCT) / 5.0)
}

/// Share of whole grain in a mixed blend, capped at 1.0.
pub fn whole_grain_fraction(whole_grain_g: f64, flour_g: f64) -> f64 {
    (whole_grain_g / flour_g).min(1.0)
}

/// Whole grain ferments faster than white; a blend interpolates linearly.
pub fn flour_factor(flour: FlourType, flour_g: f64) -> f64 {
    match flour {
        FlourType::White => 1.0,
        FlourType::Whole => WHOLE_GRAIN_FACTOR,
        FlourType::Mixed { whole_grain_g } => {
            let whole = whole_grain_fraction(whole_grain_g, flour_g);
            (1.0 - whole) + whole * WHOLE_GRAIN_FACTOR
        }
    }
}

pub fn peak_factor(peak: PeakStatus) -> f64 {
    match peak {
        PeakStatus::Rising => 1.15,
        PeakStatus::Peak => 0.9,
        PeakStatus::Falling => 1.2,
        PeakStatus::Normal => 1.0,
    }
}

pub fn ratio_factor(ratio: FeedingRatio) -> f64 {
    match ratio {
        FeedingRatio::OneToOne => 1.1,
        FeedingRatio::OneToTwo => 1.05,
        FeedingRatio::OneToThree => 1.02,
        FeedingRatio::OneToFive => 1.0,
        FeedingRatio::OneToTen => 0.9,
    }
}

pub fn autolyse_factor(autolyse: Autolyse) -> f64 {
    match autolyse {
        Autolyse::Yes => 0.95,
        Autolyse::No => 1.0,
    }
}

/// All six factors. Advanced factors are 1.0 when `advanced` is `None`.
pub fn fermentation_factors(
    temp_c: f64,
    flour_g: f64,
    pct: &BakersPercentages,
    advanced: Option<&AdvancedSettings>,
) -> FermentationFactors {
    let flour = advanced.map(|a| a.flour).unwrap_or_default();
    let (peak, ratio, autolyse) = match advanced {
        Some(a) => (
            peak_factor(a.peak),
            ratio_factor(a.feeding_ratio),
            autolyse_factor(a.autolyse),
        ),
        None => (1.0, 1.0, 1.0),
    };

    FermentationFactors {
        temp: temperature_factor(temp_c),
        starter: starter_factor(pct.starter_pct),
        flour: flour_factor(flour, flour_g),
        peak,
        ratio,
        autolyse,
    }
}

/* ===========================
Unit tests
=========================== */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentages_baseline() {
        let p = compute_bakers_percentages(500.0, 375.0, 100.0, 10.0).unwrap();
        assert_relative_eq!(p.hydration, 75.0);
        assert_relative_eq!(p.starter_pct, 20.0);
        assert_relative_eq!(p.salt_pct, 2.0);
    }

    #[test]
    fn test_percentages_reject_zero_and_negative_flour() {
        assert_eq!(
            compute_bakers_percentages(0.0, 375.0, 100.0, 10.0),
            Err(InputError::ZeroFlour)
        );
        assert_eq!(
            compute_bakers_percentages(-1.0, 375.0, 100.0, 10.0),
            Err(InputError::NegativeFlour(-1.0))
        );
    }

    #[test]
    fn test_temperature_factor() {
        assert_relative_eq!(temperature_factor(22.0), 1.0);
        assert_relative_eq!(temperature_factor(15.0), 1.15f64.powi(7), epsilon = 1e-12);
        assert!(temperature_factor(26.0) < 1.0);
    }

    #[test]
    fn test_starter_factor() {
        assert_relative_eq!(starter_factor(20.0), 1.0);
        assert_relative_eq!(starter_factor(25.0), 0.85, epsilon = 1e-12);
        assert_relative_eq!(starter_factor(15.0), 1.0 / 0.85, epsilon = 1e-12);
    }

    #[test]
    fn test_flour_factor_blends() {
        assert_relative_eq!(flour_factor(FlourType::White, 500.0), 1.0);
        assert_relative_eq!(flour_factor(FlourType::Whole, 500.0), 0.85);
        let half = FlourType::Mixed { whole_grain_g: 250.0 };
        assert_relative_eq!(flour_factor(half, 500.0), 0.925, epsilon = 1e-12);
        let none = FlourType::Mixed { whole_grain_g: 0.0 };
        assert_relative_eq!(flour_factor(none, 500.0), 1.0);
    }

    #[test]
    fn test_mixed_flour_caps_whole_grain_share() {
        let over = FlourType::Mixed { whole_grain_g: 800.0 };
        assert_relative_eq!(flour_factor(over, 500.0), flour_factor(FlourType::Whole, 500.0));
        assert_relative_eq!(whole_grain_fraction(800.0, 500.0), 1.0);
    }

    #[test]
    fn test_advanced_factors_ignored_when_disabled() {
        let pct = compute_bakers_percentages(500.0, 375.0, 100.0, 10.0).unwrap();
        let f = fermentation_factors(22.0, 500.0, &pct, None);
        assert_eq!((f.peak, f.ratio, f.autolyse, f.flour), (1.0, 1.0, 1.0, 1.0));
        assert_relative_eq!(f.combined(), 1.0);
    }

    #[test]
    fn test_advanced_factors_read_when_enabled() {
        let pct = compute_bakers_percentages(500.0, 375.0, 100.0, 10.0).unwrap();
        let adv = AdvancedSettings {
            flour: FlourType::Whole,
            feeding_ratio: FeedingRatio::OneToTen,
            peak: PeakStatus::Falling,
            autolyse: Autolyse::Yes,
            ..AdvancedSettings::default()
        };
        let f = fermentation_factors(22.0, 500.0, &pct, Some(&adv));
        assert_relative_eq!(f.flour, 0.85);
        assert_relative_eq!(f.ratio, 0.9);
        assert_relative_eq!(f.peak, 1.2);
        assert_relative_eq!(f.autolyse, 0.95);
        assert_relative_eq!(f.combined(), 0.85 * 0.9 * 1.2 * 0.95, epsilon = 1e-12);
    }

    #[test]
    fn test_peak_and_ratio_tables() {
        assert_relative_eq!(peak_factor(PeakStatus::Rising), 1.15);
        assert_relative_eq!(peak_factor(PeakStatus::Peak), 0.9);
        assert_relative_eq!(peak_factor(PeakStatus::Normal), 1.0);
        assert_relative_eq!(ratio_factor(FeedingRatio::OneToOne), 1.1);
        assert_relative_eq!(ratio_factor(FeedingRatio::OneToTwo), 1.05);
        assert_relative_eq!(ratio_factor(FeedingRatio::OneToThree), 1.02);
        assert_relative_eq!(ratio_factor(FeedingRatio::OneToFive), 1.0);
    }
}
