//! Sourdough bulk fermentation estimates.
//!
//! A heuristic multiplicative model calibrated to 5 h at 22 °C with 20% starter:
//! inputs → baker's percentages → factors → clamped bulk time → cold-proof
//! adjustment → ±15% range. Folding and baking schedules derive from the result.

use serde::Serialize;
use tracing::debug;

pub mod error;
pub mod factors;
pub mod recipe;
pub mod schedule;
pub mod timer;
pub mod validation;

pub use error::{InputError, Result};
pub use factors::{
    BASE_STARTER_PCT, BASE_TEMP_C, BASE_TIME_H, BakersPercentages, FermentationFactors,
    MAX_TIME_H, MIN_TIME_H, compute_bakers_percentages, fermentation_factors,
};
pub use recipe::{AdvancedSettings, Autolyse, FeedingRatio, FlourType, PeakStatus, RecipeInputs};
pub use schedule::{
    BakeMethod, BakePlan, BakingTimes, ColdProofAdjustment, FoldingSchedule, bake_plan,
    baking_times, cold_proof_adjustment, folding_schedule,
};
pub use timer::{BakeTimer, TimerState, TimerTick};
pub use validation::{ValidationIssue, info_notes, validate_inputs};

use error::ensure_finite;

#[inline]
fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// Output of one estimate. Times are in hours.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct FermentationResult {
    pub percentages: BakersPercentages,
    pub factors: FermentationFactors,
    /// Model output before the [`MIN_TIME_H`]..=[`MAX_TIME_H`] clamp.
    pub raw_bulk_time_h: f64,
    /// Recommended bulk time after clamping and any cold-proof reduction.
    pub bulk_time_h: f64,
    pub min_time_h: f64,
    pub max_time_h: f64,
    pub cold_proof_h: f64,
    pub cold_proof_equivalent_h: f64,
    pub bulk_adjustment_h: f64,
    /// Bulk time plus cold proof hours; what a countdown runs for.
    pub total_time_with_cold_h: f64,
}

impl FermentationResult {
    /// Overall window (bulk range plus cold proof) in whole hours.
    pub fn total_window_h(&self) -> (u32, u32) {
        schedule::total_window_h(self.min_time_h, self.max_time_h, self.cold_proof_h)
    }

    /// Cold fermentation speed relative to room temperature, in percent.
    pub fn cold_ferment_rate_pct(&self) -> Option<f64> {
        (self.cold_proof_h > 0.0).then(|| self.cold_proof_equivalent_h / self.cold_proof_h * 100.0)
    }

    pub fn folding(&self) -> FoldingSchedule {
        folding_schedule(self.percentages.hydration)
    }
}

fn ensure_number(field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotANumber { field })
    }
}

/// Estimate bulk fermentation for a recipe.
///
/// Fails on non-numeric basic fields, zero or negative flour, a non-numeric or
/// negative whole grain weight in a mixed blend, or any non-finite intermediate. There is no partial result.
pub fn estimate_fermentation(inputs: &RecipeInputs) -> Result<FermentationResult> {
    ensure_number("temperature", inputs.temp_c)?;
    ensure_number("flour", inputs.flour_g)?;
    ensure_number("water", inputs.water_g)?;
    ensure_number("starter", inputs.starter_g)?;
    ensure_number("salt", inputs.salt_g)?;
    if let FlourType::Mixed { whole_grain_g } = inputs.flour_type() {
        ensure_number("whole grain", whole_grain_g)?;
        if whole_grain_g < 0.0 {
            return Err(InputError::NegativeWholeGrain(whole_grain_g));
        }
    }

    let percentages =
        compute_bakers_percentages(inputs.flour_g, inputs.water_g, inputs.starter_g, inputs.salt_g)?;
    let factors = fermentation_factors(
        inputs.temp_c,
        inputs.flour_g,
        &percentages,
        inputs.advanced.as_ref(),
    );

    let raw_bulk_time_h = ensure_finite("bulk time", BASE_TIME_H * factors.combined())?;
    let mut bulk_time_h = clamp(raw_bulk_time_h, MIN_TIME_H, MAX_TIME_H);

    let cold_proof_h = ensure_finite("cold proof", inputs.cold_proof_h())?;
    let fridge_temp_c = ensure_finite("fridge temperature", inputs.fridge_temp_c())?;
    let cold = cold_proof_adjustment(cold_proof_h, fridge_temp_c, bulk_time_h);
    ensure_finite("cold proof equivalent", cold.equivalent_h)?;
    if cold.bulk_reduction_h > 0.0 {
        bulk_time_h = schedule::apply_cold_proof_reduction(bulk_time_h, cold.bulk_reduction_h);
    }

    let (min_time_h, max_time_h) = schedule::time_range(bulk_time_h);

    debug!(
        temp = factors.temp,
        starter = factors.starter,
        flour = factors.flour,
        peak = factors.peak,
        ratio = factors.ratio,
        autolyse = factors.autolyse,
        raw_bulk_time_h,
        bulk_time_h,
        cold_equivalent_h = cold.equivalent_h,
        "fermentation estimated"
    );

    Ok(FermentationResult {
        percentages,
        factors,
        raw_bulk_time_h,
        bulk_time_h,
        min_time_h,
        max_time_h,
        cold_proof_h,
        cold_proof_equivalent_h: cold.equivalent_h,
        bulk_adjustment_h: cold.bulk_reduction_h,
        total_time_with_cold_h: bulk_time_h + cold_proof_h,
    })
}

/* ===========================
Unit tests
=========================== */
