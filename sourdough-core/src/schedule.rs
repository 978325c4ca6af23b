use serde::Serialize;
use std::num::NonZeroU32;

/// Bulk time never drops below this after a cold-proof reduction.
pub const COLD_PROOF_BULK_FLOOR_H: f64 = 3.0;

/// Cold proof converted into room-temperature fermentation.
#[derive(Copy, Clone, Debug, Default, Serialize, PartialEq)]
pub struct ColdProofAdjustment {
    /// Room-temperature hours the cold proof is worth.
    pub equivalent_h: f64,
    /// Hours to take off bulk fermentation (warm fridges only).
    pub bulk_reduction_h: f64,
}

/// Fermentation speed in the fridge relative to room temperature.
/// 10% at 4 °C, 20% faster per extra °C.
pub fn cold_ferment_rate(fridge_temp_c: f64) -> f64 {
    0.10 * 1.20f64.powf(fridge_temp_c - 4.0)
}

/// Cold proof equivalent and the bulk reduction it allows.
///
/// A cold proof never replaces bulk fermentation: the reduction is only granted
/// above 7 °C with more than 2 equivalent hours, and is capped at 30% of the
/// equivalent, 20% of `bulk_h` and 2 h, whichever is smallest.
pub fn cold_proof_adjustment(cold_proof_h: f64, fridge_temp_c: f64, bulk_h: f64) -> ColdProofAdjustment {
    if cold_proof_h <= 0.0 {
        return ColdProofAdjustment::default();
    }

    let equivalent_h = cold_proof_h * cold_ferment_rate(fridge_temp_c);
    let bulk_reduction_h = if fridge_temp_c > 7.0 && equivalent_h > 2.0 {
        (equivalent_h * 0.3).min(bulk_h * 0.2).min(2.0)
    } else {
        0.0
    };

    ColdProofAdjustment {
        equivalent_h,
        bulk_reduction_h,
    }
}

/// Apply a cold-proof reduction, flooring the result at 3 h.
pub fn apply_cold_proof_reduction(bulk_h: f64, reduction_h: f64) -> f64 {
    (bulk_h - reduction_h).max(COLD_PROOF_BULK_FLOOR_H)
}

/// Fixed ±15% uncertainty band around the bulk time.
pub fn time_range(bulk_h: f64) -> (f64, f64) {
    (bulk_h * 0.85, bulk_h * 1.15)
}

/// Whole hours and remaining minutes of a duration in hours.
pub fn hours_minutes(h: f64) -> (u32, u32) {
    let hours = h.floor();
    let minutes = ((h - hours) * 60.0).round();
    if minutes >= 60.0 {
        return (hours as u32 + 1, 0);
    }
    (hours as u32, minutes as u32)
}

/// Overall window (bulk range plus cold proof) in whole hours.
pub fn total_window_h(min_h: f64, max_h: f64, cold_proof_h: f64) -> (u32, u32) {
    (
        (min_h + cold_proof_h).floor() as u32,
        (max_h + cold_proof_h).ceil() as u32,
    )
}

/// Stretch-and-fold plan.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct FoldingSchedule {
    pub folds: u32,
    pub interval_min: u32,
    /// Hours spanned by the folds, rounded to one decimal.
    pub total_h: f64,
}

/// Wetter dough gets more folds at tighter intervals.
pub fn folding_schedule(hydration: f64) -> FoldingSchedule {
    let mut folds = 3;
    if hydration > 75.0 {
        folds += 1;
    }
    if hydration > 80.0 {
        folds += 1;
    }
    if hydration > 85.0 {
        folds += 1;
    }

    let interval_min = if hydration > 80.0 {
        15
    } else if hydration > 75.0 {
        18
    } else {
        20
    };
    let total_h = ((folds * interval_min) as f64 / 60.0 * 10.0).round() / 10.0;

    FoldingSchedule {
        folds,
        interval_min,
        total_h,
    }
}

/// Baking times per loaf, in minutes.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct BakingTimes {
    pub weight_per_loaf_g: f64,
    pub total_min: u32,
    pub covered_min: u32,
    pub uncovered_min: u32,
}

/// 40 min for a 1 kg loaf, scaling with the square root of loaf weight.
/// 55% of the bake is covered (lid on, or steam).
pub fn baking_times(total_weight_g: f64, loaves: NonZeroU32) -> BakingTimes {
    let weight_per_loaf_g = total_weight_g / loaves.get() as f64;
    let total = (40.0 * (weight_per_loaf_g / 1000.0).sqrt()).round();
    let covered = (total * 0.55).round();

    BakingTimes {
        weight_per_loaf_g,
        total_min: total as u32,
        covered_min: covered as u32,
        uncovered_min: (total - covered) as u32,
    }
}

/// One step of a bake: oven temperature and minutes.
#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
pub struct BakeStep {
    pub label: &'static str,
    pub temp_c: u32,
    pub minutes: u32,
}

/// How the loaf is baked.
#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BakeMethod {
    DutchOven,
    /// Open bake in an oven with a steam function.
    OpenSteam,
}

/// Oven guidance for a method.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct BakePlan {
    pub method: BakeMethod,
    pub preheat_c: u32,
    pub steps: [BakeStep; 2],
}

pub fn bake_plan(method: BakeMethod, times: &BakingTimes) -> BakePlan {
    let (first, second) = match method {
        BakeMethod::DutchOven => (("lid on", 230), ("lid off", 220)),
        BakeMethod::OpenSteam => (("with steam", 240), ("without steam", 210)),
    };
    BakePlan {
        method,
        preheat_c: 250,
        steps: [
            BakeStep {
                label: first.0,
                temp_c: first.1,
                minutes: times.covered_min,
            },
            BakeStep {
                label: second.0,
                temp_c: second.1,
                minutes: times.uncovered_min,
            },
        ],
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
    fn test_cold_proof_noop_without_hours() {
        assert_eq!(cold_proof_adjustment(0.0, 10.0, 5.0), ColdProofAdjustment::default());
        assert_eq!(cold_proof_adjustment(-2.0, 12.0, 5.0), ColdProofAdjustment::default());
    }

    #[test]
    fn test_cold_proof_cold_fridge_keeps_bulk() {
        // 12 h at 4 °C = 1.2 h equivalent, no reduction
        let adj = cold_proof_adjustment(12.0, 4.0, 5.0);
        assert_relative_eq!(adj.equivalent_h, 1.2, epsilon = 1e-12);
        assert_eq!(adj.bulk_reduction_h, 0.0);
    }

    #[test]
    fn test_cold_proof_warm_fridge_reduction_caps() {
        // 16 h at 8 °C: rate = 0.1 * 1.2^4 = 0.20736, equivalent ≈ 3.32 h
        let adj = cold_proof_adjustment(16.0, 8.0, 5.0);
        assert_relative_eq!(adj.equivalent_h, 16.0 * 0.20736, epsilon = 1e-9);
        // min(0.995, 1.0, 2.0)
        assert_relative_eq!(adj.bulk_reduction_h, adj.equivalent_h * 0.3, epsilon = 1e-12);

        // long proof in a very warm fridge hits the 20%-of-bulk cap
        let adj = cold_proof_adjustment(48.0, 10.0, 5.0);
        assert_relative_eq!(adj.bulk_reduction_h, 1.0, epsilon = 1e-12);

        // long bulk hits the absolute 2 h cap
        let adj = cold_proof_adjustment(48.0, 10.0, 20.0);
        assert_relative_eq!(adj.bulk_reduction_h, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cold_proof_needs_more_than_two_equivalent_hours() {
        // 8 h at 8 °C ≈ 1.66 h equivalent
        let adj = cold_proof_adjustment(8.0, 8.0, 5.0);
        assert_eq!(adj.bulk_reduction_h, 0.0);
    }

    #[test]
    fn test_reduction_floor() {
        assert_relative_eq!(apply_cold_proof_reduction(4.0, 2.0), 3.0);
        assert_relative_eq!(apply_cold_proof_reduction(10.0, 2.0), 8.0);
    }

    #[test]
    fn test_time_range_band() {
        let (lo, hi) = time_range(10.0);
        assert_relative_eq!(lo, 8.5, epsilon = 1e-12);
        assert_relative_eq!(hi, 11.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hours_minutes() {
        assert_eq!(hours_minutes(5.0), (5, 0));
        assert_eq!(hours_minutes(4.25), (4, 15));
        assert_eq!(hours_minutes(13.3), (13, 18));
    }

    #[test]
    fn test_hours_minutes_carries_full_hour() {
        assert_eq!(hours_minutes(4.995), (5, 0));
        assert_eq!(hours_minutes(23.999), (24, 0));
        assert_eq!(hours_minutes(4.99), (4, 59));
    }

    #[test]
    fn test_total_window() {
        assert_eq!(total_window_h(4.25, 5.75, 12.0), (16, 18));
    }

    #[test]
    fn test_folding_by_hydration() {
        assert_eq!(
            folding_schedule(70.0),
            FoldingSchedule { folds: 3, interval_min: 20, total_h: 1.0 }
        );
        assert_eq!(
            folding_schedule(75.0),
            FoldingSchedule { folds: 3, interval_min: 20, total_h: 1.0 }
        );
        assert_eq!(
            folding_schedule(78.0),
            FoldingSchedule { folds: 4, interval_min: 18, total_h: 1.2 }
        );
        assert_eq!(
            folding_schedule(82.0),
            FoldingSchedule { folds: 5, interval_min: 15, total_h: 1.3 }
        );
        assert_eq!(
            folding_schedule(90.0),
            FoldingSchedule { folds: 6, interval_min: 15, total_h: 1.5 }
        );
    }

    #[test]
    fn test_baking_two_loaves() {
        let loaves = NonZeroU32::new(2).unwrap();
        let b = baking_times(1000.0, loaves);
        assert_relative_eq!(b.weight_per_loaf_g, 500.0);
        assert_eq!((b.total_min, b.covered_min, b.uncovered_min), (28, 15, 13));
    }

    #[test]
    fn test_baking_one_kilo_loaf() {
        let b = baking_times(1000.0, NonZeroU32::MIN);
        assert_eq!((b.total_min, b.covered_min, b.uncovered_min), (40, 22, 18));
    }

    #[test]
    fn test_bake_plans() {
        let b = baking_times(1000.0, NonZeroU32::MIN);
        let dutch = bake_plan(BakeMethod::DutchOven, &b);
        assert_eq!(dutch.preheat_c, 250);
        assert_eq!((dutch.steps[0].temp_c, dutch.steps[0].minutes), (230, 22));
        assert_eq!((dutch.steps[1].temp_c, dutch.steps[1].minutes), (220, 18));

        let open = bake_plan(BakeMethod::OpenSteam, &b);
        assert_eq!((open.steps[0].temp_c, open.steps[1].temp_c), (240, 210));
    }
}
