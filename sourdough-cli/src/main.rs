use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveTime};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use sourdough_core::{
    AdvancedSettings, Autolyse, BakeTimer, BakingTimes, FeedingRatio, FermentationResult,
    FlourType, FoldingSchedule, PeakStatus, RecipeInputs, ValidationIssue, baking_times,
    estimate_fermentation, info_notes, validate_inputs,
};
use std::{
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
};
use tracing::warn;

mod logging;
mod render;

use logging::LogLevel;

/// Flour CLI enum mirrors sourdough-core (derive for Clap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FlourFlag {
    White,
    Whole,
    Mixed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
enum RatioFlag {
    #[value(name = "1:1:1")]
    #[serde(rename = "1:1:1")]
    OneToOne,
    #[value(name = "1:2:2")]
    #[serde(rename = "1:2:2")]
    OneToTwo,
    #[value(name = "1:3:3")]
    #[serde(rename = "1:3:3")]
    OneToThree,
    #[value(name = "1:5:5")]
    #[serde(rename = "1:5:5")]
    OneToFive,
    #[value(name = "1:10:10")]
    #[serde(rename = "1:10:10")]
    OneToTen,
}

impl From<RatioFlag> for FeedingRatio {
    fn from(r: RatioFlag) -> Self {
        match r {
            RatioFlag::OneToOne => FeedingRatio::OneToOne,
            RatioFlag::OneToTwo => FeedingRatio::OneToTwo,
            RatioFlag::OneToThree => FeedingRatio::OneToThree,
            RatioFlag::OneToFive => FeedingRatio::OneToFive,
            RatioFlag::OneToTen => FeedingRatio::OneToTen,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PeakFlag {
    Rising,
    Peak,
    Falling,
    Normal,
}

impl From<PeakFlag> for PeakStatus {
    fn from(p: PeakFlag) -> Self {
        match p {
            PeakFlag::Rising => PeakStatus::Rising,
            PeakFlag::Peak => PeakStatus::Peak,
            PeakFlag::Falling => PeakStatus::Falling,
            PeakFlag::Normal => PeakStatus::Normal,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sourdough",
    about = "Estimate bulk fermentation, folds and baking for a sourdough loaf.",
    version
)]
struct Args {
    /// Dough temperature in °C
    #[arg(long, default_value_t = 22.0)]
    temp: f64,

    /// Flour in grams
    #[arg(long, default_value_t = 500.0)]
    flour: f64,

    /// Water in grams
    #[arg(long, default_value_t = 375.0)]
    water: f64,

    /// Starter in grams
    #[arg(long, default_value_t = 100.0)]
    starter: f64,

    /// Salt in grams
    #[arg(long, default_value_t = 10.0)]
    salt: f64,

    /// Use the advanced settings below (flour type, starter state, cold proof)
    #[arg(long)]
    advanced: bool,

    /// Flour type
    #[arg(long, value_enum, default_value_t = FlourFlag::White)]
    flour_type: FlourFlag,

    /// Whole grain grams within the flour (mixed flour only)
    #[arg(long, default_value_t = 0.0)]
    whole_grain: f64,

    /// Starter feeding ratio (starter:flour:water)
    #[arg(long, value_enum, default_value_t = RatioFlag::OneToFive)]
    feeding_ratio: RatioFlag,

    /// Where the starter is in its rise
    #[arg(long, value_enum, default_value_t = PeakFlag::Normal)]
    peak: PeakFlag,

    /// Dough had an autolyse rest
    #[arg(long)]
    autolyse: bool,

    /// Cold proof in the fridge, in hours (0 = none)
    #[arg(long, default_value_t = 0.0)]
    cold_proof: f64,

    /// Fridge temperature in °C
    #[arg(long, default_value_t = 4.0)]
    fridge_temp: f64,

    /// Number of loaves to shape
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
    loaves: u32,

    /// Timer start time HH:MM (optional); defaults to now
    #[arg(long)]
    start: Option<String>,

    /// Print the results as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Log level (RUST_LOG overrides)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Load a profile JSON before applying CLI overrides
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the current effective parameters to a profile JSON
    #[arg(long)]
    save_profile: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Profile {
    temp: f64,
    flour: f64,
    water: f64,
    starter: f64,
    salt: f64,
    advanced: bool,
    flour_type: FlourFlag,
    whole_grain: f64,
    feeding_ratio: RatioFlag,
    peak: PeakFlag,
    autolyse: bool,
    cold_proof: f64,
    fridge_temp: f64,
    loaves: u32,
    start: Option<String>,
}

impl From<&Args> for Profile {
    fn from(a: &Args) -> Self {
        Profile {
            temp: a.temp,
            flour: a.flour,
            water: a.water,
            starter: a.starter,
            salt: a.salt,
            advanced: a.advanced,
            flour_type: a.flour_type,
            whole_grain: a.whole_grain,
            feeding_ratio: a.feeding_ratio,
            peak: a.peak,
            autolyse: a.autolyse,
            cold_proof: a.cold_proof,
            fridge_temp: a.fridge_temp,
            loaves: a.loaves,
            start: a.start.clone(),
        }
    }
}

impl Args {
    /// Fill every flag left at its default from `p` (CLI wins).
    fn merge_profile(&mut self, p: Profile) {
        // Defaults snapshot to detect "unset" fields
        let def = Args::parse_from(["sourdough"]);

        macro_rules! take {
            ($($field:ident),+) => {
                $(if self.$field == def.$field {
                    self.$field = p.$field;
                })+
            };
        }

        take!(
            temp,
            flour,
            water,
            starter,
            salt,
            advanced,
            flour_type,
            whole_grain,
            feeding_ratio,
            peak,
            autolyse,
            cold_proof,
            fridge_temp,
            loaves
        );
        if self.start.is_none() {
            self.start = p.start;
        }
    }

    fn recipe(&self) -> RecipeInputs {
        let advanced = self.advanced.then(|| AdvancedSettings {
            flour: match self.flour_type {
                FlourFlag::White => FlourType::White,
                FlourFlag::Whole => FlourType::Whole,
                FlourFlag::Mixed => FlourType::Mixed {
                    whole_grain_g: self.whole_grain,
                },
            },
            feeding_ratio: self.feeding_ratio.into(),
            peak: self.peak.into(),
            autolyse: if self.autolyse { Autolyse::Yes } else { Autolyse::No },
            cold_proof_h: self.cold_proof,
            fridge_temp_c: self.fridge_temp,
        });

        RecipeInputs {
            temp_c: self.temp,
            flour_g: self.flour,
            water_g: self.water,
            starter_g: self.starter,
            salt_g: self.salt,
            advanced,
        }
    }
}

fn load_profile(path: &Path) -> Result<Profile> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile: {}", path.display()))?;
    serde_json::from_str(&txt).with_context(|| format!("invalid profile JSON: {}", path.display()))
}

fn save_profile(path: &Path, args: &Args) -> Result<()> {
    let json = serde_json::to_string_pretty(&Profile::from(args))?;
    fs::write(path, json).with_context(|| format!("failed to save profile: {}", path.display()))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    inputs: &'a RecipeInputs,
    result: &'a FermentationResult,
    folding: FoldingSchedule,
    baking: BakingTimes,
    issues: &'a [ValidationIssue],
    notes: &'a [&'a str],
}

fn run(mut args: Args) -> Result<()> {
    // Load profile if present, then apply CLI overrides (CLI wins).
    if let Some(path) = args.profile.clone() {
        let p = load_profile(&path)?;
        args.merge_profile(p);
    }

    if let Some(path) = &args.save_profile {
        save_profile(path, &args)?;
        println!("Profile saved to {}", path.display());
    }

    // Validations
    if args.cold_proof.is_nan() || args.cold_proof < 0.0 {
        bail!("cold-proof must be >= 0");
    }
    if args.whole_grain.is_nan() || args.whole_grain < 0.0 {
        bail!("whole-grain must be >= 0");
    }
    let Some(loaves) = NonZeroU32::new(args.loaves) else {
        bail!("loaves must be at least 1");
    };

    let inputs = args.recipe();
    let issues = validate_inputs(&inputs);
    for issue in &issues {
        warn!(%issue, "input outside the usual range");
    }

    let result = estimate_fermentation(&inputs)?;
    let folding = result.folding();
    let baking = baking_times(inputs.total_weight_g(), loaves);
    let notes = info_notes(inputs.temp_c, result.percentages.starter_pct);

    if args.json {
        let report = JsonReport {
            inputs: &inputs,
            result: &result,
            folding,
            baking,
            issues: &issues,
            notes: &notes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== Recipe ===");
    println!("{}", render::recipe_table(&inputs, &result));
    println!("\n=== Fermentation ===");
    println!("{}", render::fermentation_table(&result, inputs.fridge_temp_c()));
    println!("\n=== Folding ===");
    println!("{}", render::folding_table(&folding, result.percentages.hydration));
    println!("\n=== Baking ===");
    println!("{}", render::baking_table(&baking, args.loaves));
    render::print_notes(&notes, &issues);

    // Timer schedule from the start time
    let today = Local::now().naive_local();
    let started = match args.start.as_deref() {
        Some(hhmm) => {
            let t = NaiveTime::parse_from_str(hhmm, "%H:%M")
                .with_context(|| format!("invalid start time (expected HH:MM): {hhmm}"))?;
            today.date().and_time(t)
        }
        None => today,
    };
    let mut timer = BakeTimer::default();
    let finishes = timer
        .start(started, result.total_time_with_cold_h)
        .with_context(|| {
            format!(
                "finish time out of range for {:.1} h of fermentation",
                result.total_time_with_cold_h
            )
        })?;
    render::print_timer(started, finishes, result.total_time_with_cold_h);

    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.log_level);

    if let Err(e) = run(args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_basic_recipe() {
        let args = Args::parse_from(["sourdough"]);
        let r = args.recipe();
        assert_eq!(r.temp_c, 22.0);
        assert_eq!(r.flour_g, 500.0);
        assert!(r.advanced.is_none());
    }

    #[test]
    fn test_advanced_flags_build_settings() {
        let args = Args::parse_from([
            "sourdough",
            "--advanced",
            "--flour-type",
            "mixed",
            "--whole-grain",
            "150",
            "--feeding-ratio",
            "1:10:10",
            "--peak",
            "peak",
            "--autolyse",
            "--cold-proof",
            "12",
        ]);
        let adv = args.recipe().advanced.unwrap();
        assert_eq!(adv.flour, FlourType::Mixed { whole_grain_g: 150.0 });
        assert_eq!(adv.feeding_ratio, FeedingRatio::OneToTen);
        assert_eq!(adv.peak, PeakStatus::Peak);
        assert_eq!(adv.autolyse, Autolyse::Yes);
        assert_eq!(adv.cold_proof_h, 12.0);
        assert_eq!(adv.fridge_temp_c, 4.0);
    }

    #[test]
    fn test_profile_fills_defaults_but_cli_wins() {
        let saved = Args::parse_from(["sourdough", "--temp", "18", "--water", "400", "--advanced"]);
        let json = serde_json::to_string(&Profile::from(&saved)).unwrap();
        let profile: Profile = serde_json::from_str(&json).unwrap();

        let mut args = Args::parse_from(["sourdough", "--water", "350"]);
        args.merge_profile(profile);
        assert_eq!(args.temp, 18.0);
        assert_eq!(args.water, 350.0);
        assert!(args.advanced);
    }

    #[test]
    fn test_huge_cold_proof_is_an_error() {
        let args = Args::parse_from([
            "sourdough",
            "--advanced",
            "--cold-proof",
            "1e10",
            "--start",
            "08:00",
        ]);
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_non_numeric_whole_grain_is_an_error() {
        let args = Args::parse_from([
            "sourdough",
            "--advanced",
            "--flour-type",
            "mixed",
            "--whole-grain",
            "NaN",
        ]);
        assert!(run(args).is_err());
        let args = Args::parse_from(["sourdough", "--advanced", "--whole-grain=-5"]);
        assert!(run(args).is_err());
    }

    #[test]
    fn test_feeding_ratio_profile_names() {
        let json = serde_json::to_string(&RatioFlag::OneToTen).unwrap();
        assert_eq!(json, "\"1:10:10\"");
    }
}
