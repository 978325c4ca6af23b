use chrono::{NaiveDateTime, Timelike};
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};
use sourdough_core::{
    BakeMethod, BakingTimes, FermentationResult, FlourType, FoldingSchedule, RecipeInputs,
    ValidationIssue, bake_plan, schedule::hours_minutes, validation::whole_grain_percent,
};

fn fmt_g(x: f64) -> String {
    let v = (x * 10.0).round() / 10.0;
    if (v - v.round()).abs() < 1e-9 {
        format!("{:.0} g", v)
    } else {
        format!("{:.1} g", v)
    }
}

fn fmt_hm(h: f64) -> String {
    let (hours, minutes) = hours_minutes(h);
    format!("{hours}h {minutes}min")
}

fn fmt_clock(t: NaiveDateTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

fn header(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            titles
                .iter()
                .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

pub fn recipe_table(inputs: &RecipeInputs, result: &FermentationResult) -> Table {
    let pct = &result.percentages;
    let mut table = header(&["Ingredient", "Amount", "Baker's %"]);

    let flour_note = match inputs.flour_type() {
        FlourType::White => "100% (white)".to_string(),
        FlourType::Whole => "100% (whole grain)".to_string(),
        FlourType::Mixed { .. } => {
            format!("100% ({:.0}% whole grain)", whole_grain_percent(inputs))
        }
    };
    table.add_row(vec![
        Cell::new("Flour"),
        Cell::new(fmt_g(inputs.flour_g)),
        Cell::new(flour_note),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(fmt_g(inputs.water_g)),
        Cell::new(format!("{:.0}% hydration", pct.hydration)),
    ]);
    table.add_row(vec![
        Cell::new("Starter"),
        Cell::new(fmt_g(inputs.starter_g)),
        Cell::new(format!("{:.0}%", pct.starter_pct)),
    ]);
    table.add_row(vec![
        Cell::new("Salt"),
        Cell::new(fmt_g(inputs.salt_g)),
        Cell::new(format!("{:.1}%", pct.salt_pct)),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(fmt_g(inputs.total_weight_g())),
        Cell::new(""),
    ]);
    table
}

pub fn fermentation_table(result: &FermentationResult, fridge_temp_c: f64) -> Table {
    let mut table = header(&["Stage", "Time", "Notes"]);

    table.add_row(vec![
        Cell::new("Bulk fermentation"),
        Cell::new(fmt_hm(result.bulk_time_h)),
        Cell::new(format!(
            "range {} – {}",
            fmt_hm(result.min_time_h),
            fmt_hm(result.max_time_h)
        )),
    ]);

    if let Some(rate) = result.cold_ferment_rate_pct() {
        table.add_row(vec![
            Cell::new("Cold proof"),
            Cell::new(format!("{}h", result.cold_proof_h)),
            Cell::new(format!(
                "at {fridge_temp_c}°C ≈ {:.1}h of fermentation ({rate:.0}% speed)",
                result.cold_proof_equivalent_h
            )),
        ]);
        let (lo, hi) = result.total_window_h();
        let note = if result.bulk_adjustment_h > 0.0 {
            format!("warm fridge: bulk shortened by {:.1}h", result.bulk_adjustment_h)
        } else if fridge_temp_c <= 6.0 {
            "good fridge temperature, no bulk adjustment".to_string()
        } else {
            String::new()
        };
        table.add_row(vec![
            Cell::new("Total (bulk + cold)").add_attribute(Attribute::Bold),
            Cell::new(format!("{lo}–{hi}h")),
            Cell::new(note),
        ]);
    }
    table
}

pub fn folding_table(folding: &FoldingSchedule, hydration: f64) -> Table {
    let mut table = header(&["Folds", "Interval", "Window", "Why"]);
    let why = if hydration > 80.0 {
        "very wet dough: extra folds for strength"
    } else if hydration > 75.0 {
        "wet dough: more folds for structure"
    } else {
        "standard number of folds"
    };
    table.add_row(vec![
        Cell::new(format!("{} stretch & folds", folding.folds)),
        Cell::new(format!("every {} min", folding.interval_min)),
        Cell::new(format!("first {:.1}h", folding.total_h)),
        Cell::new(why),
    ]);
    table
}

pub fn baking_table(times: &BakingTimes, loaves: u32) -> Table {
    let mut table = header(&["Method", "Preheat", "Step 1", "Step 2", "Total"]);
    for method in [BakeMethod::DutchOven, BakeMethod::OpenSteam] {
        let plan = bake_plan(method, times);
        let name = match method {
            BakeMethod::DutchOven => "Dutch oven",
            BakeMethod::OpenSteam => "Open bake (steam oven)",
        };
        let [first, second] = plan.steps;
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{}°C", plan.preheat_c)),
            Cell::new(format!("{} {}°C, {} min", first.label, first.temp_c, first.minutes)),
            Cell::new(format!("{} {}°C, {} min", second.label, second.temp_c, second.minutes)),
            Cell::new(format!("~{} min", times.total_min)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Loaves"),
        Cell::new(format!("{loaves} × {:.0} g", times.weight_per_loaf_g)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ]);
    table
}

pub fn print_notes(notes: &[&str], issues: &[ValidationIssue]) {
    if !notes.is_empty() {
        println!("\nNotes:");
        for note in notes {
            println!("• {note}");
        }
    }
    if !issues.is_empty() {
        println!("\nCheck your inputs:");
        for issue in issues {
            println!("• {issue}");
        }
    }
}

pub fn print_timer(started: NaiveDateTime, finishes: NaiveDateTime, total_h: f64) {
    println!("\n=== Timer ===");
    println!("- Start:   {}", fmt_clock(started));
    println!("- Ready:   ~{} ({})", fmt_clock(finishes), fmt_hm(total_h));
}
