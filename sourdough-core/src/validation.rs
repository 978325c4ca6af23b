//! Advisory checks on recipe inputs. Nothing here blocks an estimate.

use serde::Serialize;
use std::fmt;

use crate::factors::whole_grain_fraction;
use crate::recipe::{FlourType, RecipeInputs};

/// Field checked by [`validate_inputs`].
#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Temperature,
    Starter,
    Flour,
    Water,
    Salt,
    WholeGrain,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Starter => "starter",
            Field::Flour => "flour",
            Field::Water => "water",
            Field::Salt => "salt",
            Field::WholeGrain => "whole grain",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Field::Temperature => "°C",
            _ => "g",
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    NotANumber,
    BelowMin { min: f64 },
    AboveMax { max: f64 },
    /// Whole grain weight exceeds total flour; the blend is treated as 100% whole grain.
    ExceedsFlour { flour_g: f64 },
}

#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
pub struct ValidationIssue {
    pub field: Field,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.field.unit();
        match self.kind {
            IssueKind::NotANumber => write!(f, "{} must be a number", self.field.name()),
            IssueKind::BelowMin { min } => write!(f, "{}: at least {min}{unit}", self.field.name()),
            IssueKind::AboveMax { max } => write!(f, "{}: at most {max}{unit}", self.field.name()),
            IssueKind::ExceedsFlour { flour_g } => write!(
                f,
                "{} exceeds total flour ({flour_g}{unit}); counted as 100%",
                self.field.name()
            ),
        }
    }
}

/// Accepted display ranges for the basic fields.
const RANGES: [(Field, f64, f64); 5] = [
    (Field::Temperature, 15.0, 30.0),
    (Field::Starter, 10.0, 2000.0),
    (Field::Flour, 100.0, 10000.0),
    (Field::Water, 50.0, 10000.0),
    (Field::Salt, 0.0, 500.0),
];

fn field_value(inputs: &RecipeInputs, field: Field) -> f64 {
    match field {
        Field::Temperature => inputs.temp_c,
        Field::Starter => inputs.starter_g,
        Field::Flour => inputs.flour_g,
        Field::Water => inputs.water_g,
        Field::Salt => inputs.salt_g,
        Field::WholeGrain => match inputs.flour_type() {
            FlourType::Mixed { whole_grain_g } => whole_grain_g,
            FlourType::White | FlourType::Whole => 0.0,
        },
    }
}

/// Range-check the basic fields and flag whole grain above total flour.
pub fn validate_inputs(inputs: &RecipeInputs) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (field, min, max) in RANGES {
        let v = field_value(inputs, field);
        let kind = if !v.is_finite() {
            IssueKind::NotANumber
        } else if v < min {
            IssueKind::BelowMin { min }
        } else if v > max {
            IssueKind::AboveMax { max }
        } else {
            continue;
        };
        issues.push(ValidationIssue { field, kind });
    }

    let whole_grain_g = field_value(inputs, Field::WholeGrain);
    if inputs.flour_g > 0.0 && whole_grain_g > inputs.flour_g {
        issues.push(ValidationIssue {
            field: Field::WholeGrain,
            kind: IssueKind::ExceedsFlour {
                flour_g: inputs.flour_g,
            },
        });
    }

    issues
}

/// Whole grain share of a mixed blend in percent (0 for other flours).
pub fn whole_grain_percent(inputs: &RecipeInputs) -> f64 {
    if inputs.flour_g <= 0.0 {
        return 0.0;
    }
    let whole_grain_g = field_value(inputs, Field::WholeGrain);
    whole_grain_fraction(whole_grain_g, inputs.flour_g) * 100.0
}

/// Short guidance for the baker based on temperature and starter amount.
pub fn info_notes(temp_c: f64, starter_pct: f64) -> Vec<&'static str> {
    let mut notes = Vec::with_capacity(2);

    notes.push(if temp_c < 20.0 {
        "Low temperature gives slow fermentation and a more complex flavour. Good for an overnight rise."
    } else if temp_c > 26.0 {
        "High temperature gives fast fermentation. Watch the dough so it does not over-proof."
    } else {
        "Ideal fermentation temperature. The dough will develop nicely."
    });

    if starter_pct > 30.0 {
        notes.push("A lot of starter gives fast fermentation and a more sour flavour.");
    } else if starter_pct < 15.0 {
        notes.push("Little starter gives slower fermentation and a milder flavour.");
    }

    notes
}
