use tracing::debug;

use crate::error::ValidationErrors;
use crate::model::{EconInput, Scenario};

/// Smallest batch the engine accepts, in liters.
pub const MIN_VOLUME_LITERS: f64 = 1.0;

/// Checks every field of `input` against its declared bounds.
///
/// Values are never clamped: the input comes back untouched on success, and
/// on failure every violation is reported, keyed by its camelCase path.
pub fn validate(input: EconInput) -> Result<EconInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut check = |field: &str, value: f64, min: f64, max: Option<f64>| {
        check_bounds(&mut errors, field, value, min, max);
    };

    let EconInput {
        ingredients,
        packaging,
        labor,
        overhead,
        production,
        pricing,
    } = &input;

    check("ingredients.juicePerLiter", ingredients.juice_per_liter, 0.0, None);
    check("ingredients.yeastPer1000L", ingredients.yeast_per_1000l, 0.0, None);
    check("ingredients.sugarPerKg", ingredients.sugar_per_kg, 0.0, None);
    check("ingredients.otherPerBottle", ingredients.other_per_bottle, 0.0, None);

    check("packaging.bottle75cl", packaging.bottle_75cl, 0.0, None);
    check("packaging.bottle150cl", packaging.bottle_150cl, 0.0, None);
    check("packaging.label", packaging.label, 0.0, None);
    check("packaging.cap", packaging.cap, 0.0, None);
    check("packaging.box", packaging.box_cost, 0.0, None);

    check("labor.hourlyRate", labor.hourly_rate, 0.0, None);
    check("labor.hoursPerBatch", labor.hours_per_batch, 0.0, None);
    check("labor.monthlyFixed", labor.monthly_fixed, 0.0, None);

    check("overhead.monthlyFixed", overhead.monthly_fixed, 0.0, None);
    check("overhead.perLiter", overhead.per_liter, 0.0, None);
    check("overhead.percentOfCogs", overhead.percent_of_cogs, 0.0, Some(100.0));

    check(
        "production.volumeLiters",
        production.volume_liters,
        MIN_VOLUME_LITERS,
        None,
    );
    check("production.wastagePercent", production.wastage_percent, 0.0, Some(100.0));
    check("production.yieldEfficiency", production.yield_efficiency, 0.0, Some(100.0));

    check("pricing.bottle75clExclVat", pricing.bottle_75cl_excl_vat, 0.0, None);
    check("pricing.bottle150clExclVat", pricing.bottle_150cl_excl_vat, 0.0, None);
    check(
        "pricing.priceInflationYearly",
        pricing.price_inflation_yearly,
        0.0,
        Some(100.0),
    );

    if errors.is_empty() {
        Ok(input)
    } else {
        debug!(violations = errors.len(), "economics input rejected");
        Err(errors)
    }
}

/// Checks the multipliers and inflation of a scenario loaded from outside.
///
/// Multipliers must be finite and non-negative; `inflationYearly` follows the
/// same 0–100 bound as the input it replaces.
pub fn validate_scenario(scenario: Scenario) -> Result<Scenario, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let mut check = |field: &str, value: f64, min: f64, max: Option<f64>| {
        check_bounds(&mut errors, field, value, min, max);
    };

    check("volumeMultiplier", scenario.volume_multiplier, 0.0, None);
    check("priceMultiplier", scenario.price_multiplier, 0.0, None);
    check("appleCostMultiplier", scenario.apple_cost_multiplier, 0.0, None);
    check("laborMultiplier", scenario.labor_multiplier, 0.0, None);
    check("inflationYearly", scenario.inflation_yearly, 0.0, Some(100.0));

    if errors.is_empty() {
        Ok(scenario)
    } else {
        debug!(
            scenario = %scenario.name,
            violations = errors.len(),
            "scenario rejected"
        );
        Err(errors)
    }
}

fn check_bounds(
    errors: &mut ValidationErrors,
    field: &str,
    value: f64,
    min: f64,
    max: Option<f64>,
) {
    if !value.is_finite() {
        errors.push(field, "must be a finite number");
    } else if value < min {
        errors.push(field, format!("must be at least {min}"));
    } else if let Some(max) = max.filter(|max| value > *max) {
        errors.push(field, format!("must be at most {max}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_ECON_INPUT, DEFAULT_SCENARIOS};

    #[test]
    fn default_input_is_valid() {
        assert_eq!(validate(DEFAULT_ECON_INPUT), Ok(DEFAULT_ECON_INPUT));
    }

    #[test]
    fn volume_below_one_liter_is_rejected() {
        let mut input = DEFAULT_ECON_INPUT;
        input.production.volume_liters = 0.5;

        let errors = validate(input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.field("production.volumeLiters").is_some());
    }

    #[test]
    fn every_violation_is_reported() {
        let mut input = DEFAULT_ECON_INPUT;
        input.ingredients.juice_per_liter = -1.0;
        input.overhead.percent_of_cogs = 101.0;
        input.production.wastage_percent = f64::NAN;

        let errors = validate(input).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.field("ingredients.juicePerLiter").unwrap().message,
            "must be at least 0"
        );
        assert_eq!(
            errors.field("overhead.percentOfCogs").unwrap().message,
            "must be at most 100"
        );
        assert_eq!(
            errors.field("production.wastagePercent").unwrap().message,
            "must be a finite number"
        );
    }

    #[test]
    fn boundary_percentages_are_accepted() {
        let mut input = DEFAULT_ECON_INPUT;
        input.production.wastage_percent = 100.0;
        input.production.yield_efficiency = 0.0;
        input.pricing.price_inflation_yearly = 100.0;

        assert!(validate(input).is_ok());
    }

    #[test]
    fn default_scenarios_are_valid() {
        for scenario in DEFAULT_SCENARIOS {
            assert!(validate_scenario(scenario).is_ok());
        }
    }

    #[test]
    fn negative_multiplier_and_runaway_inflation_are_rejected() {
        let scenario = Scenario {
            volume_multiplier: -1.0,
            inflation_yearly: 250.0,
            ..Scenario::default()
        };

        let errors = validate_scenario(scenario).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.field("volumeMultiplier").unwrap().message,
            "must be at least 0"
        );
        assert_eq!(
            errors.field("inflationYearly").unwrap().message,
            "must be at most 100"
        );
    }
}
