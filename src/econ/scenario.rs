use crate::error::{Result, ToolError};
use crate::model::{EconInput, Scenario, validate};

/// Derives a stressed input from `base`. The base is only borrowed, so the
/// caller's value is never touched.
pub fn apply_scenario(base: &EconInput, scenario: &Scenario) -> EconInput {
    let mut input = *base;

    input.ingredients.juice_per_liter *= scenario.apple_cost_multiplier;
    input.labor.hourly_rate *= scenario.labor_multiplier;
    input.labor.monthly_fixed *= scenario.labor_multiplier;
    input.production.volume_liters *= scenario.volume_multiplier;
    input.pricing.bottle_75cl_excl_vat *= scenario.price_multiplier;
    input.pricing.bottle_150cl_excl_vat *= scenario.price_multiplier;
    input.pricing.price_inflation_yearly = scenario.inflation_yearly;

    input
}

/// Applies `scenario` to `base` and validates the stressed input, so a
/// multiplier that drives a field out of bounds never reaches the core.
pub fn scenario_input(base: &EconInput, scenario: &Scenario) -> Result<EconInput> {
    Ok(validate(apply_scenario(base, scenario))?)
}

/// Looks a scenario up by name, ignoring ASCII case.
pub fn find_scenario<'a>(scenarios: &'a [Scenario], name: &str) -> Result<&'a Scenario> {
    scenarios
        .iter()
        .find(|scenario| scenario.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ToolError::UnknownScenario(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_ECON_INPUT, DEFAULT_SCENARIOS};
    use float_cmp::assert_approx_eq;
    use proptest::prelude::{prop_assert_eq, proptest};

    fn scenario() -> Scenario {
        Scenario::default()
    }

    #[test]
    fn default_scenario_only_overrides_inflation() {
        let result = apply_scenario(&DEFAULT_ECON_INPUT, &scenario());

        let mut expected = DEFAULT_ECON_INPUT;
        expected.pricing.price_inflation_yearly = 2.5;
        assert_eq!(result, expected);
    }

    #[test]
    fn volume_multiplier_scales_volume() {
        let scenario = Scenario {
            volume_multiplier: 2.0,
            ..scenario()
        };
        let result = apply_scenario(&DEFAULT_ECON_INPUT, &scenario);
        assert_approx_eq!(f64, result.production.volume_liters, 2000.0, epsilon = 1e-9);
        assert_eq!(
            result.production.wastage_percent,
            DEFAULT_ECON_INPUT.production.wastage_percent
        );
    }

    #[test]
    fn price_multiplier_scales_both_bottles() {
        let scenario = Scenario {
            price_multiplier: 1.25,
            ..scenario()
        };
        let result = apply_scenario(&DEFAULT_ECON_INPUT, &scenario);
        assert_approx_eq!(f64, result.pricing.bottle_75cl_excl_vat, 150.0, epsilon = 1e-9);
        assert_approx_eq!(f64, result.pricing.bottle_150cl_excl_vat, 275.0, epsilon = 1e-9);
    }

    #[test]
    fn apple_cost_multiplier_scales_juice_only() {
        let scenario = Scenario {
            apple_cost_multiplier: 1.1,
            ..scenario()
        };
        let result = apply_scenario(&DEFAULT_ECON_INPUT, &scenario);
        assert_approx_eq!(f64, result.ingredients.juice_per_liter, 13.2, epsilon = 1e-9);
        assert_eq!(
            result.ingredients.yeast_per_1000l,
            DEFAULT_ECON_INPUT.ingredients.yeast_per_1000l
        );
    }

    #[test]
    fn labor_multiplier_scales_rate_and_fixed() {
        let scenario = Scenario {
            labor_multiplier: 1.15,
            ..scenario()
        };
        let result = apply_scenario(&DEFAULT_ECON_INPUT, &scenario);
        assert_approx_eq!(f64, result.labor.hourly_rate, 402.5, epsilon = 1e-9);
        assert_approx_eq!(f64, result.labor.monthly_fixed, 11_500.0, epsilon = 1e-9);
        assert_eq!(result.labor.hours_per_batch, DEFAULT_ECON_INPUT.labor.hours_per_batch);
    }

    #[test]
    fn find_scenario_matches_case_insensitively() {
        let scenarios = DEFAULT_SCENARIOS;
        let found = find_scenario(&scenarios, "poor HARVEST").unwrap();
        assert_eq!(found.name, "Poor harvest");
        assert!(matches!(
            find_scenario(&scenarios, "drought"),
            Err(ToolError::UnknownScenario(name)) if name == "drought"
        ));
    }

    #[test]
    fn default_scenarios_yield_valid_inputs() {
        for scenario in &DEFAULT_SCENARIOS {
            assert!(scenario_input(&DEFAULT_ECON_INPUT, scenario).is_ok());
        }
    }

    #[test]
    fn scenario_input_rejects_out_of_bounds_result() {
        let scenario = Scenario {
            volume_multiplier: -1.0,
            inflation_yearly: 250.0,
            ..scenario()
        };

        match scenario_input(&DEFAULT_ECON_INPUT, &scenario) {
            Err(ToolError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.field("production.volumeLiters").is_some());
                assert!(errors.field("pricing.priceInflationYearly").is_some());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_base_is_left_untouched(
            volume in 0.1f64..5.0,
            price in 0.1f64..5.0,
            apple in 0.1f64..5.0,
            labor in 0.1f64..5.0,
            inflation in 0.0f64..100.0,
        ) {
            let base = DEFAULT_ECON_INPUT;
            let snapshot = base;
            let scenario = Scenario::new("prop", volume, price, apple, labor, inflation);

            let _ = apply_scenario(&base, &scenario);
            prop_assert_eq!(base, snapshot);
        }
    }
}
