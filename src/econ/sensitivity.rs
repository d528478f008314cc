use tracing::debug;

use crate::econ::calc_economics;
use crate::error::{Result, ToolError};
use crate::model::{EconInput, SensitivityPoint, SensitivityRange};

/// Most intervals a single sweep may request.
pub const MAX_SENSITIVITY_STEPS: u32 = 10_000;

/// Recomputes the batch economics across a range of 75cl prices.
///
/// Returns `steps + 1` evenly spaced points from `min` to `max` inclusive. A
/// range with `min == max` or no steps collapses to a single point at `min`.
pub fn price_sensitivity(
    input: &EconInput,
    range: SensitivityRange,
) -> Result<Vec<SensitivityPoint>> {
    let SensitivityRange { min, max, steps } = range;
    let invalid = |reason: &str| ToolError::InvalidSensitivityRange {
        min,
        max,
        reason: reason.to_string(),
    };
    if !min.is_finite() || !max.is_finite() {
        return Err(invalid("bounds must be finite"));
    }
    if min < 0.0 {
        return Err(invalid("prices cannot be negative"));
    }
    if min > max {
        return Err(invalid("min must not exceed max"));
    }
    if steps > MAX_SENSITIVITY_STEPS {
        return Err(invalid(&format!("steps must not exceed {MAX_SENSITIVITY_STEPS}")));
    }

    let prices: Vec<f64> = if steps == 0 || min == max {
        vec![min]
    } else {
        let step = (max - min) / f64::from(steps);
        (0..=steps)
            .map(|index| {
                if index == steps {
                    max
                } else {
                    min + step * f64::from(index)
                }
            })
            .collect()
    };
    debug!(points = prices.len(), min, max, "running price sensitivity");

    let points = prices
        .into_iter()
        .map(|price| {
            let mut priced = *input;
            priced.pricing.bottle_75cl_excl_vat = price;
            let result = calc_economics(&priced);
            SensitivityPoint {
                price,
                margin: result.gross_margin_75cl,
                margin_pct: result.gross_margin_pct_75cl,
                revenue: result.total_revenue,
            }
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_ECON_INPUT;
    use float_cmp::assert_approx_eq;
    use proptest::prelude::{prop_assert, proptest};
    use rstest::rstest;

    fn range(min: f64, max: f64, steps: u32) -> SensitivityRange {
        SensitivityRange { min, max, steps }
    }

    #[test]
    fn samples_inclusive_range() {
        let points = price_sensitivity(&DEFAULT_ECON_INPUT, range(80.0, 140.0, 6)).unwrap();

        assert_eq!(points.len(), 7);
        assert_eq!(points[0].price, 80.0);
        assert_eq!(points[6].price, 140.0);
        assert_approx_eq!(f64, points[3].price, 110.0, epsilon = 1e-9);
        for pair in points.windows(2) {
            assert!(pair[1].margin > pair[0].margin);
            assert!(pair[1].margin_pct > pair[0].margin_pct);
            assert!(pair[1].revenue > pair[0].revenue);
        }
    }

    #[test]
    fn single_point_matches_direct_calculation() {
        let points = price_sensitivity(&DEFAULT_ECON_INPUT, range(100.0, 100.0, 1)).unwrap();
        assert_eq!(points.len(), 1);

        let mut priced = DEFAULT_ECON_INPUT;
        priced.pricing.bottle_75cl_excl_vat = 100.0;
        let direct = calc_economics(&priced);
        assert_approx_eq!(f64, points[0].margin, direct.gross_margin_75cl, epsilon = 1e-2);
        assert_approx_eq!(f64, points[0].margin_pct, direct.gross_margin_pct_75cl, epsilon = 1e-2);
    }

    #[test]
    fn zero_steps_yields_min_only() {
        let points = price_sensitivity(&DEFAULT_ECON_INPUT, range(90.0, 130.0, 0)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, 90.0);
    }

    #[test]
    fn zero_price_point_has_zero_margin_pct() {
        let points = price_sensitivity(&DEFAULT_ECON_INPUT, range(0.0, 10.0, 2)).unwrap();
        assert_eq!(points[0].margin_pct, 0.0);
        assert!(points[0].margin < 0.0);
    }

    #[rstest]
    #[case(range(150.0, 100.0, 5))]
    #[case(range(-1.0, 100.0, 5))]
    #[case(range(f64::NAN, 100.0, 5))]
    #[case(range(0.0, f64::INFINITY, 5))]
    #[case(range(0.0, 100.0, u32::MAX))]
    fn rejects_unusable_ranges(#[case] range: SensitivityRange) {
        assert!(matches!(
            price_sensitivity(&DEFAULT_ECON_INPUT, range),
            Err(ToolError::InvalidSensitivityRange { .. })
        ));
    }

    #[test]
    fn step_cap_is_inclusive() {
        let points =
            price_sensitivity(&DEFAULT_ECON_INPUT, range(0.0, 100.0, MAX_SENSITIVITY_STEPS))
                .unwrap();
        assert_eq!(points.len(), MAX_SENSITIVITY_STEPS as usize + 1);
        assert_eq!(points.last().unwrap().price, 100.0);

        let error = price_sensitivity(
            &DEFAULT_ECON_INPUT,
            range(0.0, 100.0, MAX_SENSITIVITY_STEPS + 1),
        )
        .unwrap_err();
        assert!(error.to_string().contains("steps must not exceed 10000"));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_margins_never_fall_as_price_rises(
            min in 1.0f64..200.0,
            span in 0.0f64..300.0,
            steps in 1u32..40,
        ) {
            let points = price_sensitivity(&DEFAULT_ECON_INPUT, range(min, min + span, steps))
                .unwrap();
            for pair in points.windows(2) {
                prop_assert!(pair[1].price >= pair[0].price);
                prop_assert!(pair[1].margin >= pair[0].margin);
                prop_assert!(pair[1].margin_pct >= pair[0].margin_pct);
            }
        }
    }
}
