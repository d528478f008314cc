use tracing::{debug, warn};

use crate::model::{CostBreakdown, EconInput, EconResult, LITERS_PER_75CL, LITERS_PER_150CL};

/// Calculates cost of goods, margins, revenue, and breakeven for one batch.
///
/// Ingredients are charged on the nominal volume since juice and yeast are
/// bought before any loss is known, while every per-unit figure is spread
/// over the effective volume left after wastage and yield losses. Any figure
/// whose divisor is zero resolves to 0 rather than failing.
pub fn calc_economics(input: &EconInput) -> EconResult {
    let EconInput {
        ingredients,
        packaging,
        labor,
        overhead,
        production,
        pricing,
    } = input;

    let volume = production.volume_liters;
    let effective_volume_liters = volume
        * (1.0 - production.wastage_percent / 100.0)
        * (production.yield_efficiency / 100.0);

    // Both counts draw on the same liquid; they are not an allocation.
    let bottles_75cl = bottle_count(effective_volume_liters, LITERS_PER_75CL);
    let bottles_150cl = bottle_count(effective_volume_liters, LITERS_PER_150CL);

    let juice = ingredients.juice_per_liter * volume;
    let yeast = ingredients.yeast_per_1000l * volume / 1000.0;
    let ingredients_cost = juice + yeast;

    let closure_cost = packaging.label + packaging.cap;
    let packaging_cost = bottles_75cl as f64 * (packaging.bottle_75cl + closure_cost)
        + bottles_150cl as f64 * (packaging.bottle_150cl + closure_cost);

    let labor_cost = labor.hours_per_batch * labor.hourly_rate + labor.monthly_fixed;

    let per_liter_overhead = overhead.per_liter * effective_volume_liters;
    // Allocated on ingredients + packaging only, never on labor or overhead.
    let percent_overhead = overhead.percent_of_cogs / 100.0 * (ingredients_cost + packaging_cost);
    let overhead_cost = overhead.monthly_fixed + per_liter_overhead + percent_overhead;

    let total_cogs = ingredients_cost + packaging_cost + labor_cost + overhead_cost;

    let cogs_per_liter = ratio(total_cogs, effective_volume_liters);
    let cogs_per_bottle_75cl = cogs_per_liter * LITERS_PER_75CL;
    let cogs_per_bottle_150cl = cogs_per_liter * LITERS_PER_150CL;

    let price_75cl = pricing.bottle_75cl_excl_vat;
    let price_150cl = pricing.bottle_150cl_excl_vat;

    let revenue_75cl = bottles_75cl as f64 * price_75cl;
    let revenue_150cl = bottles_150cl as f64 * price_150cl;
    let total_revenue = revenue_75cl + revenue_150cl;
    let total_profit = total_revenue - total_cogs;

    let gross_margin_75cl = price_75cl - cogs_per_bottle_75cl;
    let gross_margin_150cl = price_150cl - cogs_per_bottle_150cl;
    let gross_margin_pct_75cl = ratio(gross_margin_75cl, price_75cl) * 100.0;
    let gross_margin_pct_150cl = ratio(gross_margin_150cl, price_150cl) * 100.0;

    let fixed_costs = labor_cost + overhead.monthly_fixed;
    let variable_costs = ingredients_cost + packaging_cost + per_liter_overhead + percent_overhead;
    let equivalent_units = bottles_75cl + 2 * bottles_150cl;
    let variable_cost_per_75cl_equivalent = ratio(variable_costs, equivalent_units as f64);
    let contribution_margin_75cl = price_75cl - variable_cost_per_75cl_equivalent;
    let breakeven_bottles_75cl = if contribution_margin_75cl > 0.0 {
        breakeven_bottles(fixed_costs, contribution_margin_75cl)
    } else {
        warn!(
            contribution_margin_75cl,
            "contribution margin is not positive, breakeven unreachable"
        );
        0
    };

    debug!(
        effective_volume_liters,
        total_cogs,
        breakeven_bottles_75cl,
        "batch economics calculated"
    );

    EconResult {
        effective_volume_liters,
        ingredients_cost,
        packaging_cost,
        labor_cost,
        overhead_cost,
        total_cogs,
        cogs_per_liter,
        cogs_per_bottle_75cl,
        cogs_per_bottle_150cl,
        bottles_75cl,
        bottles_150cl,
        gross_margin_75cl,
        gross_margin_150cl,
        gross_margin_pct_75cl,
        gross_margin_pct_150cl,
        revenue_75cl,
        revenue_150cl,
        total_revenue,
        total_profit,
        fixed_costs,
        variable_cost_per_75cl_equivalent,
        contribution_margin_75cl,
        breakeven_bottles_75cl,
        breakeven_liters: breakeven_bottles_75cl as f64 * LITERS_PER_75CL,
        breakdown: CostBreakdown {
            juice,
            yeast,
            packaging: packaging_cost,
            labor: labor_cost,
            overhead: overhead_cost,
        },
    }
}

/// Bottles needed to cover `fixed_costs`. A quotient beyond `u64` range is
/// reported as `u64::MAX`.
fn breakeven_bottles(fixed_costs: f64, contribution_margin: f64) -> u64 {
    let bottles = (fixed_costs / contribution_margin).ceil();
    if bottles >= u64::MAX as f64 {
        warn!(
            fixed_costs,
            contribution_margin,
            "breakeven exceeds the countable range, saturating"
        );
        u64::MAX
    } else {
        bottles as u64
    }
}

fn bottle_count(effective_volume_liters: f64, bottle_liters: f64) -> u64 {
    if effective_volume_liters > 0.0 {
        (effective_volume_liters / bottle_liters).floor() as u64
    } else {
        0
    }
}

/// Divides, resolving a zero denominator to 0.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
