//! Input and result records shared by the calculation core and the
//! spreadsheet codec.
//!
//! All records serialise with camelCase field names so they line up with the
//! JSON documents produced by the batch forms.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub mod validate;

pub use validate::{validate, validate_scenario};

/// Liters held by a 75cl bottle.
pub const LITERS_PER_75CL: f64 = 0.75;
/// Liters held by a 150cl bottle.
pub const LITERS_PER_150CL: f64 = 1.5;

/// Raw ingredient prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientCost {
    /// Apple juice, per liter of nominal batch volume.
    pub juice_per_liter: f64,
    /// Yeast, per 1000 liters of nominal batch volume.
    #[serde(rename = "yeastPer1000L")]
    pub yeast_per_1000l: f64,
    pub sugar_per_kg: f64,
    pub other_per_bottle: f64,
}

/// Per-unit packaging prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackagingCost {
    pub bottle_75cl: f64,
    pub bottle_150cl: f64,
    pub label: f64,
    pub cap: f64,
    #[serde(rename = "box")]
    pub box_cost: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaborConfig {
    pub hourly_rate: f64,
    pub hours_per_batch: f64,
    pub monthly_fixed: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverheadConfig {
    pub monthly_fixed: f64,
    pub per_liter: f64,
    /// Share of ingredients + packaging allocated as overhead, 0–100.
    pub percent_of_cogs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductionConfig {
    /// Nominal batch volume before any losses.
    pub volume_liters: f64,
    pub wastage_percent: f64,
    pub yield_efficiency: f64,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            volume_liters: 1000.0,
            wastage_percent: 5.0,
            yield_efficiency: 95.0,
        }
    }
}

/// Ex-VAT bottle prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    pub bottle_75cl_excl_vat: f64,
    pub bottle_150cl_excl_vat: f64,
    /// Carried for multi-year projections; a single calculation ignores it.
    pub price_inflation_yearly: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            bottle_75cl_excl_vat: 0.0,
            bottle_150cl_excl_vat: 0.0,
            price_inflation_yearly: 3.0,
        }
    }
}

/// Everything the calculation core needs to price one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EconInput {
    pub ingredients: IngredientCost,
    pub packaging: PackagingCost,
    pub labor: LaborConfig,
    pub overhead: OverheadConfig,
    pub production: ProductionConfig,
    pub pricing: PricingConfig,
}

/// Reference batch used when the caller has no input of its own.
pub const DEFAULT_ECON_INPUT: EconInput = EconInput {
    ingredients: IngredientCost {
        juice_per_liter: 12.0,
        yeast_per_1000l: 450.0,
        sugar_per_kg: 15.0,
        other_per_bottle: 2.0,
    },
    packaging: PackagingCost {
        bottle_75cl: 6.0,
        bottle_150cl: 11.0,
        label: 1.5,
        cap: 0.8,
        box_cost: 12.0,
    },
    labor: LaborConfig {
        hourly_rate: 350.0,
        hours_per_batch: 40.0,
        monthly_fixed: 10_000.0,
    },
    overhead: OverheadConfig {
        monthly_fixed: 8_000.0,
        per_liter: 1.5,
        percent_of_cogs: 5.0,
    },
    production: ProductionConfig {
        volume_liters: 1000.0,
        wastage_percent: 5.0,
        yield_efficiency: 95.0,
    },
    pricing: PricingConfig {
        bottle_75cl_excl_vat: 120.0,
        bottle_150cl_excl_vat: 220.0,
        price_inflation_yearly: 3.0,
    },
};

/// Named set of multipliers used to stress-test a base input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub name: Cow<'static, str>,
    pub volume_multiplier: f64,
    pub price_multiplier: f64,
    pub apple_cost_multiplier: f64,
    pub labor_multiplier: f64,
    /// Replaces the input's yearly price inflation.
    pub inflation_yearly: f64,
}

impl Scenario {
    pub const fn new(
        name: &'static str,
        volume_multiplier: f64,
        price_multiplier: f64,
        apple_cost_multiplier: f64,
        labor_multiplier: f64,
        inflation_yearly: f64,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            volume_multiplier,
            price_multiplier,
            apple_cost_multiplier,
            labor_multiplier,
            inflation_yearly,
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::new("Base", 1.0, 1.0, 1.0, 1.0, 2.5)
    }
}

/// Scenario list offered when the caller does not supply one.
pub const DEFAULT_SCENARIOS: [Scenario; 5] = [
    Scenario::new("Base", 1.0, 1.0, 1.0, 1.0, 2.5),
    Scenario::new("Poor harvest", 0.8, 1.0, 1.3, 1.0, 2.5),
    Scenario::new("Premium pricing", 0.9, 1.15, 1.0, 1.0, 2.5),
    Scenario::new("Wage pressure", 1.0, 1.0, 1.0, 1.15, 4.0),
    Scenario::new("Double batch", 2.0, 1.0, 1.0, 1.3, 2.5),
];

/// Cost of goods split by category. The five parts sum to the total COGS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub juice: f64,
    pub yeast: f64,
    pub packaging: f64,
    pub labor: f64,
    pub overhead: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.juice + self.yeast + self.packaging + self.labor + self.overhead
    }
}

/// Output of one economics calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconResult {
    pub effective_volume_liters: f64,

    pub ingredients_cost: f64,
    pub packaging_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub total_cogs: f64,

    pub cogs_per_liter: f64,
    pub cogs_per_bottle_75cl: f64,
    pub cogs_per_bottle_150cl: f64,

    pub bottles_75cl: u64,
    pub bottles_150cl: u64,

    pub gross_margin_75cl: f64,
    pub gross_margin_150cl: f64,
    pub gross_margin_pct_75cl: f64,
    pub gross_margin_pct_150cl: f64,

    pub revenue_75cl: f64,
    pub revenue_150cl: f64,
    pub total_revenue: f64,
    pub total_profit: f64,

    pub fixed_costs: f64,
    pub variable_cost_per_75cl_equivalent: f64,
    pub contribution_margin_75cl: f64,
    pub breakeven_bottles_75cl: u64,
    pub breakeven_liters: f64,

    pub breakdown: CostBreakdown,
}

/// Absolute and relative change of one tracked metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub value: f64,
    pub pct: f64,
}

/// Planned versus actual economics for the same batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconVariance {
    pub planned: EconResult,
    pub actual: EconResult,
    pub cogs_per_liter: MetricDelta,
    pub gross_margin_pct_75cl: MetricDelta,
    pub total_cogs: MetricDelta,
    pub total_profit: MetricDelta,
}

/// Price range sampled by a sensitivity run, in ex-VAT price per 75cl bottle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRange {
    pub min: f64,
    pub max: f64,
    pub steps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    pub price: f64,
    pub margin: f64,
    pub margin_pct: f64,
    pub revenue: f64,
}
