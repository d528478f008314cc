use crate::model::{EconResult, EconVariance, MetricDelta};

/// Compares planned and actual economics for the same batch.
pub fn calc_variance(planned: &EconResult, actual: &EconResult) -> EconVariance {
    EconVariance {
        planned: *planned,
        actual: *actual,
        cogs_per_liter: delta(planned.cogs_per_liter, actual.cogs_per_liter),
        gross_margin_pct_75cl: delta(planned.gross_margin_pct_75cl, actual.gross_margin_pct_75cl),
        total_cogs: delta(planned.total_cogs, actual.total_cogs),
        total_profit: delta(planned.total_profit, actual.total_profit),
    }
}

/// Relative change is taken against the magnitude of the planned figure so
/// that a planned loss still yields a percentage with the sign of the change.
fn delta(planned: f64, actual: f64) -> MetricDelta {
    let value = actual - planned;
    let pct = if planned == 0.0 {
        0.0
    } else {
        value / planned.abs() * 100.0
    };
    MetricDelta { value, pct }
}
