//! Calculation core. Every function here is a pure function of its
//! arguments: no I/O, no shared state, and no error path for business-valid
//! edge values.

mod calc;
mod scenario;
mod sensitivity;
mod variance;

pub use calc::calc_economics;
pub use scenario::{apply_scenario, find_scenario, scenario_input};
pub use sensitivity::{MAX_SENSITIVITY_STEPS, price_sensitivity};
pub use variance::calc_variance;

pub(crate) use calc::ratio;
