//! Core library for the cider-econ batch economics engine.
//!
//! The calculation core in [`econ`] prices a single cider batch: cost of goods,
//! margins, breakeven, scenario stress tests, plan/actual variance, and price
//! sensitivity. Inputs and results live in [`model`], together with the
//! validation pass every input goes through before reaching the core. The
//! spreadsheet round-trip is split between the sheet layout in [`flatten`],
//! the Excel adapters under [`io`], and the file-level orchestration in
//! [`sync`].

pub mod econ;
pub mod error;
pub mod flatten;
pub mod io;
pub mod logging;
pub mod model;
pub mod sync;

pub use error::{Result, ToolError};
