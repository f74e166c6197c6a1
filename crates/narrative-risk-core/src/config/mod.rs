//! Calibration constants and tunable defaults.

pub mod constants;
