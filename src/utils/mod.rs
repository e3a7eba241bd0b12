//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `ordercast` application.

pub mod logging;
