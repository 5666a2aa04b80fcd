//! Utility functions for amount conversion and formatting

pub mod amount;
