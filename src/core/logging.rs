//! Centralized logging utilities for the staking console
//!
//! Wrapper functions that pair the user-facing CLI line with a structured
//! tracing record, so every operation outcome lands in both channels.

use crate::cli::output::Display;
use tracing::{error, info};

/// Operation result with both user and developer logging
pub fn operation_success(operation: &str, details: &str) {
	Display::success(&format!("{} completed successfully", operation));
	info!(
		operation = operation,
		details = details,
		"Operation completed successfully"
	);
}

/// Operation failure with both user and developer logging
///
/// The failure is terminal for the triggering action: it is logged and
/// the action aborts with no retry.
pub fn operation_error(operation: &str, error: &crate::types::error::Error) {
	Display::error(&format!("{} failed: {}", operation, error));
	error!(
		operation = operation,
		error = %error,
		"Operation failed"
	);
}

/// Log operation start with structured context
pub fn operation_start(operation: &str, context: &str) {
	info!(operation = operation, context = context, "Operation started");
}
