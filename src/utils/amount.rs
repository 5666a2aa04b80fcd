use crate::types::error::{Error, Result};
use alloy_primitives::U256;

/// Parse amount string to U256 with 18 decimals (default for both tokens)
pub fn parse_amount(amount_str: &str) -> Result<U256> {
	parse_amount_with_decimals(amount_str, 18)
}

/// Parse amount string to U256 with specified decimals
///
/// The conversion goes through f64, so amounts with more significant
/// digits than f64 carries lose precision. Known limitation; entered
/// quantities are small test amounts.
pub fn parse_amount_with_decimals(amount_str: &str, decimals: u8) -> Result<U256> {
	let amount_f64: f64 = amount_str
		.trim()
		.parse()
		.map_err(|e| Error::InvalidAmount(format!("{}: {}", amount_str, e)))?;

	if !amount_f64.is_finite() {
		return Err(Error::InvalidAmount(format!(
			"{}: not a finite number",
			amount_str
		)));
	}

	if amount_f64 < 0.0 {
		return Err(Error::InvalidAmount("amount must be positive".to_string()));
	}

	// Convert to smallest unit based on decimals
	let multiplier = 10_f64.powi(decimals as i32);
	let smallest_unit = amount_f64 * multiplier;

	// Check for overflow before converting
	if smallest_unit > u128::MAX as f64 {
		return Err(Error::InvalidAmount("amount too large".to_string()));
	}

	Ok(U256::from(smallest_unit as u128))
}

/// Format amount from minor units to human-readable string
pub fn format_amount(amount: U256) -> String {
	format_amount_with_decimals(amount, 18)
}

/// Format amount with specified decimals to human-readable string
pub fn format_amount_with_decimals(amount: U256, decimals: u8) -> String {
	if amount.is_zero() {
		return "0.0".to_string();
	}

	let divisor = U256::from(10).pow(U256::from(decimals));
	let whole = amount / divisor;
	let fractional = amount % divisor;

	// Format fractional part with leading zeros
	let fractional_str = format!("{:0>width$}", fractional, width = decimals as usize);

	// Trim trailing zeros for cleaner display
	let trimmed = fractional_str.trim_end_matches('0');

	if trimmed.is_empty() {
		format!("{}.0", whole)
	} else {
		format!("{}.{}", whole, trimmed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_amount() {
		// Test basic parsing
		assert_eq!(
			parse_amount("1.0").unwrap(),
			U256::from(1_000_000_000_000_000_000u128)
		);
		assert_eq!(
			parse_amount("0.1").unwrap(),
			U256::from(100_000_000_000_000_000u128)
		);
		assert_eq!(
			parse_amount("100").unwrap(),
			U256::from(100_000_000_000_000_000_000u128)
		);

		// Entered quantity scales by exactly 10^18
		assert_eq!(
			parse_amount("5").unwrap(),
			U256::from(5_000_000_000_000_000_000u128)
		);

		// Test with different decimals
		assert_eq!(
			parse_amount_with_decimals("1.0", 6).unwrap(),
			U256::from(1_000_000u128)
		);
		assert_eq!(
			parse_amount_with_decimals("100", 6).unwrap(),
			U256::from(100_000_000u128)
		);
	}

	#[test]
	fn test_format_amount() {
		assert_eq!(
			format_amount(U256::from(1_000_000_000_000_000_000u128)),
			"1.0"
		);
		assert_eq!(format_amount(U256::from(100_000_000_000_000_000u128)), "0.1");
		assert_eq!(
			format_amount(U256::from(1_500_000_000_000_000_000u128)),
			"1.5"
		);
		assert_eq!(format_amount(U256::ZERO), "0.0");

		// Test with different decimals
		assert_eq!(format_amount_with_decimals(U256::from(1_000_000u128), 6), "1.0");
		assert_eq!(format_amount_with_decimals(U256::from(1_500_000u128), 6), "1.5");
	}

	#[test]
	fn test_format_preserves_magnitude() {
		// One minor unit survives formatting at full precision
		assert_eq!(format_amount(U256::from(1u8)), "0.000000000000000001");
	}

	#[test]
	fn test_error_cases() {
		// Negative amounts
		assert!(parse_amount("-1.0").is_err());

		// Non-numeric input
		assert!(parse_amount("abc").is_err());
		assert!(parse_amount("").is_err());
		assert!(parse_amount("1.2.3").is_err());

		// Non-finite numbers parse as f64 but are rejected here
		assert!(parse_amount("NaN").is_err());
		assert!(parse_amount("inf").is_err());
	}
}
