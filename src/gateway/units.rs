//! Account and amount parsing, and decimal formatting of on-chain integers.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::gateway::error::{GatewayError, GatewayResult};

/// Parse a caller-supplied account reference.
///
/// Accepts 40 hex digits with an optional `0x` prefix. Mixed-case input must
/// carry a valid EIP-55 checksum; all-lower or all-upper input is accepted
/// as-is.
pub fn parse_account(raw: Option<&str>) -> GatewayResult<Address> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Err(GatewayError::InvalidAccount("userAddress is required".to_string())),
    };

    let body = raw.strip_prefix("0x").unwrap_or(raw);
    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(GatewayError::InvalidAccount(format!(
            "'{}' is not a 20-byte hex address",
            raw
        )));
    }

    let address: Address = body
        .parse()
        .map_err(|e| GatewayError::InvalidAccount(format!("'{}': {}", raw, e)))?;

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = address.to_checksum(None);
        if &checksummed[2..] != body {
            return Err(GatewayError::InvalidAccount(format!(
                "'{}' has an invalid checksum",
                raw
            )));
        }
    }

    Ok(address)
}

/// Decimal amount as sent by the caller: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    /// Decimal text of the amount, never in exponent notation.
    pub fn as_decimal(&self) -> String {
        let text = match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s.trim().to_string(),
        };

        // serde_json renders large and tiny floats as `1e+17`; `f64`'s
        // `Display` spells out every digit.
        if text.contains(['e', 'E']) {
            if let Some(value) = text.parse::<f64>().ok().filter(|v| v.is_finite()) {
                return value.to_string();
            }
        }
        text
    }

    /// Numeric value, if the amount is a number at all.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            AmountInput::Number(n) => n.as_f64(),
            AmountInput::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Scale the amount to integer base units of a token with `decimals`.
    pub fn to_base_units(&self, decimals: u8) -> GatewayResult<U256> {
        let text = self.as_decimal();
        if text.starts_with('-') {
            return Err(GatewayError::InvalidAmount(format!("'{}' is negative", text)));
        }

        if let Some((_, frac)) = text.split_once('.') {
            if frac.trim_end_matches('0').len() > usize::from(decimals) {
                return Err(GatewayError::InvalidAmount(format!(
                    "'{}' has more than {} decimal places",
                    text, decimals
                )));
            }
        }

        match parse_units(&text, decimals) {
            Ok(ParseUnits::U256(value)) => Ok(value),
            Ok(ParseUnits::I256(_)) => {
                Err(GatewayError::InvalidAmount(format!("'{}' is negative", text)))
            }
            Err(e) => Err(GatewayError::InvalidAmount(format!("'{}': {}", text, e))),
        }
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(AmountInput::Number)
            .unwrap_or_else(|| AmountInput::Text(value.to_string()))
    }
}

/// Format an integer amount with `decimals` places, trimming trailing zeros
/// but keeping at least one fractional digit (`1.5`, `0.0`, `12.0`).
pub fn format_decimal(value: U256, decimals: u8) -> String {
    let formatted = match format_units(value, decimals) {
        Ok(s) => s,
        Err(_) => return value.to_string(),
    };

    match formatted.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, frac)
            }
        }
        None => format!("{}.0", formatted),
    }
}

/// Lossy floating-point view of an integer amount, used for the
/// approximate figures (projections, USD totals).
pub fn to_f64(value: U256, decimals: u8) -> f64 {
    format_decimal(value, decimals).parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_accepts_common_forms() {
        let lower = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
        let checksummed = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
        let bare = "f39fd6e51aad88f6f4ce6ab8827279cfffb92266";

        let a = parse_account(Some(lower)).unwrap();
        assert_eq!(parse_account(Some(checksummed)).unwrap(), a);
        assert_eq!(parse_account(Some(bare)).unwrap(), a);
        assert_eq!(
            parse_account(Some("0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266")).unwrap(),
            a
        );
    }

    #[test]
    fn test_parse_account_rejects_malformed() {
        for bad in [
            "",
            "0x",
            "hello",
            "0x1234",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb922666",
            "0xg39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            " 0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            // bad checksum
            "0xF39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        ] {
            assert!(
                matches!(parse_account(Some(bad)), Err(GatewayError::InvalidAccount(_))),
                "accepted {:?}",
                bad
            );
        }
        assert!(parse_account(None).is_err());
    }

    #[test]
    fn test_amount_from_json() {
        let n: AmountInput = serde_json::from_str("100").unwrap();
        assert_eq!(n.to_f64(), Some(100.0));
        assert_eq!(n.as_decimal(), "100");

        let s: AmountInput = serde_json::from_str("\"250.5\"").unwrap();
        assert_eq!(s.to_f64(), Some(250.5));

        let junk: AmountInput = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(junk.to_f64(), None);
    }

    #[test]
    fn test_exponent_notation_is_expanded() {
        let n: AmountInput = serde_json::from_str("1e17").unwrap();
        assert_eq!(n.as_decimal(), "100000000000000000");
        assert_eq!(
            n.to_base_units(6).unwrap(),
            U256::from(100_000_000_000_000_000u128) * U256::from(1_000_000u64)
        );

        let t = AmountInput::Text("7.5E1".into());
        assert_eq!(t.as_decimal(), "75");
        assert_eq!(t.to_base_units(6).unwrap(), U256::from(75_000_000u64));

        let tiny: AmountInput = serde_json::from_str("1e-7").unwrap();
        assert_eq!(tiny.as_decimal(), "0.0000001");
        assert!(matches!(tiny.to_base_units(6), Err(GatewayError::InvalidAmount(_))));
    }

    #[test]
    fn test_to_base_units() {
        let amount: AmountInput = serde_json::from_str("100.25").unwrap();
        assert_eq!(amount.to_base_units(6).unwrap(), U256::from(100_250_000u64));

        let whole = AmountInput::Text("50".into());
        assert_eq!(whole.to_base_units(6).unwrap(), U256::from(50_000_000u64));

        assert!(AmountInput::Text("-5".into()).to_base_units(6).is_err());
        assert!(AmountInput::Text("abc".into()).to_base_units(6).is_err());

        // Never silently truncated
        assert!(AmountInput::Text("50.1234567".into()).to_base_units(6).is_err());
        assert_eq!(
            AmountInput::Text("50.1000000".into()).to_base_units(6).unwrap(),
            U256::from(50_100_000u64)
        );
    }

    #[test]
    fn test_format_decimal() {
        let one_eth = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(format_decimal(one_eth, 18), "1.0");
        assert_eq!(format_decimal(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_decimal(U256::ZERO, 8), "0.0");
        assert_eq!(format_decimal(U256::from(200_000_000_000u64), 8), "2000.0");
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(U256::from(100_000_000_000u64), 8), 1000.0);
        assert_eq!(to_f64(U256::from(2_500_000u64), 6), 2.5);
    }
}
