//! VCP feature readouts.

use crate::error::{DdcError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// VCP code for brightness (luminance).
pub const BRIGHTNESS_CODE: &str = "10";

/// VCP code for power mode.
pub const POWER_MODE_CODE: &str = "D6";

// VCP code 0x10 (Brightness): current value =  50, max value = 100
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)current\s+value\s*=\s*(\d+)\s*,\s*max\s+value\s*=\s*(\d+)")
        .expect("numeric VCP pattern")
});

// VCP code 0xd6 (Power mode): DPM: On,  DPMS: Off (sl=0x01)
static SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(sl\s*=\s*0x([0-9a-fA-F]+)\)").expect("selector VCP pattern"));

/// A single VCP feature reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureValue {
    /// Feature code, upper-cased (e.g. `10`, `D6`).
    pub code: String,
    /// Current value.
    pub current: u32,
    /// Maximum value, `0` for non-continuous features.
    pub maximum: u32,
}

/// Parse `ddcutil getvcp` output for `code`.
///
/// Continuous features report `current value = N, max value = M`; non-continuous
/// ones report a selector `(sl=0xNN)` and get a maximum of `0`.
pub fn parse_feature_value(code: &str, text: &str) -> Result<FeatureValue> {
    let out = text.trim();
    let code = code.to_uppercase();

    if let Some(caps) = NUMERIC.captures(out) {
        return Ok(FeatureValue {
            current: parse_number(&caps[1], 10, &code, out)?,
            maximum: parse_number(&caps[2], 10, &code, out)?,
            code,
        });
    }

    if let Some(caps) = SELECTOR.captures(out) {
        return Ok(FeatureValue {
            current: parse_number(&caps[1], 16, &code, out)?,
            maximum: 0,
            code,
        });
    }

    Err(DdcError::Parse {
        message: format!("Could not parse getvcp output for code {code}: {out}"),
        raw: out.to_string(),
        display: None,
    })
}

fn parse_number(digits: &str, radix: u32, code: &str, raw: &str) -> Result<u32> {
    u32::from_str_radix(digits, radix).map_err(|e| DdcError::Parse {
        message: format!("Value {digits} for code {code} is out of range: {e}"),
        raw: raw.to_string(),
        display: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        let value = parse_feature_value(
            "10",
            "VCP code 0x10 (Brightness                    ): current value =    50, max value =   100\n",
        )
        .unwrap();
        assert_eq!(
            value,
            FeatureValue {
                code: "10".to_string(),
                current: 50,
                maximum: 100,
            }
        );
    }

    #[test]
    fn test_parse_bare_numeric_is_case_insensitive() {
        let value = parse_feature_value("10", "Current Value = 50, MAX VALUE = 100").unwrap();
        assert_eq!((value.current, value.maximum), (50, 100));
    }

    #[test]
    fn test_parse_selector() {
        let value = parse_feature_value(
            "d6",
            "VCP code 0xd6 (Power mode                    ): DPM: On,  DPMS: Off (sl=0x01)",
        )
        .unwrap();
        assert_eq!(value.code, "D6");
        assert_eq!(value.current, 1);
        assert_eq!(value.maximum, 0);
    }

    #[test]
    fn test_parse_selector_hex() {
        let value = parse_feature_value("D6", "DPM: Off, DPMS: Off (sl=0x05)").unwrap();
        assert_eq!(value.current, 5);

        let value = parse_feature_value("60", "Input Source: DisplayPort-1 (sl=0x0f)").unwrap();
        assert_eq!(value.current, 15);
    }

    #[test]
    fn test_code_is_upper_cased() {
        let value = parse_feature_value("e0", "current value = 1, max value = 2").unwrap();
        assert_eq!(value.code, "E0");
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_feature_value("10", "garbage").unwrap_err();
        match err {
            DdcError::Parse { raw, .. } => assert_eq!(raw, "garbage"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
