//! Parsing of `ddcutil detect` output.
//!
//! Typical output is one block per display:
//!
//! ```text
//! Display 1
//!    I2C bus:  /dev/i2c-6
//!    DRM connector:           card1-HDMI-A-1
//!    EDID synopsis:
//!       Mfg id:               AUS - UNK
//!       Model:                VZ249
//!       Product code:         9420  (0x24cc)
//!       Serial number:        N5LMRS022713
//!       Binary serial number: 16843009 (0x01010101)
//!       Manufacture year:     2022,  Week: 23
//!    VCP version:         2.1
//! ```

use crate::error::{DdcError, Result};
use crate::monitor::{Monitor, UNKNOWN};

use log::{trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static DISPLAY_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Display\s+(\d+)\s*$").expect("display header pattern"));
static I2C_BUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"I2C\s+bus:\s*/dev/i2c-(\d+)").expect("i2c bus pattern"));
static DEV_I2C: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/dev/i2c-(\d+)").expect("i2c device pattern"));
static MFG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Mfg\s+id:\s*([A-Z0-9]{2,4})").expect("mfg id pattern"));
static MODEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Model:[ \t]*(.*)").expect("model pattern"));
static SERIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Serial\s+number:[ \t]*(.*)").expect("serial pattern"));

/// Parse the stdout of `ddcutil detect` into monitor records.
///
/// Zero `Display N` headers is not an error: the result is simply empty.
/// Monitors are returned in the order ddcutil listed them.
pub fn parse_detection(text: &str) -> Result<Vec<Monitor>> {
    let headers: Vec<_> = DISPLAY_HEADER.captures_iter(text).collect();

    let mut monitors = Vec::with_capacity(headers.len());
    for (i, caps) in headers.iter().enumerate() {
        let header = caps.get(0).map_or(0..0, |m| m.range());
        let end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let block = &text[header.end..end];

        let display = caps[1].parse::<u32>().map_err(|e| DdcError::Parse {
            message: format!("Invalid display number {}: {}", &caps[1], e),
            raw: text[header].to_string(),
            display: None,
        })?;

        monitors.push(parse_block(display, block)?);
    }

    Ok(monitors)
}

fn parse_block(display: u32, block: &str) -> Result<Monitor> {
    trace!("parsing detect block for display {}", display);

    let Some(i2c_bus) = I2C_BUS
        .captures(block)
        .or_else(|| DEV_I2C.captures(block))
        .and_then(|caps| caps[1].parse::<u32>().ok())
    else {
        warn!("could not find I2C bus for display {}", display);
        return Err(DdcError::Parse {
            message: format!("Could not find I2C bus for display {display}."),
            raw: block.to_string(),
            display: Some(display),
        });
    };

    let mfg = MFG_ID
        .captures(block)
        .map_or_else(|| UNKNOWN.to_string(), |caps| caps[1].to_string());
    let model = rest_of_line(&MODEL, block).unwrap_or_else(|| UNKNOWN.to_string());
    let serial = rest_of_line(&SERIAL, block);

    Ok(Monitor {
        display,
        i2c_bus,
        mfg,
        model,
        serial,
    })
}

/// The trimmed remainder of the first line matching `re`, if it is non-empty.
fn rest_of_line(re: &Regex, block: &str) -> Option<String> {
    re.captures(block)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DISPLAYS: &str = "\
Display 1
   I2C bus:  /dev/i2c-6
   DRM connector:           card1-HDMI-A-1
   EDID synopsis:
      Mfg id:               AUS - UNK
      Model:                VZ249
      Product code:         9420  (0x24cc)
      Serial number:        N5LMRS022713
      Binary serial number: 16843009 (0x01010101)
      Manufacture year:     2022,  Week: 23
   VCP version:         2.1

Display 2
   I2C bus:  /dev/i2c-7
   EDID synopsis:
      Mfg id:               GSM - LG Electronics
      Model:                LG ULTRAGEAR
      Serial number:
   VCP version:         2.1
";

    #[test]
    fn test_parse_empty() {
        assert!(parse_detection("").unwrap().is_empty());
        assert!(parse_detection("No displays found.\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_single_display() {
        let text = "Display 1\n   I2C bus:  /dev/i2c-6\n      Mfg id: AUS\n      Model: VZ249\n      Serial number: N5LMRS022713\n";
        let monitors = parse_detection(text).unwrap();
        assert_eq!(
            monitors,
            vec![Monitor {
                display: 1,
                i2c_bus: 6,
                mfg: "AUS".to_string(),
                model: "VZ249".to_string(),
                serial: Some("N5LMRS022713".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_keeps_discovery_order() {
        let monitors = parse_detection(TWO_DISPLAYS).unwrap();
        assert_eq!(monitors.len(), 2);

        assert_eq!(monitors[0].display, 1);
        assert_eq!(monitors[0].i2c_bus, 6);
        assert_eq!(monitors[0].mfg, "AUS");

        assert_eq!(monitors[1].display, 2);
        assert_eq!(monitors[1].i2c_bus, 7);
        assert_eq!(monitors[1].mfg, "GSM");
        assert_eq!(monitors[1].model, "LG ULTRAGEAR");
        assert_eq!(monitors[1].serial, None);
    }

    #[test]
    fn test_parse_defaults_and_bus_fallback() {
        let text = "Display 3\n   Connector: /dev/i2c-12 (card0-DP-1)\n";
        let monitors = parse_detection(text).unwrap();
        assert_eq!(monitors[0].i2c_bus, 12);
        assert_eq!(monitors[0].mfg, "Unknown");
        assert_eq!(monitors[0].model, "Unknown");
        assert!(monitors[0].serial.is_none());
    }

    #[test]
    fn test_parse_missing_bus_names_display() {
        let text = "Display 4\n   EDID synopsis:\n      Model: Mystery\n";
        match parse_detection(text).unwrap_err() {
            DdcError::Parse {
                display, message, ..
            } => {
                assert_eq!(display, Some(4));
                assert!(message.contains("display 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_ignores_invalid_display_preamble() {
        let text = "Invalid display\n   I2C bus:  /dev/i2c-3\n\nDisplay 1\n   I2C bus:  /dev/i2c-5\n";
        let monitors = parse_detection(text).unwrap();
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0].i2c_bus, 5);
    }

    #[test]
    fn test_parse_whitespace_padded_header() {
        let text = "  Display   2  \n   I2C bus:  /dev/i2c-4\n";
        let monitors = parse_detection(text).unwrap();
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0].display, 2);
        assert_eq!(monitors[0].i2c_bus, 4);
    }
}
