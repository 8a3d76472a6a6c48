use std::env::var_os;
use std::ffi::OsStr;
use std::num::ParseIntError;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: {source}")]
    InvalidNumber { key: &'static str, source: ParseIntError },
    #[error("{key}: expected true or false, got {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("I2C address {0:#04x} does not fit in 7 bits")]
    AddressOutOfRange(u16),
}

/// Display setup, read from a JSON file and overridden by `LCD_*` environment variables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Linux I2C adapter number, i.e. `/dev/i2c-<bus>`.
    pub bus: u8,
    pub address: u8,
    pub cols: u8,
    pub rows: u8,
    pub tall_font: bool,
    pub backlight: bool,
    /// How long the clock runs before the demo exits.
    pub demo_seconds: u64,
}

impl Config {
    pub fn try_load() -> Option<Self> {
        let config_str = var_os("LCD_CONFIG_FILE");
        let config_str: &OsStr = config_str.as_deref().unwrap_or(OsStr::new("lcd.json"));
        let config_path = Path::new(config_str);
        if config_path.exists() {
            let file = std::fs::File::open(config_path).ok()?;
            let reader = std::io::BufReader::new(file);
            serde_json::from_reader(reader).ok()
        } else {
            None
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::try_load().unwrap_or_default();
        config.apply_vars(|key| dotenv::var(key).ok())?;
        Ok(config)
    }

    /// Overrides fields with the values `lookup` finds for their `LCD_*` keys.
    pub fn apply_vars(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("LCD_I2C_BUS") {
            self.bus = parse_number("LCD_I2C_BUS", &value)?;
        }
        if let Some(value) = lookup("LCD_I2C_ADDRESS") {
            self.address = parse_address(&value)?;
        }
        if let Some(value) = lookup("LCD_COLS") {
            self.cols = parse_number("LCD_COLS", &value)?;
        }
        if let Some(value) = lookup("LCD_ROWS") {
            self.rows = parse_number("LCD_ROWS", &value)?;
        }
        if let Some(value) = lookup("LCD_TALL_FONT") {
            self.tall_font = parse_bool("LCD_TALL_FONT", &value)?;
        }
        if let Some(value) = lookup("LCD_BACKLIGHT") {
            self.backlight = parse_bool("LCD_BACKLIGHT", &value)?;
        }
        if let Some(value) = lookup("LCD_DEMO_SECONDS") {
            self.demo_seconds = parse_number("LCD_DEMO_SECONDS", &value)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus: 1,
            address: 0x27,
            cols: 16,
            rows: 2,
            tall_font: false,
            backlight: true,
            demo_seconds: 10,
        }
    }
}

fn parse_number<T: std::str::FromStr<Err = ParseIntError>>(
    key: &'static str,
    value: &str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { key, source })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value: value.to_string() }),
    }
}

/// Parses a 7-bit I2C address, in decimal or `0x`-prefixed hex.
pub fn parse_address(value: &str) -> Result<u8, ConfigError> {
    let value = value.trim();
    let address = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|source| ConfigError::InvalidNumber { key: "LCD_I2C_ADDRESS", source })?;
    if address > 0x7F {
        return Err(ConfigError::AddressOutOfRange(address));
    }
    Ok(address as u8)
}
