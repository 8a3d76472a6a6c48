mod config;

use std::fmt::Write;
use std::thread::sleep;
use std::time::{Duration, Instant};
use dotenv::dotenv;
use log::{debug, info, warn};
use lcd_i2c::delay::StdDelay;
use lcd_i2c::i2c::LinuxI2cBus;
use lcd_i2c::lcd::CharacterDisplay;
use lcd_i2c::lcd::hd44780::driver::{CharSize, I2cHD44780Driver};
use time::OffsetDateTime;
use time::macros::format_description;
use crate::config::Config;

const HEART: [u8; 8] = [
    0b00000,
    0b01010,
    0b11111,
    0b11111,
    0b01110,
    0b00100,
    0b00000,
    0b00000,
];

/// Where the clock goes: the second row, or after the greeting on single-row displays.
fn clock_position(rows: u8) -> (u8, u8) {
    if rows > 1 { (0, 1) } else { (8, 0) }
}

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("LCD demo starting...");

    let config = Config::load()?;
    info!(
        "LCD @ /dev/i2c-{}, address {:#04x}, {}x{}",
        config.bus, config.address, config.cols, config.rows
    );

    debug!("Initializing LCD driver...");
    let bus = LinuxI2cBus::new(config.bus);
    let mut lcd = I2cHD44780Driver::new(bus, StdDelay).with_backlight(config.backlight);
    lcd.set_address(config.address);
    lcd.set_resolution(config.cols, config.rows)?;
    lcd.set_char_size(if config.tall_font {
        CharSize::Dots5x10
    } else {
        CharSize::Dots5x8
    });
    lcd.begin()?;
    debug!("{:?} initialized.", lcd);

    lcd.create_char(0, &HEART)?;
    lcd.set_cursor(0, 0)?;
    lcd.print("Hello ")?;
    lcd.write_byte(0)?;

    let clock_format = format_description!("[hour]:[minute]:[second]");
    let local_time = || {
        OffsetDateTime::now_local().unwrap_or_else(|_| {
            warn!("Local offset unavailable, showing UTC");
            OffsetDateTime::now_utc()
        })
    };

    let (clock_col, clock_row) = clock_position(config.rows);

    info!("Showing the clock for {} s...", config.demo_seconds);
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(config.demo_seconds) {
        let now = local_time();
        lcd.set_cursor(clock_col, clock_row)?;
        write!(lcd, "{}", now.format(&clock_format)?)?;
        sleep(Duration::from_millis(250));
    }

    lcd.clear()?;
    lcd.print("Bye!")?;
    sleep(Duration::from_secs(1));
    lcd.set_backlight(false)?;

    info!("Done.");
    Ok(())
}
