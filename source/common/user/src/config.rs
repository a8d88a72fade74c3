use crate::values::Polarity;
use core::time::Duration;

/// CPU clock of the ATmega328P board.
pub const CPU_FREQ_HZ: u32 = 16_000_000;

pub const BAUD_RATE: u32 = 9600;

/// ADC input the moisture probe is wired to (A0, PC0).
pub const SENSOR_CHANNEL: u8 = 0;

/// ADC clock must stay within this range for full 10-bit resolution.
pub const ADC_CLOCK_MIN_HZ: u32 = 50_000;
pub const ADC_CLOCK_MAX_HZ: u32 = 200_000;

pub const SAMPLE_PERIOD: Duration = Duration::from_millis(2000);

/// Arduino pin 7.
pub const RELAY_PIN: u8 = 7;

/// Generic relay modules are energized by a low level.
pub const RELAY_POLARITY: Polarity = Polarity::ActiveLow;

pub const RELAY_ON_TIME: Duration = Duration::from_millis(3000);
pub const RELAY_OFF_TIME: Duration = Duration::from_millis(5000);
