use core::ops::Not;
use derive_more::{Display, From, Into};

/// Single 10-bit ADC conversion result.
#[repr(transparent)]
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Into, Display)]
pub struct RawSample(u16);

impl RawSample {
    pub const BITS: u32 = 10;
    pub const MAX: Self = Self((1 << Self::BITS) - 1);
    pub const MIN: Self = Self(0);

    /// Keeps only the bits the converter actually produces.
    pub const fn from_masked(value: u16) -> Self {
        Self(value & Self::MAX.0)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for RawSample {
    type Error = ();
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= Self::MAX.0 {
            Ok(Self(value))
        } else {
            Err(())
        }
    }
}

/// Static voltage level of a digital output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Not for Level {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Which output level energizes the load.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub const fn active(self) -> Level {
        match self {
            Polarity::ActiveLow => Level::Low,
            Polarity::ActiveHigh => Level::High,
        }
    }
    pub const fn inactive(self) -> Level {
        match self {
            Polarity::ActiveLow => Level::High,
            Polarity::ActiveHigh => Level::Low,
        }
    }
}

/// Relative moisture in percent, 0 is bone dry.
#[repr(transparent)]
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Ord, PartialOrd, From, Into, Display)]
#[display(fmt = "{}%", _0)]
pub struct Moisture(u8);

/// Two-point calibration of a capacitive probe.
///
/// The probe reads higher the drier the soil is, so `dry` is the upper raw bound.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Calibration {
    /// Raw value with the probe in open air.
    pub dry: RawSample,
    /// Raw value with the probe submerged in water.
    pub wet: RawSample,
    /// Readings strictly above this are considered dry soil.
    pub threshold: RawSample,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            dry: RawSample(650),
            wet: RawSample(300),
            threshold: RawSample(500),
        }
    }
}

impl Calibration {
    pub fn percent(&self, raw: RawSample) -> Moisture {
        let (wet, dry) = (self.wet.0 as u32, self.dry.0 as u32);
        if dry <= wet {
            return Moisture(0);
        }
        let clamped = (raw.0 as u32).clamp(wet, dry);
        let dryness = (clamped - wet) * 100 / (dry - wet);
        Moisture((100 - dryness) as u8)
    }

    pub fn is_dry(&self, raw: RawSample) -> bool {
        raw > self.threshold
    }
}
