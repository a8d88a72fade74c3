//! Single-conversion ADC sampling.

use crate::{
    board::{poll_until, Budget, Registers},
    regs::{bit, Reg, ADEN, ADPS_MASK, ADSC, MUX_MASK, REFS0, REFS1},
    Error,
};
use common::{
    config::{ADC_CLOCK_MAX_HZ, ADC_CLOCK_MIN_HZ},
    values::RawSample,
};

/// Voltage reference selection (`REFS1:0`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Reference {
    /// External voltage on the AREF pin.
    Aref,
    /// Supply voltage, with a capacitor on AREF.
    Avcc,
    Internal1V1,
}

impl Reference {
    const fn bits(self) -> u8 {
        match self {
            Reference::Aref => 0,
            Reference::Avcc => bit(REFS0),
            Reference::Internal1V1 => bit(REFS1) | bit(REFS0),
        }
    }
}

/// Analog input multiplexer channel, `ADC0` to `ADC8` (temperature sensor).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Channel(u8);

impl Channel {
    pub const fn new(index: u8) -> Option<Self> {
        if index <= 8 {
            Some(Self(index))
        } else {
            None
        }
    }
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// ADC clock divider (`ADPS2:0`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Prescaler {
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

impl Prescaler {
    const ALL: [Prescaler; 7] = [
        Prescaler::Div2,
        Prescaler::Div4,
        Prescaler::Div8,
        Prescaler::Div16,
        Prescaler::Div32,
        Prescaler::Div64,
        Prescaler::Div128,
    ];

    pub const fn divisor(self) -> u32 {
        1 << (self as u32)
    }

    /// Smallest divider that brings the ADC clock into its 50-200 kHz window.
    pub const fn for_clock(cpu_freq_hz: u32) -> Option<Self> {
        let mut i = 0;
        while i < Self::ALL.len() {
            let p = Self::ALL[i];
            let f = cpu_freq_hz / p.divisor();
            if f <= ADC_CLOCK_MAX_HZ && f >= ADC_CLOCK_MIN_HZ {
                return Some(p);
            }
            i += 1;
        }
        None
    }

    const fn bits(self) -> u8 {
        self as u8 & ADPS_MASK
    }
}

pub struct Adc {
    budget: Budget,
}

impl Adc {
    pub const fn new(budget: Budget) -> Self {
        Self { budget }
    }

    pub fn configure<R: Registers>(&self, regs: &mut R, reference: Reference, channel: Channel, prescaler: Prescaler) {
        log::debug!(
            "adc: {:?} reference, channel {}, clock / {}",
            reference,
            channel.index(),
            prescaler.divisor()
        );
        regs.write(Reg::Admux, reference.bits() | (channel.index() & MUX_MASK));
        regs.write(Reg::Adcsra, bit(ADEN) | prescaler.bits());
    }

    /// Runs one conversion and blocks until the converter reports completion.
    pub fn sample<R: Registers>(&self, regs: &mut R) -> Result<RawSample, Error> {
        regs.set_bits(Reg::Adcsra, bit(ADSC));
        poll_until(regs, Reg::Adcsra, self.budget, |v| v & bit(ADSC) == 0)?;
        // ADCL first, it latches ADCH.
        let low = regs.read(Reg::Adcl) as u16;
        let high = regs.read(Reg::Adch) as u16;
        Ok(RawSample::from_masked((high << 8) | low))
    }
}
