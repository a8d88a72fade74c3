//! ATmega328P registers touched by the bring-up images.

use derive_more::Display;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum Reg {
    Ddrb,
    Portb,
    Ddrc,
    Portc,
    Ddrd,
    Portd,
    Adcl,
    Adch,
    Adcsra,
    Admux,
    Ucsr0a,
    Ucsr0b,
    Ucsr0c,
    Ubrr0l,
    Ubrr0h,
    Udr0,
}

impl Reg {
    pub const COUNT: usize = 16;

    pub const ALL: [Reg; Self::COUNT] = [
        Reg::Ddrb,
        Reg::Portb,
        Reg::Ddrc,
        Reg::Portc,
        Reg::Ddrd,
        Reg::Portd,
        Reg::Adcl,
        Reg::Adch,
        Reg::Adcsra,
        Reg::Admux,
        Reg::Ucsr0a,
        Reg::Ucsr0b,
        Reg::Ucsr0c,
        Reg::Ubrr0l,
        Reg::Ubrr0h,
        Reg::Udr0,
    ];

    /// Data-space address (I/O registers are offset by 0x20).
    pub const fn addr(self) -> usize {
        match self {
            Reg::Ddrb => 0x24,
            Reg::Portb => 0x25,
            Reg::Ddrc => 0x27,
            Reg::Portc => 0x28,
            Reg::Ddrd => 0x2A,
            Reg::Portd => 0x2B,
            Reg::Adcl => 0x78,
            Reg::Adch => 0x79,
            Reg::Adcsra => 0x7A,
            Reg::Admux => 0x7C,
            Reg::Ucsr0a => 0xC0,
            Reg::Ucsr0b => 0xC1,
            Reg::Ucsr0c => 0xC2,
            Reg::Ubrr0l => 0xC4,
            Reg::Ubrr0h => 0xC5,
            Reg::Udr0 => 0xC6,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

pub const fn bit(n: u8) -> u8 {
    1 << n
}

// UCSR0A
pub const UDRE0: u8 = 5;
// UCSR0B
pub const TXEN0: u8 = 3;
// UCSR0C
pub const UCSZ01: u8 = 2;
pub const UCSZ00: u8 = 1;

// ADMUX
pub const REFS1: u8 = 7;
pub const REFS0: u8 = 6;
pub const MUX_MASK: u8 = 0x0F;
// ADCSRA
pub const ADEN: u8 = 7;
pub const ADSC: u8 = 6;
pub const ADPS_MASK: u8 = 0x07;
