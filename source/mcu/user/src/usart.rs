//! Transmit-only USART0, 8N1, no flow control.

use crate::{
    board::{poll_until, Budget, Registers},
    regs::{bit, Reg, TXEN0, UCSZ00, UCSZ01, UDRE0},
    Error,
};
use core::fmt::Write;
use heapless::String;

/// Text length of `i32::MIN`.
pub const INT_BUFFER_LEN: usize = 11;

/// `UBRR` value for normal-speed asynchronous mode.
pub const fn baud_divisor(baud_rate: u32, cpu_freq_hz: u32) -> u16 {
    (cpu_freq_hz / (16 * baud_rate) - 1) as u16
}

pub struct Usart {
    budget: Budget,
}

impl Usart {
    pub const fn new(budget: Budget) -> Self {
        Self { budget }
    }

    pub fn configure<R: Registers>(&self, regs: &mut R, baud_rate: u32, cpu_freq_hz: u32) {
        let ubrr = baud_divisor(baud_rate, cpu_freq_hz);
        log::debug!("usart: {} baud, UBRR0 = {}", baud_rate, ubrr);
        regs.write(Reg::Ubrr0h, (ubrr >> 8) as u8);
        regs.write(Reg::Ubrr0l, ubrr as u8);
        regs.write(Reg::Ucsr0b, bit(TXEN0));
        regs.write(Reg::Ucsr0c, bit(UCSZ01) | bit(UCSZ00));
    }

    /// Waits for an empty data register, then hands the byte to the shifter.
    pub fn transmit_byte<R: Registers>(&self, regs: &mut R, byte: u8) -> Result<(), Error> {
        poll_until(regs, Reg::Ucsr0a, self.budget, |v| v & bit(UDRE0) != 0)?;
        regs.write(Reg::Udr0, byte);
        Ok(())
    }

    pub fn transmit_string<R: Registers>(&self, regs: &mut R, text: &str) -> Result<(), Error> {
        text.bytes().try_for_each(|b| self.transmit_byte(regs, b))
    }

    pub fn transmit_integer<R: Registers>(&self, regs: &mut R, value: i32) -> Result<(), Error> {
        let mut text: String<INT_BUFFER_LEN> = String::new();
        // The buffer fits every `i32`.
        let res = write!(text, "{}", value);
        debug_assert!(res.is_ok());
        self.transmit_string(regs, &text)
    }
}
