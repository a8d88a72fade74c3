extern crate std;

use super::{Delay, Registers};
use crate::regs::{bit, Reg, ADEN, ADSC, MUX_MASK, TXEN0, UDRE0};
use common::values::{Level, RawSample};
use std::{boxed::Box, vec::Vec};

/// Number of status reads a simulated peripheral stays busy for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Latency {
    Polls(u32),
    Never,
}

impl Latency {
    /// Advances one status read. Returns `true` once the operation is done.
    fn tick(pending: &mut Option<Latency>) -> bool {
        match *pending {
            None => true,
            Some(Latency::Never) => false,
            Some(Latency::Polls(0)) => {
                *pending = None;
                true
            }
            Some(Latency::Polls(n)) => {
                *pending = Some(Latency::Polls(n - 1));
                false
            }
        }
    }
}

pub type SampleSource = Box<dyn FnMut(u8) -> u16 + Send>;

/// A change of an output port register, stamped with simulated time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PortEvent {
    pub at_ms: u64,
    pub reg: Reg,
    pub value: u8,
}

impl PortEvent {
    pub fn level(&self, pin: u8) -> Level {
        Level::from(self.value & bit(pin) != 0)
    }
}

/// Simulated ATmega328P register file with a millisecond clock.
///
/// Only the behaviour the bring-up images depend on is modelled:
/// transmitter readiness after a `UDR0` write, ADC conversions started by
/// `ADSC`, and output port changes.
pub struct SimBoard {
    regs: [u8; Reg::COUNT],
    now_ms: u64,

    tx_latency: Latency,
    tx_pending: Option<Latency>,
    tx: Vec<u8>,
    tx_overruns: usize,

    adc_latency: Latency,
    adc_pending: Option<Latency>,
    adc_source: SampleSource,
    adc_result: RawSample,
    conversions: Vec<u8>,
    overlaps: usize,
    status_reads: usize,

    port_trace: Vec<PortEvent>,
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SimBoard {
    pub fn new() -> Self {
        let mut regs = [0; Reg::COUNT];
        // Reset values from the datasheet.
        regs[Reg::Ucsr0a.index()] = bit(UDRE0);
        regs[Reg::Ucsr0c.index()] = 0x06;
        Self {
            regs,
            now_ms: 0,
            tx_latency: Latency::Polls(0),
            tx_pending: None,
            tx: Vec::new(),
            tx_overruns: 0,
            adc_latency: Latency::Polls(2),
            adc_pending: None,
            adc_source: Box::new(|_| 0),
            adc_result: RawSample::MIN,
            conversions: Vec::new(),
            overlaps: 0,
            status_reads: 0,
            port_trace: Vec::new(),
        }
    }

    pub fn with_tx_latency(mut self, latency: Latency) -> Self {
        self.tx_latency = latency;
        self
    }
    pub fn with_adc_latency(mut self, latency: Latency) -> Self {
        self.adc_latency = latency;
        self
    }
    /// Sets the analog value seen on each channel. Values are masked to 10 bits.
    pub fn with_source<F: FnMut(u8) -> u16 + Send + 'static>(mut self, source: F) -> Self {
        self.adc_source = Box::new(source);
        self
    }

    /// Register value without read side effects.
    pub fn peek(&self, reg: Reg) -> u8 {
        self.regs[reg.index()]
    }
    pub fn snapshot(&self) -> [u8; Reg::COUNT] {
        self.regs
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Bytes shifted out by the transmitter so far.
    pub fn tx(&self) -> &[u8] {
        &self.tx
    }
    pub fn take_tx(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }
    /// Writes to `UDR0` while the data register was still full.
    pub fn tx_overruns(&self) -> usize {
        self.tx_overruns
    }

    /// Channel of every conversion started so far.
    pub fn conversions(&self) -> &[u8] {
        &self.conversions
    }
    /// Conversions requested while another one was in flight.
    pub fn overlaps(&self) -> usize {
        self.overlaps
    }
    /// Reads of `ADCSRA` that observed a conversion in progress.
    pub fn busy_reads(&self) -> usize {
        self.status_reads
    }

    pub fn port_trace(&self) -> &[PortEvent] {
        &self.port_trace
    }

    fn read_tx_status(&mut self) -> u8 {
        let idx = Reg::Ucsr0a.index();
        if Latency::tick(&mut self.tx_pending) {
            self.regs[idx] |= bit(UDRE0);
        }
        self.regs[idx]
    }

    fn read_adc_status(&mut self) -> u8 {
        let idx = Reg::Adcsra.index();
        if self.adc_pending.is_some() {
            if Latency::tick(&mut self.adc_pending) {
                self.regs[idx] &= !bit(ADSC);
                let value = self.adc_result.get();
                self.regs[Reg::Adcl.index()] = value as u8;
                self.regs[Reg::Adch.index()] = (value >> 8) as u8;
            } else {
                self.status_reads += 1;
            }
        }
        self.regs[idx]
    }

    fn write_data(&mut self, value: u8) {
        if self.regs[Reg::Ucsr0b.index()] & bit(TXEN0) == 0 {
            return;
        }
        let status = &mut self.regs[Reg::Ucsr0a.index()];
        if *status & bit(UDRE0) == 0 {
            self.tx_overruns += 1;
            return;
        }
        *status &= !bit(UDRE0);
        self.tx.push(value);
        self.tx_pending = Some(self.tx_latency);
    }

    fn write_adc_control(&mut self, value: u8) {
        let idx = Reg::Adcsra.index();
        let busy = self.adc_pending.is_some();
        if value & bit(ADSC) == 0 || busy {
            if busy && value & bit(ADSC) != 0 {
                self.overlaps += 1;
            }
            // ADSC cannot be cleared by software.
            self.regs[idx] = (value & !bit(ADSC)) | (self.regs[idx] & bit(ADSC));
            return;
        }
        if value & bit(ADEN) == 0 {
            self.regs[idx] = value & !bit(ADSC);
            return;
        }
        let channel = self.regs[Reg::Admux.index()] & MUX_MASK;
        self.conversions.push(channel);
        self.adc_result = RawSample::from_masked((self.adc_source)(channel));
        self.adc_pending = Some(self.adc_latency);
        self.regs[idx] = value;
    }

    fn write_port(&mut self, reg: Reg, value: u8) {
        let idx = reg.index();
        if self.regs[idx] != value {
            self.port_trace.push(PortEvent {
                at_ms: self.now_ms,
                reg,
                value,
            });
        }
        self.regs[idx] = value;
    }
}

impl Registers for SimBoard {
    fn read(&mut self, reg: Reg) -> u8 {
        match reg {
            Reg::Ucsr0a => self.read_tx_status(),
            Reg::Adcsra => self.read_adc_status(),
            _ => self.regs[reg.index()],
        }
    }

    fn write(&mut self, reg: Reg, value: u8) {
        let idx = reg.index();
        match reg {
            Reg::Udr0 => self.write_data(value),
            // UDRE0 is read-only.
            Reg::Ucsr0a => self.regs[idx] = (value & !bit(UDRE0)) | (self.regs[idx] & bit(UDRE0)),
            Reg::Adcsra => self.write_adc_control(value),
            Reg::Adcl | Reg::Adch => (),
            Reg::Portb | Reg::Portc | Reg::Portd => self.write_port(reg, value),
            _ => self.regs[idx] = value,
        }
    }
}

impl Delay for SimBoard {
    fn delay_ms(&mut self, ms: u32) {
        self.now_ms += ms as u64;
    }
}
