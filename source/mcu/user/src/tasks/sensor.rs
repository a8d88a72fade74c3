use crate::{
    adc::{Adc, Channel, Prescaler, Reference},
    board::{Board, Budget},
    usart::Usart,
    Error,
};
use common::{
    config::{BAUD_RATE, CPU_FREQ_HZ, SAMPLE_PERIOD, SENSOR_CHANNEL},
    protocol::{BANNER, LINE_END, RECORD_PREFIX},
    values::RawSample,
};

const PRESCALER: Prescaler = match Prescaler::for_clock(CPU_FREQ_HZ) {
    Some(p) => p,
    None => panic!("no ADC prescaler fits the CPU clock"),
};

const CHANNEL: Channel = match Channel::new(SENSOR_CHANNEL) {
    Some(c) => c,
    None => panic!("sensor channel out of range"),
};

const SAMPLE_PERIOD_MS: u32 = SAMPLE_PERIOD.as_millis() as u32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    Init,
    Sampling,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    /// Peripherals configured and banner sent.
    Started,
    Sampled(RawSample),
}

/// Sensor sampler image: streams raw ADC0 readings over the serial line.
pub struct Sensor<B: Board> {
    board: B,
    usart: Usart,
    adc: Adc,
    state: State,
}

impl<B: Board> Sensor<B> {
    pub fn new(board: B, budget: Budget) -> Self {
        Self {
            board,
            usart: Usart::new(budget),
            adc: Adc::new(budget),
            state: State::Init,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }
    pub fn board(&self) -> &B {
        &self.board
    }
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
    pub fn into_board(self) -> B {
        self.board
    }

    fn start(&mut self) -> Result<(), Error> {
        self.usart.configure(&mut self.board, BAUD_RATE, CPU_FREQ_HZ);
        self.adc.configure(&mut self.board, Reference::Avcc, CHANNEL, PRESCALER);
        for line in BANNER {
            self.usart.transmit_string(&mut self.board, line)?;
            self.usart.transmit_string(&mut self.board, LINE_END)?;
        }
        Ok(())
    }

    fn report(&mut self, sample: RawSample) -> Result<(), Error> {
        self.usart.transmit_string(&mut self.board, RECORD_PREFIX)?;
        self.usart.transmit_integer(&mut self.board, sample.get() as i32)?;
        self.usart.transmit_string(&mut self.board, LINE_END)
    }

    /// Performs one state transition.
    ///
    /// The first call initializes the peripherals, every following call
    /// takes and reports one sample and then waits for the sample period.
    pub fn step(&mut self) -> Result<Event, Error> {
        match self.state {
            State::Init => {
                self.start()?;
                self.state = State::Sampling;
                log::info!("sensor sampler started");
                Ok(Event::Started)
            }
            State::Sampling => {
                let sample = self.adc.sample(&mut self.board)?;
                log::trace!("sample: {}", sample);
                self.report(sample)?;
                self.board.delay_ms(SAMPLE_PERIOD_MS);
                Ok(Event::Sampled(sample))
            }
        }
    }

    /// Steps forever. Returns only if a bounded wait expires.
    pub fn run(mut self) -> Error {
        loop {
            if let Err(e) = self.step() {
                log::error!("sensor sampler stopped: {}", e);
                return e;
            }
        }
    }
}
