use crate::{
    board::Board,
    gpio::{OutputPin, Port},
};
use common::{
    config::{RELAY_OFF_TIME, RELAY_ON_TIME, RELAY_PIN, RELAY_POLARITY},
    values::Level,
};

pub const PIN: OutputPin = OutputPin::new(Port::D, RELAY_PIN);

pub const ACTIVE: Level = RELAY_POLARITY.active();
pub const INACTIVE: Level = RELAY_POLARITY.inactive();

const ON_TIME_MS: u32 = RELAY_ON_TIME.as_millis() as u32;
const OFF_TIME_MS: u32 = RELAY_OFF_TIME.as_millis() as u32;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    Init,
    /// Relay released, waiting to be energized.
    Off,
    /// Relay energized, waiting to be released.
    On,
}

/// Relay cycler image: energizes the relay for [`RELAY_ON_TIME`], then
/// releases it for [`RELAY_OFF_TIME`], forever.
pub struct Relay<B: Board> {
    board: B,
    state: State,
}

impl<B: Board> Relay<B> {
    pub fn new(board: B) -> Self {
        Self {
            board,
            state: State::Init,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }
    pub fn board(&self) -> &B {
        &self.board
    }
    pub fn into_board(self) -> B {
        self.board
    }

    /// Performs one state transition and returns the new state.
    pub fn step(&mut self) -> State {
        self.state = match self.state {
            State::Init => {
                PIN.configure(&mut self.board);
                PIN.set_level(&mut self.board, INACTIVE);
                log::info!("relay cycler started");
                State::Off
            }
            State::Off => {
                PIN.set_level(&mut self.board, ACTIVE);
                self.board.delay_ms(ON_TIME_MS);
                State::On
            }
            State::On => {
                PIN.set_level(&mut self.board, INACTIVE);
                self.board.delay_ms(OFF_TIME_MS);
                State::Off
            }
        };
        log::debug!("relay: {:?}", self.state);
        self.state
    }

    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }
}
