use crate::regs::Reg;
use derive_more::Display;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum Error {
    /// Busy-wait budget ran out before the peripheral became ready.
    #[display(fmt = "timed out polling {}", reg)]
    TimedOut { reg: Reg },
}
