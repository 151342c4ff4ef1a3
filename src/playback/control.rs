#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Transport commands sent to a running backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    Suspend,
    Resume,
    Stop,
}

pub trait ControlReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl ControlReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

impl ControlReceiver for std::collections::VecDeque<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        self.pop_front()
    }
}
