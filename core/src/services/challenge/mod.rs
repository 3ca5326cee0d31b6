//! Browser challenge flow: the user-facing state machine.

mod flow;
mod renderer;

pub use flow::{ChallengeFlow, FlowResponse, FlowState, Signal};
pub use renderer::{ChallengeRenderer, Notice, NoticeKind, PlainTextRenderer};

#[cfg(test)]
mod tests;
