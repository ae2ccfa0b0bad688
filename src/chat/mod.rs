//! Live chat of one stream: a bounded message log fed by a single
//! connection.

mod log;
mod session;

pub use log::ChatLog;
pub use session::{ChatSession, ChatStatus};
