//! Reply channel implementations for Eatba.
//!
//! Available channels:
//! - **LINE**: Messaging API webhook decoding and reply client
//! - **Console**: logs and records replies (dry run, `eatba chat`, tests)

pub mod console;
pub mod line;

pub use console::ConsoleChannel;
pub use line::LineChannel;
