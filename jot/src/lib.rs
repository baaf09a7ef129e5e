pub mod cli;
pub mod client;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod projection;
pub mod transport;

pub use client::NoteClient;
pub use error::JotError;
pub use jot_types::Note;
