//! Byte tokenizer and CSI sequence parser

pub mod action;
pub mod params;
pub mod state;

pub use action::{Action, CsiSequence};
pub use params::{Params, MAX_PARAMS};
pub use state::Parser;
