use std::io;
use thiserror::Error;

/// Conditions input handling can't recover from. The protocol with the
/// story assumes input always turns up eventually, so these end the
/// session rather than being handed to the story.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("end of input")]
    EndOfInput,
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}
