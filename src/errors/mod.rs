use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod adapter;
use adapter::postcard::PostcardError;

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicError {
    #[error("Postcard ser/de error: {0}")]
    Postcard(#[from] PostcardError),
    #[error("MSP payload error: {0}")]
    Msp(#[from] MspError),
    #[error("CLI error: {0}")]
    Shell(#[from] ShellError),
}

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MspError {
    #[error("Payload of {actual} bytes where {expected} were expected.")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Slot index {0} is out of range.")]
    InvalidIndex(u8),
    #[error("Activator {0} does not refer to a logic condition.")]
    InvalidActivator(i8),
    #[error("Operation {0} is not known.")]
    InvalidOperation(u8),
    #[error("Operand type {0} is not known.")]
    InvalidOperandType(u8),
    #[error("The output buffer is too small for the frame.")]
    BufferFull,
}

#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShellError {
    #[error("Unknown command.")]
    UnknownCommand,
    #[error("Expected {expected} arguments, got {actual}.")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("Argument {0} is not an integer.")]
    NotAnInteger(usize),
    #[error("Argument {0} is out of range.")]
    OutOfRange(usize),
    #[error("The output line did not fit the buffer.")]
    Format,
}

impl From<core::fmt::Error> for ShellError {
    fn from(_: core::fmt::Error) -> Self {
        ShellError::Format
    }
}
