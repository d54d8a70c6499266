pub mod gvar;
pub mod logic;
pub mod pid;

use crate::{
    consts::{OPERAND_VALUE_MAX, OPERAND_VALUE_MIN},
    errors::ShellError,
    types::{Operand, OperandType},
};

use super::args::Args;

/// Read an operand from its type at `position` and value at `position + 1`
fn operand<const N: usize>(args: &Args<N>, position: usize) -> Result<Operand, ShellError> {
    let kind = args.get(position, 0..=OperandType::COUNT as i64 - 1)? as u8;
    let kind = OperandType::try_from(kind).map_err(|_| ShellError::OutOfRange(position))?;
    let value = args.get(
        position + 1,
        OPERAND_VALUE_MIN as i64..=OPERAND_VALUE_MAX as i64,
    )?;
    Ok(Operand::new(kind, value as i32))
}
