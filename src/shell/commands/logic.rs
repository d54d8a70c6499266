use core::fmt::Write;

use crate::{
    consts::MAX_LOGIC_CONDITIONS,
    errors::ShellError,
    shell::args::Args,
    types::{ConditionFlags, LogicCondition, Operation},
};

/// Parse `<index> <enabled> <activator> <operation> <a type> <a value>
/// <b type> <b value> <flags>`
pub fn parse(input: &str) -> Result<(usize, LogicCondition), ShellError> {
    let args = Args::<9>::parse(input)?;
    let last = MAX_LOGIC_CONDITIONS as i64 - 1;

    let index = args.get(0, 0..=last)? as usize;
    let enabled = args.get(1, 0..=1)? == 1;
    let activator = match args.get(2, -1..=last)? {
        -1 => None,
        index => Some(index as u8),
    };
    let operation = args.get(3, 0..=Operation::COUNT as i64 - 1)? as u8;
    let operation = Operation::try_from(operation).map_err(|_| ShellError::OutOfRange(3))?;
    let operand_a = super::operand(&args, 4)?;
    let operand_b = super::operand(&args, 6)?;
    let flags = ConditionFlags::from_bits_retain(args.get(8, 0..=u8::MAX as i64)? as u8);

    Ok((
        index,
        LogicCondition {
            enabled,
            activator,
            operation,
            operand_a,
            operand_b,
            flags,
        },
    ))
}

pub fn write_line<W: Write>(out: &mut W, index: usize, c: &LogicCondition) -> core::fmt::Result {
    writeln!(
        out,
        "logic {} {} {} {} {} {} {} {} {}",
        index,
        c.enabled as u8,
        c.activator.map_or(-1, i32::from),
        u8::from(c.operation),
        u8::from(c.operand_a.kind),
        c.operand_a.value,
        u8::from(c.operand_b.kind),
        c.operand_b.value,
        c.flags.bits(),
    )
}
