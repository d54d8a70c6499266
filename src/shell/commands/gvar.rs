use core::fmt::Write;

use crate::{
    consts::MAX_GLOBAL_VARIABLES, errors::ShellError, shell::args::Args,
    types::GlobalVariableConfig,
};

const I32_RANGE: core::ops::RangeInclusive<i64> = i32::MIN as i64..=i32::MAX as i64;

/// Parse `<index> <default> <min> <max>`
pub fn parse(input: &str) -> Result<(usize, GlobalVariableConfig), ShellError> {
    let args = Args::<4>::parse(input)?;
    let index = args.get(0, 0..=MAX_GLOBAL_VARIABLES as i64 - 1)? as usize;

    Ok((
        index,
        GlobalVariableConfig {
            default_value: args.get(1, I32_RANGE)? as i32,
            min: args.get(2, I32_RANGE)? as i32,
            max: args.get(3, I32_RANGE)? as i32,
        },
    ))
}

pub fn write_line<W: Write>(
    out: &mut W,
    index: usize,
    gvar: &GlobalVariableConfig,
) -> core::fmt::Result {
    writeln!(
        out,
        "gvar {} {} {} {}",
        index, gvar.default_value, gvar.min, gvar.max
    )
}
