use core::fmt::Write;

use crate::{
    consts::MAX_PROGRAMMING_PIDS,
    errors::ShellError,
    shell::args::Args,
    types::{PidGains, ProgrammingPidConfig},
};

const GAIN_RANGE: core::ops::RangeInclusive<i64> = 0..=i16::MAX as i64;

/// Parse `<index> <enabled> <setpoint type> <setpoint value>
/// <measurement type> <measurement value> <P> <I> <D> <FF>`
pub fn parse(input: &str) -> Result<(usize, ProgrammingPidConfig), ShellError> {
    let args = Args::<10>::parse(input)?;
    let index = args.get(0, 0..=MAX_PROGRAMMING_PIDS as i64 - 1)? as usize;
    let enabled = args.get(1, 0..=1)? == 1;
    let setpoint = super::operand(&args, 2)?;
    let measurement = super::operand(&args, 4)?;

    let mut gains = [0u16; 4];
    for (position, gain) in (6..).zip(gains.iter_mut()) {
        *gain = args.get(position, GAIN_RANGE)? as u16;
    }
    let [p, i, d, ff] = gains;

    Ok((
        index,
        ProgrammingPidConfig {
            enabled,
            setpoint,
            measurement,
            gains: PidGains { p, i, d, ff },
        },
    ))
}

pub fn write_line<W: Write>(
    out: &mut W,
    index: usize,
    pid: &ProgrammingPidConfig,
) -> core::fmt::Result {
    writeln!(
        out,
        "pid {} {} {} {} {} {} {} {} {} {}",
        index,
        pid.enabled as u8,
        u8::from(pid.setpoint.kind),
        pid.setpoint.value,
        u8::from(pid.measurement.kind),
        pid.measurement.value,
        pid.gains.p,
        pid.gains.i,
        pid.gains.d,
        pid.gains.ff,
    )
}
