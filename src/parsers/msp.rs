//! Payloads of the MSP2 messages used by configurators to read and write the
//! programming configuration and to monitor it at runtime.
//!
//! All multi-byte fields are little-endian. Framing (header, command id and
//! checksum) belongs to the MSP transport and is not handled here.

use heapless::Vec;

use crate::{
    consts::{MAX_GLOBAL_VARIABLES, MAX_LOGIC_CONDITIONS, MAX_PROGRAMMING_PIDS},
    errors::MspError,
    programming::LogicStatus,
    types::{
        ConditionFlags, LogicCondition, Operand, OperandType, Operation, PidGains,
        ProgrammingConfig, ProgrammingPidConfig,
    },
    utils::bytes_reader::BytesReader,
};

/// enabled, activator, operation, 2 × (type, value), flags
pub const CONDITION_LEN: usize = 14;
pub const SET_CONDITION_LEN: usize = CONDITION_LEN + 1;

/// enabled, setpoint (type, value), measurement (type, value), P, I, D, FF
pub const PID_LEN: usize = 19;
pub const SET_PID_LEN: usize = PID_LEN + 1;

/// Largest payload produced by [`process`], all logic conditions
pub const MAX_PAYLOAD_LEN: usize = CONDITION_LEN * MAX_LOGIC_CONDITIONS;

pub type MspPayload = Vec<u8, MAX_PAYLOAD_LEN>;

/// The programming related MSP2 messages
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MspCommand {
    /// Read all logic conditions
    LogicConditions,
    /// Read one logic condition, the request payload is its index
    LogicConditionSingle,
    SetLogicCondition,
    /// Read the current value of every logic condition
    LogicConditionsStatus,
    GvarStatus,
    /// Read all programming PID configurations
    ProgrammingPids,
    SetProgrammingPid,
    ProgrammingPidStatus,
}

/// Handle a programming MSP request. Replies are written to `out`, set
/// commands modify `config` and reply with an empty payload.
pub fn process<const N: usize>(
    command: MspCommand,
    payload: &[u8],
    config: &mut ProgrammingConfig,
    status: &LogicStatus,
    out: &mut Vec<u8, N>,
) -> Result<(), MspError> {
    out.clear();
    match command {
        MspCommand::LogicConditions => {
            for condition in config.conditions.iter() {
                write_condition(out, condition)?;
            }
        }
        MspCommand::LogicConditionSingle => {
            let index = read_index(payload, MAX_LOGIC_CONDITIONS)?;
            write_condition(out, &config.conditions[index])?;
        }
        MspCommand::SetLogicCondition => {
            let (index, condition) = read_set_condition(payload)?;
            debug!("msp: setting logic condition {}", index);
            config.conditions[index] = condition;
        }
        MspCommand::LogicConditionsStatus => write_values(out, &status.values)?,
        MspCommand::GvarStatus => write_values(out, &status.gvars)?,
        MspCommand::ProgrammingPids => {
            for pid in config.pids.iter() {
                write_pid(out, pid)?;
            }
        }
        MspCommand::SetProgrammingPid => {
            let (index, pid) = read_set_pid(payload)?;
            debug!("msp: setting programming pid {}", index);
            config.pids[index] = pid;
        }
        MspCommand::ProgrammingPidStatus => write_values(out, &status.pid_outputs)?,
    }
    Ok(())
}

fn expect_len(bytes: &[u8], expected: usize) -> Result<(), MspError> {
    match bytes.len() {
        actual if actual == expected => Ok(()),
        actual => Err(MspError::InvalidLength { expected, actual }),
    }
}

fn push_bytes<const N: usize>(out: &mut Vec<u8, N>, bytes: &[u8]) -> Result<(), MspError> {
    out.extend_from_slice(bytes)
        .map_err(|_| MspError::BufferFull)
}

fn write_operand<const N: usize>(out: &mut Vec<u8, N>, operand: &Operand) -> Result<(), MspError> {
    push_bytes(out, &[operand.kind.into()])?;
    push_bytes(out, &operand.value.to_le_bytes())
}

fn read_operand(reader: &mut BytesReader) -> Option<Result<Operand, MspError>> {
    let kind = reader.read_u8()?;
    let value = reader.read_i32()?;
    Some(
        OperandType::try_from(kind)
            .map(|kind| Operand::new(kind, value))
            .map_err(|_| MspError::InvalidOperandType(kind)),
    )
}

/// Append the 14 byte payload of one logic condition
pub fn write_condition<const N: usize>(
    out: &mut Vec<u8, N>,
    condition: &LogicCondition,
) -> Result<(), MspError> {
    // No activator travels as -1
    let activator = condition.activator.map_or(-1, |index| index as i8);

    push_bytes(out, &[condition.enabled as u8])?;
    push_bytes(out, &activator.to_le_bytes())?;
    push_bytes(out, &[condition.operation.into()])?;
    write_operand(out, &condition.operand_a)?;
    write_operand(out, &condition.operand_b)?;
    push_bytes(out, &[condition.flags.bits()])
}

/// Decode the 14 byte payload of one logic condition
pub fn read_condition(bytes: &[u8]) -> Result<LogicCondition, MspError> {
    expect_len(bytes, CONDITION_LEN)?;
    let mut reader = BytesReader::new(bytes);
    let truncated = MspError::InvalidLength {
        expected: CONDITION_LEN,
        actual: bytes.len(),
    };

    let enabled = reader.read_u8().ok_or(truncated)? != 0;

    let activator = match reader.read_i8().ok_or(truncated)? {
        -1 => None,
        index if (0..MAX_LOGIC_CONDITIONS as i8).contains(&index) => Some(index as u8),
        invalid => return Err(MspError::InvalidActivator(invalid)),
    };

    let operation = reader.read_u8().ok_or(truncated)?;
    let operation =
        Operation::try_from(operation).map_err(|_| MspError::InvalidOperation(operation))?;

    let operand_a = read_operand(&mut reader).ok_or(truncated)??;
    let operand_b = read_operand(&mut reader).ok_or(truncated)??;
    let flags = ConditionFlags::from_bits_retain(reader.read_u8().ok_or(truncated)?);

    Ok(LogicCondition {
        enabled,
        activator,
        operation,
        operand_a,
        operand_b,
        flags,
    })
}

/// Decode a set-condition payload: the slot index followed by the condition
pub fn read_set_condition(bytes: &[u8]) -> Result<(usize, LogicCondition), MspError> {
    expect_len(bytes, SET_CONDITION_LEN)?;
    let index = read_index(&bytes[..1], MAX_LOGIC_CONDITIONS)?;
    Ok((index, read_condition(&bytes[1..])?))
}

/// Append the 19 byte payload of one programming PID
pub fn write_pid<const N: usize>(
    out: &mut Vec<u8, N>,
    pid: &ProgrammingPidConfig,
) -> Result<(), MspError> {
    push_bytes(out, &[pid.enabled as u8])?;
    write_operand(out, &pid.setpoint)?;
    write_operand(out, &pid.measurement)?;
    for gain in [pid.gains.p, pid.gains.i, pid.gains.d, pid.gains.ff] {
        push_bytes(out, &gain.to_le_bytes())?;
    }
    Ok(())
}

/// Decode the 19 byte payload of one programming PID
pub fn read_pid(bytes: &[u8]) -> Result<ProgrammingPidConfig, MspError> {
    expect_len(bytes, PID_LEN)?;
    let mut reader = BytesReader::new(bytes);
    let truncated = MspError::InvalidLength {
        expected: PID_LEN,
        actual: bytes.len(),
    };

    let enabled = reader.read_u8().ok_or(truncated)? != 0;
    let setpoint = read_operand(&mut reader).ok_or(truncated)??;
    let measurement = read_operand(&mut reader).ok_or(truncated)??;

    let mut gains = [0u16; 4];
    for gain in gains.iter_mut() {
        *gain = reader.read_u16().ok_or(truncated)?;
    }
    let [p, i, d, ff] = gains;

    Ok(ProgrammingPidConfig {
        enabled,
        setpoint,
        measurement,
        gains: PidGains { p, i, d, ff },
    })
}

/// Decode a set-PID payload: the controller index followed by the PID
pub fn read_set_pid(bytes: &[u8]) -> Result<(usize, ProgrammingPidConfig), MspError> {
    expect_len(bytes, SET_PID_LEN)?;
    let index = read_index(&bytes[..1], MAX_PROGRAMMING_PIDS)?;
    Ok((index, read_pid(&bytes[1..])?))
}

/// Append a status frame, one `i32` per value
pub fn write_values<const N: usize>(out: &mut Vec<u8, N>, values: &[i32]) -> Result<(), MspError> {
    for value in values {
        push_bytes(out, &value.to_le_bytes())?;
    }
    Ok(())
}

fn read_index(bytes: &[u8], count: usize) -> Result<usize, MspError> {
    let index = BytesReader::new(bytes)
        .read_u8()
        .ok_or(MspError::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
    match index as usize {
        i if i < count => Ok(i),
        _ => Err(MspError::InvalidIndex(index)),
    }
}

// Status frames always fit the largest payload
static_assertions::const_assert!(MAX_GLOBAL_VARIABLES * 4 <= MAX_PAYLOAD_LEN);
static_assertions::const_assert!(MAX_PROGRAMMING_PIDS * PID_LEN <= MAX_PAYLOAD_LEN);

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::types::{FlightOperand, GlobalFlags};

    const CONDITION_BYTES: [u8; CONDITION_LEN] = hex!("01 02 0E 02 11 00 00 00 00 FF FF FF FF 01");

    fn condition() -> LogicCondition {
        LogicCondition::new(
            Operation::Add,
            Operand::flight(FlightOperand::IsArmed),
            Operand::value(-1),
        )
        .activated_by(2)
        .latching()
    }

    #[test]
    fn condition_layout() {
        let mut out: Vec<u8, 32> = Vec::new();
        write_condition(&mut out, &condition()).unwrap();
        assert_eq!(out.as_slice(), &CONDITION_BYTES);
        assert_eq!(read_condition(&CONDITION_BYTES), Ok(condition()));
    }

    #[test]
    fn no_activator_is_minus_one() {
        let mut out: Vec<u8, 32> = Vec::new();
        write_condition(&mut out, &LogicCondition::const_default()).unwrap();
        assert_eq!(out.as_slice(), &hex!("00 FF 00 00 00 00 00 00 00 00 00 00 00 00"));
        assert_eq!(read_condition(&out), Ok(LogicCondition::const_default()));
    }

    #[test]
    fn condition_rejects_bad_fields() {
        let mut bytes = CONDITION_BYTES;
        bytes[1] = 16;
        assert_eq!(read_condition(&bytes), Err(MspError::InvalidActivator(16)));

        let mut bytes = CONDITION_BYTES;
        bytes[2] = Operation::COUNT as u8;
        assert_eq!(read_condition(&bytes), Err(MspError::InvalidOperation(56)));

        let mut bytes = CONDITION_BYTES;
        bytes[3] = 8;
        assert_eq!(read_condition(&bytes), Err(MspError::InvalidOperandType(8)));

        assert_eq!(
            read_condition(&CONDITION_BYTES[..13]),
            Err(MspError::InvalidLength {
                expected: 14,
                actual: 13
            })
        );
    }

    #[test]
    fn set_condition_requires_exact_length() {
        let mut frame = [0u8; SET_CONDITION_LEN];
        frame[0] = 15;
        frame[1..].copy_from_slice(&CONDITION_BYTES);
        assert_eq!(read_set_condition(&frame), Ok((15, condition())));

        frame[0] = 16;
        assert_eq!(read_set_condition(&frame), Err(MspError::InvalidIndex(16)));

        assert_eq!(
            read_set_condition(&frame[..14]),
            Err(MspError::InvalidLength {
                expected: 15,
                actual: 14
            })
        );
    }

    #[test]
    fn pid_layout() {
        let pid = ProgrammingPidConfig {
            enabled: true,
            setpoint: Operand::gvar(3),
            measurement: Operand::rc_channel(5),
            gains: PidGains {
                p: 1000,
                i: 2,
                d: 0x0304,
                ff: 0xFFFF,
            },
        };
        let bytes = hex!("01 05 03 00 00 00 01 05 00 00 00 E8 03 02 00 04 03 FF FF");

        let mut out: Vec<u8, 32> = Vec::new();
        write_pid(&mut out, &pid).unwrap();
        assert_eq!(out.as_slice(), &bytes);
        assert_eq!(read_pid(&bytes), Ok(pid));

        let mut frame = [0u8; SET_PID_LEN];
        frame[0] = 3;
        frame[1..].copy_from_slice(&bytes);
        assert_eq!(read_set_pid(&frame), Ok((3, pid)));
        frame[0] = 4;
        assert_eq!(read_set_pid(&frame), Err(MspError::InvalidIndex(4)));
    }

    #[test]
    fn status_frames() {
        let status = LogicStatus {
            values: [1; MAX_LOGIC_CONDITIONS],
            gvars: [-2, 0, 0, 0, 0, 0, 0, 0x01020304],
            pid_outputs: [0, 0, 0, 1000],
            flags: GlobalFlags::empty(),
        };
        let mut config = ProgrammingConfig::const_default();
        let mut out = MspPayload::new();

        process(MspCommand::LogicConditionsStatus, &[], &mut config, &status, &mut out).unwrap();
        assert_eq!(out.len(), MAX_LOGIC_CONDITIONS * 4);

        process(MspCommand::GvarStatus, &[], &mut config, &status, &mut out).unwrap();
        assert_eq!(&out[..4], &hex!("FE FF FF FF"));
        assert_eq!(&out[28..], &hex!("04 03 02 01"));

        process(MspCommand::ProgrammingPidStatus, &[], &mut config, &status, &mut out).unwrap();
        assert_eq!(out.as_slice(), &hex!("00000000 00000000 00000000 E8030000"));
    }

    #[test]
    fn process_reads_and_writes_config() {
        let status = LogicStatus::default();
        let mut config = ProgrammingConfig::const_default();
        let mut out = MspPayload::new();

        let mut frame = [0u8; SET_CONDITION_LEN];
        frame[0] = 4;
        frame[1..].copy_from_slice(&CONDITION_BYTES);
        process(MspCommand::SetLogicCondition, &frame, &mut config, &status, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(config.conditions[4], condition());

        process(MspCommand::LogicConditionSingle, &[4], &mut config, &status, &mut out).unwrap();
        assert_eq!(out.as_slice(), &CONDITION_BYTES);

        process(MspCommand::LogicConditions, &[], &mut config, &status, &mut out).unwrap();
        assert_eq!(out.len(), MAX_PAYLOAD_LEN);
        assert_eq!(&out[4 * CONDITION_LEN..5 * CONDITION_LEN], &CONDITION_BYTES);

        process(MspCommand::ProgrammingPids, &[], &mut config, &status, &mut out).unwrap();
        assert_eq!(out.len(), MAX_PROGRAMMING_PIDS * PID_LEN);

        assert_eq!(
            process(MspCommand::LogicConditionSingle, &[16], &mut config, &status, &mut out),
            Err(MspError::InvalidIndex(16))
        );
    }

    #[test]
    fn small_buffer_is_reported() {
        let mut config = ProgrammingConfig::const_default();
        let mut out: Vec<u8, 8> = Vec::new();
        assert_eq!(
            process(MspCommand::LogicConditions, &[], &mut config, &LogicStatus::default(), &mut out),
            Err(MspError::BufferFull)
        );
    }
}
