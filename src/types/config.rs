use serde::{Deserialize, Serialize};

use crate::{
    consts::{MAX_GLOBAL_VARIABLES, MAX_LOGIC_CONDITIONS, MAX_PROGRAMMING_PIDS},
    errors::{adapter::postcard::PostcardError, LogicError},
    ConstDefault,
};

use super::{condition::LogicCondition, operand::Operand};

/// Initial value and limits of a global variable
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlobalVariableConfig {
    pub default_value: i32,
    pub min: i32,
    pub max: i32,
}

crate::const_default!(
    GlobalVariableConfig => {
        default_value: 0,
        min: i32::MIN,
        max: i32::MAX,
    }
);

/// Gains as entered by the user, scaled by 1/1000 when applied
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidGains {
    pub p: u16,
    pub i: u16,
    pub d: u16,
    pub ff: u16,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgrammingPidConfig {
    pub enabled: bool,
    pub setpoint: Operand,
    pub measurement: Operand,
    pub gains: PidGains,
}

crate::const_default!(
    ProgrammingPidConfig => {
        enabled: false,
        setpoint: Operand::value(0),
        measurement: Operand::value(0),
        gains: PidGains {
            p: 0,
            i: 0,
            d: 0,
            ff: 0,
        },
    }
);

/// The complete user programming: logic conditions, global variables and
/// programming PIDs. This is what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammingConfig {
    pub conditions: [LogicCondition; MAX_LOGIC_CONDITIONS],
    pub gvars: [GlobalVariableConfig; MAX_GLOBAL_VARIABLES],
    pub pids: [ProgrammingPidConfig; MAX_PROGRAMMING_PIDS],
}

impl ProgrammingConfig {
    /// Upper bound of the serialized size, with every varint at full width
    pub const MAX_SERIALIZED_LEN: usize = MAX_LOGIC_CONDITIONS * 24
        + MAX_GLOBAL_VARIABLES * 15
        + MAX_PROGRAMMING_PIDS * 25;

    /// Restore every slot to its default
    pub fn reset(&mut self) {
        *self = Self::const_default();
    }

    /// Serialize the configuration into `buf`, returning the used part
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], LogicError> {
        postcard::to_slice(self, buf).map_err(|e| PostcardError::from(e).into())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LogicError> {
        postcard::from_bytes(bytes).map_err(|e| PostcardError::from(e).into())
    }
}

crate::const_default!(
    ProgrammingConfig => {
        conditions: [LogicCondition::DEFAULT; MAX_LOGIC_CONDITIONS],
        gvars: [GlobalVariableConfig::DEFAULT; MAX_GLOBAL_VARIABLES],
        pids: [ProgrammingPidConfig::DEFAULT; MAX_PROGRAMMING_PIDS],
    }
);
