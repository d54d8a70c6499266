use embassy_time::Instant;
use serde::{Deserialize, Serialize};

use crate::types::ConditionFlags;

/// Runtime state of one logic condition slot
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ConditionState {
    /// Result of the latest evaluation
    pub value: i32,
    pub flags: ConditionFlags,
    /// Deadline used by the temporal operations
    pub timeout: Option<Instant>,
    /// Operand A of the previous evaluation, used by `Delta`
    pub last_value: i32,
}

crate::const_default!(
    ConditionState => {
        value: 0,
        flags: ConditionFlags::empty(),
        timeout: None,
        last_value: 0,
    }
);

impl ConditionState {
    pub fn is_latched(&self) -> bool {
        self.flags.contains(ConditionFlags::LATCH)
    }
}

/// Angle and rate targets requested for one flight axis
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AxisOverride {
    /// Target angle [centidegrees]
    pub angle: Option<i32>,
    /// Target rate [deg/s]
    pub rate: Option<i32>,
}

/// A hardware side effect requested by a logic condition. The engine does
/// not drive hardware, the owner of the engine drains these after each
/// update and forwards them to the relevant drivers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicRequest {
    SetVtxPowerLevel(u8),
    SetVtxBand(u8),
    SetVtxChannel(u8),
    /// Drive an IO expander pin
    PortSet { pin: i32, level: i32 },
    /// Start PWM on the LED pin with the given duty [%], or stop it
    LedPinPwm(Option<u8>),
    /// Switch to the 0-based flight profile
    SetProfile(u8),
    /// New heading hold target [deg]
    SetHeadingTarget(i32),
    ResetMagCalibration,
}

/// VTX settings last requested through logic conditions, so unchanged values
/// are not sent to the transmitter every cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(super) struct VtxRequested {
    pub power: Option<u8>,
    pub band: Option<u8>,
    pub channel: Option<u8>,
}
