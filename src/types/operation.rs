use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// The operation performed by a logic condition. The discriminants are part
/// of the configuration protocol and must not be reordered.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Operation {
    #[default]
    True = 0,
    Equal = 1,
    GreaterThan = 2,
    LowerThan = 3,
    Low = 4,
    Mid = 5,
    High = 6,
    And = 7,
    Or = 8,
    Xor = 9,
    Nand = 10,
    Nor = 11,
    Not = 12,
    Sticky = 13,
    Add = 14,
    Sub = 15,
    Mul = 16,
    Div = 17,
    GvarSet = 18,
    GvarInc = 19,
    GvarDec = 20,
    PortSet = 21,
    OverrideArmingSafety = 22,
    OverrideThrottleScale = 23,
    SwapRollYaw = 24,
    SetVtxPowerLevel = 25,
    InvertRoll = 26,
    InvertPitch = 27,
    InvertYaw = 28,
    OverrideThrottle = 29,
    SetVtxBand = 30,
    SetVtxChannel = 31,
    SetOsdLayout = 32,
    Sin = 33,
    Cos = 34,
    Tan = 35,
    MapInput = 36,
    MapOutput = 37,
    RcChannelOverride = 38,
    SetHeadingTarget = 39,
    Modulus = 40,
    LoiterOverride = 41,
    SetProfile = 42,
    Min = 43,
    Max = 44,
    FlightAxisAngleOverride = 45,
    FlightAxisRateOverride = 46,
    Edge = 47,
    Delay = 48,
    Timer = 49,
    Delta = 50,
    ApproxEqual = 51,
    LedPinPwm = 52,
    DisableGpsFix = 53,
    ResetMagCalibration = 54,
    SetGimbalSensitivity = 55,
}

impl Operation {
    /// Number of defined operations, one past the highest discriminant
    pub const COUNT: usize = 56;

    /// Index into per-operation tables
    pub const fn index(self) -> usize {
        self as usize
    }
}
