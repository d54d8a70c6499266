use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Where the value of an operand comes from
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperandType {
    /// The operand value is used as a literal
    #[default]
    Value = 0,
    /// Raw value of RC channel `value` (1-based)
    RcChannel = 1,
    /// Flight telemetry, indexed by [`FlightOperand`]
    Flight = 2,
    /// Whether a flight mode is active, indexed by [`FlightModeOperand`]
    FlightMode = 3,
    /// Result of another logic condition
    LogicCondition = 4,
    /// Value of a global variable
    GlobalVariable = 5,
    /// Output of a programming PID controller
    Pid = 6,
    /// Mission / waypoint state, indexed by [`WaypointOperand`]
    Waypoints = 7,
}

impl OperandType {
    pub const COUNT: usize = 8;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Operand {
    pub kind: OperandType,
    pub value: i32,
}

impl Operand {
    pub const fn new(kind: OperandType, value: i32) -> Self {
        Self { kind, value }
    }

    /// A literal operand
    pub const fn value(value: i32) -> Self {
        Self::new(OperandType::Value, value)
    }

    pub const fn rc_channel(channel: i32) -> Self {
        Self::new(OperandType::RcChannel, channel)
    }

    pub const fn flight(operand: FlightOperand) -> Self {
        Self::new(OperandType::Flight, operand as i32)
    }

    pub const fn flight_mode(mode: FlightModeOperand) -> Self {
        Self::new(OperandType::FlightMode, mode as i32)
    }

    pub const fn condition(index: i32) -> Self {
        Self::new(OperandType::LogicCondition, index)
    }

    pub const fn gvar(index: i32) -> Self {
        Self::new(OperandType::GlobalVariable, index)
    }

    pub const fn pid(index: i32) -> Self {
        Self::new(OperandType::Pid, index)
    }

    pub const fn waypoint(operand: WaypointOperand) -> Self {
        Self::new(OperandType::Waypoints, operand as i32)
    }
}

/// Flight telemetry values. Units follow the configurator conventions:
/// distances and altitudes in cm (home/trip distance in m), speeds in cm/s,
/// voltages in cV, current in cA, angles in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FlightOperand {
    ArmTimer = 0,
    HomeDistance,
    TripDistance,
    Rssi,
    Vbat,
    CellVoltage,
    Current,
    MahDrawn,
    GpsSats,
    GroundSpeed,
    Speed3d,
    AirSpeed,
    Altitude,
    VerticalSpeed,
    ThrottlePos,
    AttitudeRoll,
    AttitudePitch,
    IsArmed,
    IsAutolaunch,
    IsAltitudeControl,
    IsPositionControl,
    IsEmergencyLanding,
    IsRth,
    IsLanding,
    IsFailsafe,
    StabilizedRoll,
    StabilizedPitch,
    StabilizedYaw,
    HomeDistance3d,
    LqUplink,
    Snr,
    GpsValid,
    LoiterRadius,
    ActiveProfile,
    BattCells,
    AglStatus,
    Agl,
    RangefinderRaw,
    ActiveMixerProfile,
    MixerTransitionActive,
    AttitudeYaw,
    FwLandState,
    BattProfile,
    FlownLoiterRadius,
    LqDownlink,
    UplinkRssiDbm,
}

impl FlightOperand {
    pub const COUNT: usize = 46;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FlightModeOperand {
    Failsafe = 0,
    Manual,
    Rth,
    Poshold,
    Cruise,
    Althold,
    Angle,
    Horizon,
    Air,
    User1,
    User2,
    CourseHold,
    User3,
    User4,
    Acro,
    WaypointMission,
    Anglehold,
}

impl FlightModeOperand {
    pub const COUNT: usize = 17;

    /// Bit used for this mode in [`crate::FlightSnapshot`]
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum WaypointOperand {
    IsWp = 0,
    WaypointIndex,
    WaypointAction,
    NextWaypointAction,
    WaypointDistance,
    DistanceFromWaypoint,
    User1Action,
    User2Action,
    User3Action,
    User4Action,
    User1ActionNextWp,
    User2ActionNextWp,
    User3ActionNextWp,
    User4ActionNextWp,
}

impl WaypointOperand {
    pub const COUNT: usize = 14;
}

/// Look up a table operand from its configured value. Values outside of the
/// `u8` range or the table are reported as `None`.
pub(crate) fn table_operand<T: TryFromPrimitive<Primitive = u8>>(value: i32) -> Option<T> {
    u8::try_from(value).ok().and_then(|v| T::try_from_primitive(v).ok())
}
