use crate::{
    consts::MAX_RC_CHANNELS,
    types::{FlightModeOperand, FlightOperand, WaypointOperand},
};

/// Source of the flight data that logic condition operands can refer to.
///
/// The engine never reaches into global vehicle state itself, everything it
/// reads comes through this trait. Boolean telemetry is reported as `0`/`1`.
pub trait FlightContext {
    /// Raw value of the RC channel at the 0-based `index`, in microseconds.
    fn rc_channel(&self, index: usize) -> Option<i32>;

    fn flight_value(&self, operand: FlightOperand) -> i32;

    fn flight_mode(&self, mode: FlightModeOperand) -> bool;

    fn waypoint_value(&self, operand: WaypointOperand) -> i32;
}

/// A plain copy of the flight state, as published by the vehicle tasks (or a
/// simulator) once per cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightSnapshot {
    pub rc_channels: [Option<u16>; MAX_RC_CHANNELS],
    pub flight: [i32; FlightOperand::COUNT],
    /// Active flight modes, one bit per [`FlightModeOperand`]
    pub modes: u32,
    pub waypoints: [i32; WaypointOperand::COUNT],
}

crate::const_default!(
    FlightSnapshot => {
        rc_channels: [None; MAX_RC_CHANNELS],
        flight: [0; FlightOperand::COUNT],
        modes: 0,
        waypoints: [0; WaypointOperand::COUNT],
    }
);

impl FlightSnapshot {
    pub fn set_rc_channel(&mut self, index: usize, value: u16) -> &mut Self {
        if let Some(channel) = self.rc_channels.get_mut(index) {
            *channel = Some(value);
        }
        self
    }

    pub fn set_flight(&mut self, operand: FlightOperand, value: i32) -> &mut Self {
        self.flight[operand as usize] = value;
        self
    }

    pub fn set_mode(&mut self, mode: FlightModeOperand, active: bool) -> &mut Self {
        if active {
            self.modes |= mode.bit();
        } else {
            self.modes &= !mode.bit();
        }
        self
    }

    pub fn set_waypoint(&mut self, operand: WaypointOperand, value: i32) -> &mut Self {
        self.waypoints[operand as usize] = value;
        self
    }
}

impl FlightContext for FlightSnapshot {
    fn rc_channel(&self, index: usize) -> Option<i32> {
        self.rc_channels.get(index).copied().flatten().map(i32::from)
    }

    fn flight_value(&self, operand: FlightOperand) -> i32 {
        self.flight[operand as usize]
    }

    fn flight_mode(&self, mode: FlightModeOperand) -> bool {
        self.modes & mode.bit() != 0
    }

    fn waypoint_value(&self, operand: WaypointOperand) -> i32 {
        self.waypoints[operand as usize]
    }
}
