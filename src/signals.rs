use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex as M,
    channel::Channel,
    watch::{Sender, Watch},
};

use crate::{
    consts::MAX_LOGIC_CONDITIONS, context::FlightSnapshot, logic::LogicRequest,
    programming::LogicStatus, types::ProgrammingConfig,
};

/// Maximum number of receivers per watch
pub const SUBS: usize = 4;

// Inputs to the logic runner.

/// The active programming configuration, e.g. from storage or the CLI
pub static CFG_PROGRAMMING: Watch<M, ProgrammingConfig, SUBS> = Watch::new();

/// Latest telemetry, RC channels and flight modes
pub static FLIGHT_SNAPSHOT: Watch<M, FlightSnapshot, SUBS> = Watch::new();

/// Whether the CLI is active. Logic conditions are suspended meanwhile.
pub static CLI_ACTIVE: Watch<M, bool, SUBS> = Watch::new();

/// Arming state of the vehicle
pub static ARMED: Watch<M, bool, SUBS> = Watch::new();

// Outputs of the logic runner.

/// Condition values, global variables, PID outputs and override flags
pub static LOGIC_STATUS: Watch<M, LogicStatus, SUBS> = Watch::new();

pub type LogicStatusSender = Sender<'static, M, LogicStatus, SUBS>;

/// Hardware requests, to be executed by the relevant drivers
pub static LOGIC_REQUESTS: Channel<M, LogicRequest, MAX_LOGIC_CONDITIONS> = Channel::new();
