use embassy_time::Instant;
use serde::{Deserialize, Serialize};

use crate::{
    consts::{MAX_GLOBAL_VARIABLES, MAX_LOGIC_CONDITIONS, MAX_PROGRAMMING_PIDS},
    context::FlightContext,
    filters::prog_pid::ProgrammingPid,
    gvar::GlobalVariables,
    logic::{LogicEngine, LogicRequest},
    types::{GlobalFlags, ProgrammingConfig},
};

/// Nominal sample time of the programming PIDs, used for the filter setup
const PID_NOMINAL_TS: f32 = 0.1;

/// Snapshot of the programming runtime, published after every update
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicStatus {
    pub values: [i32; MAX_LOGIC_CONDITIONS],
    pub gvars: [i32; MAX_GLOBAL_VARIABLES],
    pub pid_outputs: [i32; MAX_PROGRAMMING_PIDS],
    pub flags: GlobalFlags,
}

crate::const_default!(
    LogicStatus => {
        values: [0; MAX_LOGIC_CONDITIONS],
        gvars: [0; MAX_GLOBAL_VARIABLES],
        pid_outputs: [0; MAX_PROGRAMMING_PIDS],
        flags: GlobalFlags::empty(),
    }
);

/// Owns the configuration together with all runtime state: the logic
/// engine, the global variables and the programming PIDs.
pub struct Programming {
    config: ProgrammingConfig,
    logic: LogicEngine,
    gvars: GlobalVariables,
    pids: [ProgrammingPid; MAX_PROGRAMMING_PIDS],
    last_pid_update: Option<Instant>,
}

impl Programming {
    pub fn new(config: ProgrammingConfig) -> Self {
        let mut gvars = GlobalVariables::new();
        gvars.init(&config.gvars);
        let pids =
            core::array::from_fn(|i| ProgrammingPid::new(config.pids[i].gains, PID_NOMINAL_TS));

        Self {
            config,
            logic: LogicEngine::new(),
            gvars,
            pids,
            last_pid_update: None,
        }
    }

    pub fn config(&self) -> &ProgrammingConfig {
        &self.config
    }

    pub fn logic(&self) -> &LogicEngine {
        &self.logic
    }

    pub fn gvars(&self) -> &GlobalVariables {
        &self.gvars
    }

    /// Apply a new configuration. Slots and controllers whose configuration
    /// changed start over, everything else keeps running.
    pub fn set_config(&mut self, config: ProgrammingConfig) {
        let conditions = self.config.conditions.iter().zip(&config.conditions);
        for (index, (old, new)) in conditions.enumerate() {
            if old != new {
                debug!("programming: condition {} changed", index);
                self.logic.reset_slot(index);
            }
        }

        let pids = self.config.pids.iter().zip(&config.pids);
        for (pid, (old, new)) in self.pids.iter_mut().zip(pids) {
            if old != new {
                pid.set_gains(new.gains);
                pid.reset();
            }
        }

        self.gvars.set_limits(&config.gvars);
        self.config = config;
    }

    /// Run one evaluation of the logic conditions followed by the PIDs
    pub fn update<C: FlightContext>(&mut self, now: Instant, ctx: &C, suspended: bool) {
        let pid_outputs = self.pid_outputs();
        self.logic.update(
            &self.config.conditions,
            now,
            ctx,
            &mut self.gvars,
            &pid_outputs,
            suspended,
        );

        let dt = self
            .last_pid_update
            .and_then(|last| now.checked_duration_since(last))
            .map_or(0.0, |elapsed| elapsed.as_micros() as f32 * 1e-6);
        self.last_pid_update = Some(now);

        let (logic, gvars) = (&self.logic, &self.gvars);
        for (pid, config) in self.pids.iter_mut().zip(&self.config.pids) {
            if !config.enabled {
                pid.reset();
                continue;
            }
            let setpoint = logic.operand_value(&config.setpoint, ctx, gvars, &pid_outputs);
            let measurement = logic.operand_value(&config.measurement, ctx, gvars, &pid_outputs);
            pid.update(setpoint, measurement, dt);
        }
    }

    /// Clear all runtime state, used whenever the vehicle arms or disarms.
    /// Global variables keep their values.
    pub fn reset(&mut self) {
        self.logic.reset();
        for pid in self.pids.iter_mut() {
            pid.reset();
        }
        self.last_pid_update = None;
    }

    /// Output of programming PID `index`, `0` when out of range
    pub fn pid_output(&self, index: usize) -> i32 {
        self.pids.get(index).map_or(0, ProgrammingPid::output)
    }

    pub fn pid_outputs(&self) -> [i32; MAX_PROGRAMMING_PIDS] {
        core::array::from_fn(|i| self.pids[i].output())
    }

    pub fn status(&self) -> LogicStatus {
        LogicStatus {
            values: self.logic.values(),
            gvars: self.gvars.values(),
            pid_outputs: self.pid_outputs(),
            flags: self.logic.global_flags(),
        }
    }

    pub fn take_requests(&mut self) -> heapless::Vec<LogicRequest, MAX_LOGIC_CONDITIONS> {
        self.logic.take_requests()
    }
}
