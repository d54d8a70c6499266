//! The logic condition engine.
//!
//! Every update walks the condition slots in order. A slot is evaluated when
//! it is enabled and its activator (if any) currently evaluates non-zero.
//! Its two operands are resolved through the [`FlightContext`], the global
//! variables, the programming PID outputs or other slots, and the configured
//! [`Operation`] produces the new slot value. Slots configured as latching
//! stop being evaluated once their value becomes non-zero, until
//! [`LogicEngine::reset`]. A latched slot which is deactivated reads `0`
//! from then on.
//!
//! Operations which override pilot inputs set bits in [`GlobalFlags`] and
//! store their payload in the engine, from where consumers query them.
//! Operations which need hardware produce [`LogicRequest`]s instead.

mod operations;
pub mod state;

use embassy_time::Instant;
use heapless::Vec;

use crate::{
    consts::{
        LOITER_RADIUS_MAX, MAX_LOGIC_CONDITIONS, MAX_PROGRAMMING_PIDS, MAX_RC_CHANNELS,
        NUM_FLIGHT_AXES,
    },
    context::FlightContext,
    gvar::GlobalVariables,
    types::{
        operand::table_operand, ConditionFlags, GlobalFlags, LogicCondition, Operand, OperandType,
        Operation,
    },
    utils::func::constrain,
    ConstDefault,
};

pub use state::{AxisOverride, ConditionState, LogicRequest};
use state::VtxRequested;

pub struct LogicEngine {
    states: [ConditionState; MAX_LOGIC_CONDITIONS],
    flags: GlobalFlags,
    /// Payload of the override operations, indexed by operation
    values_by_operation: [i32; Operation::COUNT],
    rc_overrides: [Option<i32>; MAX_RC_CHANNELS],
    axis_overrides: [AxisOverride; NUM_FLIGHT_AXES],
    vtx: VtxRequested,
    requests: Vec<LogicRequest, MAX_LOGIC_CONDITIONS>,
}

impl LogicEngine {
    pub const fn new() -> Self {
        Self {
            states: [ConditionState::DEFAULT; MAX_LOGIC_CONDITIONS],
            flags: GlobalFlags::empty(),
            values_by_operation: [0; Operation::COUNT],
            rc_overrides: [None; MAX_RC_CHANNELS],
            axis_overrides: [AxisOverride {
                angle: None,
                rate: None,
            }; NUM_FLIGHT_AXES],
            vtx: VtxRequested {
                power: None,
                band: None,
                channel: None,
            },
            requests: Vec::new(),
        }
    }

    /// Value of the activator. No activator means always active.
    pub fn value(&self, activator: Option<u8>) -> i32 {
        match activator {
            None => 1,
            Some(index) => self.condition_value(index as i32),
        }
    }

    /// Current value of the slot at `index`, `0` when out of range
    pub fn condition_value(&self, index: i32) -> i32 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.states.get(i))
            .map_or(0, |state| state.value)
    }

    pub fn values(&self) -> [i32; MAX_LOGIC_CONDITIONS] {
        core::array::from_fn(|i| self.states[i].value)
    }

    pub fn state(&self, index: usize) -> Option<&ConditionState> {
        self.states.get(index)
    }

    /// Resolve an operand to its current value. Anything that does not
    /// refer to a valid source reads as `0`.
    pub fn operand_value<C: FlightContext>(
        &self,
        operand: &Operand,
        ctx: &C,
        gvars: &GlobalVariables,
        pid_outputs: &[i32; MAX_PROGRAMMING_PIDS],
    ) -> i32 {
        let value = operand.value;
        match operand.kind {
            OperandType::Value => value,
            OperandType::RcChannel => usize::try_from(value)
                .ok()
                .filter(|channel| (1..=MAX_RC_CHANNELS).contains(channel))
                .and_then(|channel| ctx.rc_channel(channel - 1))
                .unwrap_or(0),
            OperandType::Flight => {
                table_operand(value).map_or(0, |operand| ctx.flight_value(operand))
            }
            OperandType::FlightMode => {
                table_operand(value).map_or(0, |mode| ctx.flight_mode(mode) as i32)
            }
            OperandType::LogicCondition => self.condition_value(value),
            OperandType::GlobalVariable => gvars.get(value),
            OperandType::Pid => usize::try_from(value)
                .ok()
                .and_then(|i| pid_outputs.get(i).copied())
                .unwrap_or(0),
            OperandType::Waypoints => {
                table_operand(value).map_or(0, |operand| ctx.waypoint_value(operand))
            }
        }
    }

    /// Evaluate all slots once. When `suspended` (e.g. while the CLI is
    /// open) every slot reads `0`.
    pub fn update<C: FlightContext>(
        &mut self,
        conditions: &[LogicCondition; MAX_LOGIC_CONDITIONS],
        now: Instant,
        ctx: &C,
        gvars: &mut GlobalVariables,
        pid_outputs: &[i32; MAX_PROGRAMMING_PIDS],
        suspended: bool,
    ) {
        // Overrides only persist while their conditions keep running
        self.flags = GlobalFlags::empty();
        self.rc_overrides = [None; MAX_RC_CHANNELS];
        self.axis_overrides = [AxisOverride::default(); NUM_FLIGHT_AXES];
        self.requests.clear();

        for (index, condition) in conditions.iter().enumerate() {
            self.process(index, condition, now, ctx, gvars, pid_outputs, suspended);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn process<C: FlightContext>(
        &mut self,
        index: usize,
        condition: &LogicCondition,
        now: Instant,
        ctx: &C,
        gvars: &mut GlobalVariables,
        pid_outputs: &[i32; MAX_PROGRAMMING_PIDS],
        suspended: bool,
    ) {
        let active = condition.enabled && !suspended && self.value(condition.activator) != 0;
        if !active {
            self.states[index].value = 0;
            return;
        }

        if self.states[index].is_latched() {
            return;
        }

        let a = self.operand_value(&condition.operand_a, ctx, gvars, pid_outputs);
        let b = self.operand_value(&condition.operand_b, ctx, gvars, pid_outputs);
        let value = self.compute(index, condition.operation, a, b, now, ctx, gvars);

        let state = &mut self.states[index];
        state.value = value;

        if condition.is_latching() && value != 0 {
            state.flags.insert(ConditionFlags::LATCH);
            debug!("logic: condition {} latched at {}", index, value);
        }
    }

    /// Clear the state of every slot, including latches and timers
    pub fn reset(&mut self) {
        self.states = [ConditionState::DEFAULT; MAX_LOGIC_CONDITIONS];
    }

    /// Clear the state of a single slot, used when its configuration changes
    pub fn reset_slot(&mut self, index: usize) {
        if let Some(state) = self.states.get_mut(index) {
            *state = ConditionState::DEFAULT;
        }
    }

    /// Take the hardware requests produced by the latest update
    pub fn take_requests(&mut self) -> Vec<LogicRequest, MAX_LOGIC_CONDITIONS> {
        core::mem::take(&mut self.requests)
    }

    pub fn global_flags(&self) -> GlobalFlags {
        self.flags
    }

    pub fn is_arming_safety_overridden(&self) -> bool {
        self.flags.contains(GlobalFlags::OVERRIDE_ARMING_SAFETY)
    }

    pub fn is_gps_fix_disabled(&self) -> bool {
        self.flags.contains(GlobalFlags::DISABLE_GPS_FIX)
    }

    /// Throttle scale in `[0, 1]` when overridden, otherwise `default`
    pub fn throttle_scale(&self, default: f32) -> f32 {
        if self.flags.contains(GlobalFlags::OVERRIDE_THROTTLE_SCALE) {
            let percent = self.values_by_operation[Operation::OverrideThrottleScale.index()];
            (percent as f32 / 100.0).clamp(0.0, 1.0)
        } else {
            default
        }
    }

    pub fn throttle_override(&self) -> Option<i32> {
        self.override_value(GlobalFlags::OVERRIDE_THROTTLE, Operation::OverrideThrottle)
    }

    pub fn osd_layout(&self) -> Option<i32> {
        self.override_value(GlobalFlags::OVERRIDE_OSD_LAYOUT, Operation::SetOsdLayout)
    }

    pub fn gimbal_sensitivity(&self) -> Option<i32> {
        self.override_value(
            GlobalFlags::OVERRIDE_GIMBAL_SENSITIVITY,
            Operation::SetGimbalSensitivity,
        )
    }

    /// Overridden value for the 0-based RC channel, otherwise `original`
    pub fn rc_channel_override(&self, index: usize, original: i32) -> i32 {
        if !self.flags.contains(GlobalFlags::OVERRIDE_RC_CHANNEL) {
            return original;
        }
        self.rc_overrides
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(original)
    }

    /// The overridden loiter radius is never smaller than the configured
    /// one, and is ignored while an autonomous mode (failsafe, RTH, mission,
    /// emergency landing) is in control.
    pub fn loiter_radius(&self, radius: i32, autonomous: bool) -> i32 {
        if self.flags.contains(GlobalFlags::OVERRIDE_LOITER_RADIUS) && !autonomous {
            let requested = self.values_by_operation[Operation::LoiterOverride.index()];
            constrain(requested, radius, LOITER_RADIUS_MAX)
        } else {
            radius
        }
    }

    /// Target angle in centidegrees for `axis`, otherwise `angle`
    pub fn flight_axis_angle_override(&self, axis: usize, angle: i32) -> i32 {
        self.axis_override(axis).and_then(|a| a.angle).unwrap_or(angle)
    }

    /// Target rate in deg/s for `axis`, otherwise `rate`
    pub fn flight_axis_rate_override(&self, axis: usize, rate: i32) -> i32 {
        self.axis_override(axis).and_then(|a| a.rate).unwrap_or(rate)
    }

    pub fn is_flight_axis_angle_override_active(&self, axis: usize) -> bool {
        self.axis_override(axis).is_some_and(|a| a.angle.is_some())
    }

    pub fn is_flight_axis_rate_override_active(&self, axis: usize) -> bool {
        self.axis_override(axis).is_some_and(|a| a.rate.is_some())
    }

    fn axis_override(&self, axis: usize) -> Option<&AxisOverride> {
        if self.flags.contains(GlobalFlags::OVERRIDE_FLIGHT_AXIS) {
            self.axis_overrides.get(axis)
        } else {
            None
        }
    }

    fn override_value(&self, flag: GlobalFlags, operation: Operation) -> Option<i32> {
        self.flags
            .contains(flag)
            .then(|| self.values_by_operation[operation.index()])
    }

    fn request(&mut self, request: LogicRequest) {
        if self.requests.push(request).is_err() {
            warn!("logic: request queue full, dropping {:?}", request);
        }
    }
}

impl Default for LogicEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
