use embassy_time::Instant;

use super::*;
use crate::{
    context::FlightSnapshot,
    types::{FlightModeOperand, FlightOperand, WaypointOperand},
};

struct Harness {
    engine: LogicEngine,
    conditions: [LogicCondition; MAX_LOGIC_CONDITIONS],
    ctx: FlightSnapshot,
    gvars: GlobalVariables,
    pid_outputs: [i32; MAX_PROGRAMMING_PIDS],
}

impl Harness {
    fn new() -> Self {
        Self {
            engine: LogicEngine::new(),
            conditions: [LogicCondition::const_default(); MAX_LOGIC_CONDITIONS],
            ctx: FlightSnapshot::default(),
            gvars: GlobalVariables::new(),
            pid_outputs: [0; MAX_PROGRAMMING_PIDS],
        }
    }

    fn with(mut self, index: usize, condition: LogicCondition) -> Self {
        self.conditions[index] = condition;
        self
    }

    fn run_at(&mut self, ms: u64) -> [i32; MAX_LOGIC_CONDITIONS] {
        self.run(ms, false)
    }

    fn run(&mut self, ms: u64, suspended: bool) -> [i32; MAX_LOGIC_CONDITIONS] {
        self.engine.update(
            &self.conditions,
            Instant::from_millis(ms),
            &self.ctx,
            &mut self.gvars,
            &self.pid_outputs,
            suspended,
        );
        self.engine.values()
    }

    fn set_a(&mut self, index: usize, value: i32) {
        self.conditions[index].operand_a = Operand::value(value);
    }
}

fn op(operation: Operation, a: i32, b: i32) -> LogicCondition {
    LogicCondition::new(operation, Operand::value(a), Operand::value(b))
}

fn eval(operation: Operation, a: i32, b: i32) -> i32 {
    Harness::new().with(0, op(operation, a, b)).run_at(0)[0]
}

#[test]
fn comparisons_and_logic() {
    assert_eq!(eval(Operation::True, 0, 0), 1);
    assert_eq!(eval(Operation::Equal, 3, 3), 1);
    assert_eq!(eval(Operation::Equal, 3, 4), 0);
    assert_eq!(eval(Operation::GreaterThan, 5, 4), 1);
    assert_eq!(eval(Operation::LowerThan, 5, 4), 0);
    assert_eq!(eval(Operation::And, 2, 0), 0);
    assert_eq!(eval(Operation::Or, 2, 0), 1);
    assert_eq!(eval(Operation::Xor, 1, 0), 1);
    assert_eq!(eval(Operation::Xor, 1, 1), 0);
    assert_eq!(eval(Operation::Nand, 1, 1), 0);
    assert_eq!(eval(Operation::Nor, 0, 0), 1);
    assert_eq!(eval(Operation::Not, 0, 0), 1);
    assert_eq!(eval(Operation::Not, 7, 0), 0);
}

#[test]
fn rc_thresholds() {
    assert_eq!(eval(Operation::Low, 1000, 0), 1);
    assert_eq!(eval(Operation::Low, 1333, 0), 0);
    assert_eq!(eval(Operation::Mid, 1333, 0), 1);
    assert_eq!(eval(Operation::Mid, 1666, 0), 1);
    assert_eq!(eval(Operation::High, 1666, 0), 0);
    assert_eq!(eval(Operation::High, 2000, 0), 1);
}

#[test]
fn approx_equal_uses_relative_tolerance() {
    assert_eq!(eval(Operation::ApproxEqual, 10_000, 10_010), 1);
    assert_eq!(eval(Operation::ApproxEqual, 10_000, 10_011), 0);
    assert_eq!(eval(Operation::ApproxEqual, -10_000, -9_990), 1);
    assert_eq!(eval(Operation::ApproxEqual, 500, 500), 1);
    assert_eq!(eval(Operation::ApproxEqual, 500, 501), 0);
}

#[test]
fn arithmetic() {
    assert_eq!(eval(Operation::Add, i32::MAX, 1), i32::MAX);
    assert_eq!(eval(Operation::Sub, i32::MIN, 1), i32::MIN);
    assert_eq!(eval(Operation::Mul, 1 << 20, 1 << 20), i32::MAX);
    assert_eq!(eval(Operation::Div, 7, 2), 3);
    assert_eq!(eval(Operation::Div, 7, 0), 7);
    assert_eq!(eval(Operation::Div, i32::MIN, -1), i32::MAX);
    assert_eq!(eval(Operation::Modulus, 7, 3), 1);
    assert_eq!(eval(Operation::Modulus, 7, 0), 7);
    assert_eq!(eval(Operation::Modulus, i32::MIN, -1), 0);
    assert_eq!(eval(Operation::Min, -3, 2), -3);
    assert_eq!(eval(Operation::Max, -3, 2), 2);
}

#[test]
fn trigonometry_and_mapping() {
    assert_eq!(eval(Operation::Sin, 30, 0), 250);
    assert_eq!(eval(Operation::Cos, 60, 1000), 500);
    assert_eq!(eval(Operation::Tan, 45, 100), 100);
    assert_eq!(eval(Operation::MapInput, 50, 200), 250);
    assert_eq!(eval(Operation::MapInput, 500, 200), 1000);
    assert_eq!(eval(Operation::MapInput, 50, 0), 0);
    assert_eq!(eval(Operation::MapOutput, 500, 200), 100);
    assert_eq!(eval(Operation::MapOutput, -5, 200), 0);
}

#[test]
fn operands_resolve_through_context() {
    let mut h = Harness::new()
        .with(
            0,
            LogicCondition::new(
                Operation::High,
                Operand::rc_channel(3),
                Operand::value(0),
            ),
        )
        .with(
            1,
            LogicCondition::new(
                Operation::Equal,
                Operand::flight(FlightOperand::IsArmed),
                Operand::flight_mode(FlightModeOperand::Angle),
            ),
        )
        .with(
            2,
            LogicCondition::new(Operation::Add, Operand::pid(1), Operand::gvar(2)),
        )
        .with(
            3,
            LogicCondition::new(Operation::Add, Operand::rc_channel(0), Operand::pid(9)),
        )
        .with(
            4,
            LogicCondition::new(
                Operation::Add,
                Operand::condition(2),
                Operand::waypoint(WaypointOperand::WaypointIndex),
            ),
        );

    h.ctx
        .set_rc_channel(2, 1900)
        .set_flight(FlightOperand::IsArmed, 1)
        .set_mode(FlightModeOperand::Angle, true)
        .set_waypoint(WaypointOperand::WaypointIndex, 3);
    h.pid_outputs[1] = 40;
    h.gvars.set(2, 2);

    let values = h.run_at(0);
    assert_eq!(values[0], 1);
    assert_eq!(values[1], 1);
    assert_eq!(values[2], 42);
    // Channel 0 and PID 9 do not exist
    assert_eq!(values[3], 0);
    // Slot 2 was already evaluated this tick
    assert_eq!(values[4], 45);
}

#[test]
fn unknown_table_operands_read_zero() {
    let h = Harness::new();
    let operand = Operand::new(OperandType::Flight, 10_000);
    assert_eq!(h.engine.operand_value(&operand, &h.ctx, &h.gvars, &h.pid_outputs), 0);
    let operand = Operand::new(OperandType::LogicCondition, -1);
    assert_eq!(h.engine.operand_value(&operand, &h.ctx, &h.gvars, &h.pid_outputs), 0);
}

#[test]
fn disabled_slot_reads_zero() {
    let mut condition = op(Operation::True, 0, 0);
    condition.enabled = false;
    assert_eq!(Harness::new().with(0, condition).run_at(0)[0], 0);
    assert_eq!(LogicEngine::new().value(None), 1);
    assert_eq!(LogicEngine::new().value(Some(200)), 0);
}

#[test]
fn activator_chains_in_slot_order() {
    let mut h = Harness::new()
        .with(0, op(Operation::GreaterThan, 5, 1))
        .with(1, op(Operation::True, 0, 0).activated_by(0))
        // Activated by a later slot, so sees its value from the previous update
        .with(2, op(Operation::True, 0, 0).activated_by(3))
        .with(3, op(Operation::True, 0, 0));

    let values = h.run_at(0);
    assert_eq!(&values[..4], &[1, 1, 0, 1]);
    let values = h.run_at(100);
    assert_eq!(&values[..4], &[1, 1, 1, 1]);

    h.set_a(0, 0);
    let values = h.run_at(200);
    assert_eq!(&values[..2], &[0, 0]);
}

#[test]
fn suspended_engine_outputs_zero() {
    let mut h = Harness::new()
        .with(0, op(Operation::True, 0, 0))
        .with(1, op(Operation::OverrideArmingSafety, 0, 0));
    h.run_at(0);
    assert!(h.engine.is_arming_safety_overridden());

    let values = h.run(100, true);
    assert_eq!(values, [0; MAX_LOGIC_CONDITIONS]);
    assert!(h.engine.global_flags().is_empty());
}

#[test]
fn sticky_sets_and_resets() {
    let mut h = Harness::new().with(0, op(Operation::Sticky, 0, 0));
    assert_eq!(h.run_at(0)[0], 0);

    h.set_a(0, 1);
    assert_eq!(h.run_at(100)[0], 1);
    h.set_a(0, 0);
    assert_eq!(h.run_at(200)[0], 1);

    h.conditions[0].operand_b = Operand::value(1);
    assert_eq!(h.run_at(300)[0], 0);
}

#[test]
fn latch_freezes_until_reset() {
    let mut h = Harness::new().with(0, op(Operation::GreaterThan, 5, 1).latching());
    assert_eq!(h.run_at(0)[0], 1);
    assert!(h.engine.state(0).is_some_and(ConditionState::is_latched));

    h.set_a(0, 0);
    assert_eq!(h.run_at(100)[0], 1);

    h.engine.reset();
    assert_eq!(h.run_at(200)[0], 0);
}

#[test]
fn deactivated_latch_reads_zero_until_reset() {
    let mut h = Harness::new()
        .with(0, op(Operation::True, 0, 0))
        .with(1, op(Operation::Add, 20, 22).activated_by(0).latching());
    assert_eq!(h.run_at(0)[1], 42);

    h.conditions[0].enabled = false;
    assert_eq!(h.run_at(100)[1], 0);

    // Still latched, so it is not evaluated again
    h.conditions[0].enabled = true;
    assert_eq!(h.run_at(200)[1], 0);
    assert!(h.engine.state(1).is_some_and(ConditionState::is_latched));

    h.engine.reset();
    assert_eq!(h.run_at(300)[1], 42);
}

#[test]
fn edge_pulses_once_per_rising_edge() {
    let mut h = Harness::new().with(0, op(Operation::Edge, 1, 0));
    assert_eq!(h.run_at(0)[0], 1);
    assert_eq!(h.run_at(100)[0], 0);
    assert_eq!(h.run_at(200)[0], 0);

    h.set_a(0, 0);
    assert_eq!(h.run_at(300)[0], 0);
    h.set_a(0, 1);
    assert_eq!(h.run_at(400)[0], 1);
}

#[test]
fn edge_holds_for_duration() {
    let mut h = Harness::new().with(0, op(Operation::Edge, 1, 1000));
    assert_eq!(h.run_at(0)[0], 1);
    h.set_a(0, 0);
    assert_eq!(h.run_at(500)[0], 1);
    assert_eq!(h.run_at(1000)[0], 1);
    assert_eq!(h.run_at(1100)[0], 0);
}

#[test]
fn delay_requires_held_input() {
    let mut h = Harness::new().with(0, op(Operation::Delay, 1, 500));
    assert_eq!(h.run_at(0)[0], 0);
    assert_eq!(h.run_at(300)[0], 0);
    assert_eq!(h.run_at(600)[0], 1);
    assert_eq!(h.run_at(700)[0], 1);

    h.set_a(0, 0);
    assert_eq!(h.run_at(800)[0], 0);
    h.set_a(0, 1);
    assert_eq!(h.run_at(900)[0], 0);
    assert_eq!(h.run_at(1500)[0], 1);
}

#[test]
fn timer_alternates() {
    let mut h = Harness::new().with(0, op(Operation::Timer, 200, 300));
    assert_eq!(h.run_at(0)[0], 1);
    assert_eq!(h.run_at(100)[0], 1);
    assert_eq!(h.run_at(250)[0], 0);
    assert_eq!(h.run_at(500)[0], 0);
    assert_eq!(h.run_at(600)[0], 1);
    assert_eq!(h.run_at(900)[0], 0);
}

#[test]
fn delta_detects_change() {
    let mut h = Harness::new().with(0, op(Operation::Delta, 100, 50));
    // First evaluation compares against zero
    assert_eq!(h.run_at(0)[0], 1);
    assert_eq!(h.run_at(100)[0], 0);
    h.set_a(0, 130);
    assert_eq!(h.run_at(200)[0], 0);
    h.set_a(0, 60);
    assert_eq!(h.run_at(300)[0], 1);
}

#[test]
fn reset_slot_clears_temporal_state() {
    let mut h = Harness::new().with(0, op(Operation::Delay, 1, 500));
    h.run_at(0);
    assert_eq!(h.run_at(600)[0], 1);

    h.engine.reset_slot(0);
    assert_eq!(h.run_at(700)[0], 0);
}

#[test]
fn gvar_operations() {
    let mut h = Harness::new()
        .with(0, op(Operation::GvarSet, 1, 10))
        .with(1, op(Operation::GvarInc, 1, 5))
        .with(2, op(Operation::GvarDec, 3, 2))
        .with(3, op(Operation::GvarSet, 99, 10));

    let values = h.run_at(0);
    assert_eq!(&values[..4], &[10, 15, -2, 10]);
    assert_eq!(h.gvars.get(1), 15);
    assert_eq!(h.gvars.get(3), -2);
}

#[test]
fn overrides_are_queryable() {
    let mut h = Harness::new()
        .with(0, op(Operation::OverrideThrottleScale, 50, 0))
        .with(1, op(Operation::OverrideThrottle, 1500, 0))
        .with(2, op(Operation::RcChannelOverride, 5, 1800))
        .with(3, op(Operation::FlightAxisAngleOverride, 1, 15))
        .with(4, op(Operation::FlightAxisRateOverride, 2, 90))
        .with(5, op(Operation::SetOsdLayout, 2, 0))
        .with(6, op(Operation::LoiterOverride, 5000, 0))
        .with(7, op(Operation::SetGimbalSensitivity, 40, 0))
        .with(8, op(Operation::DisableGpsFix, 1, 0))
        .with(9, op(Operation::SwapRollYaw, 0, 0));

    let values = h.run_at(0);
    assert_eq!(&values[..10], &[1, 1500, 1, 1, 1, 2, 5000, 1, 1, 1]);

    let e = &h.engine;
    assert_eq!(e.throttle_scale(1.0), 0.5);
    assert_eq!(e.throttle_override(), Some(1500));
    assert_eq!(e.rc_channel_override(4, 1000), 1800);
    assert_eq!(e.rc_channel_override(5, 1000), 1000);
    assert_eq!(e.flight_axis_angle_override(1, 0), 1500);
    assert!(!e.is_flight_axis_angle_override_active(0));
    assert_eq!(e.flight_axis_rate_override(2, 0), 90);
    assert!(e.is_flight_axis_rate_override_active(2));
    assert_eq!(e.osd_layout(), Some(2));
    assert_eq!(e.loiter_radius(3000, false), 5000);
    assert_eq!(e.loiter_radius(8000, false), 8000);
    assert_eq!(e.loiter_radius(3000, true), 3000);
    assert_eq!(e.gimbal_sensitivity(), Some(15));
    assert!(e.is_gps_fix_disabled());
    assert!(e.global_flags().contains(GlobalFlags::OVERRIDE_SWAP_ROLL_YAW));
    assert!(!e.is_arming_safety_overridden());
}

#[test]
fn overrides_end_with_their_condition() {
    let mut h = Harness::new().with(0, op(Operation::OverrideThrottle, 1200, 0));
    h.run_at(0);
    assert_eq!(h.engine.throttle_override(), Some(1200));

    h.conditions[0].enabled = false;
    h.run_at(100);
    assert_eq!(h.engine.throttle_override(), None);
    assert_eq!(h.engine.throttle_scale(0.8), 0.8);
}

#[test]
fn invalid_axis_is_ignored() {
    let mut h = Harness::new().with(0, op(Operation::FlightAxisAngleOverride, 3, 10));
    assert_eq!(h.run_at(0)[0], 0);
    assert!(!h.engine.global_flags().contains(GlobalFlags::OVERRIDE_FLIGHT_AXIS));
}

#[test]
fn vtx_requests_only_on_change() {
    let mut h = Harness::new()
        .with(0, op(Operation::SetVtxPowerLevel, 9, 0))
        .with(1, op(Operation::SetVtxBand, 3, 0))
        .with(2, op(Operation::SetVtxChannel, 0, 0));

    assert_eq!(&h.run_at(0)[..3], &[4, 3, 1]);
    assert_eq!(
        h.engine.take_requests().as_slice(),
        &[
            LogicRequest::SetVtxPowerLevel(4),
            LogicRequest::SetVtxBand(3),
            LogicRequest::SetVtxChannel(1),
        ]
    );

    h.run_at(100);
    assert!(h.engine.take_requests().is_empty());

    h.set_a(1, 4);
    h.run_at(200);
    assert_eq!(h.engine.take_requests().as_slice(), &[LogicRequest::SetVtxBand(4)]);
}

#[test]
fn hardware_requests() {
    let mut h = Harness::new()
        .with(0, op(Operation::PortSet, 2, 1))
        .with(1, op(Operation::LedPinPwm, 30, 0))
        .with(2, op(Operation::LedPinPwm, 130, 0))
        .with(3, op(Operation::SetHeadingTarget, -90, 0))
        .with(4, op(Operation::ResetMagCalibration, 0, 0))
        .with(5, op(Operation::SetProfile, 2, 0));
    h.ctx.set_flight(FlightOperand::ActiveProfile, 1);

    let values = h.run_at(0);
    assert_eq!(&values[..6], &[1, 30, 130, 270, 1, 1]);
    assert_eq!(
        h.engine.take_requests().as_slice(),
        &[
            LogicRequest::PortSet { pin: 2, level: 1 },
            LogicRequest::LedPinPwm(Some(30)),
            LogicRequest::LedPinPwm(None),
            LogicRequest::SetHeadingTarget(270),
            LogicRequest::ResetMagCalibration,
            LogicRequest::SetProfile(1),
        ]
    );
}

#[test]
fn set_profile_ignores_current_and_invalid() {
    let mut h = Harness::new()
        .with(0, op(Operation::SetProfile, 1, 0))
        .with(1, op(Operation::SetProfile, 4, 0));
    h.ctx.set_flight(FlightOperand::ActiveProfile, 1);

    assert_eq!(&h.run_at(0)[..2], &[0, 0]);
    assert!(h.engine.take_requests().is_empty());
}

#[test]
fn set_profile_saturates_active_profile() {
    let mut h = Harness::new().with(0, op(Operation::SetProfile, 2, 0));
    h.ctx.set_flight(FlightOperand::ActiveProfile, i32::MIN);

    assert_eq!(h.run_at(0)[0], 1);
    assert_eq!(h.engine.take_requests().as_slice(), &[LogicRequest::SetProfile(1)]);
}
