use embassy_time::{Duration, Instant};

#[allow(unused_imports)]
use num_traits::Float;

use crate::{
    consts::{
        EDGE_MIN_PULSE_MS, LOITER_RADIUS_MAX, MAX_PROFILES, MAX_RC_CHANNELS, NUM_FLIGHT_AXES,
        RC_HIGH_THRESHOLD, RC_LOW_THRESHOLD, TRIG_DEFAULT_SCALE,
    },
    context::FlightContext,
    gvar::GlobalVariables,
    types::{ConditionFlags, FlightOperand, GlobalFlags, Operation},
    utils::func::{constrain, saturate, scale_range, wrap_degrees},
};

use super::{LogicEngine, LogicRequest};

/// Deadline `ms` milliseconds after `now`. Negative durations count as zero.
fn deadline(now: Instant, ms: i32) -> Instant {
    let ms = u64::try_from(ms).unwrap_or(0);
    now.checked_add(Duration::from_millis(ms))
        .unwrap_or(Instant::MAX)
}

fn trig(operation: Operation, degrees: i32, scale: i32) -> i32 {
    let scale = if scale == 0 { TRIG_DEFAULT_SCALE } else { scale };
    let radians = (degrees as f32).to_radians();
    let ratio = match operation {
        Operation::Sin => radians.sin(),
        Operation::Cos => radians.cos(),
        _ => radians.tan(),
    };
    // Float to int casts saturate, which also covers tan near 90 degrees
    (ratio * scale as f32).round() as i32
}

impl LogicEngine {
    /// Compute the new value of slot `index` from its resolved operands
    #[allow(clippy::too_many_arguments)]
    pub(super) fn compute<C: FlightContext>(
        &mut self,
        index: usize,
        operation: Operation,
        a: i32,
        b: i32,
        now: Instant,
        ctx: &C,
        gvars: &mut GlobalVariables,
    ) -> i32 {
        use Operation as Op;

        match operation {
            Op::True => 1,
            Op::Equal => (a == b) as i32,
            Op::ApproxEqual => {
                let tolerance = (a as i64 / 1000).abs();
                let b = b as i64;
                (b >= a as i64 - tolerance && b <= a as i64 + tolerance) as i32
            }
            Op::GreaterThan => (a > b) as i32,
            Op::LowerThan => (a < b) as i32,
            Op::Low => (a < RC_LOW_THRESHOLD) as i32,
            Op::Mid => (RC_LOW_THRESHOLD..=RC_HIGH_THRESHOLD).contains(&a) as i32,
            Op::High => (a > RC_HIGH_THRESHOLD) as i32,
            Op::And => (a != 0 && b != 0) as i32,
            Op::Or => (a != 0 || b != 0) as i32,
            Op::Xor => (a != b) as i32,
            Op::Nand => !(a != 0 && b != 0) as i32,
            Op::Nor => !(a != 0 || b != 0) as i32,
            Op::Not => (a == 0) as i32,
            Op::Sticky => {
                if a != 0 {
                    1
                } else if b != 0 {
                    0
                } else {
                    self.states[index].value
                }
            }

            Op::Edge => self.edge(index, a, b, now),
            Op::Delay => self.delay(index, a, b, now),
            Op::Timer => self.timer(index, a, b, now),
            Op::Delta => {
                let state = &mut self.states[index];
                let difference = (state.last_value as i64 - a as i64).abs();
                state.last_value = a;
                (difference >= b as i64) as i32
            }

            Op::Add => a.saturating_add(b),
            Op::Sub => a.saturating_sub(b),
            Op::Mul => a.saturating_mul(b),
            Op::Div if b == 0 => a,
            Op::Div => saturate(a as i64 / b as i64),
            Op::Modulus if b == 0 => a,
            Op::Modulus => (a as i64 % b as i64) as i32,
            Op::Min => a.min(b),
            Op::Max => a.max(b),
            Op::Sin | Op::Cos | Op::Tan => trig(operation, a, b),
            Op::MapInput => scale_range(constrain(a, 0, b), 0, b, 0, 1000),
            Op::MapOutput => scale_range(constrain(a, 0, 1000), 0, 1000, 0, b),

            Op::GvarSet => {
                gvars.set(a, b);
                b
            }
            Op::GvarInc => {
                gvars.set(a, gvars.get(a).saturating_add(b));
                gvars.get(a)
            }
            Op::GvarDec => {
                gvars.set(a, gvars.get(a).saturating_sub(b));
                gvars.get(a)
            }

            Op::OverrideArmingSafety => self.set_flag(GlobalFlags::OVERRIDE_ARMING_SAFETY, 1),
            Op::OverrideThrottleScale => {
                self.store(operation, a);
                self.set_flag(GlobalFlags::OVERRIDE_THROTTLE_SCALE, 1)
            }
            Op::SwapRollYaw => self.set_flag(GlobalFlags::OVERRIDE_SWAP_ROLL_YAW, 1),
            Op::InvertRoll => self.set_flag(GlobalFlags::OVERRIDE_INVERT_ROLL, 1),
            Op::InvertPitch => self.set_flag(GlobalFlags::OVERRIDE_INVERT_PITCH, 1),
            Op::InvertYaw => self.set_flag(GlobalFlags::OVERRIDE_INVERT_YAW, 1),
            Op::OverrideThrottle => {
                self.store(operation, a);
                self.set_flag(GlobalFlags::OVERRIDE_THROTTLE, a)
            }
            Op::SetOsdLayout => {
                self.store(operation, a);
                self.set_flag(GlobalFlags::OVERRIDE_OSD_LAYOUT, a)
            }
            Op::LoiterOverride => {
                let radius = constrain(a, 0, LOITER_RADIUS_MAX);
                self.store(operation, radius);
                self.set_flag(GlobalFlags::OVERRIDE_LOITER_RADIUS, radius)
            }
            Op::SetGimbalSensitivity => {
                self.store(operation, constrain(a, -16, 15));
                self.set_flag(GlobalFlags::OVERRIDE_GIMBAL_SENSITIVITY, 1)
            }
            Op::RcChannelOverride => {
                let channel = constrain(a.saturating_sub(1), 0, MAX_RC_CHANNELS as i32 - 1);
                self.rc_overrides[channel as usize] = Some(b);
                self.set_flag(GlobalFlags::OVERRIDE_RC_CHANNEL, 1)
            }
            Op::FlightAxisAngleOverride | Op::FlightAxisRateOverride => {
                let Some(axis) = usize::try_from(a).ok().filter(|&axis| axis < NUM_FLIGHT_AXES)
                else {
                    return 0;
                };
                let target = &mut self.axis_overrides[axis];
                if operation == Op::FlightAxisAngleOverride {
                    target.angle = Some(b.saturating_mul(100));
                } else {
                    target.rate = Some(b);
                }
                self.set_flag(GlobalFlags::OVERRIDE_FLIGHT_AXIS, 1)
            }
            Op::DisableGpsFix => {
                self.flags.set(GlobalFlags::DISABLE_GPS_FIX, a > 0);
                1
            }

            Op::SetVtxPowerLevel => {
                let level = constrain(a, 0, 4) as u8;
                if self.vtx.power.replace(level) != Some(level) {
                    self.request(LogicRequest::SetVtxPowerLevel(level));
                }
                level as i32
            }
            Op::SetVtxBand => {
                let band = constrain(a, 1, 5) as u8;
                if self.vtx.band.replace(band) != Some(band) {
                    self.request(LogicRequest::SetVtxBand(band));
                }
                band as i32
            }
            Op::SetVtxChannel => {
                let channel = constrain(a, 1, 8) as u8;
                if self.vtx.channel.replace(channel) != Some(channel) {
                    self.request(LogicRequest::SetVtxChannel(channel));
                }
                channel as i32
            }
            Op::PortSet => {
                self.request(LogicRequest::PortSet { pin: a, level: b });
                b
            }
            Op::LedPinPwm => {
                let duty = u8::try_from(a).ok().filter(|&duty| duty <= 100);
                self.request(LogicRequest::LedPinPwm(duty));
                a
            }
            Op::SetProfile => {
                let target = a.saturating_sub(1);
                let current = ctx.flight_value(FlightOperand::ActiveProfile).saturating_sub(1);
                if target != current && (0..MAX_PROFILES).contains(&target) {
                    self.request(LogicRequest::SetProfile(target as u8));
                    1
                } else {
                    0
                }
            }
            Op::SetHeadingTarget => {
                let heading = wrap_degrees(a);
                self.request(LogicRequest::SetHeadingTarget(heading));
                heading
            }
            Op::ResetMagCalibration => {
                self.request(LogicRequest::ResetMagCalibration);
                1
            }
        }
    }

    fn set_flag(&mut self, flag: GlobalFlags, value: i32) -> i32 {
        self.flags.insert(flag);
        value
    }

    fn store(&mut self, operation: Operation, value: i32) {
        self.values_by_operation[operation.index()] = value;
    }

    /// True on the rising edge of `a`, held for `b` milliseconds. Pulses
    /// shorter than the minimum last a single evaluation.
    fn edge(&mut self, index: usize, a: i32, b: i32, now: Instant) -> i32 {
        let state = &mut self.states[index];

        if a != 0
            && state.timeout.is_none()
            && !state.flags.contains(ConditionFlags::TIMEOUT_SATISFIED)
        {
            state.timeout = Some(if b < EDGE_MIN_PULSE_MS {
                now
            } else {
                deadline(now, b)
            });
            state.flags.insert(ConditionFlags::TIMEOUT_SATISFIED);
            return 1;
        } else if let Some(timeout) = state.timeout {
            if timeout < now {
                state.timeout = None;
            } else {
                return 1;
            }
        }

        if a == 0 {
            state.flags.remove(ConditionFlags::TIMEOUT_SATISFIED);
        }
        0
    }

    /// True once `a` has been held for more than `b` milliseconds
    fn delay(&mut self, index: usize, a: i32, b: i32, now: Instant) -> i32 {
        let state = &mut self.states[index];

        if a == 0 {
            state.timeout = None;
            state.flags.remove(ConditionFlags::TIMEOUT_SATISFIED);
            return 0;
        }

        match state.timeout {
            None => state.timeout = Some(deadline(now, b)),
            Some(_) if state.flags.contains(ConditionFlags::TIMEOUT_SATISFIED) => return 1,
            Some(timeout) if now > timeout => {
                state.flags.insert(ConditionFlags::TIMEOUT_SATISFIED);
                return 1;
            }
            Some(_) => {}
        }
        0
    }

    /// Alternates between true for `a` and false for `b` milliseconds
    fn timer(&mut self, index: usize, a: i32, b: i32, now: Instant) -> i32 {
        let state = &mut self.states[index];

        match state.timeout {
            Some(timeout) if now <= timeout => state.value,
            Some(_) if state.value != 0 => {
                state.timeout = Some(deadline(now, b));
                0
            }
            _ => {
                state.timeout = Some(deadline(now, a));
                1
            }
        }
    }
}
