use crate::{
    consts::{PID_DTERM_LPF_HZ, PID_OUTPUT_LIMIT},
    types::PidGains,
};

use super::Lowpass;

#[allow(unused_imports)]
use num_traits::Float;

/// User gains are entered as integers and scaled down by this factor
const GAIN_SCALE: f32 = 1000.0;

/// A generic PID controller whose setpoint and measurement are operand
/// values. Unlike the rate controllers this works on plain integers and
/// clamps its output to `±PID_OUTPUT_LIMIT`.
#[derive(Debug, Clone)]
pub struct ProgrammingPid {
    // Gains
    kp: f32,
    ki: f32,
    kd: f32,
    kff: f32,

    // States
    integral: f32,
    prev_meas: Option<f32>,
    d_lowpass: Lowpass<f32>,
    output: i32,
}

impl ProgrammingPid {
    pub fn new(gains: PidGains, ts: f32) -> Self {
        let mut pid = Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            kff: 0.0,
            integral: 0.0,
            prev_meas: None,
            d_lowpass: Lowpass::from_cutoff(PID_DTERM_LPF_HZ, ts),
            output: 0,
        };
        pid.set_gains(gains);
        pid
    }

    pub fn set_gains(&mut self, gains: PidGains) {
        self.kp = gains.p as f32 / GAIN_SCALE;
        self.ki = gains.i as f32 / GAIN_SCALE;
        self.kd = gains.d as f32 / GAIN_SCALE;
        self.kff = gains.ff as f32 / GAIN_SCALE;
    }

    /// Clear the integrator and derivative history
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_meas = None;
        self.d_lowpass.reset();
        self.output = 0;
    }

    pub fn output(&self) -> i32 {
        self.output
    }

    /// Run one controller step, `dt` is the time since the previous step in
    /// seconds. With `dt <= 0` only the proportional and feed-forward terms
    /// are applied.
    pub fn update(&mut self, setpoint: i32, measurement: i32, dt: f32) -> i32 {
        let limit = PID_OUTPUT_LIMIT as f32;
        let setpoint = setpoint as f32;
        let measurement = measurement as f32;
        let error = setpoint - measurement;

        let proportional = self.kp * error;
        let feed_forward = self.kff * setpoint;

        // Derivative on measurement, so setpoint steps do not kick the output
        let mut derivative = 0.0;
        if dt > 0.0 {
            self.d_lowpass.set_dt(dt);
            if let Some(prev) = self.prev_meas {
                derivative = self.kd * self.d_lowpass.update(-(measurement - prev) / dt);
            }
            self.prev_meas = Some(measurement);
        }

        let unclamped = proportional + self.integral + derivative + feed_forward;
        let clamped = unclamped.clamp(-limit, limit);

        // Only integrate while not pushing further into saturation
        if dt > 0.0 {
            let winding_up =
                (unclamped >= limit && error > 0.0) || (unclamped <= -limit && error < 0.0);
            if !winding_up {
                self.integral = (self.integral + self.ki * error * dt).clamp(-limit, limit);
            }
        }

        self.output = clamped.round() as i32;
        self.output
    }
}
