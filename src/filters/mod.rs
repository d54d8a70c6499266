pub mod prog_pid;

use num_traits::Float;

/// First order lowpass filter, parameterized by its time constant
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lowpass<T: Float> {
    tau: T,
    dt: T,
    y: T,
    alpha0: T,
    alpha1: T,
}

impl<T: Float> Lowpass<T> {
    pub fn new(tau: T, dt: T) -> Self {
        let alpha0 = dt / (tau + dt);
        let alpha1 = T::one() - alpha0;
        Self {
            tau,
            dt,
            y: T::zero(),
            alpha0,
            alpha1,
        }
    }

    /// Construct from a cutoff frequency in Hz instead of a time constant
    pub fn from_cutoff(cutoff_hz: T, dt: T) -> Self {
        let two_pi = T::from(core::f64::consts::TAU).unwrap_or_else(T::one);
        Self::new(T::one() / (two_pi * cutoff_hz), dt)
    }

    pub fn set_dt(&mut self, dt: T) {
        self.dt = dt;
        self.alpha0 = dt / (self.tau + dt);
        self.alpha1 = T::one() - self.alpha0;
    }

    pub fn update(&mut self, x: T) -> T {
        self.y = self.alpha0 * x + self.alpha1 * self.y;
        self.y
    }

    /// Forget the filter history
    pub fn reset(&mut self) {
        self.y = T::zero();
    }
}
