#![no_std]

//! Programming framework for a flight controller.
//!
//! A fixed table of user-configured logic conditions is evaluated at a low,
//! fixed rate against flight telemetry, RC channels, global variables and
//! programming PID outputs. The results drive overrides (throttle, RC
//! channels, flight axes, ...) and requests for hardware side effects.

// Export the logging macros for either defmt or log
#[macro_use]
pub mod logging;

/// Implements [`ConstDefault`], a `const fn const_default()` and [`Default`]
/// from a single constant initializer.
#[macro_export]
macro_rules! const_default {
    ($type:ty => { $($token:tt)+ } ) => {
        impl $crate::ConstDefault for $type {
            const DEFAULT: Self = Self::const_default();
        }

        impl $type {
            pub const fn const_default() -> Self {
                Self { $($token)+ }
            }
        }

        impl Default for $type {
            fn default() -> Self {
                Self::const_default()
            }
        }
    };
}

/// Types with a default value usable in `const` contexts, e.g. to
/// initialize static tables.
pub trait ConstDefault {
    const DEFAULT: Self;
}

pub mod consts;
pub mod context;
pub mod errors;
pub mod filters;
pub mod gvar;
pub mod logic;
pub mod parsers;
pub mod programming;
pub mod shell;
pub mod signals;
pub mod tasks;
pub mod types;
pub mod utils;

#[allow(unused)]
use num_traits::Float as _;

// Re-exported for implementors
pub use embassy_sync;
pub use embassy_time;
pub use heapless;

pub use context::{FlightContext, FlightSnapshot};
pub use errors::LogicError;
pub use programming::{LogicStatus, Programming};
