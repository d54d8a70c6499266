use static_assertions::const_assert;

/// Number of logic condition slots
pub const MAX_LOGIC_CONDITIONS: usize = 16;

/// Number of global variables available to logic conditions
pub const MAX_GLOBAL_VARIABLES: usize = 8;

/// Number of programming PID controllers
pub const MAX_PROGRAMMING_PIDS: usize = 4;

/// Number of RC channels that can be read or overridden
pub const MAX_RC_CHANNELS: usize = 18;

/// Roll, pitch and yaw
pub const NUM_FLIGHT_AXES: usize = 3;

/// Number of selectable flight profiles
pub const MAX_PROFILES: i32 = 3;

/// Limits for operand values entered through the CLI
pub const OPERAND_VALUE_MIN: i32 = -1_000_000;
pub const OPERAND_VALUE_MAX: i32 = 1_000_000;

/// RC channel thresholds for the LOW / MID / HIGH operations [us]
pub const RC_LOW_THRESHOLD: i32 = 1333;
pub const RC_HIGH_THRESHOLD: i32 = 1666;

/// Upper limit of an overridden loiter radius [cm]
pub const LOITER_RADIUS_MAX: i32 = 100_000;

/// Output limit of the programming PID controllers
pub const PID_OUTPUT_LIMIT: i32 = 1000;

/// Cutoff frequency of the programming PID derivative filter [Hz]
pub const PID_DTERM_LPF_HZ: f32 = 5.0;

/// Rate at which the logic conditions are evaluated [Hz]
pub const LOGIC_UPDATE_HZ: u64 = 10;

/// Scale applied to trigonometric operations when operand B is zero
pub const TRIG_DEFAULT_SCALE: i32 = 500;

/// Edge pulses shorter than this are reduced to a single evaluation [ms]
pub const EDGE_MIN_PULSE_MS: i32 = 100;

// Activators and condition references travel as `i8` on the wire.
const_assert!(MAX_LOGIC_CONDITIONS <= i8::MAX as usize);
const_assert!(MAX_RC_CHANNELS <= u8::MAX as usize);
