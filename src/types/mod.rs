pub mod condition;
pub mod config;
pub mod operand;
pub mod operation;
pub mod status;

pub use condition::{ConditionFlags, LogicCondition};
pub use config::{GlobalVariableConfig, PidGains, ProgrammingConfig, ProgrammingPidConfig};
pub use operand::{FlightModeOperand, FlightOperand, Operand, OperandType, WaypointOperand};
pub use operation::Operation;
pub use status::GlobalFlags;
