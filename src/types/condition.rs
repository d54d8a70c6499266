use serde::{Deserialize, Serialize};

use super::{operand::Operand, operation::Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConditionFlags(u8);

bitflags::bitflags! {
    /// Per-condition flags. `LATCH` is set in the configuration to request
    /// latching behavior, and mirrored into the runtime state once the
    /// condition has latched. `TIMEOUT_SATISFIED` is runtime only.
    impl ConditionFlags: u8 {

        /// **Bit 0** - Freeze the value once it evaluates true.
        const LATCH             = 1 << 0;

        /// **Bit 1** - The timed part of an edge / delay has been handled.
        const TIMEOUT_SATISFIED = 1 << 1;
    }
}

/// One user-configured logic condition slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicCondition {
    pub enabled: bool,
    /// Index of the condition which must be true for this one to be
    /// evaluated. `None` means the condition is always active.
    pub activator: Option<u8>,
    pub operation: Operation,
    pub operand_a: Operand,
    pub operand_b: Operand,
    pub flags: ConditionFlags,
}

crate::const_default!(
    LogicCondition => {
        enabled: false,
        activator: None,
        operation: Operation::True,
        operand_a: Operand::value(0),
        operand_b: Operand::value(0),
        flags: ConditionFlags::empty(),
    }
);

impl LogicCondition {
    /// An enabled, always-active condition
    pub const fn new(operation: Operation, operand_a: Operand, operand_b: Operand) -> Self {
        Self {
            enabled: true,
            operation,
            operand_a,
            operand_b,
            ..Self::const_default()
        }
    }

    pub const fn activated_by(mut self, index: u8) -> Self {
        self.activator = Some(index);
        self
    }

    pub const fn latching(mut self) -> Self {
        self.flags = self.flags.union(ConditionFlags::LATCH);
        self
    }

    pub fn is_latching(&self) -> bool {
        self.flags.contains(ConditionFlags::LATCH)
    }
}
