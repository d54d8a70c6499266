use crate::{consts::MAX_GLOBAL_VARIABLES, types::GlobalVariableConfig, utils::func::constrain};

/// Runtime values of the global variables. Logic conditions read them as
/// operands and write them through the `GvarSet`/`GvarInc`/`GvarDec`
/// operations, which makes them the only state shared between conditions
/// apart from the condition values themselves.
#[derive(Debug, Clone)]
pub struct GlobalVariables {
    values: [i32; MAX_GLOBAL_VARIABLES],
    limits: [GlobalVariableConfig; MAX_GLOBAL_VARIABLES],
}

impl GlobalVariables {
    pub const fn new() -> Self {
        Self {
            values: [0; MAX_GLOBAL_VARIABLES],
            limits: [GlobalVariableConfig::const_default(); MAX_GLOBAL_VARIABLES],
        }
    }

    /// Load the limits and reset every variable to its default value
    pub fn init(&mut self, config: &[GlobalVariableConfig; MAX_GLOBAL_VARIABLES]) {
        self.limits = *config;
        for (value, cfg) in self.values.iter_mut().zip(config) {
            *value = constrain(cfg.default_value, cfg.min, cfg.max);
        }
    }

    /// Update the limits without touching the current values
    pub fn set_limits(&mut self, config: &[GlobalVariableConfig; MAX_GLOBAL_VARIABLES]) {
        self.limits = *config;
    }

    /// Value of the variable at `index`, `0` when out of range
    pub fn get(&self, index: i32) -> i32 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.values.get(i).copied())
            .unwrap_or(0)
    }

    /// Store `value`, constrained to the configured limits. Writes to
    /// indices out of range are dropped.
    pub fn set(&mut self, index: i32, value: i32) {
        let Some(i) = usize::try_from(index).ok().filter(|&i| i < MAX_GLOBAL_VARIABLES) else {
            trace!("gvar: ignoring write to index {}", index);
            return;
        };
        let limits = &self.limits[i];
        self.values[i] = constrain(value, limits.min, limits.max);
    }

    pub fn values(&self) -> [i32; MAX_GLOBAL_VARIABLES] {
        self.values
    }
}

impl Default for GlobalVariables {
    fn default() -> Self {
        Self::new()
    }
}
