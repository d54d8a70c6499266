//! Text commands for inspecting and editing the programming configuration.
//!
//! Every command is one line. `logic`, `gvar` and `pid` without arguments
//! list their table, with `reset` restore the defaults, and otherwise set a
//! single entry from its integer fields. `dump` prints every entry in the
//! same format so the output can be pasted back, `diff` only prints the
//! entries differing from the defaults.

use core::fmt::Write;

use crate::{
    errors::ShellError,
    types::{GlobalVariableConfig, LogicCondition, ProgrammingConfig, ProgrammingPidConfig},
};

mod args;
pub mod commands;

use commands::{gvar, logic, pid};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShellCommand {
    ListLogic,
    ResetLogic,
    SetLogic(usize, LogicCondition),
    ListGvars,
    ResetGvars,
    SetGvar(usize, GlobalVariableConfig),
    ListPids,
    ResetPids,
    SetPid(usize, ProgrammingPidConfig),
    Dump,
    Diff,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));
        let reset = rest.eq_ignore_ascii_case("reset");

        let command = match name {
            "logic" if rest.is_empty() => Self::ListLogic,
            "logic" if reset => Self::ResetLogic,
            "logic" => logic::parse(rest).map(|(i, c)| Self::SetLogic(i, c))?,
            "gvar" if rest.is_empty() => Self::ListGvars,
            "gvar" if reset => Self::ResetGvars,
            "gvar" => gvar::parse(rest).map(|(i, c)| Self::SetGvar(i, c))?,
            "pid" if rest.is_empty() => Self::ListPids,
            "pid" if reset => Self::ResetPids,
            "pid" => pid::parse(rest).map(|(i, c)| Self::SetPid(i, c))?,
            "dump" if rest.is_empty() => Self::Dump,
            "diff" if rest.is_empty() => Self::Diff,
            _ => return Err(ShellError::UnknownCommand),
        };

        Ok(command)
    }

    /// Execute the command against `config`, writing any output to `out`.
    /// Returns whether the configuration was modified.
    pub fn execute<W: Write>(
        self,
        config: &mut ProgrammingConfig,
        out: &mut W,
    ) -> Result<bool, ShellError> {
        match self {
            Self::ListLogic => write_logic(out, config, None)?,
            Self::ListGvars => write_gvars(out, config, None)?,
            Self::ListPids => write_pids(out, config, None)?,
            Self::Dump => dump(out, config, false)?,
            Self::Diff => dump(out, config, true)?,
            Self::ResetLogic => {
                config.conditions = ProgrammingConfig::const_default().conditions;
                return Ok(true);
            }
            Self::ResetGvars => {
                config.gvars = ProgrammingConfig::const_default().gvars;
                return Ok(true);
            }
            Self::ResetPids => {
                config.pids = ProgrammingConfig::const_default().pids;
                return Ok(true);
            }
            Self::SetLogic(index, condition) => {
                config.conditions[index] = condition;
                logic::write_line(out, index, &condition)?;
                return Ok(true);
            }
            Self::SetGvar(index, entry) => {
                config.gvars[index] = entry;
                gvar::write_line(out, index, &entry)?;
                return Ok(true);
            }
            Self::SetPid(index, entry) => {
                config.pids[index] = entry;
                pid::write_line(out, index, &entry)?;
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// Print the whole configuration as commands. With `diff_only`, entries
/// equal to their default are skipped.
pub fn dump<W: Write>(
    out: &mut W,
    config: &ProgrammingConfig,
    diff_only: bool,
) -> Result<(), ShellError> {
    let defaults = ProgrammingConfig::const_default();
    let defaults = diff_only.then_some(&defaults);

    write_logic(out, config, defaults)?;
    write_gvars(out, config, defaults)?;
    write_pids(out, config, defaults)
}

fn write_logic<W: Write>(
    out: &mut W,
    config: &ProgrammingConfig,
    skip: Option<&ProgrammingConfig>,
) -> Result<(), ShellError> {
    for (index, condition) in config.conditions.iter().enumerate() {
        if skip.is_some_and(|defaults| defaults.conditions[index] == *condition) {
            continue;
        }
        logic::write_line(out, index, condition)?;
    }
    Ok(())
}

fn write_gvars<W: Write>(
    out: &mut W,
    config: &ProgrammingConfig,
    skip: Option<&ProgrammingConfig>,
) -> Result<(), ShellError> {
    for (index, entry) in config.gvars.iter().enumerate() {
        if skip.is_some_and(|defaults| defaults.gvars[index] == *entry) {
            continue;
        }
        gvar::write_line(out, index, entry)?;
    }
    Ok(())
}

fn write_pids<W: Write>(
    out: &mut W,
    config: &ProgrammingConfig,
    skip: Option<&ProgrammingConfig>,
) -> Result<(), ShellError> {
    for (index, entry) in config.pids.iter().enumerate() {
        if skip.is_some_and(|defaults| defaults.pids[index] == *entry) {
            continue;
        }
        pid::write_line(out, index, entry)?;
    }
    Ok(())
}
