use std::fmt;

use thiserror::Error;

/// Failure taxonomy for a script run. Script-definition kinds are raised
/// before execution, the rest during it; all of them halt the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ScriptActionNotFound,
    InvalidAction,
    InvalidLogicDefinition,
    UnterminatedBlock,
    InvalidMethodValue,
    InvalidConditionValue,
    ScriptFileNotFound,
    ElementWaitTimeout,
    ElementNotFound,
    ElementNotSelect,
    ConditionNotSatisfied,
    ExceedMaxStepCount,
    InternalInvariant,
    Driver,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ScriptActionNotFound => "ScriptActionNotFound",
            ErrorKind::InvalidAction => "InvalidAction",
            ErrorKind::InvalidLogicDefinition => "InvalidLogicDefinition",
            ErrorKind::UnterminatedBlock => "UnterminatedBlock",
            ErrorKind::InvalidMethodValue => "InvalidMethodValue",
            ErrorKind::InvalidConditionValue => "InvalidConditionValue",
            ErrorKind::ScriptFileNotFound => "ScriptFileNotFound",
            ErrorKind::ElementWaitTimeout => "ElementWaitTimeout",
            ErrorKind::ElementNotFound => "ElementNotFound",
            ErrorKind::ElementNotSelect => "ElementNotSelect",
            ErrorKind::ConditionNotSatisfied => "ConditionNotSatisfied",
            ErrorKind::ExceedMaxStepCount => "ExceedMaxStepCount",
            ErrorKind::InternalInvariant => "InternalInvariant",
            ErrorKind::Driver => "Driver",
            ErrorKind::Io => "Io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone)]
#[error("{kind}: {prompt}")]
pub struct RunnerError {
    pub kind: ErrorKind,
    pub prompt: String,
}

impl RunnerError {
    pub fn new(kind: ErrorKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
        }
    }

    /// Same as `new` but prefixes the 1-based step number, the form every
    /// step-scoped failure message uses.
    pub fn at_step(kind: ErrorKind, step_index: usize, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: format!("In step {}, {}", step_index + 1, prompt.into()),
        }
    }
}
