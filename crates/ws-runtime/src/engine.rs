use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use ws_core::{
    substitute_with, BlockDescriptor, ElementCondition, ErrorKind, ForLoopMode, Locator,
    LocatorStrategy, RunnerError, Step, WaitCondition, CLIPBOARD_VARIABLE,
};

use crate::driver::{rewrite_capability_error, BrowserSession, ElementHandle, SelectChoice};
use crate::pause::PauseGate;
use crate::validate::check_logic_statements;

mod conditions;
mod control_flow;
mod exec;
mod run;

#[cfg(test)]
pub(crate) mod test_support;

/// Hard cap on executed steps per run, the guard against unbounded loops.
pub const DEFAULT_MAX_STEP_COUNT: usize = 300;

/// Construction options for a [`StepRunner`].
pub struct StepRunnerOptions {
    pub actions: BTreeMap<String, Vec<Step>>,
    pub variables: BTreeMap<String, String>,
    pub max_step_count: usize,
}

impl Default for StepRunnerOptions {
    fn default() -> Self {
        Self {
            actions: BTreeMap::new(),
            variables: BTreeMap::new(),
            max_step_count: DEFAULT_MAX_STEP_COUNT,
        }
    }
}

/// The step interpreter. One runner owns one browser session and executes
/// one action's step list at a time; `run` drives the program counter while
/// the control-flow stack tracks the blocks the current step sits inside.
pub struct StepRunner {
    session: Box<dyn BrowserSession>,
    actions: BTreeMap<String, Vec<Step>>,
    variables: BTreeMap<String, String>,
    max_step_count: usize,
    pause_gate: Arc<PauseGate>,
    pc: usize,
    step_count: usize,
    block_index: HashMap<usize, BlockDescriptor>,
    block_stack: Vec<BlockDescriptor>,
}

impl StepRunner {
    pub fn new(session: Box<dyn BrowserSession>, options: StepRunnerOptions) -> Self {
        Self {
            session,
            actions: options.actions,
            variables: options.variables,
            max_step_count: options.max_step_count,
            pause_gate: Arc::new(PauseGate::new()),
            pc: 0,
            step_count: 0,
            block_index: HashMap::new(),
            block_stack: Vec::new(),
        }
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Handle for a controlling thread to release a `ProgrammingPause`.
    pub fn pause_gate(&self) -> Arc<PauseGate> {
        Arc::clone(&self.pause_gate)
    }

    /// Substitutes `${name}` placeholders from the variable table, with
    /// `clipboardContent` falling back to the session clipboard.
    fn resolve(&mut self, template: &str) -> String {
        let session = &mut self.session;
        substitute_with(template, &self.variables, |name| {
            (name == CLIPBOARD_VARIABLE).then(|| session.clipboard_text().unwrap_or_default())
        })
    }

    fn select_locator(&mut self, strategy: LocatorStrategy, value: &str) -> Locator {
        Locator {
            strategy,
            value: self.resolve(value),
        }
    }

    /// Locates an element or fails the step with `ElementNotFound`.
    fn require_element(
        &mut self,
        index: usize,
        strategy: LocatorStrategy,
        value: &str,
    ) -> Result<(ElementHandle, Locator), RunnerError> {
        let locator = self.select_locator(strategy, value);
        match self.session.find_element(&locator)? {
            Some(element) => Ok((element, locator)),
            None => Err(RunnerError::at_step(
                ErrorKind::ElementNotFound,
                index,
                format!("element \"{}\" can not be found", locator.value),
            )),
        }
    }

    /// Locates an element when a strategy is given; `None` strategies mean
    /// the step's condition does not involve an element.
    fn optional_element(
        &mut self,
        strategy: Option<LocatorStrategy>,
        value: &str,
    ) -> Result<Option<ElementHandle>, RunnerError> {
        let Some(strategy) = strategy else {
            return Ok(None);
        };
        let locator = self.select_locator(strategy, value);
        Ok(self.session.find_element(&locator)?)
    }
}
