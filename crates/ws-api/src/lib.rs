use std::collections::BTreeMap;
use std::path::Path;
use std::thread::JoinHandle;

use tracing::info;
use ws_core::{ErrorKind, RunnerError, ScriptFile};
use ws_runtime::{check_all_actions, BrowserSession, StepRunner, StepRunnerOptions};

/// Parses a script document from a JSON string and lints every action's
/// block structure up front.
pub fn load_script_str(json: &str) -> Result<ScriptFile, RunnerError> {
    let file: ScriptFile = serde_json::from_str(json)
        .map_err(|cause| RunnerError::new(ErrorKind::InvalidAction, cause.to_string()))?;
    check_all_actions(&file.actions)?;
    Ok(file)
}

/// Reads and parses a script file from disk.
pub fn load_script_file(path: impl AsRef<Path>) -> Result<ScriptFile, RunnerError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|cause| {
        if cause.kind() == std::io::ErrorKind::NotFound {
            RunnerError::new(
                ErrorKind::ScriptFileNotFound,
                format!("File \"{}\" can not be found, please check the path", path.display()),
            )
        } else {
            RunnerError::new(ErrorKind::Io, cause.to_string())
        }
    })?;
    load_script_str(&json)
}

/// Options for assembling a runner from a loaded script.
pub struct CreateRunnerOptions {
    pub script: ScriptFile,
    pub variables: BTreeMap<String, String>,
    pub max_step_count: Option<usize>,
}

pub fn create_runner(
    session: Box<dyn BrowserSession>,
    options: CreateRunnerOptions,
) -> StepRunner {
    let defaults = StepRunnerOptions::default();
    StepRunner::new(
        session,
        StepRunnerOptions {
            actions: options.script.actions,
            variables: options.variables,
            max_step_count: options.max_step_count.unwrap_or(defaults.max_step_count),
        },
    )
}

/// Runs one action on a dedicated thread, leaving the calling thread free to
/// drive the runner's pause gate. Grab the gate with
/// [`StepRunner::pause_gate`] before calling this.
pub fn run_async(
    mut runner: StepRunner,
    initial_url: String,
    action_name: String,
) -> JoinHandle<Result<(), RunnerError>> {
    std::thread::spawn(move || {
        let outcome = runner.run(&initial_url, &action_name);
        if let Err(error) = &outcome {
            info!(action = %action_name, %error, "action failed");
        }
        outcome
    })
}
