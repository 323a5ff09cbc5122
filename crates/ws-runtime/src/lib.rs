pub mod driver;
pub mod pause;
pub mod validate;

mod engine;

pub use driver::{
    rewrite_capability_error, BrowserSession, DriverError, ElementHandle, SelectChoice,
};
pub use engine::{StepRunner, StepRunnerOptions, DEFAULT_MAX_STEP_COUNT};
pub use pause::PauseGate;
pub use validate::{check_all_actions, check_logic_statements};
