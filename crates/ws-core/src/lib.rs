pub mod error;
pub mod script;
pub mod subst;
pub mod types;

pub use error::{ErrorKind, RunnerError};
pub use script::{ScriptFile, Step};
pub use subst::{substitute, substitute_with, CLIPBOARD_VARIABLE};
pub use types::*;
