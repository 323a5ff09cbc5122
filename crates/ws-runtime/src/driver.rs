use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use ws_core::{ErrorKind, Locator, RunnerError, WaitCondition};

/// Opaque reference to a located element. Only meaningful to the session
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Failures surfaced by the browser-capability layer. The interpreter never
/// inspects these beyond mapping them into its own taxonomy.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("wait timed out: {0}")]
    Timeout(String),
    #[error("element is not a <select> element")]
    NotASelectElement,
    #[error("{0}")]
    Backend(String),
}

impl From<DriverError> for RunnerError {
    fn from(error: DriverError) -> Self {
        let kind = match error {
            DriverError::Timeout(_) => ErrorKind::ElementWaitTimeout,
            DriverError::NotASelectElement => ErrorKind::ElementNotSelect,
            DriverError::Backend(_) => ErrorKind::Driver,
        };
        RunnerError::new(kind, error.to_string())
    }
}

/// Rewrites a capability failure into `target` with a step-specific prompt
/// when the caught variant corresponds to that kind; any other failure is
/// converted unchanged so its original message survives.
pub fn rewrite_capability_error(
    error: DriverError,
    target: ErrorKind,
    prompt: impl Into<String>,
) -> RunnerError {
    let matches = matches!(
        (&error, target),
        (DriverError::Timeout(_), ErrorKind::ElementWaitTimeout)
            | (DriverError::NotASelectElement, ErrorKind::ElementNotSelect)
    );
    if matches {
        RunnerError::new(target, prompt)
    } else {
        error.into()
    }
}

/// How to pick an option inside a `<select>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectChoice {
    ByText(String),
    ByValue(String),
    ByIndex(usize),
}

/// The browser capability consumed by the interpreter. Implementations bind
/// a real WebDriver session; the interpreter only interprets presence and
/// boolean results for control flow and treats everything else as opaque.
///
/// `wait_until` is never called with `WaitCondition::BySecond`; plain delays
/// are handled by the run loop through `sleep`.
pub trait BrowserSession: Send {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError>;
    fn find_element(&mut self, locator: &Locator) -> Result<Option<ElementHandle>, DriverError>;
    fn click(&mut self, element: ElementHandle) -> Result<(), DriverError>;
    fn send_keys(&mut self, element: ElementHandle, text: &str) -> Result<(), DriverError>;
    fn element_text(&mut self, element: ElementHandle) -> Result<String, DriverError>;
    fn element_attribute(
        &mut self,
        element: ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError>;
    fn is_selected(&mut self, element: ElementHandle) -> Result<bool, DriverError>;
    fn select_option(
        &mut self,
        element: ElementHandle,
        choice: &SelectChoice,
    ) -> Result<(), DriverError>;
    fn switch_to_frame(&mut self, element: ElementHandle) -> Result<(), DriverError>;
    fn switch_to_default_content(&mut self) -> Result<(), DriverError>;
    fn switch_to_parent_frame(&mut self) -> Result<(), DriverError>;
    fn scroll_window(&mut self, dx: i64, dy: i64) -> Result<(), DriverError>;
    fn scroll_element(
        &mut self,
        element: ElementHandle,
        dx: i64,
        dy: i64,
    ) -> Result<(), DriverError>;
    fn move_to_element(&mut self, element: ElementHandle) -> Result<(), DriverError>;
    fn wait_until(
        &mut self,
        condition: &WaitCondition,
        locator: &Locator,
        timeout_secs: u64,
    ) -> Result<(), DriverError>;
    fn open_tab(&mut self, url: &str) -> Result<(), DriverError>;
    fn switch_tab(&mut self, index: usize) -> Result<(), DriverError>;
    fn close_current_tab(&mut self) -> Result<(), DriverError>;
    fn tab_count(&mut self) -> Result<usize, DriverError>;
    fn show_alert(&mut self, text: &str) -> Result<(), DriverError>;
    fn alert_open(&mut self) -> Result<bool, DriverError>;
    fn accept_alert(&mut self) -> Result<(), DriverError>;
    fn page_source(&mut self) -> Result<String, DriverError>;
    fn save_screenshot(&mut self, path: &Path) -> Result<(), DriverError>;
    fn clipboard_text(&mut self) -> Option<String>;

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
