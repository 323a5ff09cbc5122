use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};
use ws_core::{Locator, WaitCondition};
use ws_runtime::{BrowserSession, DriverError, ElementHandle, SelectChoice};

/// Session that narrates every browser primitive instead of performing it.
/// Elements are always found and delays are skipped, so a script's control
/// flow can be rehearsed without a browser.
pub struct DryRunSession {
    next_handle: u64,
    tabs: usize,
}

impl DryRunSession {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            tabs: 1,
        }
    }
}

impl Default for DryRunSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserSession for DryRunSession {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        info!(url, "navigate");
        Ok(())
    }

    fn find_element(&mut self, locator: &Locator) -> Result<Option<ElementHandle>, DriverError> {
        self.next_handle += 1;
        debug!(strategy = ?locator.strategy, value = %locator.value, "find element");
        Ok(Some(ElementHandle(self.next_handle)))
    }

    fn click(&mut self, element: ElementHandle) -> Result<(), DriverError> {
        info!(element = element.0, "click");
        Ok(())
    }

    fn send_keys(&mut self, element: ElementHandle, text: &str) -> Result<(), DriverError> {
        info!(element = element.0, text, "send keys");
        Ok(())
    }

    fn element_text(&mut self, _element: ElementHandle) -> Result<String, DriverError> {
        Ok(String::new())
    }

    fn element_attribute(
        &mut self,
        _element: ElementHandle,
        _name: &str,
    ) -> Result<Option<String>, DriverError> {
        Ok(None)
    }

    fn is_selected(&mut self, _element: ElementHandle) -> Result<bool, DriverError> {
        Ok(false)
    }

    fn select_option(
        &mut self,
        element: ElementHandle,
        choice: &SelectChoice,
    ) -> Result<(), DriverError> {
        info!(element = element.0, ?choice, "select option");
        Ok(())
    }

    fn switch_to_frame(&mut self, element: ElementHandle) -> Result<(), DriverError> {
        info!(element = element.0, "switch to frame");
        Ok(())
    }

    fn switch_to_default_content(&mut self) -> Result<(), DriverError> {
        info!("switch to default content");
        Ok(())
    }

    fn switch_to_parent_frame(&mut self) -> Result<(), DriverError> {
        info!("switch to parent frame");
        Ok(())
    }

    fn scroll_window(&mut self, dx: i64, dy: i64) -> Result<(), DriverError> {
        info!(dx, dy, "scroll window");
        Ok(())
    }

    fn scroll_element(
        &mut self,
        element: ElementHandle,
        dx: i64,
        dy: i64,
    ) -> Result<(), DriverError> {
        info!(element = element.0, dx, dy, "scroll element");
        Ok(())
    }

    fn move_to_element(&mut self, element: ElementHandle) -> Result<(), DriverError> {
        info!(element = element.0, "move to element");
        Ok(())
    }

    fn wait_until(
        &mut self,
        condition: &WaitCondition,
        locator: &Locator,
        timeout_secs: u64,
    ) -> Result<(), DriverError> {
        info!(
            condition = condition.as_str(),
            value = %locator.value,
            timeout_secs,
            "wait until"
        );
        Ok(())
    }

    fn open_tab(&mut self, url: &str) -> Result<(), DriverError> {
        self.tabs += 1;
        info!(url, tabs = self.tabs, "open tab");
        Ok(())
    }

    fn switch_tab(&mut self, index: usize) -> Result<(), DriverError> {
        info!(index, "switch tab");
        Ok(())
    }

    fn close_current_tab(&mut self) -> Result<(), DriverError> {
        self.tabs = self.tabs.saturating_sub(1);
        info!(tabs = self.tabs, "close tab");
        Ok(())
    }

    fn tab_count(&mut self) -> Result<usize, DriverError> {
        Ok(self.tabs)
    }

    fn show_alert(&mut self, text: &str) -> Result<(), DriverError> {
        info!(text, "show alert");
        Ok(())
    }

    fn alert_open(&mut self) -> Result<bool, DriverError> {
        Ok(false)
    }

    fn accept_alert(&mut self) -> Result<(), DriverError> {
        info!("accept alert");
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, DriverError> {
        Ok("<html></html>".to_string())
    }

    fn save_screenshot(&mut self, path: &Path) -> Result<(), DriverError> {
        info!(path = %path.display(), "screenshot");
        Ok(())
    }

    fn clipboard_text(&mut self) -> Option<String> {
        None
    }

    fn sleep(&mut self, duration: Duration) {
        debug!(secs = duration.as_secs(), "sleep skipped");
    }
}
