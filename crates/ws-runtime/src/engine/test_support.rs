use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ws_core::Locator;

use crate::driver::{BrowserSession, DriverError, ElementHandle, SelectChoice};

use super::*;

/// Scripted in-memory session. Every primitive call appends one line to the
/// shared log so tests can assert on the exact call sequence; `sleep` never
/// blocks.
pub(crate) struct FakeSession {
    pub(crate) present: BTreeMap<String, bool>,
    pub(crate) present_sequences: BTreeMap<String, VecDeque<bool>>,
    pub(crate) texts: BTreeMap<String, String>,
    pub(crate) value_attributes: BTreeMap<String, String>,
    pub(crate) selected: BTreeMap<String, bool>,
    pub(crate) clipboard: Option<String>,
    pub(crate) fail_clicks: u32,
    pub(crate) wait_times_out: bool,
    pub(crate) non_select: Option<String>,
    pub(crate) tabs: usize,
    pub(crate) log: Arc<Mutex<Vec<String>>>,
    next_handle: u64,
    handle_values: HashMap<u64, String>,
}

impl Default for FakeSession {
    fn default() -> Self {
        Self {
            present: BTreeMap::new(),
            present_sequences: BTreeMap::new(),
            texts: BTreeMap::new(),
            value_attributes: BTreeMap::new(),
            selected: BTreeMap::new(),
            clipboard: None,
            fail_clicks: 0,
            wait_times_out: false,
            non_select: None,
            tabs: 1,
            log: Arc::new(Mutex::new(Vec::new())),
            next_handle: 0,
            handle_values: HashMap::new(),
        }
    }
}

impl FakeSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn log_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.log)
    }

    fn record(&self, entry: String) {
        self.log.lock().expect("log lock poisoned").push(entry);
    }

    fn value_of(&self, element: ElementHandle) -> String {
        self.handle_values
            .get(&element.0)
            .cloned()
            .unwrap_or_default()
    }
}

impl BrowserSession for FakeSession {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.record(format!("navigate:{url}"));
        Ok(())
    }

    fn find_element(&mut self, locator: &Locator) -> Result<Option<ElementHandle>, DriverError> {
        let found = match self.present_sequences.get_mut(&locator.value) {
            Some(sequence) if !sequence.is_empty() => {
                sequence.pop_front().unwrap_or(false)
            }
            _ => self.present.get(&locator.value).copied().unwrap_or(true),
        };
        if !found {
            return Ok(None);
        }
        self.next_handle += 1;
        self.handle_values
            .insert(self.next_handle, locator.value.clone());
        Ok(Some(ElementHandle(self.next_handle)))
    }

    fn click(&mut self, element: ElementHandle) -> Result<(), DriverError> {
        let value = self.value_of(element);
        if self.fail_clicks > 0 {
            self.fail_clicks -= 1;
            self.record(format!("click-failed:{value}"));
            return Err(DriverError::Backend("element click intercepted".to_string()));
        }
        self.record(format!("click:{value}"));
        Ok(())
    }

    fn send_keys(&mut self, element: ElementHandle, text: &str) -> Result<(), DriverError> {
        let value = self.value_of(element);
        self.record(format!("sendKeys:{value}:{text}"));
        Ok(())
    }

    fn element_text(&mut self, element: ElementHandle) -> Result<String, DriverError> {
        let value = self.value_of(element);
        Ok(self.texts.get(&value).cloned().unwrap_or_default())
    }

    fn element_attribute(
        &mut self,
        element: ElementHandle,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let value = self.value_of(element);
        if name == "value" {
            Ok(self.value_attributes.get(&value).cloned())
        } else {
            Ok(None)
        }
    }

    fn is_selected(&mut self, element: ElementHandle) -> Result<bool, DriverError> {
        let value = self.value_of(element);
        Ok(self.selected.get(&value).copied().unwrap_or(false))
    }

    fn select_option(
        &mut self,
        element: ElementHandle,
        choice: &SelectChoice,
    ) -> Result<(), DriverError> {
        let value = self.value_of(element);
        if self.non_select.as_deref() == Some(value.as_str()) {
            return Err(DriverError::NotASelectElement);
        }
        self.record(format!("select:{value}:{choice:?}"));
        Ok(())
    }

    fn switch_to_frame(&mut self, element: ElementHandle) -> Result<(), DriverError> {
        let value = self.value_of(element);
        self.record(format!("frame:{value}"));
        Ok(())
    }

    fn switch_to_default_content(&mut self) -> Result<(), DriverError> {
        self.record("frame:default".to_string());
        Ok(())
    }

    fn switch_to_parent_frame(&mut self) -> Result<(), DriverError> {
        self.record("frame:parent".to_string());
        Ok(())
    }

    fn scroll_window(&mut self, dx: i64, dy: i64) -> Result<(), DriverError> {
        self.record(format!("scrollWindow:{dx}:{dy}"));
        Ok(())
    }

    fn scroll_element(
        &mut self,
        element: ElementHandle,
        dx: i64,
        dy: i64,
    ) -> Result<(), DriverError> {
        let value = self.value_of(element);
        self.record(format!("scrollElement:{value}:{dx}:{dy}"));
        Ok(())
    }

    fn move_to_element(&mut self, element: ElementHandle) -> Result<(), DriverError> {
        let value = self.value_of(element);
        self.record(format!("moveTo:{value}"));
        Ok(())
    }

    fn wait_until(
        &mut self,
        condition: &WaitCondition,
        locator: &Locator,
        timeout_secs: u64,
    ) -> Result<(), DriverError> {
        if self.wait_times_out {
            return Err(DriverError::Timeout(format!(
                "condition {} on {} not met within {timeout_secs}s",
                condition.as_str(),
                locator.value
            )));
        }
        self.record(format!("wait:{}:{}", condition.as_str(), locator.value));
        Ok(())
    }

    fn open_tab(&mut self, url: &str) -> Result<(), DriverError> {
        self.tabs += 1;
        self.record(format!("openTab:{url}"));
        Ok(())
    }

    fn switch_tab(&mut self, index: usize) -> Result<(), DriverError> {
        self.record(format!("switchTab:{index}"));
        Ok(())
    }

    fn close_current_tab(&mut self) -> Result<(), DriverError> {
        self.tabs = self.tabs.saturating_sub(1);
        self.record("closeTab".to_string());
        Ok(())
    }

    fn tab_count(&mut self) -> Result<usize, DriverError> {
        Ok(self.tabs)
    }

    fn show_alert(&mut self, text: &str) -> Result<(), DriverError> {
        self.record(format!("alert:{text}"));
        Ok(())
    }

    fn alert_open(&mut self) -> Result<bool, DriverError> {
        Ok(false)
    }

    fn accept_alert(&mut self) -> Result<(), DriverError> {
        self.record("acceptAlert".to_string());
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, DriverError> {
        Ok("<html><body>fake page</body></html>".to_string())
    }

    fn save_screenshot(&mut self, path: &Path) -> Result<(), DriverError> {
        self.record(format!("screenshot:{}", path.display()));
        Ok(())
    }

    fn clipboard_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn sleep(&mut self, duration: Duration) {
        self.record(format!("sleep:{}", duration.as_secs()));
    }
}

pub(crate) fn runner_with(session: FakeSession, steps: Vec<Step>) -> StepRunner {
    let mut actions = BTreeMap::new();
    actions.insert("main".to_string(), steps);
    StepRunner::new(
        Box::new(session),
        StepRunnerOptions {
            actions,
            ..StepRunnerOptions::default()
        },
    )
}

pub(crate) fn click_step(value: &str) -> Step {
    Step::FindElement {
        select: LocatorStrategy::ById,
        select_value: value.to_string(),
        method: ws_core::ElementMethod::Click,
        method_para: String::new(),
        retry_count: 0,
        retry_interval: 1,
    }
}

pub(crate) fn bool_if(para: &str) -> Step {
    Step::If {
        select: None,
        select_value: String::new(),
        condition: ElementCondition::ByBoolValue,
        condition_para: para.to_string(),
    }
}

pub(crate) fn count_loop(para: &str) -> Step {
    Step::ForLoop {
        method: ForLoopMode::LoopByCount,
        method_para: para.to_string(),
    }
}

pub(crate) fn exist_while(value: &str) -> Step {
    Step::WhileLoop {
        select: Some(LocatorStrategy::ById),
        select_value: value.to_string(),
        condition: ElementCondition::IsElementExist,
        condition_para: String::new(),
    }
}
