use super::*;

impl StepRunner {
    pub(super) fn execute_step(&mut self, step: &Step, index: usize) -> Result<(), RunnerError> {
        match step {
            Step::FindElement {
                select,
                select_value,
                method,
                method_para,
                retry_count,
                retry_interval,
            } => self.execute_find_element(
                index,
                *select,
                select_value,
                *method,
                method_para,
                *retry_count,
                *retry_interval,
            ),
            Step::WaitUntil {
                condition,
                wait_time,
                select,
                select_value,
            } => self.execute_wait_until(index, *condition, *wait_time, *select, select_value),
            Step::GoToUrl { url } => self.execute_go_to_url(index, url),
            Step::FindSelect {
                select,
                select_value,
                method,
                method_para,
            } => self.execute_find_select(index, *select, select_value, *method, method_para),
            Step::FindCheckbox {
                select,
                select_value,
                method,
            } => self.execute_find_checkbox(index, *select, select_value, *method),
            Step::SwitchToIframe {
                target,
                select,
                select_value,
            } => self.execute_switch_to_iframe(index, *target, *select, select_value),
            Step::IsElementSatisfyCondition {
                select,
                select_value,
                condition,
                condition_para,
                success_message,
                fail_message,
            } => self.execute_satisfy_condition(
                index,
                *select,
                select_value,
                *condition,
                condition_para,
                success_message,
                fail_message,
            ),
            Step::ScrollWindow {
                direction,
                scroll_value,
                wait_time,
            } => self.execute_scroll_window(*direction, *scroll_value, *wait_time),
            Step::ScrollOverflowDiv {
                select,
                select_value,
                direction,
                scroll_value,
                wait_time,
            } => self.execute_scroll_overflow_div(
                index,
                *select,
                select_value,
                *direction,
                *scroll_value,
                *wait_time,
            ),
            Step::MoveToElement {
                select,
                select_value,
                wait_time,
            } => self.execute_move_to_element(index, *select, select_value, *wait_time),
            Step::If {
                select,
                select_value,
                condition,
                condition_para,
            } => self.execute_if(index, *select, select_value, *condition, condition_para),
            Step::Else => self.execute_else(index),
            Step::EndIf => self.execute_end_if(index),
            Step::ForLoop { method, method_para } => {
                self.execute_for_loop(index, *method, method_para)
            }
            Step::EndForLoop => self.execute_end_for_loop(index),
            Step::WhileLoop {
                select,
                select_value,
                condition,
                condition_para,
            } => self.execute_while_loop(index, *select, select_value, *condition, condition_para),
            Step::EndWhileLoop => self.execute_end_while_loop(index),
            Step::ProgrammingPause { wait_time } => self.execute_programming_pause(index, *wait_time),
            Step::AddNewTabPage { url } => self.execute_add_new_tab_page(url),
            Step::SwitchToTabPage { index: tab } => self.execute_switch_to_tab_page(index, *tab),
            Step::CloseTabPage { index: tab } => self.execute_close_tab_page(index, *tab),
            Step::RaiseAlert {
                information,
                alert_time,
            } => self.execute_raise_alert(information, *alert_time),
            Step::TakeScreenshot { file_name } => self.execute_take_screenshot(file_name),
            Step::FetchEntirePage { file_name } => self.execute_fetch_entire_page(index, file_name),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_find_element(
        &mut self,
        index: usize,
        strategy: LocatorStrategy,
        select_value: &str,
        method: ws_core::ElementMethod,
        method_para: &str,
        retry_count: u32,
        retry_interval: u64,
    ) -> Result<(), RunnerError> {
        let (element, locator) = self.require_element(index, strategy, select_value)?;
        match method {
            ws_core::ElementMethod::Click => {
                self.session.click(element)?;
            }
            ws_core::ElementMethod::ClickUntilSuccess => {
                let attempts = retry_count as usize + 1;
                let mut clicked = false;
                for attempt in 0..attempts {
                    match self.session.click(element) {
                        Ok(()) => {
                            clicked = true;
                            break;
                        }
                        Err(cause) => {
                            warn!(
                                step = index + 1,
                                attempt = attempt + 1,
                                %cause,
                                "click failed, retrying"
                            );
                            self.session.sleep(Duration::from_secs(retry_interval));
                        }
                    }
                }
                if !clicked {
                    return Err(RunnerError::at_step(
                        ErrorKind::ElementWaitTimeout,
                        index,
                        format!(
                            "element \"{}\" click failed after {} retries.",
                            locator.value, retry_count
                        ),
                    ));
                }
            }
            ws_core::ElementMethod::SendKeys => {
                let text = self.resolve(method_para);
                self.session.send_keys(element, &text)?;
            }
        }
        Ok(())
    }

    fn execute_wait_until(
        &mut self,
        index: usize,
        condition: WaitCondition,
        wait_time: u64,
        strategy: Option<LocatorStrategy>,
        select_value: &str,
    ) -> Result<(), RunnerError> {
        if condition == WaitCondition::BySecond {
            self.session.sleep(Duration::from_secs(wait_time));
            return Ok(());
        }
        let Some(strategy) = strategy else {
            return Err(RunnerError::at_step(
                ErrorKind::InvalidConditionValue,
                index,
                format!("condition \"{}\" needs a select strategy", condition.as_str()),
            ));
        };
        let locator = self.select_locator(strategy, select_value);
        self.session
            .wait_until(&condition, &locator, wait_time)
            .map_err(|cause| {
                rewrite_capability_error(
                    cause,
                    ErrorKind::ElementWaitTimeout,
                    format!(
                        "In step {}, waiting for condition \"{}\" timed out after {} seconds.",
                        index + 1,
                        condition.as_str(),
                        wait_time
                    ),
                )
            })
    }

    fn execute_go_to_url(&mut self, index: usize, url: &str) -> Result<(), RunnerError> {
        if url.is_empty() {
            return Err(RunnerError::at_step(
                ErrorKind::InvalidMethodValue,
                index,
                "url is not defined",
            ));
        }
        let url = self.resolve(url);
        self.session.navigate(&url)?;
        Ok(())
    }

    fn execute_find_select(
        &mut self,
        index: usize,
        strategy: LocatorStrategy,
        select_value: &str,
        method: ws_core::SelectMethod,
        method_para: &str,
    ) -> Result<(), RunnerError> {
        let (element, _) = self.require_element(index, strategy, select_value)?;
        let para = self.resolve(method_para);
        let choice = match method {
            ws_core::SelectMethod::SelectByText => SelectChoice::ByText(para),
            ws_core::SelectMethod::SelectByValue => SelectChoice::ByValue(para),
            ws_core::SelectMethod::SelectByIndex => {
                let position = para.parse::<usize>().map_err(|_| {
                    RunnerError::at_step(
                        ErrorKind::InvalidMethodValue,
                        index,
                        format!("\"{para}\" is not a valid option index"),
                    )
                })?;
                SelectChoice::ByIndex(position)
            }
        };
        self.session
            .select_option(element, &choice)
            .map_err(|cause| {
                rewrite_capability_error(
                    cause,
                    ErrorKind::ElementNotSelect,
                    format!(
                        "In step {}, FindSelect needs to select a <select> element",
                        index + 1
                    ),
                )
            })
    }

    fn execute_find_checkbox(
        &mut self,
        index: usize,
        strategy: LocatorStrategy,
        select_value: &str,
        method: ws_core::CheckboxMethod,
    ) -> Result<(), RunnerError> {
        let (element, _) = self.require_element(index, strategy, select_value)?;
        let selected = self.session.is_selected(element)?;
        let wanted = matches!(method, ws_core::CheckboxMethod::Check);
        if selected != wanted {
            self.session.click(element)?;
        }
        Ok(())
    }

    fn execute_switch_to_iframe(
        &mut self,
        index: usize,
        target: ws_core::FrameTarget,
        strategy: Option<LocatorStrategy>,
        select_value: &str,
    ) -> Result<(), RunnerError> {
        match target {
            ws_core::FrameTarget::Frame => {
                let Some(strategy) = strategy else {
                    return Err(RunnerError::at_step(
                        ErrorKind::InvalidMethodValue,
                        index,
                        "switching into a frame needs a select strategy",
                    ));
                };
                let (element, _) = self.require_element(index, strategy, select_value)?;
                self.session.switch_to_frame(element)?;
            }
            ws_core::FrameTarget::DefaultContent => {
                self.session.switch_to_default_content()?;
            }
            ws_core::FrameTarget::ParentFrame => {
                self.session.switch_to_parent_frame()?;
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_satisfy_condition(
        &mut self,
        index: usize,
        strategy: Option<LocatorStrategy>,
        select_value: &str,
        condition: ElementCondition,
        condition_para: &str,
        success_message: &str,
        fail_message: &str,
    ) -> Result<(), RunnerError> {
        let element = self.optional_element(strategy, select_value)?;
        let para = self.resolve(condition_para);
        let (satisfied, explanation) = self.evaluate_condition(index, element, condition, &para)?;
        if satisfied {
            let message = self.resolve(success_message);
            info!(step = index + 1, detail = %message, "condition satisfied");
            Ok(())
        } else {
            let message = self.resolve(fail_message);
            Err(RunnerError::at_step(
                ErrorKind::ConditionNotSatisfied,
                index,
                format!("{message} ({explanation})"),
            ))
        }
    }

    fn scroll_offsets(direction: ws_core::ScrollDirection, value: i64) -> (i64, i64) {
        match direction {
            ws_core::ScrollDirection::Up => (0, -value),
            ws_core::ScrollDirection::Down => (0, value),
            ws_core::ScrollDirection::Left => (-value, 0),
            ws_core::ScrollDirection::Right => (value, 0),
        }
    }

    fn execute_scroll_window(
        &mut self,
        direction: ws_core::ScrollDirection,
        value: i64,
        wait_time: u64,
    ) -> Result<(), RunnerError> {
        let (dx, dy) = Self::scroll_offsets(direction, value);
        self.session.scroll_window(dx, dy)?;
        if wait_time > 0 {
            self.session.sleep(Duration::from_secs(wait_time));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_scroll_overflow_div(
        &mut self,
        index: usize,
        strategy: LocatorStrategy,
        select_value: &str,
        direction: ws_core::ScrollDirection,
        value: i64,
        wait_time: u64,
    ) -> Result<(), RunnerError> {
        let (element, _) = self.require_element(index, strategy, select_value)?;
        let (dx, dy) = Self::scroll_offsets(direction, value);
        self.session.scroll_element(element, dx, dy)?;
        if wait_time > 0 {
            self.session.sleep(Duration::from_secs(wait_time));
        }
        Ok(())
    }

    fn execute_move_to_element(
        &mut self,
        index: usize,
        strategy: LocatorStrategy,
        select_value: &str,
        wait_time: u64,
    ) -> Result<(), RunnerError> {
        let (element, _) = self.require_element(index, strategy, select_value)?;
        self.session.move_to_element(element)?;
        if wait_time > 0 {
            self.session.sleep(Duration::from_secs(wait_time));
        }
        Ok(())
    }

    fn execute_programming_pause(&mut self, index: usize, wait_time: u64) -> Result<(), RunnerError> {
        info!(step = index + 1, wait_time, "pausing for manual operation");
        self.pause_gate.pause();
        if !self.pause_gate.wait_released(Duration::from_secs(wait_time)) {
            return Err(RunnerError::at_step(
                ErrorKind::ElementWaitTimeout,
                index,
                format!("waiting for pause timed out after {wait_time} seconds."),
            ));
        }
        Ok(())
    }

    fn execute_add_new_tab_page(&mut self, url: &str) -> Result<(), RunnerError> {
        let url = self.resolve(url);
        self.session.open_tab(&url)?;
        Ok(())
    }

    fn execute_switch_to_tab_page(&mut self, index: usize, tab: usize) -> Result<(), RunnerError> {
        let count = self.session.tab_count()?;
        if tab >= count {
            return Err(RunnerError::at_step(
                ErrorKind::ElementNotFound,
                index,
                format!("tab index {tab} does not exist"),
            ));
        }
        self.session.switch_tab(tab)?;
        Ok(())
    }

    fn execute_close_tab_page(&mut self, index: usize, tab: usize) -> Result<(), RunnerError> {
        let count = self.session.tab_count()?;
        if tab >= count {
            return Err(RunnerError::at_step(
                ErrorKind::ElementNotFound,
                index,
                format!("tab index {tab} does not exist"),
            ));
        }
        self.session.switch_tab(tab)?;
        self.session.close_current_tab()?;
        if self.session.tab_count()? > 0 {
            self.session.switch_tab(0)?;
        }
        Ok(())
    }

    fn execute_raise_alert(&mut self, information: &str, alert_time: u64) -> Result<(), RunnerError> {
        let text = self.resolve(information);
        self.session.show_alert(&text)?;
        for _ in 0..alert_time {
            if !self.session.alert_open()? {
                return Ok(());
            }
            self.session.sleep(Duration::from_secs(1));
        }
        // Dismissal may race the user closing it by hand.
        let _ = self.session.accept_alert();
        Ok(())
    }

    fn execute_take_screenshot(&mut self, file_name: &str) -> Result<(), RunnerError> {
        let file_name = self.resolve(file_name);
        self.session.save_screenshot(std::path::Path::new(&file_name))?;
        Ok(())
    }

    fn execute_fetch_entire_page(&mut self, index: usize, file_name: &str) -> Result<(), RunnerError> {
        let file_name = self.resolve(file_name);
        let source = self.session.page_source()?;
        std::fs::write(&file_name, source).map_err(|cause| {
            RunnerError::at_step(
                ErrorKind::Io,
                index,
                format!("can not write page source to \"{file_name}\": {cause}"),
            )
        })?;
        Ok(())
    }
}
