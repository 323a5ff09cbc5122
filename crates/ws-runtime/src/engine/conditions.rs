use super::*;

impl StepRunner {
    fn element_value_attribute(&mut self, element: ElementHandle) -> Result<String, RunnerError> {
        Ok(self
            .session
            .element_attribute(element, "value")?
            .unwrap_or_default())
    }

    /// Evaluates one named predicate against an (optionally located) element.
    /// Returns the verdict plus a short explanation used when the verdict
    /// has to be reported.
    pub(super) fn evaluate_condition(
        &mut self,
        index: usize,
        element: Option<ElementHandle>,
        condition: ElementCondition,
        para: &str,
    ) -> Result<(bool, String), RunnerError> {
        match condition {
            ElementCondition::IsElementExist => Ok(match element {
                Some(_) => (true, "Element exists".to_string()),
                None => (false, "Element does not exist".to_string()),
            }),
            ElementCondition::IsElementNotExist => Ok(match element {
                Some(_) => (false, "Element exists".to_string()),
                None => (true, "Element does not exist".to_string()),
            }),
            ElementCondition::ByBoolValue => {
                let value = para.trim().to_ascii_lowercase().parse::<bool>().map_err(|_| {
                    RunnerError::at_step(
                        ErrorKind::InvalidConditionValue,
                        index,
                        format!("condition para \"{para}\" is not a valid bool"),
                    )
                })?;
                Ok((value, format!("Bool value is {value}")))
            }
            ElementCondition::IsTextAreaTextEqual
            | ElementCondition::IsTextAreaTextNotEqual
            | ElementCondition::IsTextAreaTextContain
            | ElementCondition::IsTextAreaTextNotContain => {
                let Some(element) = element else {
                    return Ok((false, "Element does not exist".to_string()));
                };
                let value = self.element_value_attribute(element)?;
                Ok(Self::compare_text(condition, &value, para, "attribute"))
            }
            ElementCondition::IsTextEqual
            | ElementCondition::IsTextNotEqual
            | ElementCondition::IsTextContain
            | ElementCondition::IsTextNotContain => {
                let Some(element) = element else {
                    return Ok((false, "Element does not exist".to_string()));
                };
                let text = self.session.element_text(element)?;
                Ok(Self::compare_text(condition, &text, para, "text"))
            }
            ElementCondition::IsSelected => {
                let Some(element) = element else {
                    return Ok((false, "Element does not exist".to_string()));
                };
                Ok(match self.session.is_selected(element)? {
                    true => (true, "Element is selected".to_string()),
                    false => (false, "Element is not selected".to_string()),
                })
            }
            ElementCondition::IsNotSelected => {
                let Some(element) = element else {
                    return Ok((false, "Element does not exist".to_string()));
                };
                Ok(match self.session.is_selected(element)? {
                    true => (false, "Element is selected".to_string()),
                    false => (true, "Element is not selected".to_string()),
                })
            }
        }
    }

    fn compare_text(
        condition: ElementCondition,
        actual: &str,
        expected: &str,
        what: &str,
    ) -> (bool, String) {
        match condition {
            ElementCondition::IsTextAreaTextEqual | ElementCondition::IsTextEqual => {
                match actual == expected {
                    true => (true, format!("Element {what} is equal to {expected}")),
                    false => (false, format!("Element {what} is not equal to {expected}")),
                }
            }
            ElementCondition::IsTextAreaTextNotEqual | ElementCondition::IsTextNotEqual => {
                match actual != expected {
                    true => (true, format!("Element {what} is not equal to {expected}")),
                    false => (false, format!("Element {what} is equal to {expected}")),
                }
            }
            ElementCondition::IsTextAreaTextContain | ElementCondition::IsTextContain => {
                match actual.contains(expected) {
                    true => (true, format!("Element {what} contains {expected}")),
                    false => (false, format!("Element {what} does not contain {expected}")),
                }
            }
            ElementCondition::IsTextAreaTextNotContain | ElementCondition::IsTextNotContain => {
                match actual.contains(expected) {
                    true => (false, format!("Element {what} contains {expected}")),
                    false => (true, format!("Element {what} does not contain {expected}")),
                }
            }
            _ => (false, format!("unsupported comparison on {what}")),
        }
    }
}
