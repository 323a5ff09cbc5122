use super::*;

impl StepRunner {
    /// Runs one named action to completion: validate its block structure,
    /// open the start page, then drive the program counter until it walks
    /// off the end of the list or a step fails.
    pub fn run(&mut self, initial_url: &str, action_name: &str) -> Result<(), RunnerError> {
        info!(action = action_name, url = initial_url, "starting action");
        let steps = self.actions.get(action_name).cloned().ok_or_else(|| {
            RunnerError::new(
                ErrorKind::ScriptActionNotFound,
                format!("Action '{action_name}' not found in action list."),
            )
        })?;
        self.block_index = check_logic_statements(&steps)?;
        self.block_stack.clear();
        self.pc = 0;
        self.step_count = 0;

        let url = self.resolve(initial_url);
        self.session.navigate(&url)?;

        while self.pc < steps.len() {
            let index = self.pc;
            self.execute_step(&steps[index], index)?;
            debug!(step = index + 1, action = steps[index].action_name(), "step done");
            self.step_count += 1;
            if self.step_count > self.max_step_count {
                return Err(RunnerError::new(
                    ErrorKind::ExceedMaxStepCount,
                    format!(
                        "The number of steps exceeds the maximum value of {}, please check your json file to avoid an infinite loop",
                        self.max_step_count
                    ),
                ));
            }
            // Jump targets are pre-decremented, so the uniform advance below
            // lands on them; wrapping_add pairs with the wrapping_sub used
            // for a loop header at index 0.
            self.pc = self.pc.wrapping_add(1);
        }
        info!(action = action_name, steps = self.step_count, "action finished");
        Ok(())
    }
}
