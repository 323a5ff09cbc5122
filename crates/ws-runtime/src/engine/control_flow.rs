use super::*;

impl StepRunner {
    fn lookup_block_template(&self, index: usize) -> Result<BlockDescriptor, RunnerError> {
        self.block_index.get(&index).cloned().ok_or_else(|| {
            RunnerError::at_step(
                ErrorKind::InternalInvariant,
                index,
                "no block descriptor recorded for this opener",
            )
        })
    }

    fn stack_mismatch(&self, index: usize, closer: &str, expected: &str) -> RunnerError {
        RunnerError::at_step(
            ErrorKind::InternalInvariant,
            index,
            format!(
                "\"{closer}\" executed without an open \"{expected}\" block on top of the control-flow stack"
            ),
        )
    }

    pub(super) fn execute_if(
        &mut self,
        index: usize,
        strategy: Option<LocatorStrategy>,
        select_value: &str,
        condition: ElementCondition,
        condition_para: &str,
    ) -> Result<(), RunnerError> {
        let element = self.optional_element(strategy, select_value)?;
        let para = self.resolve(condition_para);
        let (satisfied, _) = self.evaluate_condition(index, element, condition, &para)?;
        let template = self.lookup_block_template(index)?;
        let BlockDescriptor::If {
            end_index,
            else_index,
            ..
        } = &template
        else {
            return Err(self.stack_mismatch(index, "If", "If"));
        };
        let (end_index, else_index) = (*end_index, *else_index);
        self.block_stack.push(template);
        if satisfied {
            return Ok(());
        }
        // Jump past the branch; the advance in the run loop lands on the
        // first step after the target.
        self.pc = match else_index {
            Some(else_index) => else_index,
            None => end_index - 1,
        };
        Ok(())
    }

    pub(super) fn execute_else(&mut self, index: usize) -> Result<(), RunnerError> {
        // Reached only by falling through the satisfied branch, so the
        // remainder up to EndIf must be skipped.
        let Some(BlockDescriptor::If { end_index, .. }) = self.block_stack.last() else {
            return Err(self.stack_mismatch(index, "Else", "If"));
        };
        self.pc = end_index - 1;
        Ok(())
    }

    pub(super) fn execute_end_if(&mut self, index: usize) -> Result<(), RunnerError> {
        match self.block_stack.pop() {
            Some(BlockDescriptor::If { .. }) => Ok(()),
            _ => Err(self.stack_mismatch(index, "EndIf", "If")),
        }
    }

    pub(super) fn execute_for_loop(
        &mut self,
        index: usize,
        mode: ForLoopMode,
        method_para: &str,
    ) -> Result<(), RunnerError> {
        match mode {
            ForLoopMode::LoopByCount => {
                let para = self.resolve(method_para);
                let target = para.parse::<usize>().map_err(|_| {
                    RunnerError::at_step(
                        ErrorKind::InvalidMethodValue,
                        index,
                        format!("\"{para}\" is not a valid loop count"),
                    )
                })?;
                let template = self.lookup_block_template(index)?;
                let BlockDescriptor::ForLoop {
                    start_index,
                    end_index,
                    ..
                } = template
                else {
                    return Err(self.stack_mismatch(index, "ForLoop", "ForLoop"));
                };
                self.block_stack.push(BlockDescriptor::ForLoop {
                    start_index,
                    end_index,
                    mode,
                    target_iterations: target,
                    current_iteration: 0,
                });
                if target == 0 {
                    self.block_stack.pop();
                    self.pc = end_index;
                }
                Ok(())
            }
            ForLoopMode::LoopByEach => {
                debug!(step = index + 1, "LoopByEach is reserved, skipping body setup");
                let template = self.lookup_block_template(index)?;
                self.block_stack.push(template);
                Ok(())
            }
        }
    }

    pub(super) fn execute_end_for_loop(&mut self, index: usize) -> Result<(), RunnerError> {
        let Some(BlockDescriptor::ForLoop {
            start_index,
            end_index,
            mode,
            target_iterations,
            current_iteration,
        }) = self.block_stack.pop()
        else {
            return Err(self.stack_mismatch(index, "EndForLoop", "ForLoop"));
        };
        match mode {
            ForLoopMode::LoopByCount => {
                let completed = current_iteration + 1;
                if completed < target_iterations {
                    self.block_stack.push(BlockDescriptor::ForLoop {
                        start_index,
                        end_index,
                        mode,
                        target_iterations,
                        current_iteration: completed,
                    });
                    // The advance lands on the first body step; the header is
                    // executed once per block entry, not per iteration.
                    self.pc = start_index;
                }
            }
            ForLoopMode::LoopByEach => {}
        }
        Ok(())
    }

    pub(super) fn execute_while_loop(
        &mut self,
        index: usize,
        strategy: Option<LocatorStrategy>,
        select_value: &str,
        condition: ElementCondition,
        condition_para: &str,
    ) -> Result<(), RunnerError> {
        let element = self.optional_element(strategy, select_value)?;
        let para = self.resolve(condition_para);
        let (satisfied, _) = self.evaluate_condition(index, element, condition, &para)?;
        let template = self.lookup_block_template(index)?;
        let BlockDescriptor::WhileLoop {
            start_index,
            end_index,
        } = &template
        else {
            return Err(self.stack_mismatch(index, "WhileLoop", "WhileLoop"));
        };
        let (start_index, end_index) = (*start_index, *end_index);
        // The header re-runs on every iteration; only the first entry pushes.
        let reentry = matches!(
            self.block_stack.last(),
            Some(BlockDescriptor::WhileLoop { start_index: live, .. }) if *live == start_index
        );
        if !reentry {
            self.block_stack.push(template);
        }
        if !satisfied {
            self.block_stack.pop();
            self.pc = end_index;
        }
        Ok(())
    }

    pub(super) fn execute_end_while_loop(&mut self, index: usize) -> Result<(), RunnerError> {
        let Some(BlockDescriptor::WhileLoop { start_index, .. }) = self.block_stack.last() else {
            return Err(self.stack_mismatch(index, "EndWhileLoop", "WhileLoop"));
        };
        // Back to the header itself so its condition re-runs; wrapping keeps
        // a header at index 0 reachable through the uniform advance.
        self.pc = start_index.wrapping_sub(1);
        Ok(())
    }
}
