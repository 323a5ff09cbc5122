use std::collections::{BTreeMap, HashMap};

use ws_core::{BlockDescriptor, ErrorKind, ForLoopMode, RunnerError, Step};

enum OpenBlock {
    If {
        start_index: usize,
        else_index: Option<usize>,
    },
    ForLoop {
        start_index: usize,
    },
    WhileLoop {
        start_index: usize,
    },
}

impl OpenBlock {
    fn opener_name(&self) -> &'static str {
        match self {
            OpenBlock::If { .. } => "If",
            OpenBlock::ForLoop { .. } => "ForLoop",
            OpenBlock::WhileLoop { .. } => "WhileLoop",
        }
    }

    fn start_index(&self) -> usize {
        match self {
            OpenBlock::If { start_index, .. }
            | OpenBlock::ForLoop { start_index }
            | OpenBlock::WhileLoop { start_index } => *start_index,
        }
    }
}

fn stray_closer(index: usize, closer: &str, opener: &str) -> RunnerError {
    RunnerError::at_step(
        ErrorKind::InvalidLogicDefinition,
        index,
        format!("\"{closer}\" without \"{opener}\", please check your json file"),
    )
}

/// Static scan of one step list. Pairs every block opener with its closer
/// (and an `If` with its optional `Else`) and returns the descriptor map
/// keyed by the opener's index. Loop descriptors carry zeroed counters;
/// execution fills them in when the block is entered.
pub fn check_logic_statements(
    steps: &[Step],
) -> Result<HashMap<usize, BlockDescriptor>, RunnerError> {
    let mut open: Vec<OpenBlock> = Vec::new();
    let mut blocks = HashMap::new();
    for (index, step) in steps.iter().enumerate() {
        match step {
            Step::If { .. } => open.push(OpenBlock::If {
                start_index: index,
                else_index: None,
            }),
            Step::ForLoop { .. } => open.push(OpenBlock::ForLoop { start_index: index }),
            Step::WhileLoop { .. } => open.push(OpenBlock::WhileLoop { start_index: index }),
            Step::Else => match open.last_mut() {
                Some(OpenBlock::If { else_index, .. }) if else_index.is_none() => {
                    *else_index = Some(index);
                }
                _ => return Err(stray_closer(index, "Else", "If")),
            },
            Step::EndIf => match open.pop() {
                Some(OpenBlock::If {
                    start_index,
                    else_index,
                }) => {
                    blocks.insert(
                        start_index,
                        BlockDescriptor::If {
                            start_index,
                            end_index: index,
                            else_index,
                        },
                    );
                }
                other => {
                    return Err(match other {
                        Some(block) => stray_closer(index, "EndIf", block.opener_name()),
                        None => stray_closer(index, "EndIf", "If"),
                    })
                }
            },
            Step::EndForLoop => match open.pop() {
                Some(OpenBlock::ForLoop { start_index }) => {
                    blocks.insert(
                        start_index,
                        BlockDescriptor::ForLoop {
                            start_index,
                            end_index: index,
                            mode: ForLoopMode::LoopByCount,
                            target_iterations: 0,
                            current_iteration: 0,
                        },
                    );
                }
                other => {
                    return Err(match other {
                        Some(block) => stray_closer(index, "EndForLoop", block.opener_name()),
                        None => stray_closer(index, "EndForLoop", "ForLoop"),
                    })
                }
            },
            Step::EndWhileLoop => match open.pop() {
                Some(OpenBlock::WhileLoop { start_index }) => {
                    blocks.insert(
                        start_index,
                        BlockDescriptor::WhileLoop {
                            start_index,
                            end_index: index,
                        },
                    );
                }
                other => {
                    return Err(match other {
                        Some(block) => stray_closer(index, "EndWhileLoop", block.opener_name()),
                        None => stray_closer(index, "EndWhileLoop", "WhileLoop"),
                    })
                }
            },
            _ => {}
        }
    }
    if let Some(block) = open.last() {
        return Err(RunnerError::at_step(
            ErrorKind::UnterminatedBlock,
            block.start_index(),
            "You are missing a closing element in your json definition, please check your json file",
        ));
    }
    Ok(blocks)
}

/// Validates every action of a script file in one pass, for upfront linting.
pub fn check_all_actions(actions: &BTreeMap<String, Vec<Step>>) -> Result<(), RunnerError> {
    for steps in actions.values() {
        check_logic_statements(steps)?;
    }
    Ok(())
}
