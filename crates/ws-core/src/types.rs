use serde::{Deserialize, Serialize};

/// Element location strategies, matching the `select` field of the script
/// file one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocatorStrategy {
    ById,
    ByName,
    ByXPath,
    ByPartialLinkText,
    ByLinkText,
    ByClassName,
    ByCssSelector,
    ByTagName,
}

/// A resolved locator: strategy plus the (already substituted) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub strategy: LocatorStrategy,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementMethod {
    Click,
    ClickUntilSuccess,
    SendKeys,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectMethod {
    SelectByText,
    SelectByValue,
    SelectByIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckboxMethod {
    Check,
    Uncheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameTarget {
    Frame,
    DefaultContent,
    ParentFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForLoopMode {
    LoopByCount,
    /// Reserved; executes as a no-op placeholder.
    LoopByEach,
}

/// Named predicates shared by `If`, `WhileLoop` and
/// `IsElementSatisfyCondition`. The `TextArea` family compares the `value`
/// attribute, the `Text` family the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementCondition {
    IsElementExist,
    IsElementNotExist,
    ByBoolValue,
    IsTextAreaTextEqual,
    IsTextAreaTextNotEqual,
    IsTextAreaTextContain,
    IsTextAreaTextNotContain,
    IsTextEqual,
    IsTextNotEqual,
    IsTextContain,
    IsTextNotContain,
    IsSelected,
    IsNotSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitCondition {
    BySecond,
    IsElementExist,
    IsElementNotExist,
    IsElementToBeClickable,
}

impl WaitCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitCondition::BySecond => "BySecond",
            WaitCondition::IsElementExist => "IsElementExist",
            WaitCondition::IsElementNotExist => "IsElementNotExist",
            WaitCondition::IsElementToBeClickable => "IsElementToBeClickable",
        }
    }
}

/// One structural block resolved by the validator. The static index keeps one
/// of these per block start as a template; execution clones a fresh copy onto
/// the live stack every time a block is entered (loop counters must never
/// leak across entries), with the single exception of `WhileLoop` re-entry,
/// which reuses the live stack top when its `start_index` matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockDescriptor {
    If {
        start_index: usize,
        end_index: usize,
        else_index: Option<usize>,
    },
    ForLoop {
        start_index: usize,
        end_index: usize,
        mode: ForLoopMode,
        target_iterations: usize,
        current_iteration: usize,
    },
    WhileLoop {
        start_index: usize,
        end_index: usize,
    },
}

impl BlockDescriptor {
    pub fn start_index(&self) -> usize {
        match self {
            BlockDescriptor::If { start_index, .. }
            | BlockDescriptor::ForLoop { start_index, .. }
            | BlockDescriptor::WhileLoop { start_index, .. } => *start_index,
        }
    }

    pub fn end_index(&self) -> usize {
        match self {
            BlockDescriptor::If { end_index, .. }
            | BlockDescriptor::ForLoop { end_index, .. }
            | BlockDescriptor::WhileLoop { end_index, .. } => *end_index,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockDescriptor::If { .. } => "If",
            BlockDescriptor::ForLoop { .. } => "ForLoop",
            BlockDescriptor::WhileLoop { .. } => "WhileLoop",
        }
    }
}

/// Browser-session options carried in the script file's `config` section.
/// Opaque to the interpreter; driver bindings consume it when opening the
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverConfig {
    pub is_headless: bool,
    pub is_in_private: bool,
    pub is_automation_hidden: bool,
    pub user_agent: Option<String>,
    pub browser_size: Option<String>,
    pub user_profile_path: Option<String>,
}
