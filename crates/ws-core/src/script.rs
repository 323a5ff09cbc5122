use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    CheckboxMethod, DriverConfig, ElementCondition, ElementMethod, ForLoopMode, FrameTarget,
    LocatorStrategy, ScrollDirection, SelectMethod, WaitCondition,
};

fn default_retry_interval() -> u64 {
    1
}

fn default_pause_wait() -> u64 {
    10
}

fn default_alert_time() -> u64 {
    5
}

fn default_blank_url() -> String {
    "about:blank".to_string()
}

fn default_success_message() -> String {
    "Default success msg.".to_string()
}

fn default_fail_message() -> String {
    "Default fail msg.".to_string()
}

/// One step record. The `action` field of the JSON document selects the
/// variant; an unknown discriminator or field value fails deserialization,
/// so the whole step list is rejected at load time, before any execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Step {
    #[serde(rename_all = "camelCase")]
    FindElement {
        select: LocatorStrategy,
        #[serde(default)]
        select_value: String,
        method: ElementMethod,
        #[serde(default)]
        method_para: String,
        #[serde(default)]
        retry_count: u32,
        #[serde(default = "default_retry_interval")]
        retry_interval: u64,
    },
    #[serde(rename_all = "camelCase")]
    WaitUntil {
        condition: WaitCondition,
        #[serde(default)]
        wait_time: u64,
        #[serde(default)]
        select: Option<LocatorStrategy>,
        #[serde(default)]
        select_value: String,
    },
    GoToUrl {
        url: String,
    },
    #[serde(rename_all = "camelCase")]
    FindSelect {
        select: LocatorStrategy,
        #[serde(default)]
        select_value: String,
        method: SelectMethod,
        #[serde(default)]
        method_para: String,
    },
    #[serde(rename_all = "camelCase")]
    FindCheckbox {
        select: LocatorStrategy,
        #[serde(default)]
        select_value: String,
        method: CheckboxMethod,
    },
    #[serde(rename_all = "camelCase")]
    SwitchToIframe {
        target: FrameTarget,
        #[serde(default)]
        select: Option<LocatorStrategy>,
        #[serde(default)]
        select_value: String,
    },
    #[serde(rename_all = "camelCase")]
    IsElementSatisfyCondition {
        #[serde(default)]
        select: Option<LocatorStrategy>,
        #[serde(default)]
        select_value: String,
        condition: ElementCondition,
        #[serde(default)]
        condition_para: String,
        #[serde(default = "default_success_message")]
        success_message: String,
        #[serde(default = "default_fail_message")]
        fail_message: String,
    },
    #[serde(rename_all = "camelCase")]
    ScrollWindow {
        direction: ScrollDirection,
        scroll_value: i64,
        #[serde(default)]
        wait_time: u64,
    },
    #[serde(rename_all = "camelCase")]
    ScrollOverflowDiv {
        select: LocatorStrategy,
        #[serde(default)]
        select_value: String,
        direction: ScrollDirection,
        scroll_value: i64,
        #[serde(default)]
        wait_time: u64,
    },
    #[serde(rename_all = "camelCase")]
    MoveToElement {
        select: LocatorStrategy,
        #[serde(default)]
        select_value: String,
        #[serde(default)]
        wait_time: u64,
    },
    #[serde(rename_all = "camelCase")]
    If {
        #[serde(default)]
        select: Option<LocatorStrategy>,
        #[serde(default)]
        select_value: String,
        condition: ElementCondition,
        #[serde(default)]
        condition_para: String,
    },
    Else,
    EndIf,
    #[serde(rename_all = "camelCase")]
    ForLoop {
        method: ForLoopMode,
        #[serde(default)]
        method_para: String,
    },
    EndForLoop,
    #[serde(rename_all = "camelCase")]
    WhileLoop {
        #[serde(default)]
        select: Option<LocatorStrategy>,
        #[serde(default)]
        select_value: String,
        condition: ElementCondition,
        #[serde(default)]
        condition_para: String,
    },
    EndWhileLoop,
    #[serde(rename_all = "camelCase")]
    ProgrammingPause {
        #[serde(default = "default_pause_wait")]
        wait_time: u64,
    },
    AddNewTabPage {
        #[serde(default = "default_blank_url")]
        url: String,
    },
    SwitchToTabPage {
        index: usize,
    },
    CloseTabPage {
        index: usize,
    },
    #[serde(rename_all = "camelCase")]
    RaiseAlert {
        #[serde(default)]
        information: String,
        #[serde(default = "default_alert_time")]
        alert_time: u64,
    },
    #[serde(rename_all = "camelCase")]
    TakeScreenshot {
        file_name: String,
    },
    #[serde(rename_all = "camelCase")]
    FetchEntirePage {
        file_name: String,
    },
}

impl Step {
    pub fn action_name(&self) -> &'static str {
        match self {
            Step::FindElement { .. } => "FindElement",
            Step::WaitUntil { .. } => "WaitUntil",
            Step::GoToUrl { .. } => "GoToUrl",
            Step::FindSelect { .. } => "FindSelect",
            Step::FindCheckbox { .. } => "FindCheckbox",
            Step::SwitchToIframe { .. } => "SwitchToIframe",
            Step::IsElementSatisfyCondition { .. } => "IsElementSatisfyCondition",
            Step::ScrollWindow { .. } => "ScrollWindow",
            Step::ScrollOverflowDiv { .. } => "ScrollOverflowDiv",
            Step::MoveToElement { .. } => "MoveToElement",
            Step::If { .. } => "If",
            Step::Else => "Else",
            Step::EndIf => "EndIf",
            Step::ForLoop { .. } => "ForLoop",
            Step::EndForLoop => "EndForLoop",
            Step::WhileLoop { .. } => "WhileLoop",
            Step::EndWhileLoop => "EndWhileLoop",
            Step::ProgrammingPause { .. } => "ProgrammingPause",
            Step::AddNewTabPage { .. } => "AddNewTabPage",
            Step::SwitchToTabPage { .. } => "SwitchToTabPage",
            Step::CloseTabPage { .. } => "CloseTabPage",
            Step::RaiseAlert { .. } => "RaiseAlert",
            Step::TakeScreenshot { .. } => "TakeScreenshot",
            Step::FetchEntirePage { .. } => "FetchEntirePage",
        }
    }
}

/// The whole script document: session configuration plus one ordered step
/// list per named action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptFile {
    #[serde(default)]
    pub config: DriverConfig,
    pub actions: BTreeMap<String, Vec<Step>>,
}
