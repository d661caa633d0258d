// Copyright 2017 Dmitry Tantsur <divius.inside@gmail.com>
// Copyright 2026 The mos-tests Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JSON structures and protocol bits for the Orchestration API.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use super::super::common::protocol::{deser_optional_timestamp, Ref};
use super::super::common::ResourceStatus;
use super::super::Error;

protocol_enum! {
    #[doc = "Action part of a stack status."]
    enum StackAction = Unknown {
        Init = "INIT",
        Create = "CREATE",
        Delete = "DELETE",
        Update = "UPDATE",
        Rollback = "ROLLBACK",
        Suspend = "SUSPEND",
        Resume = "RESUME",
        Adopt = "ADOPT",
        Snapshot = "SNAPSHOT",
        Check = "CHECK",
        Restore = "RESTORE",
        Unknown = "UNKNOWN"
    }
}

protocol_enum! {
    #[doc = "State part of a stack status."]
    enum StackState = Unknown {
        InProgress = "IN_PROGRESS",
        Complete = "COMPLETE",
        Failed = "FAILED",
        Unknown = "UNKNOWN"
    }
}

/// Status of a stack, for example `CREATE_IN_PROGRESS`.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub struct StackStatus {
    pub action: StackAction,
    pub state: StackState,
}

impl StackStatus {
    /// Stack has been created.
    pub const CREATE_COMPLETE: StackStatus = StackStatus::new(StackAction::Create, StackState::Complete);
    /// Stack creation has failed.
    pub const CREATE_FAILED: StackStatus = StackStatus::new(StackAction::Create, StackState::Failed);
    /// Stack has been deleted.
    pub const DELETE_COMPLETE: StackStatus = StackStatus::new(StackAction::Delete, StackState::Complete);
    /// Stack update has finished.
    pub const UPDATE_COMPLETE: StackStatus = StackStatus::new(StackAction::Update, StackState::Complete);

    /// Combine an action and a state.
    pub const fn new(action: StackAction, state: StackState) -> StackStatus {
        StackStatus { action, state }
    }
}

impl Default for StackStatus {
    fn default() -> StackStatus {
        StackStatus::new(StackAction::Unknown, StackState::Unknown)
    }
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.action, self.state)
    }
}

impl FromStr for StackStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<StackStatus, Error> {
        match s.split_once('_') {
            Some((action, state)) => Ok(StackStatus::new(action.parse()?, state.parse()?)),
            None => {
                warn!("Malformed stack status {:?}", s);
                Ok(StackStatus::default())
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for StackStatus {
    fn deserialize<D>(deserializer: D) -> Result<StackStatus, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: String = serde::Deserialize::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Stack status together with the text it was parsed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportedStackStatus {
    pub parsed: StackStatus,
    pub text: String,
}

impl<'de> serde::Deserialize<'de> for ReportedStackStatus {
    fn deserialize<D>(deserializer: D) -> Result<ReportedStackStatus, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text: String = serde::Deserialize::deserialize(deserializer)?;
        let parsed = text.parse().map_err(serde::de::Error::custom)?;
        Ok(ReportedStackStatus { parsed, text })
    }
}

impl ResourceStatus for StackStatus {
    fn is_in_progress(&self) -> bool {
        self.state == StackState::InProgress
    }

    fn is_deleted(&self) -> bool {
        *self == StackStatus::DELETE_COMPLETE
    }

    fn is_deletion_failed(&self) -> bool {
        self.action == StackAction::Delete && self.state == StackState::Failed
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Stack {
    #[serde(deserialize_with = "deser_optional_timestamp", default)]
    pub creation_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub description: Option<String>,
    pub id: String,
    #[serde(rename = "stack_name")]
    pub name: String,
    #[serde(rename = "stack_status")]
    pub status: ReportedStackStatus,
    #[serde(rename = "stack_status_reason", default)]
    pub status_reason: Option<String>,
    #[serde(deserialize_with = "deser_optional_timestamp", default)]
    pub updated_time: Option<DateTime<FixedOffset>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StackRoot {
    pub stack: Stack,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StacksRoot {
    pub stacks: Vec<Stack>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StackCreate {
    pub stack_name: String,
    pub template: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub parameters: HashMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_mins: Option<u32>,
    pub disable_rollback: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StackCreatedRoot {
    pub stack: Ref,
}

#[cfg(test)]
mod test {
    use super::super::super::common::ResourceStatus;
    use super::{ReportedStackStatus, StackAction, StackState, StackStatus, StacksRoot};

    #[test]
    fn test_stack_status_parse() {
        let status: StackStatus = "CREATE_IN_PROGRESS".parse().unwrap();
        assert_eq!(status.action, StackAction::Create);
        assert_eq!(status.state, StackState::InProgress);
        assert_eq!(status.to_string(), "CREATE_IN_PROGRESS");

        let status: StackStatus = "DELETE_FAILED".parse().unwrap();
        assert_eq!(status.action, StackAction::Delete);
        assert_eq!(status.state, StackState::Failed);
        assert_eq!(status.to_string(), "DELETE_FAILED");
    }

    #[test]
    fn test_stack_status_unknown() {
        let status: StackStatus = "EXPLODE_COMPLETE".parse().unwrap();
        assert_eq!(status.action, StackAction::Unknown);
        assert_eq!(status.state, StackState::Complete);

        let status: StackStatus = "garbage".parse().unwrap();
        assert_eq!(status, StackStatus::default());
        assert!(!status.is_in_progress());
    }

    #[test]
    fn test_reported_status_keeps_text() {
        let status: ReportedStackStatus = serde_json::from_str("\"FOO_COMPLETE\"").unwrap();
        assert_eq!(status.parsed.action, StackAction::Unknown);
        assert_eq!(status.parsed.state, StackState::Complete);
        assert_eq!(status.text, "FOO_COMPLETE");
    }

    #[test]
    fn test_in_progress_ignores_action() {
        for text in &["CREATE_IN_PROGRESS", "UPDATE_IN_PROGRESS", "DELETE_IN_PROGRESS"] {
            let status: StackStatus = text.parse().unwrap();
            assert!(status.is_in_progress(), "{}", text);
        }
        for text in &["CREATE_COMPLETE", "CREATE_FAILED", "ROLLBACK_COMPLETE"] {
            let status: StackStatus = text.parse().unwrap();
            assert!(!status.is_in_progress(), "{}", text);
        }
    }

    #[test]
    fn test_deletion_classification() {
        assert!(StackStatus::DELETE_COMPLETE.is_deleted());
        assert!(!StackStatus::CREATE_COMPLETE.is_deleted());
        let failed: StackStatus = "DELETE_FAILED".parse().unwrap();
        assert!(failed.is_deletion_failed());
        assert!(!StackStatus::CREATE_FAILED.is_deletion_failed());
    }

    #[test]
    fn test_parse_stack_list() {
        let root: StacksRoot = serde_json::from_str(
            r#"{"stacks": [{
                "id": "3095aefc-09fb-4bc7-b1f0-f21a304e864c",
                "stack_name": "simple_stack",
                "stack_status": "CREATE_COMPLETE",
                "stack_status_reason": "Stack CREATE completed successfully",
                "description": "sample stack",
                "creation_time": "2015-03-03T14:08:54Z",
                "updated_time": null,
                "links": [{"href": "http://heat/v1/tenant/stacks/simple_stack/3095", "rel": "self"}]
            }]}"#,
        )
        .unwrap();
        assert_eq!(root.stacks.len(), 1);
        let stack = &root.stacks[0];
        assert_eq!(stack.name, "simple_stack");
        assert_eq!(stack.status.parsed, StackStatus::CREATE_COMPLETE);
        assert_eq!(stack.status.text, "CREATE_COMPLETE");
        assert!(stack.creation_time.is_some());
        assert!(stack.updated_time.is_none());
    }
}
