//! Task model
//!
//! A small to-do item used by the CLI and as a reference [`Model`]
//! implementation.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::filter::{Filter, FilterFactory, Params};
use crate::model::{Model, ModelError};

/// Current time as unix milliseconds
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Primary key, assigned on create
    #[serde(default)]
    pub key: String,

    pub content: String,

    /// Unix millis
    #[serde(default = "now_millis")]
    pub created_at: u64,

    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// A task created now
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            content: content.into(),
            created_at: now_millis(),
            done: false,
        }
    }
}

/// Partial update for a [`Task`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub created_at: Option<u64>,

    #[serde(default)]
    pub done: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.created_at.is_none() && self.done.is_none()
    }
}

impl Model for Task {
    type Patch = TaskPatch;

    fn validate(&self) -> Result<(), ModelError> {
        if self.content.is_empty() {
            return Err(ModelError::new("task content is empty"));
        }
        if self.created_at > now_millis() {
            return Err(ModelError::new("task is created in the future"));
        }
        Ok(())
    }

    fn make_key(&mut self, sequence: u64) -> String {
        self.key = sequence.to_string();
        self.done = sequence & 1 == 1;
        self.key.clone()
    }

    fn merge(&mut self, patch: TaskPatch) -> Result<(), ModelError> {
        if patch.is_empty() {
            return Err(ModelError::new("task patch has no fields"));
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
        Ok(())
    }
}

/// Filter built from `done` and `q` parameters
///
/// - `done=true` / `done=false` keeps tasks with that flag; other values pass
/// - `q=<text>` keeps tasks whose content contains the text
pub fn task_filter(params: &Params) -> Filter<Task> {
    let done = match params.get("done") {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    };
    let query = params.get("q").map(str::to_owned);

    Box::new(move |task: &Task| {
        done.map_or(true, |done| task.done == done)
            && query.as_deref().map_or(true, |q| task.content.contains(q))
    })
}

/// [`task_filter`] as a factory
pub fn task_filter_factory() -> FilterFactory<Task> {
    Arc::new(task_filter)
}
