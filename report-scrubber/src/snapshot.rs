//! Flattened exceptions
//!
//! An [`ExceptionSnapshot`] is the transport-safe copy of an exception that
//! is sent instead of the original once scrubbing applies. Object arguments
//! are reduced to their class so live object graphs never leave the process.

use error_common::{ArgValue, Exception, StackFrame};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionSnapshot {
    pub class: String,
    pub message: String,
    pub code: i64,
    pub status_code: Option<u16>,
    pub file: String,
    pub line: u32,
    pub trace: Vec<StackFrame>,
    pub previous: Option<Box<ExceptionSnapshot>>,
}

impl ExceptionSnapshot {
    pub fn flatten(exception: &Exception) -> Self {
        Self {
            class: exception.class().to_string(),
            message: exception.message().to_string(),
            code: exception.code(),
            status_code: exception.status_code(),
            file: exception.file().to_string(),
            line: exception.line(),
            trace: exception.trace().iter().map(flatten_frame).collect(),
            previous: exception.previous().map(|previous| Box::new(Self::flatten(previous))),
        }
    }

    /// Replace the trace; file and line stay those of the exception
    pub fn with_trace(mut self, trace: Vec<StackFrame>) -> Self {
        self.trace = trace;
        self
    }
}

impl From<&Exception> for ExceptionSnapshot {
    fn from(exception: &Exception) -> Self {
        Self::flatten(exception)
    }
}

fn flatten_frame(frame: &StackFrame) -> StackFrame {
    StackFrame {
        function: frame.function.clone(),
        class: frame.class.clone(),
        file: frame.file.clone(),
        line: frame.line,
        args: frame
            .args
            .iter()
            .map(|(name, value)| (name.clone(), flatten_value(value)))
            .collect(),
    }
}

fn flatten_value(value: &ArgValue) -> ArgValue {
    match value {
        ArgValue::Object { class, .. } => ArgValue::Object {
            class: class.clone(),
            fields: BTreeMap::new(),
        },
        ArgValue::List(items) => ArgValue::List(items.iter().map(flatten_value).collect()),
        ArgValue::Map(entries) => ArgValue::Map(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), flatten_value(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}
