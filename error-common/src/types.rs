use crate::levels::ErrorLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;

/// Argument value captured in a stack frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
    /// Live object graph; flattening keeps only the class
    Object {
        class: String,
        fields: BTreeMap<String, ArgValue>,
    },
}

impl ArgValue {
    pub fn object<C: Into<String>>(class: C) -> Self {
        ArgValue::Object {
            class: class.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<Vec<ArgValue>> for ArgValue {
    fn from(values: Vec<ArgValue>) -> Self {
        ArgValue::List(values)
    }
}

/// One frame of a captured stack trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackFrame {
    pub function: String,
    pub class: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    /// Arguments keyed by parameter name
    pub args: BTreeMap<String, ArgValue>,
}

impl StackFrame {
    pub fn new<F: Into<String>>(function: F) -> Self {
        Self {
            function: function.into(),
            class: None,
            file: None,
            line: None,
            args: BTreeMap::new(),
        }
    }

    pub fn with_class<C: Into<String>>(mut self, class: C) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn at<F: Into<String>>(mut self, file: F, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn with_arg<N: Into<String>, V: Into<ArgValue>>(mut self, name: N, value: V) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

/// A thrown exception, as seen by the reporting pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exception {
    class: String,
    message: String,
    code: i64,
    status_code: Option<u16>,
    file: String,
    line: u32,
    trace: Vec<StackFrame>,
    previous: Option<Box<Exception>>,
}

impl Exception {
    pub fn new<C: Into<String>, M: Into<String>>(class: C, message: M) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
            code: 0,
            status_code: None,
            file: String::new(),
            line: 0,
            trace: Vec::new(),
            previous: None,
        }
    }

    /// Build an exception from a Rust error value.
    ///
    /// The class is the error's type name, the location is the caller's, and
    /// the `source()` chain becomes the `previous` chain.
    #[track_caller]
    pub fn from_error<E: StdError + 'static>(error: &E) -> Self {
        let location = Location::caller();
        let mut exception = Self::new(std::any::type_name::<E>(), error.to_string())
            .at(location.file(), location.line());
        exception.previous = error.source().map(|source| Box::new(Self::from_source(source)));
        exception
    }

    fn from_source(error: &(dyn StdError + 'static)) -> Self {
        let mut exception = Self::new("std::error::Error", error.to_string());
        exception.previous = error.source().map(|source| Box::new(Self::from_source(source)));
        exception
    }

    pub fn at<F: Into<String>>(mut self, file: F, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Mark this exception as the result of an HTTP error response
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_frame(mut self, frame: StackFrame) -> Self {
        self.trace.push(frame);
        self
    }

    pub fn with_trace(mut self, trace: Vec<StackFrame>) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_previous(mut self, previous: Exception) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }

    /// Type identifier used for scrub matching
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn trace(&self) -> &[StackFrame] {
        &self.trace
    }

    pub fn previous(&self) -> Option<&Exception> {
        self.previous.as_deref()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} in {}:{}", self.class, self.message, self.file, self.line)
    }
}

/// A level-tagged runtime error (warning, notice, deprecation, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeError {
    level: ErrorLevel,
    message: String,
    file: String,
    line: u32,
}

impl RuntimeError {
    pub const CLASS: &'static str = "RuntimeError";

    pub fn new<M: Into<String>, F: Into<String>>(
        level: ErrorLevel,
        message: M,
        file: F,
        line: u32,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            file: file.into(),
            line,
        }
    }

    pub fn level(&self) -> ErrorLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// Anything the reporter can be asked to forward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportableError {
    Exception(Exception),
    RuntimeError(RuntimeError),
}

impl ReportableError {
    pub fn class(&self) -> &str {
        match self {
            ReportableError::Exception(exception) => exception.class(),
            ReportableError::RuntimeError(_) => RuntimeError::CLASS,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ReportableError::Exception(exception) => exception.message(),
            ReportableError::RuntimeError(error) => error.message(),
        }
    }

    pub fn file(&self) -> &str {
        match self {
            ReportableError::Exception(exception) => exception.file(),
            ReportableError::RuntimeError(error) => error.file(),
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            ReportableError::Exception(exception) => exception.line(),
            ReportableError::RuntimeError(error) => error.line(),
        }
    }

    /// HTTP status carried by an exception, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ReportableError::Exception(exception) => exception.status_code(),
            ReportableError::RuntimeError(_) => None,
        }
    }
}

impl From<Exception> for ReportableError {
    fn from(exception: Exception) -> Self {
        ReportableError::Exception(exception)
    }
}

impl From<RuntimeError> for ReportableError {
    fn from(error: RuntimeError) -> Self {
        ReportableError::RuntimeError(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("disk unavailable")
        }
    }

    impl StdError for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("upload failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_error_walks_source_chain() {
        let exception = Exception::from_error(&Outer(Inner));

        assert!(exception.class().ends_with("Outer"));
        assert_eq!(exception.message(), "upload failed");
        assert!(exception.file().ends_with("types.rs"));
        assert!(exception.line() > 0);

        let previous = exception.previous().unwrap();
        assert_eq!(previous.message(), "disk unavailable");
        assert!(previous.previous().is_none());
    }

    #[test]
    fn test_reportable_error_accessors() {
        let runtime = ReportableError::from(RuntimeError::new(
            ErrorLevel::WARNING,
            "disk full",
            "/tmp/x",
            42,
        ));
        assert_eq!(runtime.class(), RuntimeError::CLASS);
        assert_eq!(runtime.message(), "disk full");
        assert_eq!(runtime.status_code(), None);

        let http = ReportableError::from(
            Exception::new("NotFoundHttpException", "No route").with_status_code(404),
        );
        assert_eq!(http.status_code(), Some(404));
    }
}
