use crate::{config::ScrubConfig, snapshot::ExceptionSnapshot};
use error_common::{ArgValue, Exception, StackFrame};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Replaces sensitive argument values in exception traces
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
    exceptions: BTreeSet<String>,
    /// Sensitive value -> lookup key
    keys_by_value: HashMap<String, String>,
}

impl Scrubber {
    pub fn new(config: &ScrubConfig) -> Self {
        let mut keys_by_value = HashMap::new();
        for (key, value) in &config.parameters {
            // Empty values would match every empty argument
            if value.is_empty() {
                continue;
            }
            keys_by_value
                .entry(value.clone())
                .or_insert_with(|| key.clone());
        }

        Self {
            exceptions: config.exceptions.clone(),
            keys_by_value,
        }
    }

    pub fn applies_to(&self, exception: &Exception) -> bool {
        self.exceptions.contains(exception.class())
    }

    /// Flatten and scrub the exception if its class is configured for
    /// scrubbing; `None` means it is reported unchanged.
    pub fn scrub(&self, exception: &Exception) -> Option<ExceptionSnapshot> {
        if !self.applies_to(exception) {
            return None;
        }

        let mut replaced = 0;
        let snapshot = self.scrub_snapshot(ExceptionSnapshot::flatten(exception), &mut replaced);
        debug!(
            exception_class = exception.class(),
            replaced_values = replaced,
            "Scrubbed exception before reporting"
        );
        Some(snapshot)
    }

    fn scrub_snapshot(
        &self,
        mut snapshot: ExceptionSnapshot,
        replaced: &mut usize,
    ) -> ExceptionSnapshot {
        let trace = std::mem::take(&mut snapshot.trace)
            .into_iter()
            .map(|frame| self.scrub_frame(frame, replaced))
            .collect();
        snapshot.previous = snapshot
            .previous
            .take()
            .map(|previous| Box::new(self.scrub_snapshot(*previous, replaced)));

        snapshot.with_trace(trace)
    }

    fn scrub_frame(&self, mut frame: StackFrame, replaced: &mut usize) -> StackFrame {
        for value in frame.args.values_mut() {
            self.scrub_value(value, replaced);
        }
        frame
    }

    fn scrub_value(&self, value: &mut ArgValue, replaced: &mut usize) {
        match value {
            ArgValue::String(text) => {
                if let Some(key) = self.keys_by_value.get(text.as_str()) {
                    *text = format!("%{}%", key);
                    *replaced += 1;
                }
            }
            ArgValue::List(items) => {
                for item in items {
                    self.scrub_value(item, replaced);
                }
            }
            ArgValue::Map(entries) => {
                for item in entries.values_mut() {
                    self.scrub_value(item, replaced);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn login_exception() -> Exception {
        Exception::new("AuthenticationException", "Bad credentials")
            .at("/srv/app/Security.php", 31)
            .with_frame(
                StackFrame::new("login")
                    .at("/srv/app/Controller.php", 10)
                    .with_arg("username", "alice")
                    .with_arg("password", "secret123")
                    .with_arg("attempt", ArgValue::Int(3)),
            )
            .with_frame(
                StackFrame::new("handle").with_arg(
                    "payload",
                    ArgValue::Map(BTreeMap::from([
                        ("token".to_string(), ArgValue::from("tok-42")),
                        (
                            "history".to_string(),
                            ArgValue::List(vec![ArgValue::from("secret123"), ArgValue::Null]),
                        ),
                    ])),
                ),
            )
    }

    fn scrubber() -> Scrubber {
        Scrubber::new(
            &ScrubConfig::new()
                .with_exception("AuthenticationException")
                .with_parameter("password", "secret123")
                .with_parameter("api_token", "tok-42"),
        )
    }

    #[test]
    fn test_unlisted_exception_is_left_alone() {
        let exception = Exception::new("LogicException", "secret123");
        assert!(scrubber().scrub(&exception).is_none());
    }

    #[test]
    fn test_replaces_matching_strings_with_key_placeholder() {
        let snapshot = scrubber().scrub(&login_exception()).unwrap();

        let login = &snapshot.trace[0];
        assert_eq!(login.args["password"], ArgValue::from("%password%"));
        assert_eq!(login.args["username"], ArgValue::from("alice"));
        assert_eq!(login.args["attempt"], ArgValue::Int(3));
    }

    #[test]
    fn test_walks_nested_arguments() {
        let snapshot = scrubber().scrub(&login_exception()).unwrap();

        let expected = ArgValue::Map(BTreeMap::from([
            ("token".to_string(), ArgValue::from("%api_token%")),
            (
                "history".to_string(),
                ArgValue::List(vec![ArgValue::from("%password%"), ArgValue::Null]),
            ),
        ]));
        assert_eq!(snapshot.trace[1].args["payload"], expected);
    }

    #[test]
    fn test_preserves_identity_and_frames() {
        let original = login_exception();
        let snapshot = scrubber().scrub(&original).unwrap();

        assert_eq!(snapshot.class, original.class());
        assert_eq!(snapshot.message, original.message());
        assert_eq!(snapshot.file, original.file());
        assert_eq!(snapshot.line, original.line());
        assert_eq!(snapshot.trace.len(), original.trace().len());
        assert_eq!(snapshot.trace[0].file.as_deref(), Some("/srv/app/Controller.php"));

        // Input is untouched
        assert_eq!(original.trace()[0].args["password"], ArgValue::from("secret123"));
    }

    #[test]
    fn test_partial_matches_are_not_scrubbed() {
        let exception = Exception::new("AuthenticationException", "x")
            .with_frame(StackFrame::new("f").with_arg("note", "my secret123 here"));

        let snapshot = scrubber().scrub(&exception).unwrap();
        assert_eq!(snapshot.trace[0].args["note"], ArgValue::from("my secret123 here"));
    }

    #[test]
    fn test_positional_values_use_index_key() {
        let scrubber = Scrubber::new(
            &ScrubConfig::new()
                .with_exception("E")
                .with_parameter_values(["first", "second"]),
        );
        let exception = Exception::new("E", "m").with_frame(
            StackFrame::new("f")
                .with_arg("a", "first")
                .with_arg("b", "second"),
        );

        let snapshot = scrubber.scrub(&exception).unwrap();
        assert_eq!(snapshot.trace[0].args["a"], ArgValue::from("%0%"));
        assert_eq!(snapshot.trace[0].args["b"], ArgValue::from("%1%"));
    }

    #[test]
    fn test_empty_sensitive_value_never_matches() {
        let scrubber = Scrubber::new(
            &ScrubConfig::new()
                .with_exception("E")
                .with_parameter("blank", ""),
        );
        let exception = Exception::new("E", "m").with_frame(StackFrame::new("f").with_arg("a", ""));

        let snapshot = scrubber.scrub(&exception).unwrap();
        assert_eq!(snapshot.trace[0].args["a"], ArgValue::from(""));
    }

    #[test]
    fn test_previous_exceptions_are_scrubbed() {
        let exception = Exception::new("E", "outer").with_previous(
            Exception::new("Inner", "inner")
                .with_frame(StackFrame::new("connect").with_arg("dsn", "tok-42")),
        );
        let scrubber = Scrubber::new(
            &ScrubConfig::new()
                .with_exception("E")
                .with_parameter("api_token", "tok-42"),
        );

        let snapshot = scrubber.scrub(&exception).unwrap();
        let previous = snapshot.previous.unwrap();
        assert_eq!(previous.trace[0].args["dsn"], ArgValue::from("%api_token%"));
    }
}
