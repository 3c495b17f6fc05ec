use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FIELD_ISSUES_MESSAGE: &str = "We spotted some issues with the information you entered. \
Please correct the fields marked in red and submit again. Thank you.";
pub const INTERNAL_ERROR_MESSAGE: &str = "You stumbled upon a major logic error on the site. \
We have been notified and have started working on fixing it. Please accept our apologies.";

/// Error marker for one form field, scoped by the repeated records containing it.
///
/// `scope` reads outermost first, e.g. `["applicant-0", "employee-1", "incomes-0"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoration {
    pub scope: Vec<String>,
    pub field: String,
    pub messages: Vec<String>,
}

impl Decoration {
    /// Dotted path such as `applicant-0.employee-1.amount`.
    pub fn path(&self) -> String {
        let mut parts = self.scope.clone();
        parts.push(self.field.clone());
        parts.join(".")
    }
}

/// Page-level message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Banner {
    FieldIssues,
    Transport(String),
    Internal,
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::FieldIssues => FIELD_ISSUES_MESSAGE,
            Banner::Transport(detail) => detail,
            Banner::Internal => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// What a rejected submission means for the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub banner: Banner,
    pub decorations: Vec<Decoration>,
}

impl ErrorReport {
    /// Reads a backend error body.
    ///
    /// Per-applicant field errors win; otherwise a 500 gets the apology and any
    /// other status shows the server's detail.
    pub fn from_response(status: u16, body: &Value) -> Self {
        if let Some(applicants) = body.get("applicants").and_then(Value::as_array) {
            let mut decorations = Vec::new();
            for (idx, errors) in applicants.iter().enumerate() {
                let mut scope = vec![format!("applicant-{idx}")];
                collect(&mut scope, errors, &mut decorations);
            }
            return Self {
                banner: Banner::FieldIssues,
                decorations,
            };
        }

        let banner = if status == 500 {
            Banner::Internal
        } else {
            Banner::Transport(detail(status, body))
        };
        Self {
            banner,
            decorations: Vec::new(),
        }
    }

    pub fn has_field_errors(&self) -> bool {
        !self.decorations.is_empty()
    }

    pub fn messages_for(&self, path: &str) -> Option<&[String]> {
        self.decorations
            .iter()
            .find(|decoration| decoration.path() == path)
            .map(|decoration| decoration.messages.as_slice())
    }
}

fn collect(scope: &mut Vec<String>, errors: &Value, out: &mut Vec<Decoration>) {
    let Some(fields) = errors.as_object() else {
        return;
    };
    for (attr, value) in fields {
        match value {
            Value::Array(items) if items.first().is_some_and(Value::is_string) => {
                out.push(Decoration {
                    scope: scope.clone(),
                    field: attr.clone(),
                    messages: items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                });
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    scope.push(format!("{attr}-{idx}"));
                    collect(scope, item, out);
                    scope.pop();
                }
            }
            other => {
                scope.push(attr.clone());
                collect(scope, other, out);
                scope.pop();
            }
        }
    }
}

fn detail(status: u16, body: &Value) -> String {
    match body {
        Value::Object(map) => map
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        _ => format!("request failed with status {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn walks_nested_applicant_errors() {
        let body = json!({
            "applicants": [
                {},
                {
                    "email": ["Enter a valid email address."],
                    "employee": [
                        {},
                        {"incomes": [{"amount": ["Must be positive."]}]}
                    ],
                    "student_status": {"current": ["Required."]}
                }
            ]
        });
        let report = ErrorReport::from_response(400, &body);

        assert_eq!(report.banner, Banner::FieldIssues);
        assert_eq!(report.decorations.len(), 3);
        assert_eq!(
            report.messages_for("applicant-1.email"),
            Some(&["Enter a valid email address.".to_string()][..])
        );
        assert!(report
            .messages_for("applicant-1.employee-1.incomes-0.amount")
            .is_some());
        assert!(report
            .messages_for("applicant-1.student_status.current")
            .is_some());
    }

    #[test]
    fn server_failures_get_banners() {
        let internal = ErrorReport::from_response(500, &json!({"detail": "boom"}));
        assert_eq!(internal.banner, Banner::Internal);
        assert_eq!(internal.banner.message(), INTERNAL_ERROR_MESSAGE);

        let forbidden = ErrorReport::from_response(403, &json!({"detail": "Not allowed."}));
        assert_eq!(forbidden.banner, Banner::Transport("Not allowed.".to_string()));
        assert!(!forbidden.has_field_errors());

        let empty = ErrorReport::from_response(404, &Value::Null);
        assert_eq!(empty.banner.message(), "request failed with status 404");
    }
}
