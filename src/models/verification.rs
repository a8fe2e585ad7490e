use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::{FunctionError, Result};

/// Wire names of the required fields, in the order reported to clients.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "fromEmail",
    "toEmail",
    "employeeName",
    "officeName",
    "verificationCode",
];

/// Body of a verification-email request.
///
/// Fields are kept as raw JSON so any truthy value is accepted and echoed
/// back unchanged. Absent fields deserialize to `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    #[serde(default)]
    pub from_email: Value,
    #[serde(default)]
    pub to_email: Value,
    #[serde(default)]
    pub employee_name: Value,
    #[serde(default)]
    pub office_name: Value,
    #[serde(default)]
    pub verification_code: Value,
}

impl VerificationRequest {
    /// Parses a raw request body.
    ///
    /// Invalid JSON and a literal `null` are errors. Any other non-object
    /// value carries no fields and yields an empty request.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        match value {
            Value::Null => Err(FunctionError::NullBody),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            _ => Ok(VerificationRequest::default()),
        }
    }

    fn fields(&self) -> [(&'static str, &Value); 5] {
        [
            (REQUIRED_FIELDS[0], &self.from_email),
            (REQUIRED_FIELDS[1], &self.to_email),
            (REQUIRED_FIELDS[2], &self.employee_name),
            (REQUIRED_FIELDS[3], &self.office_name),
            (REQUIRED_FIELDS[4], &self.verification_code),
        ]
    }

    /// Names of the fields that are absent or falsy, in `REQUIRED_FIELDS` order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| !is_truthy(value))
            .map(|(name, _)| name)
            .collect()
    }

    /// Succeeds only when every required field is truthy.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FunctionError::MissingFields(missing))
        }
    }
}

/// JavaScript truthiness over JSON values.
///
/// `null`, `false`, zero and the empty string are falsy; arrays and
/// objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a field for logs and email text: strings without quotes,
/// everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
