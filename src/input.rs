use crate::mcp::errors;
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone)]
pub struct InputError {
    pub kind: &'static str,
    pub message: String,
}

impl InputError {
    fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(errors::INVALID_INPUT, message)
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for InputError {}

/// Tool arguments as a JSON object.
pub struct Arguments<'a> {
    obj: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub fn from_value(args: &'a Value) -> Result<Self, InputError> {
        let obj = args
            .as_object()
            .ok_or_else(|| InputError::invalid_input("arguments must be an object"))?;
        Ok(Self { obj })
    }

    pub fn optional_str(&self, name: &str) -> Result<Option<&'a str>, InputError> {
        let Some(value) = self.obj.get(name) else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        let Some(value) = value.as_str() else {
            return Err(InputError::invalid_input(format!("{name} must be a string")));
        };
        if value.trim().is_empty() {
            return Err(InputError::invalid_input(format!("{name} must not be empty")));
        }
        Ok(Some(value))
    }

    pub fn required_str(&self, name: &str) -> Result<&'a str, InputError> {
        self.optional_str(name)?
            .ok_or_else(|| InputError::invalid_input(format!("{name} is required")))
    }

    /// Reads an integer bounded by `min..=max`.
    pub fn optional_u64(&self, name: &str, min: u64, max: u64) -> Result<Option<u64>, InputError> {
        let Some(value) = self.obj.get(name) else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        let Some(number) = value.as_u64() else {
            return Err(InputError::invalid_input(format!(
                "{name} must be a non-negative integer"
            )));
        };
        if number < min || number > max {
            return Err(InputError::invalid_input(format!(
                "{name} must be between {min} and {max}"
            )));
        }
        Ok(Some(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arguments_must_be_object() {
        let args = json!(["title"]);
        let err = Arguments::from_value(&args).err().expect("error");
        assert_eq!(err.kind, errors::INVALID_INPUT);
    }

    #[test]
    fn required_missing() {
        let args = json!({});
        let parsed = Arguments::from_value(&args).expect("args");
        let err = parsed.required_str("title").expect_err("error");
        assert_eq!(err.message, "title is required");
    }

    #[test]
    fn required_blank() {
        let args = json!({"title": "   "});
        let parsed = Arguments::from_value(&args).expect("args");
        let err = parsed.required_str("title").expect_err("error");
        assert_eq!(err.message, "title must not be empty");
    }

    #[test]
    fn wrong_type() {
        let args = json!({"title": 3, "limit": "ten"});
        let parsed = Arguments::from_value(&args).expect("args");
        assert_eq!(
            parsed.required_str("title").expect_err("error").message,
            "title must be a string"
        );
        assert_eq!(
            parsed.optional_u64("limit", 0, 100).expect_err("error").message,
            "limit must be a non-negative integer"
        );
    }

    #[test]
    fn null_is_absent() {
        let args = json!({"token": null, "limit": null});
        let parsed = Arguments::from_value(&args).expect("args");
        assert_eq!(parsed.optional_str("token").expect("ok"), None);
        assert_eq!(parsed.optional_u64("limit", 0, 100).expect("ok"), None);
    }

    #[test]
    fn integer_bounds() {
        let args = json!({"limit": 101, "max_retries": 0, "poll_interval": 500});
        let parsed = Arguments::from_value(&args).expect("args");
        assert!(parsed.optional_u64("limit", 0, 100).is_err());
        assert!(parsed.optional_u64("max_retries", 1, 1000).is_err());
        assert_eq!(
            parsed.optional_u64("poll_interval", 1, 600_000).expect("ok"),
            Some(500)
        );
    }

    #[test]
    fn negative_integer_rejected() {
        let args = json!({"limit": -1});
        let parsed = Arguments::from_value(&args).expect("args");
        assert!(parsed.optional_u64("limit", 0, 100).is_err());
    }
}
