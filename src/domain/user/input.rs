//! Boundary input types for user writes

use serde::{Deserialize, Serialize};

/// Age as it arrives at the boundary: a JSON number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for AgeInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for AgeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Untrusted create/update payload
///
/// Every field is optional; presence is judged by the validator, not by
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<AgeInput>,
}

impl UserInput {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        age: Option<AgeInput>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            name: Some(name.into()),
            age,
        }
    }
}

/// Age after coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgeValue {
    Number(i64),
    /// Present but not coercible to an integer; kept for reporting
    NotANumber(String),
}

/// Output of the sanitizer: canonical shape, not yet judged valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<AgeValue>,
}

impl From<NormalizedInput> for UserInput {
    fn from(input: NormalizedInput) -> Self {
        Self {
            email: input.email,
            name: input.name,
            age: input.age.map(|age| match age {
                AgeValue::Number(n) => AgeInput::Integer(n),
                AgeValue::NotANumber(raw) => AgeInput::Text(raw),
            }),
        }
    }
}
