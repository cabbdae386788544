use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid course template id {0:?}: expected the form \"T-514-VEFT\"")]
pub struct ParseTemplateIdError(pub String);

/// Identifier of a course catalog entry, e.g. `T-514-VEFT`
///
/// The shape is one uppercase letter, three digits and four uppercase
/// letters separated by dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

impl TemplateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TemplateId {
    type Err = ParseTemplateIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();

        let valid = match parts.as_slice() {
            [school, number, code] => {
                school.len() == 1
                    && school.bytes().all(|b| b.is_ascii_uppercase())
                    && number.len() == 3
                    && number.bytes().all(|b| b.is_ascii_digit())
                    && code.len() == 4
                    && code.bytes().all(|b| b.is_ascii_uppercase())
            }
            _ => false,
        };

        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(ParseTemplateIdError(s.to_owned()))
        }
    }
}

impl TryFrom<String> for TemplateId {
    type Error = ParseTemplateIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

impl Display for TemplateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
