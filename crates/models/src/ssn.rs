use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
    str::FromStr,
};
use thiserror::Error;

/// Error returned when a string is not a valid SSN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSsnError {
    #[error("SSN must be exactly {expected} digits, got {actual} characters")]
    WrongLength { expected: usize, actual: usize },
    #[error("SSN may only contain digits")]
    NonDigit,
}

/// A student's social security number (kennitala), the natural key of a student
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ssn(String);

impl Ssn {
    pub const LENGTH: usize = 10;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ssn {
    type Err = ParseSsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::LENGTH {
            return Err(ParseSsnError::WrongLength {
                expected: Self::LENGTH,
                actual: s.chars().count(),
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSsnError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for Ssn {
    type Error = ParseSsnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ssn> for String {
    fn from(ssn: Ssn) -> Self {
        ssn.0
    }
}

impl Deref for Ssn {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Ssn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
