//! Account validation and client errors.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::ExecError;

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Required,
    InvalidUuid,
    ExactLength(usize),
    MaxLength(usize),
    MustEqual(&'static str),
    MustBeEmpty,
    MustStartWith(char),
    MustNotStartWith(char),
    NotNumeric,
    InvalidBic,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Required => write!(f, "cannot be blank"),
            FieldIssue::InvalidUuid => write!(f, "must be a valid UUID"),
            FieldIssue::ExactLength(n) => write!(f, "must be exactly {} characters", n),
            FieldIssue::MaxLength(n) => write!(f, "must be at most {} characters", n),
            FieldIssue::MustEqual(expected) => write!(f, "must be {:?}", expected),
            FieldIssue::MustBeEmpty => write!(f, "must be empty"),
            FieldIssue::MustStartWith(c) => write!(f, "must start with '{}'", c),
            FieldIssue::MustNotStartWith(c) => write!(f, "cannot start with '{}'", c),
            FieldIssue::NotNumeric => write!(f, "must be a number"),
            FieldIssue::InvalidBic => write!(f, "must be an 8 or 11 character SWIFT BIC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub issue: FieldIssue,
}

/// Every field failure found by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{}", describe(.0))]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, issue: FieldIssue) {
        self.0.push(FieldError { field, issue });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First issue recorded for `field`.
    pub fn issue(&self, field: &str) -> Option<&FieldIssue> {
        self.0.iter().find(|e| e.field == field).map(|e| &e.issue)
    }

    /// `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.issue))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Account rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid account: {0}")]
    Fields(#[from] FieldErrors),

    #[error("country {0:?} is not supported")]
    UnknownCountry(String),
}

impl ValidationError {
    /// Field errors, if this is a field-level failure.
    pub fn fields(&self) -> Option<&FieldErrors> {
        match self {
            ValidationError::Fields(errors) => Some(errors),
            ValidationError::UnknownCountry(_) => None,
        }
    }
}

/// Errors returned by [`AccountClient`](super::AccountClient).
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("account id is empty")]
    EmptyAccountId,

    #[error("failed encoding account: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed decoding account: {0}")]
    Decode(#[source] serde_json::Error),

    /// A successful status arrived without the expected account payload.
    #[error("response with status {status} has no body")]
    EmptyResponse { status: u16 },

    #[error(transparent)]
    Request(#[from] ExecError),
}

impl AccountError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AccountError::Request(e) if e.is_not_found())
    }
}
