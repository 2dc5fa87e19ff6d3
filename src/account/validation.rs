//! Account validation engine.
//!
//! # Responsibilities
//! - Generic pass: identity, type and required attributes, all errors at once
//! - Country dispatch: exact country code → [`Country`] → [`RuleSet`]
//! - Cross-cutting format checks on `bank_id` and `bic`
//!
//! # Design Decisions
//! - Runs before any network request; every failure is terminal
//! - Returns an amended copy; the caller's account is never touched
//! - The rule set is a constructor argument, never global state

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::account::country::Country;
use crate::account::error::{FieldErrors, FieldIssue, ValidationError};
use crate::account::model::{AccountData, Attributes};
use crate::account::rules::{RuleSet, StandardRules};

static VALID_BIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{6}[A-Z0-9]{2}|[A-Z]{6}[A-Z0-9]{5})$").expect("BIC pattern is valid")
});

/// An account that passed every validation pass, with derived fields applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAccount {
    account: AccountData,
    country: Country,
}

impl ValidatedAccount {
    pub fn data(&self) -> &AccountData {
        &self.account
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn into_inner(self) -> AccountData {
        self.account
    }
}

/// Validates accounts against a [`RuleSet`].
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine<R = StandardRules> {
    rules: R,
}

impl ValidationEngine<StandardRules> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RuleSet> ValidationEngine<R> {
    /// Engine with custom jurisdiction rules.
    pub fn with_rules(rules: R) -> Self {
        Self { rules }
    }

    pub fn validate(&self, account: &AccountData) -> Result<ValidatedAccount, ValidationError> {
        let attributes = check_required(account)?;

        let code = attributes.country.as_deref().unwrap_or_default();
        let country: Country = code.parse()?;

        let amendments = self.rules.check(country, attributes)?;
        let mut amended = attributes.clone();
        amendments.apply(&mut amended);

        check_formats(&amended)?;

        tracing::debug!(
            account_id = %account.id,
            country = %country,
            "Account passed validation"
        );

        Ok(ValidatedAccount {
            account: AccountData {
                attributes: Some(amended),
                ..account.clone()
            },
            country,
        })
    }
}

fn check_required(account: &AccountData) -> Result<&Attributes, FieldErrors> {
    let mut errors = FieldErrors::new();
    uuid_field(&mut errors, "id", &account.id);
    uuid_field(&mut errors, "organisation_id", &account.organisation_id);
    if account.kind.is_empty() {
        errors.push("type", FieldIssue::Required);
    }

    let Some(attributes) = account.attributes.as_ref() else {
        errors.push("attributes", FieldIssue::Required);
        return Err(errors);
    };
    if attributes.country.as_deref().map_or(true, str::is_empty) {
        errors.push("country", FieldIssue::Required);
    }
    if attributes.name.as_ref().map_or(true, Vec::is_empty) {
        errors.push("name", FieldIssue::Required);
    }

    errors.into_result().map(|()| attributes)
}

/// Only the hyphenated 36 character form is accepted.
fn uuid_field(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(field, FieldIssue::Required);
    } else if value.len() != 36 || Uuid::parse_str(value).is_err() {
        errors.push(field, FieldIssue::InvalidUuid);
    }
}

fn check_formats(attributes: &Attributes) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if !attributes.bank_id.is_empty() && !attributes.bank_id.bytes().all(|b| b.is_ascii_digit()) {
        errors.push("bank_id", FieldIssue::NotNumeric);
    }
    if !attributes.bic.is_empty() && !VALID_BIC.is_match(&attributes.bic) {
        errors.push("bic", FieldIssue::InvalidBic);
    }
    errors.into_result()
}
