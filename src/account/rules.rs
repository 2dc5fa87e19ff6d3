//! Jurisdiction rule sets.
//!
//! # Responsibilities
//! - Apply the structural rules of one country to an account's attributes
//! - Report every failing field of that country at once
//! - Describe derived fields (e.g. a forced currency) as [`Amendments`]
//!
//! # Design Decisions
//! - Rules never mutate their input; the engine applies amendments to a copy
//! - Dispatch is a single `match` over [`Country`], so adding a jurisdiction
//!   is a compile-checked change
//! - Rule sets are injected into the engine through [`RuleSet`]

use crate::account::country::Country;
use crate::account::error::{FieldErrors, FieldIssue};
use crate::account::model::Attributes;

/// Derived field values produced by a rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amendments {
    pub base_currency: Option<&'static str>,
}

impl Amendments {
    pub fn apply(&self, attributes: &mut Attributes) {
        if let Some(currency) = self.base_currency {
            attributes.base_currency = currency.to_string();
        }
    }
}

/// Per-country structural validation.
pub trait RuleSet: Send + Sync {
    fn check(&self, country: Country, attributes: &Attributes) -> Result<Amendments, FieldErrors>;
}

/// Published rules for every supported [`Country`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl RuleSet for StandardRules {
    fn check(&self, country: Country, attributes: &Attributes) -> Result<Amendments, FieldErrors> {
        match country {
            Country::Australia => australia(attributes),
            Country::Belgium => belgium(attributes),
            Country::Canada => canada(attributes),
            Country::UnitedKingdom => united_kingdom(attributes),
            Country::Unregulated => Ok(Amendments::default()),
        }
    }
}

/// Longest `bank_id` accepted for AU.
const AU_BANK_ID_MAX: usize = 5;
const BE_BANK_ID_LEN: usize = 3;
const BE_ACCOUNT_NUMBER_MAX: usize = 7;
const GB_BANK_ID_LEN: usize = 6;

fn australia(a: &Attributes) -> Result<Amendments, FieldErrors> {
    let mut errors = FieldErrors::new();
    required(&mut errors, "bic", &a.bic);
    equals(&mut errors, "bank_id_code", &a.bank_id_code, Country::Australia);
    empty(&mut errors, "iban", &a.iban);
    if a.account_number.starts_with('0') {
        errors.push("account_number", FieldIssue::MustNotStartWith('0'));
    }
    max_len(&mut errors, "bank_id", &a.bank_id, AU_BANK_ID_MAX);

    errors.into_result().map(|()| Amendments::default())
}

fn belgium(a: &Attributes) -> Result<Amendments, FieldErrors> {
    let mut errors = FieldErrors::new();
    exact_len(&mut errors, "bank_id", &a.bank_id, BE_BANK_ID_LEN);
    equals(&mut errors, "bank_id_code", &a.bank_id_code, Country::Belgium);
    max_len(&mut errors, "account_number", &a.account_number, BE_ACCOUNT_NUMBER_MAX);

    errors.into_result().map(|()| Amendments::default())
}

fn canada(a: &Attributes) -> Result<Amendments, FieldErrors> {
    let mut errors = FieldErrors::new();
    required(&mut errors, "bic", &a.bic);
    if let Some(expected) = Country::Canada.bank_id_code() {
        if a.bank_id_code != expected {
            errors.push("bank_id_code", FieldIssue::MustEqual(expected));
        }
    }
    if !a.bank_id.is_empty() && !a.bank_id.starts_with('0') {
        errors.push("bank_id", FieldIssue::MustStartWith('0'));
    }
    empty(&mut errors, "iban", &a.iban);

    errors.into_result().map(|()| Amendments::default())
}

fn united_kingdom(a: &Attributes) -> Result<Amendments, FieldErrors> {
    let mut errors = FieldErrors::new();
    exact_len(&mut errors, "bank_id", &a.bank_id, GB_BANK_ID_LEN);
    required(&mut errors, "bic", &a.bic);
    equals(&mut errors, "bank_id_code", &a.bank_id_code, Country::UnitedKingdom);

    errors.into_result().map(|()| Amendments {
        base_currency: Some("GBP"),
    })
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str) -> bool {
    if value.is_empty() {
        errors.push(field, FieldIssue::Required);
        return false;
    }
    true
}

fn exact_len(errors: &mut FieldErrors, field: &'static str, value: &str, len: usize) {
    if required(errors, field, value) && value.chars().count() != len {
        errors.push(field, FieldIssue::ExactLength(len));
    }
}

fn max_len(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(field, FieldIssue::MaxLength(max));
    }
}

fn empty(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if !value.is_empty() {
        errors.push(field, FieldIssue::MustBeEmpty);
    }
}

/// Required and equal to the clearing code of `country`.
fn equals(errors: &mut FieldErrors, field: &'static str, value: &str, country: Country) {
    let Some(expected) = country.bank_id_code() else {
        return;
    };
    if required(errors, field, value) && value != expected {
        errors.push(field, FieldIssue::MustEqual(expected));
    }
}
