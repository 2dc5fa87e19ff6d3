//! Account resource types as they appear on the wire.

use serde::{Deserialize, Serialize};

/// Resource type tag of every account.
pub const ACCOUNT_TYPE: &str = "accounts";

/// Wire wrapper: every request and response body is `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// An account record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountData {
    pub id: String,

    pub organisation_id: String,

    #[serde(rename = "type")]
    pub kind: String,

    /// Set by the server; required to delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl AccountData {
    /// New account of type [`ACCOUNT_TYPE`].
    pub fn new(
        id: impl Into<String>,
        organisation_id: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            id: id.into(),
            organisation_id: organisation_id.into(),
            kind: ACCOUNT_TYPE.to_string(),
            version: None,
            attributes: Some(attributes),
        }
    }

    pub fn country(&self) -> Option<&str> {
        self.attributes.as_ref()?.country.as_deref()
    }
}

/// Jurisdiction-dependent account attributes.
///
/// Plain string fields treat the empty string as "not supplied".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_currency: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub account_number: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub bank_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub bank_id_code: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub bic: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub iban: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_names: Option<Vec<String>>,

    /// "Personal" or "Business".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_matching_opt_out: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_identification: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Attributes {
    /// Attributes for `country` held by `names`.
    pub fn new<I, S>(country: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            country: Some(country.into()),
            name: Some(names.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}
