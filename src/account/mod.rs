//! Accounts resource subsystem.
//!
//! # Data Flow
//! ```text
//! Caller's AccountData
//!     → validation.rs (generic pass → country dispatch → format checks)
//!         → country.rs (exact code → Country)
//!         → rules.rs (jurisdiction rules, derived fields)
//!     → client.rs (envelope encode, POST / GET / DELETE)
//!     → http executor (retry, classification)
//!     → AccountData or AccountError
//! ```

pub mod client;
pub mod country;
pub mod error;
pub mod model;
pub mod rules;
pub mod validation;

pub use client::AccountClient;
pub use country::Country;
pub use error::{AccountError, FieldError, FieldErrors, FieldIssue, ValidationError};
pub use model::{AccountData, Attributes, Envelope, ACCOUNT_TYPE};
pub use rules::{Amendments, RuleSet, StandardRules};
pub use validation::{ValidatedAccount, ValidationEngine};
