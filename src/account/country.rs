//! Supported jurisdictions.

use std::fmt;
use std::str::FromStr;

use crate::account::error::ValidationError;

/// Closed set of jurisdictions with published rules.
///
/// `Unregulated` is the `"-"` wildcard: no jurisdiction rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    Australia,
    Belgium,
    Canada,
    UnitedKingdom,
    Unregulated,
}

impl Country {
    pub const ALL: [Country; 5] = [
        Country::Australia,
        Country::Belgium,
        Country::Canada,
        Country::UnitedKingdom,
        Country::Unregulated,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Country::Australia => "AU",
            Country::Belgium => "BE",
            Country::Canada => "CA",
            Country::UnitedKingdom => "GB",
            Country::Unregulated => "-",
        }
    }

    /// Clearing system identifier expected in `bank_id_code`.
    pub fn bank_id_code(self) -> Option<&'static str> {
        match self {
            Country::Australia => Some("AUBSB"),
            Country::Belgium => Some("BE"),
            Country::Canada => Some("CACPA"),
            Country::UnitedKingdom => Some("GBDSC"),
            Country::Unregulated => None,
        }
    }
}

impl FromStr for Country {
    type Err = ValidationError;

    /// Exact, case-sensitive match on the country code.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ValidationError::UnknownCountry(code.to_string()))
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
