//! Economic sectors a comment can be filed under.
//!
//! The set is closed. The wire form of each sector is its display label, so
//! clients send `"Mining and quarrying"` rather than an enum tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error raised when a label names no known sector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sector: {label}")]
pub struct UnknownSector {
    /// Label as received.
    pub label: String,
}

/// Sector a consultation comment is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sector {
    /// `Agriculture`.
    Agriculture,
    /// `Mining and quarrying`.
    MiningAndQuarrying,
    /// `Manufacturing`.
    Manufacturing,
    /// `Electricity and gas`.
    ElectricityAndGas,
    /// `Construction`.
    Construction,
    /// `Trade`.
    Trade,
    /// `Transport`.
    Transport,
    /// `Business service`.
    BusinessService,
}

impl Sector {
    /// Every sector, in presentation order.
    pub const ALL: [Self; 8] = [
        Self::Agriculture,
        Self::MiningAndQuarrying,
        Self::Manufacturing,
        Self::ElectricityAndGas,
        Self::Construction,
        Self::Trade,
        Self::Transport,
        Self::BusinessService,
    ];

    /// Display label, also used on the wire and in storage.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Agriculture => "Agriculture",
            Self::MiningAndQuarrying => "Mining and quarrying",
            Self::Manufacturing => "Manufacturing",
            Self::ElectricityAndGas => "Electricity and gas",
            Self::Construction => "Construction",
            Self::Trade => "Trade",
            Self::Transport => "Transport",
            Self::BusinessService => "Business service",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = UnknownSector;

    /// Parse a label; matching ignores ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sector| sector.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSector {
                label: s.to_owned(),
            })
    }
}

impl From<Sector> for String {
    fn from(value: Sector) -> Self {
        value.label().to_owned()
    }
}

impl TryFrom<String> for Sector {
    type Error = UnknownSector;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn every_label_parses_back() {
        for sector in Sector::ALL {
            assert_eq!(sector.label().parse::<Sector>(), Ok(sector));
        }
    }

    #[rstest]
    #[case("mining AND quarrying", Sector::MiningAndQuarrying)]
    #[case("  Trade ", Sector::Trade)]
    fn parsing_is_lenient_on_case_and_padding(#[case] raw: &str, #[case] expected: Sector) {
        assert_eq!(raw.parse::<Sector>(), Ok(expected));
    }

    #[rstest]
    #[case("Fisheries")]
    #[case("")]
    fn unknown_labels_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<Sector>().expect_err("unknown sector");
        assert_eq!(err.label, raw);
    }

    #[rstest]
    fn serialises_as_label() {
        let json = serde_json::to_string(&Sector::ElectricityAndGas).expect("serialise");
        assert_eq!(json, "\"Electricity and gas\"");
    }
}
