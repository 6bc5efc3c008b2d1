//! Sections of the dashboard and the outcome of loading one.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::TIMEOUT_MESSAGE;

/// One of the three independently loaded data domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Balance,
    Transactions,
    Crypto,
}

impl Section {
    /// Load order: the balance section is the primary figure and goes first.
    pub const ALL: [Section; 3] = [Section::Balance, Section::Transactions, Section::Crypto];

    /// Stable key used in error maps and logs.
    pub fn key(self) -> &'static str {
        match self {
            Section::Balance => "balance",
            Section::Transactions => "transactions",
            Section::Crypto => "crypto",
        }
    }

    /// Heading shown in front of a section error.
    pub fn error_title(self) -> &'static str {
        match self {
            Section::Balance => "Balance Data Error",
            Section::Transactions => "Transactions Error",
            Section::Crypto => "Crypto Variation Error",
        }
    }

    /// Fallback message when the gateway declares failure without a reason.
    pub fn default_failure_message(self) -> &'static str {
        match self {
            Section::Balance => "Failed to load balance data",
            Section::Transactions => "Failed to load transactions data",
            Section::Crypto => "Failed to load crypto variation data",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a section failed to load.
///
/// `Display` is exactly the text rendered inside the section's error view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// The fetch exceeded the request budget.
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    /// The gateway answered with a non-2xx status.
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    /// The gateway answered 2xx but declared `success: false`.
    #[error("{0}")]
    Application(String),

    /// Anything else: transport failure, malformed body, task failure.
    #[error("{0}")]
    Unexpected(String),
}

/// Outcome of loading one section in one cycle.
pub type SectionResult<T> = std::result::Result<T, SectionError>;
