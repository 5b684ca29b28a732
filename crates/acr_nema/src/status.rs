//! Decode status taxonomy and error policy
//!
//! Status values are listed from most to least successful. Only [`Status::Ok`] and
//! [`Status::EndOfInput`] are quiet; every other value is shown to the operator
//! once the dump has been written.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the decoder reacts to a structurally invalid record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first protocol error
    #[default]
    Strict,
    /// Log the bad record, skip past it and keep decoding
    Tolerant,
}

impl ErrorPolicy {
    pub fn is_tolerant(self) -> bool {
        matches!(self, Self::Tolerant)
    }
}

/// Terminal status of a decode pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// Clean end of stream, or an early stop at the group-id ceiling
    Ok,
    /// Clean end of stream; callers treat it exactly like `Ok`
    EndOfInput,
    /// The stream ended inside a record
    AbnormalEndOfInput,
    /// Reserved for the encoding direction, never produced by the decoder
    AbnormalEndOfOutput,
    /// A structurally invalid record was met under the strict policy
    ProtocolError,
    /// Anything else, such as a failing byte source
    OtherError,
}

impl Status {
    /// Whether this status ends a pass without anything to report
    pub fn is_quiet(self) -> bool {
        matches!(self, Status::Ok | Status::EndOfInput)
    }

    /// Operator-facing description
    pub fn description(self) -> &'static str {
        match self {
            Status::Ok => "No error",
            Status::EndOfInput => "End of input",
            Status::AbnormalEndOfInput => "Abnormal end of input",
            Status::AbnormalEndOfOutput => "Abnormal end of output",
            Status::ProtocolError => "Protocol error",
            Status::OtherError => "Other error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
