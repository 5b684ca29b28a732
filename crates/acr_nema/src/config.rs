//! Decode and dump options
//!
//! Options are plain values passed into each call, so decodes with different
//! policies can run side by side in one process.

use serde::{Deserialize, Serialize};

use crate::byte_order::ByteOrder;
use crate::error::{AcrError, Result};
use crate::status::ErrorPolicy;
use crate::DEFAULT_MAX_VALUE_LENGTH;

/// How a record announces its VR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VrEncoding {
    /// Sensed once from the first record: explicit when it carries a known VR code
    #[default]
    Auto,
    /// No VR in the stream; taken from the dictionary
    Implicit,
    /// Every record carries a VR
    Explicit,
}

/// Options for a decode pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Forced byte order; `None` detects it from the stream
    #[serde(default)]
    pub byte_order: Option<ByteOrder>,

    /// Highest group id to decode (0 = unlimited)
    #[serde(default)]
    pub max_group: u32,

    /// Strict or tolerant handling of malformed records
    #[serde(default)]
    pub policy: ErrorPolicy,

    #[serde(default)]
    pub vr_encoding: VrEncoding,

    /// Largest value length accepted before a record is treated as malformed
    #[serde(default = "default_max_value_length")]
    pub max_value_length: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            byte_order: None,
            max_group: 0,
            policy: ErrorPolicy::Strict,
            vr_encoding: VrEncoding::Auto,
            max_value_length: default_max_value_length(),
        }
    }
}

impl DecodeOptions {
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = Some(byte_order);
        self
    }

    pub fn with_max_group(mut self, max_group: u32) -> Self {
        self.max_group = max_group;
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn tolerant(self) -> Self {
        self.with_policy(ErrorPolicy::Tolerant)
    }

    pub fn with_vr_encoding(mut self, vr_encoding: VrEncoding) -> Self {
        self.vr_encoding = vr_encoding;
        self
    }

    pub fn with_max_value_length(mut self, max_value_length: u32) -> Self {
        self.max_value_length = max_value_length;
        self
    }

    /// Whether `group` lies above the configured ceiling
    pub fn above_ceiling(&self, group: u16) -> bool {
        self.max_group != 0 && u32::from(group) > self.max_group
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_value_length == 0 {
            return Err(AcrError::config("max_value_length must be greater than 0"));
        }
        Ok(())
    }
}

/// Options for rendering a dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpOptions {
    /// Append dictionary keywords to element lines
    #[serde(default)]
    pub show_names: bool,

    /// Bytes shown in a binary preview before truncating
    #[serde(default = "default_max_preview_bytes")]
    pub max_preview_bytes: usize,

    /// Numeric items shown before truncating
    #[serde(default = "default_max_values")]
    pub max_values: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            show_names: false,
            max_preview_bytes: default_max_preview_bytes(),
            max_values: default_max_values(),
        }
    }
}

impl DumpOptions {
    pub fn with_names(mut self) -> Self {
        self.show_names = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_preview_bytes == 0 {
            return Err(AcrError::config("max_preview_bytes must be greater than 0"));
        }
        if self.max_values == 0 {
            return Err(AcrError::config("max_values must be greater than 0"));
        }
        Ok(())
    }
}

// Default value functions
fn default_max_value_length() -> u32 {
    DEFAULT_MAX_VALUE_LENGTH
}

fn default_max_preview_bytes() -> usize {
    32
}

fn default_max_values() -> usize {
    16
}
