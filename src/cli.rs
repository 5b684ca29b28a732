use acr_nema::{AcrError, ByteOrder, DecodeOptions, DumpOptions, ErrorPolicy};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Dump the contents of an ACR-NEMA message stream
#[derive(Parser, Debug, Clone)]
#[command(name = "acr-dump", version, about)]
pub struct Cli {
    /// Ignore protocol errors (skip malformed records and keep going)
    #[arg(short = 'i', long = "ignore-errors")]
    pub ignore_errors: bool,

    /// Assume big-endian data
    #[arg(short = 'b', long = "big-endian", conflicts_with = "little_endian")]
    pub big_endian: bool,

    /// Assume little-endian data
    #[arg(short = 'l', long = "little-endian")]
    pub little_endian: bool,

    /// Append data dictionary keywords to each element
    #[arg(short = 'n', long = "names")]
    pub names: bool,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Message file to dump; "-" or omitted reads standard input
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Highest group id to dump (0 = all), decimal, 0x-hex or 0-octal
    #[arg(value_name = "MAX_GROUP", value_parser = parse_group_id)]
    pub max_group: Option<u32>,
}

impl Cli {
    /// Byte order forced on the command line, if any
    pub fn byte_order(&self) -> Option<ByteOrder> {
        if self.big_endian {
            Some(ByteOrder::Big)
        } else if self.little_endian {
            Some(ByteOrder::Little)
        } else {
            None
        }
    }

    /// Layer command-line flags over the configured decode options
    pub fn decode_options(&self, base: &DecodeOptions) -> DecodeOptions {
        let mut options = base.clone();
        if let Some(order) = self.byte_order() {
            options.byte_order = Some(order);
        }
        if let Some(max_group) = self.max_group {
            options.max_group = max_group;
        }
        if self.ignore_errors {
            options.policy = ErrorPolicy::Tolerant;
        }
        options
    }

    /// Layer command-line flags over the configured dump options
    pub fn dump_options(&self, base: &DumpOptions) -> DumpOptions {
        let mut options = base.clone();
        if self.names {
            options.show_names = true;
        }
        options
    }
}

/// Parse a group id the way `strtol(s, _, 0)` picks its base
pub fn parse_group_id(s: &str) -> Result<u32, AcrError> {
    let trimmed = s.trim();
    let parsed = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else if trimmed.len() > 1 && trimmed.starts_with('0') {
        u32::from_str_radix(&trimmed[1..], 8)
    } else {
        trimmed.parse::<u32>()
    };
    parsed.map_err(|_| AcrError::invalid_max_group(s))
}
