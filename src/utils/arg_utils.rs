//! Parsing helpers for command-line values

use lazy_static::lazy_static;
use regex::Regex;

use crate::nitf::errors::{NitfError, NitfResult};

lazy_static! {
    // OFFSET:LENGTH, each decimal or 0x-prefixed hex
    static ref RANGE_PATTERN: Regex =
        Regex::new(r"^\s*(0[xX][0-9a-fA-F]+|\d+)\s*:\s*(0[xX][0-9a-fA-F]+|\d+)\s*$").unwrap();
    // WIDTHxHEIGHT
    static ref DIMENSIONS_PATTERN: Regex = Regex::new(r"^\s*(\d+)\s*[xX]\s*(\d+)\s*$").unwrap();
}

fn parse_number(text: &str) -> NitfResult<u64> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    };
    parsed.map_err(|e| NitfError::InvalidArgument(format!("bad number '{}': {}", text, e)))
}

/// Parse a byte range given as `OFFSET:LENGTH`
pub fn parse_range(text: &str) -> NitfResult<(u64, u64)> {
    let caps = RANGE_PATTERN.captures(text).ok_or_else(|| {
        NitfError::InvalidArgument(format!("expected OFFSET:LENGTH, got '{}'", text))
    })?;
    Ok((parse_number(&caps[1])?, parse_number(&caps[2])?))
}

/// Parse a pair of dimensions given as `AxB`
pub fn parse_dimensions(text: &str) -> NitfResult<(u32, u32)> {
    let caps = DIMENSIONS_PATTERN.captures(text).ok_or_else(|| {
        NitfError::InvalidArgument(format!("expected WIDTHxHEIGHT, got '{}'", text))
    })?;
    let first = caps[1]
        .parse::<u32>()
        .map_err(|e| NitfError::InvalidArgument(format!("bad dimension '{}': {}", &caps[1], e)))?;
    let second = caps[2]
        .parse::<u32>()
        .map_err(|e| NitfError::InvalidArgument(format!("bad dimension '{}': {}", &caps[2], e)))?;
    Ok((first, second))
}
