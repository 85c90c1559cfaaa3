//! Scalar transcoders for the wire quirks shared across GMCP messages.
//!
//! Every function here is pure: a `parse_*` / `format_*` (or
//! `decode_*` / `encode_*`) pair that converts between one wire string
//! and one typed value. Message modules call these from their two-pass
//! decode after the body has been parsed into plain strings.
//!
//! | wire                  | typed                                  |
//! |-----------------------|----------------------------------------|
//! | `"184"`, `"-5"`       | any integer type                       |
//! | `"Adept (40%)"`       | [`Ranked`] `{ "Adept", Some(40) }`     |
//! | `"69 (23.45%)"`       | `69.2345`                              |
//! | `"(None)"`            | [`Clearable::Cleared`]                 |
//! | `"1"` / `"0"`         | `true` / `false`                       |
//! | `"cdt"`               | bitflags value                         |
//! | `["Char 1", "Room"]`  | `{"Char": 1, "Room": 1}`               |

use std::collections::BTreeMap;
use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;

use bitflags::Flags;

use crate::{ProtocolError, ScalarError};

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// A name with an optional numeric qualifier, as in `"Mhaldor (3)"` or
/// `"Adept (40%)"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ranked {
    pub name: String,
    pub rank: Option<u32>,
}

impl Ranked {
    pub fn new(name: impl Into<String>, rank: Option<u32>) -> Self {
        Self {
            name: name.into(),
            rank,
        }
    }
}

/// A field value that the server can explicitly clear with a sentinel
/// literal.
///
/// Paired with `Option` this gives the three states a differential update
/// needs: `None` (unchanged), `Some(Cleared)` (changed to nothing), and
/// `Some(Set(v))` (changed to `v`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clearable<T> {
    /// The wire carried the sentinel literal.
    Cleared,
    Set(T),
}

impl<T> Clearable<T> {
    /// Returns the value, or `None` if cleared.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Cleared => None,
            Self::Set(value) => Some(value),
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared)
    }
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

/// Parses a string-encoded integer, as in `{"hp": "3904"}` or `{"hp": "-5"}`.
pub fn parse_int<T>(value: &str) -> Result<T, ScalarError>
where
    T: FromStr<Err = ParseIntError>,
{
    value.trim().parse().map_err(|source| ScalarError::Number {
        value: value.to_string(),
        source,
    })
}

/// Parses an optional string-encoded integer field, naming `field` on
/// failure.
pub fn opt_int<T>(value: Option<&str>, field: &'static str) -> Result<Option<T>, ProtocolError>
where
    T: FromStr<Err = ParseIntError>,
{
    value
        .map(parse_int)
        .transpose()
        .map_err(ProtocolError::field(field))
}

/// Mirror of [`opt_int`].
pub fn int_string<T: Display>(value: Option<T>) -> Option<String> {
    value.map(|n| n.to_string())
}

/// Parses `"69%"` (or a bare `"69"`) into `69`.
pub fn parse_percent<T>(value: &str) -> Result<T, ScalarError>
where
    T: FromStr<Err = ParseIntError>,
{
    parse_int(value.trim().trim_end_matches('%'))
}

pub fn format_percent<T: Display>(value: T) -> String {
    format!("{value}%")
}

// ---------------------------------------------------------------------------
// Rank suffix
// ---------------------------------------------------------------------------

/// Splits `"Name (N)"` or `"Name (N%)"` into a [`Ranked`].
///
/// A value without a parenthesised suffix has no rank. The numeral is
/// taken from the last `(` so names may contain parentheses themselves.
///
/// # Errors
/// [`ScalarError::Rank`] if the suffix isn't a number.
pub fn split_rank(value: &str) -> Result<Ranked, ScalarError> {
    let Some((name, suffix)) = value.rsplit_once('(') else {
        return Ok(Ranked::new(value.trim(), None));
    };

    let numeral = suffix.trim_matches(|c: char| matches!(c, '(' | ')' | '%') || c.is_whitespace());
    let rank = numeral.parse().map_err(|source| ScalarError::Rank {
        value: numeral.to_string(),
        source,
    })?;

    Ok(Ranked::new(name.trim(), Some(rank)))
}

/// Like [`split_rank`], but a value without a suffix is an error.
pub fn split_required_rank(value: &str) -> Result<Ranked, ScalarError> {
    let ranked = split_rank(value)?;
    if ranked.rank.is_none() {
        return Err(ScalarError::MissingRank(value.to_string()));
    }
    Ok(ranked)
}

/// Formats a [`Ranked`] as `"Name (N)"`, or just `"Name"` without a rank.
pub fn join_rank(ranked: &Ranked) -> String {
    match ranked.rank {
        Some(rank) => format!("{} ({rank})", ranked.name),
        None => ranked.name.clone(),
    }
}

/// Formats a [`Ranked`] as `"Name (N%)"`, used for skill proficiency.
pub fn join_rank_percent(ranked: &Ranked) -> String {
    match ranked.rank {
        Some(rank) => format!("{} ({rank}%)", ranked.name),
        None => ranked.name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Percent level
// ---------------------------------------------------------------------------

/// Parses `"69 (23.45%)"` into `69.2345`.
///
/// A bare level such as `"69"` has zero progress.
///
/// # Errors
/// [`ScalarError::Malformed`] for a negative or non-finite progress.
pub fn parse_level(value: &str) -> Result<f64, ScalarError> {
    let (level, progress) = match value.split_once('(') {
        Some((level, progress)) => (level.trim(), Some(progress)),
        None => (value.trim(), None),
    };

    let level: u32 = level.parse().map_err(|source| ScalarError::Level {
        value: level.to_string(),
        source,
    })?;

    let progress = match progress {
        Some(progress) => {
            let progress = progress.trim_matches(|c: char| matches!(c, ')' | '%') || c.is_whitespace());
            let parsed = progress
                .parse::<f64>()
                .map_err(|source| ScalarError::LevelProgress {
                    value: progress.to_string(),
                    source,
                })?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(ScalarError::Malformed(value.to_string()));
            }
            parsed
        }
        None => 0.0,
    };

    Ok(f64::from(level) + progress / 100.0)
}

/// Progress is kept to four decimals of a percent.
const LEVEL_UNITS: f64 = 1_000_000.0;

/// Formats `69.2345` as `"69 (23.45%)"`.
///
/// Progress is rounded to four decimals and trailing zeros are dropped;
/// progress that rounds up to a full level carries into the level, so
/// `5.999999999` is `"6 (0%)"`. A negative or non-finite level has no
/// wire form and yields `None`.
pub fn format_level(level: f64) -> Option<String> {
    if !level.is_finite() || level < 0.0 {
        tracing::warn!(level, "level has no wire form");
        return None;
    }

    let units = (level * LEVEL_UNITS).round();
    let whole = (units / LEVEL_UNITS).floor();
    let progress = format!("{:.4}", (units - whole * LEVEL_UNITS) / 10_000.0);
    let progress = progress.trim_end_matches('0').trim_end_matches('.');
    Some(format!("{} ({progress}%)", whole as u64))
}

// ---------------------------------------------------------------------------
// Sentinel values
// ---------------------------------------------------------------------------

/// Decodes a field that uses `sentinel` as its "explicitly nothing" value.
pub fn decode_sentinel<T>(
    value: &str,
    sentinel: &str,
    decode: impl FnOnce(&str) -> Result<T, ScalarError>,
) -> Result<Clearable<T>, ScalarError> {
    if value == sentinel {
        return Ok(Clearable::Cleared);
    }
    decode(value).map(Clearable::Set)
}

/// Mirror of [`decode_sentinel`]: a cleared value re-emits `sentinel`.
pub fn encode_sentinel<T>(
    value: &Clearable<T>,
    sentinel: &str,
    encode: impl FnOnce(&T) -> String,
) -> String {
    match value {
        Clearable::Cleared => sentinel.to_string(),
        Clearable::Set(value) => encode(value),
    }
}

// ---------------------------------------------------------------------------
// Boolean digit
// ---------------------------------------------------------------------------

/// `"1"` is true; anything else is false.
pub fn parse_flag(value: &str) -> bool {
    value == "1"
}

pub fn format_flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

// ---------------------------------------------------------------------------
// Flag vocabularies
// ---------------------------------------------------------------------------

/// Decodes a string of single-character codes into a flag set.
///
/// `table` maps every accepted character to its flag.
///
/// # Errors
/// [`ScalarError::UnknownAttribute`] on the first character not in `table`.
pub fn decode_codes<F: Flags + Copy>(value: &str, table: &[(char, F)]) -> Result<F, ScalarError> {
    let mut flags = F::empty();
    for code in value.chars() {
        let (_, flag) = table
            .iter()
            .find(|(c, _)| *c == code)
            .ok_or(ScalarError::UnknownAttribute(code))?;
        flags.insert(*flag);
    }
    Ok(flags)
}

/// Encodes a flag set as characters, in the order of `table`.
pub fn encode_codes<F: Flags + Copy>(flags: F, table: &[(char, F)]) -> String {
    table
        .iter()
        .filter(|(_, flag)| flags.contains(*flag))
        .map(|(code, _)| *code)
        .collect()
}

/// Decodes a list of tokens into a flag set.
///
/// # Errors
/// [`ScalarError::UnknownDetail`] on the first token not in `table`.
pub fn decode_tokens<F: Flags + Copy>(
    values: &[String],
    table: &[(&str, F)],
) -> Result<F, ScalarError> {
    let mut flags = F::empty();
    for value in values {
        let (_, flag) = table
            .iter()
            .find(|(token, _)| token == value)
            .ok_or_else(|| ScalarError::UnknownDetail(value.clone()))?;
        flags.insert(*flag);
    }
    Ok(flags)
}

/// Encodes a flag set as tokens, in the order of `table`.
pub fn encode_tokens<F: Flags + Copy>(flags: F, table: &[(&str, F)]) -> Vec<String> {
    table
        .iter()
        .filter(|(_, flag)| flags.contains(*flag))
        .map(|(token, _)| token.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Capability list
// ---------------------------------------------------------------------------

/// Decodes `["Char 1", "Room"]` into module names and versions.
///
/// A module without a version gets version 1. Names are not checked
/// against any vocabulary here.
pub fn decode_capabilities(list: &[String]) -> Result<BTreeMap<String, u32>, ScalarError> {
    let mut modules = BTreeMap::new();
    for item in list {
        let (module, version) = match item.trim().split_once(' ') {
            Some((module, version)) => {
                let version = version.trim();
                let version = version.parse().map_err(|source| ScalarError::Version {
                    module: module.to_string(),
                    value: version.to_string(),
                    source,
                })?;
                (module, version)
            }
            None => (item.trim(), 1),
        };
        modules.insert(module.to_string(), version);
    }
    Ok(modules)
}

/// Encodes modules as a sorted list of `"Name N"` tokens.
pub fn encode_capabilities(modules: &BTreeMap<String, u32>) -> Vec<String> {
    let mut list: Vec<String> = modules
        .iter()
        .map(|(module, version)| format!("{module} {version}"))
        .collect();
    list.sort();
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    bitflags::bitflags! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        struct Sample: u8 {
            const A = 1;
            const B = 1 << 1;
            const C = 1 << 2;
        }
    }

    const SAMPLE_CODES: &[(char, Sample)] = &[('a', Sample::A), ('b', Sample::B), ('c', Sample::C)];

    // =====================================================================
    // Integers
    // =====================================================================

    #[test]
    fn test_parse_int_signed() {
        assert_eq!(parse_int::<i64>(" -5 ").unwrap(), -5);
        assert!(matches!(parse_int::<u32>("-5"), Err(ScalarError::Number { .. })));
    }

    #[test]
    fn test_opt_int_names_field() {
        assert_eq!(opt_int::<i64>(Some("-12"), "hp").unwrap(), Some(-12));
        assert_eq!(opt_int::<i64>(None, "hp").unwrap(), None);

        let err = opt_int::<u32>(Some("lots"), "gold").unwrap_err();
        assert_eq!(err.to_string(), "invalid 'gold': 'lots' is not a number");
    }

    #[test]
    fn test_int_string() {
        assert_eq!(int_string(Some(-3i64)).as_deref(), Some("-3"));
        assert_eq!(int_string::<u32>(None), None);
        assert_eq!(format_percent(parse_percent::<u32>("45%").unwrap()), "45%");
    }

    // =====================================================================
    // Rank suffix
    // =====================================================================

    #[test]
    fn test_split_rank_with_percent() {
        assert_eq!(split_rank("Adept (40%)").unwrap(), Ranked::new("Adept", Some(40)));
    }

    #[test]
    fn test_split_rank_without_suffix() {
        assert_eq!(split_rank("Adept").unwrap(), Ranked::new("Adept", None));
        assert_eq!(split_rank("  Adept ").unwrap(), Ranked::new("Adept", None));
    }

    #[test]
    fn test_split_rank_without_space() {
        assert_eq!(split_rank("Something(1)").unwrap(), Ranked::new("Something", Some(1)));
    }

    #[test]
    fn test_split_rank_non_numeric_progress() {
        let err = split_rank("Adept (xy%)").unwrap_err();
        assert!(matches!(&err, ScalarError::Rank { value, .. } if value == "xy"));
        assert_eq!(err.to_string(), "rank progress 'xy' is not a number");
    }

    #[test]
    fn test_split_required_rank() {
        assert!(split_required_rank("Mhaldor (3)").is_ok());
        assert!(matches!(split_required_rank("Mhaldor"), Err(ScalarError::MissingRank(_))));
    }

    #[test]
    fn test_join_rank() {
        assert_eq!(join_rank(&Ranked::new("Mhaldor", Some(3))), "Mhaldor (3)");
        assert_eq!(join_rank(&Ranked::new("Mhaldor", None)), "Mhaldor");
        assert_eq!(join_rank_percent(&Ranked::new("Adept", Some(40))), "Adept (40%)");
    }

    // =====================================================================
    // Percent level
    // =====================================================================

    #[test]
    fn test_parse_level() {
        let level = parse_level("69 (23.45%)").unwrap();
        assert!((level - 69.2345).abs() < 1e-9);
        assert_eq!(parse_level("68").unwrap(), 68.0);
    }

    #[test]
    fn test_parse_level_names_failing_half() {
        let err = parse_level("x (23%)").unwrap_err();
        assert!(matches!(err, ScalarError::Level { .. }));

        let err = parse_level("69 (x%)").unwrap_err();
        assert!(matches!(err, ScalarError::LevelProgress { .. }));
    }

    #[test]
    fn test_parse_level_rejects_negative_progress() {
        assert!(matches!(parse_level("69 (-5%)"), Err(ScalarError::Malformed(_))));
        assert!(matches!(parse_level("69 (NaN%)"), Err(ScalarError::Malformed(_))));
        assert!(matches!(parse_level("-1 (5%)"), Err(ScalarError::Level { .. })));
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(69.25).as_deref(), Some("69 (25%)"));
        assert_eq!(format_level(68.0).as_deref(), Some("68 (0%)"));
        assert_eq!(format_level(1.5).as_deref(), Some("1 (50%)"));
        assert_eq!(format_level(5.9999).as_deref(), Some("5 (99.99%)"));
    }

    #[test]
    fn test_format_level_carries_full_progress() {
        assert_eq!(format_level(5.999_999_999).as_deref(), Some("6 (0%)"));
        assert_eq!(format_level(0.999_999_7).as_deref(), Some("1 (0%)"));
    }

    #[test]
    fn test_format_level_rejects_out_of_range() {
        assert_eq!(format_level(f64::NAN), None);
        assert_eq!(format_level(f64::INFINITY), None);
        assert_eq!(format_level(-0.5), None);
        assert_eq!(format_level(-0.0).as_deref(), Some("0 (0%)"));
    }

    #[test]
    fn test_level_round_trip() {
        let level = parse_level(&format_level(12.875).unwrap()).unwrap();
        assert_eq!(level, 12.875);
    }

    // =====================================================================
    // Sentinel & flags
    // =====================================================================

    #[test]
    fn test_sentinel() {
        let cleared = decode_sentinel("(None)", "(None)", split_rank).unwrap();
        assert!(cleared.is_cleared());
        assert_eq!(encode_sentinel(&cleared, "(None)", join_rank), "(None)");

        let set = decode_sentinel("Cyrene (2)", "(None)", split_rank).unwrap();
        assert_eq!(set.as_set(), Some(&Ranked::new("Cyrene", Some(2))));
        assert_eq!(encode_sentinel(&set, "(None)", join_rank), "Cyrene (2)");
    }

    #[test]
    fn test_boolean_digit() {
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
        assert_eq!(format_flag(true), "1");
        assert_eq!(format_flag(false), "0");
    }

    #[test]
    fn test_codes_canonical_order() {
        let flags = decode_codes("cab", SAMPLE_CODES).unwrap();
        assert_eq!(flags, Sample::all());
        assert_eq!(encode_codes(flags, SAMPLE_CODES), "abc");
    }

    #[test]
    fn test_codes_unknown_character() {
        let err = decode_codes("az", SAMPLE_CODES).unwrap_err();
        assert!(matches!(err, ScalarError::UnknownAttribute('z')));
    }

    #[test]
    fn test_tokens_unknown_token() {
        let table: &[(&str, Sample)] = &[("alpha", Sample::A)];
        let err = decode_tokens(&["beta".to_string()], table).unwrap_err();
        assert_eq!(err.to_string(), "unknown detail 'beta'");
    }

    // =====================================================================
    // Capabilities
    // =====================================================================

    #[test]
    fn test_capabilities_default_version() {
        let list = vec!["Char 1".to_string(), "Room".to_string(), "Custom.Thing 3".to_string()];
        let modules = decode_capabilities(&list).unwrap();
        assert_eq!(modules.get("Char"), Some(&1));
        assert_eq!(modules.get("Room"), Some(&1));
        assert_eq!(modules.get("Custom.Thing"), Some(&3));
    }

    #[test]
    fn test_capabilities_bad_version() {
        let err = decode_capabilities(&["Char x".to_string()]).unwrap_err();
        assert!(matches!(err, ScalarError::Version { .. }));
    }

    #[test]
    fn test_capabilities_encode_sorted() {
        let modules = BTreeMap::from([
            ("Room".to_string(), 1),
            ("Char.Items".to_string(), 1),
            ("Char".to_string(), 1),
        ]);
        assert_eq!(encode_capabilities(&modules), vec!["Char 1", "Char.Items 1", "Room 1"]);
    }
}
