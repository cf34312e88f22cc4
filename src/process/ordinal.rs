//! Finite ordered domains of the ordinal semantic types.
//!
//! Each parser takes the normalized answer and returns `(rank, label)`. Labels
//! are normalized Spanish, so the translation tables (`weekly_frequency`,
//! `age_band`) resolve them like any other in-field value.

use once_cell::sync::Lazy;
use regex::Regex;

use super::record::Ordinal;
use super::utils::parse_integer;
use crate::schema::SemanticType;

/// A leading level followed by nothing, whitespace or `-` ("5 - muy seguro").
/// Fractions such as "2.5" or "3,7" do not match.
static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:$|[\s-])").expect("valid regex"));
static SIGNED_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+").expect("valid regex"));
static RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*(?:-|a)\s*(\d+)").expect("valid regex"));

pub const SCALE: (i32, i32) = (1, 5);
pub const RANK: (i32, i32) = (1, 3);
pub const FLOOR: (i32, i32) = (-2, 10);

const FREQUENCY_LABELS: [&str; 8] = [
    "mensual",
    "quincenal",
    "1 vez por semana",
    "2 veces por semana",
    "3 veces por semana",
    "4 veces por semana",
    "5 veces por semana",
    "6 o mas veces por semana",
];

const AGE_BANDS: [(i32, i32, &str); 4] = [
    (0, 5, "0-5 anos"),
    (6, 10, "6-10 anos"),
    (11, 15, "11-15 anos"),
    (16, 20, "16-20 anos"),
];
const AGE_BAND_OVER_20: &str = "mas de 20 anos";

/// Resolve `normalized` against the domain of `ty`.
pub fn parse(ty: SemanticType, normalized: &str) -> Result<Ordinal, String> {
    match ty {
        SemanticType::OrdinalScale => bounded_integer(normalized, SCALE),
        SemanticType::OrdinalRank => bounded_integer(normalized, RANK),
        SemanticType::OrdinalFrequency => frequency(normalized),
        SemanticType::OrdinalFloor => floor(normalized),
        SemanticType::OrdinalAgeband => age_band(normalized),
        other => Err(format!("{other} is not an ordinal type")),
    }
}

fn bounded_integer(s: &str, (lo, hi): (i32, i32)) -> Result<Ordinal, String> {
    let n = parse_integer(s)
        .or_else(|| leading_int(s).map(i64::from))
        .ok_or_else(|| format!("`{s}` is not a level in {lo}..{hi}"))?;
    if n < lo as i64 || n > hi as i64 {
        return Err(format!("{n} is outside {lo}..{hi}"));
    }
    let n = n as i32;
    Ok(Ordinal::new(n, n.to_string()))
}

fn leading_int(s: &str) -> Option<i32> {
    LEADING_INT.captures(s)?.get(1)?.as_str().parse().ok()
}

fn frequency(s: &str) -> Result<Ordinal, String> {
    let rank = if s.contains("mensual") {
        1
    } else if s.contains("quincenal") {
        2
    } else {
        match leading_int(s) {
            Some(n @ 1..=5) => n + 2,
            Some(n) if n >= 6 => 8,
            _ => return Err(format!("`{s}` is not a weekly frequency")),
        }
    };
    Ok(Ordinal::new(rank, FREQUENCY_LABELS[(rank - 1) as usize]))
}

fn floor(s: &str) -> Result<Ordinal, String> {
    let level = if s.contains("semisotano") {
        0
    } else if s.contains("sotano") {
        -1
    } else if s.contains("primer") {
        1
    } else if s.contains("segundo") {
        2
    } else if s.contains("tercer") {
        3
    } else {
        SIGNED_INT
            .find(s)
            .and_then(|m| m.as_str().parse::<i32>().ok())
            .ok_or_else(|| format!("`{s}` does not name a floor"))?
    };
    let (lo, hi) = FLOOR;
    if !(lo..=hi).contains(&level) {
        return Err(format!("floor {level} is outside {lo}..{hi}"));
    }
    let label = match level {
        -1 => "sotano".to_string(),
        0 => "semisotano".to_string(),
        n => n.to_string(),
    };
    Ok(Ordinal::new(level, label))
}

fn age_band(s: &str) -> Result<Ordinal, String> {
    if s.starts_with("mas de 20") || s.starts_with("mayor a 20") {
        return Ok(Ordinal::new(5, AGE_BAND_OVER_20));
    }
    if let Some(c) = RANGE.captures(s) {
        let lo: i32 = c[1].parse().map_err(|_| format!("`{s}` is not an age band"))?;
        let hi: i32 = c[2].parse().map_err(|_| format!("`{s}` is not an age band"))?;
        return AGE_BANDS
            .iter()
            .position(|(a, b, _)| *a == lo && *b == hi)
            .map(|i| Ordinal::new(i as i32 + 1, AGE_BANDS[i].2))
            .ok_or_else(|| format!("`{s}` is not an age band"));
    }
    match parse_integer(s) {
        Some(n @ 1..=4) => Ok(Ordinal::new(n as i32, AGE_BANDS[(n - 1) as usize].2)),
        Some(5) => Ok(Ordinal::new(5, AGE_BAND_OVER_20)),
        _ => Err(format!("`{s}` is not an age band")),
    }
}
