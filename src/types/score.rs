// src/types/score.rs
//! Lenient score parsing: the backend sends percentages as numbers or strings

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

pub const MAX_SCORE: u8 = 100;

/// Parse the leading integer of a score string ("85", "85%", " 72 ")
pub fn parse_score(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }

    // Anything past three digits is already out of range
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(clamp_score(value))
}

pub fn clamp_score(value: u64) -> u8 {
    value.min(MAX_SCORE as u64) as u8
}

struct ScoreVisitor {
    null_as_zero: bool,
}

impl<'de> Visitor<'de> for ScoreVisitor {
    type Value = u8;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a percentage as an integer, float or numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u8, E> {
        Ok(clamp_score(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u8, E> {
        Ok(clamp_score(v.max(0) as u64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u8, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("invalid score: {}", v)));
        }
        Ok(clamp_score(v.max(0.0).trunc() as u64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u8, E> {
        parse_score(v).ok_or_else(|| E::custom(format!("invalid score: {:?}", v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<u8, E> {
        if self.null_as_zero {
            Ok(0)
        } else {
            Err(E::custom("score is null"))
        }
    }

    fn visit_none<E: de::Error>(self) -> Result<u8, E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<u8, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// Strict variant for analysis results: `null` is rejected
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    deserializer.deserialize_any(ScoreVisitor {
        null_as_zero: false,
    })
}

/// History records may carry a null score when the model returned none
pub fn deserialize_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    deserializer.deserialize_any(ScoreVisitor { null_as_zero: true })
}
