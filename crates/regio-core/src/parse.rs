//! Remote payload parsing.
//!
//! The remote answers every level with a JSON array of objects:
//!
//! - province / city: `{ "id": <int code>, "name": <string> }`
//! - county: `{ "weather_id": <string>, "name": <string> }`
//!
//! Parsing is all-or-nothing: one bad record fails the whole batch, so a
//! level is never half-parsed. Integer codes are accepted as JSON numbers or
//! numeric strings.

use serde_json::{Map, Value};

use crate::entities::{NewCity, NewCounty, NewProvince};
use crate::errors::ParseError;
use crate::request::ResolveRequest;
use crate::store::RegionBatch;

type Record = Map<String, Value>;

/// Parse a province list.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is blank, not an array of objects, or
/// any record lacks a valid `id` or `name`.
pub fn parse_provinces(body: &[u8]) -> Result<Vec<NewProvince>, ParseError> {
    records(body)?
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Ok(NewProvince {
                name: name_field(record, index)?,
                code: code_field(record, index)?,
            })
        })
        .collect()
}

/// Parse a city list, stamping each record with `province_id`.
///
/// # Errors
///
/// Same conditions as [`parse_provinces`].
pub fn parse_cities(body: &[u8], province_id: i64) -> Result<Vec<NewCity>, ParseError> {
    records(body)?
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Ok(NewCity {
                name: name_field(record, index)?,
                code: code_field(record, index)?,
                province_id,
            })
        })
        .collect()
}

/// Parse a county list, stamping each record with `city_id`.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is blank, not an array of objects, or
/// any record lacks a valid `weather_id` or `name`.
pub fn parse_counties(body: &[u8], city_id: i64) -> Result<Vec<NewCounty>, ParseError> {
    records(body)?
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Ok(NewCounty {
                name: name_field(record, index)?,
                weather_id: weather_id_field(record, index)?,
                city_id,
            })
        })
        .collect()
}

/// Parse the body fetched for `request` into the batch for its level.
///
/// # Errors
///
/// Propagates the level-specific parser's [`ParseError`].
pub fn parse_batch(request: &ResolveRequest, body: &[u8]) -> Result<RegionBatch, ParseError> {
    match *request {
        ResolveRequest::Provinces => parse_provinces(body).map(RegionBatch::Provinces),
        ResolveRequest::Cities { province_id, .. } => {
            parse_cities(body, province_id).map(RegionBatch::Cities)
        }
        ResolveRequest::Counties { city_id, .. } => {
            parse_counties(body, city_id).map(RegionBatch::Counties)
        }
    }
}

fn records(body: &[u8]) -> Result<Vec<Record>, ParseError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ParseError::Malformed(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ParseError::Malformed("expected a JSON array".into()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(ParseError::Malformed(format!(
                "record {index} is not an object: {other}"
            ))),
        })
        .collect()
}

fn required<'a>(
    record: &'a Record,
    index: usize,
    field: &'static str,
) -> Result<&'a Value, ParseError> {
    match record.get(field) {
        None | Some(Value::Null) => Err(ParseError::MissingField { index, field }),
        Some(value) => Ok(value),
    }
}

fn name_field(record: &Record, index: usize) -> Result<String, ParseError> {
    let field = "name";
    match required(record, index, field)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::String(_) => Err(ParseError::InvalidField {
            index,
            field,
            reason: "empty string".into(),
        }),
        other => Err(ParseError::InvalidField {
            index,
            field,
            reason: format!("expected string, got {other}"),
        }),
    }
}

fn code_field(record: &Record, index: usize) -> Result<i64, ParseError> {
    let field = "id";
    let invalid = |reason: String| ParseError::InvalidField {
        index,
        field,
        reason,
    };
    match required(record, index, field)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| invalid(format!("{n} is not an integer"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid(format!("'{s}': {e}"))),
        other => Err(invalid(format!("expected integer, got {other}"))),
    }
}

fn weather_id_field(record: &Record, index: usize) -> Result<String, ParseError> {
    let field = "weather_id";
    match required(record, index, field)? {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ParseError::InvalidField {
            index,
            field,
            reason: format!("expected non-empty string, got {other}"),
        }),
    }
}
