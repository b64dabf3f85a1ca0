//! Ordered validation pipeline for point submissions.
//!
//! Stages run in a fixed order and the first failing stage wins:
//! name, address, coordinates, materials. Absent or wrongly typed fields are
//! classified into the stage that reads them, never surfaced as a parse error.

use std::ops::RangeInclusive;

use models::limits::{
    ADDRESS_LEN, CONTACT_MAX, HOURS_MAX, LAT_RANGE, LNG_RANGE, NAME_LEN, NOTES_MAX,
};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationKind {
    InvalidName,
    InvalidAddress,
    InvalidCoordinates,
    InvalidMaterials,
}

impl ValidationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::InvalidName => "InvalidName",
            ValidationKind::InvalidAddress => "InvalidAddress",
            ValidationKind::InvalidCoordinates => "InvalidCoordinates",
            ValidationKind::InvalidMaterials => "InvalidMaterials",
        }
    }

    /// User-facing message shown by the web client.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationKind::InvalidName => "Nome inválido (2-100 caracteres).",
            ValidationKind::InvalidAddress => "Endereço inválido (5-200 caracteres).",
            ValidationKind::InvalidCoordinates => "Coordenadas inválidas.",
            ValidationKind::InvalidMaterials => "Informe ao menos um material aceito.",
        }
    }
}

/// Tagged validation failure: kind plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub message: String,
}

impl From<ValidationKind> for ValidationError {
    fn from(kind: ValidationKind) -> Self {
        Self { kind, message: kind.message().to_string() }
    }
}

/// A submission that passed every stage, with all text fields normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPoint {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub materials: Vec<String>,
    pub hours: String,
    pub contact: String,
    pub notes: String,
}

/// Run the pipeline over a raw JSON body.
///
/// Anything other than an object is validated as an empty object.
pub fn validate(raw: &Value, reject_blank_materials: bool) -> Result<ValidatedPoint, ValidationError> {
    let empty = Map::new();
    let body = raw.as_object().unwrap_or(&empty);

    let name = check_text(body.get("name"), NAME_LEN, ValidationKind::InvalidName)?;
    let address = check_text(body.get("address"), ADDRESS_LEN, ValidationKind::InvalidAddress)?;
    let (lat, lng) = check_coordinates(body.get("lat"), body.get("lng"))?;
    let materials = check_materials(body.get("materials"), reject_blank_materials)?;

    Ok(ValidatedPoint {
        name,
        address,
        lat,
        lng,
        materials,
        hours: clip(body.get("hours"), HOURS_MAX),
        contact: clip(body.get("contact"), CONTACT_MAX),
        notes: clip(body.get("notes"), NOTES_MAX),
    })
}

fn check_text(v: Option<&Value>, len: RangeInclusive<usize>, kind: ValidationKind) -> Result<String, ValidationError> {
    let trimmed = v.and_then(Value::as_str).map(str::trim).ok_or(kind)?;
    if !len.contains(&trimmed.chars().count()) {
        return Err(kind.into());
    }
    Ok(trimmed.to_string())
}

/// Numbers, or strings holding a number. Non-finite values are rejected.
fn coerce_number(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn check_coordinates(lat: Option<&Value>, lng: Option<&Value>) -> Result<(f64, f64), ValidationError> {
    let kind = ValidationKind::InvalidCoordinates;
    let lat = coerce_number(lat).filter(|n| LAT_RANGE.contains(n)).ok_or(kind)?;
    let lng = coerce_number(lng).filter(|n| LNG_RANGE.contains(n)).ok_or(kind)?;
    Ok((lat, lng))
}

fn check_materials(v: Option<&Value>, reject_blank: bool) -> Result<Vec<String>, ValidationError> {
    let kind = ValidationKind::InvalidMaterials;
    let items = match v {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(kind.into()),
    };

    let cleaned: Vec<String> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(number_text(n)),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .filter(|m| !m.is_empty())
        .collect();

    if cleaned.is_empty() && reject_blank {
        return Err(kind.into());
    }
    Ok(cleaned)
}

/// Whole-valued floats drop the fraction, so `7.0` reads `7` like `7` does.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

/// Trim and cut to `max` characters; absent or non-text values become "".
fn clip(v: Option<&Value>, max: usize) -> String {
    v.and_then(Value::as_str)
        .map(|s| s.trim().chars().take(max).collect())
        .unwrap_or_default()
}
