use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recycling/disposal location and the materials it accepts.
///
/// Records are created once by the registry and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPoint {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub materials: Vec<String>,
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub notes: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl CollectionPoint {
    /// Case-insensitive, whitespace-trimmed exact match against declared materials.
    pub fn accepts(&self, material: &str) -> bool {
        let wanted = normalize_material(material);
        self.materials.iter().any(|m| normalize_material(m) == wanted)
    }
}

/// Comparison key for material names.
pub fn normalize_material(s: &str) -> String {
    s.trim().to_lowercase()
}

/// On-disk document: `{ "points": [...] }`, in insertion order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct PointsDocument {
    pub points: Vec<CollectionPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::now_millis;

    fn sample() -> CollectionPoint {
        CollectionPoint {
            id: Uuid::new_v4(),
            name: "Ecoponto Central".into(),
            address: "Rua das Flores, 123".into(),
            lat: -15.78,
            lng: -47.92,
            materials: vec!["Vidro".into(), "Papel".into()],
            hours: String::new(),
            contact: String::new(),
            notes: String::new(),
            created_at: now_millis(),
        }
    }

    #[test]
    fn serializes_with_camel_case_created_at() {
        let p = sample();
        let v = serde_json::to_value(&p).unwrap();
        assert!(v.get("createdAt").and_then(|s| s.as_str()).is_some());
        assert!(v.get("created_at").is_none());
        assert_eq!(v["lat"], serde_json::json!(-15.78));
        assert_eq!(v["id"], serde_json::json!(p.id.to_string()));
    }

    #[test]
    fn document_round_trips_exactly() {
        let doc = PointsDocument { points: vec![sample(), sample()] };
        let bytes = serde_json::to_vec_pretty(&doc).unwrap();
        let back: PointsDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let raw = serde_json::json!({
            "id": Uuid::new_v4(),
            "name": "Ponto",
            "address": "Rua A, 1",
            "lat": 0.0,
            "lng": 0.0,
            "materials": ["Metal"],
            "createdAt": "2024-01-01T00:00:00.000Z"
        });
        let p: CollectionPoint = serde_json::from_value(raw).unwrap();
        assert_eq!(p.hours, "");
        assert_eq!(p.contact, "");
        assert_eq!(p.notes, "");
    }

    #[test]
    fn accepts_ignores_case_and_whitespace() {
        let p = sample();
        assert!(p.accepts("vidro"));
        assert!(p.accepts(" VIDRO "));
        assert!(p.accepts("Papel"));
        assert!(!p.accepts("Pap"));
        assert!(!p.accepts("metal"));
    }
}
