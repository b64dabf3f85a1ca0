//! Shared helpers for the recycle points workspace: logging setup,
//! runtime directory checks and small wire types used by several crates.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::now();
        assert!(h.ok);
        assert!(h.now.ends_with('Z'));
    }

    #[test]
    fn error_body_serializes_as_error_field() {
        let body = types::ErrorBody::new("boom");
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, serde_json::json!({"error": "boom"}));
    }
}
