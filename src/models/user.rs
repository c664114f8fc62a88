use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The UserProfile is the server-returned record of the authenticated user.
/// Decoding is lenient: `null` or non-string values in the known fields fall
/// back to defaults, and fields we do not model (including a plain `id`) are
/// kept in `extra` as-is.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(rename = "profileImageUrl", default, deserialize_with = "lenient_string")]
    pub profile_image_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| scalar_to_string(&v)))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|v| scalar_to_string(&v))
        .unwrap_or_default())
}

impl UserProfile {
    /// The account id: `_id` if present, else a plain `id` field.
    pub fn account_id(&self) -> Option<String> {
        self.id
            .clone()
            .or_else(|| self.extra.get("id").and_then(scalar_to_string))
    }

    /// Whether `other` describes the same account. Records without an id
    /// fall back to comparing emails.
    pub fn is_same_user(&self, other: &UserProfile) -> bool {
        match (self.account_id(), other.account_id()) {
            (Some(a), Some(b)) => a == b,
            _ => !self.email.is_empty() && self.email == other.email,
        }
    }

    /// Overlay the non-empty fields of `newer` on top of this record.
    pub fn merge_from(&mut self, newer: UserProfile) {
        if newer.id.is_some() {
            self.id = newer.id;
        }
        if !newer.name.is_empty() {
            self.name = newer.name;
        }
        if !newer.email.is_empty() {
            self.email = newer.email;
        }
        if !newer.profile_image_url.is_empty() {
            self.profile_image_url = newer.profile_image_url;
        }
        self.extra.extend(newer.extra);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_mongo_style_record() {
        let user: UserProfile = serde_json::from_value(json!({
            "_id": "64f0",
            "name": "Ada",
            "email": "ada@example.com",
            "profileImageUrl": "http://img/ada.png",
            "createdAt": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(user.id.as_deref(), Some("64f0"));
        assert_eq!(user.profile_image_url, "http://img/ada.png");
        assert_eq!(user.extra["createdAt"], "2024-01-01");
    }

    #[test]
    fn test_nulls_and_numbers_decode_leniently() {
        let user: UserProfile = serde_json::from_value(json!({
            "_id": 7,
            "name": null,
            "email": "ada@example.com",
            "profileImageUrl": null
        }))
        .unwrap();

        assert_eq!(user.id.as_deref(), Some("7"));
        assert_eq!(user.name, "");
        assert_eq!(user.profile_image_url, "");
    }

    #[test]
    fn test_plain_id_next_to_mongo_id_stays_in_extra() {
        let user: UserProfile = serde_json::from_value(json!({"_id": "1", "id": "1"})).unwrap();
        assert_eq!(user.id.as_deref(), Some("1"));
        assert_eq!(user.extra["id"], "1");

        let numeric: UserProfile = serde_json::from_value(json!({"id": 42})).unwrap();
        assert!(numeric.id.is_none());
        assert_eq!(numeric.account_id().as_deref(), Some("42"));
    }

    #[test]
    fn test_merge_keeps_old_fields_when_new_ones_are_empty() {
        let mut current = UserProfile {
            id: Some("1".to_string()),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            profile_image_url: "http://img/ada.png".to_string(),
            extra: Map::new(),
        };
        let newer = UserProfile {
            id: Some("1".to_string()),
            name: "Ada Lovelace".to_string(),
            ..Default::default()
        };

        assert!(current.is_same_user(&newer));
        current.merge_from(newer);

        assert_eq!(current.name, "Ada Lovelace");
        assert_eq!(current.email, "ada@example.com");
        assert_eq!(current.profile_image_url, "http://img/ada.png");
    }

    #[test]
    fn test_different_ids_are_different_users() {
        let a = UserProfile {
            id: Some("1".to_string()),
            email: "same@example.com".to_string(),
            ..Default::default()
        };
        let b = UserProfile {
            id: Some("2".to_string()),
            email: "same@example.com".to_string(),
            ..Default::default()
        };
        assert!(!a.is_same_user(&b));
    }
}
