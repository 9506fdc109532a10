use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The board writes `null` for fields it has no value for yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Fields the board knows about. Anything else on a stored record rides along in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub picture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub graduation_year: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_idea: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_working_on_idea: String,
    #[serde(deserialize_with = "null_as_default")]
    pub social: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub university: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub looking_for: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// Posts are considered the same when title and university match.
    pub fn identity(title: &str, university: &str) -> String {
        format!("{title}::{university}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({
            "id": 7,
            "email": "someone@cmu.edu",
            "university": "Carnegie Mellon University",
            "role": "admin",
            "profile": { "firstName": "Some", "pronouns": "they/them" }
        });

        let user: User = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.extra.get("role"), Some(&json!("admin")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["role"], raw["role"]);
        assert_eq!(back["profile"]["pronouns"], json!("they/them"));
        assert_eq!(back["profile"]["firstName"], json!("Some"));
        assert!(back.get("lat").is_none());
    }

    #[test]
    fn test_post_uses_camel_case() {
        let post: Post = serde_json::from_value(json!({
            "id": 3,
            "userId": 9,
            "title": "Green Infrastructure Network",
            "lookingFor": "Env engineers",
            "createdAt": "2025-01-01"
        }))
        .unwrap();

        assert_eq!(post.user_id, 9);
        assert_eq!(post.looking_for, "Env engineers");
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_explicit_nulls_read_as_empty() {
        let post: Post = serde_json::from_value(json!({
            "id": 4,
            "userId": 2,
            "title": "Community Health Monitor",
            "university": "University of Pittsburgh",
            "projectLink": null,
            "stage": null,
            "comments": null
        }))
        .unwrap();

        assert_eq!(post.project_link, "");
        assert_eq!(post.stage, "");
        assert!(post.comments.is_empty());

        let user: User = serde_json::from_value(json!({
            "id": 2,
            "email": null,
            "university": null,
            "profile": { "firstName": "Emily", "bio": null, "social": null }
        }))
        .unwrap();

        assert_eq!(user.email, "");
        assert_eq!(user.university, None);
        let profile = user.profile.unwrap();
        assert_eq!(profile.first_name, "Emily");
        assert_eq!(profile.bio, "");
        assert!(profile.social.is_empty());
    }
}
