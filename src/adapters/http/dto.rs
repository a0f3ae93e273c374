//! HTTP DTOs for the patron endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::FeedId;
use crate::domain::identity::Identity;

/// Query string Patreon appends to the redirect URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the patron declines access.
    pub error: Option<String>,
}

/// Response for `GET /api/identity`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum IdentityResponse {
    Patron(Identity),
    Anonymous { anonymous: bool },
}

impl IdentityResponse {
    pub fn anonymous() -> Self {
        IdentityResponse::Anonymous { anonymous: true }
    }
}

/// Response for `POST /api/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateFeedResponse {
    pub id: FeedId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PatronId;
    use crate::domain::patronage::FeatureLevel;

    #[test]
    fn anonymous_serializes_as_flag() {
        let json = serde_json::to_value(IdentityResponse::anonymous()).unwrap();
        assert_eq!(json, serde_json::json!({"anonymous": true}));
    }

    #[test]
    fn patron_serializes_identity_fields() {
        let identity = Identity {
            user_id: PatronId::new("42").unwrap(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            profile_url: "https://www.patreon.com/ada".to_string(),
            feature_level: FeatureLevel::new(2),
        };

        let json = serde_json::to_value(IdentityResponse::Patron(identity)).unwrap();

        assert_eq!(json["user_id"], "42");
        assert_eq!(json["feature_level"], 2);
        assert!(json.get("anonymous").is_none());
    }

    #[test]
    fn callback_params_tolerate_missing_fields() {
        let params: CallbackParams = serde_json::from_str(r#"{"error":"access_denied"}"#).unwrap();
        assert!(params.code.is_none());
        assert_eq!(params.error.as_deref(), Some("access_denied"));
    }
}
