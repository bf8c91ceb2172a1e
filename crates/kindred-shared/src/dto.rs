//! Data Transfer Objects - request/response types for the API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A point as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// A post in any feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub charity_id: Option<String>,
    pub user_id: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// Body of `POST /api/posts`. With `charity_id` the post is published as
/// that charity; otherwise as the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub charity_id: Option<String>,
}

/// Recent or following feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<PostResponse>,
}

/// Query string of `GET /api/feed/local`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalFeedQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
}

/// Local feed: posts nearest first plus each post's distance in miles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalFeedResponse {
    pub posts: Vec<PostResponse>,
    pub distances: HashMap<String, f64>,
    pub radius_miles: f64,
    /// The location the feed was computed from, if one was known.
    pub location: Option<LocationDto>,
}

/// Query string of `GET /api/charities`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharityListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharityResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<LocationDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_donated_cents: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    pub charity_id: String,
    pub following: bool,
    pub follower_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub display_name: String,
    pub location: Option<LocationDto>,
    pub feed_radius_miles: f64,
}

/// Direction of one interactive radius step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusStepDto {
    Increase,
    Decrease,
}

/// Body of `PUT /api/me/radius`: either one interactive step or an absolute value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateRadiusRequest {
    Step { step: RadiusStepDto },
    Miles { miles: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDonationRequest {
    pub charity_id: String,
    pub amount_cents: i64,
    pub payment_intent_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationResponse {
    pub id: String,
    pub charity_id: String,
    pub amount_cents: i64,
    pub payment_intent_id: String,
    pub created_at: String,
}

/// Payment relay request. Field names follow what the mobile client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in cents.
    pub amount: i64,
    #[serde(default)]
    pub payment_method_types: Vec<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, rename = "platformFeePercent")]
    pub platform_fee_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_request_accepts_minimal_body() {
        let req: CreatePaymentIntentRequest = serde_json::from_str(r#"{"amount": 2500}"#).unwrap();
        assert_eq!(req.amount, 2500);
        assert!(req.payment_method_types.is_empty());
        assert_eq!(req.destination, None);
        assert_eq!(req.platform_fee_percent, None);
    }

    #[test]
    fn test_payment_request_reads_camel_case_fee() {
        let req: CreatePaymentIntentRequest = serde_json::from_str(
            r#"{"amount": 1000, "payment_method_types": ["card"], "destination": "acct_1", "platformFeePercent": 2.5}"#,
        )
        .unwrap();
        assert_eq!(req.platform_fee_percent, Some(2.5));
        assert_eq!(req.destination.as_deref(), Some("acct_1"));
    }

    #[test]
    fn test_radius_request_variants() {
        let step: UpdateRadiusRequest = serde_json::from_str(r#"{"step": "increase"}"#).unwrap();
        assert!(matches!(
            step,
            UpdateRadiusRequest::Step {
                step: RadiusStepDto::Increase
            }
        ));

        let miles: UpdateRadiusRequest = serde_json::from_str(r#"{"miles": 25}"#).unwrap();
        assert!(matches!(miles, UpdateRadiusRequest::Miles { miles } if miles == 25.0));
    }

    #[test]
    fn test_radius_request_rejects_unknown_step() {
        let result = serde_json::from_str::<UpdateRadiusRequest>(r#"{"step": "sideways"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_post_defaults_to_user_post() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"content": "Hi"}"#).unwrap();
        assert_eq!(req.charity_id, None);
        assert_eq!(req.image_url, None);
    }
}
