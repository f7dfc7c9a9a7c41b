use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for the nearby skills endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NearbySkillsQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(alias = "latitude")]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: Option<f64>,
    #[validate(range(min = 0.001))]
    #[serde(alias = "radiusKm")]
    pub radius: Option<f64>,
    #[validate(length(max = 64))]
    pub category: Option<String>,
    #[validate(length(max = 200))]
    #[serde(alias = "query")]
    pub q: Option<String>,
    #[serde(rename = "availableOnly", default)]
    pub available_only: bool,
}

/// Query for the zoom helper endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ZoomQuery {
    #[validate(range(min = 0.001))]
    #[serde(alias = "radiusKm")]
    pub radius: f64,
}

/// A numeric field in the listing feed, sent either as a number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedNumber {
    Number(f64),
    Text(String),
}

impl FeedNumber {
    /// Parse to a finite float, treating blanks and garbage as absent
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            FeedNumber::Number(n) => *n,
            FeedNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// One record of the host-provided listing feed
///
/// Every field is optional; missing values are defaulted during
/// normalization rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingFeedItem {
    #[serde(default)]
    pub id: Option<FeedNumber>,
    #[serde(default)]
    pub skill_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<FeedNumber>,
    #[serde(default)]
    pub rate: Option<FeedNumber>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub member_id: Option<FeedNumber>,
    #[serde(default)]
    pub latitude: Option<FeedNumber>,
    #[serde(default)]
    pub longitude: Option<FeedNumber>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_number_parsing() {
        assert_eq!(FeedNumber::Number(19.07).as_f64(), Some(19.07));
        assert_eq!(FeedNumber::Text(" 72.87 ".to_string()).as_f64(), Some(72.87));
        assert_eq!(FeedNumber::Text("".to_string()).as_f64(), None);
        assert_eq!(FeedNumber::Text("abc".to_string()).as_f64(), None);
    }

    #[test]
    fn test_feed_item_accepts_mixed_types() {
        let item: ListingFeedItem = serde_json::from_str(
            r#"{"id": "12", "skill_name": "Chess", "latitude": 19.1, "longitude": "72.9"}"#,
        )
        .unwrap();

        assert_eq!(item.id.and_then(|id| id.as_f64()), Some(12.0));
        assert_eq!(item.longitude.and_then(|l| l.as_f64()), Some(72.9));
        assert!(item.member_name.is_none());
    }

    #[test]
    fn test_nearby_query_validation() {
        let query = NearbySkillsQuery {
            lat: Some(120.0),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = NearbySkillsQuery {
            lat: Some(28.6),
            lng: Some(77.2),
            radius: Some(5.0),
            ..Default::default()
        };
        assert!(query.validate().is_ok());
    }
}
