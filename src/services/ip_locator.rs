use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use crate::models::GeoPoint;
use crate::services::geolocation::{GeolocationError, GeolocationOptions, GeolocationProvider};

/// Geolocation provider backed by a JSON lookup endpoint
///
/// The endpoint answers `GET` with an object carrying `latitude` and
/// `longitude` (numbers or numeric strings), as IP geolocation services do.
#[derive(Debug, Clone)]
pub struct HttpGeolocationProvider {
    endpoint: String,
    client: Client,
}

impl HttpGeolocationProvider {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GeolocationError> {
        let client = Client::builder().build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GeolocationProvider for HttpGeolocationProvider {
    async fn current_position(&self, options: &GeolocationOptions) -> Result<GeoPoint, GeolocationError> {
        tracing::debug!("Looking up position at: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .timeout(options.timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GeolocationError::PermissionDenied);
            }
            status if !status.is_success() => {
                return Err(GeolocationError::Unavailable(format!(
                    "Lookup endpoint returned {}",
                    status
                )));
            }
            _ => {}
        }

        let json: Value = response.json().await?;

        let latitude = coordinate(&json, "latitude")
            .ok_or_else(|| GeolocationError::InvalidResponse("Missing latitude".into()))?;
        let longitude = coordinate(&json, "longitude")
            .ok_or_else(|| GeolocationError::InvalidResponse("Missing longitude".into()))?;

        GeoPoint::new(latitude, longitude)
            .map_err(|e| GeolocationError::InvalidResponse(e.to_string()))
    }
}

fn coordinate(json: &Value, field: &str) -> Option<f64> {
    match json.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
