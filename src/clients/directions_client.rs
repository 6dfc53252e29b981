//! Cliente de Google Directions API
//!
//! Obtiene distancia y duración de conducción de un tramo. Los metros se
//! redondean a kilómetros enteros.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::DistanceLookup;
use crate::models::distance::DistanceLeg;
use crate::utils::errors::LookupError;

const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    distance: TextValue,
    duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
    value: f64,
}

pub struct GoogleDirectionsClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GoogleDirectionsClient {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, DIRECTIONS_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            api_key,
            base_url,
            client,
        })
    }

    fn request_url(&self, origin: &str, destination: &str, avoid_expressways: bool) -> String {
        let mut url = format!(
            "{}?origin={}&destination={}&mode=driving&language=ja&key={}",
            self.base_url,
            urlencoding::encode(origin),
            urlencoding::encode(destination),
            urlencoding::encode(&self.api_key),
        );
        if avoid_expressways {
            url.push_str("&avoid=highways");
        }
        url
    }
}

/// Convierte la respuesta de la API en un tramo
fn parse_leg(response: DirectionsResponse) -> Result<DistanceLeg, LookupError> {
    if response.status != "OK" {
        return Err(LookupError::Provider(response.status));
    }

    let leg = response
        .routes
        .into_iter()
        .next()
        .and_then(|route| route.legs.into_iter().next())
        .ok_or_else(|| LookupError::Provider("ZERO_RESULTS".to_string()))?;

    Ok(DistanceLeg {
        distance_km: (leg.distance.value / 1000.0).round(),
        duration_text: leg.duration.text,
    })
}

#[async_trait]
impl DistanceLookup for GoogleDirectionsClient {
    async fn lookup(
        &self,
        origin: &str,
        destination: &str,
        avoid_expressways: bool,
    ) -> Result<DistanceLeg, LookupError> {
        log::debug!("🧭 Directions: {} → {} (avoid highways: {})", origin, destination, avoid_expressways);

        let url = self.request_url(origin, destination, avoid_expressways);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            log::error!("❌ Directions HTTP {}", status);
            return Err(LookupError::Transport(format!("HTTP {}", status)));
        }

        let body: DirectionsResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let leg = parse_leg(body)?;
        log::debug!("✅ Directions: {} km, {}", leg.distance_km, leg.duration_text);
        Ok(leg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leg_rounds_meters_to_km() {
        let json = r#"{
            "status": "OK",
            "routes": [{"legs": [{
                "distance": {"text": "12.6 km", "value": 12600},
                "duration": {"text": "25分", "value": 1500}
            }]}]
        }"#;
        let leg = parse_leg(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(leg.distance_km, 13.0);
        assert_eq!(leg.duration_text, "25分");
    }

    #[test]
    fn test_parse_leg_non_ok_status() {
        let json = r#"{"status": "NOT_FOUND", "routes": []}"#;
        let err = parse_leg(serde_json::from_str(json).unwrap()).unwrap_err();
        assert_eq!(err, LookupError::Provider("NOT_FOUND".to_string()));
    }

    #[test]
    fn test_request_url_avoids_highways_only_when_asked() {
        let client = GoogleDirectionsClient::with_base_url("k".into(), "http://localhost/d".into()).unwrap();
        let general = client.request_url("東京都", "千葉県", true);
        assert!(general.starts_with("http://localhost/d?origin=%E6%9D%B1"));
        assert!(general.ends_with("&avoid=highways"));
        assert!(!client.request_url("a", "b", false).contains("avoid"));
    }
}
