//! Reverse geocoding via a Nominatim-compatible endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use waterway_core::{Coordinate, Placemark};

use super::{ensure_success, ProviderError, ReverseGeocoder};

const INLAND_WATER_KEYS: &[&str] = &["water", "river", "canal", "lake", "reservoir"];
const OCEAN_KEYS: &[&str] = &["ocean", "sea", "bay"];
const AREA_KEYS: &[&str] = &["leisure", "natural", "tourism", "park", "water", "waterway"];

pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "type")]
    place_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: HashMap<String, String>,
}

impl NominatimGeocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

fn first_value(address: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| address.get(*key))
        .find(|value| !value.is_empty())
        .cloned()
}

fn to_placemark(payload: NominatimResponse) -> Result<Placemark, ProviderError> {
    if let Some(error) = payload.error {
        return Err(ProviderError::Decode(error));
    }

    let name = payload.name.filter(|name| !name.is_empty());
    let category = payload.category.as_deref().unwrap_or_default();
    let place_type = payload.place_type.as_deref().unwrap_or_default();

    let water_class = category == "waterway"
        || (category == "natural" && matches!(place_type, "water" | "wetland" | "strait"));
    let ocean_class = category == "natural" && matches!(place_type, "bay" | "sea" | "coastline");

    let mut inland_water = first_value(&payload.address, INLAND_WATER_KEYS);
    if inland_water.is_none() && water_class {
        inland_water = Some(name.clone().unwrap_or_else(|| place_type.to_string()));
    }
    let mut ocean = first_value(&payload.address, OCEAN_KEYS);
    if ocean.is_none() && ocean_class {
        ocean = Some(name.clone().unwrap_or_else(|| place_type.to_string()));
    }

    let areas_of_interest = AREA_KEYS
        .iter()
        .filter_map(|key| payload.address.get(*key))
        .filter(|value| !value.is_empty())
        .cloned()
        .collect();

    Ok(Placemark {
        name,
        thoroughfare: payload.address.get("road").cloned(),
        sub_thoroughfare: payload.address.get("house_number").cloned(),
        inland_water,
        ocean,
        areas_of_interest,
        category: None,
    })
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Placemark, ProviderError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", format!("{:.6}", coordinate.lat)),
                ("lon", format!("{:.6}", coordinate.lon)),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;
        ensure_success(&response)?;
        let payload: NominatimResponse = response.json().await?;
        to_placemark(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waterway_core::placemark_on_water;

    fn parse(value: serde_json::Value) -> NominatimResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn waterway_result_maps_to_inland_water() {
        let placemark = to_placemark(parse(serde_json::json!({
            "category": "waterway",
            "type": "river",
            "name": "Spree",
            "address": { "city": "Berlin", "country": "Deutschland" }
        })))
        .unwrap();
        assert_eq!(placemark.inland_water.as_deref(), Some("Spree"));
        assert!(placemark_on_water(&placemark));
    }

    #[test]
    fn street_address_maps_to_thoroughfare() {
        let placemark = to_placemark(parse(serde_json::json!({
            "category": "building",
            "type": "yes",
            "name": "",
            "address": { "road": "Karl-Liebknecht-Straße", "house_number": "5" }
        })))
        .unwrap();
        assert_eq!(placemark.thoroughfare.as_deref(), Some("Karl-Liebknecht-Straße"));
        assert_eq!(placemark.sub_thoroughfare.as_deref(), Some("5"));
        assert!(placemark.name.is_none());
        assert!(!placemark_on_water(&placemark));
    }

    #[test]
    fn address_water_and_areas_are_copied() {
        let placemark = to_placemark(parse(serde_json::json!({
            "category": "leisure",
            "type": "park",
            "name": "Treptower Park",
            "address": { "park": "Treptower Park", "water": "Karpfenteich", "bay": "Rummelsburger Bucht" }
        })))
        .unwrap();
        assert_eq!(placemark.inland_water.as_deref(), Some("Karpfenteich"));
        assert_eq!(placemark.ocean.as_deref(), Some("Rummelsburger Bucht"));
        assert_eq!(
            placemark.areas_of_interest,
            vec!["Treptower Park".to_string(), "Karpfenteich".to_string()]
        );
    }

    #[test]
    fn error_payload_is_a_failure() {
        let result = to_placemark(parse(serde_json::json!({ "error": "Unable to geocode" })));
        assert!(matches!(result, Err(ProviderError::Decode(_))));
    }
}
