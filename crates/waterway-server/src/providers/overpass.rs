//! Marina/beach point-of-interest search via the Overpass API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use waterway_core::{Coordinate, Placemark, PoiCategory};

use super::{ensure_success, PlaceSearchService, ProviderError};

pub struct OverpassPlaceSearch {
    client: Client,
    url: String,
    timeout_s: u64,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    tags: Option<HashMap<String, String>>,
}

impl OverpassPlaceSearch {
    pub fn new(client: Client, url: impl Into<String>, timeout_s: u64) -> Self {
        Self {
            client,
            url: url.into(),
            timeout_s: timeout_s.max(5),
        }
    }
}

fn category_filters(category: PoiCategory) -> &'static [&'static str] {
    match category {
        PoiCategory::Marina => &["[\"leisure\"=\"marina\"]"],
        PoiCategory::Beach => &["[\"natural\"=\"beach\"]", "[\"leisure\"=\"beach_resort\"]"],
    }
}

pub(crate) fn build_query(
    center: Coordinate,
    radius_m: f64,
    categories: &[PoiCategory],
    timeout_s: u64,
) -> String {
    let around = format!("(around:{:.0},{:.6},{:.6})", radius_m.max(1.0), center.lat, center.lon);
    let mut query = format!("[out:json][timeout:{timeout_s}];\n(\n");
    for category in categories {
        for filter in category_filters(*category) {
            query.push_str(&format!("  node{filter}{around};\n"));
            query.push_str(&format!("  way{filter}{around};\n"));
        }
    }
    query.push_str(");\nout center tags;");
    query
}

fn element_category(tags: &HashMap<String, String>) -> Option<PoiCategory> {
    match (
        tags.get("leisure").map(String::as_str),
        tags.get("natural").map(String::as_str),
    ) {
        (Some("marina"), _) => Some(PoiCategory::Marina),
        (Some("beach_resort"), _) | (_, Some("beach")) => Some(PoiCategory::Beach),
        _ => None,
    }
}

fn to_placemarks(payload: OverpassResponse) -> Vec<Placemark> {
    payload
        .elements
        .into_iter()
        .filter_map(|element| element.tags)
        .map(|tags| {
            let name = tags.get("name").cloned();
            let mut areas_of_interest: Vec<String> = name.iter().cloned().collect();
            for key in ["water", "waterway"] {
                if let Some(value) = tags.get(key) {
                    areas_of_interest.push(value.clone());
                }
            }
            Placemark {
                category: element_category(&tags),
                name,
                areas_of_interest,
                ..Placemark::default()
            }
        })
        .collect()
}

#[async_trait]
impl PlaceSearchService for OverpassPlaceSearch {
    async fn search(
        &self,
        center: Coordinate,
        radius_m: f64,
        categories: &[PoiCategory],
    ) -> Result<Vec<Placemark>, ProviderError> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let query = build_query(center, radius_m, categories, self.timeout_s);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "text/plain")
            .body(query)
            .send()
            .await?;
        ensure_success(&response)?;
        let payload: OverpassResponse = response.json().await?;
        Ok(to_placemarks(payload))
    }
}
