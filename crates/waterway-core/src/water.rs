//! Placemark heuristics for deciding whether a lookup result describes water.

use crate::models::Placemark;

/// Substrings that mark a name or area as a waterbody. Includes local Berlin lakes and rivers.
pub const WATER_KEYWORDS: &[&str] = &[
    "river",
    "lake",
    "canal",
    "spree",
    "havel",
    "wannsee",
    "müggelsee",
    "channel",
    "bay",
    "lagoon",
    "pond",
    "harbor",
    "harbour",
    "fjord",
    "creek",
    "water",
    "reservoir",
];

/// Case-insensitive substring match against [`WATER_KEYWORDS`].
pub fn contains_water_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    WATER_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty())
}

/// Classify a reverse-geocoded placemark.
///
/// Addressless placemarks with no name count as water: open water rarely
/// reverse-geocodes to anything meaningful.
pub fn placemark_on_water(placemark: &Placemark) -> bool {
    if non_empty(&placemark.inland_water) || non_empty(&placemark.ocean) {
        return true;
    }

    if placemark
        .areas_of_interest
        .iter()
        .any(|area| contains_water_keyword(area))
    {
        return true;
    }

    if placemark.thoroughfare.is_none() && placemark.sub_thoroughfare.is_none() {
        return match placemark.name.as_deref() {
            None | Some("") => true,
            Some(name) => contains_water_keyword(name),
        };
    }

    false
}

/// Classify a point-of-interest search hit: a marina or beach category, or the
/// same heuristics used for reverse-geocode results.
pub fn poi_indicates_water(placemark: &Placemark) -> bool {
    placemark.category.is_some() || placemark_on_water(placemark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PoiCategory;

    fn street(name: &str) -> Placemark {
        Placemark {
            name: Some(name.to_string()),
            thoroughfare: Some("Unter den Linden".to_string()),
            sub_thoroughfare: Some("1".to_string()),
            ..Placemark::default()
        }
    }

    #[test]
    fn keyword_match_ignores_case() {
        assert!(contains_water_keyword("Große MÜGGELSEE"));
        assert!(contains_water_keyword("Port Harbour"));
        assert!(!contains_water_keyword("Alexanderplatz"));
    }

    #[test]
    fn inland_water_or_ocean_is_water() {
        let mut placemark = street("Somewhere");
        placemark.inland_water = Some("Spree".to_string());
        assert!(placemark_on_water(&placemark));

        let mut placemark = street("Somewhere");
        placemark.ocean = Some("Baltic Sea".to_string());
        assert!(placemark_on_water(&placemark));

        let mut placemark = street("Somewhere");
        placemark.ocean = Some(String::new());
        assert!(!placemark_on_water(&placemark));
    }

    #[test]
    fn area_of_interest_keyword_is_water() {
        let mut placemark = street("Museum");
        placemark.areas_of_interest = vec!["Museum Island".into(), "Spree Canal".into()];
        assert!(placemark_on_water(&placemark));
    }

    #[test]
    fn addressless_placemarks_follow_name_rule() {
        assert!(placemark_on_water(&Placemark::default()));
        assert!(placemark_on_water(&Placemark {
            name: Some(String::new()),
            ..Placemark::default()
        }));
        assert!(placemark_on_water(&Placemark {
            name: Some("Tegeler See Lake".into()),
            ..Placemark::default()
        }));
        assert!(!placemark_on_water(&Placemark {
            name: Some("Tiergarten".into()),
            ..Placemark::default()
        }));
    }

    #[test]
    fn street_address_is_land_even_with_water_name() {
        assert!(!placemark_on_water(&street("Riverside Cafe")));
    }

    #[test]
    fn poi_category_counts_as_water() {
        let mut placemark = street("Yacht Club");
        assert!(!poi_indicates_water(&placemark));
        placemark.category = Some(PoiCategory::Marina);
        assert!(poi_indicates_water(&placemark));
    }
}
