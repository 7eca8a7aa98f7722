//! Turning a Nominatim hit into a place ready to submit.

use cityguide_core::types::DbId;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::category_map::{osm_category, CategoryLookup, DEFAULT_CATEGORY};
use crate::nominatim::OsmResult;
use crate::transliterate::to_latin;

/// Body of a `POST /places` request built from a geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDraft {
    pub name: String,
    pub description: Option<String>,
    pub position: Option<String>,
    pub address: String,
    pub category_id: DbId,
}

/// Map a hit to a draft. Returns `None` when neither the mapped category nor
/// the default category exists locally.
pub fn to_draft(
    result: &OsmResult,
    query: &str,
    city: &str,
    lookup: &CategoryLookup,
) -> Option<PlaceDraft> {
    let name = to_latin(&place_name(result, query, city));
    let address = to_latin(&format_address(result, city));
    let category = category_name(result);

    let Some(category_id) = lookup.resolve(category) else {
        tracing::warn!(
            %name,
            category,
            default = DEFAULT_CATEGORY,
            "No local id for category or default category, skipping place"
        );
        return None;
    };

    let position = match (result.lat.as_deref(), result.lon.as_deref()) {
        (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => {
            Some(format!("{lat},{lon}"))
        }
        _ => None,
    };
    if position.is_none() || !has_structured_address(result) {
        tracing::warn!(%name, query, "Partial data from Nominatim");
    }

    Some(PlaceDraft {
        name,
        description: None,
        position,
        address,
        category_id,
    })
}

/// Best display name for a hit: `address.name`, then `extratags.name`, then
/// `tags.name` of a node, then the first `display_name` segment unless it is
/// the city itself, then the query.
pub fn place_name(result: &OsmResult, query: &str, city: &str) -> String {
    if let Some(name) = result.address_field("name") {
        return name.to_string();
    }
    if let Some(name) = map_str(result.extratags.as_ref(), "name") {
        return name.to_string();
    }
    if result.osm_type.as_deref() == Some("node") {
        if let Some(name) = map_str(result.tags.as_ref(), "name") {
            return name.to_string();
        }
    }
    if let Some(first) = result
        .display_name
        .as_deref()
        .and_then(|d| d.split(',').next())
        .map(str::trim)
    {
        if first != city {
            return first.to_string();
        }
    }
    query.to_string()
}

/// `"road house_number, district"`, or the full `display_name` when the hit
/// has no street or district.
pub fn format_address(result: &OsmResult, city: &str) -> String {
    let parts = address_parts(result, city);
    if parts.is_empty() {
        result.display_name.clone().unwrap_or_default()
    } else {
        parts.join(", ")
    }
}

fn has_structured_address(result: &OsmResult) -> bool {
    result.address.is_some()
        && ["road", "house_number", "suburb", "city_district", "village"]
            .iter()
            .any(|k| result.address_field(k).is_some())
}

fn address_parts(result: &OsmResult, city: &str) -> Vec<String> {
    let mut parts = Vec::new();

    let street: Vec<&str> = ["road", "house_number"]
        .iter()
        .filter_map(|k| result.address_field(k))
        .collect();
    if !street.is_empty() {
        parts.push(street.join(" "));
    }

    let district = result
        .address_field("suburb")
        .or_else(|| result.address_field("city_district"))
        .or_else(|| {
            result
                .address_field("village")
                .filter(|v| v.to_lowercase() != city.to_lowercase())
        });
    if let Some(district) = district {
        parts.push(district.to_string());
    }

    parts
}

/// Local category name for a hit.
///
/// Tags are scanned extratags first, then tags, in document order (a key
/// present in both keeps its extratags position with the tags value). The
/// first tag whose value, then key, is mapped wins. Otherwise `class`, then
/// `type`, then [`DEFAULT_CATEGORY`].
pub fn category_name(result: &OsmResult) -> &'static str {
    for (key, value) in merged_tags(result) {
        if let Some(category) = value.as_str().and_then(osm_category) {
            return category;
        }
        if let Some(category) = osm_category(key) {
            return category;
        }
    }

    result
        .class
        .as_deref()
        .and_then(osm_category)
        .or_else(|| result.kind.as_deref().and_then(osm_category))
        .unwrap_or(DEFAULT_CATEGORY)
}

fn merged_tags(result: &OsmResult) -> Vec<(&str, &Value)> {
    let mut merged: Vec<(&str, &Value)> = Vec::new();
    for map in [result.extratags.as_ref(), result.tags.as_ref()]
        .into_iter()
        .flatten()
    {
        for (key, value) in map {
            match merged.iter_mut().find(|(k, _)| *k == key.as_str()) {
                Some(slot) => slot.1 = value,
                None => merged.push((key.as_str(), value)),
            }
        }
    }
    merged
}

fn map_str<'a>(map: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a str> {
    map?.get(key)?.as_str()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn hit(value: Value) -> OsmResult {
        serde_json::from_value(value).unwrap()
    }

    fn lookup() -> CategoryLookup {
        CategoryLookup::new([
            ("Hrana i piće", 1),
            ("Kultura i umetnost", 2),
            ("Parkovi i priroda", 3),
            ("Ostalo", 9),
        ])
    }

    #[test]
    fn full_hit_becomes_draft() {
        let result = hit(json!({
            "display_name": "Caffe Bridge, Кеј 2. октобра, Зрењанин, Србија",
            "lat": "45.3807",
            "lon": "20.3901",
            "class": "amenity",
            "type": "cafe",
            "address": {
                "name": "Кафе Бриџ",
                "road": "Кеј 2. октобра",
                "house_number": "4",
                "suburb": "Центар",
                "city": "Зрењанин"
            },
            "extratags": { "outdoor_seating": "yes" }
        }));

        let draft = to_draft(&result, "kafe", "Zrenjanin", &lookup()).unwrap();
        assert_eq!(
            draft,
            PlaceDraft {
                name: "Kafe Bridž".to_string(),
                description: None,
                position: Some("45.3807,20.3901".to_string()),
                address: "Kej 2. oktobra 4, Centar".to_string(),
                category_id: 1,
            }
        );
    }

    #[test]
    fn name_falls_back_through_sources() {
        let from_tags = hit(json!({ "osm_type": "node", "tags": { "name": "Spomenik" } }));
        assert_eq!(place_name(&from_tags, "q", "Zrenjanin"), "Spomenik");

        // Tags only count for nodes.
        let way = hit(json!({ "osm_type": "way", "tags": { "name": "Spomenik" } }));
        assert_eq!(place_name(&way, "q", "Zrenjanin"), "q");

        let display = hit(json!({ "display_name": "Gradski park, Zrenjanin" }));
        assert_eq!(place_name(&display, "park", "Zrenjanin"), "Gradski park");

        let city_only = hit(json!({ "display_name": "Zrenjanin, Srbija" }));
        assert_eq!(place_name(&city_only, "centar", "Zrenjanin"), "centar");
    }

    #[test]
    fn address_uses_village_only_outside_the_city() {
        let same = hit(json!({ "address": { "road": "Glavna", "village": "zrenjanin" } }));
        assert_eq!(format_address(&same, "Zrenjanin"), "Glavna");

        let other = hit(json!({ "address": { "village": "Ečka" } }));
        assert_eq!(format_address(&other, "Zrenjanin"), "Ečka");

        let bare = hit(json!({ "display_name": "Nešto, Zrenjanin", "address": {} }));
        assert_eq!(format_address(&bare, "Zrenjanin"), "Nešto, Zrenjanin");
    }

    #[test]
    fn category_prefers_first_mapped_tag() {
        let result = hit(json!({
            "class": "leisure",
            "type": "park",
            "extratags": { "wikidata": "Q1", "tourism": "museum" },
            "tags": { "amenity": "cafe" }
        }));
        assert_eq!(category_name(&result), "Kultura i umetnost");
    }

    #[test]
    fn category_matches_tag_keys() {
        let result = hit(json!({ "extratags": { "historic": "yes" } }));
        assert_eq!(category_name(&result), "Kultura i umetnost");
    }

    #[test]
    fn category_falls_back_to_class_type_default() {
        let by_type = hit(json!({ "class": "boundary", "type": "park" }));
        assert_eq!(category_name(&by_type), "Parkovi i priroda");

        let nothing = hit(json!({ "class": "boundary", "type": "administrative" }));
        assert_eq!(category_name(&nothing), DEFAULT_CATEGORY);
    }

    #[test]
    fn unmapped_category_uses_default_id() {
        let result = hit(json!({ "display_name": "Opština, Zrenjanin", "type": "townhall" }));
        let draft = to_draft(&result, "opstina", "Zrenjanin", &lookup()).unwrap();
        assert_eq!(draft.category_id, 9);
        assert_eq!(draft.position, None);
    }

    #[test]
    fn missing_default_category_skips_hit() {
        let lookup = CategoryLookup::new([("Kupovina", 4)]);
        let result = hit(json!({ "type": "townhall" }));
        assert!(to_draft(&result, "opstina", "Zrenjanin", &lookup).is_none());
    }
}
