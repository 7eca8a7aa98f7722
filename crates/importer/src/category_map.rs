//! OSM tag → local place category mapping, and the name → id lookup built
//! from the API's category list.

use std::collections::HashMap;

use cityguide_core::types::DbId;

use crate::transliterate::to_latin;

/// Category used when no tag maps to anything.
pub const DEFAULT_CATEGORY: &str = "Ostalo";

/// Local category for an OSM tag value or key, if one is mapped.
pub fn osm_category(tag: &str) -> Option<&'static str> {
    let category = match tag {
        "restaurant" | "cafe" | "fast_food" | "bar" | "pub" | "bakery" | "confectionery"
        | "ice_cream" => "Hrana i piće",

        "museum" | "theatre" | "arts_centre" | "gallery" | "cinema" | "memorial" | "monument"
        | "historic" | "art" => "Kultura i umetnost",

        "sports_centre" | "stadium" | "pitch" | "playground" | "gym" | "fitness_centre"
        | "swimming_pool" | "sports" => "Sport i rekreacija",

        "park" | "garden" | "nature_reserve" | "river" | "water" | "lake" | "natural" => {
            "Parkovi i priroda"
        }

        "school" | "university" | "college" | "kindergarten" | "language_school"
        | "education" => "Edukacija",

        "supermarket" | "mall" | "clothes" | "boutique" | "shopping_centre" | "shop"
        | "retail" => "Kupovina",

        "nightclub" | "community_centre" | "social_facility" | "event_venue" | "leisure"
        | "place_of_worship" | "library" => "Izlazak i druženje",

        _ => return None,
    };
    Some(category)
}

/// Category name → id, keyed by both the trimmed name and its Latin
/// transliteration.
#[derive(Debug, Default, Clone)]
pub struct CategoryLookup {
    by_name: HashMap<String, DbId>,
}

impl CategoryLookup {
    pub fn new<'a>(categories: impl IntoIterator<Item = (&'a str, DbId)>) -> Self {
        let mut by_name = HashMap::new();
        for (name, id) in categories {
            let clean = name.trim();
            by_name.insert(to_latin(clean), id);
            by_name.insert(clean.to_string(), id);
        }
        Self { by_name }
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<DbId> {
        self.by_name.get(to_latin(name.trim()).as_str()).copied()
    }

    /// Id of `name`, falling back to the default category's id.
    pub fn resolve(&self, name: &str) -> Option<DbId> {
        self.get(name).or_else(|| self.default_id())
    }

    pub fn default_id(&self) -> Option<DbId> {
        self.get(DEFAULT_CATEGORY)
    }
}
