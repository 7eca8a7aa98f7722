//! Command-line tooling that fills the city guide through its public API.
//!
//! `places` geocodes free-text queries with Nominatim, maps the results onto
//! local place categories and posts them to `/places`. `images` assigns
//! uploaded image files to existing places.

pub mod api_client;
pub mod category_map;
pub mod config;
pub mod images;
pub mod import;
pub mod input;
pub mod mapping;
pub mod nominatim;
pub mod transliterate;
