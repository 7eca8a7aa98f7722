//! Assigning uploaded images to places.
//!
//! Image files are matched to places in order: the oldest file (by
//! modification time) goes to the place with the lowest id, and so on until
//! the images run out.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use cityguide_core::types::DbId;

use crate::api_client::{ApiClientError, CityGuideClient, PlaceSummary};

/// URL prefix stored in `image_url`.
pub const IMAGE_URL_PREFIX: &str = "static/uploads/places/";

/// File extensions treated as images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

const PAGE_SIZE: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("cannot read image directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

/// A place that should receive a new image URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub place_id: DbId,
    pub image_url: String,
}

/// Image file names in `dir`, oldest modification time first.
///
/// Files whose metadata cannot be read are skipped with a warning.
pub fn collect_images(dir: &Path) -> Result<Vec<String>, ImageError> {
    let read_dir_err = |source| ImageError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<(SystemTime, String)> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if !is_image(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => files.push((modified, name.to_string())),
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable file"),
        }
    }

    files.sort();
    tracing::info!(count = files.len(), dir = %dir.display(), "Found images");
    Ok(files.into_iter().map(|(_, name)| name).collect())
}

fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
}

/// `image_url` value for an uploaded file.
pub fn image_url(file_name: &str) -> String {
    format!("{IMAGE_URL_PREFIX}{file_name}")
}

/// Pair places (in id order) with images (in age order), dropping places
/// that already carry the URL they would receive.
pub fn plan_assignments(places: &[PlaceSummary], images: &[String]) -> Vec<Assignment> {
    places
        .iter()
        .zip(images)
        .filter_map(|(place, file)| {
            let url = image_url(file);
            if place.image_url.as_deref() == Some(url.as_str()) {
                tracing::debug!(place_id = place.id, %url, "Place already has image");
                None
            } else {
                Some(Assignment {
                    place_id: place.id,
                    image_url: url,
                })
            }
        })
        .collect()
}

/// Fetch every place, ordered by id.
pub async fn fetch_all_places(
    client: &CityGuideClient,
) -> Result<Vec<PlaceSummary>, ApiClientError> {
    let mut places = Vec::new();
    let mut page = 1;
    loop {
        let batch = client.list_places(page, PAGE_SIZE).await?;
        places.extend(batch.places);
        if page >= batch.total_pages {
            break;
        }
        page += 1;
    }
    Ok(places)
}

/// Assign images from `dir` to places. Returns the number of places updated.
pub async fn assign_images(client: &CityGuideClient, dir: &Path) -> Result<usize, ImageError> {
    let images = collect_images(dir)?;
    if images.is_empty() {
        tracing::warn!(dir = %dir.display(), "No images found");
        return Ok(0);
    }

    let places = fetch_all_places(client).await?;
    if places.len() > images.len() {
        tracing::warn!(
            places = places.len(),
            images = images.len(),
            "More places than images, the rest keep their current image"
        );
    }

    let assignments = plan_assignments(&places, &images);
    for assignment in &assignments {
        client
            .set_place_image(assignment.place_id, &assignment.image_url)
            .await?;
        tracing::info!(
            place_id = assignment.place_id,
            url = %assignment.image_url,
            "Updated place image"
        );
    }

    Ok(assignments.len())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use super::*;

    fn place(id: DbId, image_url: Option<&str>) -> PlaceSummary {
        PlaceSummary {
            id,
            name: format!("Place {id}"),
            image_url: image_url.map(str::to_string),
        }
    }

    #[test]
    fn pairs_in_order_and_skips_current_urls() {
        let places = vec![
            place(1, None),
            place(2, Some("static/uploads/places/b.png")),
            place(3, Some("static/uploads/places/old.jpg")),
            place(4, None),
        ];
        let images = vec!["a.jpg".to_string(), "b.png".to_string(), "c.webp".to_string()];

        let plan = plan_assignments(&places, &images);
        assert_eq!(
            plan,
            vec![
                Assignment {
                    place_id: 1,
                    image_url: "static/uploads/places/a.jpg".to_string(),
                },
                Assignment {
                    place_id: 3,
                    image_url: "static/uploads/places/c.webp".to_string(),
                },
            ]
        );
    }

    #[test]
    fn collects_images_oldest_first() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let now = SystemTime::now();
        for (name, age_secs) in [("new.PNG", 10), ("old.jpg", 300), ("notes.txt", 500), ("mid.webp", 60)] {
            let path = dir.path().join(name);
            fs::write(&path, b"x").unwrap();
            let file = fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(now - Duration::from_secs(age_secs)).unwrap();
        }
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let images = collect_images(dir.path()).unwrap();
        assert_eq!(images, vec!["old.jpg", "mid.webp", "new.PNG"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let missing = Path::new("/definitely/not/here/cityguide");
        assert!(matches!(
            collect_images(missing),
            Err(ImageError::ReadDir { .. })
        ));
    }
}
