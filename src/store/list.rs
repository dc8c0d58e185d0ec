use crate::{
    errors::{AppError, AppResult},
    security::absolute_dir,
    store::{is_image_name, label_name_for},
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub name: String,
    pub label_exists: bool,
}

/// Lists the images directly inside `images_dir`, sorted case-insensitively.
///
/// With a `labels_dir`, each entry records whether `<stem>.txt` exists there.
/// A failed existence probe reads as "no label"; only an unreadable
/// `images_dir` fails the whole listing.
pub fn list_images(images_dir: &str, labels_dir: Option<&str>) -> AppResult<Vec<ImageEntry>> {
    if images_dir.is_empty() {
        return Err(AppError::MissingImagesDir);
    }
    let images_abs = absolute_dir(images_dir).map_err(AppError::InvalidImagesDir)?;
    let labels_abs = match labels_dir.filter(|d| !d.is_empty()) {
        Some(dir) => Some(absolute_dir(dir).map_err(AppError::InvalidLabelsDir)?),
        None => None,
    };

    let mut images = Vec::new();
    for entry in fs::read_dir(&images_abs).map_err(AppError::UnreadableImagesDir)? {
        let entry = entry.map_err(AppError::UnreadableImagesDir)?;
        let file_type = entry.file_type().map_err(AppError::UnreadableImagesDir)?;
        if file_type.is_dir() {
            continue;
        }
        // names that are not valid UTF-8 cannot round-trip through the JSON API
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_image_name(&name) {
            continue;
        }
        let label_exists = labels_abs.as_deref().is_some_and(|dir| label_exists(dir, &name));
        images.push(ImageEntry { name, label_exists });
    }

    images.sort_by_cached_key(|e| (e.name.to_lowercase(), e.name.clone()));
    debug!(dir = %images_abs.display(), count = images.len(), "listed images");
    Ok(images)
}

fn label_exists(labels_dir: &Path, image_name: &str) -> bool {
    fs::metadata(labels_dir.join(label_name_for(image_name))).is_ok()
}
