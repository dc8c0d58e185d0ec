use crate::store::list::ImageEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListQuery {
    pub images_dir: String,
    pub labels_dir: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageQuery {
    pub images_dir: String,
    pub file: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelQuery {
    pub labels_dir: String,
    pub file: String,
}

/// Body of `POST /api/labels`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelPayload {
    pub labels_dir: String,
    pub file: String,
    pub content: String,
}
