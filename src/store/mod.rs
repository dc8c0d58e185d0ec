pub mod image;
pub mod labels;
pub mod list;

/// Recognized image extensions, lowercase and without the dot.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp", "tif", "tiff"];

pub const LABEL_EXTENSION: &str = "txt";

/// Splits a file name at its final dot. A name without a dot has an empty extension.
/// A leading dot counts, so `.png` has stem `""` and extension `png`.
pub fn split_ext(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => (name, ""),
    }
}

pub fn is_image_name(name: &str) -> bool {
    let (_, ext) = split_ext(name);
    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

pub fn is_label_name(name: &str) -> bool {
    let (_, ext) = split_ext(name);
    ext.eq_ignore_ascii_case(LABEL_EXTENSION)
}

/// `<stem>.<ext>` becomes `<stem>.txt`.
pub fn label_name_for(image_name: &str) -> String {
    let (stem, _) = split_ext(image_name);
    format!("{stem}.{LABEL_EXTENSION}")
}

pub fn content_type_for(name: &str) -> Option<&'static str> {
    let (_, ext) = split_ext(name);
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}
