use crate::{
    errors::{AppError, AppResult},
    security::Resolver,
    store::{content_type_for, is_image_name},
};
use axum::{body::Body, extract::Request, response::Response};
use http::{header, HeaderValue};
use std::io;
use std::path::PathBuf;
use tower::ServiceExt;
use tower_http::services::ServeFile;

#[derive(Debug)]
pub struct ImageFile {
    pub path: PathBuf,
    pub content_type: &'static str,
}

/// Locates an image under `images_dir`. The extension is checked on the
/// resolved path, so `x.png/../secret.exe` is refused.
pub async fn open_image(resolver: &Resolver, images_dir: &str, file: &str) -> AppResult<ImageFile> {
    let path = resolver.resolve(images_dir, file)?;
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if !is_image_name(name) {
        return Err(AppError::UnsupportedExtension);
    }
    let content_type = content_type_for(name).unwrap_or("application/octet-stream");
    let meta = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::NotFound,
        _ => AppError::UnreadableImage(e),
    })?;
    if meta.is_dir() {
        return Err(AppError::NotFound);
    }
    Ok(ImageFile { path, content_type })
}

impl ImageFile {
    /// Serves the file for `req`, honoring range and conditional headers.
    pub async fn serve(self, req: Request) -> Response {
        let mut resp = match ServeFile::new(&self.path).oneshot(req).await {
            Ok(resp) => resp.map(Body::new),
            Err(never) => match never {},
        };
        if resp.status().is_success() {
            resp.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        }
        resp
    }
}
