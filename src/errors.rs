use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("base directory is required")]
    MissingBaseDir,
    #[error("file is required")]
    MissingRelativePath,
    #[error("file must be a relative path")]
    AbsoluteRelativePathRejected,
    #[error("invalid path")]
    PathEscape,
    #[error("invalid path")]
    CanonicalizationFailure(#[source] io::Error),
    #[error("imagesDir is required")]
    MissingImagesDir,
    #[error("invalid imagesDir")]
    InvalidImagesDir(#[source] io::Error),
    #[error("invalid labelsDir")]
    InvalidLabelsDir(#[source] io::Error),
    #[error("unable to read imagesDir")]
    UnreadableImagesDir(#[source] io::Error),
    #[error("labels must be .txt")]
    InvalidLabelExtension,
    #[error("unable to read labels")]
    UnreadableLabel(#[source] io::Error),
    #[error("unable to create labels dir")]
    DirectoryCreationFailure(#[source] io::Error),
    #[error("unable to save labels")]
    WriteFailure(#[source] io::Error),
    #[error("request too large")]
    BodyTooLarge,
    #[error("unsupported image type")]
    UnsupportedExtension,
    #[error("not found")]
    NotFound,
    #[error("unable to read image")]
    UnreadableImage(#[source] io::Error),
    #[error("invalid body")]
    InvalidBody,
    #[error("invalid json")]
    InvalidJson(#[source] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingBaseDir => "MissingBaseDir",
            AppError::MissingRelativePath => "MissingRelativePath",
            AppError::AbsoluteRelativePathRejected => "AbsoluteRelativePathRejected",
            AppError::PathEscape => "PathEscape",
            AppError::CanonicalizationFailure(_) => "CanonicalizationFailure",
            AppError::MissingImagesDir => "MissingImagesDir",
            AppError::InvalidImagesDir(_) => "InvalidImagesDir",
            AppError::InvalidLabelsDir(_) => "InvalidLabelsDir",
            AppError::UnreadableImagesDir(_) => "UnreadableImagesDir",
            AppError::InvalidLabelExtension => "InvalidLabelExtension",
            AppError::UnreadableLabel(_) => "UnreadableLabel",
            AppError::DirectoryCreationFailure(_) => "DirectoryCreationFailure",
            AppError::WriteFailure(_) => "WriteFailure",
            AppError::BodyTooLarge => "BodyTooLarge",
            AppError::UnsupportedExtension => "UnsupportedExtension",
            AppError::NotFound => "NotFound",
            AppError::UnreadableImage(_) => "UnreadableImage",
            AppError::InvalidBody => "InvalidBody",
            AppError::InvalidJson(_) => "InvalidJson",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingBaseDir
            | AppError::MissingRelativePath
            | AppError::AbsoluteRelativePathRejected
            | AppError::PathEscape
            | AppError::CanonicalizationFailure(_)
            | AppError::MissingImagesDir
            | AppError::InvalidImagesDir(_)
            | AppError::InvalidLabelsDir(_)
            | AppError::InvalidLabelExtension
            | AppError::UnsupportedExtension
            | AppError::BodyTooLarge
            | AppError::InvalidBody
            | AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UnreadableImagesDir(_)
            | AppError::UnreadableLabel(_)
            | AppError::DirectoryCreationFailure(_)
            | AppError::WriteFailure(_)
            | AppError::UnreadableImage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            let source = std::error::Error::source(&self).map(|s| s.to_string());
            tracing::error!(code = self.code(), source = ?source, "request failed");
        } else {
            tracing::debug!(code = self.code(), "request rejected");
        }
        let body = ErrorBody { code: self.code(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}
