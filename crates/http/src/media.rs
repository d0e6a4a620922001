use std::path::Path;

use async_trait::async_trait;
use cms_kernel::models::Media;
use cms_kernel::{MediaResource, Resource};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::crud::{CrudClient, CrudService};
use crate::error::ApiError;

/// File bytes plus the metadata sent with a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Guesses the MIME type from the filename's extension.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string();
        Self {
            filename,
            mime_type,
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Upload {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(filename, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Media adds a multipart upload on top of plain CRUD.
#[async_trait]
pub trait MediaService: CrudService<MediaResource> {
    async fn upload(&self, file: UploadFile) -> Result<Media, ApiError>;
}

#[async_trait]
impl MediaService for CrudClient<MediaResource> {
    async fn upload(&self, file: UploadFile) -> Result<Media, ApiError> {
        let filename = file.filename.clone();
        let size = file.size();
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.mime_type)
            .map_err(ApiError::Network)?;
        let form = Form::new().part("file", part);

        let media: Media = self
            .api()
            .request(Method::POST, MediaResource::PATH)
            .map(|builder| builder.multipart(form))
            .json()
            .await?;
        tracing::info!(id = media.id, filename = %filename, size, "uploaded media");
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(UploadFile::new("cat.png", vec![1]).mime_type, "image/png");
        assert_eq!(
            UploadFile::new("blob", vec![]).mime_type,
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.filename, "notes.txt");
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.size(), 5);
    }

    #[tokio::test]
    async fn missing_file_is_an_upload_error() {
        let err = UploadFile::from_path("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upload { .. }));
    }
}
