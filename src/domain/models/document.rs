use serde::{Deserialize, Serialize};

use crate::shared::errors::{ApiError, Result};

/// Content types accepted by the document picker
pub const SUPPORTED_DOCUMENT_TYPES: &[&str] = &["application/pdf", "application/x-pdf"];

/// `accept` attribute of the file input
pub const DOCUMENT_ACCEPT: &str = ".pdf,application/pdf";

/// Multipart field name the backend reads the upload from
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Viewer fragment hiding the embedded PDF toolbar
const VIEWER_FRAGMENT: &str = "#toolbar=0";

/// A PDF picked by the user, held in memory until uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct PdfFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PdfFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a PDF from disk (native client)
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn from_path(path: &std::path::Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(name, "application/pdf", bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// MIME type sent with the upload, normalized when the browser left it blank
    pub fn upload_content_type(&self) -> &str {
        if self.content_type.trim().is_empty() {
            "application/pdf"
        } else {
            &self.content_type
        }
    }

    fn has_pdf_extension(&self) -> bool {
        self.name.to_ascii_lowercase().ends_with(".pdf")
    }

    /// Reject selections the backend would refuse anyway
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::InvalidFile("No selected file".to_string()));
        }

        if self.bytes.is_empty() {
            return Err(ApiError::InvalidFile(format!("{} is empty", self.name)));
        }

        let content_type = self.content_type.trim().to_ascii_lowercase();
        let typed_as_pdf = SUPPORTED_DOCUMENT_TYPES.contains(&content_type.as_str());
        let untyped = content_type.is_empty() || content_type == "application/octet-stream";

        if !(typed_as_pdf || (untyped && self.has_pdf_extension())) {
            return Err(ApiError::InvalidFile(format!(
                "Unsupported type for {}: {}",
                self.name,
                if content_type.is_empty() { "unknown" } else { &content_type }
            )));
        }

        Ok(())
    }
}

/// Local URL of the uploaded document, rendered by the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub file_name: String,
    pub url: String,
    pub size_bytes: usize,
}

impl DocumentRef {
    /// Blob object URL over the uploaded bytes
    #[cfg(target_arch = "wasm32")]
    pub fn from_file(file: &PdfFile) -> Result<Self> {
        let url = crate::shared::utils::dom::create_object_url(&file.bytes, file.upload_content_type())?;
        Ok(Self {
            file_name: file.name.clone(),
            url,
            size_bytes: file.size(),
        })
    }

    /// `data:` URL; the native client has no blob store
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(file: &PdfFile) -> Result<Self> {
        use base64::Engine;

        let encoded = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        Ok(Self {
            file_name: file.name.clone(),
            url: format!("data:{};base64,{}", file.upload_content_type(), encoded),
            size_bytes: file.size(),
        })
    }

    /// Source for the embedded viewer, toolbar hidden
    pub fn viewer_src(&self) -> String {
        format!("{}{}", self.url, VIEWER_FRAGMENT)
    }

    /// Give the bytes back to the browser
    pub fn release(&self) {
        #[cfg(target_arch = "wasm32")]
        crate::shared::utils::dom::revoke_object_url(&self.url);
    }
}
