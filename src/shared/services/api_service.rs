use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::domain::models::{AskRequest, AskResponse, PdfFile, SessionId, UPLOAD_FIELD_NAME};
use crate::domain::services::ChatBackend;
use crate::shared::errors::{ApiError, Result};

const UPLOAD_ENDPOINT: &str = "upload_file";
const ASK_ENDPOINT: &str = "ask_question";
const CLEANUP_ENDPOINT: &str = "cleanup";

// API Service for the PDF chat backend
#[derive(Clone)]
pub struct ApiService {
    config: ClientConfig,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl ApiService {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

// ============================================
// Native (reqwest)
// ============================================

#[cfg(not(target_arch = "wasm32"))]
impl ApiService {
    fn map_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout_ms())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    async fn post(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl ChatBackend for ApiService {
    async fn upload_file(&self, file: &PdfFile) -> Result<()> {
        use reqwest::multipart::{Form, Part};

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.upload_content_type())
            .map_err(|e| ApiError::InvalidFile(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let url = self.config.endpoint(UPLOAD_ENDPOINT);
        self.post(self.http.post(url).multipart(form)).await?;
        Ok(())
    }

    async fn ask_question(&self, question: &str, session_id: &SessionId) -> Result<String> {
        let body = AskRequest::new(question, session_id.clone());
        let url = self.config.endpoint(ASK_ENDPOINT);

        let response = self.post(self.http.post(url).json(&body)).await?;
        // The request timeout also bounds the body read
        let data = response
            .json::<AskResponse>()
            .await
            .map_err(|e| self.map_error(e))?;

        Ok(data.answer)
    }

    async fn cleanup(&self) -> Result<()> {
        let url = self.config.endpoint(CLEANUP_ENDPOINT);
        self.post(self.http.post(url)).await?;
        Ok(())
    }

    fn cleanup_beacon(&self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, skipping best-effort cleanup");
            return;
        };

        let request = self
            .http
            .post(self.config.endpoint(CLEANUP_ENDPOINT))
            .timeout(self.config.request_timeout);

        // Detached: nobody awaits the response
        handle.spawn(async move {
            if let Err(e) = request.send().await {
                tracing::debug!("Best-effort cleanup failed: {}", e);
            }
        });
    }
}

// ============================================
// Browser (gloo-net + web-sys)
// ============================================

#[cfg(target_arch = "wasm32")]
impl ApiService {
    /// Race a whole exchange (send and body read) against the configured timeout
    async fn with_timeout<T>(&self, exchange: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        use futures::future::{select, Either};

        let ms = self.config.timeout_ms();
        let timeout = gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32);
        futures::pin_mut!(exchange, timeout);

        match select(exchange, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ApiError::Timeout(ms)),
        }
    }

    async fn send(request: gloo_net::http::Request) -> Result<gloo_net::http::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: response.status(),
                body,
            });
        }
        Ok(response)
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl ChatBackend for ApiService {
    async fn upload_file(&self, file: &PdfFile) -> Result<()> {
        use crate::shared::utils::dom;
        use gloo_net::http::Request;

        let form = web_sys::FormData::new().map_err(dom::js_error)?;
        let blob = dom::bytes_to_blob(&file.bytes, file.upload_content_type())?;
        form.append_with_blob_and_filename(UPLOAD_FIELD_NAME, &blob, &file.name)
            .map_err(dom::js_error)?;

        // Browser sets the multipart Content-Type (with boundary) itself
        let request = Request::post(self.config.endpoint(UPLOAD_ENDPOINT).as_str())
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.with_timeout(Self::send(request)).await?;
        Ok(())
    }

    async fn ask_question(&self, question: &str, session_id: &SessionId) -> Result<String> {
        use gloo_net::http::Request;

        let body = AskRequest::new(question, session_id.clone());
        let request = Request::post(self.config.endpoint(ASK_ENDPOINT).as_str())
            .json(&body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        self.with_timeout(async {
            let response = Self::send(request).await?;
            let data = response
                .json::<AskResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(data.answer)
        })
        .await
    }

    async fn cleanup(&self) -> Result<()> {
        use gloo_net::http::Request;

        let request = Request::post(self.config.endpoint(CLEANUP_ENDPOINT).as_str())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.with_timeout(Self::send(request)).await?;
        Ok(())
    }

    fn cleanup_beacon(&self) {
        let url = self.config.endpoint(CLEANUP_ENDPOINT);
        let queued = web_sys::window()
            .and_then(|window| window.navigator().send_beacon(url.as_str()).ok())
            .unwrap_or(false);

        if !queued {
            tracing::warn!("Browser refused the cleanup beacon for {}", url);
        }
    }
}
