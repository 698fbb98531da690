//! Async client for the authoring backend

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::fallback;
use crate::models::{HealthStatus, LoginRequest, LoginResponse};
use crate::session::{MemorySession, SessionStore};
use oscal_types::{
    Authorization, ConversionRequest, ConversionResult, CreateAuthorizationRequest, ErrorBody,
    ProfileResolveRequest, ResolvedProfile, TemplateRecord, TemplateUpsert, ValidationReport,
    ValidationRequest,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use template_engine::Template;

pub struct OscalClient<S = MemorySession> {
    http: Client,
    config: ClientConfig,
    session: S,
}

impl OscalClient<MemorySession> {
    /// Client with an in-memory session
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::new(config, MemorySession::new())
    }
}

impl<S: SessionStore> OscalClient<S> {
    pub fn new(config: ClientConfig, session: S) -> Result<Self> {
        config.validate()?;

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout());
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    // ============================================================
    // Session
    // ============================================================

    pub async fn health(&self) -> Result<HealthStatus> {
        let result = self.get(self.url("/health")?).await;
        self.or_fallback("health", result, || Ok(fallback::health()))
    }

    /// Exchange credentials for a token and store it in the session
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .send_json(Method::POST, self.url("/api/auth/login")?, &body)
            .await?;
        self.session.set_token(&response.token);
        tracing::info!(username, "logged in");
        Ok(())
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    // ============================================================
    // Templates
    // ============================================================

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let result = match self
            .get::<Vec<TemplateRecord>>(self.url("/api/templates")?)
            .await
        {
            Ok(records) => records
                .into_iter()
                .map(|record| Template::try_from(record).map_err(ApiError::from))
                .collect(),
            Err(e) => Err(e),
        };
        self.or_fallback("list_templates", result, fallback::templates)
    }

    pub async fn get_template(&self, id: &str) -> Result<Template> {
        let result = match self
            .get::<TemplateRecord>(self.template_url(id)?)
            .await
        {
            Ok(record) => Template::try_from(record).map_err(ApiError::from),
            Err(e) => Err(e),
        };
        self.or_fallback("get_template", result, || fallback::template(id))
    }

    pub async fn create_template(&self, body: &TemplateUpsert) -> Result<Template> {
        let record: TemplateRecord = self
            .send_json(Method::POST, self.url("/api/templates")?, body)
            .await?;
        Ok(Template::try_from(record)?)
    }

    pub async fn update_template(&self, id: &str, body: &TemplateUpsert) -> Result<Template> {
        let record: TemplateRecord = self
            .send_json(Method::PUT, self.template_url(id)?, body)
            .await?;
        Ok(Template::try_from(record)?)
    }

    pub async fn delete_template(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, self.template_url(id)?);
        self.execute(request).await?;
        Ok(())
    }

    // ============================================================
    // Authorizations
    // ============================================================

    pub async fn list_authorizations(&self) -> Result<Vec<Authorization>> {
        self.get(self.url("/api/authorizations")?).await
    }

    pub async fn create_authorization(
        &self,
        body: &CreateAuthorizationRequest,
    ) -> Result<Authorization> {
        self.send_json(Method::POST, self.url("/api/authorizations")?, body)
            .await
    }

    // ============================================================
    // OSCAL documents
    // ============================================================

    pub async fn validate(&self, body: &ValidationRequest) -> Result<ValidationReport> {
        self.send_json(Method::POST, self.url("/api/validate")?, body)
            .await
    }

    pub async fn convert(&self, body: &ConversionRequest) -> Result<ConversionResult> {
        self.send_json(Method::POST, self.url("/api/convert")?, body)
            .await
    }

    pub async fn resolve_profile(&self, body: &ProfileResolveRequest) -> Result<ResolvedProfile> {
        self.send_json(Method::POST, self.url("/api/profile/resolve")?, body)
            .await
    }

    // ============================================================
    // Plumbing
    // ============================================================

    fn url(&self, path: &str) -> Result<Url> {
        let endpoint = self.config.endpoint(path);
        Url::parse(&endpoint)
            .map_err(|e| ApiError::Config(format!("invalid endpoint {}: {}", endpoint, e)))
    }

    /// Template ids travel as a single encoded path segment
    fn template_url(&self, id: &str) -> Result<Url> {
        let mut url = self.url("/api/templates")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config("base URL cannot hold a path".to_string()))?
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "backend request");
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.execute(self.request(Method::GET, url)).await?;
        decode(&body)
    }

    async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, url).json(body);
        let body = self.execute(request).await?;
        decode(&body)
    }

    /// Send and map non-success statuses; returns the raw body
    async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::Transport)?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("backend rejected credentials, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(error) => error.error,
                Err(_) if !body.trim().is_empty() => body,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    fn or_fallback<T, F>(&self, operation: &str, result: Result<T>, mock: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        match result {
            Err(err) if self.config.mock_fallback && err.is_transport() => {
                tracing::warn!(
                    operation,
                    error = %err,
                    "backend unreachable, answering from built-in templates"
                );
                mock()
            }
            other => other,
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
