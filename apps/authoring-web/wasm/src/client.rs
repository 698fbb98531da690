//! Promise-based backend client for the browser
//!
//! Every call resolves to a JSON string (or rejects with the error message).
//! The bearer token is kept in `localStorage`.

use crate::storage::LocalStorageSession;
use crate::wizard::WasmAuthorizationWizard;
use api_client::{ClientConfig, OscalClient, SessionStore};
use js_sys::Promise;
use oscal_types::{
    ConversionRequest, DocumentFormat, DocumentKind, ProfileResolveRequest, ValidationRequest,
};
use serde::Serialize;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

type Client = OscalClient<LocalStorageSession>;

fn spawn<T, F>(future: F) -> Promise
where
    T: Serialize,
    F: Future<Output = api_client::Result<T>> + 'static,
{
    future_to_promise(async move {
        let value = future
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let json = serde_json::to_string(&value)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {}", e)))?;
        Ok(JsValue::from_str(&json))
    })
}

fn parse_format(format: &str, content: &str) -> DocumentFormat {
    DocumentFormat::parse(format).unwrap_or_else(|| DocumentFormat::sniff(content))
}

#[wasm_bindgen(js_name = OscalClient)]
pub struct WasmClient {
    client: Rc<Client>,
}

#[wasm_bindgen(js_class = OscalClient)]
impl WasmClient {
    /// `base_url` defaults to `http://localhost:8080`
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: Option<String>, mock_fallback: bool) -> Result<WasmClient, JsValue> {
        let mut config = ClientConfig::default().with_mock_fallback(mock_fallback);
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            config.base_url = url;
        }
        let client = OscalClient::new(config, LocalStorageSession::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            client: Rc::new(client),
        })
    }

    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    pub fn logout(&self) {
        self.client.logout();
    }

    pub fn health(&self) -> Promise {
        let client = Rc::clone(&self.client);
        spawn(async move { client.health().await })
    }

    pub fn login(&self, username: String, password: String) -> Promise {
        let client = Rc::clone(&self.client);
        spawn(async move { client.login(&username, &password).await })
    }

    #[wasm_bindgen(js_name = listTemplates)]
    pub fn list_templates(&self) -> Promise {
        let client = Rc::clone(&self.client);
        spawn(async move { client.list_templates().await })
    }

    #[wasm_bindgen(js_name = getTemplate)]
    pub fn get_template(&self, id: String) -> Promise {
        let client = Rc::clone(&self.client);
        spawn(async move { client.get_template(&id).await })
    }

    #[wasm_bindgen(js_name = deleteTemplate)]
    pub fn delete_template(&self, id: String) -> Promise {
        let client = Rc::clone(&self.client);
        spawn(async move { client.delete_template(&id).await })
    }

    #[wasm_bindgen(js_name = listAuthorizations)]
    pub fn list_authorizations(&self) -> Promise {
        let client = Rc::clone(&self.client);
        spawn(async move { client.list_authorizations().await })
    }

    /// Submit the wizard's current state; fails synchronously if a step is
    /// incomplete
    #[wasm_bindgen(js_name = submitAuthorization)]
    pub fn submit_authorization(
        &self,
        wizard: &WasmAuthorizationWizard,
    ) -> Result<Promise, JsValue> {
        let request = wizard
            .inner()
            .build_request()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let client = Rc::clone(&self.client);
        Ok(spawn(async move { client.create_authorization(&request).await }))
    }

    /// `format` may be empty to sniff it from the content
    pub fn validate(
        &self,
        content: String,
        format: &str,
        document_type: Option<String>,
    ) -> Promise {
        let request = ValidationRequest {
            format: parse_format(format, &content),
            document_type: document_type
                .as_deref()
                .and_then(DocumentKind::parse)
                .or_else(|| DocumentKind::detect(&content)),
            content,
        };
        let client = Rc::clone(&self.client);
        spawn(async move { client.validate(&request).await })
    }

    pub fn convert(&self, content: String, from_format: &str, to_format: &str) -> Result<Promise, JsValue> {
        let to_format = DocumentFormat::parse(to_format)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown format: {}", to_format)))?;
        let request = ConversionRequest {
            from_format: parse_format(from_format, &content),
            to_format,
            content,
        };
        let client = Rc::clone(&self.client);
        Ok(spawn(async move { client.convert(&request).await }))
    }

    #[wasm_bindgen(js_name = resolveProfile)]
    pub fn resolve_profile(&self, content: String, format: &str) -> Promise {
        let request = ProfileResolveRequest {
            format: parse_format(format, &content),
            content,
        };
        let client = Rc::clone(&self.client);
        spawn(async move { client.resolve_profile(&request).await })
    }
}
