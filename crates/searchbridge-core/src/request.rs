use reqwest::Method;

use crate::error::{BridgeError, Result};

/// A frozen protocol-level request: method, ordered path components, query
/// parameters and an optional JSON body. Built once via [`ApiRequestBuilder`],
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path_components: Vec<String>,
    params: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get() -> ApiRequestBuilder {
        ApiRequestBuilder::new(Method::GET)
    }

    pub fn put() -> ApiRequestBuilder {
        ApiRequestBuilder::new(Method::PUT)
    }

    pub fn post() -> ApiRequestBuilder {
        ApiRequestBuilder::new(Method::POST)
    }

    pub fn delete() -> ApiRequestBuilder {
        ApiRequestBuilder::new(Method::DELETE)
    }

    pub fn head() -> ApiRequestBuilder {
        ApiRequestBuilder::new(Method::HEAD)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> String {
        self.path_components.join("/")
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequestBuilder {
    method: Method,
    path_components: Vec<String>,
    params: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequestBuilder {
    fn new(method: Method) -> Self {
        Self {
            method,
            path_components: Vec::new(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn path_component(mut self, component: impl Into<String>) -> Self {
        self.path_components.push(component.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Freezes a copy of the assembled request. The builder stays usable but
    /// later mutation never reaches a previously built request.
    pub fn build(&self) -> Result<ApiRequest> {
        for component in &self.path_components {
            validate_path_component(component)?;
        }
        Ok(ApiRequest {
            method: self.method.clone(),
            path_components: self.path_components.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
        })
    }
}

fn validate_path_component(component: &str) -> Result<()> {
    if component.is_empty() {
        return Err(BridgeError::Validation(
            "empty request path component".to_string(),
        ));
    }
    if component.contains(['/', '?', '#']) {
        return Err(BridgeError::Validation(format!(
            "request path component contains a reserved character: {component}"
        )));
    }
    Ok(())
}
