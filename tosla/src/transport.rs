use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, CONNECTION, CONTENT_TYPE, EXPECT,
};
use reqwest::multipart::Form;
use reqwest::RequestBuilder;
use serde_json::Value;

use crate::canonical::FieldMap;
use crate::error::{Error, Result};

fn common_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(EXPECT, HeaderValue::from_static("100-continue"));
    headers.insert(CONNECTION, HeaderValue::from_static("Keep-Alive"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

fn form_text(field: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::Shape {
            field: field.to_string(),
        }),
    }
}

pub(crate) fn multipart_form(fields: FieldMap) -> Result<Form> {
    let mut form = Form::new();

    for (name, value) in fields {
        let text = form_text(&name, value)?;
        form = form.text(name, text);
    }

    Ok(form)
}

/**
Sends one POST per call and hands back the body untouched. The HTTP status
is not interpreted, the gateway reports failures inside the body.
 */
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
}

impl Transport {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, endpoint: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, endpoint))
            .headers(common_headers())
    }

    pub async fn post_json(&self, endpoint: &str, body: &FieldMap) -> Result<Vec<u8>> {
        let request = self
            .post(endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(serde_json::to_vec(body)?);

        self.send(endpoint, request).await
    }

    pub async fn post_multipart(&self, endpoint: &str, fields: FieldMap) -> Result<Vec<u8>> {
        let request = self.post(endpoint).multipart(multipart_form(fields)?);

        self.send(endpoint, request).await
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Vec<u8>> {
        tracing::debug!(endpoint, "Sending request to gateway");

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(endpoint, status = %status, bytes = body.len(), "Gateway responded");

        Ok(body.to_vec())
    }
}
