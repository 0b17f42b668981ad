use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

pub const PROD_URL: &str = "https://entegrasyon.tosla.com";
pub const SANDBOX_URL: &str = "https://prepentegrasyon.tosla.com";

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_URL,
            Environment::Production => PROD_URL,
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        })
    }
}

/**
Merchant credentials issued by the gateway. Used to sign every outbound call
and to authenticate callbacks.
 */
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_user: String,
    api_pass: String,
    client_id: String,
}

impl Credentials {
    pub fn new(
        api_user: impl Into<String>,
        api_pass: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            api_user: api_user.into(),
            api_pass: api_pass.into(),
            client_id: client_id.into(),
        }
    }

    pub fn api_user(&self) -> &str {
        &self.api_user
    }

    pub(crate) fn api_pass(&self) -> &str {
        &self.api_pass
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_user", &self.api_user)
            .field("api_pass", &"<redacted>")
            .field("client_id", &self.client_id)
            .finish()
    }
}

#[derive(Clone)]
pub struct ToslaOptions {
    pub base_url: String,
    pub api_user: String,
    pub api_pass: String,
    pub client_id: String,

    /**
    Pre-configured HTTP client, e.g. one built with a request timeout.
    A default pooled client is created when absent.
     */
    pub http_client: Option<reqwest::Client>,
}

impl ToslaOptions {
    pub fn new(
        environment: Environment,
        api_user: impl Into<String>,
        api_pass: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            api_user: api_user.into(),
            api_pass: api_pass.into(),
            client_id: client_id.into(),
            http_client: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub(crate) fn credentials(&self) -> Credentials {
        Credentials::new(&self.api_user, &self.api_pass, &self.client_id)
    }
}

impl Debug for ToslaOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToslaOptions")
            .field("base_url", &self.base_url)
            .field("api_user", &self.api_user)
            .field("api_pass", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("http_client", &self.http_client)
            .finish()
    }
}
