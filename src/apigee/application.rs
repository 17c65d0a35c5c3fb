use super::{Pair, attribute};
use serde::{Deserialize, Serialize};

/// A consumer key issued to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub consumer_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credential_scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Pair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// `-1` means the credential never expires.
    #[serde(
        default,
        alias = "expiredAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub expires_at: Option<i64>,
}

impl Credential {
    /// Whether the credential has expired at the given instant.
    pub fn is_expired(&self, now_millis: i64) -> bool {
        matches!(self.expires_at, Some(at) if at >= 0 && at <= now_millis)
    }
}

/// An application registered by a developer or company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_family: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Pair>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<Credential>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_products: Vec<String>,
}

impl Application {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            app_id: None,
            status: None,
            app_family: None,
            name: name.into(),
            developer_id: None,
            callback_url: None,
            attributes: Vec::new(),
            credentials: Vec::new(),
            api_products: Vec::new(),
        }
    }

    pub fn callback(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.api_products.push(product.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        attribute(&self.attributes, name)
    }

    /// The credential with the given consumer key.
    pub fn credential(&self, consumer_key: &str) -> Option<&Credential> {
        self.credentials
            .iter()
            .find(|c| c.consumer_key == consumer_key)
    }
}

/// Envelope of `GET /apps?expand=true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationList {
    #[serde(default)]
    pub app: Vec<Application>,
}
