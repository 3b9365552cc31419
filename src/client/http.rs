// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Wyze cloud REST API.

use std::time::Duration;

use chrono::Utc;
use md5::{Digest, Md5};
use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::client::CloudClient;
use crate::error::{ParseError, ProtocolError, Result};
use crate::types::{Device, Event, EventType, PropertyId, Timestamp};

const SC: &str = "a626948714654991afd3c0dbd7cdb901";
const SV_OBJECT_LIST: &str = "c417b62d72ee44bf933054bdca183e77";
const SV_PROPERTY_LIST: &str = "1df2807c63254e16a06213323fe8dec8";
const SV_EVENT_LIST: &str = "bdcb412e230049c0be0916e75022d3f3";
const APP_NAME: &str = "com.hualai.WyzeCam";
const APP_VER: &str = "com.hualai.WyzeCam___2.18.43";
const PHONE_SYSTEM_TYPE: &str = "1";

/// Response code for success.
const CODE_OK: &str = "1";
/// Response code for a rejected access token.
const CODE_ACCESS_TOKEN_ERROR: &str = "2001";

/// Events older than this are not requested.
const EVENT_WINDOW_MILLIS: i64 = 24 * 60 * 60 * 1000;

// ============================================================================
// CloudConfig - Configuration for the cloud client
// ============================================================================

/// Configuration for an [`HttpCloudClient`].
///
/// # Examples
///
/// ```
/// use wyze_sensors::client::CloudConfig;
/// use std::time::Duration;
///
/// let config = CloudConfig::new("me@example.com", "hunter2")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.api_url(), "https://api.wyzecam.com");
/// ```
#[derive(Clone)]
pub struct CloudConfig {
    email: String,
    password: String,
    api_url: String,
    auth_url: String,
    api_key: String,
    timeout: Duration,
}

impl CloudConfig {
    /// Default REST API base URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.wyzecam.com";
    /// Default authentication base URL.
    pub const DEFAULT_AUTH_URL: &'static str = "https://auth-prod.wyze.com";
    /// API key sent with login requests.
    pub const DEFAULT_API_KEY: &'static str = "WMXHYf79Nr5gIlt3r0r7p9Tcw5bvs6BB4U8O8nGJ";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given account.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            api_url: Self::DEFAULT_API_URL.to_string(),
            auth_url: Self::DEFAULT_AUTH_URL.to_string(),
            api_key: Self::DEFAULT_API_KEY.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the REST API base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = trim_url(url.into());
        self
    }

    /// Overrides the authentication base URL.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = trim_url(url.into());
        self
    }

    /// Overrides the login API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the REST API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the authentication base URL.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `HttpCloudClient` without logging in.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<HttpCloudClient, ProtocolError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ProtocolError::InvalidAddress(self.api_url));
        }
        if !self.auth_url.starts_with("http://") && !self.auth_url.starts_with("https://") {
            return Err(ProtocolError::InvalidAddress(self.auth_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpCloudClient {
            config: self,
            client,
            phone_id: uuid::Uuid::new_v4().to_string(),
            access_token: RwLock::new(None),
        })
    }

    /// Creates an `HttpCloudClient` and logs in.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be created or login fails.
    pub async fn connect(self) -> Result<HttpCloudClient> {
        let client = self.into_client()?;
        client.login().await?;
        Ok(client)
    }
}

impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("email", &self.email)
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Hashes a password the way the login endpoint expects: MD5 applied three
/// times, each round over the previous lowercase hex digest.
fn hash_password(password: &str) -> String {
    let mut hashed = password.to_string();
    for _ in 0..3 {
        hashed = format!("{:x}", Md5::digest(hashed.as_bytes()));
    }
    hashed
}

// ============================================================================
// HttpCloudClient
// ============================================================================

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: Value,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Value,
}

impl ApiResponse {
    fn into_data(self) -> std::result::Result<Value, ProtocolError> {
        let code = match self.code {
            Value::String(code) => code,
            other => other.to_string(),
        };

        match code.as_str() {
            CODE_OK => Ok(self.data),
            CODE_ACCESS_TOKEN_ERROR => Err(ProtocolError::AccessTokenExpired),
            _ => Err(ProtocolError::Api {
                code,
                message: self.msg,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PropertyEntry {
    pid: String,
    value: Value,
}

/// Client for the Wyze cloud REST API.
///
/// The access token is kept behind a lock so one client can be shared by every sensor
/// through an `Arc`.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use wyze_sensors::client::{CloudClient, CloudConfig};
///
/// # async fn example() -> wyze_sensors::Result<()> {
/// let client = Arc::new(CloudConfig::new("me@example.com", "hunter2").connect().await?);
/// for device in client.get_devices().await? {
///     println!("{} ({})", device.nickname, device.product_type);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpCloudClient {
    config: CloudConfig,
    client: Client,
    phone_id: String,
    access_token: RwLock<Option<String>>,
}

impl HttpCloudClient {
    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// Returns `true` once a login succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.read().is_some()
    }

    /// Logs in and stores the returned access token.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::AuthenticationFailed` if the credentials are
    /// refused, or a transport error.
    pub async fn login(&self) -> Result<()> {
        let url = format!("{}/user/login", self.config.auth_url);
        tracing::debug!(url = %url, email = %self.config.email, "Logging in");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&json!({
                "email": self.config.email,
                "password": hash_password(&self.config.password),
            }))
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            let reason = format!("HTTP {}", status.as_u16());
            return Err(ProtocolError::AuthenticationFailed(reason).into());
        }
        check_status(status)?;

        let login: LoginResponse = response.json().await.map_err(ProtocolError::Http)?;
        let Some(access_token) = login.access_token else {
            let reason = login
                .description
                .unwrap_or_else(|| "no access token returned".to_string());
            return Err(ProtocolError::AuthenticationFailed(reason).into());
        };

        *self.access_token.write() = Some(access_token);

        tracing::debug!(email = %self.config.email, "Login succeeded");
        Ok(())
    }

    fn current_token(&self) -> std::result::Result<String, ProtocolError> {
        self.access_token
            .read()
            .clone()
            .ok_or(ProtocolError::NotAuthenticated)
    }

    /// Builds the fields every API request carries.
    fn base_payload(&self, sv: &str, access_token: String) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("sc".into(), SC.into());
        payload.insert("sv".into(), sv.into());
        payload.insert("app_ver".into(), APP_VER.into());
        payload.insert("app_version".into(), APP_VER.into());
        payload.insert("app_name".into(), APP_NAME.into());
        payload.insert("phone_id".into(), self.phone_id.clone().into());
        payload.insert("phone_system_type".into(), PHONE_SYSTEM_TYPE.into());
        payload.insert("ts".into(), Utc::now().timestamp_millis().into());
        payload.insert("access_token".into(), access_token.into());
        payload
    }

    /// Sends an API request and returns the `data` member of the response.
    async fn post_api(&self, path: &str, sv: &str, fields: Map<String, Value>) -> Result<Value> {
        let mut payload = self.base_payload(sv, self.current_token()?);
        payload.extend(fields);

        let url = format!("{}{path}", self.config.api_url);
        tracing::debug!(url = %url, "Sending cloud request");

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AccessTokenExpired.into());
        }
        check_status(response.status())?;

        let envelope: ApiResponse = response.json().await.map_err(ProtocolError::Http)?;
        Ok(envelope.into_data()?)
    }
}

fn check_status(status: StatusCode) -> std::result::Result<(), ProtocolError> {
    if status.is_success() {
        return Ok(());
    }
    Err(ProtocolError::ConnectionFailed(format!(
        "HTTP {} - {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )))
}

fn take_field(data: Value, field: &str) -> std::result::Result<Value, ParseError> {
    match data {
        Value::Object(mut map) => map
            .remove(field)
            .ok_or_else(|| ParseError::MissingField(field.to_string())),
        other => Err(ParseError::UnexpectedFormat(format!(
            "expected object with `{field}`, got {other}"
        ))),
    }
}

impl CloudClient for HttpCloudClient {
    async fn get_devices(&self) -> Result<Vec<Device>> {
        let data = self
            .post_api("/app/v2/home_page/get_object_list", SV_OBJECT_LIST, Map::new())
            .await?;
        let list = take_field(data, "device_list")?;
        let entries: Vec<Value> = serde_json::from_value(list).map_err(ParseError::Json)?;

        let devices: Vec<Device> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Device>(entry) {
                Ok(device) => Some(device),
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping malformed device entry");
                    None
                }
            })
            .collect();

        tracing::debug!(count = devices.len(), "Fetched device list");
        Ok(devices)
    }

    async fn get_info(&self, device: &Device) -> Result<Vec<(PropertyId, String)>> {
        let mut fields = Map::new();
        fields.insert("device_mac".into(), device.mac.clone().into());
        fields.insert("device_model".into(), device.product_model.clone().into());
        fields.insert("target_pid_list".into(), Value::Array(Vec::new()));

        let data = self
            .post_api("/app/v2/device/get_property_list", SV_PROPERTY_LIST, fields)
            .await?;
        let list = take_field(data, "property_list")?;
        let entries: Vec<PropertyEntry> = serde_json::from_value(list).map_err(ParseError::Json)?;

        let properties = entries
            .into_iter()
            .filter_map(|entry| {
                let Ok(pid) = entry.pid.parse::<PropertyId>() else {
                    tracing::trace!(
                        mac = %device.mac,
                        pid = %entry.pid,
                        "Ignoring unknown property"
                    );
                    return None;
                };
                let value = match entry.value {
                    Value::String(value) => value,
                    other => other.to_string(),
                };
                Some((pid, value))
            })
            .collect();

        Ok(properties)
    }

    async fn get_latest_event(
        &self,
        device: &Device,
        event_type: EventType,
    ) -> Result<Option<Event>> {
        let now = Timestamp::from_millis(Utc::now().timestamp_millis());

        let mut fields = Map::new();
        fields.insert("device_mac".into(), device.mac.clone().into());
        fields.insert("event_value_list".into(), json!(event_type.value_codes()));
        fields.insert(
            "begin_time".into(),
            now.offset_millis(-EVENT_WINDOW_MILLIS).as_millis().into(),
        );
        fields.insert("end_time".into(), now.as_millis().into());
        fields.insert("order_by".into(), Value::from(2));
        fields.insert("count".into(), Value::from(1));

        let data = self
            .post_api("/app/v2/device/get_event_list", SV_EVENT_LIST, fields)
            .await?;
        let list = take_field(data, "event_list")?;
        let mut events: Vec<Event> = serde_json::from_value(list).map_err(ParseError::Json)?;

        tracing::debug!(
            mac = %device.mac,
            event_type = %event_type,
            found = !events.is_empty(),
            "Fetched latest event"
        );

        if events.is_empty() {
            Ok(None)
        } else {
            Ok(Some(events.swap_remove(0)))
        }
    }

    /// Logs in again. The previous token stays in place until the new login
    /// succeeds.
    async fn reauthenticate(&self) -> Result<()> {
        self.login().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_password_applies_md5_three_times() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        let once = format!("{:x}", Md5::digest(b""));
        assert_eq!(once, "d41d8cd98f00b204e9800998ecf8427e");

        let twice = format!("{:x}", Md5::digest(once.as_bytes()));
        let thrice = format!("{:x}", Md5::digest(twice.as_bytes()));
        assert_eq!(hash_password(""), thrice);
        assert_eq!(hash_password("secret").len(), 32);
    }

    #[test]
    fn config_default_values() {
        let config = CloudConfig::new("me@example.com", "pw");
        assert_eq!(config.email(), "me@example.com");
        assert_eq!(config.api_url(), CloudConfig::DEFAULT_API_URL);
        assert_eq!(config.auth_url(), CloudConfig::DEFAULT_AUTH_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = CloudConfig::new("a", "b")
            .with_api_url("http://127.0.0.1:9000/")
            .with_auth_url("http://127.0.0.1:9001/");
        assert_eq!(config.api_url(), "http://127.0.0.1:9000");
        assert_eq!(config.auth_url(), "http://127.0.0.1:9001");
    }

    #[test]
    fn config_debug_hides_password() {
        let config = CloudConfig::new("me@example.com", "hunter2");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn into_client_rejects_bad_url() {
        let result = CloudConfig::new("a", "b").with_api_url("api.wyzecam.com").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn new_client_is_not_authenticated() {
        let client = CloudConfig::new("a", "b").into_client().unwrap();
        assert!(!client.is_authenticated());
        assert!(matches!(
            client.current_token(),
            Err(ProtocolError::NotAuthenticated)
        ));
    }

    #[test]
    fn api_response_codes() {
        let ok = ApiResponse {
            code: Value::from("1"),
            msg: String::new(),
            data: json!({"x": 1}),
        };
        assert_eq!(ok.into_data().unwrap(), json!({"x": 1}));

        let numeric_ok = ApiResponse {
            code: Value::from(1),
            msg: String::new(),
            data: Value::Null,
        };
        assert!(numeric_ok.into_data().is_ok());

        let expired = ApiResponse {
            code: Value::from("2001"),
            msg: "AccessTokenError".to_string(),
            data: Value::Null,
        };
        assert!(matches!(
            expired.into_data(),
            Err(ProtocolError::AccessTokenExpired)
        ));

        let other = ApiResponse {
            code: Value::from("1000"),
            msg: "Parameter error".to_string(),
            data: Value::Null,
        };
        assert!(matches!(
            other.into_data(),
            Err(ProtocolError::Api { code, .. }) if code == "1000"
        ));
    }

    #[test]
    fn take_field_missing() {
        let err = take_field(json!({"other": []}), "device_list").unwrap_err();
        assert!(matches!(err, ParseError::MissingField(field) if field == "device_list"));
    }
}
