// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the Wyze cloud.
//!
//! Sensors talk to the cloud through the [`CloudClient`] trait, so any
//! implementation (the bundled [`HttpCloudClient`], or an in-memory fake in
//! tests) can drive them.
//!
//! # Re-authentication
//!
//! Every call may fail because the access token expired. Callers recover by
//! re-authenticating once and repeating the call once; [`with_reauth`]
//! implements that policy.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{CloudConfig, HttpCloudClient};

use std::future::Future;

use crate::error::Result;
use crate::types::{Device, Event, EventType, PropertyId};

/// Operations the sensors need from the cloud.
///
/// Implementations are shared between sensor tasks behind an `Arc`, so they
/// must be `Send + Sync` and keep any token state behind interior mutability.
pub trait CloudClient: Send + Sync {
    /// Lists every device on the account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token was rejected.
    fn get_devices(&self) -> impl Future<Output = Result<Vec<Device>>> + Send;

    /// Returns the current property values of a device.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token was rejected.
    fn get_info(
        &self,
        device: &Device,
    ) -> impl Future<Output = Result<Vec<(PropertyId, String)>>> + Send;

    /// Returns the most recent event of the given type, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token was rejected.
    fn get_latest_event(
        &self,
        device: &Device,
        event_type: EventType,
    ) -> impl Future<Output = Result<Option<Event>>> + Send;

    /// Obtains a fresh access token.
    ///
    /// # Errors
    ///
    /// Returns error if login fails.
    fn reauthenticate(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Runs `op`, re-authenticating and retrying once on an access-token error.
///
/// A second failure of any kind is returned to the caller unchanged. Errors
/// other than access-token errors are returned without a retry.
///
/// # Errors
///
/// Returns the error of the retried call, or the re-authentication error.
pub async fn with_reauth<C, T, F, Fut>(client: &C, mut op: F) -> Result<T>
where
    C: CloudClient + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match op().await {
        Err(err) if err.is_access_token() => {
            tracing::warn!(error = %err, "Access token rejected, re-authenticating");
            client.reauthenticate().await?;
            op().await
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::{Error, ProtocolError};

    #[derive(Default)]
    struct CountingClient {
        reauths: AtomicUsize,
        login_down: bool,
    }

    impl CloudClient for CountingClient {
        async fn get_devices(&self) -> Result<Vec<Device>> {
            Ok(Vec::new())
        }

        async fn get_info(&self, _device: &Device) -> Result<Vec<(PropertyId, String)>> {
            Ok(Vec::new())
        }

        async fn get_latest_event(
            &self,
            _device: &Device,
            _event_type: EventType,
        ) -> Result<Option<Event>> {
            Ok(None)
        }

        async fn reauthenticate(&self) -> Result<()> {
            self.reauths.fetch_add(1, Ordering::SeqCst);
            if self.login_down {
                return Err(Error::from(ProtocolError::ConnectionFailed(
                    "HTTP 503".to_string(),
                )));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn success_does_not_reauthenticate() {
        let client = CountingClient::default();
        let value = with_reauth(&client, || async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(client.reauths.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn token_error_retries_once() {
        let client = CountingClient::default();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let value = with_reauth(&client, move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Error::from(ProtocolError::AccessTokenExpired))
            } else {
                Ok("ok")
            }
        })
        .await
        .unwrap();

        assert_eq!(value, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.reauths.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn second_token_error_propagates() {
        let client = CountingClient::default();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result: Result<()> = with_reauth(&client, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::from(ProtocolError::AccessTokenExpired))
        })
        .await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::AccessTokenExpired))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(client.reauths.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_reauthentication_propagates_without_retry() {
        let client = CountingClient {
            login_down: true,
            ..CountingClient::default()
        };
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result: Result<()> = with_reauth(&client, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::from(ProtocolError::AccessTokenExpired))
        })
        .await;

        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.reauths.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_token_triggers_login() {
        let client = CountingClient::default();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let value = with_reauth(&client, move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Error::from(ProtocolError::NotAuthenticated))
            } else {
                Ok(3)
            }
        })
        .await
        .unwrap();

        assert_eq!(value, 3);
        assert_eq!(client.reauths.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let client = CountingClient::default();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result: Result<()> = with_reauth(&client, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::from(ProtocolError::ConnectionFailed(
                "HTTP 503".to_string(),
            )))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.reauths.load(Ordering::SeqCst), 0);
    }
}
