//! One-shot position requests.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::checkout::Coordinates;

/// Default wait for a position fix.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Why no position was obtained. Every variant is retryable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Timed out waiting for a location fix")]
    Timeout,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

impl LocationError {
    /// Customer-facing text for the inline retry notice.
    pub fn notice(&self) -> String {
        match self {
            LocationError::Unsupported => "Seu navegador não suporta geolocalização".to_string(),
            LocationError::Timeout => "Erro: tempo esgotado ao obter a localização".to_string(),
            LocationError::PermissionDenied => {
                "Erro: permissão de localização negada".to_string()
            }
            LocationError::Unavailable(reason) => format!("Erro: {}", reason),
        }
    }
}

/// Source of the device position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Ask `provider` for the current position, giving up after `timeout`.
pub async fn request_location(
    provider: Option<&dyn LocationProvider>,
    timeout: Duration,
) -> Result<Coordinates, LocationError> {
    let Some(provider) = provider else {
        return Err(LocationError::Unsupported);
    };

    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(?timeout, "location request timed out");
            Err(LocationError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Coordinates);

    #[async_trait]
    impl LocationProvider for Fixed {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            Ok(self.0)
        }
    }

    struct Stalled;

    #[async_trait]
    impl LocationProvider for Stalled {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(LocationError::Unavailable("never".to_string()))
        }
    }

    #[tokio::test]
    async fn test_returns_position() {
        let provider = Fixed(Coordinates::new(-1.4, -48.5));
        let coords = request_location(Some(&provider), DEFAULT_LOCATION_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(coords, Coordinates::new(-1.4, -48.5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out() {
        let result = request_location(Some(&Stalled), DEFAULT_LOCATION_TIMEOUT).await;
        assert_eq!(result, Err(LocationError::Timeout));
    }

    #[tokio::test]
    async fn test_missing_provider_is_unsupported() {
        let result = request_location(None, DEFAULT_LOCATION_TIMEOUT).await;
        assert_eq!(result, Err(LocationError::Unsupported));
    }
}
