//! Consumer side of the outbound integrations.
//!
//! Provider adapters implement [`analytics::EventReporter`] or [`email::Emailer`]; the
//! circuit-breaking wrappers here guard any implementation with a [`CircuitBreaker`].
//!
//! [`CircuitBreaker`]: crate::circuitbreaking::CircuitBreaker

pub mod analytics;
pub mod email;

use crate::circuitbreaking::CircuitBrokenError;

#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    #[error(transparent)]
    CircuitBroken(#[from] CircuitBrokenError),

    #[error("{provider}: {message}")]
    Provider { provider: String, message: String },
}

impl IntegrationError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn is_circuit_broken(&self) -> bool {
        matches!(self, Self::CircuitBroken(_))
    }
}

pub type IntegrationResult<T> = Result<T, IntegrationError>;
