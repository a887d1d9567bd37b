//! Transactional email.

use std::sync::Arc;

use async_trait::async_trait;

use super::{IntegrationError, IntegrationResult};
use crate::circuitbreaking::{ensure_circuit_breaker, CircuitBreaker, CircuitBrokenError};
use crate::context::Context;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to_address: String,
    pub to_name: String,
    pub from_address: String,
    pub from_name: String,
    pub subject: String,
    pub html_content: String,
}

#[async_trait]
pub trait Emailer: Send + Sync {
    async fn send_email(&self, ctx: &Context, email: &OutboundEmail) -> IntegrationResult<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmailer;

#[async_trait]
impl Emailer for NoopEmailer {
    async fn send_email(&self, _ctx: &Context, _email: &OutboundEmail) -> IntegrationResult<()> {
        Ok(())
    }
}

/// Consults the breaker before sending and records the outcome.
pub struct CircuitBreakingEmailer<E> {
    inner: E,
    breaker: Arc<dyn CircuitBreaker>,
}

impl<E: Emailer> CircuitBreakingEmailer<E> {
    pub fn new(inner: E, breaker: Option<Arc<dyn CircuitBreaker>>) -> Self {
        Self {
            inner,
            breaker: ensure_circuit_breaker(breaker),
        }
    }
}

#[async_trait]
impl<E: Emailer> Emailer for CircuitBreakingEmailer<E> {
    async fn send_email(&self, ctx: &Context, email: &OutboundEmail) -> IntegrationResult<()> {
        if self.breaker.cannot_proceed() {
            tracing::warn!("Not sending email to {}: circuit broken", email.to_address);
            return Err(IntegrationError::from(CircuitBrokenError));
        }

        match self.inner.send_email(ctx, email).await {
            Ok(()) => {
                self.breaker.succeeded();
                Ok(())
            }
            Err(e) => {
                self.breaker.failed();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuitbreaking::NoopCircuitBreaker;

    struct Refusing;

    impl CircuitBreaker for Refusing {
        fn failed(&self) {}
        fn succeeded(&self) {}
        fn can_proceed(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn refused_send_reports_circuit_broken() {
        let emailer = CircuitBreakingEmailer::new(NoopEmailer, Some(Arc::new(Refusing)));

        let err = emailer
            .send_email(&Context::background(), &OutboundEmail::default())
            .await
            .unwrap_err();

        assert!(err.is_circuit_broken());
    }

    #[tokio::test]
    async fn allowed_send_reaches_provider() {
        let emailer = CircuitBreakingEmailer::new(NoopEmailer, Some(Arc::new(NoopCircuitBreaker)));

        assert!(emailer
            .send_email(&Context::background(), &OutboundEmail::default())
            .await
            .is_ok());
    }
}
