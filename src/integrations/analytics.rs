//! Analytics event reporting.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{IntegrationError, IntegrationResult};
use crate::circuitbreaking::{ensure_circuit_breaker, CircuitBreaker, CircuitBrokenError};
use crate::context::Context;

pub type Properties = HashMap<String, Value>;

#[async_trait]
pub trait EventReporter: Send + Sync {
    /// Associates `properties` with a user.
    async fn add_user(&self, ctx: &Context, user_id: &str, properties: &Properties) -> IntegrationResult<()>;

    async fn event_occurred(
        &self,
        ctx: &Context,
        event: &str,
        user_id: &str,
        properties: &Properties,
    ) -> IntegrationResult<()>;
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventReporter;

#[async_trait]
impl EventReporter for NoopEventReporter {
    async fn add_user(&self, _ctx: &Context, _user_id: &str, _properties: &Properties) -> IntegrationResult<()> {
        Ok(())
    }

    async fn event_occurred(
        &self,
        _ctx: &Context,
        _event: &str,
        _user_id: &str,
        _properties: &Properties,
    ) -> IntegrationResult<()> {
        Ok(())
    }
}

/// Consults the breaker before each call and records the outcome.
pub struct CircuitBreakingEventReporter<R> {
    inner: R,
    breaker: Arc<dyn CircuitBreaker>,
}

impl<R: EventReporter> CircuitBreakingEventReporter<R> {
    pub fn new(inner: R, breaker: Option<Arc<dyn CircuitBreaker>>) -> Self {
        Self {
            inner,
            breaker: ensure_circuit_breaker(breaker),
        }
    }

    fn record<T>(&self, result: IntegrationResult<T>) -> IntegrationResult<T> {
        match &result {
            Ok(_) => self.breaker.succeeded(),
            Err(e) => {
                tracing::debug!("Analytics call failed: {}", e);
                self.breaker.failed();
            }
        }
        result
    }
}

#[async_trait]
impl<R: EventReporter> EventReporter for CircuitBreakingEventReporter<R> {
    async fn add_user(&self, ctx: &Context, user_id: &str, properties: &Properties) -> IntegrationResult<()> {
        if self.breaker.cannot_proceed() {
            return Err(IntegrationError::from(CircuitBrokenError));
        }

        let result = self.inner.add_user(ctx, user_id, properties).await;
        self.record(result)
    }

    async fn event_occurred(
        &self,
        ctx: &Context,
        event: &str,
        user_id: &str,
        properties: &Properties,
    ) -> IntegrationResult<()> {
        if self.breaker.cannot_proceed() {
            return Err(IntegrationError::from(CircuitBrokenError));
        }

        let result = self.inner.event_occurred(ctx, event, user_id, properties).await;
        self.record(result)
    }
}
