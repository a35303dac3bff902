//! Mock payment provider for testing and local runs.
//!
//! Returns a deterministic checkout URL, records every request, and can be
//! told to fail the next call.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider};

/// Mock payment provider.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.fail_next(PaymentError::network("connection reset"));
/// let result = mock.create_checkout_session(request).await;
/// assert!(result.is_err());
/// assert_eq!(mock.requests().len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Requests seen, in call order.
    requests: Vec<CreateCheckoutRequest>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Base of the generated checkout URLs.
    checkout_base: Option<String>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve checkout URLs under `base` instead of the default.
    pub fn with_checkout_base(self, base: impl Into<String>) -> Self {
        self.lock().checkout_base = Some(base.into());
        self
    }

    /// Make the next `create_checkout_session` call fail with `error`.
    pub fn fail_next(&self, error: PaymentError) {
        self.lock().next_error = Some(error);
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<CreateCheckoutRequest> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.lock();
        state.requests.push(request);

        if let Some(err) = state.next_error.take() {
            return Err(err);
        }

        let id = format!("cs_mock_{}", state.requests.len());
        let base = state
            .checkout_base
            .clone()
            .unwrap_or_else(|| "https://checkout.mock.test/pay".to_string());

        Ok(CheckoutSession {
            url: format!("{}/{}", base, id),
            id,
            expires_at: None,
        })
    }
}
