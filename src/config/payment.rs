//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment processor configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_api_key: String,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: String,

    /// Public base URL of the storefront, used for checkout redirect targets
    pub frontend_url: String,

    /// ISO currency code for checkout sessions
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Whether authenticated users may enroll without paying
    #[serde(default)]
    pub allow_direct_enroll: bool,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Frontend URL without a trailing slash.
    pub fn frontend_base(&self) -> &str {
        self.frontend_url.trim_end_matches('/')
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_WEBHOOK_SECRET"));
        }
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        if !self.frontend_url.starts_with("http://") && !self.frontend_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidFrontendUrl);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            stripe_webhook_secret: String::new(),
            frontend_url: String::new(),
            currency: default_currency(),
            allow_direct_enroll: false,
        }
    }
}

fn default_currency() -> String {
    "usd".to_string()
}
