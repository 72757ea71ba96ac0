//! WhatsApp order message built from the cart.

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use url::Url;

const MIN_PHONE_DIGITS: usize = 8;

/// Checkout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Store's WhatsApp number, any formatting (e.g. "+55 (11) 99999-8888").
    pub whatsapp_number: String,
    /// First line of the message.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Currency for the amounts in the message.
    #[serde(default)]
    pub currency: Currency,
}

fn default_greeting() -> String {
    "Olá! Gostaria de fazer o seguinte pedido:".to_string()
}

impl CheckoutConfig {
    /// Settings for a number with the default greeting.
    pub fn new(whatsapp_number: impl Into<String>) -> Self {
        Self {
            whatsapp_number: whatsapp_number.into(),
            greeting: default_greeting(),
            currency: Currency::default(),
        }
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// The WhatsApp number reduced to its digits.
    pub fn phone_digits(&self) -> Result<String, CommerceError> {
        let phone: String = self
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if phone.len() < MIN_PHONE_DIGITS {
            return Err(CommerceError::ValidationError(format!(
                "WhatsApp number {:?} needs at least {} digits",
                self.whatsapp_number, MIN_PHONE_DIGITS
            )));
        }
        Ok(phone)
    }
}

/// An order summary ready to hand to WhatsApp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutMessage {
    phone: String,
    text: String,
    total: Money,
}

impl CheckoutMessage {
    /// Render the order summary for the current cart.
    pub fn from_state(state: &CartState, config: &CheckoutConfig) -> Result<Self, CommerceError> {
        if state.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let phone = config.phone_digits()?;

        let mut text = format!("{}\n\n", config.greeting);
        for line in state.lines() {
            let amount = line.line_money(config.currency)?;
            text.push_str(&format!(
                "• {}x {} - {}\n",
                line.quantity, line.product.name, amount
            ));
        }
        let total = state.total_money(config.currency)?;
        text.push_str(&format!("\nTotal: {}", total));

        Ok(Self { phone, text, total })
    }

    /// Message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Destination number, digits only.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Order total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// `https://wa.me/<phone>?text=<message>` link.
    pub fn whatsapp_url(&self) -> Result<Url, CommerceError> {
        let mut url = Url::parse("https://wa.me/")
            .map_err(|e| CommerceError::ValidationError(e.to_string()))?;
        url.set_path(&self.phone);
        url.query_pairs_mut().append_pair("text", &self.text);
        Ok(url)
    }
}
