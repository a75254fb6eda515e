//! Checkout flow: address and payment selection, delivery options,
//! order totals, and mock order placement.

mod validate;

pub use validate::{validate_address, validate_payment};

use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use clementine_core::DeliverySpeed;

use crate::cart::{CartLine, CheckoutHandoff};
use crate::validate::Violation;

/// Sales tax applied to the item subtotal.
const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// A saved shipping address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub full_name: String,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
}

/// Input for adding a shipping address.
#[derive(Debug, Clone, Default)]
pub struct AddressInput {
    pub full_name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
}

/// Payment instrument category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentKind {
    Credit,
    Debit,
    Paypal,
    StorePay,
}

/// A saved payment method. Card numbers are stored masked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub kind: PaymentKind,
    /// Masked card number, e.g. `****-****-****-1111`.
    pub masked_number: String,
    pub cardholder: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub is_default: bool,
}

/// Input for adding a payment method. The full card number is consumed
/// here and never retained.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub kind: PaymentKind,
    pub card_number: String,
    pub cardholder: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    pub cvv: String,
}

/// A shipping speed with its flat fee and delivery window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOption {
    pub speed: DeliverySpeed,
    pub name: String,
    pub price: Decimal,
    pub window: String,
}

fn standard_tier() -> DeliveryOption {
    DeliveryOption {
        speed: DeliverySpeed::Standard,
        name: String::from("Standard Shipping"),
        price: Decimal::ZERO,
        window: String::from("5-7 business days"),
    }
}

/// The three flat-rate shipping tiers, free standard shipping first.
#[must_use]
pub fn delivery_options() -> Vec<DeliveryOption> {
    vec![
        standard_tier(),
        DeliveryOption {
            speed: DeliverySpeed::Express,
            name: String::from("Express Shipping"),
            price: Decimal::new(999, 2),
            window: String::from("2-3 business days"),
        },
        DeliveryOption {
            speed: DeliverySpeed::Overnight,
            name: String::from("Overnight Shipping"),
            price: Decimal::new(1999, 2),
            window: String::from("1 business day"),
        },
    ]
}

/// Demo address book.
#[must_use]
pub fn sample_addresses() -> Vec<Address> {
    vec![
        Address {
            id: String::from("addr-home"),
            full_name: String::from("Jane Doe"),
            line1: String::from("123 Main Street"),
            line2: Some(String::from("Apt 4B")),
            city: String::from("Springfield"),
            state: String::from("IL"),
            zip: String::from("62704"),
            country: String::from("United States"),
            phone: String::from("+15558675309"),
            is_default: true,
        },
        Address {
            id: String::from("addr-office"),
            full_name: String::from("Jane Doe"),
            line1: String::from("500 Commerce Plaza"),
            line2: None,
            city: String::from("Springfield"),
            state: String::from("IL"),
            zip: String::from("62701"),
            country: String::from("United States"),
            phone: String::from("+15558675309"),
            is_default: false,
        },
    ]
}

/// Demo wallet.
#[must_use]
pub fn sample_payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: String::from("pay-visa"),
            kind: PaymentKind::Credit,
            masked_number: String::from("****-****-****-1111"),
            cardholder: String::from("Jane Doe"),
            expiry_month: 12,
            expiry_year: 2030,
            is_default: true,
        },
        PaymentMethod {
            id: String::from("pay-debit"),
            kind: PaymentKind::Debit,
            masked_number: String::from("****-****-****-4242"),
            cardholder: String::from("Jane Doe"),
            expiry_month: 6,
            expiry_year: 2029,
            is_default: false,
        },
    ]
}

/// Errors from checkout operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CheckoutError {
    #[error("no shipping address selected")]
    MissingAddress,

    #[error("no payment method selected")]
    MissingPayment,

    #[error("address is invalid")]
    InvalidAddress(Vec<Violation>),

    #[error("payment method is invalid")]
    InvalidPayment(Vec<Violation>),
}

/// Order cost breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order_number: String,
    pub lines: Vec<CartLine>,
    pub totals: CheckoutTotals,
    pub address: Address,
    pub delivery: DeliveryOption,
    pub estimated_delivery: String,
}

/// Drives a single checkout session over the lines handed off from the
/// cart. Selections default to the address book and wallet defaults; the
/// standard (free) shipping tier starts selected.
#[derive(Debug)]
pub struct CheckoutFlow {
    lines: Vec<CartLine>,
    subtotal: Decimal,
    gift: bool,
    addresses: Vec<Address>,
    payments: Vec<PaymentMethod>,
    deliveries: Vec<DeliveryOption>,
    selected_address: Option<String>,
    selected_payment: Option<String>,
    selected_delivery: DeliveryOption,
    latency: Duration,
}

impl CheckoutFlow {
    /// Start a checkout over `handoff`; `None` starts an empty session.
    #[must_use]
    pub fn new(handoff: Option<CheckoutHandoff>, latency: Duration) -> Self {
        let (lines, subtotal, gift) = match handoff {
            Some(handoff) => (handoff.lines, handoff.subtotal, handoff.gift),
            None => (Vec::new(), Decimal::ZERO, false),
        };

        let addresses = sample_addresses();
        let payments = sample_payment_methods();
        let deliveries = delivery_options();
        let selected_delivery = deliveries.first().cloned().unwrap_or_else(standard_tier);
        let selected_address = addresses
            .iter()
            .find(|a| a.is_default)
            .map(|a| a.id.clone());
        let selected_payment = payments
            .iter()
            .find(|p| p.is_default)
            .map(|p| p.id.clone());

        Self {
            lines,
            subtotal,
            gift,
            addresses,
            payments,
            deliveries,
            selected_address,
            selected_payment,
            selected_delivery,
            latency,
        }
    }

    /// Lines being purchased.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether gift wrapping was requested at handoff.
    #[must_use]
    pub const fn gift(&self) -> bool {
        self.gift
    }

    /// Saved addresses available for selection.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Saved payment methods available for selection.
    #[must_use]
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payments
    }

    /// Available shipping tiers.
    #[must_use]
    pub fn delivery_options(&self) -> &[DeliveryOption] {
        &self.deliveries
    }

    /// The selected address, if any.
    #[must_use]
    pub fn selected_address(&self) -> Option<&Address> {
        let id = self.selected_address.as_deref()?;
        self.addresses.iter().find(|a| a.id == id)
    }

    /// The selected payment method, if any.
    #[must_use]
    pub fn selected_payment(&self) -> Option<&PaymentMethod> {
        let id = self.selected_payment.as_deref()?;
        self.payments.iter().find(|p| p.id == id)
    }

    /// The selected shipping tier.
    #[must_use]
    pub const fn selected_delivery(&self) -> &DeliveryOption {
        &self.selected_delivery
    }

    /// Select a saved address by id; unknown ids are ignored.
    pub fn select_address(&mut self, id: &str) {
        if self.addresses.iter().any(|a| a.id == id) {
            self.selected_address = Some(id.to_owned());
        }
    }

    /// Select a saved payment method by id; unknown ids are ignored.
    pub fn select_payment(&mut self, id: &str) {
        if self.payments.iter().any(|p| p.id == id) {
            self.selected_payment = Some(id.to_owned());
        }
    }

    /// Select a shipping tier; speeds without an option are ignored.
    pub fn select_delivery(&mut self, speed: DeliverySpeed) {
        if let Some(option) = self.deliveries.iter().find(|d| d.speed == speed) {
            self.selected_delivery = option.clone();
        }
    }

    /// Validate and save a new address, selecting it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidAddress`] listing the failing
    /// fields.
    pub fn add_address(&mut self, input: AddressInput) -> Result<&Address, CheckoutError> {
        let violations = validate_address(&input).into_violations();
        if !violations.is_empty() {
            return Err(CheckoutError::InvalidAddress(violations));
        }

        let address = Address {
            id: Uuid::new_v4().to_string(),
            full_name: input.full_name,
            line1: input.line1,
            line2: input.line2,
            city: input.city,
            state: input.state,
            zip: input.zip,
            country: input.country,
            phone: input.phone,
            is_default: false,
        };
        self.selected_address = Some(address.id.clone());
        self.addresses.push(address);
        self.addresses
            .last()
            .ok_or(CheckoutError::MissingAddress)
    }

    /// Validate and save a new payment method, selecting it. Only the
    /// masked number is retained.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidPayment`] listing the failing
    /// fields.
    pub fn add_payment(&mut self, input: PaymentInput) -> Result<&PaymentMethod, CheckoutError> {
        let violations = validate_payment(&input).into_violations();
        if !violations.is_empty() {
            return Err(CheckoutError::InvalidPayment(violations));
        }

        let digits: String = input
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let last4 = digits
            .get(digits.len().saturating_sub(4)..)
            .unwrap_or_default();
        let method = PaymentMethod {
            id: Uuid::new_v4().to_string(),
            kind: input.kind,
            masked_number: format!("****-****-****-{last4}"),
            cardholder: input.cardholder,
            expiry_month: input.expiry_month,
            expiry_year: input.expiry_year,
            is_default: false,
        };
        self.selected_payment = Some(method.id.clone());
        self.payments.push(method);
        self.payments
            .last()
            .ok_or(CheckoutError::MissingPayment)
    }

    /// Cost breakdown for the current selection.
    #[must_use]
    pub fn totals(&self) -> CheckoutTotals {
        let shipping = self.selected_delivery().price;
        let tax = (self.subtotal * TAX_RATE).round_dp(2);
        CheckoutTotals {
            subtotal: self.subtotal,
            shipping,
            tax,
            total: self.subtotal + shipping + tax,
        }
    }

    /// Place the order after the simulated processing delay.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] when no address or payment method is
    /// selected.
    pub async fn place_order(&self) -> Result<OrderSummary, CheckoutError> {
        let address = self
            .selected_address()
            .cloned()
            .ok_or(CheckoutError::MissingAddress)?;
        self.selected_payment().ok_or(CheckoutError::MissingPayment)?;

        tokio::time::sleep(self.latency).await;

        let delivery = self.selected_delivery().clone();
        let now = Utc::now();
        let order_number = format!("CLM-{:08}", now.timestamp_millis() % 100_000_000);
        let estimated_delivery = (now
            + chrono::Duration::days(i64::from(delivery.speed.transit_days())))
        .format("%A, %B %-d, %Y")
        .to_string();

        info!(%order_number, total = %self.totals().total, "order placed");

        Ok(OrderSummary {
            order_number,
            lines: self.lines.clone(),
            totals: self.totals(),
            address,
            delivery,
            estimated_delivery,
        })
    }
}
