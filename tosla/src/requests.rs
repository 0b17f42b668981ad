#![allow(clippy::upper_case_acronyms)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::{to_field_map, FieldMap};
use crate::error::{Result, ValidationError};
use crate::validation::validate_card_at;

/**
ISO 4217 numeric currency code, sent as a bare number. Codes without a named
variant go through `Other`.
 */
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
#[serde(from = "u16", into = "u16")]
pub enum Currency {
    #[default]
    TRY,
    USD,
    EUR,
    GBP,
    Other(u16),
}

impl Currency {
    pub fn code(&self) -> u16 {
        match self {
            Currency::TRY => 949,
            Currency::USD => 840,
            Currency::EUR => 978,
            Currency::GBP => 826,
            Currency::Other(code) => *code,
        }
    }
}

impl From<u16> for Currency {
    fn from(code: u16) -> Self {
        match code {
            949 => Currency::TRY,
            840 => Currency::USD,
            978 => Currency::EUR,
            826 => Currency::GBP,
            other => Currency::Other(other),
        }
    }
}

impl From<Currency> for u16 {
    fn from(currency: Currency) -> Self {
        currency.code()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BinCheck {
    /**
    First 6 or 8 digits of the card
     */
    #[serde(rename = "bin")]
    pub bin: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Init3dsRequest {
    /**
    Order id in your system. Generated by the gateway when empty.
     */
    #[serde(rename = "orderId", skip_serializing_if = "String::is_empty", default)]
    pub order_id: String,

    /**
    Where the bank posts the 3-D Secure result
     */
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,

    #[serde(rename = "description", skip_serializing_if = "String::is_empty", default)]
    pub description: String,

    /**
    Returned untouched in the callback
     */
    #[serde(rename = "echo", skip_serializing_if = "String::is_empty", default)]
    pub echo: String,

    #[serde(rename = "extraParameters", skip_serializing_if = "String::is_empty", default)]
    pub extra_parameters: String,

    /**
    Amount in minor units (6999 = 69.99)
     */
    #[serde(rename = "amount")]
    pub amount: u64,

    #[serde(rename = "currency")]
    pub currency: Currency,

    /**
    0 for a single payment
     */
    #[serde(rename = "installmentCount")]
    pub installment_count: u32,
}

/**
Card data posted to the bank form once a 3-D Secure session exists.
 */
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Pay3dsRequest {
    #[serde(rename = "ThreeDSessionId")]
    pub three_d_session_id: String,

    #[serde(rename = "CardHolderName")]
    pub card_holder_name: String,

    #[serde(rename = "CardNo")]
    pub card_no: String,

    /**
    MM/YY
     */
    #[serde(rename = "ExpireDate")]
    pub expire_date: String,

    #[serde(rename = "Cvv")]
    pub cvv: String,
}

impl Pay3dsRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        validate_card_at(&self.card_holder_name, &self.card_no, &self.expire_date, now)
    }
}

#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Non3dsRequest {
    #[serde(rename = "cardHolderName")]
    pub card_holder_name: String,

    #[serde(rename = "cardNo")]
    pub card_no: String,

    /**
    MM/YY
     */
    #[serde(rename = "expireDate")]
    pub expire_date: String,

    #[serde(rename = "cvv")]
    pub cvv: String,

    #[serde(rename = "orderId", skip_serializing_if = "String::is_empty", default)]
    pub order_id: String,

    /**
    Amount in minor units (6999 = 69.99)
     */
    #[serde(rename = "amount")]
    pub amount: u64,

    #[serde(rename = "currency")]
    pub currency: Currency,

    #[serde(rename = "installmentCount")]
    pub installment_count: u32,

    #[serde(rename = "description", skip_serializing_if = "String::is_empty", default)]
    pub description: String,

    #[serde(rename = "echo", skip_serializing_if = "String::is_empty", default)]
    pub echo: String,

    #[serde(rename = "extraParameters", skip_serializing_if = "String::is_empty", default)]
    pub extra_parameters: String,
}

impl Non3dsRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        validate_card_at(&self.card_holder_name, &self.card_no, &self.expire_date, now)
    }
}

/// Masks everything but the last four digits.
fn mask_card_no(card_no: &str) -> String {
    let digits: Vec<char> = card_no.chars().filter(|c| !c.is_whitespace()).collect();
    let visible = digits.len().saturating_sub(4);

    digits
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { *c })
        .collect()
}

impl std::fmt::Debug for Pay3dsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pay3dsRequest")
            .field("three_d_session_id", &self.three_d_session_id)
            .field("card_holder_name", &self.card_holder_name)
            .field("card_no", &mask_card_no(&self.card_no))
            .field("expire_date", &self.expire_date)
            .field("cvv", &"***")
            .finish()
    }
}

impl std::fmt::Debug for Non3dsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Non3dsRequest")
            .field("card_holder_name", &self.card_holder_name)
            .field("card_no", &mask_card_no(&self.card_no))
            .field("expire_date", &self.expire_date)
            .field("cvv", &"***")
            .field("order_id", &self.order_id)
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("installment_count", &self.installment_count)
            .field("description", &self.description)
            .field("echo", &self.echo)
            .field("extra_parameters", &self.extra_parameters)
            .finish()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    /// Signed envelope merged with the request fields, sent as one JSON object
    Json,
    /// Request fields only, one multipart text field each
    Multipart,
}

#[derive(Debug, Clone)]
pub enum GatewayRequest {
    BinCheck(BinCheck),
    Init3ds(Init3dsRequest),
    Pay3ds(Pay3dsRequest),
    Non3ds(Non3dsRequest),
}

impl GatewayRequest {
    pub fn endpoint(&self) -> &'static str {
        match self {
            GatewayRequest::BinCheck(_) => "/api/Payment/GetCommissionAndInstallmentInfo",
            GatewayRequest::Init3ds(_) => "/api/Payment/threeDPayment",
            GatewayRequest::Pay3ds(_) => "/api/Payment/ProcessCardForm",
            GatewayRequest::Non3ds(_) => "/api/Payment/Payment",
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            GatewayRequest::Pay3ds(_) => Encoding::Multipart,
            GatewayRequest::BinCheck(_) | GatewayRequest::Init3ds(_) | GatewayRequest::Non3ds(_) => {
                Encoding::Json
            }
        }
    }

    /// Local checks that must pass before anything is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at(Utc::now())
    }

    /// Same checks with card expiry judged at `now`.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        match self {
            GatewayRequest::BinCheck(_) | GatewayRequest::Init3ds(_) => Ok(()),
            GatewayRequest::Pay3ds(req) => req.validate_at(now),
            GatewayRequest::Non3ds(req) => req.validate_at(now),
        }
    }

    pub fn field_map(&self) -> Result<FieldMap> {
        match self {
            GatewayRequest::BinCheck(req) => to_field_map(req),
            GatewayRequest::Init3ds(req) => to_field_map(req),
            GatewayRequest::Pay3ds(req) => to_field_map(req),
            GatewayRequest::Non3ds(req) => to_field_map(req),
        }
    }
}
