use serde::{Deserialize, Serialize};

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::signature::validate_callback_signature;

/**
Form posted by the bank to `callbackUrl` after the 3-D Secure step.
Untrusted until [`ThreeDsCallback::authenticate`] succeeds. Missing fields
deserialize as empty and make authentication fail.
 */
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ThreeDsCallback {
    #[serde(rename = "Hash")]
    pub hash: String,

    #[serde(rename = "OrderId")]
    pub order_id: String,

    #[serde(rename = "MdStatus")]
    pub md_status: String,

    #[serde(rename = "BankResponseCode")]
    pub bank_response_code: String,

    #[serde(rename = "BankResponseMessage")]
    pub bank_response_message: String,

    #[serde(rename = "RequestStatus")]
    pub request_status: String,
}

impl ThreeDsCallback {
    pub fn is_authentic(&self, credentials: &Credentials) -> bool {
        validate_callback_signature(
            &self.hash,
            credentials,
            &self.order_id,
            &self.md_status,
            &self.bank_response_code,
            &self.bank_response_message,
            &self.request_status,
        )
    }

    pub fn authenticate(self, credentials: &Credentials) -> Result<VerifiedCallback> {
        if !self.is_authentic(credentials) {
            return Err(Error::Authentication);
        }

        Ok(VerifiedCallback {
            order_id: self.order_id,
            md_status: self.md_status,
            bank_response_code: self.bank_response_code,
            bank_response_message: self.bank_response_message,
            request_status: self.request_status,
        })
    }
}

/// Callback whose hash matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCallback {
    pub order_id: String,
    pub md_status: String,
    pub bank_response_code: String,
    pub bank_response_message: String,
    pub request_status: String,
}
