use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/**
Status pair present on every JSON response. `Code` 0 is success, anything
else is a failure described by `Message`.
 */
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResponseStatus {
    #[serde(rename = "Code")]
    pub code: i32,

    #[serde(rename = "Message", default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl ResponseStatus {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct InstallmentRate {
    #[serde(rename = "Rate", default)]
    pub rate: f64,

    #[serde(rename = "Constant", default)]
    pub constant: i64,
}

/**
Issuer data and installment commission table for a card prefix
 */
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct BinResponse {
    #[serde(rename = "CardPrefix")]
    pub card_prefix: i64,

    #[serde(rename = "BankId")]
    pub bank_id: i64,

    #[serde(rename = "BankCode", deserialize_with = "null_as_default")]
    pub bank_code: String,

    #[serde(rename = "BankName", deserialize_with = "null_as_default")]
    pub bank_name: String,

    #[serde(rename = "CardName", deserialize_with = "null_as_default")]
    pub card_name: String,

    #[serde(rename = "CardClass", deserialize_with = "null_as_default")]
    pub card_class: String,

    #[serde(rename = "CardType", deserialize_with = "null_as_default")]
    pub card_type: String,

    #[serde(rename = "Country", deserialize_with = "null_as_default")]
    pub country: String,

    #[serde(rename = "BankCommission")]
    pub bank_commission: f64,

    /**
    Installment count → commission rate
     */
    #[serde(rename = "InstallmentInfo", deserialize_with = "null_as_default")]
    pub installment_info: HashMap<String, InstallmentRate>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Init3dsResponse {
    /**
    Session to pass to the card form submission
     */
    #[serde(rename = "ThreeDSessionId", deserialize_with = "null_as_default")]
    pub three_d_session_id: String,

    #[serde(rename = "TransactionId", deserialize_with = "null_as_default")]
    pub transaction_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Non3dsResponse {
    #[serde(rename = "OrderId", deserialize_with = "null_as_default")]
    pub order_id: String,

    #[serde(rename = "BankResponseCode", deserialize_with = "null_as_default")]
    pub bank_response_code: String,

    #[serde(rename = "BankResponseMessage", deserialize_with = "null_as_default")]
    pub bank_response_message: String,

    #[serde(rename = "AuthCode", deserialize_with = "null_as_default")]
    pub auth_code: String,

    #[serde(rename = "HostReferenceNumber", deserialize_with = "null_as_default")]
    pub host_reference_number: String,

    #[serde(rename = "TransactionId", deserialize_with = "null_as_default")]
    pub transaction_id: String,

    #[serde(rename = "CardHolderName", deserialize_with = "null_as_default")]
    pub card_holder_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_response_decoding() {
        let body = r#"{
            "CardPrefix": 589283,
            "BankId": 46,
            "BankCode": "0046",
            "BankName": "Akbank",
            "CardName": "Axess",
            "CardClass": "Classic",
            "CardType": "Credit",
            "Country": "TR",
            "BankCommission": 0,
            "InstallmentInfo": {
                "2": {"Rate": 2.5, "Constant": 0},
                "3": {"Rate": 3.75, "Constant": 0}
            },
            "Code": 0,
            "Message": "Başarılı"
        }"#;

        let status: ResponseStatus = serde_json::from_str(body).unwrap();
        assert!(status.is_success());

        let bin: BinResponse = serde_json::from_str(body).unwrap();
        assert_eq!(bin.card_prefix, 589283);
        assert_eq!(bin.bank_name, "Akbank");
        assert_eq!(bin.installment_info.len(), 2);
        assert_eq!(bin.installment_info["3"].rate, 3.75);
    }

    #[test]
    fn test_nulls_and_missing_fields_default() {
        let body = r#"{"Code": 0, "Message": null, "InstallmentInfo": null, "BankName": null}"#;

        let status: ResponseStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.message, "");

        let bin: BinResponse = serde_json::from_str(body).unwrap();
        assert!(bin.installment_info.is_empty());
        assert_eq!(bin.bank_name, "");
    }

    #[test]
    fn test_status_requires_code() {
        assert!(serde_json::from_str::<ResponseStatus>(r#"{"Message": "ok"}"#).is_err());
    }

    #[test]
    fn test_non3ds_response_decoding() {
        let body = r#"{
            "Code": 0,
            "Message": "",
            "OrderId": "ORD-1",
            "BankResponseCode": "00",
            "BankResponseMessage": "Onaylandı",
            "AuthCode": "S12345",
            "HostReferenceNumber": "412345678901",
            "TransactionId": "T-9",
            "CardHolderName": "John Smith"
        }"#;

        let resp: Non3dsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.order_id, "ORD-1");
        assert_eq!(resp.auth_code, "S12345");
        assert_eq!(resp.transaction_id, "T-9");
    }
}
