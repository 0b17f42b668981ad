use anyhow::Result;
use chrono::{Datelike, Utc};
use tosla::requests::{BinCheck, Currency, Init3dsRequest, Pay3dsRequest};
use tosla::Tosla;
use uuid::Uuid;

const SANDBOX_BIN: u32 = 589283;
const SANDBOX_CARD_NO: &str = "5890040000000016";
const SANDBOX_CARD_HOLDER: &str = "Adil Basar";
const SANDBOX_CVV: &str = "200";

/// December of next year. The sandbox accepts any future expiry for its test card.
pub fn default_expire_date() -> String {
    format!("12/{:02}", (Utc::now().year() + 1) % 100)
}

/**
Sandbox walkthrough: bin lookup, 3-D Secure session, card form. The bank
then posts its result to `callback_url`.
 */
pub async fn run(tosla: &Tosla, callback_url: &str, expire_date: &str) -> Result<()> {
    let bin = tosla.check_bin(BinCheck { bin: SANDBOX_BIN }).await?;
    tracing::info!(
        bank = %bin.bank_name,
        card = %bin.card_name,
        installments = bin.installment_info.len(),
        "Bin check"
    );

    let order_id = Uuid::new_v4();

    let init = tosla
        .init_3ds(Init3dsRequest {
            order_id: order_id.to_string(),
            callback_url: callback_url.to_string(),
            description: "This is a test purchase".to_string(),
            echo: "echo".to_string(),
            extra_parameters: "extra".to_string(),
            amount: 6999,
            currency: Currency::TRY,
            installment_count: 0,
        })
        .await?;
    tracing::info!(%order_id, session = %init.three_d_session_id, "3DS session opened");

    let html = tosla
        .pay_3ds_html(Pay3dsRequest {
            three_d_session_id: init.three_d_session_id,
            card_holder_name: SANDBOX_CARD_HOLDER.to_string(),
            card_no: SANDBOX_CARD_NO.to_string(),
            expire_date: expire_date.to_string(),
            cvv: SANDBOX_CVV.to_string(),
        })
        .await?;
    tracing::info!(html = %String::from_utf8_lossy(&html), "Card form response");

    Ok(())
}
