use serde::de::DeserializeOwned;

use crate::canonical::{combine_maps, to_field_map};
use crate::config::{Credentials, ToslaOptions};
use crate::error::{Error, Result};
use crate::requests::{
    BinCheck, Encoding, GatewayRequest, Init3dsRequest, Non3dsRequest, Pay3dsRequest,
};
use crate::responses::{BinResponse, Init3dsResponse, Non3dsResponse, ResponseStatus};
use crate::signature::{validate_callback_signature, SignedEnvelope};
use crate::transport::Transport;

/**
Gateway client. Holds nothing but the credentials and a pooled HTTP client,
so one instance can be cloned or shared between tasks.

Calls are never retried. Repeating `pay_non_3ds` or `pay_3ds_html` after an
error may charge the card twice.
 */
#[derive(Debug, Clone)]
pub struct Tosla {
    credentials: Credentials,
    transport: Transport,
}

impl Tosla {
    pub fn with_options(options: ToslaOptions) -> Self {
        let credentials = options.credentials();
        let client = options.http_client.unwrap_or_default();

        Self {
            credentials,
            transport: Transport::new(client, options.base_url),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Fresh `rnd`/`timeSpan`/`hash` for one outbound call.
    pub fn generate_rnd_time_hash(&self) -> SignedEnvelope {
        SignedEnvelope::sign(&self.credentials)
    }

    async fn execute(&self, request: GatewayRequest) -> Result<Vec<u8>> {
        request.validate()?;

        let fields = request.field_map()?;

        match request.encoding() {
            Encoding::Json => {
                let envelope = to_field_map(&self.generate_rnd_time_hash())?;
                let body = combine_maps([envelope, fields]);

                self.transport.post_json(request.endpoint(), &body).await
            }
            Encoding::Multipart => self.transport.post_multipart(request.endpoint(), fields).await,
        }
    }

    fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
        let status: ResponseStatus = serde_json::from_slice(raw)?;

        if !status.is_success() {
            return Err(Error::Gateway {
                code: status.code,
                message: status.message,
            });
        }

        Ok(serde_json::from_slice(raw)?)
    }

    pub async fn check_bin(&self, req: BinCheck) -> Result<BinResponse> {
        let raw = self.execute(GatewayRequest::BinCheck(req)).await?;

        Self::decode(&raw)
    }

    pub async fn init_3ds(&self, req: Init3dsRequest) -> Result<Init3dsResponse> {
        let raw = self.execute(GatewayRequest::Init3ds(req)).await?;

        Self::decode(&raw)
    }

    /**
    Posts card data for a session opened by [`Tosla::init_3ds`] and returns the
    bank's HTML as is. Whatever error the HTML may describe is left to the
    caller.
     */
    pub async fn pay_3ds_html(&self, req: Pay3dsRequest) -> Result<Vec<u8>> {
        self.execute(GatewayRequest::Pay3ds(req)).await
    }

    pub async fn pay_non_3ds(&self, req: Non3dsRequest) -> Result<Non3dsResponse> {
        let raw = self.execute(GatewayRequest::Non3ds(req)).await?;

        Self::decode(&raw)
    }

    pub fn validate_incoming_hash(
        &self,
        hash: &str,
        order_id: &str,
        md_status: &str,
        bank_response_code: &str,
        bank_response_message: &str,
        request_status: &str,
    ) -> bool {
        validate_callback_signature(
            hash,
            &self.credentials,
            order_id,
            md_status,
            bank_response_code,
            bank_response_message,
            request_status,
        )
    }
}
