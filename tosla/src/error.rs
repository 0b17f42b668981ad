use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Can't decode gateway response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Gateway returned code {code}: {message}")]
    Gateway { code: i32, message: String },

    #[error("Invalid signature")]
    Authentication,

    #[error("Request must serialize to a flat object, field {field:?} has an unsupported shape")]
    Shape { field: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("card holder must have name and surname")]
    CardHolderName,

    #[error("invalid card no")]
    CardNumber,

    #[error("card is expired or has invalid expiry date")]
    Expiry,
}
