//! Client for the Tosla card payment gateway.
//!
//! Every outbound call is signed with a fresh `rnd`/`timeSpan`/`hash`
//! envelope, sent either as a JSON object or as a multipart form, and the
//! decoded response is checked for a non-zero `Code`. Inbound 3-D Secure
//! callbacks are authenticated with the same hash scheme.

pub mod callback;
pub mod canonical;
pub mod client;
pub mod config;
pub mod error;
pub mod requests;
pub mod responses;
pub mod signature;
pub mod transport;
pub mod validation;

pub use callback::{ThreeDsCallback, VerifiedCallback};
pub use client::Tosla;
pub use config::{Credentials, Environment, ToslaOptions};
pub use error::{Error, Result, ValidationError};
pub use signature::SignedEnvelope;
