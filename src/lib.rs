pub mod api;
mod config;
mod signature;

pub use api::{Api, ApiError, ApiRequest, ApiResponse, Envelope, Method, Status};
pub use config::{Config, ConfigError};
pub use signature::{
    Clock, IdGenerator, NewSignature, Signature, SignatureId, SignatureMatcher, SignaturePatch,
    SignatureStore, StoreError, SystemClock,
};
