//! Per-client account mapping and category resolution.

pub mod error;
pub mod mapping;
pub mod resolver;

pub use error::MappingError;
pub use mapping::{
    AccountMapping, AccountNumber, DEFAULT_DISBURSEMENT_ACCOUNT, DEFAULT_FAMILY_ACCOUNT,
    DEFAULT_RECEIVABLE_ACCOUNT, Fallbacks, LabelDetail, PaymentMethod,
};
pub use resolver::{AccountResolver, resolve};
