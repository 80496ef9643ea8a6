//! Core module containing domain types, errors and token generation

pub mod error;
pub mod link;
pub mod token;

pub use error::{ErrorResponse, LinkError, LinkResult};
pub use link::{ConsumedLink, CreatedLink, LinkRecord};
pub use token::generate_token;
