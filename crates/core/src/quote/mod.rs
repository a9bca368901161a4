//! Quote pipeline: validate → resolve route → price.

mod error;
mod service;

pub use error::QuoteError;
pub use service::QuoteService;
