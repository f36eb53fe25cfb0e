mod errors;
mod transaction;

pub(crate) use errors::{InvalidInput, StoreError};
pub(crate) use transaction::{Transaction, DEFAULT_CURRENCY};
