//! Endpoint groups of the API.
//!
//! Each service borrows the [`Client`](crate::Client) and maps one method to
//! one endpoint. Every call is a single `POST`, except zone searches which
//! walk all result pages.

mod account;
mod records;
mod zones;

pub use account::AccountService;
pub use records::RecordService;
pub use zones::ZoneService;
