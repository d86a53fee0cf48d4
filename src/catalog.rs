//! Remote track catalog: model, HTTP fetcher and background fetch worker.
//!
//! The catalog is produced by an external listing service that scans a
//! media directory server-side; this module only consumes the listing.

mod fetch;
mod model;
mod worker;

pub use fetch::*;
pub use model::*;
pub use worker::*;
