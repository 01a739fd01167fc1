//! ISO 20022 document trees
//!
//! Plain serde structures shaped after the XSDs; quick-xml maps them to and
//! from markup. Builders populate them, they hold no invariants themselves.
//!
//! - pain.001.001.03: Customer Credit Transfer Initiation
//! - pain.008.001.02: Customer Direct Debit Initiation
//! - camt.053.001.02: Bank To Customer Statement (read only)

pub mod camt053;
pub mod common;
pub mod pain001;
pub mod pain008;

pub use camt053::Camt053Document;
pub use pain001::{parse_pain001, Pain001Document};
pub use pain008::{parse_pain008, Pain008Document};
