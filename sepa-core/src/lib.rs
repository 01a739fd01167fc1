//! SEPA payment initiation toolkit
//!
//! Builds outbound SEPA messages and reads inbound statements:
//!
//! - **pain.001.001.03**: Customer Credit Transfer Initiation ([`CreditTransferBuilder`])
//! - **pain.008.001.02**: Customer Direct Debit Initiation ([`DirectDebitBuilder`])
//! - **camt.053.001.02**: Bank To Customer Statement ([`BankToCustomerStatement`])
//!
//! # Aggregates
//!
//! Every message carries `NbOfTxs` and `CtrlSum` twice: in the group header
//! and in each payment information group. Builders hand out a group handle
//! that borrows both the header and its group, and every append advances
//! both in one step:
//!
//! ```text
//! header.totals == Σ group.totals
//! group.totals  == (len(transactions), Σ amount)
//! ```
//!
//! A rejected append (bad IBAN, BIC, length, amount) changes nothing.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use sepa_core::{DirectDebitBuilder, DirectDebitTransaction, Mandate, Party, SequenceType};
//!
//! # fn main() -> sepa_core::Result<()> {
//! let now = NaiveDate::from_ymd_opt(2013, 1, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut builder = DirectDebitBuilder::new();
//! builder.set_header(None, "Vereniging", now)?;
//!
//! let mut group = builder.open_group(
//!     "DD-2013-01",
//!     NaiveDate::from_ymd_opt(2013, 1, 10).unwrap(),
//!     SequenceType::First,
//!     Party::with_address("Vereniging", "NL", vec!["Dorpstraat 1".into()])?,
//!     "NL44RABO0123456789",
//!     "RABONL2U",
//! )?;
//! group.add_transaction(DirectDebitTransaction {
//!     instruction_id: "I-1".into(),
//!     end_to_end_id: "E-1".into(),
//!     amount: Decimal::new(160000, 2),
//!     mandate: Mandate {
//!         mandate_id: "M-1".into(),
//!         date_of_signature: NaiveDate::from_ymd_opt(2012, 12, 1).unwrap(),
//!         creditor_scheme_id: "NL89ZZZ011234567890".into(),
//!     },
//!     debtor: Party::new("Lid")?,
//!     debtor_iban: "NL91ABNA0417164300".into(),
//!     debtor_bic: "ABNANL2A".into(),
//!     remittance: "Contributie 2013".into(),
//! })?;
//! assert_eq!(group.header().totals().count(), 1);
//!
//! let xml = builder.render()?;
//! # assert!(!xml.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod credit_transfer;
pub mod direct_debit;
#[allow(missing_docs)]
pub mod document;
pub mod error;
pub mod iban;
pub mod message;
pub mod render;
pub mod statement;
pub mod types;

// Re-exports
pub use aggregate::ControlTotals;
pub use batch::{Batch, BatchKind};
pub use config::Config;
pub use credit_transfer::{CreditTransferBuilder, CreditTransferGroup};
pub use direct_debit::{DirectDebitBuilder, DirectDebitGroup, DirectDebitTransaction, Mandate};
pub use error::{Error, Result};
pub use message::{BuilderOptions, GroupHeader};
pub use statement::BankToCustomerStatement;
pub use types::{Account, Bic, Iban, IbanCheck, Party, Remittance, SequenceType};
