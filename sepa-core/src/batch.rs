//! Batch files: a whole initiation message described in TOML
//!
//! ```toml
//! kind = "credit-transfer"
//!
//! [header]
//! message_id = "000001"
//! initiator = "Bedrijfsnaam"
//! created_at = "2012-09-20T10:00:00"
//!
//! [[groups]]
//! id = "20120920-0001"
//! date = "2012-09-21"
//! name = "Debiteur"
//! iban = "NL10ABNA1234567890"
//! bic = "ABNANL2A"
//!
//! [[groups.transactions]]
//! end_to_end_id = "E2E-1"
//! amount = "386.00"
//! name = "Crediteur"
//! iban = "NL91RABO1234567890"
//! bic = "RABONL2U"
//! remittance = "Factuur 2012-386"
//! ```
//!
//! Direct debit batches add `sequence_type` per group and `instruction_id`,
//! `mandate_id`, `mandate_signed` and `creditor_scheme_id` per transaction.
//! Every row goes through the builders, so a batch is held to exactly the
//! same rules as programmatic use.

use crate::{
    credit_transfer::CreditTransferBuilder,
    direct_debit::{DirectDebitBuilder, DirectDebitTransaction, Mandate},
    message::BuilderOptions,
    types::{Account, Bic, Iban, Party, Remittance, SequenceType},
    Error, Result,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Message type of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchKind {
    /// pain.001.001.03
    CreditTransfer,
    /// pain.008.001.02
    DirectDebit,
}

/// Parsed batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Message type
    pub kind: BatchKind,
    /// Group header input
    pub header: BatchHeader,
    /// Payment information groups
    #[serde(default)]
    pub groups: Vec<BatchGroup>,
}

/// Group header input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchHeader {
    /// Generated when absent
    pub message_id: Option<String>,
    /// Initiating party name
    pub initiator: String,
    /// Defaults to the time of rendering
    pub created_at: Option<NaiveDateTime>,
}

/// One group: debtor (credit transfer) or creditor (direct debit) side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchGroup {
    /// Payment information id
    pub id: String,
    /// Execution or collection date
    pub date: NaiveDate,
    /// Party name
    pub name: String,
    /// Party country, required with address lines
    pub country: Option<String>,
    /// Address lines
    #[serde(default)]
    pub address_lines: Vec<String>,
    /// Account IBAN
    pub iban: String,
    /// Agent BIC
    pub bic: String,
    /// Direct debit only
    pub sequence_type: Option<SequenceType>,
    /// Transactions
    #[serde(default)]
    pub transactions: Vec<BatchTransaction>,
}

/// One transaction: creditor (credit transfer) or debtor (direct debit) side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchTransaction {
    /// End-to-end id
    pub end_to_end_id: String,
    /// Amount as a decimal string
    pub amount: Decimal,
    /// Counterparty name
    pub name: String,
    /// Counterparty IBAN
    pub iban: String,
    /// Counterparty agent BIC
    pub bic: String,
    /// Unstructured remittance
    pub remittance: Option<String>,
    /// Structured creditor reference
    pub creditor_reference: Option<String>,
    /// Direct debit only
    pub instruction_id: Option<String>,
    /// Direct debit only
    pub mandate_id: Option<String>,
    /// Direct debit only
    pub mandate_signed: Option<NaiveDate>,
    /// Direct debit only
    pub creditor_scheme_id: Option<String>,
}

impl Batch {
    /// Parse TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("Failed to parse batch: {}", e)))
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Number of transactions over all groups
    pub fn transaction_count(&self) -> usize {
        self.groups.iter().map(|g| g.transactions.len()).sum()
    }

    /// Build and render the message. `now` is used when the header has no
    /// creation time.
    pub fn render(&self, options: &BuilderOptions, now: NaiveDateTime) -> Result<Vec<u8>> {
        self.check_kind_fields()?;
        let created_at = self.header.created_at.unwrap_or(now);
        let message_id = self.header.message_id.as_deref();

        match self.kind {
            BatchKind::CreditTransfer => {
                let mut builder = CreditTransferBuilder::with_options(options.clone());
                builder.set_header(message_id, &self.header.initiator, created_at)?;
                for group in &self.groups {
                    let account =
                        Account::new(Iban::parse(group.iban.as_str(), options.iban_check)?);
                    let agent = Bic::parse(group.bic.as_str())?;
                    let mut handle =
                        builder.open_group_for(&group.id, group.date, group.party()?, account, agent)?;
                    for tx in &group.transactions {
                        handle.credit_transfer(
                            &tx.end_to_end_id,
                            tx.amount,
                            &tx.bic,
                            &tx.name,
                            &tx.iban,
                            tx.remittance()?,
                        )?;
                    }
                }
                builder.render()
            }
            BatchKind::DirectDebit => {
                let mut builder = DirectDebitBuilder::with_options(options.clone());
                builder.set_header(message_id, &self.header.initiator, created_at)?;
                for group in &self.groups {
                    let sequence_type = group.sequence_type.ok_or_else(|| {
                        Error::validation("SeqTp", "sequence_type is required for direct debit groups")
                    })?;
                    let mut handle = builder.open_group(
                        &group.id,
                        group.date,
                        sequence_type,
                        group.party()?,
                        &group.iban,
                        &group.bic,
                    )?;
                    for tx in &group.transactions {
                        handle.add_transaction(tx.direct_debit()?)?;
                    }
                }
                builder.render()
            }
        }
    }

    /// Direct debit fields have no meaning in a credit transfer and are
    /// rejected rather than dropped.
    fn check_kind_fields(&self) -> Result<()> {
        if self.kind != BatchKind::CreditTransfer {
            return Ok(());
        }

        let not_allowed = |field: &'static str, id: &str| {
            Error::validation(
                field,
                format!("{}: not allowed in a credit-transfer batch", id),
            )
        };

        for group in &self.groups {
            if group.sequence_type.is_some() {
                return Err(not_allowed("SeqTp", &group.id));
            }
            for tx in &group.transactions {
                let id = tx.end_to_end_id.as_str();
                if tx.instruction_id.is_some() {
                    return Err(not_allowed("InstrId", id));
                }
                if tx.mandate_id.is_some() {
                    return Err(not_allowed("MndtId", id));
                }
                if tx.mandate_signed.is_some() {
                    return Err(not_allowed("DtOfSgntr", id));
                }
                if tx.creditor_scheme_id.is_some() {
                    return Err(not_allowed("CdtrSchmeId", id));
                }
            }
        }
        Ok(())
    }
}

impl BatchGroup {
    fn party(&self) -> Result<Party> {
        match &self.country {
            Some(country) => {
                Party::with_address(self.name.as_str(), country.as_str(), self.address_lines.clone())
            }
            None if self.address_lines.is_empty() => Party::new(self.name.as_str()),
            None => Err(Error::validation(
                "country",
                "address lines require a country",
            )),
        }
    }
}

impl BatchTransaction {
    fn remittance(&self) -> Result<Remittance> {
        match (&self.remittance, &self.creditor_reference) {
            (Some(text), None) => Ok(Remittance::Unstructured(text.clone())),
            (None, Some(reference)) => Ok(Remittance::Structured(reference.clone())),
            _ => Err(Error::validation(
                "remittance",
                format!(
                    "{}: exactly one of remittance and creditor_reference is required",
                    self.end_to_end_id
                ),
            )),
        }
    }

    fn direct_debit(&self) -> Result<DirectDebitTransaction> {
        let missing = |field: &'static str| {
            Error::validation(
                field,
                format!("{}: required for direct debit transactions", self.end_to_end_id),
            )
        };

        Ok(DirectDebitTransaction {
            instruction_id: self
                .instruction_id
                .clone()
                .ok_or_else(|| missing("InstrId"))?,
            end_to_end_id: self.end_to_end_id.clone(),
            amount: self.amount,
            mandate: Mandate {
                mandate_id: self.mandate_id.clone().ok_or_else(|| missing("MndtId"))?,
                date_of_signature: self.mandate_signed.ok_or_else(|| missing("DtOfSgntr"))?,
                creditor_scheme_id: self
                    .creditor_scheme_id
                    .clone()
                    .ok_or_else(|| missing("CdtrSchmeId"))?,
            },
            debtor: Party::new(self.name.as_str())?,
            debtor_iban: self.iban.clone(),
            debtor_bic: self.bic.clone(),
            remittance: self.remittance()?,
        })
    }
}
