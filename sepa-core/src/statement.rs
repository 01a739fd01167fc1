//! Bank To Customer Statement reader (camt.053.001.02)
//!
//! Parses the inbound statement and projects it into read-only, typed
//! values. Amounts become [`Decimal`], timestamps keep their offset
//! (timestamps without one are taken as UTC).

use crate::{
    document::camt053::{self, Camt053Document},
    Error, Result,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Statement message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankToCustomerStatement {
    message_id: String,
    created_at: DateTime<FixedOffset>,
    recipient: Option<String>,
    pagination: Option<Pagination>,
    additional_information: Option<String>,
    statements: Vec<AccountStatement>,
}

/// Page of a multi-page message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Page number
    pub page_number: String,
    /// Last page indicator
    pub last_page: bool,
}

/// Copy/duplicate indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CopyDuplicate {
    /// Copy sent to another party, duplicate of an earlier message
    #[serde(rename = "CODU")]
    CopyDuplicate,
    /// Copy sent to a party other than the account owner
    #[serde(rename = "COPY")]
    Copy,
    /// Duplicate of an earlier message
    #[serde(rename = "DUPL")]
    Duplicate,
}

impl FromStr for CopyDuplicate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CODU" => Ok(CopyDuplicate::CopyDuplicate),
            "COPY" => Ok(CopyDuplicate::Copy),
            "DUPL" => Ok(CopyDuplicate::Duplicate),
            other => Err(Error::MalformedStatement(format!(
                "unknown copy/duplicate indicator '{}'",
                other
            ))),
        }
    }
}

/// Credit or debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreditDebit {
    /// CRDT
    #[serde(rename = "CRDT")]
    Credit,
    /// DBIT
    #[serde(rename = "DBIT")]
    Debit,
}

impl FromStr for CreditDebit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CRDT" => Ok(CreditDebit::Credit),
            "DBIT" => Ok(CreditDebit::Debit),
            other => Err(Error::MalformedStatement(format!(
                "unknown credit/debit indicator '{}'",
                other
            ))),
        }
    }
}

/// Reported account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementAccount {
    /// IBAN, or the proprietary id when the account has none
    pub id: String,
    /// True when `id` is an IBAN
    pub is_iban: bool,
    /// Account currency
    pub currency: Option<String>,
    /// Account name
    pub name: Option<String>,
    /// Owner name
    pub owner: Option<String>,
    /// BIC of the servicing institution
    pub servicer_bic: Option<String>,
}

/// Balance line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    /// Type code (OPBD, CLBD, ...) or proprietary type
    pub code: String,
    /// Amount
    pub amount: Decimal,
    /// Currency
    pub currency: String,
    /// Credit or debit
    pub credit_debit: CreditDebit,
    /// Balance date
    pub date: NaiveDate,
}

/// Interest line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interest {
    /// Interest type code or proprietary type
    pub interest_type: Option<String>,
    /// Rate percentages
    pub rates: Vec<Decimal>,
    /// Reason
    pub reason: Option<String>,
}

/// Booked or pending entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Amount
    pub amount: Decimal,
    /// Currency
    pub currency: String,
    /// Credit or debit
    pub credit_debit: CreditDebit,
    /// Status (BOOK, PDNG, INFO)
    pub status: String,
    /// Booking date
    pub booking_date: Option<NaiveDate>,
    /// Value date
    pub value_date: Option<NaiveDate>,
    /// Account servicer reference
    pub servicer_reference: Option<String>,
    /// End-to-end ids of the underlying transactions
    pub end_to_end_ids: Vec<String>,
    /// Unstructured remittance lines of the underlying transactions
    pub remittance: Vec<String>,
    /// Additional entry information
    pub additional_information: Option<String>,
}

/// One account statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountStatement {
    id: String,
    electronic_sequence_number: Option<Decimal>,
    legal_sequence_number: Option<Decimal>,
    created_at: DateTime<FixedOffset>,
    from: Option<DateTime<FixedOffset>>,
    to: Option<DateTime<FixedOffset>>,
    copy_duplicate: Option<CopyDuplicate>,
    account: StatementAccount,
    balances: Vec<Balance>,
    interest: Vec<Interest>,
    entries: Vec<Entry>,
    additional_information: Option<String>,
}

impl BankToCustomerStatement {
    /// Parse a UTF-8 camt.053.001.02 document
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let xml = std::str::from_utf8(bytes)
            .map_err(|e| Error::MalformedStatement(format!("statement is not UTF-8: {}", e)))?;
        let document: Camt053Document = quick_xml::de::from_str(xml)
            .map_err(|e| Error::MalformedStatement(format!("camt.053 parsing failed: {}", e)))?;

        let statement = Self::project(document.bank_to_customer_statement)?;
        tracing::debug!(
            msg_id = %statement.message_id,
            statements = statement.statements.len(),
            "camt.053 statement read"
        );
        Ok(statement)
    }

    /// Read from a file
    pub fn read_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::read(&bytes)
    }

    fn project(raw: camt053::BankToCustomerStatementV02) -> Result<Self> {
        let header = raw.grp_hdr;
        Ok(Self {
            created_at: parse_date_time(&header.cre_dt_tm)?,
            message_id: header.msg_id,
            recipient: header.msg_rcpt.and_then(|party| party.name),
            pagination: header.msg_pgntn.map(|p| Pagination {
                page_number: p.pg_nb,
                last_page: p.last_pg_ind,
            }),
            additional_information: header.addtl_inf,
            statements: raw
                .stmt
                .into_iter()
                .map(AccountStatement::project)
                .collect::<Result<Vec<_>>>()?,
        })
    }

    /// Message id, assigned by the account servicer
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// Name of the party authorised to receive the message
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    /// Pagination
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Additional message information
    pub fn additional_information(&self) -> Option<&str> {
        self.additional_information.as_deref()
    }

    /// Account statements
    pub fn statements(&self) -> &[AccountStatement] {
        &self.statements
    }
}

impl AccountStatement {
    fn project(raw: camt053::AccountStatement2) -> Result<Self> {
        let (from, to) = match &raw.fr_to_dt {
            Some(period) => (
                Some(parse_date_time(&period.fr_dt_tm)?),
                Some(parse_date_time(&period.to_dt_tm)?),
            ),
            None => (None, None),
        };

        let account = {
            let acct = raw.acct;
            let (id, is_iban) = match (acct.id.iban, acct.id.other) {
                (Some(iban), _) => (iban, true),
                (None, Some(other)) => (other.id, false),
                (None, None) => {
                    return Err(Error::MalformedStatement(
                        "account has neither IBAN nor other id".to_string(),
                    ))
                }
            };
            StatementAccount {
                id,
                is_iban,
                currency: acct.ccy,
                name: acct.nm,
                owner: acct.ownr.and_then(|party| party.name),
                servicer_bic: acct.svcr.and_then(|s| s.fin_instn_id.bic),
            }
        };

        Ok(Self {
            id: raw.id,
            electronic_sequence_number: raw
                .elctrnc_seq_nb
                .as_deref()
                .map(parse_decimal)
                .transpose()?,
            legal_sequence_number: raw.lgl_seq_nb.as_deref().map(parse_decimal).transpose()?,
            created_at: parse_date_time(&raw.cre_dt_tm)?,
            from,
            to,
            copy_duplicate: raw
                .cpy_dplct_ind
                .as_deref()
                .map(CopyDuplicate::from_str)
                .transpose()?,
            account,
            balances: raw
                .bal
                .iter()
                .map(project_balance)
                .collect::<Result<Vec<_>>>()?,
            interest: raw
                .intrst
                .iter()
                .map(project_interest)
                .collect::<Result<Vec<_>>>()?,
            entries: raw
                .ntry
                .iter()
                .map(project_entry)
                .collect::<Result<Vec<_>>>()?,
            additional_information: raw.addtl_stmt_inf,
        })
    }

    /// Statement id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Electronic sequence number
    pub fn electronic_sequence_number(&self) -> Option<Decimal> {
        self.electronic_sequence_number
    }

    /// Legal sequence number
    pub fn legal_sequence_number(&self) -> Option<Decimal> {
        self.legal_sequence_number
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// Start of the reported period
    pub fn from(&self) -> Option<DateTime<FixedOffset>> {
        self.from
    }

    /// End of the reported period
    pub fn to(&self) -> Option<DateTime<FixedOffset>> {
        self.to
    }

    /// Copy/duplicate indicator
    pub fn copy_duplicate(&self) -> Option<CopyDuplicate> {
        self.copy_duplicate
    }

    /// Reported account
    pub fn account(&self) -> &StatementAccount {
        &self.account
    }

    /// Balances
    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    /// Interest lines
    pub fn interest(&self) -> &[Interest] {
        &self.interest
    }

    /// Entries
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Additional statement information
    pub fn additional_information(&self) -> Option<&str> {
        self.additional_information.as_deref()
    }
}

fn project_balance(raw: &camt053::CashBalance3) -> Result<Balance> {
    let code = raw
        .tp
        .code_or_proprietary
        .cd
        .clone()
        .or_else(|| raw.tp.code_or_proprietary.prtry.clone())
        .ok_or_else(|| Error::MalformedStatement("balance without type".to_string()))?;

    Ok(Balance {
        code,
        amount: parse_decimal(&raw.amt.value)?,
        currency: raw.amt.currency.clone(),
        credit_debit: raw.cdt_dbt_ind.parse()?,
        date: parse_date_choice(&raw.dt)?
            .ok_or_else(|| Error::MalformedStatement("balance without date".to_string()))?,
    })
}

fn project_interest(raw: &camt053::AccountInterest2) -> Result<Interest> {
    Ok(Interest {
        interest_type: raw
            .tp
            .as_ref()
            .and_then(|tp| tp.cd.clone().or_else(|| tp.prtry.clone())),
        rates: raw
            .rate
            .iter()
            .filter_map(|rate| rate.tp.pctg.as_deref())
            .map(parse_decimal)
            .collect::<Result<Vec<_>>>()?,
        reason: raw.rsn.clone(),
    })
}

fn project_entry(raw: &camt053::ReportEntry2) -> Result<Entry> {
    let details = raw.ntry_dtls.iter().flat_map(|d| d.tx_dtls.iter());

    Ok(Entry {
        amount: parse_decimal(&raw.amt.value)?,
        currency: raw.amt.currency.clone(),
        credit_debit: raw.cdt_dbt_ind.parse()?,
        status: raw.sts.clone(),
        booking_date: raw.booking_dt.as_ref().map(parse_date_choice).transpose()?.flatten(),
        value_date: raw.val_dt.as_ref().map(parse_date_choice).transpose()?.flatten(),
        servicer_reference: raw.acct_svcr_ref.clone(),
        end_to_end_ids: details
            .clone()
            .filter_map(|tx| tx.refs.as_ref().and_then(|r| r.end_to_end_id.clone()))
            .collect(),
        remittance: details
            .filter_map(|tx| tx.rmt_inf.as_ref())
            .flat_map(|r| r.ustrd.iter().cloned())
            .collect(),
        additional_information: raw.addtl_ntry_inf.clone(),
    })
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|e| Error::MalformedStatement(format!("invalid amount '{}': {}", value, e)))
}

/// ISODateTime with or without offset; naive values are taken as UTC
fn parse_date_time(value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive).into())
        .map_err(|e| Error::MalformedStatement(format!("invalid timestamp '{}': {}", value, e)))
}

/// `Dt` or the date part of `DtTm`
fn parse_date_choice(raw: &camt053::DateAndDateTime) -> Result<Option<NaiveDate>> {
    if let Some(dt) = &raw.dt {
        return NaiveDate::parse_from_str(dt.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|e| Error::MalformedStatement(format!("invalid date '{}': {}", dt, e)));
    }
    raw.dt_tm
        .as_deref()
        .map(|dt_tm| parse_date_time(dt_tm).map(|dt| dt.date_naive()))
        .transpose()
}
