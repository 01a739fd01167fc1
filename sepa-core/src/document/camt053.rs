// camt.053.001.02 - Bank to Customer Statement
// Only the subset the statement reader projects is mapped; unknown
// elements are skipped by the deserializer.

use super::common::PartyIdentification;
use serde::{Deserialize, Serialize};

/// Namespace of the bank to customer statement
pub const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:camt.053.001.02";

/// camt.053 Document root
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename = "Document")]
pub struct Camt053Document {
    #[serde(rename = "BkToCstmrStmt")]
    pub bank_to_customer_statement: BankToCustomerStatementV02,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankToCustomerStatementV02 {
    pub grp_hdr: GroupHeader42,
    #[serde(default)]
    pub stmt: Vec<AccountStatement2>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupHeader42 {
    pub msg_id: String,
    pub cre_dt_tm: String,
    pub msg_rcpt: Option<PartyIdentification>,
    pub msg_pgntn: Option<Pagination>,
    pub addtl_inf: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pagination {
    pub pg_nb: String,
    pub last_pg_ind: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountStatement2 {
    pub id: String,
    pub elctrnc_seq_nb: Option<String>,
    pub lgl_seq_nb: Option<String>,
    pub cre_dt_tm: String,
    pub fr_to_dt: Option<DateTimePeriod>,
    pub cpy_dplct_ind: Option<String>,
    pub acct: CashAccount20,
    #[serde(default)]
    pub intrst: Vec<AccountInterest2>,
    #[serde(default)]
    pub bal: Vec<CashBalance3>,
    #[serde(default)]
    pub ntry: Vec<ReportEntry2>,
    pub addtl_stmt_inf: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateTimePeriod {
    pub fr_dt_tm: String,
    pub to_dt_tm: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CashAccount20 {
    pub id: AccountId,
    pub ccy: Option<String>,
    pub nm: Option<String>,
    pub ownr: Option<PartyIdentification>,
    pub svcr: Option<Servicer>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountId {
    #[serde(rename = "IBAN")]
    pub iban: Option<String>,

    #[serde(rename = "Othr")]
    pub other: Option<OtherAccountId>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OtherAccountId {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Servicer {
    pub fin_instn_id: FinancialInstitutionId,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinancialInstitutionId {
    #[serde(rename = "BIC")]
    pub bic: Option<String>,
    pub nm: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountInterest2 {
    pub tp: Option<CodeOrProprietary>,
    #[serde(default)]
    pub rate: Vec<Rate>,
    pub rsn: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Rate {
    pub tp: RateType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateType {
    pub pctg: Option<String>,
    pub othr: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CashBalance3 {
    pub tp: BalanceType,
    pub amt: Amount,
    pub cdt_dbt_ind: String, // CRDT or DBIT
    pub dt: DateAndDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BalanceType {
    #[serde(rename = "CdOrPrtry")]
    pub code_or_proprietary: CodeOrProprietary,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeOrProprietary {
    pub cd: Option<String>, // OPBD, CLBD, ...
    pub prtry: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Amount {
    #[serde(rename = "@Ccy")]
    pub currency: String,

    #[serde(rename = "$text")]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateAndDateTime {
    pub dt: Option<String>,
    pub dt_tm: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportEntry2 {
    pub ntry_ref: Option<String>,
    pub amt: Amount,
    pub cdt_dbt_ind: String,
    pub sts: String, // BOOK, PDNG, INFO
    #[serde(rename = "BookgDt")]
    pub booking_dt: Option<DateAndDateTime>,
    pub val_dt: Option<DateAndDateTime>,
    pub acct_svcr_ref: Option<String>,
    #[serde(default)]
    pub ntry_dtls: Vec<EntryDetails>,
    pub addtl_ntry_inf: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntryDetails {
    #[serde(default)]
    pub tx_dtls: Vec<TransactionDetails>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionDetails {
    pub refs: Option<References>,
    pub rmt_inf: Option<RemittanceInformation>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct References {
    pub end_to_end_id: Option<String>,
    pub tx_id: Option<String>,
    pub instr_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemittanceInformation {
    #[serde(default)]
    pub ustrd: Vec<String>,
}
