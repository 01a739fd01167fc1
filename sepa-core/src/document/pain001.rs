//! pain.001.001.03 Customer Credit Transfer Initiation
//!
//! ```xml
//! <Document xmlns="urn:iso:std:iso:20022:tech:xsd:pain.001.001.03">
//!   <CstmrCdtTrfInitn>
//!     <GrpHdr>...</GrpHdr>
//!     <PmtInf>
//!       <PmtInfId>...</PmtInfId>
//!       <PmtMtd>TRF</PmtMtd>
//!       ...
//!       <CdtTrfTxInf>...</CdtTrfTxInf>
//!     </PmtInf>
//!   </CstmrCdtTrfInitn>
//! </Document>
//! ```

use super::common::{
    CashAccount, CurrencyAndAmount, FinancialInstitution, GroupHeader, PartyIdentification,
    PaymentIdentification, RemittanceInformation,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Namespace of the credit transfer initiation
pub const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pain.001.001.03";

/// Root element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Document")]
pub struct Pain001Document {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,

    #[serde(rename = "CstmrCdtTrfInitn")]
    pub initiation: CustomerCreditTransferInitiation,
}

/// CustomerCreditTransferInitiationV03
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreditTransferInitiation {
    #[serde(rename = "GrpHdr")]
    pub group_header: GroupHeader,

    #[serde(rename = "PmtInf", default)]
    pub payment_information: Vec<PaymentInstructionInformation>,
}

/// PaymentInstructionInformation3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInstructionInformation {
    #[serde(rename = "PmtInfId")]
    pub payment_information_id: String,

    #[serde(rename = "PmtMtd")]
    pub payment_method: String,

    #[serde(rename = "NbOfTxs")]
    pub number_of_transactions: u64,

    #[serde(rename = "CtrlSum")]
    pub control_sum: Decimal,

    #[serde(rename = "ReqdExctnDt")]
    pub requested_execution_date: NaiveDate,

    #[serde(rename = "Dbtr")]
    pub debtor: PartyIdentification,

    #[serde(rename = "DbtrAcct")]
    pub debtor_account: CashAccount,

    #[serde(rename = "DbtrAgt")]
    pub debtor_agent: FinancialInstitution,

    #[serde(rename = "CdtTrfTxInf", default)]
    pub transactions: Vec<CreditTransferTransactionInformation>,
}

/// CreditTransferTransactionInformation10
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTransferTransactionInformation {
    #[serde(rename = "PmtId")]
    pub payment_id: PaymentIdentification,

    #[serde(rename = "Amt")]
    pub amount: AmountType,

    #[serde(rename = "ChrgBr")]
    pub charge_bearer: String,

    #[serde(rename = "CdtrAgt")]
    pub creditor_agent: FinancialInstitution,

    #[serde(rename = "Cdtr")]
    pub creditor: PartyIdentification,

    #[serde(rename = "CdtrAcct")]
    pub creditor_account: CashAccount,

    #[serde(rename = "RmtInf", skip_serializing_if = "Option::is_none")]
    pub remittance_information: Option<RemittanceInformation>,
}

/// AmountType3Choice (instructed amount branch)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountType {
    #[serde(rename = "InstdAmt")]
    pub instructed_amount: CurrencyAndAmount,
}

/// Parses a pain.001.001.03 document, e.g. to inspect rendered output.
pub fn parse_pain001(xml: &str) -> Result<Pain001Document> {
    quick_xml::de::from_str(xml)
        .map_err(|e| Error::Serialization(format!("pain.001 parsing failed: {}", e)))
}
