//! pain.008.001.02 Customer Direct Debit Initiation

use super::common::{
    CashAccount, CurrencyAndAmount, FinancialInstitution, GroupHeader, PartyIdentification,
    PaymentIdentification, RemittanceInformation,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Namespace of the direct debit initiation
pub const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.001.02";

/// Root element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "Document")]
pub struct Pain008Document {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,

    #[serde(rename = "CstmrDrctDbtInitn")]
    pub initiation: CustomerDirectDebitInitiation,
}

/// CustomerDirectDebitInitiationV02
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDirectDebitInitiation {
    #[serde(rename = "GrpHdr")]
    pub group_header: GroupHeader,

    #[serde(rename = "PmtInf", default)]
    pub payment_information: Vec<PaymentInstructionInformation>,
}

/// PaymentInstructionInformation4
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

    #[serde(rename = "PmtTpInf")]
    pub payment_type: PaymentTypeInformation,

    #[serde(rename = "ReqdColltnDt")]
    pub requested_collection_date: NaiveDate,

    #[serde(rename = "Cdtr")]
    pub creditor: PartyIdentification,

    #[serde(rename = "CdtrAcct")]
    pub creditor_account: CashAccount,

    #[serde(rename = "CdtrAgt")]
    pub creditor_agent: FinancialInstitution,

    #[serde(rename = "ChrgBr")]
    pub charge_bearer: String,

    #[serde(rename = "DrctDbtTxInf", default)]
    pub transactions: Vec<DirectDebitTransactionInformation>,
}

/// PaymentTypeInformation20
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTypeInformation {
    #[serde(rename = "SvcLvl")]
    pub service_level: Code,

    #[serde(rename = "LclInstrm")]
    pub local_instrument: Code,

    #[serde(rename = "SeqTp")]
    pub sequence_type: String,
}

/// Choice element carrying a single `Cd`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    #[serde(rename = "Cd")]
    pub code: String,
}

impl Code {
    /// Wrap a code value
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }
}

/// DirectDebitTransactionInformation9
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectDebitTransactionInformation {
    #[serde(rename = "PmtId")]
    pub payment_id: PaymentIdentification,

    #[serde(rename = "InstdAmt")]
    pub instructed_amount: CurrencyAndAmount,

    #[serde(rename = "DrctDbtTx")]
    pub direct_debit_transaction: DirectDebitTransaction,

    #[serde(rename = "DbtrAgt")]
    pub debtor_agent: FinancialInstitution,

    #[serde(rename = "Dbtr")]
    pub debtor: PartyIdentification,

    #[serde(rename = "DbtrAcct")]
    pub debtor_account: CashAccount,

    #[serde(rename = "Purp", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Code>,

    #[serde(rename = "RmtInf", skip_serializing_if = "Option::is_none")]
    pub remittance_information: Option<RemittanceInformation>,
}

/// DirectDebitTransaction6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectDebitTransaction {
    #[serde(rename = "MndtRltdInf")]
    pub mandate_related_information: MandateRelatedInformation,

    #[serde(rename = "CdtrSchmeId")]
    pub creditor_scheme_id: PartyIdentification,
}

/// MandateRelatedInformation6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandateRelatedInformation {
    #[serde(rename = "MndtId")]
    pub mandate_id: String,

    #[serde(rename = "DtOfSgntr")]
    pub date_of_signature: NaiveDate,

    #[serde(rename = "AmdmntInd")]
    pub amendment_indicator: bool,
}

/// Parses a pain.008.001.02 document.
pub fn parse_pain008(xml: &str) -> Result<Pain008Document> {
    quick_xml::de::from_str(xml)
        .map_err(|e| Error::Serialization(format!("pain.008 parsing failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collection_group() {
        let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:pain.008.001.02">
  <CstmrDrctDbtInitn>
    <GrpHdr>
      <MsgId>MSG-1</MsgId>
      <CreDtTm>2013-01-02T09:30:00</CreDtTm>
      <NbOfTxs>1</NbOfTxs>
      <CtrlSum>1600.00</CtrlSum>
      <InitgPty><Nm>Incassant</Nm></InitgPty>
    </GrpHdr>
    <PmtInf>
      <PmtInfId>DD-1</PmtInfId>
      <PmtMtd>DD</PmtMtd>
      <NbOfTxs>1</NbOfTxs>
      <CtrlSum>1600.00</CtrlSum>
      <PmtTpInf>
        <SvcLvl><Cd>SEPA</Cd></SvcLvl>
        <LclInstrm><Cd>CORE</Cd></LclInstrm>
        <SeqTp>FRST</SeqTp>
      </PmtTpInf>
      <ReqdColltnDt>2013-01-10</ReqdColltnDt>
      <Cdtr>
        <Nm>Incassant</Nm>
        <PstlAdr><Ctry>NL</Ctry><AdrLine>Dorpstraat 1</AdrLine></PstlAdr>
      </Cdtr>
      <CdtrAcct><Id><IBAN>NL44RABO0123456789</IBAN></Id></CdtrAcct>
      <CdtrAgt><FinInstnId><BIC>RABONL2U</BIC></FinInstnId></CdtrAgt>
      <ChrgBr>SLEV</ChrgBr>
      <DrctDbtTxInf>
        <PmtId><InstrId>I-1</InstrId><EndToEndId>E-1</EndToEndId></PmtId>
        <InstdAmt Ccy="EUR">1600.00</InstdAmt>
        <DrctDbtTx>
          <MndtRltdInf>
            <MndtId>M-1</MndtId>
            <DtOfSgntr>2012-12-01</DtOfSgntr>
            <AmdmntInd>false</AmdmntInd>
          </MndtRltdInf>
          <CdtrSchmeId>
            <Id><PrvtId><Othr><Id>NL89ZZZ011234567890</Id><SchmeNm><Prtry>SEPA</Prtry></SchmeNm></Othr></PrvtId></Id>
          </CdtrSchmeId>
        </DrctDbtTx>
        <DbtrAgt><FinInstnId><BIC>ABNANL2A</BIC></FinInstnId></DbtrAgt>
        <Dbtr><Nm>Debiteur</Nm></Dbtr>
        <DbtrAcct><Id><IBAN>NL91ABNA0417164300</IBAN></Id></DbtrAcct>
        <Purp><Cd>OTHR</Cd></Purp>
        <RmtInf><Ustrd>Contributie</Ustrd></RmtInf>
      </DrctDbtTxInf>
    </PmtInf>
  </CstmrDrctDbtInitn>
</Document>"#;

        let doc = parse_pain008(xml).unwrap();
        let group = &doc.initiation.payment_information[0];
        assert_eq!(group.payment_type.sequence_type, "FRST");
        assert_eq!(group.payment_type.local_instrument.code, "CORE");
        assert_eq!(
            group.creditor.postal_address.as_ref().unwrap().address_line,
            vec!["Dorpstraat 1"]
        );

        let tx = &group.transactions[0];
        let mandate = &tx.direct_debit_transaction.mandate_related_information;
        assert_eq!(mandate.mandate_id, "M-1");
        assert!(!mandate.amendment_indicator);
        assert_eq!(tx.purpose.as_ref().unwrap().code, "OTHR");
        assert_eq!(tx.payment_id.instruction_id.as_deref(), Some("I-1"));
    }
}
