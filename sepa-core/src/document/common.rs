//! Building blocks shared by the pain and camt trees

use crate::types::{Account, Bic, Party, Remittance, CURRENCY};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GroupHeader32 (pain.001) / GroupHeader39 (pain.008)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupHeader {
    #[serde(rename = "MsgId")]
    pub message_id: String,

    #[serde(rename = "CreDtTm")]
    pub creation_date_time: String,

    #[serde(rename = "NbOfTxs")]
    pub number_of_transactions: u64,

    #[serde(rename = "CtrlSum")]
    pub control_sum: Decimal,

    #[serde(rename = "InitgPty")]
    pub initiating_party: PartyIdentification,
}

/// PartyIdentification32
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyIdentification {
    #[serde(rename = "Nm", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "PstlAdr", skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<PostalAddress>,

    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    pub identification: Option<PartyChoice>,
}

impl From<&Party> for PartyIdentification {
    fn from(party: &Party) -> Self {
        let postal_address = party.country().map(|country| PostalAddress {
            country: Some(country.to_string()),
            address_line: party.address_lines().to_vec(),
        });

        Self {
            name: Some(party.name().to_string()),
            postal_address,
            identification: None,
        }
    }
}

impl PartyIdentification {
    /// Party known only by a scheme identifier, e.g. the SEPA creditor id
    pub fn scheme_identified(id: &str, proprietary_scheme: &str) -> Self {
        Self {
            name: None,
            postal_address: None,
            identification: Some(PartyChoice {
                private_identification: Some(PersonIdentification {
                    other: vec![GenericPersonIdentification {
                        id: id.to_string(),
                        scheme_name: Some(SchemeName {
                            code: None,
                            proprietary: Some(proprietary_scheme.to_string()),
                        }),
                    }],
                }),
            }),
        }
    }
}

/// PostalAddress6
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(rename = "Ctry", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(rename = "AdrLine", default, skip_serializing_if = "Vec::is_empty")]
    pub address_line: Vec<String>,
}

/// Party6Choice (only the private identification branch is produced)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyChoice {
    #[serde(rename = "PrvtId", skip_serializing_if = "Option::is_none")]
    pub private_identification: Option<PersonIdentification>,
}

/// PersonIdentification5
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonIdentification {
    #[serde(rename = "Othr", default)]
    pub other: Vec<GenericPersonIdentification>,
}

/// GenericPersonIdentification1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericPersonIdentification {
    #[serde(rename = "Id")]
    pub id: String,

    #[serde(rename = "SchmeNm", skip_serializing_if = "Option::is_none")]
    pub scheme_name: Option<SchemeName>,
}

/// Code or proprietary scheme name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeName {
    #[serde(rename = "Cd", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "Prtry", skip_serializing_if = "Option::is_none")]
    pub proprietary: Option<String>,
}

/// CashAccount16
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashAccount {
    #[serde(rename = "Id")]
    pub identification: AccountIdentification,

    #[serde(rename = "Ccy", skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<&Account> for CashAccount {
    fn from(account: &Account) -> Self {
        Self {
            identification: AccountIdentification {
                iban: Some(account.iban().as_str().to_string()),
                other: None,
            },
            currency: account.currency().map(str::to_string),
        }
    }
}

/// AccountIdentification4Choice; SEPA only allows the IBAN branch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountIdentification {
    #[serde(rename = "IBAN", skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,

    #[serde(rename = "Othr", skip_serializing_if = "Option::is_none")]
    pub other: Option<GenericAccountIdentification>,
}

/// GenericAccountIdentification1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericAccountIdentification {
    #[serde(rename = "Id")]
    pub id: String,
}

/// BranchAndFinancialInstitutionIdentification4
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitution {
    #[serde(rename = "FinInstnId")]
    pub financial_institution_id: FinancialInstitutionIdentification,
}

impl From<&Bic> for FinancialInstitution {
    fn from(bic: &Bic) -> Self {
        Self {
            financial_institution_id: FinancialInstitutionIdentification {
                bic: Some(bic.as_str().to_string()),
                name: None,
            },
        }
    }
}

/// FinancialInstitutionIdentification7
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInstitutionIdentification {
    #[serde(rename = "BIC", skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,

    #[serde(rename = "Nm", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// ActiveOrHistoricCurrencyAndAmount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAndAmount {
    #[serde(rename = "@Ccy")]
    pub currency: String,

    #[serde(rename = "$text")]
    pub value: Decimal,
}

impl CurrencyAndAmount {
    /// Amount in the fixed message currency
    pub fn eur(value: Decimal) -> Self {
        Self {
            currency: CURRENCY.to_string(),
            value,
        }
    }
}

/// PaymentIdentification1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIdentification {
    #[serde(rename = "InstrId", skip_serializing_if = "Option::is_none")]
    pub instruction_id: Option<String>,

    #[serde(rename = "EndToEndId")]
    pub end_to_end_id: String,
}

/// RemittanceInformation5
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemittanceInformation {
    #[serde(rename = "Ustrd", skip_serializing_if = "Option::is_none")]
    pub unstructured: Option<String>,

    #[serde(rename = "Strd", skip_serializing_if = "Option::is_none")]
    pub structured: Option<StructuredRemittanceInformation>,
}

impl From<&Remittance> for RemittanceInformation {
    fn from(remittance: &Remittance) -> Self {
        match remittance {
            Remittance::Unstructured(text) => Self {
                unstructured: Some(text.clone()),
                structured: None,
            },
            Remittance::Structured(reference) => Self {
                unstructured: None,
                structured: Some(StructuredRemittanceInformation {
                    creditor_reference: CreditorReferenceInformation {
                        reference_type: CreditorReferenceType {
                            code_or_proprietary: CodeOrProprietary {
                                code: Some("SCOR".to_string()),
                            },
                        },
                        reference: reference.clone(),
                    },
                }),
            },
        }
    }
}

/// StructuredRemittanceInformation7
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRemittanceInformation {
    #[serde(rename = "CdtrRefInf")]
    pub creditor_reference: CreditorReferenceInformation,
}

/// CreditorReferenceInformation2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditorReferenceInformation {
    #[serde(rename = "Tp")]
    pub reference_type: CreditorReferenceType,

    #[serde(rename = "Ref")]
    pub reference: String,
}

/// CreditorReferenceType2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditorReferenceType {
    #[serde(rename = "CdOrPrtry")]
    pub code_or_proprietary: CodeOrProprietary,
}

/// Single code choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeOrProprietary {
    #[serde(rename = "Cd", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
