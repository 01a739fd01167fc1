//! SEPA Direct Debit Initiation (pain.008.001.02), CORE scheme
//!
//! The creditor side lives on the payment information group (one creditor
//! account, one collection date, one sequence type); every transaction names a
//! debtor and the mandate it is collected under.

use crate::{
    aggregate::{apply_to_group_and_header, ControlTotals},
    config::Config,
    credit_transfer::CHARGE_BEARER,
    document::{common, pain008},
    message::{install_header, push_last, require_header, BuilderOptions, GroupHeader},
    render,
    types::{
        check_amount, check_text, Account, Bic, Iban, IbanCheck, Party, PaymentMethod,
        Remittance, SequenceType, MAX_ID_LEN,
    },
    Error, Result,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// Service level code
pub const SERVICE_LEVEL: &str = "SEPA";

/// Local instrument for consumer collections
pub const LOCAL_INSTRUMENT: &str = "CORE";

/// Purpose code put on every collection
pub const PURPOSE: &str = "OTHR";

/// Scheme name of the creditor identifier
pub const CREDITOR_SCHEME: &str = "SEPA";

/// Mandate a collection is made under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mandate {
    /// Mandate reference, 1-35 characters
    pub mandate_id: String,
    /// Date the debtor signed the mandate
    pub date_of_signature: NaiveDate,
    /// Creditor identifier (e.g. `NL89ZZZ011234567890`), 1-35 characters
    pub creditor_scheme_id: String,
}

impl Mandate {
    fn validate(&self) -> Result<()> {
        check_text("MndtId", &self.mandate_id, MAX_ID_LEN)?;
        check_text("CdtrSchmeId", &self.creditor_scheme_id, MAX_ID_LEN)
    }
}

/// Input for one collection
#[derive(Debug, Clone, PartialEq)]
pub struct DirectDebitTransaction {
    /// Instruction id, 1-35 characters
    pub instruction_id: String,
    /// End-to-end id, 1-35 characters
    pub end_to_end_id: String,
    /// Amount in EUR
    pub amount: Decimal,
    /// Mandate
    pub mandate: Mandate,
    /// Debtor
    pub debtor: Party,
    /// Debtor IBAN, validated under the builder's policy
    pub debtor_iban: String,
    /// BIC of the debtor agent
    pub debtor_bic: String,
    /// Remittance information
    pub remittance: Remittance,
}

/// Appended collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectDebit {
    instruction_id: String,
    end_to_end_id: String,
    amount: Decimal,
    mandate: Mandate,
    debtor: Party,
    debtor_account: Account,
    debtor_agent: Bic,
    remittance: Remittance,
}

impl DirectDebit {
    /// Instruction id
    pub fn instruction_id(&self) -> &str {
        &self.instruction_id
    }

    /// End-to-end id
    pub fn end_to_end_id(&self) -> &str {
        &self.end_to_end_id
    }

    /// Amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Mandate
    pub fn mandate(&self) -> &Mandate {
        &self.mandate
    }

    /// Debtor
    pub fn debtor(&self) -> &Party {
        &self.debtor
    }

    /// Debtor account
    pub fn debtor_account(&self) -> &Account {
        &self.debtor_account
    }

    /// Debtor agent
    pub fn debtor_agent(&self) -> &Bic {
        &self.debtor_agent
    }

    /// Remittance information
    pub fn remittance(&self) -> &Remittance {
        &self.remittance
    }

    fn to_document(&self) -> pain008::DirectDebitTransactionInformation {
        pain008::DirectDebitTransactionInformation {
            payment_id: common::PaymentIdentification {
                instruction_id: Some(self.instruction_id.clone()),
                end_to_end_id: self.end_to_end_id.clone(),
            },
            instructed_amount: common::CurrencyAndAmount::eur(self.amount),
            direct_debit_transaction: pain008::DirectDebitTransaction {
                mandate_related_information: pain008::MandateRelatedInformation {
                    mandate_id: self.mandate.mandate_id.clone(),
                    date_of_signature: self.mandate.date_of_signature,
                    amendment_indicator: false,
                },
                creditor_scheme_id: common::PartyIdentification::scheme_identified(
                    &self.mandate.creditor_scheme_id,
                    CREDITOR_SCHEME,
                ),
            },
            debtor_agent: common::FinancialInstitution::from(&self.debtor_agent),
            debtor: common::PartyIdentification::from(&self.debtor),
            debtor_account: common::CashAccount::from(&self.debtor_account),
            purpose: Some(pain008::Code::new(PURPOSE)),
            remittance_information: Some(common::RemittanceInformation::from(&self.remittance)),
        }
    }
}

/// Payment information group of collections into one creditor account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionGroup {
    group_id: String,
    collection_date: NaiveDate,
    sequence_type: SequenceType,
    creditor: Party,
    creditor_account: Account,
    creditor_agent: Bic,
    transactions: Vec<DirectDebit>,
    totals: ControlTotals,
}

impl CollectionGroup {
    /// Payment information id
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Always [`PaymentMethod::DirectDebit`]
    pub fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::DirectDebit
    }

    /// Requested collection date
    pub fn collection_date(&self) -> NaiveDate {
        self.collection_date
    }

    /// Sequence type
    pub fn sequence_type(&self) -> SequenceType {
        self.sequence_type
    }

    /// Creditor
    pub fn creditor(&self) -> &Party {
        &self.creditor
    }

    /// Creditor account
    pub fn creditor_account(&self) -> &Account {
        &self.creditor_account
    }

    /// Creditor agent
    pub fn creditor_agent(&self) -> &Bic {
        &self.creditor_agent
    }

    /// Collections in append order
    pub fn transactions(&self) -> &[DirectDebit] {
        &self.transactions
    }

    /// Group totals
    pub fn totals(&self) -> ControlTotals {
        self.totals
    }

    fn to_document(&self) -> pain008::PaymentInstructionInformation {
        pain008::PaymentInstructionInformation {
            payment_information_id: self.group_id.clone(),
            payment_method: "DD".to_string(),
            number_of_transactions: self.totals.count(),
            control_sum: self.totals.sum(),
            payment_type: pain008::PaymentTypeInformation {
                service_level: pain008::Code::new(SERVICE_LEVEL),
                local_instrument: pain008::Code::new(LOCAL_INSTRUMENT),
                sequence_type: self.sequence_type.code().to_string(),
            },
            requested_collection_date: self.collection_date,
            creditor: common::PartyIdentification::from(&self.creditor),
            creditor_account: common::CashAccount::from(&self.creditor_account),
            creditor_agent: common::FinancialInstitution::from(&self.creditor_agent),
            charge_bearer: CHARGE_BEARER.to_string(),
            transactions: self.transactions.iter().map(DirectDebit::to_document).collect(),
        }
    }
}

/// pain.008.001.02 builder
#[derive(Debug, Default)]
pub struct DirectDebitBuilder {
    options: BuilderOptions,
    header: Option<GroupHeader>,
    groups: Vec<CollectionGroup>,
}

impl DirectDebitBuilder {
    /// Builder with default options (structural IBAN checks)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with explicit options
    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            options,
            header: None,
            groups: Vec::new(),
        }
    }

    /// Builder configured from a [`Config`]
    pub fn with_config(config: &Config) -> Self {
        Self::with_options(BuilderOptions::from(config))
    }

    /// Set the group header. Generates a message id when `message_id` is `None`.
    pub fn set_header(
        &mut self,
        message_id: Option<&str>,
        initiator_name: &str,
        created_at: NaiveDateTime,
    ) -> Result<()> {
        let header = GroupHeader::new(message_id, initiator_name, created_at)?;
        install_header(&mut self.header, header)
    }

    /// Open a collection group
    pub fn open_group(
        &mut self,
        group_id: &str,
        collection_date: NaiveDate,
        sequence_type: SequenceType,
        creditor: Party,
        creditor_iban: &str,
        creditor_bic: &str,
    ) -> Result<DirectDebitGroup<'_>> {
        check_text("PmtInfId", group_id, MAX_ID_LEN)?;
        let iban_check = self.options.iban_check;
        let creditor_account = Account::new(Iban::parse(creditor_iban, iban_check)?);
        let creditor_agent = Bic::parse(creditor_bic)?;

        let header = require_header(&mut self.header)?;
        let group = push_last(
            &mut self.groups,
            CollectionGroup {
                group_id: group_id.to_string(),
                collection_date,
                sequence_type,
                creditor,
                creditor_account,
                creditor_agent,
                transactions: Vec::new(),
                totals: ControlTotals::new(),
            },
        );
        debug!(group_id, %collection_date, %sequence_type, "direct debit group opened");

        Ok(DirectDebitGroup {
            header,
            group,
            iban_check,
        })
    }

    /// Group header, once set
    pub fn header(&self) -> Option<&GroupHeader> {
        self.header.as_ref()
    }

    /// Groups in open order
    pub fn groups(&self) -> &[CollectionGroup] {
        &self.groups
    }

    /// Handle to an already opened group
    pub fn group_mut(&mut self, group_id: &str) -> Option<DirectDebitGroup<'_>> {
        let iban_check = self.options.iban_check;
        let header = self.header.as_mut()?;
        let group = self.groups.iter_mut().find(|g| g.group_id == group_id)?;
        Some(DirectDebitGroup {
            header,
            group,
            iban_check,
        })
    }

    /// Document tree of the current state
    pub fn document(&self) -> Result<pain008::Pain008Document> {
        let header = self
            .header
            .as_ref()
            .ok_or_else(|| Error::Serialization("group header not set".to_string()))?;

        Ok(pain008::Pain008Document {
            xmlns: pain008::NAMESPACE.to_string(),
            initiation: pain008::CustomerDirectDebitInitiation {
                group_header: header.to_document(),
                payment_information: self
                    .groups
                    .iter()
                    .map(CollectionGroup::to_document)
                    .collect(),
            },
        })
    }

    /// Render as UTF-8 XML. Does not change the builder.
    pub fn render(&self) -> Result<Vec<u8>> {
        let document = self.document()?;
        let xml = render::to_xml(&document, &self.options.render)?;
        info!(
            msg_id = %document.initiation.group_header.message_id,
            groups = self.groups.len(),
            transactions = document.initiation.group_header.number_of_transactions,
            bytes = xml.len(),
            "pain.008 rendered"
        );
        Ok(xml)
    }

    /// Render into a writer
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.render()?)?;
        Ok(())
    }
}

/// Append handle to one open collection group
#[derive(Debug)]
pub struct DirectDebitGroup<'a> {
    header: &'a mut GroupHeader,
    group: &'a mut CollectionGroup,
    iban_check: IbanCheck,
}

impl<'a> DirectDebitGroup<'a> {
    /// Append a collection. Nothing changes unless every field validates.
    pub fn add_transaction(&mut self, tx: DirectDebitTransaction) -> Result<&mut Self> {
        check_text("InstrId", &tx.instruction_id, MAX_ID_LEN)?;
        check_text("EndToEndId", &tx.end_to_end_id, MAX_ID_LEN)?;
        tx.mandate.validate()?;
        let debtor_account = Account::new(Iban::parse(tx.debtor_iban, self.iban_check)?);
        let debtor_agent = Bic::parse(tx.debtor_bic)?;
        tx.remittance.validate()?;
        let amount = check_amount(tx.amount)?;

        apply_to_group_and_header(
            &mut self.group.totals,
            self.header.totals_mut(),
            amount,
        )?;
        debug!(
            group_id = %self.group.group_id,
            end_to_end_id = %tx.end_to_end_id,
            %amount,
            "direct debit appended"
        );
        self.group.transactions.push(DirectDebit {
            instruction_id: tx.instruction_id,
            end_to_end_id: tx.end_to_end_id,
            amount,
            mandate: tx.mandate,
            debtor: tx.debtor,
            debtor_account,
            debtor_agent,
            remittance: tx.remittance,
        });

        Ok(self)
    }

    /// The group being appended to
    pub fn group(&self) -> &CollectionGroup {
        self.group
    }

    /// The message header
    pub fn header(&self) -> &GroupHeader {
        self.header
    }
}
