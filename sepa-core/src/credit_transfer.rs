//! SEPA Credit Transfer Initiation (pain.001.001.03)
//!
//! Builds the message sent by the initiating party to the debtor bank to move
//! funds from the debtor account to one or more creditor accounts.
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use sepa_core::CreditTransferBuilder;
//!
//! # fn main() -> sepa_core::Result<()> {
//! let created = NaiveDate::from_ymd_opt(2012, 9, 20).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let mut builder = CreditTransferBuilder::new();
//! builder.set_header(Some("000001"), "Bedrijfsnaam", created)?;
//! builder
//!     .open_group(
//!         "20120920-0001",
//!         NaiveDate::from_ymd_opt(2012, 9, 21).unwrap(),
//!         "Debiteur",
//!         "NL10ABNA1234567890",
//!         "ABNANL2A",
//!     )?
//!     .credit_transfer(
//!         "E2E-1",
//!         Decimal::new(38600, 2),
//!         "RABONL2U",
//!         "Crediteur",
//!         "NL91RABO1234567890",
//!         "Factuur 2012-386",
//!     )?;
//!
//! let xml = builder.render()?;
//! assert!(String::from_utf8(xml).unwrap().contains("<CtrlSum>386.00</CtrlSum>"));
//! # Ok(())
//! # }
//! ```

use crate::{
    aggregate::{apply_to_group_and_header, ControlTotals},
    config::Config,
    document::{common, pain001},
    message::{install_header, push_last, require_header, BuilderOptions, GroupHeader},
    render,
    types::{
        check_amount, check_text, Account, Bic, Iban, IbanCheck, Party, PaymentMethod,
        Remittance, MAX_ID_LEN,
    },
    Error, Result,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// Charge bearer, only `SLEV` is allowed in SEPA
pub const CHARGE_BEARER: &str = "SLEV";

/// One credit transfer transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditTransfer {
    end_to_end_id: String,
    amount: Decimal,
    creditor: Party,
    creditor_account: Account,
    creditor_agent: Bic,
    remittance: Remittance,
}

impl CreditTransfer {
    /// End-to-end id
    pub fn end_to_end_id(&self) -> &str {
        &self.end_to_end_id
    }

    /// Instructed amount in EUR
    pub fn amount(&self) -> Decimal {
        self.amount
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

    /// Remittance information
    pub fn remittance(&self) -> &Remittance {
        &self.remittance
    }

    fn to_document(&self) -> pain001::CreditTransferTransactionInformation {
        pain001::CreditTransferTransactionInformation {
            payment_id: common::PaymentIdentification {
                instruction_id: None,
                end_to_end_id: self.end_to_end_id.clone(),
            },
            amount: pain001::AmountType {
                instructed_amount: common::CurrencyAndAmount::eur(self.amount),
            },
            charge_bearer: CHARGE_BEARER.to_string(),
            creditor_agent: common::FinancialInstitution::from(&self.creditor_agent),
            creditor: common::PartyIdentification::from(&self.creditor),
            creditor_account: common::CashAccount::from(&self.creditor_account),
            remittance_information: Some(common::RemittanceInformation::from(&self.remittance)),
        }
    }
}

/// Payment information group: the debit side shared by its transfers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferGroup {
    group_id: String,
    execution_date: NaiveDate,
    debtor: Party,
    debtor_account: Account,
    debtor_agent: Bic,
    transactions: Vec<CreditTransfer>,
    totals: ControlTotals,
}

impl TransferGroup {
    /// Payment information id
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Always [`PaymentMethod::Transfer`]
    pub fn payment_method(&self) -> PaymentMethod {
        PaymentMethod::Transfer
    }

    /// Requested execution date
    pub fn execution_date(&self) -> NaiveDate {
        self.execution_date
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

    /// Transfers in append order
    pub fn transactions(&self) -> &[CreditTransfer] {
        &self.transactions
    }

    /// Group totals
    pub fn totals(&self) -> ControlTotals {
        self.totals
    }

    fn to_document(&self) -> pain001::PaymentInstructionInformation {
        pain001::PaymentInstructionInformation {
            payment_information_id: self.group_id.clone(),
            payment_method: "TRF".to_string(),
            number_of_transactions: self.totals.count(),
            control_sum: self.totals.sum(),
            requested_execution_date: self.execution_date,
            debtor: common::PartyIdentification::from(&self.debtor),
            debtor_account: common::CashAccount::from(&self.debtor_account),
            debtor_agent: common::FinancialInstitution::from(&self.debtor_agent),
            transactions: self.transactions.iter().map(CreditTransfer::to_document).collect(),
        }
    }
}

/// pain.001.001.03 builder
#[derive(Debug, Default)]
pub struct CreditTransferBuilder {
    options: BuilderOptions,
    header: Option<GroupHeader>,
    groups: Vec<TransferGroup>,
}

impl CreditTransferBuilder {
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

    /// Open a payment information group for a debtor known by name
    pub fn open_group(
        &mut self,
        group_id: &str,
        execution_date: NaiveDate,
        debtor_name: &str,
        debtor_iban: &str,
        debtor_bic: &str,
    ) -> Result<CreditTransferGroup<'_>> {
        let debtor = Party::new(debtor_name)?;
        let account = Account::new(Iban::parse(debtor_iban, self.options.iban_check)?);
        let agent = Bic::parse(debtor_bic)?;
        self.open_group_for(group_id, execution_date, debtor, account, agent)
    }

    /// Open a payment information group for a fully described debtor
    pub fn open_group_for(
        &mut self,
        group_id: &str,
        execution_date: NaiveDate,
        debtor: Party,
        debtor_account: Account,
        debtor_agent: Bic,
    ) -> Result<CreditTransferGroup<'_>> {
        check_text("PmtInfId", group_id, MAX_ID_LEN)?;
        let iban_check = self.options.iban_check;
        if iban_check == IbanCheck::Checksum {
            // accounts built by the caller may have been parsed more leniently
            Iban::parse(debtor_account.iban().as_str(), IbanCheck::Checksum)?;
        }

        let header = require_header(&mut self.header)?;
        let group = push_last(
            &mut self.groups,
            TransferGroup {
                group_id: group_id.to_string(),
                execution_date,
                debtor,
                debtor_account,
                debtor_agent,
                transactions: Vec::new(),
                totals: ControlTotals::new(),
            },
        );
        debug!(group_id, %execution_date, "credit transfer group opened");

        Ok(CreditTransferGroup {
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
    pub fn groups(&self) -> &[TransferGroup] {
        &self.groups
    }

    /// Handle to an already opened group, to continue appending to it
    pub fn group_mut(&mut self, group_id: &str) -> Option<CreditTransferGroup<'_>> {
        let iban_check = self.options.iban_check;
        let header = self.header.as_mut()?;
        let group = self.groups.iter_mut().find(|g| g.group_id == group_id)?;
        Some(CreditTransferGroup {
            header,
            group,
            iban_check,
        })
    }

    /// Document tree of the current state
    pub fn document(&self) -> Result<pain001::Pain001Document> {
        let header = self
            .header
            .as_ref()
            .ok_or_else(|| Error::Serialization("group header not set".to_string()))?;

        Ok(pain001::Pain001Document {
            xmlns: pain001::NAMESPACE.to_string(),
            initiation: pain001::CustomerCreditTransferInitiation {
                group_header: header.to_document(),
                payment_information: self.groups.iter().map(TransferGroup::to_document).collect(),
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
            "pain.001 rendered"
        );
        Ok(xml)
    }

    /// Render into a writer
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.render()?)?;
        Ok(())
    }
}

/// Append handle to one open group; borrows the header and the group so
/// both totals advance together.
#[derive(Debug)]
pub struct CreditTransferGroup<'a> {
    header: &'a mut GroupHeader,
    group: &'a mut TransferGroup,
    iban_check: IbanCheck,
}

impl<'a> CreditTransferGroup<'a> {
    /// Append a credit transfer.
    ///
    /// All inputs are validated before anything changes; on error the group
    /// and header are exactly as before.
    pub fn credit_transfer(
        &mut self,
        end_to_end_id: &str,
        amount: Decimal,
        creditor_bic: &str,
        creditor_name: &str,
        creditor_iban: &str,
        remittance: impl Into<Remittance>,
    ) -> Result<&mut Self> {
        let creditor = Party::new(creditor_name)?;
        let account = Account::new(Iban::parse(creditor_iban, self.iban_check)?);
        self.credit_transfer_to(end_to_end_id, amount, creditor_bic, creditor, account, remittance)
    }

    /// Append a credit transfer to a fully described creditor
    pub fn credit_transfer_to(
        &mut self,
        end_to_end_id: &str,
        amount: Decimal,
        creditor_bic: &str,
        creditor: Party,
        creditor_account: Account,
        remittance: impl Into<Remittance>,
    ) -> Result<&mut Self> {
        check_text("EndToEndId", end_to_end_id, MAX_ID_LEN)?;
        let creditor_agent = Bic::parse(creditor_bic)?;
        if self.iban_check == IbanCheck::Checksum {
            Iban::parse(creditor_account.iban().as_str(), IbanCheck::Checksum)?;
        }
        let remittance = remittance.into();
        remittance.validate()?;
        let amount = check_amount(amount)?;

        apply_to_group_and_header(
            &mut self.group.totals,
            self.header.totals_mut(),
            amount,
        )?;
        self.group.transactions.push(CreditTransfer {
            end_to_end_id: end_to_end_id.to_string(),
            amount,
            creditor,
            creditor_account,
            creditor_agent,
            remittance,
        });
        debug!(
            group_id = %self.group.group_id,
            end_to_end_id,
            %amount,
            "credit transfer appended"
        );

        Ok(self)
    }

    /// The group being appended to
    pub fn group(&self) -> &TransferGroup {
        self.group
    }

    /// The message header
    pub fn header(&self) -> &GroupHeader {
        self.header
    }
}
