//! Core types shared by the message builders

use crate::{iban, Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement currency of every SEPA message built by this crate
pub const CURRENCY: &str = "EUR";

/// Max35Text
pub const MAX_ID_LEN: usize = 35;

/// Max70Text
pub const MAX_NAME_LEN: usize = 70;

/// Max140Text
pub const MAX_REMITTANCE_LEN: usize = 140;

/// SEPA allows at most two unstructured address lines
pub const MAX_ADDRESS_LINES: usize = 2;

/// Checks an ISO 20022 `MaxNText` bound, counting characters rather than bytes.
pub(crate) fn check_text(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(Error::validation(
            field,
            format!("length must be 1-{} characters, got {}", max, len),
        ));
    }
    Ok(())
}

/// Largest amount a SEPA `InstdAmt` carries (`totalDigits` 11, two fraction digits)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

/// Checks that an amount can be carried in a EUR `InstdAmt` and returns it
/// with exactly two fraction digits.
pub(crate) fn check_amount(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation(
            "amount",
            format!("amount must be positive, got {}", amount),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(Error::validation(
            "amount",
            format!("{} has more than two fraction digits", amount),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(Error::validation(
            "amount",
            format!("{} exceeds the maximum of {}", amount, MAX_AMOUNT),
        ));
    }
    let mut amount = amount.normalize();
    amount.rescale(2);
    Ok(amount)
}

/// A debtor, creditor or initiating party
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    name: String,
    country: Option<String>,
    address_lines: Vec<String>,
}

impl Party {
    /// Party identified by name only
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_text("party name", &name, MAX_NAME_LEN)?;
        Ok(Self {
            name,
            country: None,
            address_lines: Vec::new(),
        })
    }

    /// Party with a postal address (ISO 3166-1 alpha-2 country + free lines)
    pub fn with_address(
        name: impl Into<String>,
        country: impl Into<String>,
        address_lines: Vec<String>,
    ) -> Result<Self> {
        let mut party = Self::new(name)?;

        let country = country.into();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::validation(
                "country",
                format!("'{}' is not an ISO 3166-1 alpha-2 code", country),
            ));
        }
        if address_lines.len() > MAX_ADDRESS_LINES {
            return Err(Error::validation(
                "address line",
                format!(
                    "at most {} lines allowed, got {}",
                    MAX_ADDRESS_LINES,
                    address_lines.len()
                ),
            ));
        }
        for line in &address_lines {
            check_text("address line", line, MAX_NAME_LEN)?;
        }

        party.country = Some(country);
        party.address_lines = address_lines;
        Ok(party)
    }

    /// Name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Country code, if an address was given
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Address lines (empty without an address)
    pub fn address_lines(&self) -> &[String] {
        &self.address_lines
    }
}

/// How strictly the builders check IBANs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IbanCheck {
    /// Length, country code and check digit shape
    #[default]
    Structure,
    /// Structure plus Mod-97
    Checksum,
}

/// Validated IBAN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Iban(String);

impl Iban {
    /// Parse an IBAN under the given policy. Separators are not tolerated
    /// here; run [`iban::clean`] on user input first.
    pub fn parse(value: impl Into<String>, check: IbanCheck) -> Result<Self> {
        let value = value.into();
        let ok = match check {
            IbanCheck::Structure => iban::is_well_formed_iban(&value),
            IbanCheck::Checksum => iban::is_valid_iban(&value),
        };
        if !ok {
            return Err(Error::validation(
                "IBAN",
                format!("'{}' is not a valid IBAN", value),
            ));
        }
        Ok(Self(value))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Iban {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated BIC of the agent servicing an account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bic(String);

impl Bic {
    /// Parse a BIC (8 or 11 characters)
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !iban::validate_bic(&value) {
            return Err(Error::validation(
                "BIC",
                format!("'{}' doesn't look like a correct BIC", value),
            ));
        }
        Ok(Self(value))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Bic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cash account, IBAN only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    iban: Iban,
    currency: Option<String>,
}

impl Account {
    /// Account in the message currency
    pub fn new(iban: Iban) -> Self {
        Self {
            iban,
            currency: None,
        }
    }

    /// Account with an explicit currency code
    pub fn with_currency(iban: Iban, currency: impl Into<String>) -> Result<Self> {
        let currency = currency.into();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::validation(
                "currency",
                format!("'{}' is not an ISO 4217 code", currency),
            ));
        }
        Ok(Self {
            iban,
            currency: Some(currency),
        })
    }

    /// IBAN
    pub fn iban(&self) -> &Iban {
        &self.iban
    }

    /// Explicit currency, `None` means [`CURRENCY`]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

/// Remittance information; a transaction carries exactly one of the two forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Remittance {
    /// Free text, 1-140 characters
    Unstructured(String),
    /// Creditor reference (type `SCOR`), 1-35 characters
    Structured(String),
}

impl Remittance {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            Remittance::Unstructured(text) => {
                check_text("remittance information", text, MAX_REMITTANCE_LEN)
            }
            Remittance::Structured(reference) => {
                check_text("creditor reference", reference, MAX_ID_LEN)
            }
        }
    }
}

impl From<&str> for Remittance {
    fn from(text: &str) -> Self {
        Remittance::Unstructured(text.to_string())
    }
}

impl From<String> for Remittance {
    fn from(text: String) -> Self {
        Remittance::Unstructured(text)
    }
}

/// Direct debit sequence type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceType {
    /// First collection of a series on one mandate
    #[serde(rename = "FRST")]
    First,
    /// Follow-up collection on the same mandate
    #[serde(rename = "RCUR")]
    Recurring,
    /// Last collection on the mandate
    #[serde(rename = "FNAL")]
    Final,
    /// Single collection without repetition
    #[serde(rename = "OOFF")]
    OneOff,
}

impl SequenceType {
    /// ISO code
    pub fn code(&self) -> &'static str {
        match self {
            SequenceType::First => "FRST",
            SequenceType::Recurring => "RCUR",
            SequenceType::Final => "FNAL",
            SequenceType::OneOff => "OOFF",
        }
    }
}

impl std::fmt::Display for SequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment method of a payment information group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit transfer
    #[serde(rename = "TRF")]
    Transfer,
    /// Direct debit
    #[serde(rename = "DD")]
    DirectDebit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_text_bounds() {
        assert!(check_text("id", "a", MAX_ID_LEN).is_ok());
        assert!(check_text("id", &"a".repeat(35), MAX_ID_LEN).is_ok());
        assert!(check_text("id", &"a".repeat(36), MAX_ID_LEN).is_err());
        assert!(check_text("id", "", MAX_ID_LEN).is_err());
        // characters, not bytes
        assert!(check_text("id", &"é".repeat(35), MAX_ID_LEN).is_ok());
    }

    #[test]
    fn test_amount_rules() {
        assert!(check_amount(dec!(386.00)).is_ok());
        assert!(check_amount(dec!(0.01)).is_ok());
        assert!(check_amount(dec!(1.010)).is_ok());
        assert!(check_amount(dec!(0)).is_err());
        assert!(check_amount(dec!(-5.00)).is_err());
        assert!(check_amount(dec!(1.001)).is_err());
    }

    #[test]
    fn test_amount_scale_is_two() {
        assert_eq!(check_amount(dec!(1.010)).unwrap().to_string(), "1.01");
        assert_eq!(check_amount(dec!(386)).unwrap().to_string(), "386.00");
        assert_eq!(check_amount(dec!(1.0000000000)).unwrap().to_string(), "1.00");
        assert_eq!(check_amount(dec!(0.5)).unwrap().to_string(), "0.50");
    }

    #[test]
    fn test_amount_upper_bound() {
        assert_eq!(MAX_AMOUNT, dec!(999999999.99));
        assert!(check_amount(dec!(999999999.99)).is_ok());
        assert!(check_amount(dec!(1000000000.00)).is_err());
        assert!(check_amount(dec!(1000000000000000000000000000)).is_err());
    }

    #[test]
    fn test_party_address() {
        let party = Party::with_address(
            "Naam",
            "NL",
            vec!["Dorpstraat 1".to_string(), "Amsterdam".to_string()],
        )
        .unwrap();
        assert_eq!(party.country(), Some("NL"));
        assert_eq!(party.address_lines().len(), 2);

        assert!(Party::with_address("Naam", "nld", vec![]).is_err());
        assert!(Party::with_address(
            "Naam",
            "NL",
            vec!["a".into(), "b".into(), "c".into()]
        )
        .is_err());
        assert!(Party::new("x".repeat(71)).is_err());
    }

    #[test]
    fn test_iban_policy() {
        assert!(Iban::parse("NL10ABNA1234567890", IbanCheck::Structure).is_ok());
        assert!(Iban::parse("NL10ABNA1234567890", IbanCheck::Checksum).is_err());
        assert!(Iban::parse("NL91ABNA0417164300", IbanCheck::Checksum).is_ok());
        assert!(Iban::parse("NL10 ABNA 1234 5678 90", IbanCheck::Structure).is_err());
    }

    #[test]
    fn test_account_currency() {
        let iban = Iban::parse("NL91ABNA0417164300", IbanCheck::Checksum).unwrap();
        assert_eq!(Account::new(iban.clone()).currency(), None);
        assert_eq!(
            Account::with_currency(iban.clone(), "EUR").unwrap().currency(),
            Some("EUR")
        );
        assert!(Account::with_currency(iban, "euro").is_err());
    }

    #[test]
    fn test_remittance_forms() {
        assert!(Remittance::from("Ref. 2012.0386").validate().is_ok());
        assert!(Remittance::Unstructured("x".repeat(141)).validate().is_err());
        assert!(Remittance::Structured("RF18539007547034".into()).validate().is_ok());
        assert!(Remittance::Structured("x".repeat(36)).validate().is_err());
    }

    #[test]
    fn test_sequence_type_codes() {
        assert_eq!(SequenceType::First.code(), "FRST");
        assert_eq!(SequenceType::OneOff.to_string(), "OOFF");
    }
}
