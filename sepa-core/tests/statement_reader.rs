//! camt.053 statement reader against a bank-supplied style document

use chrono::{DateTime, NaiveDate};
use rust_decimal_macros::dec;
use sepa_core::{
    statement::{CopyDuplicate, CreditDebit},
    BankToCustomerStatement, Error,
};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/camt053_statement.xml")
}

fn read_fixture() -> BankToCustomerStatement {
    BankToCustomerStatement::read_file(fixture()).unwrap()
}

#[test]
fn test_group_header() {
    let statement = read_fixture();
    assert_eq!(statement.message_id(), "AAAASESS-FP-STAT001");
    assert_eq!(
        statement.created_at(),
        DateTime::parse_from_rfc3339("2010-10-18T17:00:00+01:00").unwrap()
    );
    assert_eq!(statement.recipient(), Some("MUELLER"));

    let pagination = statement.pagination().unwrap();
    assert_eq!(pagination.page_number, "1");
    assert!(pagination.last_page);
    assert_eq!(statement.additional_information(), Some("SEPA statement"));
}

#[test]
fn test_account_statement() {
    let statement = read_fixture();
    assert_eq!(statement.statements().len(), 1);

    let stmt = &statement.statements()[0];
    assert_eq!(stmt.id(), "AAAASESS-FP-STAT001");
    assert_eq!(stmt.electronic_sequence_number(), Some(dec!(1)));
    assert_eq!(stmt.legal_sequence_number(), Some(dec!(101)));
    assert_eq!(
        stmt.from(),
        Some(DateTime::parse_from_rfc3339("2010-10-18T08:00:00+01:00").unwrap())
    );
    assert_eq!(
        stmt.to(),
        Some(DateTime::parse_from_rfc3339("2010-10-18T17:00:00+01:00").unwrap())
    );
    assert_eq!(stmt.copy_duplicate(), Some(CopyDuplicate::Duplicate));
    assert_eq!(stmt.additional_information(), Some("Einde afschrift"));

    let account = stmt.account();
    assert_eq!(account.id, "NL91ABNA0417164300");
    assert!(account.is_iban);
    assert_eq!(account.currency.as_deref(), Some("EUR"));
    assert_eq!(account.owner.as_deref(), Some("MUELLER"));
    assert_eq!(account.servicer_bic.as_deref(), Some("ABNANL2A"));
}

#[test]
fn test_balances_and_interest() {
    let statement = read_fixture();
    let stmt = &statement.statements()[0];

    let balances = stmt.balances();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].code, "OPBD");
    assert_eq!(balances[0].amount, dec!(500000));
    assert_eq!(balances[0].date, NaiveDate::from_ymd_opt(2010, 10, 15).unwrap());
    assert_eq!(balances[1].code, "CLBD");
    assert_eq!(balances[1].amount, dec!(435678.50));
    assert_eq!(balances[1].credit_debit, CreditDebit::Credit);
    assert_eq!(balances[1].date, NaiveDate::from_ymd_opt(2010, 10, 18).unwrap());

    let interest = &stmt.interest()[0];
    assert_eq!(interest.interest_type.as_deref(), Some("INDY"));
    assert_eq!(interest.rates, vec![dec!(0.5)]);
    assert_eq!(interest.reason.as_deref(), Some("Creditrente"));
}

#[test]
fn test_entries() {
    let statement = read_fixture();
    let entries = statement.statements()[0].entries();
    assert_eq!(entries.len(), 2);

    let credit = &entries[0];
    assert_eq!(credit.amount, dec!(100000));
    assert_eq!(credit.credit_debit, CreditDebit::Credit);
    assert_eq!(credit.status, "BOOK");
    assert_eq!(
        credit.booking_date,
        Some(NaiveDate::from_ymd_opt(2010, 10, 18).unwrap())
    );
    assert_eq!(credit.servicer_reference.as_deref(), Some("AAAASESS-FP-CN98765"));
    assert_eq!(credit.end_to_end_ids, vec!["MUELL/FINP/RA12345"]);
    assert_eq!(credit.remittance, vec!["Factuur 2010-12345"]);

    let debit = &entries[1];
    assert_eq!(debit.credit_debit, CreditDebit::Debit);
    assert_eq!(debit.end_to_end_ids, vec!["E2E-1", "E2E-2"]);
    assert!(debit.remittance.is_empty());
    assert_eq!(debit.additional_information.as_deref(), Some("Batch booking"));

    // opening + credits - debits == closing
    let movement: rust_decimal::Decimal = entries
        .iter()
        .map(|e| match e.credit_debit {
            CreditDebit::Credit => e.amount,
            CreditDebit::Debit => -e.amount,
        })
        .sum();
    let balances = statement.statements()[0].balances();
    assert_eq!(balances[0].amount + movement, balances[1].amount);
}

#[test]
fn test_json_projection() {
    let statement = read_fixture();
    let json = serde_json::to_value(&statement).unwrap();
    assert_eq!(json["message_id"], "AAAASESS-FP-STAT001");
    assert_eq!(json["statements"][0]["copy_duplicate"], "DUPL");
    assert_eq!(json["statements"][0]["entries"][1]["credit_debit"], "DBIT");
}

#[test]
fn test_bad_amount_is_malformed() {
    let xml = std::fs::read_to_string(fixture())
        .unwrap()
        .replace("435678.50", "veel");
    let err = BankToCustomerStatement::read(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedStatement(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = BankToCustomerStatement::read_file("/nonexistent/camt053.xml").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
