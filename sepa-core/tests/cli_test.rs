//! `sepa` binary: render, statement and iban subcommands

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

const BATCH: &str = r#"
kind = "credit-transfer"

[header]
message_id = "000001"
initiator = "Bedrijfsnaam"
created_at = "2012-09-20T10:00:00"

[[groups]]
id = "20120920-0001"
date = "2012-09-21"
name = "Debiteur"
iban = "NL10ABNA1234567890"
bic = "ABNANL2A"

[[groups.transactions]]
end_to_end_id = "E2E-1"
amount = "386.00"
name = "Crediteur"
iban = "NL91RABO1234567890"
bic = "RABONL2U"
remittance = "Factuur 2012-386"
"#;

fn sepa() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sepa"));
    for var in ["SEPA_IBAN_CHECKSUM", "SEPA_XML_INDENT", "SEPA_OUTPUT_DIR"] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_batch(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("salaris.toml");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_render_into_output_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let batch = write_batch(dir.path(), BATCH);
    let out_dir = dir.path().join("out");

    sepa()
        .arg("render")
        .arg(&batch)
        .env("SEPA_OUTPUT_DIR", &out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("salaris.xml"));

    let xml = std::fs::read_to_string(out_dir.join("salaris.xml"))?;
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml
        .lines()
        .any(|line| line.trim() == r#"<InstdAmt Ccy="EUR">386.00</InstdAmt>"#));
    assert!(xml.contains("<NbOfTxs>1</NbOfTxs>"));
    Ok(())
}

#[test]
fn test_render_with_config_and_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let batch = write_batch(dir.path(), BATCH);
    let config = dir.path().join("sepa.toml");
    std::fs::write(&config, "[render]\nindent = 0\nxml_declaration = false\n")?;
    let output = dir.path().join("bericht.xml");

    sepa()
        .arg("render")
        .arg(&batch)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let xml = std::fs::read_to_string(&output)?;
    assert!(xml.starts_with("<Document"));
    assert!(!xml.contains('\n'));
    assert!(xml.contains(r#"<InstdAmt Ccy="EUR">386.00</InstdAmt>"#));
    Ok(())
}

#[test]
fn test_render_rejected_batch_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let batch = write_batch(dir.path(), BATCH);
    let output = dir.path().join("bericht.xml");

    // checksum policy from the environment rejects the sample IBANs
    sepa()
        .arg("render")
        .arg(&batch)
        .arg("--output")
        .arg(&output)
        .env("SEPA_IBAN_CHECKSUM", "true")
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_statement_as_json() {
    let fixture =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/camt053_statement.xml");

    sepa()
        .arg("statement")
        .arg(fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message_id": "AAAASESS-FP-STAT001""#))
        .stdout(predicate::str::contains(r#""copy_duplicate": "DUPL""#));
}

#[test]
fn test_statement_missing_file_fails() {
    sepa()
        .arg("statement")
        .arg("/nonexistent/camt053.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read statement"));
}

#[test]
fn test_iban_check() {
    sepa()
        .arg("iban")
        .arg("NL91 ABNA.0417-1643 00")
        .assert()
        .success()
        .stdout(predicate::str::contains("iban:        NL91ABNA0417164300"))
        .stdout(predicate::str::contains("readable:    NL91 ABNA 0417 1643 00"))
        .stdout(predicate::str::contains("checksum:    true"));

    sepa()
        .arg("iban")
        .arg("NL10ABNA1234567890")
        .assert()
        .success()
        .stdout(predicate::str::contains("well-formed: true"))
        .stdout(predicate::str::contains("checksum:    false"));
}
