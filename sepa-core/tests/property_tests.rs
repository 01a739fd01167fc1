//! Property-based tests for message invariants
//!
//! - Aggregate consistency for both builders: header totals == Σ group
//!   totals == Σ amounts
//! - Mod-97 catches every single digit substitution
//! - Readable formatting only ever inserts separators

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use sepa_core::{
    iban, ControlTotals, CreditTransferBuilder, DirectDebitBuilder, DirectDebitTransaction,
    Mandate, Party, SequenceType,
};

/// Strategy for generating valid amounts (positive, cents)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Remainder of the rearranged IBAN digit string
fn mod97(rearranged: &str) -> u32 {
    rearranged.chars().fold(0u32, |r, c| {
        let v = c.to_digit(36).unwrap();
        if v >= 10 {
            (r * 100 + v) % 97
        } else {
            (r * 10 + v) % 97
        }
    })
}

/// Dutch IBAN with correct check digits for the given BBAN
fn nl_iban(bban: &str) -> String {
    let check = 98 - mod97(&format!("{}NL00", bban));
    format!("NL{:02}{}", check, bban)
}

fn iban_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{4}[0-9]{10}".prop_map(|bban| nl_iban(&bban))
}

proptest! {
    #[test]
    fn prop_totals_consistent_after_every_append(
        appends in prop::collection::vec((0usize..3, amount_strategy()), 1..40)
    ) {
        let created = NaiveDate::from_ymd_opt(2012, 9, 20).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2012, 9, 21).unwrap();

        let mut builder = CreditTransferBuilder::new();
        builder.set_header(Some("PROP"), "Bedrijf", created).unwrap();
        for id in ["G0", "G1", "G2"] {
            builder.open_group(id, date, "Debiteur", "NL10ABNA1234567890", "ABNANL2A").unwrap();
        }

        for (i, (group, amount)) in appends.iter().enumerate() {
            builder
                .group_mut(&format!("G{}", group))
                .unwrap()
                .credit_transfer(
                    &format!("E2E-{}", i),
                    *amount,
                    "RABONL2U",
                    "Crediteur",
                    "NL91RABO1234567890",
                    "test",
                )
                .unwrap();

            let header = builder.header().unwrap().totals();
            let groups = ControlTotals::checked_sum(builder.groups().iter().map(|g| g.totals()));
            prop_assert_eq!(Some(header), groups);

            for g in builder.groups() {
                let sum: Decimal = g.transactions().iter().map(|t| t.amount()).sum();
                prop_assert_eq!(g.totals().count(), g.transactions().len() as u64);
                prop_assert_eq!(g.totals().sum(), sum);
            }
        }

        let expected: Decimal = appends.iter().map(|(_, a)| *a).sum();
        prop_assert_eq!(builder.header().unwrap().totals().sum(), expected);
        prop_assert_eq!(builder.header().unwrap().totals().count(), appends.len() as u64);
    }

    #[test]
    fn prop_direct_debit_totals_consistent_after_every_append(
        appends in prop::collection::vec((0usize..3, amount_strategy()), 1..40)
    ) {
        let created = NaiveDate::from_ymd_opt(2013, 1, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2013, 1, 10).unwrap();
        let mandate = Mandate {
            mandate_id: "M-1".to_string(),
            date_of_signature: NaiveDate::from_ymd_opt(2012, 12, 1).unwrap(),
            creditor_scheme_id: "NL89ZZZ011234567890".to_string(),
        };

        let mut builder = DirectDebitBuilder::new();
        builder.set_header(Some("PROP-DD"), "Vereniging", created).unwrap();
        for (id, sequence_type) in [
            ("D0", SequenceType::First),
            ("D1", SequenceType::Recurring),
            ("D2", SequenceType::OneOff),
        ] {
            builder
                .open_group(
                    id,
                    date,
                    sequence_type,
                    Party::new("Vereniging").unwrap(),
                    "NL44RABO0123456789",
                    "RABONL2U",
                )
                .unwrap();
        }

        for (i, (group, amount)) in appends.iter().enumerate() {
            builder
                .group_mut(&format!("D{}", group))
                .unwrap()
                .add_transaction(DirectDebitTransaction {
                    instruction_id: format!("I-{}", i),
                    end_to_end_id: format!("E2E-{}", i),
                    amount: *amount,
                    mandate: mandate.clone(),
                    debtor: Party::new("Lid").unwrap(),
                    debtor_iban: "NL91ABNA0417164300".to_string(),
                    debtor_bic: "ABNANL2A".to_string(),
                    remittance: "Contributie".into(),
                })
                .unwrap();

            let header = builder.header().unwrap().totals();
            let groups = ControlTotals::checked_sum(builder.groups().iter().map(|g| g.totals()));
            prop_assert_eq!(Some(header), groups);

            for g in builder.groups() {
                let sum: Decimal = g.transactions().iter().map(|t| t.amount()).sum();
                prop_assert_eq!(g.totals().count(), g.transactions().len() as u64);
                prop_assert_eq!(g.totals().sum(), sum);
            }
        }

        let expected: Decimal = appends.iter().map(|(_, a)| *a).sum();
        prop_assert_eq!(builder.header().unwrap().totals().sum(), expected);
        prop_assert_eq!(builder.header().unwrap().totals().count(), appends.len() as u64);
    }

    #[test]
    fn prop_generated_ibans_validate(value in iban_strategy()) {
        prop_assert!(iban::is_valid_iban(&value));
        prop_assert!(iban::is_well_formed_iban(&value));
    }

    #[test]
    fn prop_single_digit_substitution_detected(
        value in iban_strategy(),
        position in 2usize..18,
        delta in 1u32..10,
    ) {
        let chars: Vec<char> = value.chars().collect();
        prop_assume!(chars[position].is_ascii_digit());

        let digit = chars[position].to_digit(10).unwrap();
        let replaced = std::char::from_digit((digit + delta) % 10, 10).unwrap();
        let mut perturbed = chars.clone();
        perturbed[position] = replaced;
        let perturbed: String = perturbed.into_iter().collect();

        prop_assert!(!iban::is_valid_iban(&perturbed));
    }

    #[test]
    fn prop_readable_round_trip(input in "[A-Za-z0-9 ._-]{0,40}") {
        let readable = iban::format_readable(&input);
        prop_assert_eq!(
            iban::strip_non_alphanumeric(&readable),
            iban::strip_non_alphanumeric(&input)
        );
        prop_assert!(readable.split(' ').all(|chunk| chunk.chars().count() <= 4));
    }
}
