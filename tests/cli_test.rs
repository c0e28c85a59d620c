use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const NO_AMOUNT: &str =
    "00020101021129370016A000000677010111011300668123456785802TH530376463045D82";
const WITH_AMOUNT: &str =
    "00020101021129370016A000000677010111011300668123456785802TH53037645406150.0063046C6D";

fn shopqr() -> Command {
    let mut cmd = Command::new(cargo_bin!("shopqr"));
    cmd.env_remove("SHOPQR_MODE")
        .env_remove("SHOPQR_PAYEE")
        .env_remove("SHOPQR_DATA_DIR")
        .env_remove("SHOPQR_DB_PATH");
    cmd
}

#[test]
fn test_cli_encode_without_amount() -> Result<(), Box<dyn std::error::Error>> {
    shopqr()
        .args(["encode", "0812345678"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", NO_AMOUNT)));
    Ok(())
}

#[test]
fn test_cli_encode_with_amount() {
    shopqr()
        .args(["encode", "081-234-5678", "--amount", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains(WITH_AMOUNT));
}

#[test]
fn test_cli_payee_from_environment() {
    shopqr()
        .env("SHOPQR_PAYEE", "0812345678")
        .arg("encode")
        .assert()
        .success()
        .stdout(predicate::str::contains(NO_AMOUNT));
}

#[test]
fn test_cli_encode_requires_payee() {
    shopqr()
        .arg("encode")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Payee identifier is empty"));
}

#[test]
fn test_cli_negative_amount_by_mode() {
    shopqr()
        .args(["encode", "0812345678", "--amount", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    shopqr()
        .args(["--mode", "legacy", "encode", "0812345678", "--amount", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5405-5.00"));
}

#[test]
fn test_cli_strict_mode_from_environment() {
    shopqr()
        .env("SHOPQR_MODE", "strict")
        .args(["encode", "1234567890123456"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed payee identifier"));
}

#[test]
fn test_cli_encode_draws_qr() {
    shopqr()
        .args(["encode", "0812345678", "--qr"])
        .assert()
        .success()
        .stdout(predicate::str::contains(NO_AMOUNT))
        .stdout(predicate::str::contains("█"));
}

#[test]
fn test_cli_verify() {
    shopqr()
        .args(["verify", WITH_AMOUNT])
        .assert()
        .success()
        .stdout(predicate::str::contains("payee_sub_tag,payee,amount,checksum"))
        .stdout(predicate::str::contains("01,0066812345678,150.00,6C6D"));
}

#[test]
fn test_cli_verify_rejects_tampered_payload() {
    let tampered = WITH_AMOUNT.replace("150.00", "15.000");
    shopqr()
        .args(["verify", &tampered])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Checksum mismatch"));
}

#[test]
fn test_cli_national_id_under_payee_sub_tag() {
    shopqr()
        .args(["encode", "1234567890123"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "00020101021129370016A000000677010111011312345678901235802TH530376463046A05\n",
        ));
}

#[test]
fn test_cli_rejects_amount_too_large_for_two_decimals() {
    shopqr()
        .args(["encode", "0812345678", "--amount", "1e27"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn test_cli_rejects_non_ascii_payee() {
    shopqr()
        .args(["encode", "ร้านฟิว"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed payee identifier"));
}
