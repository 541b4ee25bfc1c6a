use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn sheetexport() -> Command {
    Command::cargo_bin("sheetexport").unwrap()
}

#[test]
fn writes_xml_and_prints_headers() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("products.csv");
    let output = dir.path().join("out.xml");
    fs::write(&input, "\"製品名\",\"価格\"\r\n\"PC\",150000\r\n\"01-TEST\",100\r\n").unwrap();

    sheetexport()
        .arg(&input)
        .args(["--format", "xml", "--header", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Content-Type: application/vnd.ms-excel"))
        .stdout(predicate::str::contains(
            "filename=\"products.xml\"; filename*=UTF-8''products.xml",
        ));

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<Cell><Data ss:Type=\"Number\">150000</Data></Cell>"));
    assert!(xml.contains("<Cell ss:StyleID=\"Header\"><Data ss:Type=\"String\">製品名</Data></Cell>"));
}

#[test]
fn csv_to_stdout_starts_with_bom() {
    sheetexport()
        .args(["-", "--format", "csv"])
        .write_stdin("a,b\n\"x,y\",00123\n")
        .assert()
        .success()
        .stdout(predicate::eq(&b"\xEF\xBB\xBFa,b\r\n\"x,y\",00123\r\n"[..]))
        .stderr(predicate::str::contains("Content-Type: text/csv; charset=UTF-8"));
}

#[test]
fn legacy_user_agent_gets_plain_filename() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.xls");
    fs::write(&input, "a\n1\n").unwrap();

    sheetexport()
        .arg(&input)
        .args(["--format", "html", "--filename", "一覧", "--headers-json"])
        .args(["--user-agent", "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1)"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"content_disposition\": \"attachment; filename=\\\"%E4%B8%80%E8%A6%A7.xls\\\"\""))
        .stdout(predicate::str::contains("filename*").not());
}

#[test]
fn empty_input_exits_one_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.csv");
    let output = dir.path().join("out.xml");
    fs::write(&input, "\r\n\r\n").unwrap();

    sheetexport()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());

    assert!(!output.exists());
}

#[test]
fn missing_file_exits_two() {
    sheetexport()
        .arg("/nonexistent/input.csv")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to open file"));
}
