use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture to be written");
    path
}

#[test]
fn renders_markdown_to_html() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "message.md", "hello **world**");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg(&input).arg("--to").arg("html");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<p>hello <b>world</b></p>"));
}

#[test]
fn dialect_flag_selects_the_chat_grammar() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "message.md", "**bold** and ||secret||");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg(&input)
        .arg("--to")
        .arg("html")
        .arg("--dialect")
        .arg("chat");

    let output_pred = predicate::str::contains("<b>bold</b>")
        .and(predicate::str::contains(
            "<span data-entity-type=\"spoiler\">secret</span>",
        ))
        .and(predicate::str::contains("<p>").not());

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn dumps_the_ast_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "message.md", "# Title\n");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg(&input).arg("--to").arg("ast");

    let output_pred = predicate::str::contains("\"kind\": \"Heading\"")
        .and(predicate::str::contains("\"level\": 1"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn converts_html_to_markdown() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.html", "<b>bold</b> <i>it</i>");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg(&input).arg("--to").arg("markdown");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("**bold** __it__"));
}

#[test]
fn writes_output_to_a_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "message.md", "plain");
    let output = dir.path().join("out.html");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg(&input)
        .arg("--to")
        .arg("html")
        .arg("-o")
        .arg(&output);

    cmd.assert().success();
    let written = fs::read_to_string(&output).expect("output file to exist");
    assert_eq!(written, "<p>plain</p>");
}

#[test]
fn config_file_controls_rendering() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "message.md", "![alt](pic.png)");
    let config = write_input(&dir, "custom.toml", "[render]\ninline_images = false\n");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg(&input)
        .arg("--to")
        .arg("html")
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<a href=\"pic.png\">alt</a>"));
}

#[test]
fn missing_target_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "message.md", "plain");

    let mut cmd = cargo_bin_cmd!("chatmark");
    cmd.arg(&input);

    cmd.assert().failure();
}
