// Integration tests for the `pressroom` binary: stdout shape and exit codes.
//
// Every invocation gets its own config directory so the user's settings
// and keys never leak in.

use std::path::Path;
use std::process::{Command, Output};

use httpmock::prelude::*;

const EXIT_USAGE: i32 = 2;
const EXIT_ARTICLE_PARSE: i32 = 4;
const EXIT_SCRIPT: i32 = 5;
const EXIT_AI_DISABLED: i32 = 10;
const EXIT_AI_MISSING_KEY: i32 = 11;
const EXIT_AI_PROVIDER: i32 = 13;
const EXIT_AI_FORMAT: i32 = 14;

fn pressroom(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pressroom"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("PRESSROOM_GEMINI_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_settings(home: &Path, json: &str) {
    let dir = home.join(".config").join("pressroom");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("settings.json"), json).unwrap();
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "exit code: {:?}\nstderr: {}",
        output.status, String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("stdout must be valid JSON: {}\n{}", e, stdout))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn article_text() -> String {
    let edition: serde_json::Value =
        serde_json::from_str(include_str!("fixtures/edition.json")).unwrap();
    edition["data"].to_string()
}

// ===========================================================================
// pressroom canvas
// ===========================================================================

#[test]
fn canvas_script_prints_blocks() {
    let home = tempfile::tempdir().unwrap();
    let output = pressroom(home.path())
        .args(["canvas", "tests/fixtures/layout.canvas"])
        .output()
        .unwrap();

    let blocks = stdout_json(&output);
    let blocks = blocks.as_array().unwrap();
    assert_eq!(blocks.len(), 3);

    // Headline: edited, and the drag after `lock` did nothing
    assert_eq!(blocks[0]["content"]["type"], "headline");
    assert_eq!(blocks[0]["content"]["data"], "Mirrorless Titans Clash");
    assert_eq!(blocks[0]["position"]["x"].as_f64(), Some(50.0));

    // Text: dragged by (+30, -20)
    assert_eq!(blocks[1]["position"]["x"].as_f64(), Some(80.0));
    assert_eq!(blocks[1]["position"]["y"].as_f64(), Some(130.0));
    assert_eq!(blocks[1]["position"]["w"].as_f64(), Some(450.0));

    // Product: resized to the minimums, pros split on every newline
    assert_eq!(blocks[2]["position"]["w"].as_f64(), Some(100.0));
    assert_eq!(blocks[2]["position"]["h"].as_f64(), Some(50.0));
    assert_eq!(blocks[2]["content"]["data"]["pros"], serde_json::json!(["Fast", "Cheap", ""]));
    assert_eq!(blocks[2]["content"]["data"]["name"], "Sony A7IV");
}

#[test]
fn canvas_render_hides_controls_when_locked() {
    let home = tempfile::tempdir().unwrap();
    let output = pressroom(home.path())
        .args(["canvas", "tests/fixtures/layout.canvas", "--render"])
        .output()
        .unwrap();

    let views = stdout_json(&output);
    for view in views.as_array().unwrap() {
        assert!(view["controls"].is_null(), "locked canvas shows no controls: {}", view);
    }
    assert_eq!(views[2]["body"]["kind"], "product_card");
}

#[test]
fn canvas_script_from_stdin() {
    use std::io::Write;
    use std::process::Stdio;

    let home = tempfile::tempdir().unwrap();
    let mut child = pressroom(home.path())
        .args(["canvas", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"add text\nadd headline\ndelete #1\n").unwrap();
    let output = child.wait_with_output().unwrap();

    let blocks = stdout_json(&output);
    assert_eq!(blocks.as_array().unwrap().len(), 1);
    assert_eq!(blocks[0]["content"]["data"], "New Headline");
}

#[test]
fn canvas_bad_script_exit_code() {
    let home = tempfile::tempdir().unwrap();
    let script = home.path().join("bad.canvas");
    std::fs::write(&script, "add text\nspin story 90\n").unwrap();

    let output = pressroom(home.path()).arg("canvas").arg(&script).output().unwrap();
    assert_eq!(output.status.code(), Some(EXIT_SCRIPT));
    assert!(stderr(&output).contains("line 2: unknown command \"spin\""));
}

// ===========================================================================
// pressroom preview
// ===========================================================================

#[test]
fn preview_prints_page() {
    let home = tempfile::tempdir().unwrap();
    let output = pressroom(home.path())
        .args(["preview", "tests/fixtures/edition.json", "--width", "80"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let page = String::from_utf8_lossy(&output.stdout);
    assert!(page.contains("MIRRORLESS TITANS CLASH"));
    assert!(page.contains("SONY A7IV"));
    assert!(page.contains("CANON R6II"));
    assert!(page.contains("THE VERDICT"));
    assert!(page.contains("[1] dpreview.com"));
}

#[test]
fn preview_accepts_bare_article() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("article.json");
    std::fs::write(&path, article_text()).unwrap();

    let output = pressroom(home.path()).arg("preview").arg(&path).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Sources"));
}

#[test]
fn preview_rejects_non_article() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("junk.json");
    std::fs::write(&path, r#"{"title": "half an article"}"#).unwrap();

    let output = pressroom(home.path()).arg("preview").arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(EXIT_ARTICLE_PARSE));
}

// ===========================================================================
// pressroom generate
// ===========================================================================

fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "groundingMetadata": { "groundingChunks": [
                { "web": { "title": "rtings.com", "uri": "https://www.rtings.com/camera" } }
            ]}
        }]
    })
}

fn point_at(home: &Path, server: &MockServer) {
    write_settings(home, &format!(
        "{{\n  // test server\n  \"ai\": {{ \"provider\": \"gemini\", \"endpoint\": \"{}\", \"timeout_secs\": 5 }}\n}}",
        server.base_url()
    ));
}

#[test]
fn generate_json_contract() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-3-flash-preview:generateContent")
            .header("x-goog-api-key", "test-key");
        then.status(200).json_body(gemini_reply(&article_text()));
    });
    point_at(home.path(), &server);

    let output = pressroom(home.path())
        .env("PRESSROOM_GEMINI_KEY", "test-key")
        .args(["generate", "Sony A7IV", "Canon R6II", "--json"])
        .output()
        .unwrap();

    mock.assert();
    let edition = stdout_json(&output);
    assert_eq!(edition["data"]["title"], "Mirrorless Titans Clash");
    assert_eq!(edition["data"]["productB"]["name"], "Canon R6II");
    assert_eq!(edition["sources"][0]["uri"], "https://www.rtings.com/camera");
}

#[test]
fn generate_page_output() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(gemini_reply(&article_text()));
    });
    point_at(home.path(), &server);

    let output = pressroom(home.path())
        .env("API_KEY", "fallback-key")
        .args(["generate", "Sony A7IV", "Canon R6II"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("[1] rtings.com"));
}

#[test]
fn generate_unreadable_output() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(gemini_reply("no json here"));
    });
    point_at(home.path(), &server);

    let output = pressroom(home.path())
        .env("PRESSROOM_GEMINI_KEY", "test-key")
        .args(["generate", "A", "B"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(EXIT_AI_FORMAT));
    assert!(stderr(&output).contains("The review could not be formatted properly. Please try again."));
    assert!(output.stdout.is_empty());
}

#[test]
fn generate_provider_error() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST);
        then.status(400).json_body(serde_json::json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        }));
    });
    point_at(home.path(), &server);

    let output = pressroom(home.path())
        .env("PRESSROOM_GEMINI_KEY", "bad-key")
        .args(["generate", "A", "B"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(EXIT_AI_PROVIDER));
    assert!(stderr(&output).contains("error: API key not valid"));
}

#[test]
fn generate_without_key() {
    let home = tempfile::tempdir().unwrap();
    write_settings(home.path(), r#"{ "ai": { "endpoint": "http://127.0.0.1:9" } }"#);

    let output = pressroom(home.path()).args(["generate", "A", "B"]).output().unwrap();
    // A key in the real system keychain would make this test meaningless
    if output.status.code() != Some(EXIT_AI_MISSING_KEY) {
        assert!(stderr(&output).contains("error:"));
        return;
    }
    assert!(stderr(&output).contains("PRESSROOM_GEMINI_KEY"));
}

#[test]
fn generate_disabled_provider() {
    let home = tempfile::tempdir().unwrap();
    write_settings(home.path(), r#"{ "ai": { "provider": "none" } }"#);

    let output = pressroom(home.path()).args(["generate", "A", "B"]).output().unwrap();
    assert_eq!(output.status.code(), Some(EXIT_AI_DISABLED));
}

#[test]
fn generate_blank_names_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = pressroom(home.path()).args(["generate", "  ", "Canon R6II"]).output().unwrap();
    assert_eq!(output.status.code(), Some(EXIT_USAGE));
}

// ===========================================================================
// pressroom doctor
// ===========================================================================

#[test]
fn doctor_json_shape() {
    let home = tempfile::tempdir().unwrap();
    write_settings(home.path(), r#"{ "ai": { "model": "gemini-2.5-pro", "grounding": false } }"#);

    let output = pressroom(home.path())
        .env("PRESSROOM_GEMINI_KEY", "test-key")
        .args(["doctor", "--json"])
        .output()
        .unwrap();

    let diag = stdout_json(&output);
    assert_eq!(diag["schema_version"], 1);
    assert_eq!(diag["provider"], "gemini");
    assert_eq!(diag["model"], "gemini-2.5-pro");
    assert_eq!(diag["grounding"], false);
    assert_eq!(diag["key"], "present");
    assert_eq!(diag["status"], "ready");
}

#[test]
fn doctor_creates_default_settings() {
    let home = tempfile::tempdir().unwrap();
    let output = pressroom(home.path()).arg("doctor").output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("AI Configuration"));
}
