use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

/// Run the `chamber` binary and capture stdout and the exit code
fn run_chamber(args: &[&str]) -> (String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_chamber"))
        .args(args)
        .env_remove("CHAMBER_DATA")
        .env_remove("CHAMBER_CONFIG")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute chamber");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (stdout, output.status.code().unwrap_or(-1))
}

fn member_file(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", document).unwrap();
    file
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

#[test]
fn test_directory_json_output() {
    let file = member_file(&json!({ "members": [
        {"name": "Desert Bloom", "membership": 3, "website": "bloom.example"},
        {"name": "Red Rock", "membership": 1}
    ]}));

    let (stdout, code) = run_chamber(&[
        "directory",
        "--source",
        path_str(file.path()),
        "--layout",
        "list",
        "--json",
    ]);
    assert_eq!(code, 0);

    let tree: Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(tree["tag"], "div");
    let attrs = tree["attrs"].as_array().unwrap();
    assert!(attrs.contains(&json!(["class", "list-view"])));
    assert_eq!(tree["children"].as_array().unwrap().len(), 2);
}

#[test]
fn test_directory_failure_json_snapshot() {
    let (stdout, code) = run_chamber(&[
        "directory",
        "--source",
        "no/such/members.json",
        "--layout",
        "list",
        "--json",
    ]);
    assert_eq!(code, 0);

    insta::assert_snapshot!(stdout.trim_end(), @r#"
    {
      "tag": "div",
      "attrs": [
        [
          "id",
          "membersContainer"
        ],
        [
          "class",
          "list-view"
        ]
      ],
      "children": [
        {
          "element": {
            "tag": "p",
            "attrs": [
              [
                "class",
                "error-message"
              ],
              [
                "role",
                "alert"
              ]
            ],
            "children": [
              {
                "text": "Unable to load the member directory. Please try again later."
              }
            ]
          }
        }
      ]
    }
    "#);
}

#[test]
fn test_seeded_spotlight_snapshot() {
    let file = member_file(&json!([
        {
            "name": "Solo Cafe",
            "description": "Coffee",
            "address": "1 Main St",
            "phone": "7025550100",
            "website": "solo.example",
            "image": "solo.png",
            "membership": 3
        },
        {"name": "Corner Shop", "membership": 1}
    ]));

    let (stdout, code) = run_chamber(&["spotlight", "--source", path_str(file.path()), "--seed", "5"]);
    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout.trim_end(), @r#"<div id="spotlightContainer"><article class="spotlight-card" role="article" aria-labelledby="spotlight-title-0" data-delay-ms="0"><div class="spotlight-header"><img src="images/solo.png" alt="Solo Cafe logo" loading="lazy" data-fallback="images/placeholder-logo.jpg" onerror="this.onerror=null;this.src=&#039;images/placeholder-logo.jpg&#039;;this.alt=&#039;Solo Cafe - logo not available&#039;;"><div class="membership level-3" role="text" aria-label="Gold membership level">Gold Member</div></div><div class="spotlight-content"><h3 id="spotlight-title-0">Solo Cafe</h3><p id="spotlight-desc-0" class="member-description">Coffee</p><div class="contact-info"><p class="address"><span aria-label="Address">📍</span> <span>1 Main St</span></p><p class="phone"><span aria-label="Phone number">📞</span> <a href="tel:7025550100" aria-label="Call Solo Cafe">(702) 555-0100</a></p><a href="https://solo.example" target="_blank" rel="noopener noreferrer" class="website-link" aria-label="Visit Solo Cafe website (opens in new tab)"><span aria-hidden="true">🌐</span> Visit Website</a></div></div></article></div>"#);
}

#[test]
fn test_spotlight_failure_still_renders() {
    let (stdout, code) = run_chamber(&["spotlight", "--source", "no/such/members.json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("error-message"));
    assert!(stdout.contains(r#"id="spotlightRetry""#));
}

#[test]
fn test_spotlight_seed_is_reproducible() {
    let file = member_file(&json!([
        {"name": "A", "membership": 2},
        {"name": "B", "membership": 3},
        {"name": "C", "membership": 2},
        {"name": "D", "membership": 3}
    ]));
    let args = ["spotlight", "--source", path_str(file.path()), "--seed", "9"];

    let (first, _) = run_chamber(&args);
    let (second, _) = run_chamber(&args);
    assert_eq!(first, second);
    assert_eq!(first.matches("spotlight-card").count(), 3);
}

#[test]
fn test_page_written_to_file() {
    let file = member_file(&json!([{"name": "Solo", "membership": 3}]));
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("index.html");

    let (_, code) = run_chamber(&[
        "page",
        "--source",
        path_str(file.path()),
        "--output",
        path_str(&target),
    ]);
    assert_eq!(code, 0);

    let html = std::fs::read_to_string(&target).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Solo"));
}
