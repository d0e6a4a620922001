use std::process::Output;

use assert_cmd::Command;
use cms_testkit::FakeCmsApi;
use serde_json::{json, Value};
use tempfile::TempDir;

struct Harness {
    api: FakeCmsApi,
    dir: TempDir,
}

impl Harness {
    async fn new() -> Self {
        Self {
            api: FakeCmsApi::spawn().await.unwrap(),
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn cms(&self) -> Command {
        let mut cmd = Command::cargo_bin("cms").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("CMS_ENV")
            .env("CMS_CONFIG_DIR", self.dir.path())
            .env("CMS_STORAGE__PATH", self.dir.path().join("state.json"))
            .env("CMS_API__BASE_URL", self.api.base_url())
            .env("RUST_LOG", "warn");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.cms().args(args).output().unwrap()
    }

    fn login(&self) {
        self.cms()
            .args(["login", "--email", "ops@cms.test"])
            .assert()
            .success();
    }
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test(flavor = "multi_thread")]
async fn status_reports_signed_out_session() {
    let h = Harness::new().await;

    let output = h.run(&["status"]);
    assert!(output.status.success());
    let status = stdout_json(&output);
    assert_eq!(status["authenticated"], json!(false));
    assert_eq!(status["theme"], json!("light"));
    assert_eq!(status["api"], json!(h.api.base_url()));
}

#[tokio::test(flavor = "multi_thread")]
async fn resource_commands_require_login() {
    let h = Harness::new().await;

    let output = h.run(&["users", "list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not signed in"));
    assert!(h.api.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn open_while_signed_out_lands_on_login() {
    let h = Harness::new().await;

    let opened = stdout_json(&h.run(&["open", "/admin/media"]));
    assert_eq!(opened["path"], json!("/login"));
    assert_eq!(opened["redirected"], json!(true));
    assert_eq!(opened["title"], json!("Sign in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn user_lifecycle_after_login() {
    let h = Harness::new().await;

    let output = h.run(&["login", "--email", "ops@cms.test"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["path"], json!("/admin"));

    let output = h.run(&[
        "users",
        "create",
        "--data",
        r#"{"email":"new@cms.test","name":"New","password":"hunter2"}"#,
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("User created successfully!"));
    let created = stdout_json(&output);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(
        h.api.last_request().unwrap().authorization.as_deref(),
        Some("Bearer demo-token-ops@cms.test")
    );

    let output = h.run(&["users", "update", &id.to_string(), "--data", r#"{"name":"Renamed"}"#]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout_json(&output)["name"], json!("Renamed"));
    assert_eq!(stdout_json(&output)["email"], json!("new@cms.test"));

    let listed = stdout_json(&h.run(&["users", "list"]));
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let output = h.run(&["users", "delete", &id.to_string(), "--yes"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), json!({ "deleted": id }));
    assert!(h.api.records("users").is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_email_is_rejected_before_any_request() {
    let h = Harness::new().await;
    h.login();

    let output = h.run(&["users", "create", "--data", r#"{"email":"not-an-email"}"#]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("email: Email is invalid"));
    assert!(h.api.requests().iter().all(|r| r.method != "POST"));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_reported_on_the_field() {
    let h = Harness::new().await;
    h.api.seed("users", json!({ "email": "taken@cms.test" }));
    h.login();

    let output = h.run(&["users", "create", "--data", r#"{"email":"taken@cms.test"}"#]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("email: Email already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn declined_delete_sends_no_request() {
    let h = Harness::new().await;
    let id = h.api.seed("tags", json!({ "name": "rust" }));
    h.login();

    let output = h
        .cms()
        .args(["tags", "delete", &id.to_string()])
        .write_stdin("n\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stderr(&output).contains("Delete tag? [y/N]"));
    assert!(stderr(&output).contains("Cancelled"));
    assert!(h.api.requests().iter().all(|r| r.method != "DELETE"));
    assert_eq!(h.api.records("tags").len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_window_is_forwarded() {
    let h = Harness::new().await;
    for name in ["a", "b", "c"] {
        h.api.seed("categories", json!({ "name": name }));
    }
    h.login();

    let listed = stdout_json(&h.run(&["categories", "list", "--skip", "1", "--limit", "1"]));
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], json!("b"));
    assert_eq!(
        h.api.last_request().unwrap().query.as_deref(),
        Some("skip=1&limit=1")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn media_upload_from_disk() {
    let h = Harness::new().await;
    h.login();
    let file = h.dir.path().join("logo.png");
    std::fs::write(&file, [0x89, b'P', b'N', b'G']).unwrap();

    let output = h.run(&["media", "upload", file.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let media = stdout_json(&output);
    assert_eq!(media["url"], json!("/uploads/logo.png"));
    assert_eq!(media["mime_type"], json!("image/png"));
    assert!(stderr(&output).contains("Upload successful"));
}

#[tokio::test(flavor = "multi_thread")]
async fn theme_toggle_persists() {
    let h = Harness::new().await;

    let toggled = stdout_json(&h.run(&["theme", "toggle"]));
    assert_eq!(toggled["theme"], json!("dark"));

    let shown = stdout_json(&h.run(&["theme"]));
    assert_eq!(shown["theme"], json!("dark"));
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_locks_resource_commands_again() {
    let h = Harness::new().await;
    h.login();
    h.cms().args(["roles", "list"]).assert().success();

    h.cms().arg("logout").assert().success();
    let output = h.run(&["roles", "list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not signed in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn token_login_is_sent_verbatim() {
    let h = Harness::new().await;
    h.cms()
        .args(["login", "--token", "issued-elsewhere"])
        .assert()
        .success();

    h.cms().args(["media", "list"]).assert().success();
    assert_eq!(
        h.api.last_request().unwrap().authorization.as_deref(),
        Some("Bearer issued-elsewhere")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn resources_lists_every_kind() {
    let h = Harness::new().await;

    let kinds = stdout_json(&h.run(&["resources"]));
    let names: Vec<&str> = kinds
        .as_array()
        .unwrap()
        .iter()
        .map(|kind| kind["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["categories", "content", "media", "roles", "tags", "users"]
    );
}
