use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const FIXED_TODAY: &str = "2026-10-19";

#[derive(Debug, Deserialize)]
struct Selection {
    year: String,
    month: String,
    day: String,
}

#[derive(Debug, Deserialize)]
struct Bounds {
    year_range: u32,
    month_range: u32,
    day_range: u32,
}

#[derive(Debug, Deserialize)]
struct OptionLists {
    years: Vec<i32>,
    months: Vec<u32>,
    days: Vec<u32>,
    day_disabled: bool,
}

#[derive(Debug, Deserialize)]
struct PickerResponse {
    selection: Selection,
    bounds: Bounds,
    options: OptionLists,
    birth_date: Option<String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/healthz")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_birth_song"))
        .env("PORT", port.to_string())
        .env("APP_FIXED_TODAY", FIXED_TODAY)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn change(
    client: &Client,
    server: &TestServer,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(format!("{}/api/picker", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_seeded_picker_fills_fields() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let picker: PickerResponse = client
        .get(format!("{}/api/picker?date=1990-07-15", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(picker.selection.year, "1990");
    assert_eq!(picker.selection.month, "7");
    assert_eq!(picker.selection.day, "15");
    assert_eq!(picker.bounds.year_range, 46);
    assert_eq!(picker.bounds.day_range, 31);
    assert_eq!(picker.options.years.first(), Some(&2026));
    assert_eq!(picker.options.days.len(), 31);
    assert!(!picker.options.day_disabled);
    assert_eq!(picker.birth_date, None);
}

#[tokio::test]
async fn http_invalid_seed_leaves_picker_empty() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let picker: PickerResponse = client
        .get(format!("{}/api/picker?date=someday", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(picker.selection.year, "");
    assert_eq!(picker.selection.month, "");
    assert_eq!(picker.selection.day, "");
    assert_eq!(picker.bounds.month_range, 12);
    assert!(picker.options.day_disabled);
    assert!(picker.options.days.is_empty());
}

#[tokio::test]
async fn http_day_change_reports_birth_date() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let invalid: PickerResponse = change(
        &client,
        &server,
        serde_json::json!({
            "selection": { "year": "2024", "month": "2", "day": "" },
            "change": { "field": "day", "value": "30" }
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(invalid.selection.day, "30");
    assert_eq!(invalid.bounds.day_range, 29);
    assert_eq!(invalid.birth_date, None);

    let valid: PickerResponse = change(
        &client,
        &server,
        serde_json::json!({
            "selection": { "year": "2024", "month": "2", "day": "30" },
            "change": { "field": "day", "value": "29" }
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(valid.birth_date.as_deref(), Some("2024-2-29"));
}

#[tokio::test]
async fn http_current_year_clears_future_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let picker: PickerResponse = change(
        &client,
        &server,
        serde_json::json!({
            "selection": { "year": "2025", "month": "11", "day": "3" },
            "change": { "field": "year", "value": "2026" }
        }),
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(picker.selection.year, "2026");
    assert_eq!(picker.selection.month, "");
    assert_eq!(picker.bounds.month_range, 9);
    assert_eq!(picker.options.months.len(), 9);
    assert!(picker.options.day_disabled);
    assert_eq!(picker.birth_date, None);
}

#[tokio::test]
async fn http_malformed_change_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = change(
        &client,
        &server,
        serde_json::json!({ "change": { "field": "hour", "value": "3" } }),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn http_index_renders_seeded_picker() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/?date=1990-07-15", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();

    assert!(html.contains(r#"<option value="1990" selected>1990</option>"#));
    assert!(html.contains(r#"<option value="15" selected>15</option>"#));
    assert!(html.contains("1위 노래 찾기"));
    assert!(html.contains(r#"선택한 날짜: <a href="/?date=1990-7-15">1990-7-15</a>"#));
}

#[tokio::test]
async fn http_consecutive_changes_keep_earlier_fields() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let after_year: PickerResponse = change(
        &client,
        &server,
        serde_json::json!({
            "selection": { "year": "", "month": "", "day": "" },
            "change": { "field": "year", "value": "1990" }
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(after_year.selection.year, "1990");

    let after_month: PickerResponse = change(
        &client,
        &server,
        serde_json::json!({
            "selection": {
                "year": after_year.selection.year,
                "month": after_year.selection.month,
                "day": after_year.selection.day
            },
            "change": { "field": "month", "value": "7" }
        }),
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(after_month.selection.year, "1990");
    assert_eq!(after_month.selection.month, "7");
    assert!(!after_month.options.day_disabled);
    assert_eq!(after_month.bounds.day_range, 31);
}
