use hotel_dashboard::models::{CountrySeriesEntry, DashboardSnapshot};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const DATASET: &str = "\
hotel,arrival_date_year,arrival_date_month,arrival_date_day_of_month,adults,children,babies,country
Resort Hotel,2015,July,1,2,1,0,PRT
City Hotel,2015,July,1,1,0,0,FRA
City Hotel,2015,July,2,N/A,0,0,GBR
Resort Hotel,2015,June,31,2,0,0,ESP
Resort Hotel,2015,June,10,2,2,0,PRT
";

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

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));
static MISSING_DATASET_SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> =
    Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        let Ok(pids) = PIDS.lock() else {
            return;
        };
        for &pid in pids.iter().filter(|pid| **pid > 0) {
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

fn temp_dataset_path() -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "hotel_dashboard_http_{}_{}.csv",
        std::process::id(),
        nanos
    ));
    path
}

fn write_dataset() -> String {
    let path = temp_dataset_path();
    std::fs::write(&path, DATASET).expect("write dataset");
    path.to_string_lossy().to_string()
}

fn missing_dataset() -> String {
    let mut path = temp_dataset_path();
    path.set_extension("missing.csv");
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/dashboard")).send().await {
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

async fn spawn_server(dataset_path: String) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_hotel_dashboard"))
        .env("PORT", port.to_string())
        .env("APP_DATASET_PATH", dataset_path)
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
    let server = Arc::new(spawn_server(write_dataset()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn missing_dataset_server() -> Arc<TestServer> {
    let mut guard = MISSING_DATASET_SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(missing_dataset()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn dashboard(server: &TestServer, query: &str) -> DashboardSnapshot {
    let body = Client::new()
        .get(format!("{}/api/dashboard{query}", server.base_url))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .text()
        .await
        .unwrap();
    serde_json::from_str(&body).expect("dashboard snapshot json")
}

fn entry(country: &str, total_visitors: u64) -> CountrySeriesEntry {
    CountrySeriesEntry {
        country: country.to_string(),
        total_visitors,
    }
}

#[tokio::test]
async fn http_dashboard_aggregates_single_day() {
    let server = shared_server().await;
    let snapshot = dashboard(&server, "?start=2015-07-01&end=2015-07-01").await;

    assert_eq!(snapshot.record_count, 2);
    assert_eq!(snapshot.daily.len(), 1);
    assert_eq!(snapshot.daily[0].date, "2015-07-01");
    assert_eq!(snapshot.daily[0].timestamp, 1_435_708_800_000);
    assert_eq!(snapshot.daily[0].total_visitors, 4);
    assert_eq!(snapshot.countries, vec![entry("PRT", 3), entry("FRA", 1)]);
    assert_eq!(snapshot.adults, vec![2, 1]);
    assert_eq!(snapshot.children, vec![1, 0]);
}

#[tokio::test]
async fn http_dashboard_defaults_to_initial_range() {
    let server = shared_server().await;
    let snapshot = dashboard(&server, "").await;

    assert_eq!(snapshot.start, "2015-03-01");
    assert_eq!(snapshot.end, "2015-07-31");
    // the 31 June row is not a calendar date
    assert_eq!(snapshot.record_count, 4);

    let days: Vec<(&str, u64)> = snapshot
        .daily
        .iter()
        .map(|point| (point.date.as_str(), point.total_visitors))
        .collect();
    assert_eq!(
        days,
        vec![("2015-06-10", 4), ("2015-07-01", 4), ("2015-07-02", 0)]
    );
    assert_eq!(
        snapshot.countries,
        vec![entry("PRT", 7), entry("FRA", 1), entry("GBR", 0)]
    );
}

#[tokio::test]
async fn http_dashboard_empty_ranges() {
    let server = shared_server().await;

    let outside = dashboard(&server, "?start=2016-01-01&end=2016-12-31").await;
    assert_eq!(outside.record_count, 0);
    assert!(outside.daily.is_empty());
    assert!(outside.countries.is_empty());

    let inverted = dashboard(&server, "?start=2015-07-31&end=2015-03-01").await;
    assert_eq!(inverted.record_count, 0);
    assert!(inverted.daily.is_empty());
    assert!(inverted.countries.is_empty());
}

#[tokio::test]
async fn http_dashboard_rejects_malformed_dates() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!(
            "{}/api/dashboard?start=07/01/2015&end=2015-07-31",
            server.base_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("start"));
}

#[tokio::test]
async fn http_serves_raw_dataset() {
    let server = shared_server().await;
    let response = Client::new()
        .get(format!("{}/hotel_bookings_1000.csv", server.base_url))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));
    assert_eq!(response.text().await.unwrap(), DATASET);
}

#[tokio::test]
async fn http_index_renders_dashboard() {
    let server = shared_server().await;
    let body = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Hotel Bookings Dashboard"));
    assert!(body.contains("value=\"2015-06-01\""));
}

#[tokio::test]
async fn http_allows_cross_origin_requests() {
    let server = shared_server().await;
    let client = Client::new();

    for path in ["/hotel_bookings_1000.csv", "/api/dashboard"] {
        let response = client
            .get(format!("{}{path}", server.base_url))
            .header(reqwest::header::ORIGIN, "http://localhost:3000")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let allow_origin = response
            .headers()
            .get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        assert_eq!(allow_origin.as_deref(), Some("*"), "missing CORS header on {path}");
    }
}

#[tokio::test]
async fn http_missing_dataset_serves_empty_dashboard() {
    let server = missing_dataset_server().await;

    let snapshot = dashboard(&server, "").await;
    assert_eq!(snapshot.record_count, 0);
    assert!(snapshot.daily.is_empty());
    assert!(snapshot.countries.is_empty());
    assert!(snapshot.adults.is_empty());
    assert!(snapshot.children.is_empty());

    let response = Client::new()
        .get(format!("{}/hotel_bookings_1000.csv", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
