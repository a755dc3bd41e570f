use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct WorkoutJson {
    id: String,
    is_active: bool,
    total_sets: u32,
    duration: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointJson {
    date: String,
    avg_weight: f64,
    max_weight: f64,
    total_sets: u32,
    total_reps: i64,
}

#[derive(Debug, Deserialize)]
struct SummaryJson {
    personal_record: f64,
    sessions: usize,
}

#[derive(Debug, Deserialize)]
struct StatsJson {
    exercise: String,
    to: String,
    points: Vec<PointJson>,
    summary: Option<SummaryJson>,
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("workout_stats_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/workouts")).send().await {
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
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_workout_stats"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
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

async fn start_workout(client: &Client, base_url: &str) -> serde_json::Value {
    let response = client
        .post(format!("{base_url}/api/workouts"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_logged_workout_shows_up_in_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let workout = start_workout(&client, &server.base_url).await;
    let id = workout["id"].as_str().unwrap().to_string();

    let mut workout: serde_json::Value = client
        .post(format!("{}/api/workouts/{id}/exercises", server.base_url))
        .json(&serde_json::json!({ "name": "HttpPress" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // The seeded empty set stays and must not count toward stats.
    let sets = workout["exercises"][0]["sets"].as_array_mut().unwrap();
    sets.push(serde_json::json!({ "weight": 100, "reps": 5 }));
    sets.push(serde_json::json!({ "weight": 115, "reps": 3 }));

    let updated: WorkoutJson = client
        .put(format!("{}/api/workouts/{id}", server.base_url))
        .json(&workout)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.total_sets, 3);

    let ended: WorkoutJson = client
        .post(format!("{}/api/workouts/{id}/end", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!ended.is_active);
    assert_eq!(ended.id, id);
    assert!(ended.duration < 60);

    let stats: StatsJson = client
        .get(format!(
            "{}/api/stats?exercise=httppress&preset=7d",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats.exercise, "httppress");
    assert_eq!(stats.points.len(), 1);
    let point = &stats.points[0];
    assert_eq!(point.date, stats.to);
    assert_eq!(point.avg_weight, 107.5);
    assert_eq!(point.max_weight, 115.0);
    assert_eq!(point.total_sets, 2);
    assert_eq!(point.total_reps, 8);
    let summary = stats.summary.expect("summary");
    assert_eq!(summary.personal_record, 115.0);
    assert_eq!(summary.sessions, 1);

    let names: Vec<String> = client
        .get(format!("{}/api/exercises", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(names.iter().any(|name| name == "HttpPress"));
}

#[tokio::test]
async fn http_stats_without_exercise_is_empty() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let stats: StatsJson = client
        .get(format!("{}/api/stats?preset=all", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(stats.points.is_empty());
    assert!(stats.summary.is_none());
}

#[tokio::test]
async fn http_rejects_bad_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/stats?exercise=x&preset=fortnight", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("{}/api/stats?exercise=x&from=01-02-2024", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/workouts/does-not-exist/end", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_deleted_workout_is_gone() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let workout = start_workout(&client, &server.base_url).await;
    let id = workout["id"].as_str().unwrap();

    let active: Vec<WorkoutJson> = client
        .get(format!("{}/api/workouts?status=active", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(active.iter().any(|w| w.id == id));

    let response = client
        .delete(format!("{}/api/workouts/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/api/workouts/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

async fn log_sets(
    client: &Client,
    base_url: &str,
    exercise: &str,
    sets: serde_json::Value,
) -> serde_json::Value {
    let workout = start_workout(client, base_url).await;
    let id = workout["id"].as_str().unwrap().to_string();

    let mut workout: serde_json::Value = client
        .post(format!("{base_url}/api/workouts/{id}/exercises"))
        .json(&serde_json::json!({ "name": exercise }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    workout["exercises"][0]["sets"] = sets;

    client
        .put(format!("{base_url}/api/workouts/{id}"))
        .json(&workout)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn fetch_stats(client: &Client, base_url: &str, exercise: &str) -> StatsJson {
    client
        .get(format!("{base_url}/api/stats?exercise={exercise}&preset=7d"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_active_workout_stays_out_of_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let workout = log_sets(
        &client,
        &server.base_url,
        "HttpActiveRow",
        serde_json::json!([{ "weight": 70, "reps": 10 }]),
    )
    .await;
    assert_eq!(workout["is_active"], true);

    let stats = fetch_stats(&client, &server.base_url, "HttpActiveRow").await;
    assert!(stats.points.is_empty());
    assert!(stats.summary.is_none());

    let id = workout["id"].as_str().unwrap();
    let response = client
        .post(format!("{}/api/workouts/{id}/end", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let stats = fetch_stats(&client, &server.base_url, "HttpActiveRow").await;
    assert_eq!(stats.points.len(), 1);
    assert_eq!(stats.points[0].max_weight, 70.0);
}

#[tokio::test]
async fn http_stats_follow_edits() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let workout = log_sets(
        &client,
        &server.base_url,
        "HttpEditCurl",
        serde_json::json!([{ "weight": 20, "reps": 10 }]),
    )
    .await;
    let id = workout["id"].as_str().unwrap().to_string();
    let mut ended: serde_json::Value = client
        .post(format!("{}/api/workouts/{id}/end", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let stats = fetch_stats(&client, &server.base_url, "HttpEditCurl").await;
    assert_eq!(stats.points[0].max_weight, 20.0);

    ended["exercises"][0]["sets"] = serde_json::json!([{ "weight": 25, "reps": 8 }]);
    let response = client
        .put(format!("{}/api/workouts/{id}", server.base_url))
        .json(&ended)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let stats = fetch_stats(&client, &server.base_url, "HttpEditCurl").await;
    assert_eq!(stats.points.len(), 1);
    assert_eq!(stats.points[0].max_weight, 25.0);
    assert_eq!(stats.points[0].total_reps, 8);

    let response = client
        .delete(format!("{}/api/workouts/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    let stats = fetch_stats(&client, &server.base_url, "HttpEditCurl").await;
    assert!(stats.points.is_empty());
}
