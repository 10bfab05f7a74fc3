use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

const REFERENCE_PAYLOAD: &str = r#"{
    "load": 910,
    "fuels": {
        "gas(euro/MWh)": 13.4,
        "kerosine(euro/MWh)": 50.8,
        "co2(euro/ton)": 20,
        "wind(%)": 60
    },
    "powerplants": [
        {"name": "gasfiredbig1", "type": "gasfired", "efficiency": 0.53, "pmin": 100, "pmax": 460},
        {"name": "gasfiredbig2", "type": "gasfired", "efficiency": 0.53, "pmin": 100, "pmax": 460},
        {"name": "gasfiredsomewhatsmaller", "type": "gasfired", "efficiency": 0.37, "pmin": 40, "pmax": 210},
        {"name": "tj1", "type": "turbojet", "efficiency": 0.3, "pmin": 0, "pmax": 16},
        {"name": "windpark1", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 150},
        {"name": "windpark2", "type": "windturbine", "efficiency": 1, "pmin": 0, "pmax": 36}
    ]
}"#;

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn production_plan_balances_reference_fleet() {
    let port = allocate_port();
    let _child = spawn_server(port);
    wait_for_server(port, Duration::from_secs(8));

    let (status, body) =
        http_post(port, "/productionplan", REFERENCE_PAYLOAD).expect("request should succeed");
    assert_eq!(status, 200);

    let plan: Value = serde_json::from_str(&body).expect("body should be a JSON array");
    let rows = plan.as_array().expect("plan should be an array");

    let expected = [
        ("windpark1", 90.0),
        ("windpark2", 21.6),
        ("tj1", 16.0),
        ("gasfiredsomewhatsmaller", 210.0),
        ("gasfiredbig1", 460.0),
        ("gasfiredbig2", 112.4),
    ];
    assert_eq!(rows.len(), expected.len());
    for (row, (name, p)) in rows.iter().zip(expected) {
        assert_eq!(row["name"], name);
        let got = row["p"].as_f64().expect("p should be a number");
        assert!((got - p).abs() < 1e-9, "{name}: {got} != {p}");
    }

    let total: f64 = rows.iter().map(|r| r["p"].as_f64().unwrap_or(0.0)).sum();
    assert!((total - 910.0).abs() < 1e-9);
}

#[test]
fn over_capacity_load_returns_422_with_remainder() {
    let port = allocate_port();
    let _child = spawn_server(port);
    wait_for_server(port, Duration::from_secs(8));

    // Fleet capacity at 60% wind is 1257.6 MWh.
    let payload = REFERENCE_PAYLOAD.replace("\"load\": 910", "\"load\": 1500");
    let (status, body) =
        http_post(port, "/productionplan", &payload).expect("request should succeed");
    assert_eq!(status, 422);

    let error: Value = serde_json::from_str(&body).expect("body should be JSON");
    assert!(error.get("error").is_some());
    let remaining = error["remaining"].as_f64().expect("remaining should be a number");
    assert!((remaining - 242.4).abs() < 1e-9);
}

#[test]
fn root_endpoint_answers() {
    let port = allocate_port();
    let _child = spawn_server(port);
    wait_for_server(port, Duration::from_secs(8));

    let (status, body) = http_get(port, "/").expect("request should succeed");
    assert_eq!(status, 200);
    let banner: Value = serde_json::from_str(&body).expect("body should be JSON");
    assert!(banner.get("message").is_some());
}

fn allocate_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let port = listener
        .local_addr()
        .expect("local_addr should be available")
        .port();
    drop(listener);
    port
}

fn spawn_server(port: u16) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_merit-dispatch"))
        .args(["--port", &port.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("merit-dispatch process should spawn");

    ChildGuard { child }
}

fn wait_for_server(port: u16, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((status, _)) = http_get(port, "/") {
            if status == 200 {
                return;
            }
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for API server on port {port}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http_get(port: u16, path: &str) -> Result<(u16, String), String> {
    let request =
        format!("GET {path} HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nConnection: close\r\n\r\n");
    http_exchange(port, &request)
}

fn http_post(port: u16, path: &str, body: &str) -> Result<(u16, String), String> {
    let request = format!(
        "POST {path} HTTP/1.1\r\nHost: 127.0.0.1:{port}\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    http_exchange(port, &request)
}

fn http_exchange(port: u16, request: &str) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).map_err(|err| format!("connect: {err}"))?;
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_line = head
        .lines()
        .next()
        .ok_or_else(|| "missing status line".to_string())?;
    let status_code = status_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("invalid status code: {err}"))?;

    Ok((status_code, strip_chunked(body)))
}

/// Axum may answer HTTP/1.1 requests with chunked transfer encoding;
/// reassemble the body if so.
fn strip_chunked(body: &str) -> String {
    if !body.contains("\r\n") {
        return body.to_string();
    }
    let mut out = String::new();
    let mut rest = body;
    loop {
        let Some((size_line, tail)) = rest.split_once("\r\n") else {
            return body.to_string();
        };
        let Ok(size) = usize::from_str_radix(size_line.trim(), 16) else {
            return body.to_string();
        };
        if size == 0 {
            return out;
        }
        if tail.len() < size {
            return body.to_string();
        }
        out.push_str(&tail[..size]);
        rest = tail[size..].trim_start_matches("\r\n");
    }
}
