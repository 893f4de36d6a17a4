// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests against a server bound to a loopback port.

#![cfg(feature = "http")]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use thermostat_api::http::HttpServer;
use thermostat_api::thermostat::FixedSensor;
use thermostat_api::{Registry, ServerConfig, Temperature};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinSet;

struct TestServer {
    base_url: String,
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<thermostat_api::Result<()>>,
}

impl TestServer {
    fn config() -> ServerConfig {
        ServerConfig::default()
            .with_address("127.0.0.1:0".parse().unwrap())
            .with_max_body_bytes(1024)
    }

    async fn start(registry: Registry) -> Self {
        Self::start_with(&Self::config(), registry).await
    }

    async fn start_with(config: &ServerConfig, registry: Registry) -> Self {
        let server = HttpServer::bind(config, Arc::new(registry)).await.unwrap();
        let addr = server.local_addr().unwrap();

        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(server.serve_with_shutdown(async {
            let _ = rx.await;
        }));

        Self {
            base_url: format!("http://{addr}"),
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}

fn fixed_registry(count: usize) -> Registry {
    Registry::with_sensor(count, Arc::new(FixedSensor(Temperature::from_celsius(20.0)))).unwrap()
}

async fn get_json(client: &reqwest::Client, url: &str) -> (u16, Value) {
    let response = client.get(url).send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

async fn patch_json(client: &reqwest::Client, url: &str, body: &str) -> (u16, Value) {
    let response = client.patch(url).body(body.to_string()).send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

async fn raw_exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    raw
}

fn without_current_temp(mut data: Value) -> Value {
    if let Some(items) = data.as_array_mut() {
        for item in items {
            item.as_object_mut().unwrap().remove("currentTemp");
        }
    }
    data
}

#[tokio::test]
async fn lists_default_thermostats() {
    let server = TestServer::start(fixed_registry(2)).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/thermostat", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "data": [{
                "id": 1,
                "name": "thermostat-1",
                "currentTemp": "68.0°F",
                "operatingMode": "off",
                "heatPoint": "65.0°F",
                "coolPoint": "80.0°F",
                "fanMode": "auto",
            }, {
                "id": 2,
                "name": "thermostat-2",
                "currentTemp": "68.0°F",
                "operatingMode": "off",
                "heatPoint": "65.0°F",
                "coolPoint": "80.0°F",
                "fanMode": "auto",
            }],
        })
    );

    server.stop().await;
}

#[tokio::test]
async fn synthetic_current_temp_is_rendered_in_fahrenheit() {
    let server = TestServer::start(Registry::with_thermostats(1).unwrap()).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, &format!("{}/thermostat/1", server.base_url)).await;
    assert_eq!(status, 200);

    let current = body["data"]["currentTemp"].as_str().unwrap();
    let value = current.strip_suffix("°F").unwrap();
    let (_, decimals) = value.split_once('.').unwrap();
    assert_eq!(decimals.len(), 1);
    assert!(value.parse::<f64>().is_ok());

    server.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_patches_all_land() {
    let server = TestServer::start(fixed_registry(2)).await;
    let client = reqwest::Client::new();

    let changes = [
        (1, "name", "upstairs bathroom"),
        (1, "operatingMode", "cool"),
        (1, "heatPoint", "18C"),
        (1, "coolPoint", "75.0°F"),
        (1, "fanMode", "auto"),
        (2, "name", "downstairs kitchen"),
        (2, "operatingMode", "heat"),
        (2, "heatPoint", "288.7 K"),
        (2, "coolPoint", "21 °c"),
        (2, "fanMode", "off"),
    ];

    let mut set = JoinSet::new();
    for (id, field, value) in changes {
        let client = client.clone();
        let url = format!("{}/thermostat/{id}", server.base_url);
        let body = json!({ field: value }).to_string();
        set.spawn(async move { patch_json(&client, &url, &body).await });
    }
    while let Some(result) = set.join_next().await {
        let (status, body) = result.unwrap();
        assert_eq!(status, 200, "error response: {body}");
        assert_eq!(body["status"], "ok");
    }

    let (_, body) = get_json(&client, &format!("{}/thermostat", server.base_url)).await;
    assert_eq!(
        without_current_temp(body["data"].clone()),
        json!([{
            "id": 1,
            "name": "upstairs bathroom",
            "operatingMode": "cool",
            "heatPoint": "64.4°F",
            // Fahrenheit input is converted with a 273 K offset.
            "coolPoint": "74.7°F",
            "fanMode": "auto",
        }, {
            "id": 2,
            "name": "downstairs kitchen",
            "operatingMode": "heat",
            "heatPoint": "60.0°F",
            "coolPoint": "69.8°F",
            "fanMode": "off",
        }])
    );

    server.stop().await;
}

#[tokio::test]
async fn patch_returns_updated_snapshot() {
    let server = TestServer::start(fixed_registry(2)).await;
    let client = reqwest::Client::new();
    let url = format!("{}/thermostat/1", server.base_url);

    let (status, body) = patch_json(&client, &url, r#"{"operatingMode": "cool"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"],
        json!({
            "id": 1,
            "name": "thermostat-1",
            "currentTemp": "68.0°F",
            "operatingMode": "cool",
            "heatPoint": "65.0°F",
            "coolPoint": "80.0°F",
            "fanMode": "auto",
        })
    );

    let (_, other) = get_json(&client, &format!("{}/thermostat/2", server.base_url)).await;
    assert_eq!(other["data"]["operatingMode"], "off");

    server.stop().await;
}

#[tokio::test]
async fn error_responses() {
    let server = TestServer::start(fixed_registry(2)).await;
    let client = reqwest::Client::new();
    let base = &server.base_url;

    let (status, body) = get_json(&client, &format!("{base}/thermostat/9999")).await;
    assert_eq!(status, 404);
    assert_eq!(
        body,
        json!({"status": "error", "errorMessage": "No thermostat with ID=9999"})
    );

    let (status, body) = get_json(&client, &format!("{base}/thermostat/one")).await;
    assert_eq!(status, 400);
    assert_eq!(body["errorMessage"], "ID field must be integer, got ID='one'");

    let item = format!("{base}/thermostat/1");
    let (status, body) = patch_json(&client, &item, r#"{"nmae": "x"}"#).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["errorMessage"],
        "Could not unmarshal body: unsupported fields 'nmae'"
    );

    let (status, body) = patch_json(&client, &item, r#"{"fanMode": "on"}"#).await;
    assert_eq!(status, 400);
    assert!(body["errorMessage"].as_str().unwrap().contains("invalid fanMode 'on'"));

    let (status, _) = get_json(&client, &format!("{base}/nowhere")).await;
    assert_eq!(status, 404);

    let (_, body) = get_json(&client, &format!("{base}/thermostat/1")).await;
    assert_eq!(body["data"]["name"], "thermostat-1");

    server.stop().await;
}

#[tokio::test]
async fn malformed_request_gets_error_envelope() {
    let server = TestServer::start(fixed_registry(1)).await;

    let raw = raw_exchange(server.addr, b"NONSENSE\r\n\r\n").await;

    assert!(raw.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    let (_, body) = raw.split_once("\r\n\r\n").unwrap();
    let body: Value = serde_json::from_str(body).unwrap();
    assert_eq!(body["status"], "error");

    server.stop().await;
}

#[tokio::test]
async fn oversized_body_is_rejected_before_reading() {
    let server = TestServer::start(fixed_registry(1)).await;

    let raw = raw_exchange(
        server.addr,
        b"PATCH /thermostat/1 HTTP/1.1\r\nHost: localhost\r\nContent-Length: 4096\r\n\r\n",
    )
    .await;
    assert!(raw.starts_with("HTTP/1.1 413 Payload Too Large\r\n"), "{raw}");

    server.stop().await;
}

#[tokio::test]
async fn stalled_request_times_out() {
    let config = TestServer::config().with_read_timeout(Duration::from_millis(200));
    let server = TestServer::start_with(&config, fixed_registry(1)).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream.write_all(b"GET /thermostat HTTP/1.1\r\n").await.unwrap();

    let mut raw = String::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut raw))
        .await
        .expect("server kept the stalled connection open")
        .unwrap();

    assert!(raw.starts_with("HTTP/1.1 408 Request Timeout\r\n"), "{raw}");
    let (_, body) = raw.split_once("\r\n\r\n").unwrap();
    let body: Value = serde_json::from_str(body).unwrap();
    assert_eq!(body["errorMessage"], "request not received within 200ms");

    server.stop().await;
}

#[tokio::test]
async fn idle_connection_is_closed_quietly() {
    let server = TestServer::start(fixed_registry(1)).await;

    let stream = TcpStream::connect(server.addr).await.unwrap();
    drop(stream);

    let client = reqwest::Client::new();
    let (status, _) = get_json(&client, &format!("{}/thermostat", server.base_url)).await;
    assert_eq!(status, 200);

    server.stop().await;
}
