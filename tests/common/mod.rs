/*!
 * Common test utilities for the wordwell test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Route library logs to the test output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Local HTTP server answering every request with the same canned response
pub struct StubServer {
    /// Base URL, e.g. `http://127.0.0.1:41234`
    pub url: String,
    /// Raw request heads received so far
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Start serving `status` with a JSON `body` on an ephemeral port
    pub async fn start(status: u16, body: &str) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let body = body.to_string();
        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let body = body.clone();
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let head = read_request_head(&mut stream).await;
                    seen.lock().push(head);

                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason_phrase(status),
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Ok(Self { url, requests })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

async fn read_request_head(stream: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&head).into_owned()
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Words as owned strings
pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// A Collegiate entry shaped like the live API answer for "cat"
pub fn collegiate_cat_entry() -> Value {
    json!({
        "meta": {
            "id": "cat:1",
            "uuid": "eb4c6c5b-1b63-4e3b-8b2a-f1c5c2fd6f5b",
            "stems": ["cat", "cats"],
            "offensive": false
        },
        "hom": 1,
        "hwi": {
            "hw": "cat",
            "prs": [{ "mw": "ˈkat", "sound": { "audio": "cat00001" } }]
        },
        "fl": "noun",
        "def": [{
            "sseq": [
                [
                    ["sense", {
                        "sn": "1 a",
                        "dt": [
                            ["text", "{bc}a carnivorous mammal ({it}Felis catus{/it}) long domesticated as a pet"],
                            ["vis", [{ "t": "a {wi}cat{/wi} on the mat" }]]
                        ]
                    }],
                    ["sense", {
                        "sn": "b",
                        "dt": [["text", "{bc}any of a family ({d_link|Felidae|Felidae}) of carnivorous usually solitary mammals"]],
                        "sdsense": {
                            "sd": "especially",
                            "dt": [["text", "{bc}one of the larger members of this family"]]
                        }
                    }]
                ],
                [
                    ["sen", { "sn": "2" }],
                    ["pseq", [
                        ["bs", { "sense": { "sn": "a", "dt": [["text", "{bc}a {sx|guy||}"], ["text", "{it}slang{/it}"]] } }],
                        ["sense", { "sn": "b", "dt": [["text", "{bc}"]] }]
                    ]]
                ]
            ]
        }],
        "uros": [
            { "ure": "cat*like", "fl": "adjective" }
        ],
        "et": [
            ["text", "Middle English, from Old English {it}catt{/it}"],
            ["et_snote", [["t", "note"]]]
        ],
        "shortdef": [
            "a carnivorous mammal ({it}Felis catus{/it}) long domesticated as a pet",
            "any of a family (Felidae) of carnivorous usually solitary mammals"
        ]
    })
}
