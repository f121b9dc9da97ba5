//! Shared fixtures for data-layer integration tests.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use camino::Utf8PathBuf;
use tempfile::TempDir;
use url::Url;

/// Minimal HTTP server answering Nominatim search requests from a table.
///
/// Each connection serves one request and is then closed.
pub struct StubGeocodingServer {
    base_url: String,
    requests: Arc<AtomicUsize>,
}

impl StubGeocodingServer {
    /// Start serving `places` (address to `(lat, lon)`) on a free local port.
    pub fn start(places: &[(&str, (f64, f64))]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("stub server binds: {err}"));
        let port = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("stub server has an address: {err}"))
            .port();
        let table: HashMap<String, (f64, f64)> = places
            .iter()
            .map(|(address, coordinate)| ((*address).to_owned(), *coordinate))
            .collect();
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                serve(stream, &table);
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    /// Base URL to configure the geocoder with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of requests served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn serve(mut stream: TcpStream, table: &HashMap<String, (f64, f64)>) {
    let mut reader = BufReader::new(&stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut header = String::new();
    while reader.read_line(&mut header).is_ok_and(|read| read > 2) {
        header.clear();
    }
    let body = request_line
        .split_whitespace()
        .nth(1)
        .and_then(|target| Url::parse(&format!("http://stub{target}")).ok())
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned())
        })
        .and_then(|address| table.get(&address).copied())
        .map_or_else(
            || "[]".to_owned(),
            |(lat, lon)| format!(r#"[{{"lat":"{lat}","lon":"{lon}","display_name":"stub"}}]"#),
        );
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Temporary directory with UTF-8 path helpers.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}")),
        }
    }

    /// Path of `name` inside the workspace.
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name))
            .unwrap_or_else(|path| panic!("temporary path is not UTF-8: {path:?}"))
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
        path
    }

    /// Read `name` back as text.
    pub fn read(&self, name: &str) -> String {
        let path = self.path(name);
        std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {path}: {err}"))
    }
}
