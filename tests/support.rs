use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

pub const HTML_TYPE: &str = "text/html; charset=utf-8";
/// Pause between the response head and the body on `/slow-body`.
pub const SLOW_BODY_DELAY: Duration = Duration::from_millis(500);

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ServerHandle {
    /// Request targets seen so far, e.g. `/about?uniqueRequest=...`.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server for tests. `/missing` answers 404,
/// `/slow-body` sends its head at once and the body after
/// [`SLOW_BODY_DELAY`], every other path a small HTML page.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let seen = Arc::clone(&seen);
                    thread::spawn(move || handle_client(stream, &seen));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            requests,
        },
    ))
}

pub fn spawn_http_server_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_http_server() {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Spawn a server that accepts connections and never answers them.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_silent_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind silent server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let requests = Arc::new(Mutex::new(Vec::new()));

    let handle = thread::spawn(move || {
        let mut held = Vec::new();
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => held.push(stream),
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            requests,
        },
    ))
}

/// Base URL of a port nothing listens on.
///
/// # Errors
///
/// Returns an error if a probe listener cannot be bound.
pub fn refused_base_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn handle_client(mut stream: TcpStream, seen: &Mutex<Vec<String>>) {
    drop(stream.set_nonblocking(false));
    let mut buffer = [0u8; 2048];
    let Ok(read) = stream.read(&mut buffer) else {
        return;
    };
    let head = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default()).into_owned();
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_owned();
    if let Ok(mut guard) = seen.lock() {
        guard.push(target.clone());
    }

    if target.starts_with("/slow-body") {
        let body = "<html><body>late</body></html>";
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            HTML_TYPE,
            body.len()
        );
        if stream.write_all(head.as_bytes()).is_err() || stream.flush().is_err() {
            return;
        }
        thread::sleep(SLOW_BODY_DELAY);
        drop(stream.write_all(body.as_bytes()));
        drop(stream.shutdown(Shutdown::Both));
        return;
    }

    let response = if target.starts_with("/missing") {
        "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found"
            .to_owned()
    } else {
        let body = "<html><body>ok</body></html>";
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            HTML_TYPE,
            body.len(),
            body
        )
    };
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `pagetime` binary in `dir` and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_pagetime<I, S>(dir: &Path, args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = pagetime_bin()?;
    let mut command = Command::new(bin);
    for name in [
        "PAGETIME_CONFIG",
        "PAGETIME_BASE",
        "PAGETIME_REQUESTS",
        "PAGETIME_TTFB",
        "PAGETIME_KEEPALIVE",
        "PAGETIME_TIMEOUT",
        "PAGETIME_CONNECT_TIMEOUT",
        "PAGETIME_OUTPUT",
        "PAGETIME_LOG",
    ] {
        command.env_remove(name);
    }
    command
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run pagetime failed: {}", err))
}

fn pagetime_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_pagetime").map_or_else(
        || Err("CARGO_BIN_EXE_pagetime missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
