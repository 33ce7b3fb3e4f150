use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, MutexGuard, mpsc};
use std::thread;
use std::time::Duration;

/// Path prefix the stub serves, mirroring the versioned public API.
pub const API_PREFIX: &str = "/v7";
const MAX_HEADER_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: u16,
    body: String,
}

/// Route table for the stub, keyed by method and path below [`API_PREFIX`].
#[derive(Debug, Default, Clone)]
pub struct StubRoutes {
    routes: HashMap<(String, String), CannedResponse>,
}

impl StubRoutes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(self, path: &str, status: u16, body: &str) -> Self {
        self.route("GET", path, status, body)
    }

    #[must_use]
    pub fn post(self, path: &str, status: u16, body: &str) -> Self {
        self.route("POST", path, status, body)
    }

    fn route(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method.to_owned(), format!("{}{}", API_PREFIX, path)),
            CannedResponse {
                status,
                body: body.to_owned(),
            },
        );
        self
    }

    fn lookup(&self, method: &str, path: &str) -> CannedResponse {
        self.routes
            .get(&(method.to_owned(), path.to_owned()))
            .cloned()
            .unwrap_or_else(|| CannedResponse {
                status: 404,
                body: r#"{"message":"not found"}"#.to_owned(),
            })
    }
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl StubServer {
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    #[must_use]
    pub fn count(&self, method: &str, path: &str) -> usize {
        let full_path = format!("{}{}", API_PREFIX, path);
        lock(&self.requests)
            .iter()
            .filter(|request| request.method == method && request.path == full_path)
            .count()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

fn lock(requests: &Mutex<Vec<RecordedRequest>>) -> MutexGuard<'_, Vec<RecordedRequest>> {
    match requests.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Spawn a stub ThousandEyes API answering from `routes`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_stub_api(routes: StubRoutes) -> Result<StubServer, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    let routes = Arc::new(routes);
    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let routes = Arc::clone(&routes);
                    let recorded = Arc::clone(&recorded);
                    thread::spawn(move || handle_client(stream, &routes, &recorded));
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok(StubServer {
        base_url: format!("http://{}{}", addr, API_PREFIX),
        requests,
        shutdown: shutdown_tx,
        thread: Some(handle),
    })
}

/// Like [`spawn_stub_api`], but skips when the sandbox forbids sockets.
///
/// # Errors
///
/// Returns an error if the listener fails for any other reason.
pub fn spawn_stub_api_or_skip(routes: StubRoutes) -> Result<Option<StubServer>, String> {
    match spawn_stub_api(routes) {
        Ok(server) => Ok(Some(server)),
        Err(err) if err.contains("Operation not permitted") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(mut stream: TcpStream, routes: &StubRoutes, recorded: &Mutex<Vec<RecordedRequest>>) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    let response = routes.lookup(&request.method, &request.path);
    lock(recorded).push(request);

    let head = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.body.len()
    );
    if stream.write_all(head.as_bytes()).is_err()
        || stream.write_all(response.body.as_bytes()).is_err()
        || stream.flush().is_err()
    {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        if let Some(pos) = find_header_end(&raw) {
            break pos;
        }
        if raw.len() > MAX_HEADER_BYTES {
            return None;
        }
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            return None;
        }
        raw.extend_from_slice(chunk.get(..read)?);
    };

    let head = String::from_utf8_lossy(raw.get(..header_end)?).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_owned();
    let path = request_line.next()?.to_owned();

    let mut content_length = 0usize;
    let mut authorization = None;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.eq_ignore_ascii_case("content-length") {
            content_length = value.trim().parse().ok()?;
        } else if name.eq_ignore_ascii_case("authorization") {
            authorization = Some(value.trim().to_owned());
        }
    }

    let mut body = raw.get(header_end.checked_add(4)?..)?.to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(chunk.get(..read)?);
    }

    Some(RecordedRequest {
        method,
        path,
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|window| window == b"\r\n\r\n")
}

/// Run the `te-probe` binary in `workdir` with the given environment and
/// capture output. Settings a caller does not pass are cleared so the host
/// environment cannot leak in.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_te_probe<I, S>(workdir: &Path, envs: &[(&str, &str)], args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = te_probe_bin()?;
    let mut command = Command::new(bin);
    command
        .current_dir(workdir)
        .args(args)
        .env("RUST_LOG", "error")
        .env("NO_PROXY", "127.0.0.1")
        .env("no_proxy", "127.0.0.1")
        .env_remove("TE_PROBE_LOG");
    for key in [
        "TE_API_TOKEN",
        "TEST_NAME",
        "TARGET",
        "TE_BASE_URL",
        "TE_TEST_INTERVAL",
        "TE_GRACE_PERIOD",
        "TE_REQUEST_TIMEOUT",
        "TE_REPORT_DIR",
    ] {
        command.env_remove(key);
    }
    for (key, value) in envs {
        command.env(key, value);
    }
    command
        .output()
        .map_err(|err| format!("run te-probe failed: {}", err))
}

fn te_probe_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_te-probe").map_or_else(
        || Err("CARGO_BIN_EXE_te-probe missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
