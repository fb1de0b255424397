use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use libhttpreq::error::Error;
use libhttpreq::http::client::{Client, Config};
use libhttpreq::http::{Header, Method, Request, ResponseHandle, Transport, is_redirect, is_success};

/// One scripted response the mock transport will serve.
#[derive(Clone)]
struct Script {
    status: u16,
    location: Option<&'static str>,
}

/// What the transport observed about each issued request.
#[derive(Default)]
struct TransportLog {
    urls: Vec<String>,
    methods: Vec<&'static str>,
    bodies: Vec<Vec<u8>>,
    headers: Vec<Vec<(String, String)>>,
    timeouts: Vec<u16>,
    ends: usize,
}

struct MockHandle {
    status: u16,
    location: Option<&'static str>,
    log: Rc<RefCell<TransportLog>>,
}

impl ResponseHandle for MockHandle {
    fn status(&self) -> u16 {
        self.status
    }

    fn content_length(&self) -> i32 {
        0
    }

    fn set_content_length(&mut self, _len: i32) {}

    fn duration_ms(&self) -> u32 {
        0
    }

    fn bytes_read(&self) -> usize {
        0
    }

    fn redirect_location(&self) -> Option<&str> {
        self.location
    }

    fn read(&mut self, _buf: &mut [u8]) -> i32 {
        0
    }

    fn end(self) {
        self.log.borrow_mut().ends += 1;
    }
}

struct MockTransport {
    scripts: VecDeque<Option<Script>>,
    log: Rc<RefCell<TransportLog>>,
}

impl MockTransport {
    fn new(scripts: impl IntoIterator<Item = Option<Script>>) -> (Self, Rc<RefCell<TransportLog>>) {
        let log = Rc::new(RefCell::new(TransportLog::default()));
        let transport = Self {
            scripts: scripts.into_iter().collect(),
            log: Rc::clone(&log),
        };
        (transport, log)
    }
}

impl Transport for MockTransport {
    type Handle = MockHandle;

    fn start(&mut self, request: &Request<'_>) -> Option<MockHandle> {
        {
            let mut log = self.log.borrow_mut();
            log.urls.push(request.url.to_string());
            log.methods.push(request.method.as_str());
            log.bodies.push(request.body.to_vec());
            log.headers.push(
                request
                    .headers
                    .iter()
                    .map(|h| (h.name.to_string(), h.value.to_string()))
                    .collect(),
            );
            log.timeouts.push(request.timeout_ms);
        }
        let script = self.scripts.pop_front()??;
        Some(MockHandle {
            status: script.status,
            location: script.location,
            log: Rc::clone(&self.log),
        })
    }
}

fn ok() -> Option<Script> {
    Some(Script {
        status: 200,
        location: None,
    })
}

fn redirect(location: Option<&'static str>) -> Option<Script> {
    Some(Script {
        status: 302,
        location,
    })
}

fn header(name: &str, value: &str) -> Header {
    Header {
        name: heapless::String::try_from(name).unwrap(),
        value: heapless::String::try_from(value).unwrap(),
    }
}

#[test]
fn status_helpers_classify_codes() {
    for status in [301, 302, 303, 307, 308] {
        assert!(is_redirect(status));
    }
    for status in [200, 204, 300, 304, 404, 500] {
        assert!(!is_redirect(status));
    }
    assert!(is_success(200));
    assert!(is_success(299));
    assert!(!is_success(300));
    assert!(!is_success(199));
}

#[test]
fn get_and_post_wrap_start() {
    let (transport, log) = MockTransport::new([ok(), ok()]);
    let mut client = Client::new(transport, Config::default());

    let handle = client.get("http://dev.local/state").unwrap();
    handle.end();
    let handle = client.post("http://dev.local/state", b"ping").unwrap();
    handle.end();

    let log = log.borrow();
    assert_eq!(log.methods, ["GET", "POST"]);
    assert_eq!(log.bodies[0], b"");
    assert_eq!(log.bodies[1], b"ping");
    assert_eq!(log.ends, 2);
}

#[test]
fn empty_url_is_rejected_before_the_transport() {
    let (transport, log) = MockTransport::new([ok()]);
    let mut client = Client::new(transport, Config::default());

    assert_eq!(
        client.try_start("", Method::Get, b"", &[]).err(),
        Some(Error::EmptyUrl)
    );
    assert!(log.borrow().urls.is_empty());
}

#[test]
fn transport_failure_surfaces_as_none() {
    let (transport, _log) = MockTransport::new([None]);
    let mut client = Client::new(transport, Config::default());
    assert!(client.get("http://dev.local/").is_none());
}

#[test]
fn configured_timeout_reaches_the_transport() {
    let (transport, log) = MockTransport::new([ok()]);
    let config = Config {
        timeout_ms: 1200,
        ..Config::default()
    };
    let mut client = Client::new(transport, config);
    client.get("http://dev.local/").unwrap().end();
    assert_eq!(log.borrow().timeouts, [1200]);
}

#[test]
fn useragent_injected_unless_caller_supplied() {
    let (transport, log) = MockTransport::new([ok(), ok()]);
    let config = Config {
        useragent: Some("device/1.0"),
        ..Config::default()
    };
    let mut client = Client::new(transport, config);

    client.get("http://dev.local/").unwrap().end();
    let supplied = [header("user-agent", "custom/2.0")];
    client
        .start("http://dev.local/", Method::Get, b"", &supplied)
        .unwrap()
        .end();

    let log = log.borrow();
    assert!(
        log.headers[0]
            .iter()
            .any(|(n, v)| n == "User-Agent" && v == "device/1.0")
    );
    // Case-insensitive match on the caller's header suppresses the default.
    assert_eq!(log.headers[1].len(), 1);
    assert_eq!(log.headers[1][0].1, "custom/2.0");
}

#[test]
fn redirect_followed_to_location_target() {
    let (transport, log) = MockTransport::new([redirect(Some("http://dev.local/next")), ok()]);
    let mut client = Client::new(transport, Config::default());

    let handle = client.get("http://dev.local/first").unwrap();
    assert_eq!(handle.status(), 200);
    handle.end();

    let log = log.borrow();
    assert_eq!(log.urls, ["http://dev.local/first", "http://dev.local/next"]);
    // The intermediate handle and the final one were both ended.
    assert_eq!(log.ends, 2);
}

#[test]
fn redirects_not_followed_when_disabled() {
    let (transport, log) = MockTransport::new([redirect(Some("http://dev.local/next"))]);
    let config = Config {
        follow_redirects: false,
        ..Config::default()
    };
    let mut client = Client::new(transport, config);

    let handle = client.get("http://dev.local/first").unwrap();
    assert_eq!(handle.status(), 302);
    handle.end();
    assert_eq!(log.borrow().urls.len(), 1);
}

#[test]
fn redirect_budget_exhaustion_is_terminal() {
    // Limit 2: the third redirect response seen ends the request.
    let (transport, log) = MockTransport::new([
        redirect(Some("http://dev.local/a")),
        redirect(Some("http://dev.local/b")),
        redirect(Some("http://dev.local/c")),
        ok(),
    ]);
    let config = Config {
        redirect_limit: 2,
        ..Config::default()
    };
    let mut client = Client::new(transport, config);

    assert_eq!(
        client.try_start("http://dev.local/", Method::Get, b"", &[]).err(),
        Some(Error::RedirectLimitExceeded)
    );

    let log = log.borrow();
    assert_eq!(log.urls.len(), 3);
    // Every intermediate handle was still released.
    assert_eq!(log.ends, 3);
}

#[test]
fn redirect_without_location_is_terminal() {
    let (transport, log) = MockTransport::new([redirect(None)]);
    let mut client = Client::new(transport, Config::default());

    assert_eq!(
        client.try_start("http://dev.local/", Method::Get, b"", &[]).err(),
        Some(Error::MissingLocation)
    );
    assert_eq!(log.borrow().ends, 1);
}

#[test]
fn redirect_with_empty_location_is_terminal() {
    // An empty Location must not be re-issued as an empty-URL request.
    let (transport, log) = MockTransport::new([redirect(Some("")), ok()]);
    let mut client = Client::new(transport, Config::default());

    assert_eq!(
        client.try_start("http://dev.local/", Method::Get, b"", &[]).err(),
        Some(Error::MissingLocation)
    );

    let log = log.borrow();
    // Only the first request went out, and its handle was released.
    assert_eq!(log.urls.len(), 1);
    assert_eq!(log.ends, 1);
}
