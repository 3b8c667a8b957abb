// tests/support/mod.rs
//
// In-memory transport: canned replies per URL, every request recorded.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use pool_check::Error;
use pool_check::config::{BasicAuth, Options};
use pool_check::core::net::{HttpClient, Method, Request, Response, RetryPolicy, Transport};

pub const CAPACITY_URL: &str = "https://capacity.test/capacity/";
pub const HOURS_URL: &str = "https://capacity.test/faq/";
pub const PUSH_URL: &str = "https://logs.test/loki/api/v1/push";

pub const CAPACITY_PAGE: &str = include_str!("../fixtures/capacity.html");
pub const HOURS_PAGE: &str = include_str!("../fixtures/hours.html");

#[derive(Clone, Debug)]
pub struct Seen {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
    pub auth_user: Option<String>,
    pub timeout: Duration,
}

#[derive(Clone, Copy)]
pub enum Reply {
    Status(u16, &'static str),
    Down,
}

#[derive(Default)]
pub struct FakeTransport {
    replies: RefCell<HashMap<String, VecDeque<Reply>>>,
    seen: RefCell<Vec<Seen>>,
}

impl FakeTransport {
    pub fn reply(self, url: &str, reply: Reply) -> Self {
        self.replies.borrow_mut().entry(url.to_string()).or_default().push_back(reply);
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.borrow().clone()
    }

    pub fn posts(&self) -> Vec<Seen> {
        self.seen().into_iter().filter(|s| s.method == Method::Post).collect()
    }

    pub fn hits(&self, url: &str) -> usize {
        self.seen.borrow().iter().filter(|s| s.url == url).count()
    }
}

impl Transport for FakeTransport {
    fn send(&self, req: &Request<'_>) -> pool_check::Result<Response> {
        self.seen.borrow_mut().push(Seen {
            method: req.method,
            url: req.url.to_string(),
            body: req.body.map(str::to_string),
            auth_user: req.auth.map(|a| a.user.clone()),
            timeout: req.timeout,
        });

        // The last canned reply for a URL repeats once the queue is down to it.
        let mut replies = self.replies.borrow_mut();
        let queue = replies.get_mut(req.url);
        let reply = match queue {
            Some(q) if q.len() > 1 => q.pop_front(),
            Some(q) => q.front().copied(),
            None => None,
        };
        match reply {
            Some(Reply::Status(status, body)) => Ok(Response::new(status, body)),
            Some(Reply::Down) => Err(Error::Http {
                url: req.url.to_string(),
                source: Box::new(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused")),
            }),
            None => Ok(Response::new(404, "no such fixture")),
        }
    }
}

/// Both pages served, push accepted with 204.
pub fn healthy() -> FakeTransport {
    FakeTransport::default()
        .reply(CAPACITY_URL, Reply::Status(200, CAPACITY_PAGE))
        .reply(HOURS_URL, Reply::Status(200, HOURS_PAGE))
        .reply(PUSH_URL, Reply::Status(204, ""))
}

/// Default retry policy minus the sleeping.
pub fn client(transport: FakeTransport) -> HttpClient<FakeTransport> {
    let retry = RetryPolicy { backoff_factor: Duration::ZERO, ..RetryPolicy::default() };
    HttpClient::with_transport(transport, retry)
}

pub fn options() -> Options {
    let mut opts = Options::default();
    opts.sources.capacity_url = CAPACITY_URL.to_string();
    opts.sources.hours_url = HOURS_URL.to_string();
    opts.push.url = PUSH_URL.to_string();
    opts.push.auth = Some(BasicAuth { user: "123456".to_string(), password: "token".to_string() });
    opts
}
