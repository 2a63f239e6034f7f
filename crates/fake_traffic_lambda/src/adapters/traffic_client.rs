use std::error::Error as _;
use std::time::Duration;

use fake_traffic_core::targets::RequestTarget;
use reqwest::header::USER_AGENT;
use reqwest::redirect::Policy;
use reqwest::{Client, Proxy};
use thiserror::Error;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Issues one GET per attempt and reports the received status code.
///
/// Any response counts as success, whatever its status. `Err` is reserved
/// for transport failures and carries a printable description.
pub trait TrafficClient {
    fn fetch(&self, target: &RequestTarget) -> Result<u16, String>;
}

#[derive(Debug, Error)]
pub enum TrafficClientError {
    #[error("invalid proxy url '{url}': {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

/// reqwest-backed client with a fixed timeout and no redirect following.
#[derive(Debug, Clone)]
pub struct ReqwestTrafficClient {
    client: Client,
}

impl ReqwestTrafficClient {
    /// Routes every request through `proxy` when given; otherwise connects
    /// directly and ignores proxy variables in the environment.
    pub fn new(proxy: Option<&str>) -> Result<Self, TrafficClientError> {
        let builder = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(Policy::none());

        let builder = match proxy {
            Some(url) => builder.proxy(Proxy::all(url).map_err(|source| {
                TrafficClientError::Proxy {
                    url: url.to_string(),
                    source,
                }
            })?),
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(TrafficClientError::Build)?;
        Ok(Self { client })
    }
}

impl TrafficClient for ReqwestTrafficClient {
    fn fetch(&self, target: &RequestTarget) -> Result<u16, String> {
        let request = self
            .client
            .get(target.url)
            .header(USER_AGENT, target.user_agent);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                request
                    .send()
                    .await
                    .map(|response| response.status().as_u16())
                    .map_err(|error| describe_transport_error(&error))
            })
        })
    }
}

/// Joins the error with its source chain; reqwest's top-level message
/// alone rarely names the cause.
pub fn describe_transport_error(error: &reqwest::Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Instant;

    use super::*;

    fn leak(value: String) -> &'static str {
        Box::leak(value.into_boxed_str())
    }

    /// Serves a single canned response and reports the raw request it saw.
    fn serve_once(response: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let address = listener.local_addr().expect("listener has an address");
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("client should connect");
            let mut buffer = [0u8; 4096];
            let read = stream.read(&mut buffer).unwrap_or(0);
            let _ = sender.send(String::from_utf8_lossy(&buffer[..read]).to_string());
            let _ = stream.write_all(response.as_bytes());
        });

        (format!("http://{address}/get"), receiver)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_success_status_is_still_a_response() {
        let (url, requests) =
            serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let client = ReqwestTrafficClient::new(None).expect("client should build");
        let target = RequestTarget {
            url: leak(url),
            user_agent: "agent-under-test/1.0",
        };

        let status = client.fetch(&target).expect("404 is not a transport failure");

        assert_eq!(status, 404);
        let raw_request = requests.recv().expect("server should capture the request");
        assert!(raw_request.starts_with("GET /get"));
        assert!(raw_request
            .to_ascii_lowercase()
            .contains("user-agent: agent-under-test/1.0"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn redirects_are_not_followed() {
        let (url, _requests) = serve_once(
            "HTTP/1.1 302 Found\r\nLocation: http://127.0.0.1:1/elsewhere\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let client = ReqwestTrafficClient::new(None).expect("client should build");
        let target = RequestTarget {
            url: leak(url),
            user_agent: "agent-under-test/1.0",
        };

        assert_eq!(client.fetch(&target), Ok(302));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn refused_connection_is_a_transport_failure() {
        let address = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
            listener.local_addr().expect("listener has an address")
        };
        let client = ReqwestTrafficClient::new(None).expect("client should build");
        let target = RequestTarget {
            url: leak(format!("http://{address}/")),
            user_agent: "agent-under-test/1.0",
        };

        let error = client.fetch(&target).expect_err("nothing is listening");
        assert!(!error.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn silent_server_times_out_as_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
        let address = listener.local_addr().expect("listener has an address");
        let (release, hold) = mpsc::channel::<()>();

        thread::spawn(move || {
            let (_stream, _) = listener.accept().expect("client should connect");
            // Keep the connection open without replying.
            let _ = hold.recv();
        });

        let client = ReqwestTrafficClient::new(None).expect("client should build");
        let target = RequestTarget {
            url: leak(format!("http://{address}/")),
            user_agent: "agent-under-test/1.0",
        };

        let started_at = Instant::now();
        let error = client.fetch(&target).expect_err("no reply within the timeout");
        let elapsed = started_at.elapsed();
        let _ = release.send(());

        assert!(!error.is_empty());
        assert!(elapsed >= REQUEST_TIMEOUT - Duration::from_millis(100));
        assert!(elapsed < REQUEST_TIMEOUT + Duration::from_secs(4));
    }

    #[test]
    fn accepts_socks_proxy_for_tor() {
        ReqwestTrafficClient::new(Some("socks5h://127.0.0.1:9050"))
            .expect("socks proxy should be accepted");
    }
}
