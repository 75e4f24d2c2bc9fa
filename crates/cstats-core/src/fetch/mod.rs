//! Remote listings fetcher.

pub mod client;
pub mod traits;
pub mod types;

pub use client::HttpFetcher;
pub use traits::ListingsSource;
pub use types::{CONNECT_ERROR_MESSAGE, FetchOutcome, REDIRECT_MESSAGE, TIMEOUT_MESSAGE};

/// Test utilities for the fetcher.
///
/// Public so integration tests can stand up a local listings endpoint.
#[doc(hidden)]
pub mod test_helpers {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::JoinHandle;
    use std::time::Duration;

    /// A canned HTTP response.
    #[derive(Clone)]
    pub struct CannedResponse {
        pub status: u16,
        pub headers: Vec<(String, String)>,
        pub body: String,
    }

    impl CannedResponse {
        pub fn json(status: u16, body: impl Into<String>) -> Self {
            Self {
                status,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: body.into(),
            }
        }

        fn render(&self) -> String {
            let mut out = format!("HTTP/1.1 {} Canned\r\n", self.status);
            for (name, value) in &self.headers {
                out.push_str(&format!("{}: {}\r\n", name, value));
            }
            out.push_str(&format!(
                "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                self.body.len(),
                self.body
            ));
            out
        }
    }

    /// Local HTTP server answering a fixed number of connections.
    ///
    /// `join()` returns the raw request heads it received, in order.
    pub struct LocalServer {
        pub url: String,
        handle: JoinHandle<Vec<String>>,
    }

    impl LocalServer {
        pub fn serve(responses: Vec<CannedResponse>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind local server");
            let url = format!(
                "http://{}/v1/cryptocurrency/listings/latest",
                listener.local_addr().expect("local addr")
            );

            let handle = std::thread::spawn(move || {
                let mut requests = Vec::new();
                for response in responses {
                    let Ok((mut stream, _)) = listener.accept() else {
                        break;
                    };
                    requests.push(read_request_head(&mut stream));
                    let _ = stream.write_all(response.render().as_bytes());
                    let _ = stream.flush();
                }
                requests
            });

            Self { url, handle }
        }

        /// Respond once with `status` and a JSON `body`.
        pub fn once(status: u16, body: impl Into<String>) -> Self {
            Self::serve(vec![CannedResponse::json(status, body)])
        }

        /// Accept one connection and never answer it.
        pub fn silent(hold_for: Duration) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind local server");
            let url = format!("http://{}/", listener.local_addr().expect("local addr"));
            let handle = std::thread::spawn(move || {
                let mut requests = Vec::new();
                if let Ok((mut stream, _)) = listener.accept() {
                    requests.push(read_request_head(&mut stream));
                    std::thread::sleep(hold_for);
                }
                requests
            });
            Self { url, handle }
        }

        pub fn join(self) -> Vec<String> {
            self.handle.join().unwrap_or_default()
        }
    }

    /// A URL on localhost where nothing is listening.
    pub fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        format!("http://{}/", addr)
    }

    fn read_request_head(stream: &mut TcpStream) -> String {
        let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        String::from_utf8_lossy(&head).into_owned()
    }
}
