// Copyright 2017 Dmitry Tantsur <divius.inside@gmail.com>
// Copyright 2026 The mos-tests Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Session structure definition.
//!
//! The Session object serves as a wrapper around a blocking HTTP client,
//! handling authentication, accessing the service catalog and token refresh.

use std::cell::RefCell;
use std::fmt::Debug;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::auth::{CloudConfig, Password};
use super::identity::{self, AuthToken};
use super::service::ServiceType;
use super::{Error, ErrorKind, Result};

const AUTH_HEADER: &str = "x-auth-token";

/// Filters applied when looking up endpoints in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointFilters {
    /// Endpoint interface: `public`, `internal` or `admin`.
    pub interface: String,
    /// Region to use, any region if `None`.
    pub region: Option<String>,
}

/// An OpenStack API session.
///
/// Owns a token and an underlying client.
#[derive(Debug)]
pub struct Session {
    auth: Password,
    filters: EndpointFilters,
    client: Client,
    cached_token: RefCell<Option<AuthToken>>,
}

impl Default for EndpointFilters {
    fn default() -> EndpointFilters {
        EndpointFilters {
            interface: String::from("public"),
            region: None,
        }
    }
}

fn build_client(config: &CloudConfig) -> Result<Client> {
    let builder = Client::builder();
    #[cfg(any(feature = "native-tls", feature = "rustls"))]
    let builder = builder.danger_accept_invalid_certs(config.is_insecure());
    #[cfg(not(any(feature = "native-tls", feature = "rustls")))]
    if config.is_insecure() {
        warn!("TLS support is disabled, ignoring the insecure flag");
    }
    builder.build().map_err(Error::from)
}

impl Session {
    /// Create a new session from the configuration.
    ///
    /// No requests are made until the session is first used.
    pub fn new(config: CloudConfig) -> Result<Session> {
        let client = build_client(&config)?;
        Ok(Session {
            auth: config.auth,
            filters: config.filters,
            client,
            cached_token: RefCell::new(None),
        })
    }

    /// Endpoint filters in use.
    #[inline]
    pub fn endpoint_filters(&self) -> &EndpointFilters {
        &self.filters
    }

    /// Drop the cached token and authenticate again.
    pub fn refresh(&self) -> Result<()> {
        let token = identity::authenticate(&self.client, &self.auth)?;
        *self.cached_token.borrow_mut() = Some(token);
        Ok(())
    }

    fn ensure_token(&self) -> Result<AuthToken> {
        let valid = self
            .cached_token
            .borrow()
            .as_ref()
            .map_or(false, |token| !token.is_expiring());
        if !valid {
            debug!("Token is missing or expiring, authenticating");
            self.refresh()?;
        }

        self.cached_token.borrow().clone().ok_or_else(|| {
            Error::new(ErrorKind::AuthenticationFailed, "No token after authentication")
        })
    }

    /// Get a URL for the given service and path.
    pub fn get_endpoint(&self, service: ServiceType, path: &[&str]) -> Result<Url> {
        let token = self.ensure_token()?;
        let endpoint = token
            .catalog
            .find_endpoint(service.catalog_type, &self.filters)?;
        service.join_url(endpoint, path)
    }

    /// Start an authenticated request.
    pub fn request(&self, method: Method, service: ServiceType, path: &[&str]) -> Result<RequestBuilder> {
        let url = self.get_endpoint(service, path)?;
        let token = self.ensure_token()?;
        trace!("Sending HTTP {} {}", method, url);
        Ok(self
            .client
            .request(method, url)
            .header(AUTH_HEADER, token.value))
    }

    /// Send a request and check the response status.
    pub fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let resp = builder.send()?;
        check_response(resp)
    }

    /// Fetch a JSON document.
    pub fn get_json<T>(&self, service: ServiceType, path: &[&str]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.get_json_query(service, path, &Vec::<(String, String)>::new())
    }

    /// Fetch a JSON document with query parameters.
    pub fn get_json_query<Q, T>(&self, service: ServiceType, path: &[&str], query: &Q) -> Result<T>
    where
        Q: Serialize + Debug + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, service, path)?.query(query);
        Ok(self.send(builder)?.json()?)
    }

    /// POST a JSON body and parse the JSON response.
    pub fn post_json<B, T>(&self, service: ServiceType, path: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, service, path)?.json(body);
        Ok(self.send(builder)?.json()?)
    }

    /// PUT a JSON body and parse the JSON response.
    pub fn put_json<B, T>(&self, service: ServiceType, path: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, service, path)?.json(body);
        Ok(self.send(builder)?.json()?)
    }

    /// POST a JSON body ignoring the response.
    pub fn post_no_content<B>(&self, service: ServiceType, path: &[&str], body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, service, path)?.json(body);
        let _ = self.send(builder)?;
        Ok(())
    }

    /// Issue a DELETE request.
    pub fn delete(&self, service: ServiceType, path: &[&str]) -> Result<()> {
        let builder = self.request(Method::DELETE, service, path)?;
        let _ = self.send(builder)?;
        Ok(())
    }
}

/// Convert an unsuccessful response into an error.
fn check_response(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let url = resp.url().clone();
    let body = resp.text().unwrap_or_default();
    let kind = ErrorKind::from_status(status);
    debug!("HTTP {} from {}: {}", status, url, body);
    let message = if body.is_empty() {
        format!("HTTP {} from {}", status, url)
    } else {
        format!("HTTP {} from {}: {}", status, url, body)
    };
    Err(Error::new_with_details(kind, Some(status), Some(message)))
}

#[cfg(test)]
pub(crate) mod test {
    //! A canned HTTP server standing in for a cloud.

    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::super::auth::{CloudConfig, Password};
    use super::super::ErrorKind;
    use super::Session;

    type Handler = dyn Fn(&str, &str, &str) -> (u16, String) + Send + Sync;

    /// Serves a token with a catalog pointing back to itself; every other
    /// request goes to the handler as (method, path with query, body).
    #[derive(Debug, Clone)]
    pub(crate) struct MockCloud {
        base: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    fn token_body(base: &str) -> String {
        let endpoint = |service: &str, path: &str| {
            serde_json::json!({
                "type": service,
                "endpoints": [{
                    "interface": "public",
                    "region": "RegionOne",
                    "url": format!("{}/{}", base, path)
                }]
            })
        };
        serde_json::json!({
            "token": {
                "expires_at": "2099-01-01T00:00:00.000000Z",
                "catalog": [
                    endpoint("orchestration", "heat/v1/tenant"),
                    endpoint("compute", "compute/v2.1"),
                    endpoint("image", "image"),
                    endpoint("network", "network"),
                ]
            }
        })
        .to_string()
    }

    fn reason(status: u16) -> &'static str {
        match status {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            404 => "Not Found",
            409 => "Conflict",
            _ => "Unknown",
        }
    }

    fn read_chunked<R: BufRead>(reader: &mut R) -> Option<Vec<u8>> {
        let mut body = Vec::new();
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).ok()?;
            let size = usize::from_str_radix(size_line.trim(), 16).ok()?;
            let mut chunk = vec![0; size + 2];
            reader.read_exact(&mut chunk).ok()?;
            if size == 0 {
                return Some(body);
            }
            body.extend_from_slice(&chunk[..size]);
        }
    }

    fn serve(stream: TcpStream, base: &str, handler: &Handler, log: &Mutex<Vec<String>>) {
        let mut writer = match stream.try_clone() {
            Ok(s) => s,
            Err(_) => return,
        };
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        if reader.read_line(&mut request_line).is_err() {
            return;
        }
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let target = parts.next().unwrap_or_default().to_string();

        let mut content_length = 0;
        let mut chunked = false;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).is_err() {
                return;
            }
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                } else if name.eq_ignore_ascii_case("transfer-encoding") {
                    chunked = value.trim().eq_ignore_ascii_case("chunked");
                }
            }
        }

        let body = if chunked {
            match read_chunked(&mut reader) {
                Some(body) => body,
                None => return,
            }
        } else {
            let mut body = vec![0; content_length];
            if reader.read_exact(&mut body).is_err() {
                return;
            }
            body
        };
        let body = String::from_utf8_lossy(&body).into_owned();

        let (status, extra, payload) = if method == "POST" && target == "/identity/v3/auth/tokens" {
            (201, "X-Subject-Token: mock-token\r\n", token_body(base))
        } else {
            log.lock().unwrap().push(format!("{} {}", method, target));
            let (status, payload) = handler(&method, &target, &body);
            (status, "", payload)
        };

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason(status),
            extra,
            payload.len(),
            payload
        );
        let _ = writer.write_all(response.as_bytes());
        let _ = writer.flush();
    }

    impl MockCloud {
        pub(crate) fn start<F>(handler: F) -> MockCloud
        where
            F: Fn(&str, &str, &str) -> (u16, String) + Send + Sync + 'static,
        {
            let listener = TcpListener::bind("127.0.0.1:0").expect("Cannot bind a mock server");
            let base = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));

            let thread_base = base.clone();
            let thread_log = requests.clone();
            let _ = thread::spawn(move || {
                for stream in listener.incoming() {
                    match stream {
                        Ok(stream) => serve(stream, &thread_base, &handler, &thread_log),
                        Err(_) => break,
                    }
                }
            });

            MockCloud { base, requests }
        }

        /// Requests received so far, excluding authentication.
        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn session(&self) -> Rc<Session> {
            let auth = Password::new(format!("{}/identity", self.base), "admin", "secret", "Default")
                .with_project_scope("admin", "Default");
            Rc::new(Session::new(CloudConfig::new(auth)).expect("Cannot create a session"))
        }
    }

    #[test]
    fn test_session_get_json() {
        let cloud = MockCloud::start(|method, path, _| {
            assert_eq!(method, "GET");
            assert_eq!(path, "/image/v2/images/abcd");
            (200, String::from(r#"{"answer": 42}"#))
        });
        let session = cloud.session();
        let value: serde_json::Value = session
            .get_json(super::super::service::IMAGE, &["images", "abcd"])
            .unwrap();
        assert_eq!(value["answer"], 42);
        assert_eq!(cloud.requests(), vec!["GET /image/v2/images/abcd"]);
    }

    #[test]
    fn test_session_error_status() {
        let cloud = MockCloud::start(|_, _, _| (404, String::from(r#"{"itemNotFound": {}}"#)));
        let session = cloud.session();
        let err = session
            .get_json::<serde_json::Value>(super::super::service::COMPUTE, &["servers", "x"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
        assert!(err.to_string().contains("itemNotFound"));
    }

    #[test]
    fn test_session_missing_endpoint() {
        let cloud = MockCloud::start(|_, _, _| (200, String::from("{}")));
        let session = cloud.session();
        let err = session
            .get_endpoint(
                super::super::service::ServiceType {
                    catalog_type: "baremetal",
                    version_suffix: None,
                },
                &[],
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndpointNotFound);
        assert!(cloud.requests().is_empty());
    }
}
