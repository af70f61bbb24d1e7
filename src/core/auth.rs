//! Auth API client: registration and login against the festival backend.
//!
//! Wire format (JSON, camelCase):
//! - `POST /api/auth/register` `{fullName, email, password, confirmPassword, college}`
//!   → `{aarunyaId, ...}`
//! - `POST /api/auth/login` `{aarunyaId, password}`
//!   → `{token, aarunyaId, email, fullName}`
//!
//! Failures come back as a non-2xx status with `{error}`.

use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::validation::Form;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";

const REGISTER_FALLBACK: &str = "An error occurred during registration";
const LOGIN_FALLBACK: &str = "Login failed";

// ───────────────────────────────────────── payloads ──────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub college: String,
}

impl RegisterRequest {
    pub fn from_form(form: &Form) -> Self {
        Self {
            full_name: form.value("fullName").to_string(),
            email: form.value("email").to_string(),
            password: form.value("password").to_string(),
            confirm_password: form.value("confirmPassword").to_string(),
            college: form.value("college").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub aarunya_id: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_form(form: &Form) -> Self {
        Self {
            aarunya_id: form.value("aarunyaId").to_string(),
            password: form.value("password").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub aarunya_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub aarunya_id: String,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error)]
pub enum AuthError {
    /// Could not reach the server or read its reply.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("server rejected request ({status}): {message}")]
    Server { status: u16, message: String },
    /// A 2xx reply whose body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Which call failed; the wording of a failure differs per form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
}

/// What the user sees for a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub title: &'static str,
    pub toast: String,
    /// Shown above the form fields.
    pub banner: String,
}

impl AuthError {
    /// Server messages are passed through verbatim; anything else gets the
    /// endpoint's generic retry text.
    pub fn notice(&self, endpoint: Endpoint) -> FailureNotice {
        if let AuthError::Server { message, .. } = self {
            let title = match endpoint {
                Endpoint::Register => "Registration Failed",
                Endpoint::Login => "Login Failed",
            };
            return FailureNotice {
                title,
                toast: message.clone(),
                banner: message.clone(),
            };
        }
        match endpoint {
            Endpoint::Register => FailureNotice {
                title: "Error",
                toast: "Failed to register. Please try again.".to_string(),
                banner: "Failed to register. Please try again.".to_string(),
            },
            Endpoint::Login => FailureNotice {
                title: "Error",
                toast: "Failed to login. Please try again.".to_string(),
                banner: "Failed to connect to server. Please try again.".to_string(),
            },
        }
    }
}

// ───────────────────────────────────────── api ───────────────

/// The two calls the forms make.  Implemented over HTTP by
/// [`HttpAuthClient`]; tests substitute canned responses.
pub trait AuthApi: Clone + Send + Sync + 'static {
    fn register(
        &self,
        request: RegisterRequest,
    ) -> impl Future<Output = Result<RegisterResponse, AuthError>> + Send;

    fn login(
        &self,
        request: LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, AuthError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T, AuthError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {url}");

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| fallback.to_string());
        tracing::info!("POST {url} failed with {status}: {message}");
        Err(AuthError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

impl AuthApi for HttpAuthClient {
    fn register(
        &self,
        request: RegisterRequest,
    ) -> impl Future<Output = Result<RegisterResponse, AuthError>> + Send {
        async move { self.post(REGISTER_PATH, &request, REGISTER_FALLBACK).await }
    }

    fn login(
        &self,
        request: LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, AuthError>> + Send {
        async move { self.post(LOGIN_PATH, &request, LOGIN_FALLBACK).await }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve one canned HTTP response; the raw request comes back through
    /// the returned receiver.
    async fn serve_once(status: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length")
                                .then(|| v.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });

        (format!("http://{addr}"), rx)
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            full_name: "A B".into(),
            email: "a@b.com".into(),
            password: "Password1".into(),
            confirm_password: "Password1".into(),
            college: "MITS".into(),
        }
    }

    #[test]
    fn requests_serialise_in_camel_case() {
        let json = serde_json::to_value(register_request()).unwrap();
        assert_eq!(json["fullName"], "A B");
        assert_eq!(json["confirmPassword"], "Password1");

        let login = LoginRequest {
            aarunya_id: "AR-26-0001".into(),
            password: "pw".into(),
        };
        let json = serde_json::to_value(login).unwrap();
        assert_eq!(json["aarunyaId"], "AR-26-0001");
    }

    #[tokio::test]
    async fn conflict_surfaces_the_server_message() {
        let (url, request) = serve_once("409 Conflict", r#"{"error":"Email already registered"}"#).await;
        let client = HttpAuthClient::new(&url).unwrap();

        let err = client.register(register_request()).await.unwrap_err();
        match &err {
            AuthError::Server { status, message } => {
                assert_eq!(*status, 409);
                assert_eq!(message, "Email already registered");
            }
            other => panic!("expected server error, got {other:?}"),
        }
        let notice = err.notice(Endpoint::Register);
        assert_eq!(notice.title, "Registration Failed");
        assert_eq!(notice.toast, "Email already registered");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /api/auth/register "));
        assert!(raw.contains(r#""confirmPassword":"Password1""#));
    }

    #[tokio::test]
    async fn error_without_payload_uses_fallback() {
        let (url, _request) = serve_once("500 Internal Server Error", "oops").await;
        let client = HttpAuthClient::new(&url).unwrap();
        let err = client
            .login(LoginRequest {
                aarunya_id: "AR-26-0001".into(),
                password: "pw".into(),
            })
            .await
            .unwrap_err();
        let notice = err.notice(Endpoint::Login);
        assert_eq!(notice.title, "Login Failed");
        assert_eq!(notice.banner, "Login failed");
    }

    #[tokio::test]
    async fn successful_login_decodes_the_session_fields() {
        let (url, _request) = serve_once(
            "200 OK",
            r#"{"token":"t1","aarunyaId":"AR-26-0001","email":"a@b.com","fullName":"A B"}"#,
        )
        .await;
        let client = HttpAuthClient::new(&format!("{url}/")).unwrap();
        let resp = client
            .login(LoginRequest {
                aarunya_id: "AR-26-0001".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(resp.token, "t1");
        assert_eq!(resp.full_name, "A B");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpAuthClient::new(&format!("http://{addr}")).unwrap();
        let err = client.register(register_request()).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
        let notice = err.notice(Endpoint::Register);
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.toast, "Failed to register. Please try again.");
    }

    #[test]
    fn login_failures_word_the_banner_and_toast_differently() {
        let err = AuthError::from(serde_json::from_str::<LoginResponse>("{}").unwrap_err());
        let notice = err.notice(Endpoint::Login);
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.toast, "Failed to login. Please try again.");
        assert_eq!(notice.banner, "Failed to connect to server. Please try again.");
    }
}
