//! Minimal HTTP/1.x request head parsing and response encoding.

use pilights_app::{PiLightsError, PiLightsResult};
use serde::Serialize;

/// Maximum length of the request head in bytes.
pub const MAX_HEAD_LEN: usize = 8 * 1024;

/// Parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    /// Decoded query parameters in the order of appearance.
    pub query: Vec<(String, String)>,
}

impl Request {
    /// Returns the first value of the query parameter with the given name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value.as_str()))
    }

    /// Parses the request line of the given request head.
    pub fn parse(head: &str) -> PiLightsResult<Self> {
        let line = head.lines().next().unwrap_or_default();
        let mut parts = line.split_whitespace();
        let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(PiLightsError::invalid_request("malformed request line"));
        };
        if !version.starts_with("HTTP/1.") {
            return Err(PiLightsError::invalid_request(format_args!(
                "unsupported protocol version {version}"
            )));
        }

        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let query = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                Ok((percent_decode(key)?, percent_decode(value)?))
            })
            .collect::<PiLightsResult<Vec<_>>>()?;

        Ok(Self {
            method: method.to_owned(),
            path: percent_decode(path)?,
            query,
        })
    }
}

/// Decodes the `application/x-www-form-urlencoded` component.
pub fn percent_decode(input: &str) -> PiLightsResult<String> {
    let mut bytes = Vec::with_capacity(input.len());
    let mut iter = input.bytes();
    while let Some(byte) = iter.next() {
        match byte {
            b'+' => bytes.push(b' '),
            b'%' => {
                let hex = [iter.next(), iter.next()];
                let [Some(hi), Some(lo)] = hex else {
                    return Err(PiLightsError::invalid_request("truncated percent escape"));
                };
                let value = std::str::from_utf8(&[hi, lo])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                    .ok_or_else(|| PiLightsError::invalid_request("invalid percent escape"))?;
                bytes.push(value);
            }
            other => bytes.push(other),
        }
    }
    String::from_utf8(bytes).map_err(PiLightsError::decode)
}

/// JSON body of every response.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusBody {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: StatusBody,
}

impl Response {
    /// Creates a successful response.
    pub fn ok() -> Self {
        Self::with_status(200, None)
    }

    /// Creates an error response with the given status and reason.
    pub fn error(status: u16, reason: impl ToString) -> Self {
        Self::with_status(status, Some(reason.to_string()))
    }

    fn with_status(status: u16, error: Option<String>) -> Self {
        Self {
            status,
            body: StatusBody { status, error },
        }
    }

    fn reason_phrase(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => "Internal Server Error",
        }
    }

    /// Encodes the response into the bytes to be sent.
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = serde_json::to_string(&self.body).unwrap_or_else(|_| "{}".to_owned());
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            self.status,
            self.reason_phrase(),
            body.len(),
        )
        .into_bytes()
    }
}

impl From<PiLightsError> for Response {
    fn from(err: PiLightsError) -> Self {
        let status = if err.is_client_error() { 400 } else { 500 };
        Self::error(status, err)
    }
}
