//! PiLights HTTP ingress
//!
//! Accepts sequence requests in form of `GET /PiLights?sequence=blue_pulse&iterations=2`
//! and hands them to the application. The response reflects the request acceptance, not
//! the animation progress.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::missing_const_for_fn
)]

use std::str::FromStr;

use pilights_app::{core::SequenceRequest, App, PiLightsError, PiLightsResult};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

pub use crate::http::{Request, Response};

pub mod http;

/// Default HTTP port of the ingress.
pub const DEFAULT_PORT: u16 = 8080;
/// Path of the sequence endpoint.
pub const SEQUENCE_PATH: &str = "/PiLights";

/// Accepts incoming connections on the given listener and serves the sequence requests.
pub async fn serve(listener: TcpListener, app: App) -> PiLightsResult<()> {
    log::info!(
        "Listening sequence requests on the {}",
        listener.local_addr().map_err(PiLightsError::network)?
    );

    loop {
        let (stream, address) = listener.accept().await.map_err(PiLightsError::network)?;
        log::trace!("Accepted an incoming connection from the {address}");

        let app = app.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, &app).await {
                log::info!("Closed connection with {address}: {err}");
            }
        });
    }
}

async fn handle_connection(mut stream: TcpStream, app: &App) -> PiLightsResult<()> {
    let response = match read_head(&mut stream).await {
        Ok(head) => match Request::parse(&head) {
            Ok(request) => handle_request(app, &request),
            Err(err) => Response::from(err),
        },
        Err(PiLightsError::Network) => return Err(PiLightsError::Network),
        Err(err) => Response::from(err),
    };

    stream
        .write_all(&response.to_bytes())
        .await
        .map_err(PiLightsError::network)?;
    stream.shutdown().await.map_err(PiLightsError::network)
}

/// Reads the request head up to the empty line, the request body is ignored.
async fn read_head(stream: &mut TcpStream) -> PiLightsResult<String> {
    let mut head = Vec::with_capacity(512);
    let mut buf = [0_u8; 512];
    loop {
        let bytes_read = stream.read(&mut buf).await.map_err(PiLightsError::network)?;
        if bytes_read == 0 {
            // Connection has been closed before the end of the head.
            if head.is_empty() {
                return Err(PiLightsError::Network);
            }
            break;
        }
        head.extend_from_slice(&buf[..bytes_read]);

        if head.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
        if head.len() > http::MAX_HEAD_LEN {
            return Err(PiLightsError::invalid_request("request head is too large"));
        }
    }

    String::from_utf8(head).map_err(PiLightsError::decode)
}

/// Routes the request and submits the requested sequence.
pub fn handle_request(app: &App, request: &Request) -> Response {
    log::debug!("Incoming: {request:?}");

    if request.path != SEQUENCE_PATH {
        return Response::error(404, format_args!("Unknown path: {}", request.path));
    }
    if request.method != "GET" {
        return Response::error(405, format_args!("Method not allowed: {}", request.method));
    }

    let result = sequence_request(request).and_then(|sequence| app.run_sequence(sequence));
    match result {
        Ok(_completion) => Response::ok(),
        Err(err) => {
            log::info!("Rejected sequence request: {err}");
            Response::from(err)
        }
    }
}

/// Builds the sequence request from the query parameters.
pub fn sequence_request(request: &Request) -> PiLightsResult<SequenceRequest> {
    let sequence = request
        .query_param("sequence")
        .filter(|name| !name.is_empty())
        .ok_or(PiLightsError::SequenceNotSpecified)?;

    Ok(SequenceRequest {
        sequence: sequence.to_owned(),
        iterations: number_param(request, "iterations")?,
        delay: number_param(request, "delay")?,
        start_delay: number_param(request, "startDelay")?,
    })
}

fn number_param<T: FromStr>(request: &Request, name: &str) -> PiLightsResult<Option<T>> {
    request
        .query_param(name)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value.parse().map_err(|_| {
                PiLightsError::invalid_request(format_args!("{name} must be a number: {value}"))
            })
        })
        .transpose()
}
