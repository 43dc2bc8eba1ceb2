// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use std::{net::SocketAddr, path::PathBuf, process::ExitCode};

use axum::{
    BoxError,
    handler::HandlerWithoutStateExt,
    http::{StatusCode, Uri, uri::PathAndQuery},
    response::Redirect,
};
use axum_extra::extract::Host;
use axum_server::{Handle, tls_rustls::RustlsConfig};
use environment::{
    build_address_http, build_address_https, build_https_cert,
    build_https_private_key, build_routes_config,
};
use error::Error;
use server::build_app;
use timetune::{
    Predictor,
    clap::Parser,
    settings::{build_config, build_file_path, command::Args},
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

mod environment;
mod error;
mod logging;
mod middleware;
mod server;
mod wrappers;

mod doc;
#[derive(Clone)]
struct Ports {
    http: String,
    https: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let args = Args::parse();

    let mut file_path = args.file_path;
    if file_path.is_empty() {
        file_path = build_file_path();
    }

    let config = build_config(args.env_config, &file_path)?;
    let _logging = logging::init_logging(&config.logging);

    let predictor = Predictor::build(&config, None)?;
    let token = predictor.token().clone();
    let app = build_app(predictor, build_routes_config());

    let http_address = build_address_http();
    let listener_http = TcpListener::bind(&http_address).await.map_err(|e| {
        Error::Server(format!("Can not bind {}: {}", http_address, e))
    })?;

    let https_address = build_address_https();
    if !https_address.is_empty() {
        let https_address =
            https_address.parse::<SocketAddr>().map_err(|e| {
                Error::Server(format!(
                    "Invalid HTTPS address {}: {}",
                    https_address, e
                ))
            })?;

        tokio::spawn(async move {
            if let Err(e) =
                redirect_http_to_https(https_address.port(), listener_http)
                    .await
            {
                error!("HTTP redirect stopped: {}", e);
            }
        });
        rustls::crypto::ring::default_provider()
            .install_default()
            .map_err(|_| {
                Error::Server("Can not install the TLS crypto provider".to_owned())
            })?;

        let tls = RustlsConfig::from_pem_file(
            PathBuf::from(&build_https_cert()),
            PathBuf::from(&build_https_private_key()),
        )
        .await
        .map_err(|e| Error::Server(format!("Can not load TLS material: {}", e)))?;

        let handle = Handle::new();

        let handle_clone = handle.clone();
        tokio::spawn(async move {
            token.cancelled().await;
            handle.graceful_shutdown(None);
        });

        info!("Serving on https://{}", https_address);
        axum_server::bind_rustls(https_address, tls)
            .handle(handle_clone)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|e| Error::Server(e.to_string()))?;
    } else {
        info!("Serving on http://{}", http_address);
        axum::serve(
            listener_http,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            token.cancelled().await;
        })
        .await
        .map_err(|e| Error::Server(e.to_string()))?;
    }

    info!("Server stopped");
    Ok(())
}

fn make_https(host: String, uri: Uri, ports: Ports) -> Result<Uri, BoxError> {
    let mut parts = uri.into_parts();

    parts.scheme = Some(axum::http::uri::Scheme::HTTPS);

    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }

    let https_host = host.replace(&ports.http, &ports.https);
    parts.authority = Some(https_host.parse()?);

    Ok(Uri::from_parts(parts)?)
}

async fn redirect_http_to_https(
    https: u16,
    listener_http: TcpListener,
) -> Result<(), Error> {
    let http = listener_http
        .local_addr()
        .map_err(|e| Error::Server(e.to_string()))?
        .port();
    let ports = Ports {
        https: https.to_string(),
        http: http.to_string(),
    };

    let redirect = move |Host(host): Host, uri: Uri| async move {
        match make_https(host, uri, ports) {
            Ok(uri) => Ok(Redirect::permanent(&uri.to_string())),
            Err(error) => {
                warn!(%error, "failed to convert URI to HTTPS");
                Err(StatusCode::BAD_REQUEST)
            }
        }
    };

    axum::serve(listener_http, redirect.into_make_service())
        .await
        .map_err(|e| Error::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Ports {
        Ports {
            http: "5000".to_owned(),
            https: "5443".to_owned(),
        }
    }

    #[test]
    fn test_make_https() {
        let uri: Uri = "/predict?debug=1".parse().unwrap();
        let https = make_https("localhost:5000".to_owned(), uri, ports()).unwrap();
        assert_eq!(https.to_string(), "https://localhost:5443/predict?debug=1");

        let uri: Uri = "http://localhost:5000".parse().unwrap();
        let https = make_https("localhost:5000".to_owned(), uri, ports()).unwrap();
        assert_eq!(https.to_string(), "https://localhost:5443/");
    }

    #[test]
    fn test_make_https_invalid_host() {
        let uri: Uri = "/predict".parse().unwrap();
        assert!(make_https("bad host".to_owned(), uri, ports()).is_err());
    }
}
