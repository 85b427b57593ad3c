//! HTTP-level tests for the hybrid documentation scenario.
//!
//! A local services router serves a routed `/districts/all` endpoint
//! (documented by the provider's static document, excluded from
//! scanning) and a non-routed `/info/fqdn` endpoint (documented from its
//! metadata). The published document is assembled once at activation and
//! served over a real socket.

use std::io::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use alexandria_config::{AlexandriaConfig, DocumentConfig, HookConfig, ScanConfig};
use alexandria_model::{Document, EndpointMeta, Method};
use alexandria_pipeline::{BoxError, DocumentBuilder, DocumentPublisher, HookRegistry};
use alexandria_server::{
    DocumentService, EndpointResponse, HandlerRegistry, Server, ShutdownSignal,
};

const ROUTING_FQDN_EXTENSION: &str = "x-routing-fqdn";
const LOCAL_ROUTER_FQDN: &str = "local.router.example";

const STATIC_SPEC: &str = r"
openapi: 3.0.3
info:
  title: Districts API
  version: 1.0.0
paths:
  /districts/all:
    get:
      operationId: getAllDistricts
      summary: All districts served by the provider
      x-routing-fqdn: placeholder
      responses:
        '200':
          description: All districts
          content:
            application/json: {}
";

struct TestDeployment {
    addr: SocketAddr,
    shutdown: ShutdownSignal,
    _static_spec: tempfile::NamedTempFile,
}

impl Drop for TestDeployment {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

fn router_endpoints() -> Vec<EndpointMeta> {
    vec![
        EndpointMeta::new("routedAllDistricts", "router::rest::routed", "/districts/all")
            .method(Method::Get)
            .response("200", "All districts", Some("application/json")),
        EndpointMeta::new("getFqdn", "router::rest", "/info/fqdn")
            .method(Method::Get)
            .summary("Local router host name")
            .response("200", "Router FQDN", Some("text/plain")),
    ]
}

/// Deploys the router application: assemble and publish the document,
/// then serve it and the endpoints on an ephemeral port.
async fn deploy() -> TestDeployment {
    let mut static_spec = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(static_spec, "{STATIC_SPEC}").unwrap();

    let config = AlexandriaConfig::builder()
        .document(DocumentConfig {
            enabled: true,
            serve_path: "/openapi".to_string(),
            static_path: Some(static_spec.path().to_path_buf()),
        })
        .scan(ScanConfig {
            enabled: true,
            exclude: vec!["router::rest::routed".to_string()],
        })
        .hooks(HookConfig {
            model_reader: Some("router-model-reader".to_string()),
            filter: Some("router-filter".to_string()),
        })
        .build();

    let mut hooks = HookRegistry::new();
    hooks.register(
        "router-model-reader",
        |mut doc: Document| -> Result<Document, BoxError> {
            doc.info.description = Some("Generated".to_string());
            Ok(doc)
        },
    );
    hooks.register(
        "router-filter",
        |mut doc: Document| -> Result<Document, BoxError> {
            for item in doc.paths.values_mut() {
                for method in Method::ALL {
                    if let Some(op) = item.operation_mut(method) {
                        if op.extension(ROUTING_FQDN_EXTENSION).is_some() {
                            op.set_extension(
                                ROUTING_FQDN_EXTENSION,
                                serde_json::json!(LOCAL_ROUTER_FQDN),
                            );
                        }
                    }
                }
            }
            Ok(doc)
        },
    );

    let endpoints = router_endpoints();
    let publisher = Arc::new(DocumentPublisher::new());
    let builder = DocumentBuilder::new(config.clone())
        .endpoints(endpoints.clone())
        .hooks(hooks);
    publisher.rebuild(&builder).unwrap();

    let mut handlers = HandlerRegistry::new();
    handlers.register("routedAllDistricts", |_m| async move {
        EndpointResponse::json(&serde_json::json!([
            { "code": "north", "name": "North District" },
            { "code": "south", "name": "South District" },
        ]))
    });
    handlers.register("getFqdn", |_m| async move {
        Ok(EndpointResponse::text(LOCAL_ROUTER_FQDN))
    });

    let server = Server::builder()
        .http_addr("127.0.0.1:0")
        .endpoints(&endpoints)
        .handlers(handlers)
        .document_service(DocumentService::new(publisher, &config.document))
        .build();

    let bound = server.bind().await.unwrap();
    let addr = bound.local_addr();
    let shutdown = ShutdownSignal::new();
    let serve_shutdown = shutdown.clone();
    tokio::spawn(async move {
        bound.serve(serve_shutdown).await.unwrap();
    });

    TestDeployment {
        addr,
        shutdown,
        _static_spec: static_spec,
    }
}

/// Minimal HTTP/1.1 GET; returns (status, headers, body).
async fn http_get(addr: SocketAddr, path: &str, accept: Option<&str>) -> (u16, String, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let accept_line = accept.map_or_else(String::new, |a| format!("Accept: {a}\r\n"));
    let request =
        format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n{accept_line}Connection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8(raw).unwrap();

    let (head, body) = text.split_once("\r\n\r\n").unwrap();
    let status: u16 = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap();

    (status, head.to_ascii_lowercase(), body.to_string())
}

#[tokio::test]
async fn routed_endpoint_answers_json() {
    let deployment = deploy().await;
    let (status, headers, body) = http_get(deployment.addr, "/districts/all", None).await;

    assert_eq!(status, 200);
    assert!(headers.contains("content-type: application/json"));
    assert!(body.contains("North District"));
}

#[tokio::test]
async fn non_routed_endpoint_answers_text_plain() {
    let deployment = deploy().await;
    let (status, headers, body) = http_get(deployment.addr, "/info/fqdn", None).await;

    assert_eq!(status, 200);
    assert!(headers.contains("content-type: text/plain;charset=utf-8"));
    assert_eq!(body, LOCAL_ROUTER_FQDN);
}

#[tokio::test]
async fn document_contains_static_path_for_excluded_endpoint() {
    let deployment = deploy().await;
    let (status, headers, body) = http_get(deployment.addr, "/openapi", None).await;

    assert_eq!(status, 200);
    assert!(headers.contains("content-type: application/yaml"));
    // The routed endpoint is excluded from scanning, yet its path is
    // documented, sourced from the static document.
    assert!(body.contains("/districts/all:"));
    assert!(body.contains("getAllDistricts"));
}

#[tokio::test]
async fn document_contains_scanned_non_routed_endpoint() {
    let deployment = deploy().await;
    let (_, _, body) = http_get(deployment.addr, "/openapi", None).await;

    assert!(body.contains("/info/fqdn:"));
    assert!(body.contains("Local router host name"));
}

#[tokio::test]
async fn document_reflects_model_reader_info_change() {
    let deployment = deploy().await;
    let (_, _, body) = http_get(deployment.addr, "/openapi", None).await;

    assert!(body.contains("Generated"));
}

#[tokio::test]
async fn document_reflects_filter_extension_rewrite() {
    let deployment = deploy().await;
    let (_, _, body) = http_get(deployment.addr, "/openapi", None).await;

    assert!(body.contains(LOCAL_ROUTER_FQDN));
    assert!(!body.contains("placeholder"));
}

#[tokio::test]
async fn document_negotiates_json() {
    let deployment = deploy().await;
    let (status, headers, body) =
        http_get(deployment.addr, "/openapi", Some("application/json")).await;

    assert_eq!(status, 200);
    assert!(headers.contains("content-type: application/json"));

    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["info"]["description"], "Generated");
}

#[tokio::test]
async fn repeated_document_requests_serve_same_build() {
    let deployment = deploy().await;
    let (_, _, first) = http_get(deployment.addr, "/openapi", None).await;
    let (_, _, second) = http_get(deployment.addr, "/openapi", None).await;

    assert_eq!(first, second);
}
