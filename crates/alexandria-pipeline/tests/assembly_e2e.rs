//! End-to-end assembly tests for the hybrid documentation scenario.
//!
//! A local services router serves endpoints that proxy to a remote
//! provider ("routed" endpoints) alongside its own ("non-routed")
//! endpoints. The routed endpoints are documented by a curated static
//! document and excluded from scanning; the non-routed endpoints are
//! documented from their metadata; a model reader rewrites `info` and a
//! filter resolves the routing FQDN extension to its runtime value.

use std::io::Write;

use alexandria_config::{AlexandriaConfig, DocumentConfig, HookConfig, ScanConfig};
use alexandria_model::{Document, DocumentFormat, EndpointMeta, Method};
use alexandria_pipeline::{
    BoxError, BuildError, DocumentBuilder, DocumentPublisher, HookRegistry,
};

const ROUTING_FQDN_EXTENSION: &str = "x-routing-fqdn";
const LOCAL_ROUTER_FQDN: &str = "local.router.example";

const STATIC_SPEC: &str = r"
openapi: 3.0.3
info:
  title: Districts API
  version: 1.0.0
  description: Curated documentation delivered by the service provider
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

fn write_static_spec() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "{STATIC_SPEC}").unwrap();
    file
}

fn router_endpoints() -> Vec<EndpointMeta> {
    vec![
        // Routed endpoint: excluded from scanning, documented statically.
        EndpointMeta::new("routedAllDistricts", "router::rest::routed", "/districts/all")
            .method(Method::Get)
            .response("200", "All districts", Some("application/json")),
        // Non-routed endpoint: documented purely from metadata.
        EndpointMeta::new("getFqdn", "router::rest", "/info/fqdn")
            .method(Method::Get)
            .summary("Local router host name")
            .response("200", "Router FQDN", Some("text/plain")),
    ]
}

fn router_hooks() -> HookRegistry {
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
                for method in alexandria_model::Method::ALL {
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
    hooks
}

fn router_config(static_path: &std::path::Path) -> AlexandriaConfig {
    AlexandriaConfig::builder()
        .document(DocumentConfig {
            enabled: true,
            serve_path: "/openapi".to_string(),
            static_path: Some(static_path.to_path_buf()),
        })
        .scan(ScanConfig {
            enabled: true,
            exclude: vec!["router::rest::routed".to_string()],
        })
        .hooks(HookConfig {
            model_reader: Some("router-model-reader".to_string()),
            filter: Some("router-filter".to_string()),
        })
        .build()
}

fn assemble(static_path: &std::path::Path) -> Document {
    DocumentBuilder::new(router_config(static_path))
        .endpoints(router_endpoints())
        .hooks(router_hooks())
        .build()
        .unwrap()
}

#[test]
fn excluded_endpoint_is_documented_from_static_source_only() {
    let spec = write_static_spec();
    let doc = assemble(spec.path());

    // The path is present, sourced from the static document rather than
    // the scanner: its operation id is the curated one.
    let op = doc.operation("/districts/all", Method::Get).unwrap();
    assert_eq!(op.operation_id.as_deref(), Some("getAllDistricts"));
    assert_ne!(op.operation_id.as_deref(), Some("routedAllDistricts"));
}

#[test]
fn non_routed_endpoint_is_documented_from_metadata() {
    let spec = write_static_spec();
    let doc = assemble(spec.path());

    let op = doc.operation("/info/fqdn", Method::Get).unwrap();
    assert_eq!(op.operation_id.as_deref(), Some("getFqdn"));
    assert_eq!(op.summary.as_deref(), Some("Local router host name"));
    assert!(op.responses["200"].content.contains_key("text/plain"));
}

#[test]
fn model_reader_rewrites_info_description() {
    let spec = write_static_spec();
    let doc = assemble(spec.path());

    assert_eq!(doc.info.description.as_deref(), Some("Generated"));
    // The rest of the info block stays whatever the static source said.
    assert_eq!(doc.info.title, "Districts API");
    assert_eq!(doc.info.version, "1.0.0");
}

#[test]
fn filter_resolves_routing_fqdn_extension() {
    let spec = write_static_spec();
    let doc = assemble(spec.path());

    let op = doc.operation("/districts/all", Method::Get).unwrap();
    assert_eq!(
        op.extension(ROUTING_FQDN_EXTENSION),
        Some(&serde_json::json!(LOCAL_ROUTER_FQDN))
    );
}

#[test]
fn served_yaml_contains_scenario_markers() {
    let spec = write_static_spec();
    let publisher = DocumentPublisher::new();
    let builder = DocumentBuilder::new(router_config(spec.path()))
        .endpoints(router_endpoints())
        .hooks(router_hooks());

    publisher.rebuild(&builder).unwrap();
    let yaml = publisher
        .current()
        .unwrap()
        .body(DocumentFormat::Yaml)
        .to_string();

    assert!(yaml.contains("/districts/all:"), "static path survives");
    assert!(yaml.contains("/info/fqdn:"), "scanned path survives");
    assert!(yaml.contains("Generated"), "model reader output survives");
    assert!(yaml.contains(LOCAL_ROUTER_FQDN), "filter output survives");
}

#[test]
fn filter_only_ever_sees_model_reader_output() {
    // Swapping the hook order must be distinguishable: the filter
    // records what it observed in `info.description`.
    let spec = write_static_spec();

    let mut hooks = HookRegistry::new();
    hooks.register(
        "router-model-reader",
        |mut doc: Document| -> Result<Document, BoxError> {
            doc.info.description = Some("Generated".to_string());
            Ok(doc)
        },
    );
    hooks.register(
        "recording-filter",
        |mut doc: Document| -> Result<Document, BoxError> {
            let observed = doc.info.description.clone().unwrap_or_default();
            doc.info.description = Some(format!("filter-observed:{observed}"));
            Ok(doc)
        },
    );

    let mut config = router_config(spec.path());
    config.hooks.filter = Some("recording-filter".to_string());

    let doc = DocumentBuilder::new(config)
        .endpoints(router_endpoints())
        .hooks(hooks)
        .build()
        .unwrap();

    assert_eq!(
        doc.info.description.as_deref(),
        Some("filter-observed:Generated")
    );
}

#[test]
fn rebuild_from_unchanged_inputs_is_structurally_identical() {
    let spec = write_static_spec();
    let a = assemble(spec.path());
    let b = assemble(spec.path());
    assert_eq!(a, b);
}

#[test]
fn failed_hook_leaves_previous_document_served() {
    let spec = write_static_spec();
    let publisher = DocumentPublisher::new();

    let good = DocumentBuilder::new(router_config(spec.path()))
        .endpoints(router_endpoints())
        .hooks(router_hooks());
    publisher.rebuild(&good).unwrap();

    let mut bad_hooks = router_hooks();
    bad_hooks.register(
        "router-filter",
        |_doc: Document| -> Result<Document, BoxError> { Err("redaction failed".into()) },
    );
    let bad = DocumentBuilder::new(router_config(spec.path()))
        .endpoints(router_endpoints())
        .hooks(bad_hooks);

    let result = publisher.rebuild(&bad);
    assert!(matches!(result, Err(BuildError::Hook(_))));

    // The last good document keeps being served.
    let current = publisher.current().unwrap();
    assert_eq!(
        current.document().info.description.as_deref(),
        Some("Generated")
    );
}

#[test]
fn malformed_static_source_fails_build_without_publishing() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(file, "openapi: [unclosed").unwrap();

    let publisher = DocumentPublisher::new();
    let builder = DocumentBuilder::new(router_config(file.path()))
        .endpoints(router_endpoints())
        .hooks(router_hooks());

    let result = publisher.rebuild(&builder);
    assert!(matches!(result, Err(BuildError::Load(_))));
    assert!(!publisher.has_published());
}
