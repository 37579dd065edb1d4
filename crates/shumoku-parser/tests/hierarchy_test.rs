//! Integration tests for multi-file topology resolution
//!
//! All files live in a [`MemoryFileResolver`], so the tests exercise exactly
//! the same code paths as the filesystem resolver without touching disk.

use shumoku_core::model::{Endpoint, NodeKind};
use shumoku_parser::{
    HierarchicalParser, MemoryFileResolver, ParseError, ROOT_SHEET, Severity, WarningCode,
};

const ROOT: &str = r#"
name: campus
nodes:
  - id: edge-rtr
    type: router
    parent: wan
subgraphs:
  - id: wan
    label: WAN Edge
  - id: dc1
    label: Datacenter 1
    file: ./dc1.yaml
    pins:
      - id: uplink
        direction: out
links:
  - id: wan-uplink
    from: { node: dc1, pin: uplink }
    to: edge-rtr
    bandwidth: 100G
"#;

const DC1: &str = r#"
nodes:
  - id: core-sw
    type: l3-switch
  - id: srv1
    parent: rack1
subgraphs:
  - id: rack1
    file: racks/rack1.yaml
links:
  - id: core-srv
    from: core-sw
    to: srv1
pins:
  - id: uplink
    device: core-sw
    port: eth0
"#;

const RACK1: &str = r#"
nodes:
  - id: tor1
  - id: host1
    parent: row-a
subgraphs:
  - id: row-a
links:
  - from: tor1
    to: host1
"#;

fn campus() -> MemoryFileResolver {
    MemoryFileResolver::new()
        .with_file("dc1.yaml", DC1)
        .with_file("racks/rack1.yaml", RACK1)
}

#[tokio::test]
async fn test_merged_node_count_is_sum_of_files() {
    let parser = HierarchicalParser::new(campus());
    let result = parser.parse(ROOT, "root.yaml").await.unwrap();

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    // root: 1, dc1: 2, rack1: 2
    assert_eq!(result.graph.nodes.len(), 5);
    assert!(
        result
            .graph
            .nodes
            .iter()
            .all(|node| !node.id.starts_with("__export_") && !node.is_export_connector())
    );
    assert!(
        result
            .graph
            .links
            .iter()
            .all(|link| !link.is_export_connector())
    );
}

#[tokio::test]
async fn test_child_parents_are_namespaced() {
    let parser = HierarchicalParser::new(campus());
    let result = parser.parse(ROOT, "root.yaml").await.unwrap();
    let graph = &result.graph;

    assert_eq!(graph.node("core-sw").unwrap().parent.as_deref(), Some("dc1"));
    assert_eq!(graph.node("srv1").unwrap().parent.as_deref(), Some("dc1/rack1"));
    assert_eq!(graph.node("tor1").unwrap().parent.as_deref(), Some("dc1/rack1"));
    assert_eq!(
        graph.node("host1").unwrap().parent.as_deref(),
        Some("dc1/rack1/row-a")
    );

    let row = graph.subgraph("dc1/rack1/row-a").unwrap();
    assert_eq!(row.parent.as_deref(), Some("dc1/rack1"));
    assert!(
        graph
            .links
            .iter()
            .any(|link| link.id.as_deref() == Some("dc1/core-srv"))
    );
}

#[tokio::test]
async fn test_pin_link_resolves_to_device_port() {
    let parser = HierarchicalParser::new(campus());
    let result = parser.parse(ROOT, "root.yaml").await.unwrap();

    let link = result
        .graph
        .links
        .iter()
        .find(|link| link.id.as_deref() == Some("wan-uplink"))
        .unwrap();
    assert_eq!(link.from, Endpoint::port("core-sw", "eth0"));
    assert_eq!(link.to, Endpoint::node("edge-rtr"));
    // dc1.yaml never declares the port; the pin alone registers it.
    let core_sw = result.graph.node("core-sw").unwrap();
    assert!(core_sw.ports.contains_key("eth0"));
    assert!(
        result
            .graph
            .links
            .iter()
            .all(|link| !link.from.is_pin() && !link.to.is_pin())
    );
}

#[tokio::test]
async fn test_child_sheet_has_annotated_export_connector() {
    let parser = HierarchicalParser::new(campus());
    let result = parser.parse(ROOT, "root.yaml").await.unwrap();

    let sheet = result.sheet("dc1").unwrap();
    assert_eq!(sheet.parent_sheet.as_deref(), Some(ROOT_SHEET));
    assert_eq!(sheet.breadcrumb, vec!["root", "dc1"]);

    let connector = sheet.graph.node("__export_uplink").unwrap();
    assert_eq!(connector.primary_label(), "WAN Edge");
    let NodeKind::ExportConnector(export) = &connector.kind else {
        panic!("expected an export connector, got {:?}", connector.kind);
    };
    assert_eq!(export.local_device, "core-sw");
    assert_eq!(export.local_port.as_deref(), Some("eth0"));
    let destination = export.destination.as_ref().unwrap();
    assert_eq!(destination.device, "edge-rtr");
    assert_eq!(destination.subgraph_id.as_deref(), Some("wan"));

    assert!(
        sheet
            .graph
            .links
            .iter()
            .any(|link| link.id.as_deref() == Some("__export_link_uplink"))
    );
}

#[tokio::test]
async fn test_pin_device_in_nested_file_gets_export_connector() {
    let root = r#"
nodes:
  - id: edge-rtr
subgraphs:
  - id: dc1
    file: dc1.yaml
    pins:
      - id: uplink
links:
  - from: { node: dc1, pin: uplink }
    to: edge-rtr
"#;
    let dc1 = r#"
subgraphs:
  - id: rack1
    file: rack1.yaml
pins:
  - id: uplink
    device: tor1
"#;
    let resolver = MemoryFileResolver::new()
        .with_file("dc1.yaml", dc1)
        .with_file("rack1.yaml", "nodes:\n  - id: tor1\n");
    let parser = HierarchicalParser::new(resolver);

    let result = parser.parse(root, "root.yaml").await.unwrap();
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(result.graph.links[0].from, Endpoint::node("tor1"));

    let sheet = result.sheet("dc1").unwrap();
    let connector = sheet.graph.node("__export_uplink").unwrap();
    let NodeKind::ExportConnector(export) = &connector.kind else {
        panic!("expected an export connector, got {:?}", connector.kind);
    };
    assert_eq!(export.local_device, "tor1");
    assert_eq!(export.destination.as_ref().unwrap().device, "edge-rtr");

    let link = sheet
        .graph
        .links
        .iter()
        .find(|link| link.id.as_deref() == Some("__export_link_uplink"))
        .unwrap();
    assert_eq!(link.from, Endpoint::node("rack1"));
    assert_eq!(link.to, Endpoint::node("__export_uplink"));
}

#[tokio::test]
async fn test_sheet_map_keys_and_views() {
    let parser = HierarchicalParser::new(campus());
    let result = parser.parse(ROOT, "root.yaml").await.unwrap();

    let keys: Vec<&str> = result.sheets.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["root", "dc1", "dc1/rack1"]);

    // The root view is the root file alone, pin references untouched.
    let root = result.root_sheet().unwrap();
    assert_eq!(root.graph.nodes.len(), 1);
    assert!(root.graph.links[0].from.is_pin());
    let declared = root.graph.subgraph("dc1").unwrap().pin("uplink").unwrap();
    assert_eq!(declared.device.as_deref(), Some("core-sw"));

    let rack = result.sheet("dc1/rack1").unwrap();
    assert_eq!(rack.parent_sheet.as_deref(), Some("dc1"));
    assert_eq!(rack.breadcrumb, vec!["root", "dc1", "dc1/rack1"]);
    assert_eq!(rack.graph.node("host1").unwrap().parent.as_deref(), Some("row-a"));
}

#[tokio::test]
async fn test_two_file_cycle_terminates_with_warning() {
    let resolver = MemoryFileResolver::new()
        .with_file(
            "a.yaml",
            "nodes:\n  - id: a1\nsubgraphs:\n  - id: sb\n    file: b.yaml\n",
        )
        .with_file(
            "b.yaml",
            "nodes:\n  - id: b1\nsubgraphs:\n  - id: sa\n    file: a.yaml\n",
        );
    let parser = HierarchicalParser::new(resolver);

    let result = parser.parse_file("a.yaml").await.unwrap();

    assert_eq!(result.warnings.len(), 1);
    let warning = &result.warnings[0];
    assert_eq!(warning.code, WarningCode::CircularReference);
    assert_eq!(warning.severity, Severity::Error);
    assert_eq!(warning.file.as_deref(), Some("a.yaml"));
    assert!(result.has_errors());

    assert!(result.graph.node("a1").is_some());
    assert!(result.graph.node("b1").is_some());
}

#[tokio::test]
async fn test_three_file_cycle_is_detected() {
    let resolver = MemoryFileResolver::new()
        .with_file("a.yaml", "subgraphs:\n  - id: b\n    file: b.yaml\n")
        .with_file("b.yaml", "subgraphs:\n  - id: c\n    file: c.yaml\n")
        .with_file("c.yaml", "subgraphs:\n  - id: a\n    file: ./a.yaml\n");
    let parser = HierarchicalParser::new(resolver);

    let result = parser.parse_file("./a.yaml").await.unwrap();

    let codes: Vec<WarningCode> = result.warnings.iter().map(|w| w.code).collect();
    assert_eq!(codes, vec![WarningCode::CircularReference]);
    assert_eq!(result.warnings[0].subgraph.as_deref(), Some("a"));
}

#[tokio::test]
async fn test_diamond_include_is_not_a_cycle() {
    let resolver = MemoryFileResolver::new()
        .with_file(
            "root.yaml",
            "subgraphs:\n  - id: left\n    file: shared.yaml\n  - id: right\n    file: shared.yaml\n",
        )
        .with_file("shared.yaml", "nodes:\n  - id: shared-sw\n");
    let parser = HierarchicalParser::new(resolver);

    let result = parser.parse_file("root.yaml").await.unwrap();

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert!(result.sheet("left").is_some());
    assert!(result.sheet("right").is_some());
}

#[tokio::test]
async fn test_missing_file_is_a_warning_not_an_error() {
    let root = r#"
nodes:
  - id: r1
subgraphs:
  - id: gone
    file: missing.yaml
  - id: broken
    file: broken.yaml
"#;
    let resolver = MemoryFileResolver::new().with_file("broken.yaml", "nodes: [ {id: x");
    let parser = HierarchicalParser::new(resolver);

    let result = parser.parse(root, "root.yaml").await.unwrap();

    let codes: Vec<WarningCode> = result.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        codes,
        vec![WarningCode::FileLoadError, WarningCode::FileLoadError]
    );
    assert_eq!(result.warnings[0].subgraph.as_deref(), Some("gone"));
    assert_eq!(result.warnings[1].subgraph.as_deref(), Some("broken"));
    assert_eq!(result.graph.nodes.len(), 1);
    assert!(result.sheet("gone").is_none());
}

#[tokio::test]
async fn test_unresolved_pin_drops_link() {
    let root = r#"
nodes:
  - id: r1
subgraphs:
  - id: dc1
    pins:
      - id: uplink
links:
  - from: { node: dc1, pin: uplink }
    to: r1
"#;
    let parser = HierarchicalParser::new(MemoryFileResolver::new());

    let result = parser.parse(root, "root.yaml").await.unwrap();

    assert!(result.graph.links.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, WarningCode::UnresolvedPin);
    assert_eq!(result.warnings[0].severity, Severity::Warning);
    assert!(!result.has_errors());
}

#[tokio::test]
async fn test_parser_is_reusable_without_false_cycles() {
    let mut parser = HierarchicalParser::new(campus());

    let first = parser.parse(ROOT, "root.yaml").await.unwrap();
    parser.reset();
    let second = parser.parse(ROOT, "root.yaml").await.unwrap();
    let third = parser.parse(ROOT, "root.yaml").await.unwrap();

    assert!(second.warnings.is_empty());
    assert!(third.warnings.is_empty());
    assert_eq!(first.graph, third.graph);
}

#[tokio::test]
async fn test_malformed_root_is_an_error() {
    let parser = HierarchicalParser::new(MemoryFileResolver::new());
    let result = parser.parse("nodes:\n  - id: a\n  - id: a\n", "root.yaml").await;
    assert!(matches!(result, Err(ParseError::Validation { .. })));

    let result = parser.parse_file("nowhere.yaml").await;
    assert!(matches!(result, Err(ParseError::Io { .. })));
}
