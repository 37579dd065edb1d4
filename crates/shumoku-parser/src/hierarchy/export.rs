//! Export connectors: the "also connects outside this sheet" markers.
//!
//! A child sheet viewed on its own cannot show the parent's devices, so each
//! resolved pin becomes a synthetic stadium node linked to the local device.
//! Once the parent is parsed, the connector learns where it really leads.

use log::{debug, warn};

use shumoku_core::model::{
    EXPORT_LINK_PREFIX, EXPORT_NODE_PREFIX, Endpoint, ExportConnector, ExportDestination, Link,
    NetworkGraph, Node, NodeKind, NodeShape, PinDirection,
};

pub(crate) fn export_node_id(pin_id: &str) -> String {
    format!("{EXPORT_NODE_PREFIX}{pin_id}")
}

pub(crate) fn export_link_id(pin_id: &str) -> String {
    format!("{EXPORT_LINK_PREFIX}{pin_id}")
}

/// Adds one connector node and link per pin of `graph` that names a device.
///
/// `in` pins point from the connector to the device, every other direction
/// from the device to the connector. A device that lives in a nested include
/// is not drawn on this sheet, so its connector attaches to the subgraph
/// holding it instead, looked up in `merged` (this document with its
/// includes). Pins whose device is found nowhere are skipped.
pub(crate) fn synthesize_export_connectors(graph: &mut NetworkGraph, merged: &NetworkGraph) {
    let pins = graph.pins.clone();

    for pin in pins {
        let Some(device) = pin.device.as_deref() else {
            continue;
        };
        let position = graph.nodes.iter().position(|node| node.id == device);
        let local = match (position, &pin.port) {
            (Some(index), Some(port)) => {
                graph.nodes[index].ports.entry(port.clone()).or_default();
                Endpoint::port(device, port.as_str())
            }
            (Some(_), None) => Endpoint::node(device),
            (None, _) => match nested_owner(graph, merged, device) {
                Some(subgraph_id) => {
                    debug!(pin = pin.id, device, subgraph = subgraph_id; "Pin device is nested, connector attaches to its subgraph");
                    Endpoint::node(subgraph_id)
                }
                None => {
                    warn!(pin = pin.id, device; "Pin device not found, no export connector");
                    continue;
                }
            },
        };

        let node_id = export_node_id(&pin.id);
        let mut node = Node::new(node_id.clone())
            .with_label(pin.display_label())
            .with_shape(NodeShape::Stadium);
        node.kind = NodeKind::ExportConnector(ExportConnector {
            pin_id: pin.id.clone(),
            direction: pin.direction,
            local_device: device.to_string(),
            local_port: pin.port.clone(),
            destination: None,
        });

        let connector = Endpoint::node(node_id);
        let (from, to) = match pin.direction {
            PinDirection::In => (connector, local),
            PinDirection::Out | PinDirection::Bidirectional => (local, connector),
        };

        graph.nodes.push(node);
        graph
            .links
            .push(Link::new(from, to).with_id(export_link_id(&pin.id)));
    }
}

/// Top-level subgraph of `own` whose include brought `device` into `merged`.
fn nested_owner(own: &NetworkGraph, merged: &NetworkGraph, device: &str) -> Option<String> {
    let parent = merged.node(device)?.parent.as_deref()?;
    let top = parent.split('/').next()?;
    own.subgraph(top).map(|subgraph| subgraph.id.clone())
}

/// Describes what `remote` is, as seen from the parent graph.
///
/// Pin references are followed to the device their pin resolves to. Returns
/// `None` when the remote end cannot be identified.
pub(crate) fn describe_remote(parent: &NetworkGraph, remote: &Endpoint) -> Option<ExportDestination> {
    match remote {
        Endpoint::Pin { subgraph, pin } => {
            let owner = parent.subgraph(subgraph)?;
            let pin = owner.pin(pin)?;
            Some(ExportDestination {
                subgraph_id: Some(owner.id.clone()),
                subgraph_label: Some(owner.label.clone()),
                device: pin.device.clone()?,
                port: pin.port.clone(),
            })
        }
        Endpoint::Node(node) | Endpoint::Port { node, .. } => {
            let containing = parent
                .node(node)
                .and_then(|node| node.parent.as_deref())
                .and_then(|id| parent.subgraph(id));
            Some(ExportDestination {
                subgraph_id: containing.map(|subgraph| subgraph.id.clone()),
                subgraph_label: containing.map(|subgraph| subgraph.label.clone()),
                device: node.clone(),
                port: remote.port_name().map(str::to_string),
            })
        }
    }
}

/// Records `destination` on the connector for `pin_id` in a sheet graph.
///
/// The connector is relabelled after the destination: its subgraph label
/// (with the device on a second line) or just the device.
pub(crate) fn annotate_destination(
    sheet: &mut NetworkGraph,
    pin_id: &str,
    destination: ExportDestination,
) -> bool {
    let node_id = export_node_id(pin_id);
    let Some(node) = sheet.nodes.iter_mut().find(|node| node.id == node_id) else {
        return false;
    };
    let NodeKind::ExportConnector(connector) = &mut node.kind else {
        return false;
    };

    let device_line = match &destination.port {
        Some(port) => format!("{}:{port}", destination.device),
        None => destination.device.clone(),
    };
    node.label = match &destination.subgraph_label {
        Some(label) => vec![label.clone(), device_line],
        None => vec![device_line],
    };
    connector.destination = Some(destination);
    true
}
