//! Folding a child document into the subgraph it fills.

use log::trace;

use shumoku_core::model::{NetworkGraph, Pin};

/// Namespaces `local` (a parent id from inside the child) under `subgraph_id`.
///
/// `None` means the item sat at the child's top level, so it now belongs
/// directly to the filled subgraph.
fn namespaced(subgraph_id: &str, local: Option<&str>) -> String {
    match local {
        Some(local) => format!("{subgraph_id}/{local}"),
        None => subgraph_id.to_string(),
    }
}

/// Merges `child` into `parent` as the content of `subgraph_id`.
///
/// Node ids are kept as-is; only containment is rewritten:
///
/// - nodes get `parent = subgraph_id` or `subgraph_id/<original parent>`
/// - subgraphs get their id and parent prefixed the same way
/// - links get their id (if any) prefixed; endpoints are cloned unchanged
///
/// Export connectors belong to the child's own sheet and are skipped.
pub(crate) fn merge_child(parent: &mut NetworkGraph, subgraph_id: &str, child: NetworkGraph) {
    let NetworkGraph {
        nodes,
        links,
        subgraphs,
        ..
    } = child;

    let before = parent.nodes.len();
    parent.nodes.extend(
        nodes
            .into_iter()
            .filter(|node| !node.is_export_connector())
            .map(|mut node| {
                node.parent = Some(namespaced(subgraph_id, node.parent.as_deref()));
                node
            }),
    );

    parent
        .subgraphs
        .extend(subgraphs.into_iter().map(|mut subgraph| {
            subgraph.id = format!("{subgraph_id}/{}", subgraph.id);
            subgraph.parent = Some(namespaced(subgraph_id, subgraph.parent.as_deref()));
            subgraph
        }));

    parent.links.extend(
        links
            .into_iter()
            .filter(|link| !link.is_export_connector())
            .map(|mut link| {
                link.id = link.id.map(|id| format!("{subgraph_id}/{id}"));
                link
            }),
    );

    trace!(
        subgraph = subgraph_id,
        nodes = parent.nodes.len() - before;
        "Merged child graph"
    );
}

/// Merges the pins a child document declares into the pins its parent declared.
///
/// The parent says a pin exists; the child says where it lands. A parent pin
/// without a device takes the child's device and port, keeping its own label
/// and direction. Pins only the child knows about are appended.
pub(crate) fn merge_pins(declared: &mut Vec<Pin>, child_pins: &[Pin]) {
    for child_pin in child_pins {
        match declared.iter_mut().find(|pin| pin.id == child_pin.id) {
            Some(pin) if pin.device.is_none() => {
                pin.device.clone_from(&child_pin.device);
                pin.port.clone_from(&child_pin.port);
                if pin.label.is_none() {
                    pin.label.clone_from(&child_pin.label);
                }
            }
            Some(_) => {}
            None => declared.push(child_pin.clone()),
        }
    }
}
