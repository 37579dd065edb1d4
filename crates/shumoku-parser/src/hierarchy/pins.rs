use std::collections::HashMap;

use log::warn;

use shumoku_core::model::{Endpoint, NetworkGraph};

use crate::error::{ParseWarning, WarningCode};

/// Rewrites every `{node: subgraph, pin}` endpoint to the device it resolves to.
///
/// The lookup is built from the final pin list of every subgraph. Links with
/// an endpoint that cannot be resolved are dropped with an
/// [`WarningCode::UnresolvedPin`] warning, so no pin reference survives.
/// A port named by a resolved pin is registered on its device.
pub(crate) fn resolve_pin_endpoints(graph: &mut NetworkGraph, warnings: &mut Vec<ParseWarning>) {
    let targets: HashMap<(&str, &str), Endpoint> = graph
        .subgraphs
        .iter()
        .flat_map(|subgraph| {
            subgraph.pins.iter().filter_map(move |pin| {
                let device = pin.device.as_deref()?;
                let endpoint = match &pin.port {
                    Some(port) => Endpoint::port(device, port.as_str()),
                    None => Endpoint::node(device),
                };
                Some(((subgraph.id.as_str(), pin.id.as_str()), endpoint))
            })
        })
        .collect();

    let mut resolved_links = Vec::with_capacity(graph.links.len());
    let mut pin_ports: Vec<(String, String)> = Vec::new();
    for (index, mut link) in std::mem::take(&mut graph.links).into_iter().enumerate() {
        let mut unresolved = None;
        for endpoint in [&mut link.from, &mut link.to] {
            if let Endpoint::Pin { subgraph, pin } = endpoint {
                match targets.get(&(subgraph.as_str(), pin.as_str())) {
                    Some(target) => {
                        if let Endpoint::Port { node, port } = target {
                            pin_ports.push((node.clone(), port.clone()));
                        }
                        *endpoint = target.clone();
                    }
                    None => {
                        unresolved = Some((subgraph.clone(), pin.clone()));
                        break;
                    }
                }
            }
        }

        match unresolved {
            None => resolved_links.push(link),
            Some((subgraph, pin)) => {
                let key = link.key(index);
                warn!(link = key, subgraph, pin; "Dropping link with unresolved pin");
                warnings.push(
                    ParseWarning::new(
                        WarningCode::UnresolvedPin,
                        format!("link `{key}` references pin `{subgraph}#{pin}` which resolves to no device"),
                    )
                    .with_subgraph(subgraph),
                );
            }
        }
    }
    graph.links = resolved_links;

    for (node_id, port) in pin_ports {
        if let Some(node) = graph.nodes.iter_mut().find(|node| node.id == node_id) {
            node.ports.entry(port).or_default();
        }
    }
}
