//! Basic compound layout engine.
//!
//! Every container (the top level and each subgraph) is arranged on its own.
//! Its direct members, nodes and child subgraphs, are ranked by longest path
//! over the links between their descendants. Ranks become rows (top to
//! bottom) or columns (left to right), and a subgraph is sized from its
//! arranged content. Placement then walks the containers top-down, after
//! which ports, pins and link routes are attached to the placed boxes.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, info, trace};
use petgraph::{
    algo::toposort,
    graph::{DiGraph, NodeIndex},
    visit::{DfsEvent, depth_first_search},
};

use shumoku_core::{
    geometry::{Bounds, Point, Size},
    layout::{
        LayoutResult, LinkLayout, NodeLayout, PinLayout, PortLayout, PortSide, SubgraphLayout,
        port_key,
    },
    model::{Direction, Endpoint, NetworkGraph, Node, PinDirection, Subgraph},
};

use super::{LayoutEngine, estimate_text_width, routing};
use crate::{ShumokuError, config::LayoutConfig};

const LABEL_FONT_SIZE: f32 = 13.0;
const LINE_HEIGHT: f32 = 16.0;
const ICON_HEIGHT: f32 = 36.0;
const PORT_SIZE: f32 = 8.0;
const EXPORT_HEIGHT: f32 = 44.0;

/// Something that occupies a slot in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Member<'g> {
    Node(&'g str),
    Subgraph(&'g str),
}

/// A container's members, relative to its content origin.
#[derive(Debug)]
struct Arrangement<'g> {
    size: Size,
    /// Member, top-left offset, size.
    members: Vec<(Member<'g>, Point, Size)>,
}

/// Containment lookup for one graph.
struct Scopes<'g> {
    graph: &'g NetworkGraph,
    subgraphs: HashMap<&'g str, &'g Subgraph>,
    /// Subgraph ids from the top level down to each member's container.
    chains: HashMap<Member<'g>, Vec<&'g str>>,
}

impl<'g> Scopes<'g> {
    fn new(graph: &'g NetworkGraph) -> Result<Self, ShumokuError> {
        let mut scopes = Self {
            graph,
            subgraphs: graph
                .subgraphs
                .iter()
                .map(|subgraph| (subgraph.id.as_str(), subgraph))
                .collect(),
            chains: HashMap::new(),
        };

        let members = graph
            .nodes
            .iter()
            .map(|node| Member::Node(&node.id))
            .chain(graph.subgraphs.iter().map(|sg| Member::Subgraph(&sg.id)));
        let mut chains = HashMap::new();
        for member in members {
            chains.insert(member, scopes.walk_chain(member)?);
        }
        scopes.chains = chains;
        Ok(scopes)
    }

    /// The subgraph directly containing `member`. Unknown parents and
    /// self-parented subgraphs count as top level.
    fn container(&self, member: Member<'g>) -> Option<&'g str> {
        let parent = match member {
            Member::Node(id) => self.graph.node(id)?.parent.as_deref()?,
            Member::Subgraph(id) => {
                let subgraph: &'g Subgraph = self.subgraphs.get(id).copied()?;
                let parent = subgraph.parent.as_deref()?;
                if parent == id {
                    return None;
                }
                parent
            }
        };
        self.subgraphs.contains_key(parent).then_some(parent)
    }

    fn walk_chain(&self, member: Member<'g>) -> Result<Vec<&'g str>, ShumokuError> {
        let mut chain = Vec::new();
        let mut current = self.container(member);
        while let Some(id) = current {
            if chain.contains(&id) {
                return Err(ShumokuError::Layout(format!(
                    "subgraph `{id}` is nested inside itself"
                )));
            }
            chain.push(id);
            current = self.container(Member::Subgraph(id));
        }
        chain.reverse();
        Ok(chain)
    }

    /// Direct members of `container`, nodes first, in declaration order.
    fn members(&self, container: Option<&str>) -> Vec<Member<'g>> {
        let nodes = self
            .graph
            .nodes
            .iter()
            .map(|node| Member::Node(node.id.as_str()));
        let subgraphs = self
            .graph
            .subgraphs
            .iter()
            .map(|subgraph| Member::Subgraph(subgraph.id.as_str()));
        nodes
            .chain(subgraphs)
            .filter(|&member| self.container(member) == container)
            .collect()
    }

    /// The member of `container` that holds `member`, or `member` itself.
    fn member_in(&self, member: Member<'g>, container: Option<&str>) -> Option<Member<'g>> {
        let chain = self.chains.get(&member)?;
        let path: Vec<Member<'g>> = chain
            .iter()
            .map(|&id| Member::Subgraph(id))
            .chain(std::iter::once(member))
            .collect();
        match container {
            None => path.first().copied(),
            Some(container) => path
                .iter()
                .position(|&step| step == Member::Subgraph(container))
                .and_then(|index| path.get(index + 1).copied()),
        }
    }

    /// What a link endpoint attaches to.
    fn endpoint_member(&self, endpoint: &'g Endpoint) -> Option<Member<'g>> {
        match endpoint {
            Endpoint::Pin { subgraph, .. } => self
                .subgraphs
                .contains_key(subgraph.as_str())
                .then_some(Member::Subgraph(subgraph.as_str())),
            Endpoint::Node(id) | Endpoint::Port { node: id, .. } => {
                if self.graph.node(id).is_some() {
                    Some(Member::Node(id.as_str()))
                } else if self.subgraphs.contains_key(id.as_str()) {
                    Some(Member::Subgraph(id.as_str()))
                } else {
                    None
                }
            }
        }
    }
}

/// Deterministic rank-based layout, sized by [`LayoutConfig`].
#[derive(Debug, Clone)]
pub struct BasicEngine {
    node_size: Size,
    node_spacing: f32,
    rank_spacing: f32,
    padding: f32,
    header: f32,
}

impl Default for BasicEngine {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl BasicEngine {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            node_size: config.node_size(),
            node_spacing: config.node_spacing(),
            rank_spacing: config.rank_spacing(),
            padding: config.subgraph_padding(),
            header: config.subgraph_header(),
        }
    }

    /// Lays out `graph`.
    ///
    /// # Errors
    ///
    /// Fails when subgraph containment is cyclic.
    pub fn calculate(&self, graph: &NetworkGraph) -> Result<LayoutResult, ShumokuError> {
        let scopes = Scopes::new(graph)?;
        let direction = graph.settings.direction;

        let mut arrangements = HashMap::new();
        self.arrange(&scopes, None, direction, &mut arrangements)?;

        let mut result = LayoutResult::default();
        self.place(None, Point::default(), &arrangements, &mut result);
        Self::place_pins(graph, &mut result);
        Self::place_ports(graph, &mut result);
        Self::route_links(graph, &mut result);
        result.bounds = result.compute_bounds();

        info!(
            nodes = result.nodes.len(),
            subgraphs = result.subgraphs.len(),
            links = result.links.len();
            "Layout calculated"
        );
        Ok(result)
    }

    fn arrange<'g>(
        &self,
        scopes: &Scopes<'g>,
        container: Option<&'g str>,
        direction: Direction,
        arrangements: &mut HashMap<Option<&'g str>, Arrangement<'g>>,
    ) -> Result<Size, ShumokuError> {
        let members = scopes.members(container);

        let mut sizes = Vec::with_capacity(members.len());
        for &member in &members {
            let size = match member {
                Member::Node(id) => scopes
                    .graph
                    .node(id)
                    .map_or(self.node_size, |node| self.node_size(node)),
                Member::Subgraph(id) => {
                    let content = self.arrange(scopes, Some(id), direction, arrangements)?;
                    let subgraph = scopes.subgraphs.get(id).copied();
                    self.subgraph_size(subgraph, content)
                }
            };
            sizes.push(size);
        }

        let ranks = Self::ranks(scopes, container, &members)?;
        trace!(container:?, members = members.len(); "Arranging container");

        let arrangement = self.stack(&members, &sizes, &ranks, direction);
        let size = arrangement.size;
        arrangements.insert(container, arrangement);
        Ok(size)
    }

    fn node_size(&self, node: &Node) -> Size {
        let text_width = node
            .label
            .iter()
            .map(|line| estimate_text_width(line, LABEL_FONT_SIZE))
            .fold(0.0, f32::max);
        let lines = node.label.len().max(1) as f32;

        if node.is_export_connector() {
            return Size::new(
                (text_width + 32.0).max(120.0),
                EXPORT_HEIGHT.max(lines * LINE_HEIGHT + 16.0),
            );
        }
        Size::new(
            self.node_size.width().max(text_width + 24.0),
            self.node_size
                .height()
                .max(ICON_HEIGHT + lines * LINE_HEIGHT + 24.0),
        )
    }

    fn subgraph_size(&self, subgraph: Option<&Subgraph>, content: Size) -> Size {
        let label = subgraph.map_or("", |sg| sg.label.as_str());
        // Room for the icon next to the label.
        let label_width = estimate_text_width(label, LABEL_FONT_SIZE) + 40.0;
        // Drill-down boundaries whose content lives in another file still
        // need room for the embedded sheet.
        let content = if content.is_zero() && subgraph.is_some_and(Subgraph::has_sheet) {
            self.node_size.scale(2.0)
        } else {
            content
        };
        Size::new(
            content.width().max(label_width) + 2.0 * self.padding,
            content.height() + 2.0 * self.padding + self.header,
        )
        .max(self.node_size)
    }

    /// Longest-path rank of every member, links between descendants included.
    fn ranks<'g>(
        scopes: &Scopes<'g>,
        container: Option<&str>,
        members: &[Member<'g>],
    ) -> Result<Vec<usize>, ShumokuError> {
        let mut dag = DiGraph::<usize, ()>::with_capacity(members.len(), scopes.graph.links.len());
        let indices: Vec<NodeIndex> = (0..members.len()).map(|i| dag.add_node(i)).collect();
        let positions: HashMap<Member<'g>, usize> = members
            .iter()
            .enumerate()
            .map(|(index, &member)| (member, index))
            .collect();

        let mut seen = HashSet::new();
        for link in &scopes.graph.links {
            let ends = (
                scopes
                    .endpoint_member(&link.from)
                    .and_then(|member| scopes.member_in(member, container)),
                scopes
                    .endpoint_member(&link.to)
                    .and_then(|member| scopes.member_in(member, container)),
            );
            let (Some(from), Some(to)) = ends else {
                continue;
            };
            let (Some(&a), Some(&b)) = (positions.get(&from), positions.get(&to)) else {
                continue;
            };
            if a != b && seen.insert((a, b)) {
                dag.add_edge(indices[a], indices[b], ());
            }
        }

        // Drop every edge the DFS classifies as a back edge.
        let mut back_edges = Vec::new();
        depth_first_search(&dag, dag.node_indices(), |event| {
            if let DfsEvent::BackEdge(u, v) = event {
                back_edges.push((u, v));
            }
        });
        for (u, v) in back_edges {
            if let Some(edge) = dag.find_edge(u, v) {
                dag.remove_edge(edge);
            }
        }

        let order = toposort(&dag, None).map_err(|cycle| {
            ShumokuError::Layout(format!(
                "link cycle through member #{} could not be broken",
                cycle.node_id().index()
            ))
        })?;

        let mut ranks = vec![0; members.len()];
        for node in order {
            let rank = ranks[dag[node]];
            for next in dag.neighbors(node) {
                let next_rank = &mut ranks[dag[next]];
                *next_rank = (*next_rank).max(rank + 1);
            }
        }
        Ok(ranks)
    }

    /// Stacks ranks along the main axis, centering each rank on the cross axis.
    fn stack<'g>(
        &self,
        members: &[Member<'g>],
        sizes: &[Size],
        ranks: &[usize],
        direction: Direction,
    ) -> Arrangement<'g> {
        let vertical = direction == Direction::TopToBottom;
        let main = |size: Size| if vertical { size.height() } else { size.width() };
        let cross = |size: Size| if vertical { size.width() } else { size.height() };

        let rank_count = ranks.iter().max().map_or(0, |max| max + 1);
        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
        for (index, &rank) in ranks.iter().enumerate() {
            rows[rank].push(index);
        }

        let row_cross: Vec<f32> = rows
            .iter()
            .map(|row| {
                let extent: f32 = row.iter().map(|&i| cross(sizes[i])).sum();
                extent + self.node_spacing * row.len().saturating_sub(1) as f32
            })
            .collect();
        let row_main: Vec<f32> = rows
            .iter()
            .map(|row| row.iter().map(|&i| main(sizes[i])).fold(0.0, f32::max))
            .collect();
        let total_cross = row_cross.iter().copied().fold(0.0, f32::max);
        let total_main = row_main.iter().sum::<f32>()
            + self.rank_spacing * rows.len().saturating_sub(1) as f32;

        let mut placed = Vec::with_capacity(members.len());
        let mut main_pos = 0.0;
        for (row_index, row) in rows.iter().enumerate() {
            let mut cross_pos = (total_cross - row_cross[row_index]) / 2.0;
            for &index in row {
                let size = sizes[index];
                let main_offset = main_pos + (row_main[row_index] - main(size)) / 2.0;
                let top_left = if vertical {
                    Point::new(cross_pos, main_offset)
                } else {
                    Point::new(main_offset, cross_pos)
                };
                placed.push((members[index], top_left, size));
                cross_pos += cross(size) + self.node_spacing;
            }
            main_pos += row_main[row_index] + self.rank_spacing;
        }

        let size = if vertical {
            Size::new(total_cross, total_main)
        } else {
            Size::new(total_main, total_cross)
        };
        Arrangement {
            size,
            members: placed,
        }
    }

    fn place<'g>(
        &self,
        container: Option<&'g str>,
        origin: Point,
        arrangements: &HashMap<Option<&'g str>, Arrangement<'g>>,
        result: &mut LayoutResult,
    ) {
        let Some(arrangement) = arrangements.get(&container) else {
            return;
        };

        for &(member, offset, size) in &arrangement.members {
            let top_left = origin.add_point(offset);
            let bounds = Bounds::new_from_top_left(top_left, size);
            match member {
                Member::Node(id) => {
                    result.nodes.insert(
                        id.to_string(),
                        NodeLayout {
                            id: id.to_string(),
                            position: bounds.center(),
                            size,
                        },
                    );
                }
                Member::Subgraph(id) => {
                    result.subgraphs.insert(
                        id.to_string(),
                        SubgraphLayout {
                            id: id.to_string(),
                            bounds,
                            pins: IndexMap::new(),
                        },
                    );
                    let content = arrangements
                        .get(&Some(id))
                        .map_or(Size::default(), |arrangement| arrangement.size);
                    let inner_width = size.width() - 2.0 * self.padding;
                    let content_origin = top_left.add_point(Point::new(
                        self.padding + (inner_width - content.width()) / 2.0,
                        self.padding + self.header,
                    ));
                    self.place(Some(id), content_origin, arrangements, result);
                }
            }
        }
    }

    /// Pins go on the top (in), bottom (out) or right (bidirectional) edge.
    fn place_pins(graph: &NetworkGraph, result: &mut LayoutResult) {
        for subgraph in &graph.subgraphs {
            let Some(layout) = result.subgraphs.get_mut(&subgraph.id) else {
                continue;
            };
            for (side, direction) in [
                (PortSide::Top, PinDirection::In),
                (PortSide::Bottom, PinDirection::Out),
                (PortSide::Right, PinDirection::Bidirectional),
            ] {
                let pins: Vec<_> = subgraph
                    .pins
                    .iter()
                    .filter(|pin| pin.direction == direction)
                    .collect();
                let count = pins.len() as f32;
                for (index, pin) in pins.into_iter().enumerate() {
                    let t = (index as f32 + 1.0) / (count + 1.0);
                    layout.pins.insert(
                        pin.id.clone(),
                        PinLayout {
                            id: pin.id.clone(),
                            position: routing::point_on_side(layout.bounds, side, t),
                            side,
                            direction,
                        },
                    );
                }
            }
        }
    }

    /// Bounds of whatever an endpoint attaches to.
    fn owner_bounds(result: &LayoutResult, endpoint: &Endpoint) -> Option<Bounds> {
        let id = endpoint.node_id();
        result
            .node(id)
            .map(NodeLayout::bounds)
            .or_else(|| result.subgraph(id).map(|subgraph| subgraph.bounds))
    }

    fn reference_point(result: &LayoutResult, endpoint: &Endpoint) -> Option<Point> {
        let pin = match endpoint {
            Endpoint::Pin { subgraph, pin } => {
                result.subgraph(subgraph).and_then(|sg| sg.pins.get(pin))
            }
            _ => None,
        };
        pin.map(|pin| pin.position)
            .or_else(|| Self::owner_bounds(result, endpoint).map(Bounds::center))
    }

    /// Ports sit on the side of their node facing the other end of their
    /// first link, spread evenly and ordered by where the links go.
    fn place_ports(graph: &NetworkGraph, result: &mut LayoutResult) {
        // (node, port) -> (side, sort key along that side)
        let mut requests: IndexMap<(String, String), (PortSide, f32)> = IndexMap::new();
        for link in &graph.links {
            for (local, remote) in [(&link.from, &link.to), (&link.to, &link.from)] {
                let Endpoint::Port { node, port } = local else {
                    continue;
                };
                let key = (node.clone(), port.clone());
                if requests.contains_key(&key) {
                    continue;
                }
                let (Some(bounds), Some(toward)) = (
                    result.node(node).map(NodeLayout::bounds),
                    Self::reference_point(result, remote),
                ) else {
                    continue;
                };
                let side = routing::facing_side(bounds, toward);
                let along = if side.is_vertical() {
                    toward.x()
                } else {
                    toward.y()
                };
                requests.insert(key, (side, along));
            }
        }
        for node in &graph.nodes {
            for port in node.ports.keys() {
                requests
                    .entry((node.id.clone(), port.clone()))
                    .or_insert((PortSide::Bottom, f32::MAX));
            }
        }

        let mut by_side: IndexMap<(String, PortSide), Vec<(String, f32)>> = IndexMap::new();
        for ((node, port), (side, along)) in requests {
            by_side.entry((node, side)).or_default().push((port, along));
        }

        for ((node, side), mut ports) in by_side {
            let Some(bounds) = result.node(&node).map(NodeLayout::bounds) else {
                continue;
            };
            ports.sort_by(|a, b| a.1.total_cmp(&b.1));
            let count = ports.len() as f32;
            for (index, (port, _)) in ports.into_iter().enumerate() {
                let t = (index as f32 + 1.0) / (count + 1.0);
                result.ports.insert(
                    port_key(&node, &port),
                    PortLayout {
                        node: node.clone(),
                        port,
                        position: routing::point_on_side(bounds, side, t),
                        size: Size::new(PORT_SIZE, PORT_SIZE),
                        side,
                    },
                );
            }
        }
    }

    fn anchor(result: &LayoutResult, endpoint: &Endpoint, toward: Point) -> Option<(Point, PortSide)> {
        match endpoint {
            Endpoint::Port { node, port } => {
                if let Some(port) = result.port(node, port) {
                    return Some((port.position, port.side));
                }
            }
            Endpoint::Pin { subgraph, pin } => {
                if let Some(pin) = result.subgraph(subgraph).and_then(|sg| sg.pins.get(pin)) {
                    return Some((pin.position, pin.side));
                }
            }
            Endpoint::Node(_) => {}
        }
        let bounds = Self::owner_bounds(result, endpoint)?;
        let side = routing::facing_side(bounds, toward);
        Some((routing::point_on_side(bounds, side, 0.5), side))
    }

    fn route_links(graph: &NetworkGraph, result: &mut LayoutResult) {
        for (index, link) in graph.links.iter().enumerate() {
            let key = link.key(index);
            let centers = (
                Self::reference_point(result, &link.from),
                Self::reference_point(result, &link.to),
            );
            let (Some(from_center), Some(to_center)) = centers else {
                debug!(link = key; "Link endpoint not placed, no route");
                continue;
            };
            let anchors = (
                Self::anchor(result, &link.from, to_center),
                Self::anchor(result, &link.to, from_center),
            );
            let (Some((start, start_side)), Some((end, end_side))) = anchors else {
                continue;
            };

            let points = routing::orthogonal_route(start, start_side, end, end_side);
            result.links.insert(
                key.clone(),
                LinkLayout {
                    id: key,
                    from: link.from.node_id().to_string(),
                    to: link.to.node_id().to_string(),
                    points,
                },
            );
        }
    }
}

impl LayoutEngine for BasicEngine {
    fn layout(&self, graph: &NetworkGraph) -> Result<LayoutResult, ShumokuError> {
        self.calculate(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shumoku_core::model::{Link, Pin};

    fn chain_graph() -> NetworkGraph {
        NetworkGraph {
            nodes: vec![
                Node::new("edge"),
                Node::new("core").with_parent("dc1"),
                Node::new("srv").with_parent("dc1"),
            ],
            links: vec![
                Link::new(Endpoint::node("edge"), Endpoint::port("core", "eth0")),
                Link::new(Endpoint::node("core"), Endpoint::node("srv")),
            ],
            subgraphs: vec![
                Subgraph::new("dc1").with_pin(Pin::new("uplink").with_direction(PinDirection::In)),
            ],
            ..NetworkGraph::default()
        }
    }

    #[test]
    fn test_ranks_follow_links_top_to_bottom() {
        let layout = BasicEngine::default().calculate(&chain_graph()).unwrap();

        let edge = layout.node("edge").unwrap();
        let core = layout.node("core").unwrap();
        let srv = layout.node("srv").unwrap();
        assert!(edge.position.y() < core.position.y());
        assert!(core.position.y() < srv.position.y());
    }

    #[test]
    fn test_subgraph_contains_its_nodes() {
        let layout = BasicEngine::default().calculate(&chain_graph()).unwrap();

        let dc1 = layout.subgraph("dc1").unwrap().bounds;
        for id in ["core", "srv"] {
            let node = layout.node(id).unwrap().bounds();
            assert!(dc1.contains(node.min_point()), "{id} outside dc1");
            assert!(dc1.contains(Point::new(node.max_x(), node.max_y())));
        }
        assert!(!dc1.contains(layout.node("edge").unwrap().position));
    }

    #[test]
    fn test_port_faces_remote_end() {
        let layout = BasicEngine::default().calculate(&chain_graph()).unwrap();

        let port = layout.port("core", "eth0").unwrap();
        assert_eq!(port.side, PortSide::Top);
        let core = layout.node("core").unwrap().bounds();
        assert_eq!(port.position.y(), core.min_y());
    }

    #[test]
    fn test_in_pin_on_top_edge() {
        let layout = BasicEngine::default().calculate(&chain_graph()).unwrap();

        let dc1 = layout.subgraph("dc1").unwrap();
        let pin = dc1.pins.get("uplink").unwrap();
        assert_eq!(pin.side, PortSide::Top);
        assert_eq!(pin.position.y(), dc1.bounds.min_y());
    }

    #[test]
    fn test_every_link_is_routed() {
        let layout = BasicEngine::default().calculate(&chain_graph()).unwrap();

        assert_eq!(layout.links.len(), 2);
        let route = &layout.link("link-0").unwrap().points;
        assert!(route.len() >= 2);
        assert_eq!(*route.last().unwrap(), layout.port("core", "eth0").unwrap().position);
        assert!(layout.bounds.is_valid());
    }

    #[test]
    fn test_link_cycle_is_broken() {
        let graph = NetworkGraph {
            nodes: vec![Node::new("a"), Node::new("b"), Node::new("c")],
            links: vec![
                Link::new(Endpoint::node("a"), Endpoint::node("b")),
                Link::new(Endpoint::node("b"), Endpoint::node("c")),
                Link::new(Endpoint::node("c"), Endpoint::node("a")),
            ],
            ..NetworkGraph::default()
        };

        let layout = BasicEngine::default().calculate(&graph).unwrap();
        assert_eq!(layout.nodes.len(), 3);
        assert!(layout.node("a").unwrap().position.y() < layout.node("c").unwrap().position.y());
    }

    #[test]
    fn test_left_to_right_direction() {
        let mut graph = chain_graph();
        graph.settings.direction = Direction::LeftToRight;

        let layout = BasicEngine::default().calculate(&graph).unwrap();
        assert!(layout.node("core").unwrap().position.x() < layout.node("srv").unwrap().position.x());
    }

    #[test]
    fn test_containment_cycle_is_an_error() {
        let graph = NetworkGraph {
            subgraphs: vec![
                Subgraph::new("a").with_parent("b"),
                Subgraph::new("b").with_parent("a"),
            ],
            ..NetworkGraph::default()
        };

        let result = BasicEngine::default().calculate(&graph);
        assert!(matches!(result, Err(ShumokuError::Layout(_))));
    }

    #[test]
    fn test_unknown_parent_is_top_level() {
        let graph = NetworkGraph {
            nodes: vec![Node::new("orphan").with_parent("nowhere")],
            ..NetworkGraph::default()
        };

        let layout = BasicEngine::default().calculate(&graph).unwrap();
        assert!(layout.node("orphan").is_some());
    }
}
