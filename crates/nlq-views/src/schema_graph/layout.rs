//! Force-directed layout of the schema graph
//!
//! Positions live in an abstract world space centered on the origin. Tables
//! repel each other, relationships act as springs and a weak pull keeps the
//! graph centered. Pinned nodes are held in place and only move when dragged.

use std::collections::HashMap;

use egui::Vec2;
use nlq_core::Schema;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rand::Rng;

/// Tuning of the simulation
#[derive(Debug, Clone)]
pub struct ForceLayoutConfig {
    pub repulsion: f32,
    pub link_distance: f32,
    pub link_strength: f32,
    pub centering: f32,
    /// Minimum distance kept between node centers
    pub collide_radius: f32,
    pub damping: f32,
    pub dt: f32,
}

impl Default for ForceLayoutConfig {
    fn default() -> Self {
        Self {
            repulsion: 400.0 * 100.0,
            link_distance: 150.0,
            link_strength: 0.1,
            centering: 0.01,
            collide_radius: 40.0,
            damping: 0.85,
            dt: 0.5,
        }
    }
}

/// One table in the layout
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub name: String,
    pub position: Vec2,
    velocity: Vec2,
    pub pinned: bool,
}

/// Table graph plus simulation state
pub struct ForceLayout {
    graph: DiGraph<LayoutNode, ()>,
    by_name: HashMap<String, NodeIndex>,
    pub config: ForceLayoutConfig,
}

impl ForceLayout {
    /// Build the graph of `schema`, tables placed on a jittered circle
    pub fn from_schema(schema: &Schema) -> Self {
        let mut graph = DiGraph::new();
        let mut by_name = HashMap::new();
        let mut rng = rand::thread_rng();

        let n = schema.tables.len().max(1) as f32;
        for (i, table) in schema.tables.iter().enumerate() {
            let angle = std::f32::consts::TAU * i as f32 / n;
            let jitter = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let idx = graph.add_node(LayoutNode {
                name: table.name.clone(),
                position: Vec2::angled(angle) * 120.0 + jitter,
                velocity: Vec2::ZERO,
                pinned: false,
            });
            by_name.insert(table.name.clone(), idx);
        }

        for rel in &schema.relationships {
            if let (Some(&source), Some(&target)) =
                (by_name.get(&rel.source), by_name.get(&rel.target))
            {
                graph.add_edge(source, target, ());
            }
        }

        Self {
            graph,
            by_name,
            config: ForceLayoutConfig::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &LayoutNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&LayoutNode> {
        self.graph.node_weight(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    /// Directed edges as (source, target) positions
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (e.source(), e.target()))
    }

    /// Number of relationships touching a table, in either direction
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
            + self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Closest node whose center lies within `radius` of `point`
    pub fn node_at(&self, point: Vec2, radius: f32) -> Option<NodeIndex> {
        self.nodes()
            .map(|(idx, node)| (idx, (node.position - point).length()))
            .filter(|(_, dist)| *dist <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| idx)
    }

    pub fn set_pinned(&mut self, idx: NodeIndex, pinned: bool) {
        if let Some(node) = self.graph.node_weight_mut(idx) {
            node.pinned = pinned;
            node.velocity = Vec2::ZERO;
        }
    }

    /// Move a node by `delta`, regardless of pinning
    pub fn drag_by(&mut self, idx: NodeIndex, delta: Vec2) {
        if let Some(node) = self.graph.node_weight_mut(idx) {
            node.position += delta;
            node.velocity = Vec2::ZERO;
        }
    }

    /// Advance the simulation by one step
    pub fn step(&mut self) {
        let cfg = &self.config;
        let indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        let positions: Vec<Vec2> = indices.iter().map(|&i| self.graph[i].position).collect();
        let mut forces = vec![Vec2::ZERO; indices.len()];

        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let mut diff = positions[i] - positions[j];
                if diff.length_sq() < 1e-4 {
                    // Coincident nodes, nudge apart deterministically
                    diff = Vec2::new(1.0, 0.5) * (i as f32 + 1.0);
                }
                let dist = diff.length();
                let mut push = (cfg.repulsion / (dist * dist)).min(100.0);
                if dist < cfg.collide_radius * 2.0 {
                    push += cfg.collide_radius * 2.0 - dist;
                }
                let f = diff / dist * push;
                forces[i] += f;
                forces[j] -= f;
            }
        }

        for edge in self.graph.raw_edges() {
            let (s, t) = (edge.source().index(), edge.target().index());
            let diff = positions[t] - positions[s];
            let dist = diff.length();
            if dist > 0.0 {
                let f = diff / dist * (dist - cfg.link_distance) * cfg.link_strength;
                forces[s] += f;
                forces[t] -= f;
            }
        }

        for (k, &idx) in indices.iter().enumerate() {
            let node = &mut self.graph[idx];
            if node.pinned {
                continue;
            }
            let force = forces[k] - node.position * cfg.centering;
            node.velocity = (node.velocity + force * cfg.dt) * cfg.damping;
            node.position += node.velocity * cfg.dt;
        }
    }

    /// Run `iterations` steps
    pub fn settle(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.step();
        }
    }

    /// Total squared velocity, used to stop repainting once at rest
    pub fn kinetic_energy(&self) -> f32 {
        self.graph
            .node_weights()
            .map(|n| n.velocity.length_sq())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nlq_core::{Relationship, Table};

    fn schema() -> Schema {
        Schema::new(
            vec![
                Table::new("employees", vec![]),
                Table::new("departments", vec![]),
                Table::new("documents", vec![]),
            ],
            vec![
                Relationship::new("employees", "departments"),
                Relationship::new("documents", "employees"),
            ],
        )
    }

    #[test]
    fn test_graph_mirrors_schema() {
        let layout = ForceLayout::from_schema(&schema());
        assert_eq!(layout.node_count(), 3);
        assert_eq!(layout.edge_count(), 2);

        let employees = layout.index_of("employees").unwrap();
        let departments = layout.index_of("departments").unwrap();
        assert_eq!(layout.degree(employees), 2);
        assert_eq!(layout.degree(departments), 1);
        assert!(layout.edges().any(|(s, t)| s == employees && t == departments));
    }

    #[test]
    fn test_settled_nodes_stay_apart_and_finite() {
        let mut layout = ForceLayout::from_schema(&schema());
        layout.settle(300);

        let positions: Vec<Vec2> = layout.nodes().map(|(_, n)| n.position).collect();
        for (i, a) in positions.iter().enumerate() {
            assert!(a.x.is_finite() && a.y.is_finite());
            for b in &positions[i + 1..] {
                assert!((*a - *b).length() > 10.0);
            }
        }
    }

    #[test]
    fn test_pinned_node_does_not_move() {
        let mut layout = ForceLayout::from_schema(&schema());
        let idx = layout.index_of("documents").unwrap();
        layout.set_pinned(idx, true);
        let before = layout.node(idx).unwrap().position;

        layout.settle(50);
        assert_eq!(layout.node(idx).unwrap().position, before);

        layout.drag_by(idx, Vec2::new(5.0, -5.0));
        assert_eq!(layout.node(idx).unwrap().position, before + Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_node_at_hits_nearest() {
        let layout = ForceLayout::from_schema(&schema());
        let idx = layout.index_of("departments").unwrap();
        let pos = layout.node(idx).unwrap().position;

        assert_eq!(layout.node_at(pos + Vec2::new(3.0, 0.0), 25.0), Some(idx));
        assert_eq!(layout.node_at(Vec2::new(5000.0, 5000.0), 25.0), None);
    }

    #[test]
    fn test_self_relationship_keeps_layout_finite() {
        let schema = Schema::new(
            vec![Table::new("employees", vec![]), Table::new("departments", vec![])],
            vec![Relationship::new("employees", "employees")],
        );
        let mut layout = ForceLayout::from_schema(&schema);
        assert_eq!(layout.edge_count(), 1);

        layout.settle(100);
        for (_, node) in layout.nodes() {
            assert!(node.position.x.is_finite() && node.position.y.is_finite());
        }
    }

    #[test]
    fn test_dangling_relationship_is_skipped() {
        let schema = Schema::new(
            vec![Table::new("a", vec![])],
            vec![Relationship::new("a", "missing")],
        );
        let layout = ForceLayout::from_schema(&schema);
        assert_eq!(layout.edge_count(), 0);
    }
}
