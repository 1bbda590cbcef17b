//! Schema graph visualization with interactive force-directed layout

mod layout;

pub use layout::{ForceLayout, ForceLayoutConfig, LayoutNode};

use std::sync::Arc;

use egui::{
    Align2, Color32, FontId, Pos2, Rect, Response, RichText, Sense, Shape, Stroke, Ui, Vec2,
};
use nlq_core::Schema;
use petgraph::graph::NodeIndex;

use crate::{SessionView, ViewContext, ViewId};

/// Node radius in screen points
const NODE_RADIUS: f32 = 25.0;

/// Steps simulated per frame
const STEPS_PER_FRAME: usize = 2;

/// Below this energy the layout is considered at rest
const REST_ENERGY: f32 = 0.05;

/// Radius of the loop drawn for a table referencing itself
const LOOP_RADIUS: f32 = 12.0;

/// Screen geometry of one relationship
#[derive(Debug, Clone, Copy, PartialEq)]
enum EdgeShape {
    /// Segment ending at the target's rim, arrow pointing along `dir`
    Line { from: Pos2, tip: Pos2, dir: Vec2 },
    /// Self relationship: a small circle on top of the node
    Loop {
        center: Pos2,
        radius: f32,
        tip: Pos2,
        dir: Vec2,
    },
}

fn edge_shape(from: Pos2, to: Pos2, self_loop: bool) -> EdgeShape {
    if self_loop {
        let center = from - Vec2::new(0.0, NODE_RADIUS + LOOP_RADIUS * 0.5);
        // Where the loop re-enters the node, on its upper right rim
        let tip = from + Vec2::angled(-std::f32::consts::FRAC_PI_2 + 0.45) * NODE_RADIUS;
        let dir = (from - tip).normalized();
        return EdgeShape::Loop {
            center,
            radius: LOOP_RADIUS,
            tip,
            dir,
        };
    }
    let dir = (to - from).normalized();
    EdgeShape::Line {
        from,
        tip: to - dir * NODE_RADIUS,
        dir,
    }
}

/// Tables as nodes, relationships as arrows
pub struct SchemaGraphView {
    id: ViewId,
    title: String,
    height: f32,

    // Layout state, rebuilt when the schema changes
    source: Option<Arc<Schema>>,
    layout: Option<ForceLayout>,

    // Interaction state
    hovered: Option<NodeIndex>,
    dragging: Option<NodeIndex>,
}

impl SchemaGraphView {
    pub fn new(id: ViewId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            height: 400.0,
            source: None,
            layout: None,
            hovered: None,
            dragging: None,
        }
    }

    fn sync_schema(&mut self, schema: Option<&Arc<Schema>>) {
        let unchanged = match (schema, &self.source) {
            (Some(new), Some(old)) => Arc::ptr_eq(new, old),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        tracing::debug!("Rebuilding schema graph layout");
        self.source = schema.cloned();
        self.layout = schema.map(|s| ForceLayout::from_schema(s));
        self.hovered = None;
        self.dragging = None;
    }

    fn to_screen(rect: &Rect, world: Vec2) -> Pos2 {
        rect.center() + world
    }

    fn to_world(rect: &Rect, screen: Pos2) -> Vec2 {
        screen - rect.center()
    }

    fn handle_interaction(&mut self, response: &Response, rect: Rect) {
        let Some(layout) = self.layout.as_mut() else {
            return;
        };

        self.hovered = response
            .hover_pos()
            .and_then(|pos| layout.node_at(Self::to_world(&rect, pos), NODE_RADIUS));

        if response.drag_started() {
            self.dragging = self.hovered;
            if let Some(idx) = self.dragging {
                layout.set_pinned(idx, true);
            }
        }

        if response.dragged() {
            if let Some(idx) = self.dragging {
                layout.drag_by(idx, response.drag_delta());
            }
        }

        if response.drag_released() {
            if let Some(idx) = self.dragging.take() {
                layout.set_pinned(idx, false);
            }
        }
    }

    fn draw(&self, ui: &Ui, rect: Rect) {
        let Some(layout) = &self.layout else {
            return;
        };
        let painter = ui.painter_at(rect);
        let visuals = ui.visuals();

        let edge_color = visuals.widgets.noninteractive.fg_stroke.color.gamma_multiply(0.6);
        let node_fill = visuals.selection.bg_fill;
        let node_stroke = visuals.selection.stroke.color;
        let highlight = Color32::from_rgb(255, 165, 0);

        for (source, target) in layout.edges() {
            let (Some(s), Some(t)) = (layout.node(source), layout.node(target)) else {
                continue;
            };
            let from = Self::to_screen(&rect, s.position);
            let to = Self::to_screen(&rect, t.position);
            let touches_hovered = self.hovered == Some(source) || self.hovered == Some(target);
            let color = if touches_hovered { highlight } else { edge_color };
            let stroke = Stroke::new(2.0, color);

            let (tip, dir) = match edge_shape(from, to, source == target) {
                EdgeShape::Line { from, tip, dir } => {
                    painter.line_segment([from, tip], stroke);
                    (tip, dir)
                }
                EdgeShape::Loop {
                    center,
                    radius,
                    tip,
                    dir,
                } => {
                    painter.circle_stroke(center, radius, stroke);
                    (tip, dir)
                }
            };

            // Arrow head at the target's rim
            let base = tip - dir * 10.0;
            let perp = Vec2::new(-dir.y, dir.x);
            painter.add(Shape::convex_polygon(
                vec![tip, base - perp * 5.0, base + perp * 5.0],
                color,
                Stroke::NONE,
            ));
        }

        for (idx, node) in layout.nodes() {
            let pos = Self::to_screen(&rect, node.position);
            let radius = NODE_RADIUS * (1.0 + layout.degree(idx) as f32 * 0.05);
            let stroke_color = if self.hovered == Some(idx) {
                highlight
            } else {
                node_stroke
            };

            painter.circle_filled(pos, radius, node_fill);
            painter.circle_stroke(pos, radius, Stroke::new(2.0, stroke_color));

            let short: String = node.name.chars().take(3).collect();
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                short,
                FontId::proportional(12.0),
                Color32::WHITE,
            );
            painter.text(
                pos + Vec2::new(0.0, radius + 4.0),
                Align2::CENTER_TOP,
                &node.name,
                FontId::proportional(10.0),
                visuals.text_color(),
            );
        }
    }

    fn column_tooltip(ui: &mut Ui, schema: &Schema, table: &str) {
        let Some(table) = schema.table(table) else {
            return;
        };
        ui.label(RichText::new(&table.name).strong().size(14.0));
        for column in &table.columns {
            let text = format!("{}: {}", column.name, column.data_type);
            if column.is_primary_key {
                ui.label(
                    RichText::new(format!("🔑 {text}"))
                        .monospace()
                        .color(Color32::from_rgb(253, 224, 71)),
                );
            } else {
                ui.label(RichText::new(text).monospace());
            }
        }
    }
}

impl SessionView for SchemaGraphView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewContext<'_>, ui: &mut Ui) {
        self.sync_schema(ctx.state.schema());

        if self.layout.is_none() {
            ui.label("Connect to a database to see its schema.");
            return;
        }

        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(ui.available_width(), self.height),
            Sense::click_and_drag(),
        );
        self.handle_interaction(&response, rect);

        let mut energetic = false;
        if let Some(layout) = self.layout.as_mut() {
            for _ in 0..STEPS_PER_FRAME {
                layout.step();
            }
            energetic = layout.kinetic_energy() > REST_ENERGY;
        }

        self.draw(ui, rect);

        if let (Some(idx), Some(layout), Some(schema)) =
            (self.hovered, &self.layout, &self.source)
        {
            if let Some(node) = layout.node(idx) {
                let table = node.name.clone();
                let schema = schema.clone();
                response.on_hover_ui_at_pointer(|ui| Self::column_tooltip(ui, &schema, &table));
            }
        }

        if energetic || self.dragging.is_some() {
            ui.ctx().request_repaint();
        }
    }
}
