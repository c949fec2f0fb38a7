//! Frame rendering
//!
//! The session hands the current layout and ball to a [`Renderer`] once per
//! tick. [`FrameMesh`] tessellates that into a flat triangle list in board
//! pixel coordinates (y down) that a host can upload as-is.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::sim::layout::{Layout, Obstacle};
use crate::sim::session::Session;
use crate::sim::state::{Ball, SessionPhase};

/// Segments used for ball and peg circles
const CIRCLE_SEGMENTS: u32 = 24;

/// Outline thickness in pixels
const OUTLINE_WIDTH: f32 = 2.0;

/// Receives one frame per session tick
pub trait Renderer {
    fn render(&mut self, layout: &Layout, ball: Option<&Ball>);
}

impl<F: FnMut(&Layout, Option<&Ball>)> Renderer for F {
    fn render(&mut self, layout: &Layout, ball: Option<&Ball>) {
        self(layout, ball)
    }
}

/// Discards every frame (headless runs and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _layout: &Layout, _ball: Option<&Ball>) {}
}

/// Triangle list for the last rendered frame
#[derive(Debug, Clone, Default)]
pub struct FrameMesh {
    vertices: Vec<Vertex>,
    /// Draw a translucent overlay over the board (outcome screen)
    pub dimmed: bool,
}

impl FrameMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertices flattened to `[x, y, r, g, b, a, ...]`
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Dim the board once the session has resolved. Call after
    /// `Session::tick`; the current frame is redrawn when the overlay changes.
    pub fn sync_overlay(&mut self, session: &Session) {
        let dimmed = session.phase() == SessionPhase::Resolved;
        if dimmed == self.dimmed {
            return;
        }
        self.dimmed = dimmed;
        if let Some(layout) = session.layout() {
            self.render(layout, session.ball());
        }
    }

    fn push_obstacle(&mut self, obstacle: &Obstacle) {
        let (fill, stroke) = if obstacle.is_divider() {
            (colors::DIVIDER, colors::DIVIDER_OUTLINE)
        } else {
            (colors::OBSTACLE, colors::OBSTACLE_OUTLINE)
        };

        match obstacle {
            Obstacle::Wedge(w) => {
                self.vertices
                    .extend(shapes::triangle(w.apex, w.right, w.left, fill));
                self.vertices.extend(shapes::outline(
                    &[w.apex, w.right, w.left],
                    OUTLINE_WIDTH,
                    stroke,
                ));
            }
            Obstacle::Peg(p) => {
                self.vertices
                    .extend(shapes::circle(p.center, p.radius, fill, CIRCLE_SEGMENTS));
                let inner = (p.radius - OUTLINE_WIDTH).max(0.0);
                self.vertices.extend(shapes::ring(
                    p.center,
                    inner,
                    p.radius,
                    stroke,
                    CIRCLE_SEGMENTS,
                ));
            }
        }
    }
}

impl Renderer for FrameMesh {
    fn render(&mut self, layout: &Layout, ball: Option<&Ball>) {
        self.vertices.clear();

        let board = Vec2::new(layout.width, layout.height);
        self.vertices
            .extend(shapes::rect(Vec2::ZERO, board, colors::BACKGROUND));

        for (i, slot) in layout.slots.iter().enumerate() {
            let color = if i % 2 == 0 {
                colors::SLOT_PRIMARY
            } else {
                colors::SLOT_SECONDARY
            };
            self.vertices.extend(shapes::rect(
                Vec2::new(slot.x, slot.y),
                Vec2::new(slot.width, slot.height),
                color,
            ));
        }

        for obstacle in &layout.obstacles {
            self.push_obstacle(obstacle);
        }

        if let Some(ball) = ball {
            self.vertices.extend(shapes::circle(
                ball.pos,
                ball.radius,
                colors::BALL_OUTLINE,
                CIRCLE_SEGMENTS,
            ));
            self.vertices.extend(shapes::circle(
                ball.pos,
                (ball.radius - OUTLINE_WIDTH).max(ball.radius * 0.5),
                colors::BALL,
                CIRCLE_SEGMENTS,
            ));
        }

        if self.dimmed {
            self.vertices
                .extend(shapes::rect(Vec2::ZERO, board, colors::OVERLAY));
        }
    }
}
