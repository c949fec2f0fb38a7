//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Floats per vertex when flattened for a host buffer
    pub const FLOATS: usize = 6;

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Board palette
pub mod colors {
    const fn rgb(hex: u32) -> [f32; 4] {
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        ]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0x34495e);
    pub const OBSTACLE: [f32; 4] = rgb(0x1abc9c);
    pub const OBSTACLE_OUTLINE: [f32; 4] = rgb(0x16a085);
    pub const DIVIDER: [f32; 4] = rgb(0x27ae60);
    pub const DIVIDER_OUTLINE: [f32; 4] = rgb(0x229954);
    pub const BALL: [f32; 4] = rgb(0xf39c12);
    pub const BALL_OUTLINE: [f32; 4] = rgb(0xd35400);
    pub const SLOT_PRIMARY: [f32; 4] = rgb(0x8e44ad);
    pub const SLOT_SECONDARY: [f32; 4] = rgb(0x2980b9);
    pub const OVERLAY: [f32; 4] = [20.0 / 255.0, 30.0 / 255.0, 40.0 / 255.0, 0.85];
}
