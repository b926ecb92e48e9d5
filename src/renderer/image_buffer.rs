use crate::renderer::{view_state::Rect, TextureVertex};
use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::{Buffer, BufferUsages, Device, Queue};

/// The quad the image texture is drawn on. Its corners move with zoom and pan.
#[derive(Debug)]
pub(crate) struct ImageBuffer {
    vertex_buffer: Buffer,
    index_buffer: Buffer,
}

impl ImageBuffer {
    const INDICES: [u16; 6] = [
        0, 1, 2, // first triangle
        2, 1, 3, // second triangle
    ];

    pub(crate) fn new(device: &Device) -> Self {
        let full_screen = Rect {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        };

        Self {
            vertex_buffer: device.create_buffer_init(&BufferInitDescriptor {
                label: Some("Image TextureVertex Buffer"),
                contents: bytemuck::cast_slice(&quad_vertices(full_screen, (1, 1))),
                usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            }),
            index_buffer: device.create_buffer_init(&BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&Self::INDICES),
                usage: BufferUsages::INDEX,
            }),
        }
    }

    pub(crate) fn update(&self, queue: &Queue, rect: Rect, screen: (u32, u32)) {
        queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&quad_vertices(rect, screen)),
        );
    }

    pub(crate) const fn vertex_buffer(&self) -> &Buffer {
        &self.vertex_buffer
    }

    pub(crate) const fn index_buffer(&self) -> &Buffer {
        &self.index_buffer
    }

    pub(crate) const fn num_indices(&self) -> u32 {
        Self::INDICES.len() as u32
    }
}

/// Maps a window-space rectangle to clip space, where y points up.
pub(crate) fn quad_vertices(rect: Rect, screen: (u32, u32)) -> [TextureVertex; 4] {
    let (screen_w, screen_h) = (f64::from(screen.0.max(1)), f64::from(screen.1.max(1)));

    let left = (2.0 * rect.x / screen_w - 1.0) as f32;
    let right = (2.0 * (rect.x + rect.width) / screen_w - 1.0) as f32;
    let top = (1.0 - 2.0 * rect.y / screen_h) as f32;
    let bottom = (1.0 - 2.0 * (rect.y + rect.height) / screen_h) as f32;

    [
        TextureVertex {
            position: [left, bottom, 0.0],
            tex_coords: [0.0, 1.0],
        },
        TextureVertex {
            position: [left, top, 0.0],
            tex_coords: [0.0, 0.0],
        },
        TextureVertex {
            position: [right, bottom, 0.0],
            tex_coords: [1.0, 1.0],
        },
        TextureVertex {
            position: [right, top, 0.0],
            tex_coords: [1.0, 0.0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_window_quad() {
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        };

        let positions = quad_vertices(rect, (800, 600)).map(|v| v.position);

        assert_eq!(
            positions,
            [
                [-1.0, -1.0, 0.0],
                [-1.0, 1.0, 0.0],
                [1.0, -1.0, 0.0],
                [1.0, 1.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_centered_quarter_quad() {
        let rect = Rect {
            x: 200.0,
            y: 150.0,
            width: 400.0,
            height: 300.0,
        };

        let positions = quad_vertices(rect, (800, 600)).map(|v| v.position);

        assert_eq!(
            positions,
            [
                [-0.5, -0.5, 0.0],
                [-0.5, 0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
            ]
        );
    }
}
