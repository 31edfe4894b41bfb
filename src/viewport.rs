//! Virtual-resolution viewport
//!
//! Every game draws at its own fixed resolution into an offscreen render
//! target. The target is then blitted to the window centered and scaled
//! uniformly, with black bars filling whatever aspect mismatch remains.
//! Mouse input goes the other way through `mouse_virtual`.

use macroquad::prelude::*;

/// Where the virtual screen lands inside the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Compute the uniform scale and centering offsets that fit a
/// `virt_w` x `virt_h` image inside a `screen_w` x `screen_h` window.
pub fn letterbox(screen_w: f32, screen_h: f32, virt_w: f32, virt_h: f32) -> Placement {
    let scale = (screen_w / virt_w).min(screen_h / virt_h);
    Placement {
        scale,
        offset_x: (screen_w - virt_w * scale) * 0.5,
        offset_y: (screen_h - virt_h * scale) * 0.5,
    }
}

pub struct Viewport {
    pub width: f32,
    pub height: f32,
    target: RenderTarget,
    camera: Camera2D,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let target = render_target(width, height);
        // Chunky pixels scale better than smeared ones
        target.texture.set_filter(FilterMode::Nearest);

        let mut camera =
            Camera2D::from_display_rect(Rect::new(0.0, 0.0, width as f32, height as f32));
        camera.render_target = Some(target.clone());

        Self {
            width: width as f32,
            height: height as f32,
            target,
            camera,
        }
    }

    /// Route subsequent draw calls into the render target.
    /// Coordinates behave like normal screen space: origin top-left, y down.
    pub fn begin(&self) {
        set_camera(&self.camera);
    }

    /// Restore the window camera and blit the target letterboxed.
    pub fn finish(&self) {
        set_default_camera();
        clear_background(BLACK);

        let p = letterbox(screen_width(), screen_height(), self.width, self.height);
        draw_texture_ex(
            &self.target.texture,
            p.offset_x,
            p.offset_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(self.width * p.scale, self.height * p.scale)),
                // Render targets come out upside down relative to the screen
                flip_y: true,
                ..Default::default()
            },
        );
    }

    /// Current mouse position in virtual coordinates.
    /// Positions outside the letterboxed area land outside `0..width/height`.
    pub fn mouse_virtual(&self) -> Vec2 {
        let (mx, my) = mouse_position();
        let p = letterbox(screen_width(), screen_height(), self.width, self.height);
        vec2((mx - p.offset_x) / p.scale, (my - p.offset_y) / p.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_wide_window() {
        // 640x480 virtual inside a 1280x480 window: pillarboxed
        let p = letterbox(1280.0, 480.0, 640.0, 480.0);
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.offset_x, 320.0);
        assert_eq!(p.offset_y, 0.0);
    }

    #[test]
    fn test_letterbox_tall_window() {
        let p = letterbox(640.0, 960.0, 640.0, 480.0);
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.offset_x, 0.0);
        assert_eq!(p.offset_y, 240.0);
    }

    #[test]
    fn test_letterbox_scales_up() {
        let p = letterbox(1280.0, 960.0, 640.0, 480.0);
        assert_eq!(p.scale, 2.0);
        assert_eq!(p.offset_x, 0.0);
        assert_eq!(p.offset_y, 0.0);
    }
}
