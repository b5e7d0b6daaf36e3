//! Layout Engine: window bounds -> pixel regions for the control rail and
//! the active content surface.
//!
//! Stateless. Recomputed on every resize and every surface switch.

use serde::{Deserialize, Serialize};

use atrium_common::types::Rect;

/// Regions for one frame of the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    /// Always-visible rail on the left edge.
    pub rail: Rect,
    /// Name of the surface that receives `content`.
    pub active: String,
    /// Everything right of the rail.
    pub content: Rect,
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    rail_width: f64,
}

impl LayoutEngine {
    pub fn new(rail_width: u32) -> Self {
        Self {
            rail_width: rail_width as f64,
        }
    }

    pub fn rail_width(&self) -> f64 {
        self.rail_width
    }

    /// Split the window content area (`width` x `height`, origin ignored)
    /// into the rail and the content region for `active`.
    pub fn compute(&self, window: Rect, active: &str) -> SurfaceLayout {
        let width = window.width.max(0.0);
        let height = window.height.max(0.0);
        let rail_width = self.rail_width.min(width);

        SurfaceLayout {
            rail: Rect::new(0.0, 0.0, rail_width, height),
            active: active.to_string(),
            content: Rect::new(self.rail_width, 0.0, (width - self.rail_width).max(0.0), height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_rail_and_content() {
        let engine = LayoutEngine::new(72);
        let layout = engine.compute(Rect::sized(1280.0, 800.0), "gmail");
        assert_eq!(layout.rail, Rect::new(0.0, 0.0, 72.0, 800.0));
        assert_eq!(layout.content, Rect::new(72.0, 0.0, 1208.0, 800.0));
        assert_eq!(layout.active, "gmail");
    }

    #[test]
    fn window_origin_is_ignored() {
        let engine = LayoutEngine::new(60);
        let layout = engine.compute(Rect::new(300.0, 200.0, 1000.0, 500.0), "drive");
        assert_eq!(layout.rail.x, 0.0);
        assert_eq!(layout.rail.y, 0.0);
        assert_eq!(layout.content.x, 60.0);
        assert_eq!(layout.content.y, 0.0);
    }

    #[test]
    fn narrow_window_clamps_content_to_zero() {
        let engine = LayoutEngine::new(72);
        let layout = engine.compute(Rect::sized(50.0, 400.0), "gmail");
        assert_eq!(layout.rail.width, 50.0);
        assert_eq!(layout.content.width, 0.0);
        assert!(layout.content.is_empty());
    }

    #[test]
    fn regions_cover_window_width() {
        let engine = LayoutEngine::new(80);
        for width in [80.0, 81.0, 640.0, 3840.0] {
            let layout = engine.compute(Rect::sized(width, 100.0), "x");
            assert_eq!(layout.rail.width + layout.content.width, width);
        }
    }

    #[test]
    fn compute_is_pure() {
        let engine = LayoutEngine::new(72);
        let a = engine.compute(Rect::sized(1024.0, 768.0), "chat");
        let b = engine.compute(Rect::sized(1024.0, 768.0), "chat");
        assert_eq!(a, b);
    }

    #[test]
    fn layout_serializes() {
        let layout = LayoutEngine::new(72).compute(Rect::sized(800.0, 600.0), "meet");
        let json = serde_json::to_string(&layout).unwrap();
        let back: SurfaceLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(layout, back);
    }
}
