use serde::{Deserialize, Serialize};

use super::Xyhw;

/// Screen edge a dock strip is reserved on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DockEdge {
    #[default]
    Top,
    Bottom,
}

/// A fixed-height strip taken out of the tiling area while a dock is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockStrip {
    pub edge: DockEdge,
    pub height: i32,
}

/// Root window geometry plus the dock reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Screen {
    pub bbox: Xyhw,
    pub dock: Option<DockStrip>,
}

impl Screen {
    #[must_use]
    pub const fn new(bbox: Xyhw) -> Self {
        Self { bbox, dock: None }
    }

    /// The reserved strip, clipped to the screen.
    #[must_use]
    pub fn dock_area(&self) -> Option<Xyhw> {
        let strip = self.dock?;
        let height = strip.height.clamp(0, self.bbox.h);
        let y = match strip.edge {
            DockEdge::Top => self.bbox.y,
            DockEdge::Bottom => self.bbox.bottom() - height,
        };
        Some(Xyhw::new(self.bbox.x, y, self.bbox.w, height))
    }

    /// The area left for tiling. The dock strip always wins over tiled windows.
    #[must_use]
    pub fn usable_area(&self) -> Xyhw {
        let mut area = self.bbox;
        if let Some(dock) = self.dock_area() {
            area.h -= dock.h;
            if self.dock.map(|strip| strip.edge) == Some(DockEdge::Top) {
                area.y += dock.h;
            }
        }
        area
    }
}
