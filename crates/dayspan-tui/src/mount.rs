/// Rendering targets for the range picker.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ratatui::layout::Rect;

/// Registry of named mount points, filled in by the host while laying
/// out its frame. Resolving a name returns the most recently registered
/// area for it.
#[derive(Clone, Default)]
pub struct Mounts {
    areas: Arc<RwLock<HashMap<String, Rect>>>,
}

impl Mounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, area: Rect) {
        self.areas.write().unwrap().insert(name.to_string(), area);
    }

    pub fn get(&self, name: &str) -> Option<Rect> {
        self.areas.read().unwrap().get(name).copied()
    }
}

/// Where the range picker draws itself: a concrete area handed over by
/// the host, or a mount name looked up at draw time.
#[derive(Debug, Clone)]
pub enum RenderTarget {
    Area(Rect),
    Mount(String),
}

impl RenderTarget {
    pub fn resolve(&self, mounts: &Mounts) -> Option<Rect> {
        match self {
            Self::Area(area) => Some(*area),
            Self::Mount(name) => mounts.get(name),
        }
    }
}

impl From<Rect> for RenderTarget {
    fn from(area: Rect) -> Self {
        Self::Area(area)
    }
}

impl From<&str> for RenderTarget {
    fn from(name: &str) -> Self {
        Self::Mount(name.to_string())
    }
}

impl From<String> for RenderTarget {
    fn from(name: String) -> Self {
        Self::Mount(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_target_resolves_directly() {
        let area = Rect::new(1, 2, 10, 5);
        let target = RenderTarget::from(area);
        assert_eq!(target.resolve(&Mounts::new()), Some(area));
    }

    #[test]
    fn test_mount_target_resolves_through_registry() {
        let mounts = Mounts::new();
        let target = RenderTarget::from("calendar");
        assert_eq!(target.resolve(&mounts), None);

        let area = Rect::new(0, 0, 20, 10);
        mounts.set("calendar", area);
        assert_eq!(target.resolve(&mounts), Some(area));

        // re-registration wins
        let moved = Rect::new(5, 5, 20, 10);
        mounts.set("calendar", moved);
        assert_eq!(target.resolve(&mounts), Some(moved));
    }
}
