//! Providers of the per-frame draw-object list

use super::DrawObject;

/// Upstream provider of the current frame's draw-objects
pub trait DrawObjectSource {
    /// Draw-objects for this frame
    fn draw_objects(&self) -> Vec<&DrawObject>;

    /// Acknowledge that changed geometry has been consumed
    fn reset_geometry_changed(&mut self);
}

/// Plain list of draw-objects
#[derive(Debug, Clone, Default)]
pub struct DrawScene {
    objects: Vec<DrawObject>,
}

impl DrawScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a draw-object
    pub fn push(&mut self, object: DrawObject) {
        self.objects.push(object);
    }

    /// Find a draw-object by geometry identity
    pub fn get(&self, geom_id: &str) -> Option<&DrawObject> {
        self.objects.iter().find(|o| o.geom_id == geom_id)
    }

    /// Find a draw-object by geometry identity for editing
    pub fn get_mut(&mut self, geom_id: &str) -> Option<&mut DrawObject> {
        self.objects.iter_mut().find(|o| o.geom_id == geom_id)
    }

    /// Remove every draw-object with this identity, returning how many were removed
    pub fn remove(&mut self, geom_id: &str) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| o.geom_id != geom_id);
        before - self.objects.len()
    }

    /// Number of draw-objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl DrawObjectSource for DrawScene {
    fn draw_objects(&self) -> Vec<&DrawObject> {
        self.objects.iter().collect()
    }

    fn reset_geometry_changed(&mut self) {
        for object in &mut self.objects {
            object.geom_changed = false;
        }
    }
}

impl FromIterator<DrawObject> for DrawScene {
    fn from_iter<I: IntoIterator<Item = DrawObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawKind;

    #[test]
    fn test_reset_geometry_changed() {
        let mut scene: DrawScene = [
            DrawObject::new("a", DrawKind::Lines),
            DrawObject::new("b", DrawKind::ShadedTris),
        ]
        .into_iter()
        .collect();

        assert!(scene.draw_objects().iter().all(|o| o.geom_changed));
        scene.reset_geometry_changed();
        assert!(scene.draw_objects().iter().all(|o| !o.geom_changed));
    }

    #[test]
    fn test_get_and_remove() {
        let mut scene = DrawScene::new();
        scene.push(DrawObject::new("a", DrawKind::Lines));
        scene.push(DrawObject::new("b", DrawKind::Lines));

        scene.get_mut("b").unwrap().visible = false;
        assert!(!scene.get("b").unwrap().visible);

        assert_eq!(scene.remove("a"), 1);
        assert_eq!(scene.remove("a"), 0);
        assert_eq!(scene.len(), 1);
    }
}
