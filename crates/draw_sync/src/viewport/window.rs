//! Viewport owning one engine and its synchronizer

use std::sync::Arc;

use super::navigation::{Key, Modifiers, MouseButton, MouseButtons, NavigationController};
use crate::assets::TextureCache;
use crate::config::{NavigationConfig, ViewerConfig};
use crate::draw::{DrawObjectSource, Screen};
use crate::foundation::math::step_sign;
use crate::render::{RenderEngine, ViewPreset};
use crate::sync::{DrawSetSynchronizer, SyncStats};

/// One viewer window: an engine, its draw-set synchronizer and camera control
///
/// The viewport is linked to a single [`Screen`]; draw-objects aimed at
/// other screens are ignored by its synchronizer.
#[derive(Debug)]
pub struct Viewport<E: RenderEngine> {
    engine: E,
    synchronizer: DrawSetSynchronizer,
    navigation: NavigationController,
    speeds: NavigationConfig,
}

impl<E: RenderEngine> Viewport<E> {
    /// Create a viewport over `engine` using the configured layout
    pub fn new(mut engine: E, config: &ViewerConfig, texture_cache: Arc<TextureCache>) -> Self {
        let display = engine.display_mut();
        display.set_layout(config.layout.rows, config.layout.columns);
        display.select_viewport(0);

        log::info!(
            "Viewport linked to {:?} with a {}x{} layout",
            config.linked_screen,
            config.layout.rows,
            config.layout.columns
        );

        Self {
            engine,
            synchronizer: DrawSetSynchronizer::new(config.linked_screen, texture_cache),
            navigation: NavigationController::new(),
            speeds: config.navigation,
        }
    }

    /// Screen this viewport shows
    pub fn linked_screen(&self) -> Screen {
        self.synchronizer.linked_screen()
    }

    /// Bring the engine in line with the source's draw-objects
    ///
    /// Changed geometry is acknowledged on the source once the pass is done.
    pub fn update(&mut self, source: &mut dyn DrawObjectSource) -> SyncStats {
        let stats = {
            let objects = source.draw_objects();
            self.synchronizer.synchronize(&mut self.engine, &objects)
        };
        source.reset_geometry_changed();
        stats
    }

    /// Pan one step in the direction of `dx`, `dy`
    pub fn pan(&mut self, dx: i32, dy: i32, precision: bool) {
        let speed = if precision {
            self.speeds.precision_pan_speed
        } else {
            self.speeds.pan_speed
        };
        self.engine
            .display_mut()
            .pan_by(step_sign(dx) * speed, step_sign(dy) * speed);
    }

    /// Zoom one step in the direction of `delta`
    pub fn zoom(&mut self, delta: i32, precision: bool) {
        let speed = if precision {
            self.speeds.precision_zoom_speed
        } else {
            self.speeds.zoom_speed
        };
        self.engine.display_mut().zoom_by(step_sign(delta) * speed);
    }

    /// Rearrange the display and select its first viewport
    pub fn set_layout(&mut self, rows: u32, columns: u32, width: u32, height: u32) {
        let display = self.engine.display_mut();
        display.set_layout(rows, columns);
        display.resize(width, height);
        display.select_viewport(0);
    }

    /// Switch the camera to a preset
    pub fn set_view(&mut self, preset: ViewPreset) {
        self.engine.display_mut().change_view(preset);
    }

    /// Drawable area changed size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.display_mut().resize(width, height);
    }

    /// Mouse button pressed
    pub fn mouse_press(&mut self, position: (i32, i32), buttons: MouseButtons, modifiers: Modifiers) {
        self.navigation
            .press(self.engine.display_mut(), position, buttons, modifiers);
    }

    /// Mouse moved with buttons held
    pub fn mouse_drag(&mut self, position: (i32, i32), buttons: MouseButtons, modifiers: Modifiers) {
        self.navigation
            .drag(self.engine.display_mut(), position, buttons, modifiers);
    }

    /// Mouse button released
    pub fn mouse_release(&mut self, button: MouseButton) {
        self.navigation.release(button);
    }

    /// Key released
    pub fn key_up(
        &mut self,
        key: Key,
        position: (i32, i32),
        buttons: MouseButtons,
        modifiers: Modifiers,
    ) {
        self.navigation
            .key_up(self.engine.display_mut(), key, position, buttons, modifiers);
    }

    /// Synchronizer state
    pub fn synchronizer(&self) -> &DrawSetSynchronizer {
        &self.synchronizer
    }

    /// The engine driven by this viewport
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine driven by this viewport, mutably
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Release every renderable and hand the engine back
    pub fn close(mut self) -> E {
        let released = self.synchronizer.clear(&mut self.engine);
        log::info!("Viewport closed, released {} renderables", released);
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawKind, DrawObject, DrawScene, Geometry};
    use crate::foundation::math::Vec3d;
    use crate::render::headless::DisplayCommand;
    use crate::render::HeadlessEngine;

    fn viewport() -> Viewport<HeadlessEngine> {
        Viewport::new(
            HeadlessEngine::new(),
            &ViewerConfig::default(),
            Arc::new(TextureCache::new()),
        )
    }

    fn outline(id: &str) -> DrawObject {
        DrawObject::new(id, DrawKind::LineStrip).with_geometry(Geometry::Flat {
            points: vec![Vec3d::zeros(), Vec3d::new(1.0, 0.0, 0.0)],
            normals: Vec::new(),
        })
    }

    #[test]
    fn test_new_applies_layout() {
        let vp = viewport();
        assert_eq!(
            vp.engine().display().commands(),
            &[DisplayCommand::Layout(1, 1), DisplayCommand::Select(0)]
        );
        assert_eq!(vp.linked_screen(), Screen::Main);
    }

    #[test]
    fn test_update_acknowledges_changes() {
        let mut vp = viewport();
        let mut scene: DrawScene = [outline("a"), outline("b")].into_iter().collect();

        let stats = vp.update(&mut scene);
        assert_eq!(stats.bindings_created, 2);
        assert_eq!(stats.vertex_uploads, 2);
        assert!(!scene.get("a").unwrap().geom_changed);

        let stats = vp.update(&mut scene);
        assert_eq!(stats.vertex_uploads, 0);

        scene.get_mut("b").unwrap().geom_changed = true;
        let stats = vp.update(&mut scene);
        assert_eq!(stats.vertex_uploads, 1);
    }

    #[test]
    fn test_pan_and_zoom_steps() {
        let mut vp = viewport();
        vp.pan(3, 0, false);
        vp.pan(-1, 7, true);
        vp.zoom(-2, false);
        vp.zoom(0, true);

        let commands = &vp.engine().display().commands()[2..];
        assert_eq!(
            commands,
            &[
                DisplayCommand::Pan(0.025, 0.0),
                DisplayCommand::Pan(-0.005, 0.005),
                DisplayCommand::Zoom(-0.000_25),
                DisplayCommand::Zoom(0.0),
            ]
        );
    }

    #[test]
    fn test_set_layout_resizes_and_selects_first() {
        let mut vp = viewport();
        vp.set_layout(2, 2, 800, 600);
        vp.set_view(ViewPreset::Front);

        assert_eq!(
            &vp.engine().display().commands()[2..],
            &[
                DisplayCommand::Layout(2, 2),
                DisplayCommand::Resize(800, 600),
                DisplayCommand::Select(0),
                DisplayCommand::View(ViewPreset::Front),
            ]
        );
    }

    #[test]
    fn test_mouse_gestures_reach_display() {
        let mut vp = viewport();
        vp.mouse_press((0, 0), MouseButtons::RIGHT, Modifiers::empty());
        vp.mouse_drag((4, 2), MouseButtons::RIGHT, Modifiers::empty());
        vp.mouse_release(MouseButton::Right);
        vp.key_up(Key::Char('c'), (4, 2), MouseButtons::empty(), Modifiers::empty());

        assert_eq!(
            &vp.engine().display().commands()[2..],
            &[
                DisplayCommand::SelectAt(0, 0),
                DisplayCommand::PanDrag((0, 0), (4, 2)),
                DisplayCommand::Center,
            ]
        );
    }

    #[test]
    fn test_close_releases_renderables() {
        let mut vp = viewport();
        let mut scene: DrawScene = [outline("a")].into_iter().collect();
        vp.update(&mut scene);
        assert_eq!(vp.engine().object_count(), 1);

        let engine = vp.close();
        assert_eq!(engine.object_count(), 0);
    }
}
