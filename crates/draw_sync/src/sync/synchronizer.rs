//! Draw-set synchronizer - bridge between draw-objects and the engine
//!
//! Once per frame, before drawing:
//! 1. Bindings whose geometry identity vanished from the draw list are
//!    released and dropped; the retained set is swapped in whole.
//! 2. Each draw-object aimed at this viewport gets (or creates) its binding,
//!    has its style pushed, its buffers uploaded when dirty or newly created
//!    and, for textured meshes, its textures reconciled. A geometry identity
//!    listed twice with conflicting categories keeps its first entry.
//! 3. Lighting packets are forwarded to the engine's light slots.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::buffers::MeshBuffers;
use super::kind_table::KindProfile;
use super::lighting::apply_lighting;
use super::textures::reconcile_textures;
use crate::assets::TextureCache;
use crate::draw::{DrawObject, Screen, DEFAULT_GEOM_ID};
use crate::render::{ObjectHandle, ObjectKind, RenderEngine, TextureHandle};

/// Texture identity linked to an engine texture handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureBinding {
    /// Identity from the texture descriptor
    pub texture_id: String,
    /// Handle issued by the renderable's texture manager
    pub handle: TextureHandle,
}

/// Geometry identity linked to an engine renderable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferBinding {
    /// Geometry identity of the draw-object
    pub geom_id: String,
    /// Renderable issued by the engine
    pub object: ObjectHandle,
    /// Category the renderable was created with
    pub kind: ObjectKind,
    /// Attached textures, at most one per texture identity
    pub textures: Vec<TextureBinding>,
}

impl BufferBinding {
    fn new(geom_id: impl Into<String>, object: ObjectHandle, kind: ObjectKind) -> Self {
        Self {
            geom_id: geom_id.into(),
            object,
            kind,
            textures: Vec::new(),
        }
    }

    /// Find an attached texture by identity
    pub fn find_texture(&self, texture_id: &str) -> Option<&TextureBinding> {
        self.textures.iter().find(|t| t.texture_id == texture_id)
    }
}

/// What one synchronization pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Renderables created
    pub bindings_created: usize,
    /// Renderables released
    pub bindings_removed: usize,
    /// Draw-objects aimed at another screen
    pub skipped_other_screen: usize,
    /// Vertex buffers replaced
    pub vertex_uploads: usize,
    /// Element buffers replaced
    pub element_uploads: usize,
    /// Dirty draw-objects whose payload could not be loaded
    pub geometry_errors: usize,
    /// Textures attached
    pub textures_added: usize,
    /// Textures detached
    pub textures_removed: usize,
    /// Texture files that could not be loaded
    pub texture_load_failures: usize,
    /// Light slots written
    pub lights_updated: usize,
}

/// Keeps one viewport's engine objects in step with the draw list
pub struct DrawSetSynchronizer {
    /// Draw-objects for other screens are skipped
    linked_screen: Screen,

    /// Geometry identity → binding
    bindings: HashMap<String, BufferBinding>,

    /// File-keyed textures shared with other viewports
    texture_cache: Arc<TextureCache>,
}

impl DrawSetSynchronizer {
    /// Create a synchronizer for one screen
    pub fn new(linked_screen: Screen, texture_cache: Arc<TextureCache>) -> Self {
        Self {
            linked_screen,
            bindings: HashMap::new(),
            texture_cache,
        }
    }

    /// Screen this synchronizer accepts draw-objects for
    pub fn linked_screen(&self) -> Screen {
        self.linked_screen
    }

    /// Binding of a geometry identity
    pub fn binding(&self, geom_id: &str) -> Option<&BufferBinding> {
        self.bindings.get(geom_id)
    }

    /// All live bindings, in no particular order
    pub fn bindings(&self) -> impl Iterator<Item = &BufferBinding> {
        self.bindings.values()
    }

    /// Number of live bindings
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Shared texture cache
    pub fn texture_cache(&self) -> &Arc<TextureCache> {
        &self.texture_cache
    }

    /// Run one synchronization pass
    ///
    /// Reads the draw-objects only; acknowledging consumed geometry changes
    /// is left to the caller.
    pub fn synchronize(
        &mut self,
        engine: &mut dyn RenderEngine,
        objects: &[&DrawObject],
    ) -> SyncStats {
        let mut stats = SyncStats::default();

        self.reconcile(engine, objects, &mut stats);
        let mut seen = HashSet::new();
        for object in objects {
            self.apply(engine, *object, &mut seen, &mut stats);
        }

        log::debug!(
            "Synchronized {} draw-objects into {} bindings: {:?}",
            objects.len(),
            self.bindings.len(),
            stats
        );
        stats
    }

    /// Release every binding, e.g. when the viewport closes
    pub fn clear(&mut self, engine: &mut dyn RenderEngine) -> usize {
        let released = self.bindings.len();
        for (_, binding) in self.bindings.drain() {
            engine.remove_object(binding.object);
        }
        released
    }

    fn reconcile(
        &mut self,
        engine: &mut dyn RenderEngine,
        objects: &[&DrawObject],
        stats: &mut SyncStats,
    ) {
        let live: HashSet<&str> = objects
            .iter()
            .map(|o| o.geom_id.as_str())
            .filter(|id| *id != DEFAULT_GEOM_ID)
            .collect();

        let (retained, stale): (HashMap<_, _>, HashMap<_, _>) = std::mem::take(&mut self.bindings)
            .into_iter()
            .partition(|(geom_id, _)| live.contains(geom_id.as_str()));

        for binding in stale.into_values() {
            log::trace!("Releasing '{}' ({:?})", binding.geom_id, binding.object);
            engine.remove_object(binding.object);
            stats.bindings_removed += 1;
        }

        self.bindings = retained;
    }

    fn apply<'a>(
        &mut self,
        engine: &mut dyn RenderEngine,
        object: &'a DrawObject,
        seen: &mut HashSet<&'a str>,
        stats: &mut SyncStats,
    ) {
        if object.screen != self.linked_screen {
            stats.skipped_other_screen += 1;
            return;
        }

        let Some(profile) = KindProfile::of(object.kind) else {
            stats.lights_updated += apply_lighting(engine, &object.lights);
            return;
        };

        // Line kinds and surface kinds need different engine objects
        let first_sighting = seen.insert(object.geom_id.as_str());
        if self
            .bindings
            .get(&object.geom_id)
            .is_some_and(|b| b.kind != profile.object_kind)
        {
            if !first_sighting {
                log::warn!(
                    "'{}' listed again as {:?}, keeping the renderable of its first entry",
                    object.geom_id,
                    object.kind
                );
                return;
            }
            if let Some(old) = self.bindings.remove(&object.geom_id) {
                log::debug!(
                    "'{}' switched to {:?}, recreating its renderable",
                    object.geom_id,
                    object.kind
                );
                engine.remove_object(old.object);
                stats.bindings_removed += 1;
            }
        }

        let mut created = false;
        let binding = self
            .bindings
            .entry(object.geom_id.clone())
            .or_insert_with(|| {
                let handle = engine.create_object(profile.object_kind);
                log::trace!("Created {:?} {:?} for '{}'", profile.object_kind, handle, object.geom_id);
                stats.bindings_created += 1;
                created = true;
                BufferBinding::new(&object.geom_id, handle, profile.object_kind)
            });
        let handle = binding.object;

        let Some(renderable) = engine.object_mut(handle) else {
            log::error!(
                "Renderable {:?} of '{}' is gone from the engine, recreating next pass",
                handle,
                object.geom_id
            );
            self.bindings.remove(&object.geom_id);
            stats.bindings_removed += 1;
            return;
        };

        renderable.set_visibility(object.visible);
        renderable.set_geom_type(profile.geom_type);
        if let Some(style) = profile.render_style {
            renderable.set_render_style(style);
        }
        let color = object.line_color;
        renderable.set_line_color(color.x, color.y, color.z);
        renderable.set_line_width(object.line_width);

        // A fresh renderable has no buffers yet; the sentinel only loads when dirty
        if object.geom_changed || (created && !object.is_default()) {
            match MeshBuffers::build(profile.load, &object.geometry) {
                Ok(buffers) => {
                    stats.vertex_uploads += 1;
                    if buffers.upload(renderable) {
                        stats.element_uploads += 1;
                    }
                }
                Err(e) => {
                    log::error!("Buffers of '{}' not updated: {}", object.geom_id, e);
                    stats.geometry_errors += 1;
                }
            }
        }

        if profile.textured {
            let Some(binding) = self.bindings.get_mut(&object.geom_id) else {
                panic!("texture update for '{}' without a binding", object.geom_id);
            };
            reconcile_textures(binding, engine, &object.textures, &self.texture_cache, stats);
        }
    }
}

impl std::fmt::Debug for DrawSetSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawSetSynchronizer")
            .field("linked_screen", &self.linked_screen)
            .field("bindings", &self.bindings.len())
            .finish_non_exhaustive()
    }
}
