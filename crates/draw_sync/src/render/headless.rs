//! In-memory rendering engine
//!
//! Keeps every renderable, texture and light in plain data structures and
//! counts the calls made against them. Nothing is drawn. Used by the demo
//! binary and as the engine behind the synchronizer tests.

use std::sync::Arc;

use slotmap::{new_key_type, Key, KeyData, SlotMap};

use super::engine::{
    Display, GeomType, LightSlot, ObjectHandle, ObjectKind, RenderEngine, RenderStyle,
    Renderable, TextureHandle, TextureManager, ViewPreset,
};
use super::Vertex;
use crate::assets::Texture2D;

new_key_type! {
    struct ObjectKey;
    struct TextureKey;
}

/// Number of light slots, matching classic fixed-function pipelines
pub const HEADLESS_LIGHT_SLOTS: usize = 8;

/// Calls made against the engine since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounters {
    /// `create_object` calls
    pub objects_created: usize,
    /// `remove_object` calls that hit a live object
    pub objects_removed: usize,
    /// `append_vertex_buffer` calls
    pub vertex_uploads: usize,
    /// `append_element_buffer` calls
    pub element_uploads: usize,
    /// `TextureManager::add` calls
    pub texture_adds: usize,
    /// `TextureManager::remove` calls that hit a live texture
    pub texture_removes: usize,
    /// translate/scale/transparentize/flip calls
    pub texture_state_pushes: usize,
    /// Any light slot setter call
    pub light_writes: usize,
}

impl CallCounters {
    fn absorb(&mut self, other: &Self) {
        self.objects_created += other.objects_created;
        self.objects_removed += other.objects_removed;
        self.vertex_uploads += other.vertex_uploads;
        self.element_uploads += other.element_uploads;
        self.texture_adds += other.texture_adds;
        self.texture_removes += other.texture_removes;
        self.texture_state_pushes += other.texture_state_pushes;
        self.light_writes += other.light_writes;
    }
}

/// State of one attached texture
#[derive(Debug, Clone)]
pub struct TextureState {
    /// Shared image
    pub texture: Arc<Texture2D>,
    /// Coordinate offset
    pub translation: [f32; 2],
    /// Coordinate scale
    pub scale: [f32; 2],
    /// Opacity
    pub alpha: f32,
    /// Mirroring along U and V
    pub flip: [bool; 2],
}

/// Texture manager of one headless entity
#[derive(Debug, Default)]
pub struct HeadlessTextures {
    textures: SlotMap<TextureKey, TextureState>,
    counters: CallCounters,
}

impl HeadlessTextures {
    /// Look up an attached texture
    pub fn get(&self, handle: TextureHandle) -> Option<&TextureState> {
        self.textures.get(TextureKey::from(KeyData::from_ffi(handle.0)))
    }

    /// Number of attached textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether no texture is attached
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn state_mut(&mut self, handle: TextureHandle) -> Option<&mut TextureState> {
        self.counters.texture_state_pushes += 1;
        let state = self.textures.get_mut(TextureKey::from(KeyData::from_ffi(handle.0)));
        if state.is_none() {
            log::warn!("Texture state pushed to unknown handle {:?}", handle);
        }
        state
    }
}

impl TextureManager for HeadlessTextures {
    fn add(&mut self, texture: Arc<Texture2D>) -> TextureHandle {
        self.counters.texture_adds += 1;
        let key = self.textures.insert(TextureState {
            texture,
            translation: [0.0, 0.0],
            scale: [1.0, 1.0],
            alpha: 1.0,
            flip: [false, false],
        });
        TextureHandle(key.data().as_ffi())
    }

    fn remove(&mut self, handle: TextureHandle) {
        if self.textures.remove(TextureKey::from(KeyData::from_ffi(handle.0))).is_some() {
            self.counters.texture_removes += 1;
        }
    }

    fn translate(&mut self, handle: TextureHandle, u: f32, v: f32) {
        if let Some(state) = self.state_mut(handle) {
            state.translation = [u, v];
        }
    }

    fn scale(&mut self, handle: TextureHandle, u: f32, v: f32) {
        if let Some(state) = self.state_mut(handle) {
            state.scale = [u, v];
        }
    }

    fn transparentize(&mut self, handle: TextureHandle, alpha: f32) {
        if let Some(state) = self.state_mut(handle) {
            state.alpha = alpha;
        }
    }

    fn flip_coord(&mut self, handle: TextureHandle, flip_u: bool, flip_v: bool) {
        if let Some(state) = self.state_mut(handle) {
            state.flip = [flip_u, flip_v];
        }
    }
}

/// One renderable held by the headless engine
#[derive(Debug)]
pub struct HeadlessObject {
    /// Category it was created with
    pub kind: ObjectKind,
    /// Visibility
    pub visible: bool,
    /// Primitive assembly, once set
    pub geom_type: Option<GeomType>,
    /// Shading style, once set
    pub render_style: Option<RenderStyle>,
    /// RGB line color
    pub line_color: [f32; 3],
    /// Line width
    pub line_width: f32,
    /// Raw vertex bytes
    pub vertex_bytes: Vec<u8>,
    /// Raw index bytes
    pub element_bytes: Vec<u8>,
    /// Indexed drawing enabled
    pub element_buffer_enabled: bool,
    textures: Option<HeadlessTextures>,
    counters: CallCounters,
}

impl HeadlessObject {
    fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            visible: true,
            geom_type: None,
            render_style: None,
            line_color: [0.0; 3],
            line_width: 1.0,
            vertex_bytes: Vec::new(),
            element_bytes: Vec::new(),
            element_buffer_enabled: false,
            // Only entities carry textures
            textures: matches!(kind, ObjectKind::Entity).then(HeadlessTextures::default),
            counters: CallCounters::default(),
        }
    }

    /// Vertex buffer decoded back into vertices
    pub fn vertices(&self) -> Vec<Vertex> {
        self.vertex_bytes
            .chunks_exact(std::mem::size_of::<Vertex>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    /// Element buffer decoded back into indices
    pub fn indices(&self) -> Vec<u32> {
        self.element_bytes
            .chunks_exact(std::mem::size_of::<u32>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }

    /// Attached textures, `None` for markers
    pub fn textures(&self) -> Option<&HeadlessTextures> {
        self.textures.as_ref()
    }

    fn totals(&self) -> CallCounters {
        let mut totals = self.counters;
        if let Some(textures) = &self.textures {
            totals.absorb(&textures.counters);
        }
        totals
    }
}

impl Renderable for HeadlessObject {
    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_geom_type(&mut self, geom_type: GeomType) {
        self.geom_type = Some(geom_type);
    }

    fn set_render_style(&mut self, style: RenderStyle) {
        self.render_style = Some(style);
    }

    fn set_line_color(&mut self, r: f32, g: f32, b: f32) {
        self.line_color = [r, g, b];
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn empty_vertex_buffer(&mut self) {
        self.vertex_bytes.clear();
    }

    fn append_vertex_buffer(&mut self, data: &[u8]) {
        self.counters.vertex_uploads += 1;
        self.vertex_bytes.extend_from_slice(data);
    }

    fn empty_element_buffer(&mut self) {
        self.element_bytes.clear();
    }

    fn append_element_buffer(&mut self, data: &[u8]) {
        self.counters.element_uploads += 1;
        self.element_bytes.extend_from_slice(data);
    }

    fn enable_element_buffer(&mut self, enable: bool) {
        self.element_buffer_enabled = enable;
    }

    fn texture_manager_mut(&mut self) -> Option<&mut dyn TextureManager> {
        self.textures.as_mut().map(|t| t as &mut dyn TextureManager)
    }
}

/// One headless light slot
#[derive(Debug, Clone, Default)]
pub struct HeadlessLight {
    /// Homogeneous position
    pub position: [f32; 4],
    /// Ambient RGBA
    pub ambient: [f32; 4],
    /// Diffuse RGBA
    pub diffuse: [f32; 4],
    /// Specular RGBA
    pub specular: [f32; 4],
    /// Switched on
    pub enabled: bool,
    writes: usize,
}

impl LightSlot for HeadlessLight {
    fn set_position(&mut self, position: [f32; 4]) {
        self.writes += 1;
        self.position = position;
    }

    fn set_ambient(&mut self, color: [f32; 4]) {
        self.writes += 1;
        self.ambient = color;
    }

    fn set_diffuse(&mut self, color: [f32; 4]) {
        self.writes += 1;
        self.diffuse = color;
    }

    fn set_specular(&mut self, color: [f32; 4]) {
        self.writes += 1;
        self.specular = color;
    }

    fn enable(&mut self) {
        self.writes += 1;
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.writes += 1;
        self.enabled = false;
    }
}

/// Display operation recorded by the headless display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayCommand {
    /// `set_layout`
    Layout(u32, u32),
    /// `select_viewport`
    Select(usize),
    /// `select_viewport_at`
    SelectAt(i32, i32),
    /// `resize`
    Resize(u32, u32),
    /// `pan_by`
    Pan(f32, f32),
    /// `zoom_by`
    Zoom(f32),
    /// `rotate_drag`
    RotateDrag((i32, i32), (i32, i32)),
    /// `pan_drag`
    PanDrag((i32, i32), (i32, i32)),
    /// `zoom_drag`
    ZoomDrag((i32, i32), (i32, i32)),
    /// `center`
    Center,
    /// `save`
    Save(usize),
    /// `load`
    Load(usize),
    /// `change_view`
    View(ViewPreset),
}

/// Display that records every command it receives
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    commands: Vec<DisplayCommand>,
}

impl HeadlessDisplay {
    /// Commands received so far
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Forget recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Display for HeadlessDisplay {
    fn set_layout(&mut self, rows: u32, columns: u32) {
        self.commands.push(DisplayCommand::Layout(rows, columns));
    }

    fn select_viewport(&mut self, index: usize) {
        self.commands.push(DisplayCommand::Select(index));
    }

    fn select_viewport_at(&mut self, x: i32, y: i32) {
        self.commands.push(DisplayCommand::SelectAt(x, y));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(DisplayCommand::Resize(width, height));
    }

    fn pan_by(&mut self, x: f32, y: f32) {
        self.commands.push(DisplayCommand::Pan(x, y));
    }

    fn zoom_by(&mut self, amount: f32) {
        self.commands.push(DisplayCommand::Zoom(amount));
    }

    fn rotate_drag(&mut self, from: (i32, i32), to: (i32, i32)) {
        self.commands.push(DisplayCommand::RotateDrag(from, to));
    }

    fn pan_drag(&mut self, from: (i32, i32), to: (i32, i32)) {
        self.commands.push(DisplayCommand::PanDrag(from, to));
    }

    fn zoom_drag(&mut self, from: (i32, i32), to: (i32, i32)) {
        self.commands.push(DisplayCommand::ZoomDrag(from, to));
    }

    fn center(&mut self) {
        self.commands.push(DisplayCommand::Center);
    }

    fn save(&mut self, slot: usize) {
        self.commands.push(DisplayCommand::Save(slot));
    }

    fn load(&mut self, slot: usize) {
        self.commands.push(DisplayCommand::Load(slot));
    }

    fn change_view(&mut self, preset: ViewPreset) {
        self.commands.push(DisplayCommand::View(preset));
    }
}

/// In-memory [`RenderEngine`]
#[derive(Debug)]
pub struct HeadlessEngine {
    objects: SlotMap<ObjectKey, HeadlessObject>,
    lights: Vec<HeadlessLight>,
    display: HeadlessDisplay,
    /// Counters of objects already removed
    retired: CallCounters,
    objects_created: usize,
    objects_removed: usize,
}

impl HeadlessEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            lights: vec![HeadlessLight::default(); HEADLESS_LIGHT_SLOTS],
            display: HeadlessDisplay::default(),
            retired: CallCounters::default(),
            objects_created: 0,
            objects_removed: 0,
        }
    }

    /// Inspect a live object
    pub fn object(&self, handle: ObjectHandle) -> Option<&HeadlessObject> {
        self.objects.get(ObjectKey::from(KeyData::from_ffi(handle.0)))
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Inspect a light slot
    pub fn light(&self, index: usize) -> Option<&HeadlessLight> {
        self.lights.get(index)
    }

    /// Inspect the display
    pub fn display(&self) -> &HeadlessDisplay {
        &self.display
    }

    /// Totals over live and removed objects
    pub fn counters(&self) -> CallCounters {
        let mut totals = self.retired;
        for object in self.objects.values() {
            totals.absorb(&object.totals());
        }
        totals.objects_created = self.objects_created;
        totals.objects_removed = self.objects_removed;
        totals.light_writes = self.lights.iter().map(|l| l.writes).sum();
        totals
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for HeadlessEngine {
    fn create_object(&mut self, kind: ObjectKind) -> ObjectHandle {
        self.objects_created += 1;
        let key = self.objects.insert(HeadlessObject::new(kind));
        ObjectHandle(key.data().as_ffi())
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut dyn Renderable> {
        self.objects
            .get_mut(ObjectKey::from(KeyData::from_ffi(handle.0)))
            .map(|o| o as &mut dyn Renderable)
    }

    fn remove_object(&mut self, handle: ObjectHandle) {
        if let Some(object) = self.objects.remove(ObjectKey::from(KeyData::from_ffi(handle.0))) {
            self.objects_removed += 1;
            self.retired.absorb(&object.totals());
        }
    }

    fn light_slot_count(&self) -> usize {
        self.lights.len()
    }

    fn light_slot_mut(&mut self, index: usize) -> Option<&mut dyn LightSlot> {
        self.lights.get_mut(index).map(|l| l as &mut dyn LightSlot)
    }

    fn display_mut(&mut self) -> &mut dyn Display {
        &mut self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;

    fn texture() -> Arc<Texture2D> {
        Arc::new(Texture2D::new("white.png", ImageData::solid_color(2, 2, [255; 4])))
    }

    #[test]
    fn test_create_and_remove() {
        let mut engine = HeadlessEngine::new();
        let a = engine.create_object(ObjectKind::Marker);
        let b = engine.create_object(ObjectKind::Entity);
        assert_ne!(a, b);
        assert_eq!(engine.object_count(), 2);

        engine.remove_object(a);
        engine.remove_object(a);
        assert_eq!(engine.object_count(), 1);
        assert!(engine.object(a).is_none());
        assert!(engine.object_mut(a).is_none());

        let counters = engine.counters();
        assert_eq!(counters.objects_created, 2);
        assert_eq!(counters.objects_removed, 1);
    }

    #[test]
    fn test_markers_have_no_texture_manager() {
        let mut engine = HeadlessEngine::new();
        let marker = engine.create_object(ObjectKind::Marker);
        let entity = engine.create_object(ObjectKind::Entity);
        assert!(engine.object_mut(marker).unwrap().texture_manager_mut().is_none());
        assert!(engine.object_mut(entity).unwrap().texture_manager_mut().is_some());
    }

    #[test]
    fn test_buffers_round_trip() {
        let mut engine = HeadlessEngine::new();
        let handle = engine.create_object(ObjectKind::Entity);
        let vertices = [Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5])];
        let indices = [0u32, 1, 2, 3];

        let object = engine.object_mut(handle).unwrap();
        object.empty_vertex_buffer();
        object.append_vertex_buffer(bytemuck::cast_slice(&vertices));
        object.empty_element_buffer();
        object.append_element_buffer(bytemuck::cast_slice(&indices));
        object.enable_element_buffer(true);

        let object = engine.object(handle).unwrap();
        assert_eq!(object.vertices(), vertices);
        assert_eq!(object.indices(), indices);
        assert!(object.element_buffer_enabled);
        assert_eq!(engine.counters().vertex_uploads, 1);
        assert_eq!(engine.counters().element_uploads, 1);
    }

    #[test]
    fn test_removed_object_counters_are_kept() {
        let mut engine = HeadlessEngine::new();
        let handle = engine.create_object(ObjectKind::Entity);
        {
            let tex = engine.object_mut(handle).unwrap().texture_manager_mut().unwrap();
            let t = tex.add(texture());
            tex.scale(t, 2.0, 2.0);
        }
        engine.remove_object(handle);

        let counters = engine.counters();
        assert_eq!(counters.texture_adds, 1);
        assert_eq!(counters.texture_state_pushes, 1);
    }

    #[test]
    fn test_texture_state() {
        let mut engine = HeadlessEngine::new();
        let handle = engine.create_object(ObjectKind::Entity);
        let tex = engine.object_mut(handle).unwrap().texture_manager_mut().unwrap();
        let t = tex.add(texture());
        tex.translate(t, -0.5, 0.25);
        tex.flip_coord(t, true, false);
        tex.transparentize(t, 0.4);

        let textures = engine.object(handle).unwrap().textures().unwrap();
        let state = textures.get(t).unwrap();
        assert_eq!(state.translation, [-0.5, 0.25]);
        assert_eq!(state.flip, [true, false]);
        assert_eq!(state.alpha, 0.4);
    }

    #[test]
    fn test_light_slots() {
        let mut engine = HeadlessEngine::new();
        assert_eq!(engine.light_slot_count(), HEADLESS_LIGHT_SLOTS);
        assert!(engine.light_slot_mut(HEADLESS_LIGHT_SLOTS).is_none());

        let slot = engine.light_slot_mut(3).unwrap();
        slot.set_position([1.0, 2.0, 3.0, 0.0]);
        slot.enable();

        let light = engine.light(3).unwrap();
        assert!(light.enabled);
        assert_eq!(light.position, [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(engine.counters().light_writes, 2);
    }
}
