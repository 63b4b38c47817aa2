//! Texture reconciliation for textured meshes

use super::synchronizer::{BufferBinding, SyncStats, TextureBinding};
use crate::assets::TextureCache;
use crate::draw::TextureDescriptor;
use crate::render::RenderEngine;

/// Engine-side texture transform derived from a descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureTransform {
    /// Offset, U is negated
    pub translate: [f32; 2],
    /// Inverse repeat scale
    pub scale: [f32; 2],
}

impl TextureTransform {
    /// Transform for one descriptor
    ///
    /// A zero or non-finite scale is replaced by 1.
    pub fn of(descriptor: &TextureDescriptor) -> Self {
        let u_scale = 1.0 / usable_scale(descriptor.u_scale, "U", &descriptor.id);
        let v_scale = 1.0 / usable_scale(descriptor.v_scale, "V", &descriptor.id);

        Self {
            translate: [(-descriptor.u * u_scale) as f32, (descriptor.v * v_scale) as f32],
            scale: [u_scale as f32, v_scale as f32],
        }
    }
}

fn usable_scale(scale: f64, axis: &str, texture_id: &str) -> f64 {
    if scale.is_finite() && scale != 0.0 {
        scale
    } else {
        log::warn!(
            "Texture '{}' has unusable {} scale {}, using 1",
            texture_id,
            axis,
            scale
        );
        1.0
    }
}

/// Bring a binding's textures in line with the descriptor list
///
/// Stale textures are detached, new ones are loaded through the shared
/// cache and attached, and every texture's state is pushed again.
///
/// # Panics
///
/// When the binding's renderable is gone or cannot carry textures. Both mean
/// a textured draw-object reached this point without its geometry.
/// [`DrawSetSynchronizer`](super::DrawSetSynchronizer) drops a binding whose
/// renderable left the engine before it gets here and recreates marker
/// bindings as entities first, so only direct callers can trigger either.
pub fn reconcile_textures(
    binding: &mut BufferBinding,
    engine: &mut dyn RenderEngine,
    descriptors: &[TextureDescriptor],
    cache: &TextureCache,
    stats: &mut SyncStats,
) {
    let Some(renderable) = engine.object_mut(binding.object) else {
        panic!(
            "texture update for '{}': renderable {:?} does not exist",
            binding.geom_id, binding.object
        );
    };
    let Some(manager) = renderable.texture_manager_mut() else {
        panic!(
            "texture update for '{}': renderable {:?} cannot carry textures",
            binding.geom_id, binding.object
        );
    };

    let (kept, stale): (Vec<TextureBinding>, Vec<TextureBinding>) =
        std::mem::take(&mut binding.textures)
            .into_iter()
            .partition(|t| descriptors.iter().any(|d| d.id == t.texture_id));

    for texture in stale {
        log::trace!("Detaching texture '{}' from '{}'", texture.texture_id, binding.geom_id);
        manager.remove(texture.handle);
        stats.textures_removed += 1;
    }
    binding.textures = kept;

    for descriptor in descriptors {
        let handle = match binding.find_texture(&descriptor.id) {
            Some(texture) => texture.handle,
            None => match cache.get_2d_texture(&descriptor.file_name) {
                Ok(texture) => {
                    let handle = manager.add(texture);
                    binding.textures.push(TextureBinding {
                        texture_id: descriptor.id.clone(),
                        handle,
                    });
                    stats.textures_added += 1;
                    handle
                }
                Err(e) => {
                    log::warn!(
                        "Texture '{}' of '{}' not attached: {}",
                        descriptor.id,
                        binding.geom_id,
                        e
                    );
                    stats.texture_load_failures += 1;
                    continue;
                }
            },
        };

        let transform = TextureTransform::of(descriptor);
        manager.translate(handle, transform.translate[0], transform.translate[1]);
        manager.scale(handle, transform.scale[0], transform.scale[1]);
        manager.transparentize(handle, descriptor.transparency);
        manager.flip_coord(handle, descriptor.flip_u, descriptor.flip_v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_negates_u_only() {
        let mut descriptor = TextureDescriptor::new("decal", "decal.png");
        descriptor.u = 0.5;
        descriptor.v = 0.25;
        descriptor.u_scale = 2.0;
        descriptor.v_scale = 4.0;

        let transform = TextureTransform::of(&descriptor);
        assert_relative_eq!(transform.translate[0], -0.25);
        assert_relative_eq!(transform.translate[1], 0.0625);
        assert_relative_eq!(transform.scale[0], 0.5);
        assert_relative_eq!(transform.scale[1], 0.25);
    }

    #[test]
    fn test_zero_scale_falls_back_to_unit() {
        let mut descriptor = TextureDescriptor::new("decal", "decal.png");
        descriptor.u = 0.5;
        descriptor.u_scale = 0.0;
        descriptor.v_scale = f64::NAN;

        let transform = TextureTransform::of(&descriptor);
        assert_eq!(transform.scale, [1.0, 1.0]);
        assert_relative_eq!(transform.translate[0], -0.5);
    }
}
