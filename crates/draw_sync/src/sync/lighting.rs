//! Lighting packet forwarding

use crate::draw::LightDescriptor;
use crate::render::RenderEngine;

/// Light slots a lighting packet may address
pub const MAX_LIGHTS: usize = 8;

/// Push light descriptors to the engine's slots by index
///
/// Descriptors past [`MAX_LIGHTS`] are dropped with a warning. Returns the
/// number of slots written.
pub fn apply_lighting(engine: &mut dyn RenderEngine, lights: &[LightDescriptor]) -> usize {
    if lights.len() > MAX_LIGHTS {
        log::warn!(
            "{} light sources requested, only the first {} are applied",
            lights.len(),
            MAX_LIGHTS
        );
    }

    let mut applied = 0;
    for (index, light) in lights.iter().take(MAX_LIGHTS).enumerate() {
        let Some(slot) = engine.light_slot_mut(index) else {
            log::warn!("Engine has no light slot {}, light ignored", index);
            continue;
        };

        let p = light.position;
        slot.set_position([p.x, p.y, p.z, 0.0]);
        slot.set_ambient(grey(light.ambient));
        slot.set_diffuse(grey(light.diffuse));
        slot.set_specular(grey(light.specular));

        if light.enabled {
            slot.enable();
        } else {
            slot.disable();
        }
        applied += 1;
    }

    applied
}

fn grey(intensity: f32) -> [f32; 4] {
    [intensity, intensity, intensity, 1.0]
}
