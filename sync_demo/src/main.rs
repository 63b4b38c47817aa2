//! Headless draw-set synchronization demo
//!
//! Builds a small aircraft-like scene, runs several frames through a
//! viewport backed by the headless engine and logs what every pass did.
//!
//! Usage: `sync_demo [viewer.toml|viewer.ron]`

use std::f64::consts::TAU;
use std::sync::Arc;

use draw_sync::foundation::logging;
use draw_sync::prelude::*;

/// Points around each fuselage ring
const RING_POINTS: usize = 16;
/// Rings along the fuselage
const STATIONS: usize = 12;

fn fuselage(radius: f64) -> Geometry {
    let mut points = Vec::with_capacity(STATIONS);
    let mut normals = Vec::with_capacity(STATIONS);

    for i in 0..STATIONS {
        let x = i as f64;
        // Taper towards the tail
        let r = radius * (1.0 - 0.05 * x);
        let mut ring = Vec::with_capacity(RING_POINTS);
        let mut ring_normals = Vec::with_capacity(RING_POINTS);
        for j in 0..RING_POINTS {
            let angle = TAU * j as f64 / RING_POINTS as f64;
            ring.push(Vec3d::new(x, r * angle.cos(), r * angle.sin()));
            ring_normals.push(Vec3d::new(0.0, angle.cos(), angle.sin()));
        }
        points.push(ring);
        normals.push(ring_normals);
    }

    Geometry::Grid { points, normals }
}

fn outline() -> Geometry {
    Geometry::Flat {
        points: vec![
            Vec3d::new(0.0, 0.0, 0.0),
            Vec3d::new(STATIONS as f64, 0.0, 0.0),
        ],
        normals: Vec::new(),
    }
}

fn checkerboard(cache: &TextureCache, name: &str) -> Result<Arc<Texture2D>, AssetError> {
    const SIZE: u32 = 8;
    let mut data = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let shade = if (x + y) % 2 == 0 { 230 } else { 40 };
            data.extend_from_slice(&[shade, shade, shade, 255]);
        }
    }
    Ok(cache.insert(name, ImageData::from_raw(data, SIZE, SIZE)?))
}

fn build_scene() -> DrawScene {
    let sun = LightDescriptor {
        position: Vec3::new(10.0, 20.0, 10.0),
        ambient: 0.3,
        diffuse: 0.6,
        specular: 0.4,
        enabled: true,
    };

    let mut decal = TextureDescriptor::new("checker", "checker.png");
    decal.u_scale = 4.0;
    decal.v_scale = 2.0;
    decal.transparency = 0.8;

    [
        DrawObject::lighting("lights", vec![sun]),
        DrawObject::new("fuselage", DrawKind::TexturedMesh)
            .with_geometry(fuselage(1.0))
            .with_textures(vec![decal]),
        DrawObject::new("centerline", DrawKind::LineStrip)
            .with_geometry(outline())
            .with_line_style(Vec3::new(1.0, 0.2, 0.2), 2.0),
        DrawObject::new("xsec_preview", DrawKind::WireMesh)
            .with_screen(Screen::CrossSection)
            .with_geometry(fuselage(0.5)),
    ]
    .into_iter()
    .collect()
}

fn report(frame: usize, stats: &SyncStats) {
    log::info!(
        "Frame {}: +{} -{} bindings, {} vertex / {} element uploads, +{} -{} textures, {} lights, {} skipped",
        frame,
        stats.bindings_created,
        stats.bindings_removed,
        stats.vertex_uploads,
        stats.element_uploads,
        stats.textures_added,
        stats.textures_removed,
        stats.lights_updated,
        stats.skipped_other_screen,
    );
    if stats.geometry_errors > 0 || stats.texture_load_failures > 0 {
        log::warn!(
            "Frame {}: {} geometry errors, {} texture load failures",
            frame,
            stats.geometry_errors,
            stats.texture_load_failures
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => ViewerConfig::load_from_file(&path)?,
        None => ViewerConfig::default(),
    };
    config.validate()?;

    logging::init_with_filter(&config.log_filter);
    log::info!("Starting draw-set synchronization demo");

    let cache = Arc::new(match &config.texture_root {
        Some(root) => TextureCache::with_root(root),
        None => TextureCache::new(),
    });
    // Keep the generated image alive until the fuselage picks it up
    let checker = checkerboard(&cache, "checker.png")?;

    let mut viewport = Viewport::new(HeadlessEngine::new(), &config, Arc::clone(&cache));
    let mut scene = build_scene();

    // Frame 0: everything is new
    report(0, &viewport.update(&mut scene));
    drop(checker);

    // Frame 1: nothing changed
    report(1, &viewport.update(&mut scene));

    // Frame 2: fuselage reshaped, camera moved
    if let Some(fuselage_obj) = scene.get_mut("fuselage") {
        fuselage_obj.geometry = fuselage(1.2);
        fuselage_obj.geom_changed = true;
    }
    viewport.mouse_press((400, 300), MouseButtons::LEFT, Modifiers::empty());
    viewport.mouse_drag((420, 310), MouseButtons::LEFT, Modifiers::empty());
    viewport.mouse_release(MouseButton::Left);
    viewport.zoom(1, false);
    report(2, &viewport.update(&mut scene));

    // Frame 3: centerline hidden and decal dropped
    scene.remove("centerline");
    if let Some(fuselage_obj) = scene.get_mut("fuselage") {
        fuselage_obj.textures.clear();
    }
    viewport.key_up(Key::F(6), (0, 0), MouseButtons::empty(), Modifiers::empty());
    report(3, &viewport.update(&mut scene));

    log::info!(
        "{} textures still cached, engine counters: {:?}",
        cache.live_count(),
        viewport.engine().counters()
    );

    let engine = viewport.close();
    log::info!("Demo finished with {} renderables left", engine.object_count());
    Ok(())
}
