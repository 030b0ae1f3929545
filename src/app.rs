use crate::core::pipeline::RenderConfig;
use crate::error::RenderError;
use crate::io::config::Config;
use crate::io::image::{save_frame, timestamped_path};
use crate::pipeline::manager::RenderManager;
use crate::pipeline::renderer::SoftwareRenderer;
use crate::scene::loader::{apply_hot_reload, build_camera, build_scene};
use crate::ui::input::CameraController;
use log::{info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::path::Path;
use std::time::Instant;

/// Runs the application in GUI mode with real-time rendering and interactivity.
pub fn run_gui(mut config: Config, config_path: Option<&Path>) -> Result<(), RenderError> {
    let width = config.window.width;
    let height = config.window.height;

    info!("Starting GUI mode ({}x{})...", width, height);
    info!(
        "Controls: WASD=Move, LeftShift=Boost, RightDrag=Look, LeftDrag=Move+Yaw, \
         F1=Renderer, F2=Rotate, F3=Transparent, F5=Shading, F6=NormalMap, F7=Depth, \
         F8=BoundingBox, F9=Cull, F10=ClearColor, F11=FPS, F12=Screenshot, R=Reload"
    );

    // 1. Initialize Window
    let mut window = Window::new(
        &config.window.title,
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| RenderError::Window(e.to_string()))?;
    window.set_target_fps(config.window.target_fps);

    // 2. Initialize Resources
    let mut scene = build_scene(&config);
    let mut camera = build_camera(&config.camera, width as f32 / height as f32);
    let mut cam_controller = CameraController::new(&config.camera);
    let mut manager = RenderManager::new(SoftwareRenderer::new(width, height)?);

    let mut last_frame_time = Instant::now();
    let mut print_fps = false;
    let mut fps_timer = 0.0f32;
    let mut frame_count = 0u32;

    // 3. Main Loop
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // --- Hot Reloading ---
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            match config_path {
                Some(path) => {
                    info!("Reloading configuration...");
                    match Config::load(path) {
                        Ok(new_config) => {
                            apply_hot_reload(&mut scene, &new_config);
                            cam_controller = CameraController::new(&new_config.camera);
                            config.render = new_config.render;
                            info!("Hot reload successful!");
                        }
                        Err(e) => warn!("Failed to reload config: {}", e),
                    }
                }
                None => warn!("No configuration file to reload."),
            }
        }

        // --- Toggles ---
        if window.is_key_pressed(Key::F1, KeyRepeat::No) {
            manager.toggle_renderer();
        }
        handle_toggles(&window, &mut config.render);
        if window.is_key_pressed(Key::F11, KeyRepeat::No) {
            print_fps = !print_fps;
            info!("FPS print: {}", if print_fps { "on" } else { "off" });
        }

        // --- Update ---
        cam_controller.update(&window, &mut camera, dt);
        manager.update(&mut scene, &config.render, dt);

        // --- Render ---
        manager.render(&scene, &camera, &config.render);

        if window.is_key_pressed(Key::F12, KeyRepeat::No) {
            let path = timestamped_path(".", "screenshot", "bmp");
            if let Err(e) = save_frame(manager.frame(), width, height, &path) {
                warn!("{}", e);
            }
        }

        // --- Display ---
        window
            .update_with_buffer(manager.frame(), width, height)
            .map_err(|e| RenderError::Window(e.to_string()))?;

        frame_count += 1;
        fps_timer += dt;
        if fps_timer >= 1.0 {
            if print_fps {
                info!("FPS: {:.1}", frame_count as f32 / fps_timer);
            }
            frame_count = 0;
            fps_timer = 0.0;
        }
    }
    Ok(())
}

/// Maps the software-pipeline function keys onto the render configuration.
fn handle_toggles(window: &Window, render: &mut RenderConfig) {
    let pressed = |key| window.is_key_pressed(key, KeyRepeat::No);
    if pressed(Key::F2) {
        render.toggle_rotation();
    }
    if pressed(Key::F3) {
        render.toggle_transparent();
    }
    if pressed(Key::F5) {
        render.cycle_shading_mode();
    }
    if pressed(Key::F6) {
        render.toggle_normal_map();
    }
    if pressed(Key::F7) {
        render.toggle_depth_buffer();
    }
    if pressed(Key::F8) {
        render.toggle_bounding_box();
    }
    if pressed(Key::F9) {
        render.cycle_cull_mode();
    }
    if pressed(Key::F10) {
        render.toggle_clear_color();
    }
}

/// Runs the application headless: renders `frames` frames with a fixed
/// 60 Hz time step and saves the last one.
pub fn run_cli(config: Config, frames: usize, output: &Path) -> Result<(), RenderError> {
    info!("Starting CLI mode...");
    let width = config.window.width;
    let height = config.window.height;

    let mut scene = build_scene(&config);
    let camera = build_camera(&config.camera, width as f32 / height as f32);
    let mut manager = RenderManager::new(SoftwareRenderer::new(width, height)?);

    let start_time = Instant::now();
    let dt = 1.0 / 60.0;
    for frame in 0..frames.max(1) {
        if frame > 0 {
            manager.update(&mut scene, &config.render, dt);
        }
        manager.render(&scene, &camera, &config.render);
    }
    info!(
        "Rendered {} frame(s) in {:.2?}",
        frames.max(1),
        start_time.elapsed()
    );

    save_frame(manager.frame(), width, height, output)?;
    info!("Done.");
    Ok(())
}
