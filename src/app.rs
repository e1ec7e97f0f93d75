use crate::core::timer::FrameTimer;
use crate::io::config::Config;
use crate::io::error::LoadError;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::renderer::{Renderer, SceneRenderer};
use crate::scene::camera::CameraInput;
use crate::scene::context::RasterizerMode;
use crate::scene::loader::init_scene_resources;
use log::{debug, info, warn};
use std::time::Instant;

/// Picks the renderer for the requested path. Only the software path ships,
/// so hardware requests fall back to it.
pub fn create_renderer(mode: RasterizerMode, width: usize, height: usize) -> Box<dyn SceneRenderer> {
    if mode == RasterizerMode::Hardware {
        warn!("Hardware rasterizer is not available in this build; using software.");
    }
    Box::new(Renderer::new(width, height))
}

/// Runs the application in CLI mode (headless): a fixed number of frames at a
/// fixed timestep, then the last frame is written to disk.
pub fn run_cli(config: &Config) -> Result<(), LoadError> {
    let (width, height) = (config.render.width, config.render.height);
    info!("Starting CLI mode ({}x{}, {} frames)...", width, height, config.render.frames);

    let mut context = init_scene_resources(config);
    let mut renderer = create_renderer(context.settings.rasterizer_mode, width, height);
    let mut timer = FrameTimer::fixed(config.render.fixed_timestep);
    let input = CameraInput::default();
    let start_time = Instant::now();

    for _ in 0..config.render.frames.max(1) {
        timer.tick();
        context.update(&timer, &input);
        renderer.render(&context);
        debug!("Frame {} rendered (t = {:.3}s)", timer.frame_count, timer.total());
    }

    info!("Render completed in {:.2?}", start_time.elapsed());

    let mut buffer = vec![0u32; width * height];
    renderer.present(&mut buffer);
    save_buffer_to_image(&buffer, width, height, &config.render.output)?;
    info!("Done.");
    Ok(())
}

/// Runs the application in GUI mode with real-time rendering and interactivity.
#[cfg(feature = "gui")]
pub fn run_gui(config: &Config) -> Result<(), minifb::Error> {
    use crate::ui::input::InputMapper;
    use minifb::{Key, Window, WindowOptions};

    let (width, height) = (config.render.width, config.render.height);
    info!("Starting GUI mode ({}x{})...", width, height);
    info!(
        "Controls: WASD=Move, LeftShift=Boost, LeftDrag=Move/Turn, RightDrag=Look, BothButtons=Pan, F1-F10=Toggles"
    );

    let mut window = Window::new(
        "Dual Rasterizer",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    let mut context = init_scene_resources(config);
    let mut renderer = create_renderer(context.settings.rasterizer_mode, width, height);
    let mut input_mapper = InputMapper::new();
    let mut timer = FrameTimer::real_time();
    let mut buffer = vec![0u32; width * height];

    let mut frame_count = 0u32;
    let mut last_fps_update = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        timer.tick();

        // --- Input ---
        input_mapper.apply_toggles(&window, &mut context.settings);
        let input = input_mapper.camera_input(&window);
        context.update(&timer, &input);

        // --- Render ---
        renderer.render(&context);
        renderer.present(&mut buffer);
        window.update_with_buffer(&buffer, width, height)?;

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            info!(
                "Average FPS: {:.1}",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32()
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }
    Ok(())
}
