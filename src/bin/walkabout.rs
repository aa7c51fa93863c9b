use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use macroquad::prelude::{
    clear_background, draw_text, get_fps, get_frame_time, next_frame, screen_height, screen_width,
    Conf, BLACK, RED,
};
use macroquad_tile_sprites::backend::{MacroquadSurface, TextureStore};
use macroquad_tile_sprites::{
    AssetStore, ButtonObject, Camera, EngineConfig, FileSource, ImageObject, InputSource,
    InputState, Map, Rect, Size, Vector,
};

const CONFIG_PATH: &str = "assets/engine.json";

fn window_conf() -> Conf {
    let config = EngineConfig::load_or_default(&FileSource::cwd(), CONFIG_PATH).unwrap_or_default();
    Conf {
        window_title: config.window_title,
        window_width: config.window_width,
        window_height: config.window_height,
        ..Default::default()
    }
}

fn scroll_input(input: &impl InputSource, speed: f32) -> Vector {
    let mut delta = Vector::ZERO;
    for (key, step) in [("left", (-1.0, 0.0)), ("right", (1.0, 0.0)), ("up", (0.0, -1.0)), ("down", (0.0, 1.0))] {
        if input.is_key_down(key) {
            delta += Vector::new(step.0, step.1);
        }
    }
    delta * speed
}

async fn run() -> anyhow::Result<()> {
    let files = FileSource::cwd();
    let config = EngineConfig::load_or_default(&files, CONFIG_PATH)
        .with_context(|| format!("Reading config {}", CONFIG_PATH))?;

    let mut assets = TextureStore::new(".");
    for (name, locator) in &config.images {
        assets
            .register(name, locator)
            .with_context(|| format!("Loading image {}", locator))?;
    }

    let mut map = Map::load_with(&files, &mut assets, &config.map, &config.spawn_defaults())
        .with_context(|| format!("Loading map {}", config.map))?;
    log::info!(
        "{} object layers, {} objects, {} actors",
        map.object_layers().count(),
        map.objects().count(),
        map.actors().count()
    );

    let show_objects = Rc::new(Cell::new(config.debug_objects));
    let mut button = match &config.button {
        Some(b) => {
            assets
                .register(&b.image, &b.image)
                .with_context(|| format!("Loading button image {}", b.image))?;
            let toggle = Rc::clone(&show_objects);
            let image = ImageObject::new(
                b.image.clone(),
                Rect::new(0.0, 0.0, b.width, b.height),
                Rect::new(b.x, b.y, b.width, b.height),
            );
            Some(ButtonObject::new(image, move |name| {
                toggle.set(!toggle.get());
                log::info!("{} clicked, object outlines {}", name, toggle.get());
            }))
        }
        None => None,
    };

    let mut camera = Camera::new(
        Rect::new(0.0, 0.0, screen_width(), screen_height()),
        map.tile_size(),
    );

    loop {
        let dt = Duration::from_secs_f32(get_frame_time());
        let input = InputState::capture();

        map.update(&input, dt);
        if let Some(b) = button.as_mut() {
            b.update(&input);
        }

        camera.resize(Size::new(screen_width(), screen_height()));
        match map.actors().next() {
            Some(hero) => {
                let view = camera.rect();
                let centered = hero.dest().center() - Vector::new(view.w / 2.0, view.h / 2.0);
                camera.set_position(centered);
            }
            None => {
                camera.scroll_by(scroll_input(&input, config.scroll_speed));
            }
        }
        camera.clamp_to(&map.world_rect());

        clear_background(BLACK);
        let mut surface = MacroquadSurface::new(&assets);
        map.draw(&mut surface, &assets, &camera)?;
        if show_objects.get() {
            map.draw_objects_debug(&mut surface, &camera);
        }
        if let Some(b) = &button {
            b.draw(&mut surface, &assets, Vector::ZERO)?;
        }

        draw_text(
            &format!("FPS: {}", get_fps()),
            screen_width() - 135.0,
            30.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}
