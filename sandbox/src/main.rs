// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Moves a square with the arrow keys, spins a circle and prints the frame rate.
//!
//! Usage: `sandbox [config.json] [font.ttf] [sound.ogg]`. Space plays the sound.

use anvil_sdk::prelude::*;
use anvil_sdk::{fatal, logging};
use anyhow::{Context, Result};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

const SPEED: f32 = 240.0;

fn main() {
    logging::init();
    if let Err(e) = run() {
        fatal::exit_with(&e);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => EngineConfig::from_file(&path).with_context(|| format!("reading {path}"))?,
        None => EngineConfig::default(),
    };
    let font_path = args.next().map(PathBuf::from);
    let sound_path = args.next().map(PathBuf::from);

    let mut game = Game::create(config.window.clone())?;
    let mut renderer = game.create_renderer(&config.renderer)?;
    let store = create_asset_store(&config.assets);

    let font = match font_path {
        Some(path) => {
            let font = load_font(&path, 24)?;
            Some(store.add_font(font))
        }
        None => None,
    };
    let sound = match sound_path {
        Some(path) => {
            attach_default_audio(&store)?;
            Some(store.add_audio(load_audio(&path)?))
        }
        None => None,
    };

    let play_requested = Rc::new(Cell::new(false));
    let wireframe = Rc::new(Cell::new(false));
    {
        let play_requested = play_requested.clone();
        let wireframe = wireframe.clone();
        game.events_mut().on_key(move |e| {
            if e.action != Action::Press {
                return;
            }
            match e.key {
                Key::Space => play_requested.set(true),
                Key::F1 => wireframe.set(!wireframe.get()),
                _ => {}
            }
        });
        game.events_mut()
            .on_close(|| log::info!("Window closed, shutting down."));
    }

    let mut position = Vec2f::new(100.0, 100.0);
    let mut angle = 0.0f32;
    while game.is_running() {
        game.poll_events();
        if game.is_down(Key::Escape) {
            game.close();
        }

        let dt = renderer.delta_time() as f32;
        if game.is_down(Key::Left) {
            position.x -= SPEED * dt;
        }
        if game.is_down(Key::Right) {
            position.x += SPEED * dt;
        }
        if game.is_down(Key::Up) {
            position.y -= SPEED * dt;
        }
        if game.is_down(Key::Down) {
            position.y += SPEED * dt;
        }
        angle = (angle + 90.0 * dt) % 360.0;

        if play_requested.replace(false) {
            if let Some(id) = sound {
                if let Some(clip) = store.get_audio(id)? {
                    clip.play()?;
                }
            }
        }

        renderer.begin_frame();
        renderer.wireframe(wireframe.get());
        renderer.clear(Rgba::rgb(20, 20, 30));
        renderer.draw_rect(position, Vec2f::new(64.0, 64.0), Rgba::RED, angle);
        renderer.draw_circle(Vec2f::new(400.0, 300.0), 80.0, Rgba::BLUE, 48);
        if let Some(id) = font {
            if let Some(font) = store.get_font(id)? {
                let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
                let label = format!("{fps:.0} fps, frame {}", renderer.frame_counter());
                renderer.draw_text(&label, &font, Vec2f::new(10.0, 30.0), Rgba::WHITE, 0.0)?;
            }
        }
        renderer.end_frame()?;
    }

    log::info!(
        "Rendered {} frame(s), {} primitive(s).",
        renderer.frame_counter(),
        renderer.primitive_count()
    );
    store.shutdown();
    Ok(())
}
