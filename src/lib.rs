#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use turntable_core::{Catalog, PlayerController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod bridge;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod player;
mod ui;

pub use bridge::{shader_uniforms, turntable_pose};

static CATALOG_JSON: &str = include_str!("../assets/tracks.json");

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("turntable-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let audio_el: web::HtmlAudioElement = document
        .get_element_by_id(constants::AUDIO_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::AUDIO_ID))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    if let Some(canvas) = document
        .get_element_by_id(constants::WAVEFORM_CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
    {
        wire_canvas_resize(&canvas);
    }

    let (catalog, config) = Catalog::from_json(CATALOG_JSON)?;
    log::info!("[catalog] tracks={}", catalog.len());

    let controller = PlayerController::new(catalog, config, audio::HtmlMedia::new(audio_el));
    let player = player::Player::new(controller);

    events::wire_transport_buttons(&document, &player);
    events::wire_progress_bar(&document, &player);
    events::wire_track_menu(&document, &player);
    events::wire_media_events(&document, &player);
    events::wire_global_keydown(player.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(player, document)));
    frame::start_loop(frame_ctx);
    Ok(())
}
