use crate::input::{action_for_code, prevents_default};
use crate::player::Player;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, player: &Player) {
    if ev.repeat() {
        return;
    }
    let Some(action) = action_for_code(&ev.code()) else {
        return;
    };
    if prevents_default(action) {
        ev.prevent_default();
    }
    log::debug!("[keys] {} -> {:?}", ev.code(), action);
    player.dispatch(action);
}

pub fn wire_global_keydown(player: Player) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &player);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
