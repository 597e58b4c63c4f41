use crate::constants::*;
use crate::dom;
use crate::input::{parse_track_index, pointer_fraction, PlayerAction};
use crate::player::Player;
use crate::ui;
use turntable_core::{format_time, time_labels};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn bar_fraction(bar: &web::Element, ev: &web::PointerEvent) -> f32 {
    let rect = bar.get_bounding_client_rect();
    pointer_fraction(ev.client_x() as f64, rect.left(), rect.width())
}

pub fn wire_transport_buttons(document: &web::Document, player: &Player) {
    for (id, action) in [
        (PLAY_BUTTON_ID, PlayerAction::TogglePlay),
        (CANVAS_ID, PlayerAction::TogglePlay),
        (PREV_BUTTON_ID, PlayerAction::Prev),
        (NEXT_BUTTON_ID, PlayerAction::Next),
    ] {
        let p = player.clone();
        dom::add_click_listener(document, id, move || p.dispatch(action));
    }
}

/// Scrubbing: pointerdown starts a drag that owns the progress display
/// until pointerup seeks.
pub fn wire_progress_bar(document: &web::Document, player: &Player) {
    let Some(bar) = document.get_element_by_id(PROGRESS_BAR_ID) else {
        log::warn!("missing #{}", PROGRESS_BAR_ID);
        return;
    };

    let p = player.clone();
    let bar_down = bar.clone();
    listen(&bar, "pointerdown", move |ev: web::PointerEvent| {
        _ = bar_down.set_pointer_capture(ev.pointer_id());
        let f = bar_fraction(&bar_down, &ev);
        p.controller.borrow_mut().begin_drag(f);
    });

    let p = player.clone();
    let bar_move = bar.clone();
    listen(&bar, "pointermove", move |ev: web::PointerEvent| {
        let mut c = p.controller.borrow_mut();
        if c.is_dragging() {
            c.update_drag(bar_fraction(&bar_move, &ev));
        }
    });

    let p = player.clone();
    let bar_up = bar.clone();
    listen(&bar, "pointerup", move |ev: web::PointerEvent| {
        _ = bar_up.release_pointer_capture(ev.pointer_id());
        let f = bar_fraction(&bar_up, &ev);
        p.controller.borrow_mut().end_drag(f);
    });
}

pub fn wire_track_menu(document: &web::Document, player: &Player) {
    let doc = document.clone();
    dom::add_click_listener(document, TRACK_INFO_ID, move || {
        ui::toggle_selection(&doc);
    });

    for item in dom::query_all(document, TRACK_ITEM_SELECTOR) {
        let p = player.clone();
        let index = parse_track_index(item.get_attribute("data-index").as_deref());
        listen(&item, "click", move |ev: web::MouseEvent| {
            ev.stop_propagation();
            match index {
                Some(i) => p.select(i),
                None => log::warn!("track item without a valid data-index"),
            }
        });
    }
}

pub fn wire_media_events(document: &web::Document, player: &Player) {
    let media: web::EventTarget = player
        .controller
        .borrow()
        .media()
        .element()
        .clone()
        .into();

    let p = player.clone();
    let doc = document.clone();
    listen(&media, "loadedmetadata", move |_: web::Event| {
        let mut c = p.controller.borrow_mut();
        c.on_metadata_loaded();
        let (_, total) = time_labels(c.media());
        dom::set_text(&doc, TIME_TOTAL_ID, &total);
    });

    let p = player.clone();
    let doc = document.clone();
    listen(&media, "timeupdate", move |_: web::Event| {
        let c = p.controller.borrow();
        if !c.is_dragging() {
            let secs = c.media().element().current_time();
            dom::set_text(&doc, TIME_CURRENT_ID, &format_time(secs));
        }
    });

    let p = player.clone();
    listen(&media, "ended", move |_: web::Event| {
        let now = p.clock.now_ms();
        p.controller.borrow_mut().on_ended(now);
    });
}
