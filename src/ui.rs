use crate::constants::*;
use crate::dom;
use crate::player::Controller;
use turntable_core::{
    bar_height_px, time_labels, Direction, FrameParams, MediaElement, TrackDescriptor, UiEvent,
};
use wasm_bindgen::JsCast;
use web_sys as web;

fn direction_class(direction: Direction) -> &'static str {
    match direction {
        Direction::Next => "dir-next",
        Direction::Prev => "dir-prev",
        Direction::Select => "dir-select",
    }
}

pub fn set_selection_open(document: &web::Document, open: bool) {
    if let Some(menu) = document.get_element_by_id(TRACK_MENU_ID) {
        dom::set_class(&menu, OPEN_CLASS, open);
    }
}

pub fn toggle_selection(document: &web::Document) {
    if let Some(menu) = document.get_element_by_id(TRACK_MENU_ID) {
        _ = menu.class_list().toggle(OPEN_CLASS);
    }
}

fn show_track(
    document: &web::Document,
    index: usize,
    track: &TrackDescriptor,
    media: &impl MediaElement,
) {
    dom::set_text(document, TRACK_NUMBER_ID, &track.number);
    if let Some(el) = document.get_element_by_id(TRACK_TITLE_ID) {
        // Titles carry inline emphasis markup
        el.set_inner_html(&track.title);
    }
    dom::set_text(document, TRACK_ARTIST_ID, &track.artist);
    dom::set_text(document, PRODUCER_ID, &track.producer);
    dom::set_text(document, ALBUM_ID, &track.album);
    dom::set_text(document, YEAR_ID, &track.year);
    // Metadata may already be in for a cached source
    let (current, total) = time_labels(media);
    dom::set_text(document, TIME_CURRENT_ID, &current);
    dom::set_text(document, TIME_TOTAL_ID, &total);

    if let Some(body) = document.body() {
        let c = track.accent_color;
        let accent = format!(
            "rgb({}, {}, {})",
            (c.x * 255.0).round(),
            (c.y * 255.0).round(),
            (c.z * 255.0).round()
        );
        dom::set_style(&body, "--accent", &accent);
    }

    for item in dom::query_all(document, TRACK_ITEM_SELECTOR) {
        let wanted = index.to_string();
        let active = item.get_attribute("data-index").as_deref() == Some(wanted.as_str());
        dom::set_class(&item, "active", active);
    }
}

fn set_controls_locked(document: &web::Document, locked: bool) {
    for id in [PREV_BUTTON_ID, NEXT_BUTTON_ID] {
        if let Some(el) = document.get_element_by_id(id) {
            if locked {
                _ = el.set_attribute("disabled", "");
            } else {
                _ = el.remove_attribute("disabled");
            }
        }
    }
}

pub fn apply_events(document: &web::Document, controller: &Controller, events: &[UiEvent]) {
    let title = document.get_element_by_id(TRACK_INFO_ID);
    for ev in events {
        match *ev {
            UiEvent::TrackLoaded(index) => {
                if let Some(track) = controller.catalog().get(index) {
                    show_track(document, index, track, controller.media());
                }
                draw_waveform(document, controller.waveform(), 0.0);
            }
            UiEvent::TitleExit(dir) => {
                if let Some(el) = &title {
                    dom::set_class(el, TITLE_ENTER_CLASS, false);
                    dom::set_class(el, direction_class(dir), true);
                    dom::set_class(el, TITLE_EXIT_CLASS, true);
                }
            }
            UiEvent::TitleEnter(dir) => {
                if let Some(el) = &title {
                    dom::set_class(el, TITLE_EXIT_CLASS, false);
                    dom::set_class(el, direction_class(dir), false);
                    dom::set_class(el, TITLE_ENTER_CLASS, true);
                }
            }
            UiEvent::PlayingChanged(playing) => {
                if let Some(body) = document.body() {
                    dom::set_class(&body, PLAYING_CLASS, playing);
                }
            }
            UiEvent::ControlsLocked(locked) => set_controls_locked(document, locked),
            UiEvent::SelectionClosed => set_selection_open(document, false),
        }
    }
}

/// Per-frame DOM updates: progress, scrubber and visualizer bars.
pub fn apply_frame(
    document: &web::Document,
    bars: &[web::HtmlElement],
    params: &FrameParams,
    waveform: &[f32],
) {
    let pct = format!("{:.2}%", params.progress * 100.0);
    if let Some(fill) = dom::html_element(document, PROGRESS_FILL_ID) {
        dom::set_style(&fill, "width", &pct);
    }
    if let Some(scrubber) = dom::html_element(document, SCRUBBER_ID) {
        dom::set_style(&scrubber, "left", &pct);
    }
    for (el, level) in bars.iter().zip(params.bars.iter()) {
        dom::set_style(el, "height", &format!("{:.1}px", bar_height_px(*level)));
    }
    draw_waveform(document, waveform, params.progress);
}

pub fn draw_waveform(document: &web::Document, peaks: &[f32], progress: f32) {
    let Some(canvas) = document
        .get_element_by_id(WAVEFORM_CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
    else {
        return;
    };
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    ctx.clear_rect(0.0, 0.0, w, h);
    if peaks.is_empty() {
        return;
    }
    let slot = w / peaks.len() as f64;
    let played = (progress as f64 * peaks.len() as f64).floor() as usize;
    ctx.set_fill_style_str("#ffffff");
    for (i, peak) in peaks.iter().enumerate() {
        let alpha = if i < played {
            WAVEFORM_PLAYED_ALPHA
        } else {
            WAVEFORM_PENDING_ALPHA
        };
        ctx.set_global_alpha(alpha);
        let bar_h = *peak as f64 * h;
        ctx.fill_rect(i as f64 * slot, (h - bar_h) / 2.0, (slot * 0.6).max(1.0), bar_h);
    }
    ctx.set_global_alpha(1.0);
}
