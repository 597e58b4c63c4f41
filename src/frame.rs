use crate::constants::BAR_SELECTOR;
use crate::player::Player;
use crate::{bridge, dom, ui};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub player: Player,
    pub document: web::Document,
    pub bars: Vec<web::HtmlElement>,
}

impl FrameContext {
    pub fn new(player: Player, document: web::Document) -> Self {
        let bars = dom::query_all(&document, BAR_SELECTOR);
        log::info!("[frame] visualizer bars={}", bars.len());
        Self {
            player,
            document,
            bars,
        }
    }

    pub fn frame(&mut self) {
        let now = self.player.clock.now_ms();
        let mut controller = self.player.controller.borrow_mut();
        let params = controller.tick(now);
        let events = controller.drain_events();
        if !events.is_empty() {
            ui::apply_events(&self.document, &controller, &events);
        }
        ui::apply_frame(&self.document, &self.bars, &params, controller.waveform());
        bridge::publish(params.pose, params.uniforms);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
