use crate::audio::{AudioGraph, HtmlMedia};
use crate::input::PlayerAction;
use crate::{dom, ui};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use turntable_core::PlayerController;

pub type Controller = PlayerController<HtmlMedia>;

/// Monotonic page clock in milliseconds, shared by input handlers and the
/// frame loop so transition timing sees one timeline.
#[derive(Clone, Copy)]
pub struct Clock {
    epoch: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// Cloneable handle captured by every DOM callback.
#[derive(Clone)]
pub struct Player {
    pub controller: Rc<RefCell<Controller>>,
    pub graph: Rc<RefCell<Option<AudioGraph>>>,
    pub clock: Clock,
}

impl Player {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller: Rc::new(RefCell::new(controller)),
            graph: Rc::new(RefCell::new(None)),
            clock: Clock::new(),
        }
    }

    /// Build the WebAudio graph on the first gesture and hand the analyser to
    /// the controller. Later calls only resume a suspended context.
    fn ensure_audio(&self) {
        let mut graph = self.graph.borrow_mut();
        if graph.is_none() {
            let media = self.controller.borrow().media().element().clone();
            match AudioGraph::build(&media) {
                Ok(g) => {
                    self.controller
                        .borrow_mut()
                        .analysis_mut()
                        .attach(Box::new(g.frequency_source()));
                    *graph = Some(g);
                }
                Err(e) => {
                    // Playback still works without the analyser; visuals stay at rest
                    log::error!("audio graph init failed: {:?}", e);
                    return;
                }
            }
        }
        if let Some(g) = graph.as_ref() {
            g.resume();
        }
    }

    pub fn dispatch(&self, action: PlayerAction) {
        let now = self.clock.now_ms();
        match action {
            PlayerAction::TogglePlay => {
                self.ensure_audio();
                self.controller.borrow_mut().toggle_play(now);
            }
            PlayerAction::Next => {
                self.controller.borrow_mut().next_track(now);
            }
            PlayerAction::Prev => {
                self.controller.borrow_mut().prev_track(now);
            }
            PlayerAction::CloseSelection => {
                if let Some(document) = dom::window_document() {
                    ui::set_selection_open(&document, false);
                }
            }
        }
    }

    pub fn select(&self, index: usize) {
        let now = self.clock.now_ms();
        self.controller.borrow_mut().select_track(index, now);
    }
}
