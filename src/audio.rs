use turntable_core::{FrequencySource, MediaElement};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const ANALYSER_FFT_SIZE: u32 = 256; // 128 bins
const ANALYSER_SMOOTHING: f64 = 0.8;

fn js_err(label: &str, e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{} error: {:?}", label, e)
}

/// `<audio>` element driven by the player controller.
pub struct HtmlMedia {
    el: web::HtmlAudioElement,
}

impl HtmlMedia {
    pub fn new(el: web::HtmlAudioElement) -> Self {
        Self { el }
    }

    pub fn element(&self) -> &web::HtmlAudioElement {
        &self.el
    }
}

impl MediaElement for HtmlMedia {
    fn play(&mut self) {
        match self.el.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("media play() rejected: {:?}", e);
                }
            }),
            Err(e) => log::warn!("media play() error: {:?}", e),
        }
    }

    fn pause(&mut self) {
        _ = self.el.pause();
    }

    fn is_paused(&self) -> bool {
        self.el.paused()
    }

    fn has_ended(&self) -> bool {
        self.el.ended()
    }

    fn current_time(&self) -> f64 {
        self.el.current_time()
    }

    fn set_current_time(&mut self, secs: f64) {
        self.el.set_current_time(secs);
    }

    fn duration(&self) -> f64 {
        self.el.duration()
    }

    fn playback_rate(&self) -> f64 {
        self.el.playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.el.set_playback_rate(rate);
    }

    fn set_source(&mut self, src: &str) {
        self.el.set_src(src);
    }
}

/// media element -> analyser -> destination
pub struct AudioGraph {
    pub ctx: web::AudioContext,
    pub analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
}

impl AudioGraph {
    /// Must run inside a user gesture so the context is allowed to start.
    pub fn build(media: &web::HtmlMediaElement) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| js_err("AnalyserNode", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        let source = ctx
            .create_media_element_source(media)
            .map_err(|e| js_err("MediaElementAudioSourceNode", e))?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| js_err("connect source", e))?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| js_err("connect analyser", e))?;
        log::info!(
            "[audio] graph ready sample_rate={} bins={}",
            ctx.sample_rate(),
            analyser.frequency_bin_count()
        );
        Ok(Self {
            ctx,
            analyser,
            _source: source,
        })
    }

    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    pub fn frequency_source(&self) -> AnalyserSource {
        AnalyserSource {
            analyser: self.analyser.clone(),
        }
    }
}

pub struct AnalyserSource {
    analyser: web::AnalyserNode,
}

impl FrequencySource for AnalyserSource {
    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn fill(&mut self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }
}
