// DOM element ids and classes the front-end expects in index.html.

pub const AUDIO_ID: &str = "audio";
pub const CANVAS_ID: &str = "vinyl-canvas";
pub const PLAY_BUTTON_ID: &str = "play";
pub const PREV_BUTTON_ID: &str = "prev";
pub const NEXT_BUTTON_ID: &str = "next";

pub const TRACK_NUMBER_ID: &str = "track-number";
pub const TRACK_TITLE_ID: &str = "track-title";
pub const TRACK_ARTIST_ID: &str = "track-artist";
pub const PRODUCER_ID: &str = "producer";
pub const ALBUM_ID: &str = "album";
pub const YEAR_ID: &str = "year";
pub const TRACK_INFO_ID: &str = "track-info";

pub const TIME_CURRENT_ID: &str = "time-current";
pub const TIME_TOTAL_ID: &str = "time-total";
pub const PROGRESS_BAR_ID: &str = "progress-bar";
pub const PROGRESS_FILL_ID: &str = "progress-fill";
pub const SCRUBBER_ID: &str = "scrubber";
pub const WAVEFORM_CANVAS_ID: &str = "waveform";

pub const BAR_SELECTOR: &str = "#visualizer .bar";

pub const TRACK_MENU_ID: &str = "track-menu";
pub const TRACK_ITEM_SELECTOR: &str = "#track-menu .track-item";

pub const PLAYING_CLASS: &str = "playing";
pub const OPEN_CLASS: &str = "open";
pub const TITLE_EXIT_CLASS: &str = "title-exit";
pub const TITLE_ENTER_CLASS: &str = "title-enter";

// Waveform drawing
pub const WAVEFORM_PLAYED_ALPHA: f64 = 0.95;
pub const WAVEFORM_PENDING_ALPHA: f64 = 0.3;
