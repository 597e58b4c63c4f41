pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::{wire_media_events, wire_progress_bar, wire_track_menu, wire_transport_buttons};
