// Pure input mapping shared by the keyboard and pointer handlers.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    TogglePlay,
    Next,
    Prev,
    CloseSelection,
}

/// Map a `KeyboardEvent.code` to a player action.
#[inline]
pub fn action_for_code(code: &str) -> Option<PlayerAction> {
    match code {
        "Space" => Some(PlayerAction::TogglePlay),
        "ArrowRight" => Some(PlayerAction::Next),
        "ArrowLeft" => Some(PlayerAction::Prev),
        "Escape" => Some(PlayerAction::CloseSelection),
        _ => None,
    }
}

/// Whether the browser default for this key should be suppressed.
#[inline]
pub fn prevents_default(action: PlayerAction) -> bool {
    matches!(action, PlayerAction::TogglePlay)
}

/// Horizontal pointer position over a bar as a \[0, 1\] fraction.
#[inline]
pub fn pointer_fraction(client_x: f64, left: f64, width: f64) -> f32 {
    if !(width > 0.0) || !client_x.is_finite() {
        return 0.0;
    }
    ((client_x - left) / width).clamp(0.0, 1.0) as f32
}

/// Parse a `data-index` attribute from a track list item.
#[inline]
pub fn parse_track_index(attr: Option<&str>) -> Option<usize> {
    attr.and_then(|s| s.trim().parse().ok())
}
