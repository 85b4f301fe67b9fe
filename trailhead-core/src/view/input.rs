//! Keyboard shortcuts for the playback surface.
//!
//! Only meaningful while a session is open; the presentation layer decides
//! when to feed key chords through here.

/// Keys the playback surface reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// A key press together with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    pub fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }
}

/// What the session should do in response to a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIntent {
    Close,
    Advance,
    Retreat,
}

/// Maps a key chord to a session intent.
///
/// Escape closes, Ctrl+ArrowRight completes-and-advances, Ctrl+ArrowLeft
/// goes back. Everything else is ignored.
pub fn intent_for(chord: KeyChord) -> Option<SessionIntent> {
    match (chord.key, chord.ctrl) {
        (Key::Escape, _) => Some(SessionIntent::Close),
        (Key::ArrowRight, true) => Some(SessionIntent::Advance),
        (Key::ArrowLeft, true) => Some(SessionIntent::Retreat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_closes_with_or_without_ctrl() {
        assert_eq!(
            intent_for(KeyChord::plain(Key::Escape)),
            Some(SessionIntent::Close)
        );
        assert_eq!(
            intent_for(KeyChord::ctrl(Key::Escape)),
            Some(SessionIntent::Close)
        );
    }

    #[test]
    fn test_arrows_navigate_only_with_ctrl() {
        assert_eq!(
            intent_for(KeyChord::ctrl(Key::ArrowRight)),
            Some(SessionIntent::Advance)
        );
        assert_eq!(
            intent_for(KeyChord::ctrl(Key::ArrowLeft)),
            Some(SessionIntent::Retreat)
        );
        assert_eq!(intent_for(KeyChord::plain(Key::ArrowRight)), None);
        assert_eq!(intent_for(KeyChord::plain(Key::ArrowLeft)), None);
    }
}
