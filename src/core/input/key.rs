//=========================================================================
// Key Codes
//=========================================================================
//
// Platform-independent physical key identifiers.
//
// Only keys a gesture can be bound to are listed; everything else the
// platform reports collapses to `Unidentified` and is dropped before it
// reaches the logic thread.
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key (location, not character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Navigation -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    Space,
    Enter,
    Escape,

    /// Any key the input layer does not map.
    Unidentified,
}

impl KeyCode {
    /// Number-row key for `n` (0-9).
    pub const fn digit(n: u8) -> Option<KeyCode> {
        Some(match n {
            0 => KeyCode::Digit0,
            1 => KeyCode::Digit1,
            2 => KeyCode::Digit2,
            3 => KeyCode::Digit3,
            4 => KeyCode::Digit4,
            5 => KeyCode::Digit5,
            6 => KeyCode::Digit6,
            7 => KeyCode::Digit7,
            8 => KeyCode::Digit8,
            9 => KeyCode::Digit9,
            _ => return None,
        })
    }

    pub const fn is_identified(self) -> bool {
        !matches!(self, KeyCode::Unidentified)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_lookup() {
        assert_eq!(KeyCode::digit(0), Some(KeyCode::Digit0));
        assert_eq!(KeyCode::digit(3), Some(KeyCode::Digit3));
        assert_eq!(KeyCode::digit(10), None);
    }

    #[test]
    fn unidentified_is_flagged() {
        assert!(!KeyCode::Unidentified.is_identified());
        assert!(KeyCode::Enter.is_identified());
    }
}
