//=========================================================================
// Input Buffer
//=========================================================================
//
// Holds the keys pressed between two frame boundaries.
//
// Press order is preserved and nothing is deduplicated: two quick taps of
// the next-track key are two gestures. Auto-repeat never gets this far.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    keys: Vec<KeyCode>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const KEYS_BASE: usize = 16;

        Self {
            keys: Vec::with_capacity(KEYS_BASE),
        }
    }

    //--- Buffering --------------------------------------------------------

    pub(crate) fn push(&mut self, key: KeyCode) {
        self.keys.push(key);
    }

    /// Takes this frame's keys, or `None` if there were none.
    pub(crate) fn drain(&mut self) -> Option<Vec<KeyCode>> {
        if self.keys.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.keys))
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
