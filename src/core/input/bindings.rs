//=========================================================================
// Gesture Bindings
//=========================================================================
//
// Maps key presses to gestures based on the active page.
//
// Architecture:
//   (key, page) → HashMap → Gesture
//
// Only bindings of the active page resolve.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{Gesture, KeyCode, Page};
use crate::core::decor::GiftId;

//=== GestureBindings =====================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GestureBindings {
    bindings: HashMap<(KeyCode, Page), Gesture>,
}

impl GestureBindings {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default keyboard layout for both pages.
    pub fn standard() -> Self {
        let mut table = Self::new();

        table.bind(Page::Intro, KeyCode::Enter, Gesture::Start);
        table.bind(Page::Intro, KeyCode::KeyL, Gesture::SkipIntro);
        table.bind(Page::Intro, KeyCode::KeyP, Gesture::LetsParty);
        table.bind(Page::Intro, KeyCode::KeyE, Gesture::Explore);
        table.bind(Page::Intro, KeyCode::Space, Gesture::TogglePlay);
        table.bind(Page::Intro, KeyCode::ArrowRight, Gesture::NextTrack);
        table.bind(Page::Intro, KeyCode::ArrowLeft, Gesture::PrevTrack);
        table.bind(Page::Intro, KeyCode::Digit0, Gesture::Seek(Duration::ZERO));

        table.bind(Page::Decoration, KeyCode::Enter, Gesture::Decorate);
        for gift in GiftId::ALL {
            if let Some(key) = KeyCode::digit(gift.number()) {
                table.bind(Page::Decoration, key, Gesture::SelectGift(gift));
            }
        }
        table.bind(Page::Decoration, KeyCode::KeyO, Gesture::OpenEnvelope);
        table.bind(Page::Decoration, KeyCode::Escape, Gesture::CloseGift);

        table
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` on `page`, replacing any previous binding.
    ///
    /// Returns the gesture that was bound before, if any.
    pub fn bind(&mut self, page: Page, key: KeyCode, gesture: Gesture) -> Option<Gesture> {
        if gesture.page() != page {
            debug!("{:?} bound on {:?} will never take effect there", gesture, page);
        }
        self.bindings.insert((key, page), gesture)
    }

    pub fn unbind(&mut self, page: Page, key: KeyCode) -> Option<Gesture> {
        self.bindings.remove(&(key, page))
    }

    /// Removes every binding of `page`.
    pub fn clear_page(&mut self, page: Page) {
        self.bindings.retain(|&(_, p), _| p != page);
    }

    //--- Resolution -------------------------------------------------------

    pub fn resolve(&self, page: Page, key: KeyCode) -> Option<Gesture> {
        self.bindings.get(&(key, page)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
