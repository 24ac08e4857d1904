//=========================================================================
// Gestures & Pages
//=========================================================================
//
// The closed set of user actions the show understands, and the page each
// one belongs to.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::decor::GiftId;

//=== Page ================================================================

/// Top-level page of the show. Bindings resolve per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    /// Scripted scenes through to the embedded player.
    #[default]
    Intro,

    /// Room reveal and gift boxes after the explore hand-off.
    Decoration,
}

//=== Gesture =============================================================

/// A user action, already resolved from whatever input produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    //--- Intro Page -------------------------------------------------------

    Start,
    SkipIntro,
    LetsParty,
    Explore,
    TogglePlay,
    NextTrack,
    PrevTrack,
    Seek(Duration),

    //--- Decoration Page --------------------------------------------------

    Decorate,
    SelectGift(GiftId),
    OpenEnvelope,
    CloseGift,
}

impl Gesture {
    /// The page on which this gesture has any effect.
    pub const fn page(self) -> Page {
        match self {
            Gesture::Start
            | Gesture::SkipIntro
            | Gesture::LetsParty
            | Gesture::Explore
            | Gesture::TogglePlay
            | Gesture::NextTrack
            | Gesture::PrevTrack
            | Gesture::Seek(_) => Page::Intro,

            Gesture::Decorate
            | Gesture::SelectGift(_)
            | Gesture::OpenEnvelope
            | Gesture::CloseGift => Page::Decoration,
        }
    }
}
