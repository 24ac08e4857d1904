//=========================================================================
// Gift Selection
//=========================================================================
//
// At most one open gift, plus the nested envelope state of sealed content.
//
// Two catalogs share the same selection machine:
//   keepsakes: gift 1 is a sealed letter, gifts 2/3 are image payloads
//   plain:     three unsealed payloads, no nested state
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::media::MediaId;

//=== GiftId ==============================================================

/// One of the three fixed gift boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GiftId {
    One,
    Two,
    Three,
}

impl GiftId {
    pub const ALL: [GiftId; 3] = [GiftId::One, GiftId::Two, GiftId::Three];

    /// Maps the 1-based box label to an id.
    pub const fn from_number(number: u8) -> Option<GiftId> {
        match number {
            1 => Some(GiftId::One),
            2 => Some(GiftId::Two),
            3 => Some(GiftId::Three),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gift {}", self.number())
    }
}

//=== GiftContent =========================================================

/// External payload shown when a gift is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftContent {
    /// Media the presentation layer shows for this gift.
    pub media: Vec<MediaId>,

    /// Sealed content sits in an envelope that must be opened first.
    pub sealed: bool,
}

impl GiftContent {
    pub fn open<I, M>(media: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MediaId>,
    {
        Self {
            media: media.into_iter().map(Into::into).collect(),
            sealed: false,
        }
    }

    pub fn sealed<I, M>(media: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MediaId>,
    {
        Self {
            sealed: true,
            ..Self::open(media)
        }
    }
}

//=== GiftCatalog =========================================================

/// Which built-in catalog the decoration page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    #[default]
    Keepsakes,
    Plain,
}

/// Content for each of the three gifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftCatalog {
    contents: [GiftContent; 3],
}

impl GiftCatalog {
    pub fn new(contents: [GiftContent; 3]) -> Self {
        Self { contents }
    }

    /// Letter in an envelope, a portrait, and a set of memory cards.
    pub fn keepsakes() -> Self {
        Self::new([
            GiftContent::sealed(["letter"]),
            GiftContent::open(["portrait"]),
            GiftContent::open(["card_1", "card_2", "card_3", "card_4"]),
        ])
    }

    pub fn plain() -> Self {
        Self::new([
            GiftContent::open(["gift_content_1"]),
            GiftContent::open(["gift_content_2"]),
            GiftContent::open(["gift_content_3"]),
        ])
    }

    pub fn from_kind(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Keepsakes => Self::keepsakes(),
            CatalogKind::Plain => Self::plain(),
        }
    }

    pub fn content(&self, id: GiftId) -> &GiftContent {
        &self.contents[id.index()]
    }
}

impl Default for GiftCatalog {
    fn default() -> Self {
        Self::keepsakes()
    }
}

//=== GiftSelection =======================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GiftSelection {
    catalog: GiftCatalog,
    active: Option<GiftId>,
    envelope_open: bool,
}

impl GiftSelection {
    pub fn new(catalog: GiftCatalog) -> Self {
        Self {
            catalog,
            active: None,
            envelope_open: false,
        }
    }

    /// Makes `id` the active gift with its envelope closed.
    ///
    /// Selecting while another gift is open replaces it; the previous
    /// gift's nested state is discarded.
    pub fn select(&mut self, id: GiftId) -> &GiftContent {
        self.active = Some(id);
        self.envelope_open = false;
        self.catalog.content(id)
    }

    /// Clears the active gift. Returns the gift that was open.
    pub fn close(&mut self) -> Option<GiftId> {
        self.envelope_open = false;
        self.active.take()
    }

    /// Opens the active gift's envelope.
    ///
    /// Returns the gift whose envelope opened, or `None` when nothing is
    /// active, the content is not sealed, or it is already open.
    pub fn open_envelope(&mut self) -> Option<GiftId> {
        let id = self.active?;
        if !self.catalog.content(id).sealed || self.envelope_open {
            return None;
        }

        self.envelope_open = true;
        Some(id)
    }

    pub fn active(&self) -> Option<GiftId> {
        self.active
    }

    pub fn active_content(&self) -> Option<&GiftContent> {
        self.active.map(|id| self.catalog.content(id))
    }

    pub fn envelope_open(&self) -> bool {
        self.envelope_open
    }

    pub fn catalog(&self) -> &GiftCatalog {
        &self.catalog
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gift_numbers_round_trip_labels() {
        for id in GiftId::ALL {
            assert_eq!(GiftId::from_number(id.number()), Some(id));
        }
        assert_eq!(GiftId::from_number(0), None);
        assert_eq!(GiftId::from_number(4), None);
    }

    #[test]
    fn select_then_close() {
        let mut gifts = GiftSelection::default();

        gifts.select(GiftId::Two);
        assert_eq!(gifts.active(), Some(GiftId::Two));

        assert_eq!(gifts.close(), Some(GiftId::Two));
        assert_eq!(gifts.active(), None);
        assert_eq!(gifts.close(), None);
    }

    #[test]
    fn reselecting_resets_envelope() {
        let mut gifts = GiftSelection::new(GiftCatalog::keepsakes());
        gifts.select(GiftId::One);
        assert_eq!(gifts.open_envelope(), Some(GiftId::One));
        assert!(gifts.envelope_open());

        gifts.select(GiftId::Two);

        assert_eq!(gifts.active(), Some(GiftId::Two));
        assert!(!gifts.envelope_open());
    }

    #[test]
    fn reopening_same_gift_starts_sealed() {
        let mut gifts = GiftSelection::new(GiftCatalog::keepsakes());
        gifts.select(GiftId::One);
        gifts.open_envelope();
        gifts.close();

        gifts.select(GiftId::One);

        assert!(!gifts.envelope_open());
    }

    #[test]
    fn only_sealed_content_has_an_envelope() {
        let mut gifts = GiftSelection::new(GiftCatalog::keepsakes());
        assert_eq!(gifts.open_envelope(), None);

        gifts.select(GiftId::Three);
        assert_eq!(gifts.open_envelope(), None);

        let mut plain = GiftSelection::new(GiftCatalog::plain());
        plain.select(GiftId::One);
        assert_eq!(plain.open_envelope(), None);
    }

    #[test]
    fn envelope_opens_once() {
        let mut gifts = GiftSelection::new(GiftCatalog::keepsakes());
        gifts.select(GiftId::One);

        assert_eq!(gifts.open_envelope(), Some(GiftId::One));
        assert_eq!(gifts.open_envelope(), None);
    }

    #[test]
    fn keepsake_cards_are_ordered() {
        let catalog = GiftCatalog::from_kind(CatalogKind::Keepsakes);
        let cards: Vec<&str> = catalog
            .content(GiftId::Three)
            .media
            .iter()
            .map(MediaId::as_str)
            .collect();
        assert_eq!(cards, ["card_1", "card_2", "card_3", "card_4"]);
    }
}
