//=========================================================================
// Media Registry
//=========================================================================
//
// Lookup table from stable media identifiers to opaque media handles.
//
// The registry never opens or inspects media. Delivery is the host's job;
// the registry only answers "which handle does this id name".
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::warn;

//=== Internal Dependencies ===============================================

use super::MediaError;

//=== MediaId =============================================================

/// Stable identifier for a media resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(String);

impl MediaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

//=== MediaKind ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
    Image,
}

impl MediaKind {
    /// Whether a handle of this kind can be bound to an output channel.
    pub const fn is_playable(self) -> bool {
        matches!(self, Self::Audio | Self::Video)
    }
}

//=== MediaRef ============================================================

/// Opaque handle to a media resource.
///
/// `locator` is whatever the host's backend understands (a path, a URL,
/// an asset key). It is never parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaRef {
    pub id: MediaId,
    pub kind: MediaKind,
    pub locator: String,
}

//=== MediaRegistry =======================================================

/// Maps [`MediaId`]s to [`MediaRef`]s.
#[derive(Debug, Default)]
pub struct MediaRegistry {
    handles: HashMap<MediaId, MediaRef>,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handle, replacing any previous handle with the same id.
    pub fn register(&mut self, id: impl Into<MediaId>, kind: MediaKind, locator: impl Into<String>) {
        let id = id.into();
        let handle = MediaRef {
            id: id.clone(),
            kind,
            locator: locator.into(),
        };

        if self.handles.insert(id.clone(), handle).is_some() {
            warn!("Media {} was already registered and has been replaced", id);
        }
    }

    pub fn get(&self, id: &MediaId) -> Option<&MediaRef> {
        self.handles.get(id)
    }

    /// Looks up a handle that can be played on an output channel.
    ///
    /// # Errors
    ///
    /// [`MediaError::Unknown`] when the id is not registered and
    /// [`MediaError::NotPlayable`] for image handles.
    pub fn resolve_playable(&self, id: &MediaId) -> Result<&MediaRef, MediaError> {
        let handle = self
            .handles
            .get(id)
            .ok_or_else(|| MediaError::Unknown(id.clone()))?;

        if handle.kind.is_playable() {
            Ok(handle)
        } else {
            Err(MediaError::NotPlayable(id.clone()))
        }
    }

    pub fn contains(&self, id: &MediaId) -> bool {
        self.handles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
