//! Media Registry
//!
//! Collected once at controller startup, the registry is the single source
//! of truth for which elements are players, which showcase container each
//! one decorates, and the playback model for each. Ids handed out here stay
//! valid for the life of the page.

use std::collections::HashMap;

use vitrine_dom::{ElementId, PageDocument};
use vitrine_media::MediaElement;

/// Class that marks an element as a showcase player regardless of tag.
pub const PLAYER_CLASS: &str = "audio-player";
/// Containers that receive loading and error decoration.
pub const CONTAINER_CLASSES: [&str; 2] = ["audio-item", "comparison-item"];
/// Attribute holding a deferred resource locator.
pub const DEFERRED_ATTR: &str = "data-src";

/// Handle to one player in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(u32);

impl PlayerId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One tracked player.
#[derive(Debug)]
pub struct Player {
    /// The media element itself.
    pub element: ElementId,
    /// Nearest showcase container, when the markup provides one.
    pub container: Option<ElementId>,
    /// Playback lifecycle model.
    pub media: MediaElement,
}

/// All players found on the page.
#[derive(Debug, Default)]
pub struct MediaRegistry {
    players: Vec<Player>,
    by_element: HashMap<ElementId, PlayerId>,
}

impl MediaRegistry {
    /// Scans the document for players: `audio` and `video` tags plus any
    /// element carrying [`PLAYER_CLASS`].
    pub fn collect(document: &PageDocument) -> Self {
        let mut registry = Self::default();
        for id in document.ids() {
            let Some(element) = document.element(id) else {
                continue;
            };
            let is_player = element.tag == "audio"
                || element.tag == "video"
                || element.classes.contains(PLAYER_CLASS);
            if !is_player {
                continue;
            }

            let mut media = MediaElement::from_src(element.attr("src").unwrap_or(""));
            media.deferred_src = element.attr(DEFERRED_ATTR).map(str::to_string);

            let player_id = PlayerId(registry.players.len() as u32);
            registry.players.push(Player {
                element: id,
                container: document.closest_with_any_class(id, &CONTAINER_CLASSES),
                media,
            });
            registry.by_element.insert(id, player_id);
        }
        tracing::debug!(
            players = registry.players.len(),
            deferred = registry.deferred().len(),
            "media registry collected"
        );
        registry
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len() as u32).map(PlayerId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| (PlayerId(i as u32), p))
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// Player registered for a document element, if any.
    pub fn player_for(&self, element: ElementId) -> Option<PlayerId> {
        self.by_element.get(&element).copied()
    }

    /// Players still waiting on a deferred resource locator.
    pub fn deferred(&self) -> Vec<PlayerId> {
        self.iter()
            .filter(|(_, p)| p.media.deferred_src.is_some())
            .map(|(id, _)| id)
            .collect()
    }
}
