//! Playback Coordination
//!
//! Routes lifecycle signals into the per-player state machines and enforces
//! the page-wide rules: at most one player playing at a time, and container
//! decoration always reflecting the latest state. All document mutation
//! goes through [`crate::render`].

use vitrine_dom::{ElementId, PageDocument};
use vitrine_media::{MediaSignal, PlaybackState, Transition};

use crate::registry::{MediaRegistry, PlayerId};
use crate::render;

/// Aggregate playback counts, mostly for logging and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackStats {
    pub players: usize,
    pub playing: usize,
    pub loading: usize,
    pub errored: usize,
}

/// Applies signals and page rules over a [`MediaRegistry`].
#[derive(Debug, Default)]
pub struct PlaybackCoordinator;

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Feeds one signal to the player registered for `target`.
    ///
    /// Returns the transition the player took, if any. Signals for elements
    /// that are not registered players are dropped. A transition into
    /// playing pauses every other playing player before decoration is
    /// refreshed.
    pub fn apply(
        &self,
        registry: &mut MediaRegistry,
        document: &mut PageDocument,
        target: ElementId,
        signal: &MediaSignal,
    ) -> Option<Transition> {
        let Some(player_id) = registry.player_for(target) else {
            tracing::trace!(?target, "signal for untracked element dropped");
            return None;
        };
        let player = registry.get_mut(player_id)?;
        let transition = player.media.apply(signal);
        if let Some(t) = transition {
            tracing::trace!(?target, from = ?t.from, to = ?t.to, "playback transition");
        }

        if transition.is_some_and(|t| t.to == PlaybackState::Playing) {
            self.pause_others(registry, document, player_id);
        }

        match signal {
            MediaSignal::TimeUpdate { .. } => {
                self.render_progress(registry, document, player_id);
            }
            MediaSignal::Ended if transition.is_some() => {
                // The machine reset its progress; show the empty indicator.
                if let Some(container) = registry.get(player_id).and_then(|p| p.container) {
                    render::set_progress(document, container, 0.0);
                }
            }
            MediaSignal::Error { message } if transition.is_some() => {
                if let Some(player) = registry.get(player_id) {
                    tracing::warn!(src = %player.media.src, message = %message, "media failed to load");
                }
            }
            _ => {}
        }

        if transition.is_some() {
            self.refresh_visual(registry, document, player_id);
        }
        transition
    }

    /// Assigns a freshly resolved resource locator and starts its load.
    ///
    /// The document element's `src` attribute takes the resolved value too,
    /// so the page and the playback model stay in step.
    pub fn begin_load(
        &self,
        registry: &mut MediaRegistry,
        document: &mut PageDocument,
        player_id: PlayerId,
        src: &str,
    ) -> Option<Transition> {
        let player = registry.get_mut(player_id)?;
        let transition = player.media.begin_load(src);
        let element = player.element;
        document.set_attr(element, "src", src);
        tracing::debug!(src, "deferred source assigned");
        self.refresh_visual(registry, document, player_id);
        Some(transition)
    }

    /// Pauses every playing player, returning how many were playing.
    pub fn pause_all(&self, registry: &mut MediaRegistry, document: &mut PageDocument) -> usize {
        let ids: Vec<PlayerId> = registry.ids().collect();
        let mut paused = 0;
        for id in ids {
            if self.force_pause(registry, document, id) {
                paused += 1;
            }
        }
        if paused > 0 {
            tracing::debug!(paused, "paused all playback");
        }
        paused
    }

    /// Current counts across the registry.
    pub fn stats(&self, registry: &MediaRegistry) -> PlaybackStats {
        let mut stats = PlaybackStats {
            players: registry.len(),
            ..PlaybackStats::default()
        };
        for (_, player) in registry.iter() {
            match player.media.state() {
                PlaybackState::Playing => stats.playing += 1,
                PlaybackState::Loading => stats.loading += 1,
                PlaybackState::Errored => stats.errored += 1,
                _ => {}
            }
        }
        stats
    }

    fn pause_others(
        &self,
        registry: &mut MediaRegistry,
        document: &mut PageDocument,
        except: PlayerId,
    ) {
        let others: Vec<PlayerId> = registry.ids().filter(|&id| id != except).collect();
        for id in others {
            self.force_pause(registry, document, id);
        }
    }

    fn force_pause(
        &self,
        registry: &mut MediaRegistry,
        document: &mut PageDocument,
        id: PlayerId,
    ) -> bool {
        let Some(player) = registry.get_mut(id) else {
            return false;
        };
        if player.media.force_pause().is_none() {
            return false;
        }
        self.refresh_visual(registry, document, id);
        true
    }

    fn render_progress(
        &self,
        registry: &MediaRegistry,
        document: &mut PageDocument,
        id: PlayerId,
    ) {
        let Some(player) = registry.get(id) else {
            return;
        };
        if !player.media.is_playing() || !player.media.duration_known() {
            return;
        }
        if let Some(container) = player.container {
            render::set_progress(document, container, player.media.progress);
        }
    }

    fn refresh_visual(&self, registry: &MediaRegistry, document: &mut PageDocument, id: PlayerId) {
        let Some(player) = registry.get(id) else {
            return;
        };
        if let Some(container) = player.container {
            render::apply_visual(document, container, player.media.visual());
        }
    }
}
