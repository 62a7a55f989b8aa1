//! Media Elements
//!
//! One [`MediaElement`] models one player: its resource locator, playback
//! clock and lifecycle state. State only ever changes through
//! [`MediaElement::apply`], [`MediaElement::force_pause`] and
//! [`MediaElement::begin_load`], so every change is observable as a
//! [`Transition`] by the caller.

use crate::MediaError;

/// Playback lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// No resource requested yet.
    #[default]
    Idle,
    /// Resource requested, not yet playable.
    Loading,
    /// Enough data buffered to start playback.
    Ready,
    Playing,
    Paused,
    /// Resource failed; terminal until a new load begins.
    Errored,
}

impl PlaybackState {
    /// Container decoration this state calls for.
    pub fn visual(self) -> VisualState {
        match self {
            PlaybackState::Loading => VisualState::Loading,
            PlaybackState::Errored => VisualState::Error,
            _ => VisualState::Clear,
        }
    }
}

/// Decoration derived from playback state. At most one of the loading and
/// error treatments is ever active on a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisualState {
    #[default]
    Clear,
    Loading,
    Error,
}

/// Lifecycle signal delivered by the embedding page.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSignal {
    /// The host started fetching the resource.
    LoadStart,
    /// Enough data arrived to begin playback.
    CanPlay,
    Play,
    Pause,
    /// Periodic clock report. `duration` may be NaN before metadata arrives.
    TimeUpdate { position: f64, duration: f64 },
    /// Playback ran off the end of the resource.
    Ended,
    /// The resource failed to fetch or decode.
    Error { message: String },
}

/// A state change taken by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PlaybackState,
    pub to: PlaybackState,
}

/// Lifecycle model for a single player.
#[derive(Debug, Clone)]
pub struct MediaElement {
    /// Current resource locator, possibly a placeholder awaiting deferred
    /// assignment.
    pub src: String,
    /// Real locator to assign when the player first becomes visible.
    pub deferred_src: Option<String>,
    /// Last reported playback position in seconds.
    pub current_time: f64,
    /// Media duration in seconds, NaN until metadata arrives.
    pub duration: f64,
    /// Progress fraction last computed for the indicator, always in [0, 1].
    pub progress: f64,
    state: PlaybackState,
    error: Option<MediaError>,
}

impl Default for MediaElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement {
    /// Creates an idle element with no resource.
    pub fn new() -> Self {
        Self {
            src: String::new(),
            deferred_src: None,
            current_time: 0.0,
            duration: f64::NAN,
            progress: 0.0,
            state: PlaybackState::Idle,
            error: None,
        }
    }

    /// Creates an idle element pointing at `src`.
    pub fn from_src(src: &str) -> Self {
        Self {
            src: src.to_string(),
            ..Self::new()
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Decoration the container should show for the current state.
    pub fn visual(&self) -> VisualState {
        self.state.visual()
    }

    /// Last stored resource failure, if the element is errored.
    pub fn error(&self) -> Option<&MediaError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// True once a finite, nonzero duration has been reported.
    pub fn duration_known(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }

    /// Feeds one lifecycle signal through the machine.
    ///
    /// Returns the transition taken, or `None` when the signal does not
    /// apply in the current state. Signals that arrive out of order are
    /// dropped rather than guessed at; in particular nothing revives an
    /// errored element except a fresh load.
    pub fn apply(&mut self, signal: &MediaSignal) -> Option<Transition> {
        use PlaybackState::*;

        match signal {
            MediaSignal::LoadStart => match self.state {
                Idle | Errored => {
                    self.error = None;
                    self.transition(Loading)
                }
                _ => None,
            },
            MediaSignal::CanPlay => match self.state {
                Loading => self.transition(Ready),
                _ => None,
            },
            MediaSignal::Play => match self.state {
                Ready | Paused => self.transition(Playing),
                _ => None,
            },
            MediaSignal::Pause => match self.state {
                Playing => self.transition(Paused),
                _ => None,
            },
            MediaSignal::TimeUpdate { position, duration } => {
                if self.state == Playing {
                    self.current_time = *position;
                    self.duration = *duration;
                    if self.duration_known() {
                        self.progress = (self.current_time / self.duration).clamp(0.0, 1.0);
                    }
                }
                None
            }
            MediaSignal::Ended => match self.state {
                Playing => {
                    self.progress = 0.0;
                    self.transition(Paused)
                }
                _ => None,
            },
            MediaSignal::Error { message } => match self.state {
                Loading | Ready | Playing | Paused => {
                    self.error = Some(MediaError::new(message));
                    self.transition(Errored)
                }
                _ => None,
            },
        }
    }

    /// Pauses a playing element, used to enforce exclusive playback.
    ///
    /// Anything not currently playing, errored elements included, is left
    /// untouched.
    pub fn force_pause(&mut self) -> Option<Transition> {
        if self.is_playing() {
            self.transition(PlaybackState::Paused)
        } else {
            None
        }
    }

    /// Starts a fresh load of `src`, consuming any deferred locator and
    /// clearing previous error and clock state.
    pub fn begin_load(&mut self, src: &str) -> Transition {
        self.src = src.to_string();
        self.deferred_src = None;
        self.error = None;
        self.current_time = 0.0;
        self.duration = f64::NAN;
        self.progress = 0.0;
        let from = self.state;
        self.state = PlaybackState::Loading;
        Transition {
            from,
            to: PlaybackState::Loading,
        }
    }

    fn transition(&mut self, to: PlaybackState) -> Option<Transition> {
        let from = std::mem::replace(&mut self.state, to);
        Some(Transition { from, to })
    }
}
