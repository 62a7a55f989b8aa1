//! Vitrine Page - Showcase Interaction Controller
//!
//! Drives the behavior of the media-showcase page over a
//! [`vitrine_dom::PageDocument`]: exclusive audio playback with loading and
//! error decoration, lazy loading of deferred sources, scroll-triggered
//! section reveals, navigation highlighting with smooth scrolling, and the
//! citation copy affordance with its toast.
//!
//! The page feeds [`PageEvent`]s into a [`PageController`] and calls
//! [`PageController::tick`] on its frame or timer cadence; everything else
//! is wiring between the subsystem modules.

pub mod config;
pub mod controller;
pub mod coordinator;
pub mod events;
pub mod lazy;
pub mod nav;
pub mod notify;
pub mod registry;
pub mod render;
pub mod reveal;
pub mod viewport;

pub use config::{ConfigError, NavOptions, ObserverOptions, PageOptions, ToastOptions};
pub use controller::PageController;
pub use coordinator::{PlaybackCoordinator, PlaybackStats};
pub use events::{Key, PageEvent};
pub use lazy::{LazyLoader, LoadRequest};
pub use nav::NavigationHighlighter;
pub use notify::{ClipboardBackend, Toast, ToastPhase, UiNotifier, UnavailableClipboard};
pub use registry::{MediaRegistry, Player, PlayerId};
pub use reveal::RevealAnimator;
pub use viewport::{IntersectionEntry, ObserverSupport, ViewportObserver};
