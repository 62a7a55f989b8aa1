//! Edge case tests for vitrine-page
//!
//! Minimal and malformed pages, fault isolation between players, injected
//! inconsistencies, lazy-loading corner cases and hostile input.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_dom::{ElementId, PageDocument, Rect};
use vitrine_media::{MediaSignal, PlaybackState};
use vitrine_page::{
    ClipboardBackend, Key, ObserverSupport, PageController, PageEvent, PageOptions,
    PlaybackStats, ToastPhase, UnavailableClipboard,
};

// ============================================================================
// FIXTURES
// ============================================================================

fn set_rect(doc: &mut PageDocument, id: ElementId, x: f64, y: f64, width: f64, height: f64) {
    if let Some(el) = doc.element_mut(id) {
        el.rect = Rect::new(x, y, width, height);
    }
}

fn item_with_player(doc: &mut PageDocument, y: f64, src: &str) -> (ElementId, ElementId) {
    let item = doc.create_element("div");
    doc.set_attr(item, "class", "audio-item");
    set_rect(doc, item, 0.0, y, 800.0, 100.0);
    let player = doc.create_child(item, "audio");
    doc.set_attr(player, "class", "audio-player");
    doc.set_attr(player, "src", src);
    set_rect(doc, player, 20.0, y + 10.0, 760.0, 60.0);
    (item, player)
}

/// Two wrapped players stacked near the top of an 800x600 viewport.
fn two_player_page() -> (PageDocument, [ElementId; 2], [ElementId; 2]) {
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    doc.set_viewport_size(800.0, 600.0);
    let (item_a, player_a) = item_with_player(&mut doc, 100.0, "audio/a.mp3");
    let (item_b, player_b) = item_with_player(&mut doc, 220.0, "audio/b.mp3");
    (doc, [item_a, item_b], [player_a, player_b])
}

/// A deferred player at the given offset, with scroll room below it.
fn deferred_page(data_src: &str, y: f64) -> (PageDocument, ElementId, ElementId) {
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    doc.set_viewport_size(800.0, 600.0);
    let item = doc.create_element("div");
    doc.set_attr(item, "class", "comparison-item");
    set_rect(&mut doc, item, 0.0, y, 800.0, 100.0);
    let player = doc.create_child(item, "audio");
    doc.set_attr(player, "src", "pending");
    doc.set_attr(player, "data-src", data_src);
    set_rect(&mut doc, player, 20.0, y + 10.0, 760.0, 60.0);
    let footer = doc.create_element("footer");
    set_rect(&mut doc, footer, 0.0, 6000.0, 800.0, 100.0);
    (doc, item, player)
}

fn state_of(controller: &PageController, element: ElementId) -> PlaybackState {
    let registry = controller.registry();
    registry
        .get(registry.player_for(element).unwrap())
        .unwrap()
        .media
        .state()
}

fn src_of(controller: &PageController, element: ElementId) -> String {
    let registry = controller.registry();
    registry
        .get(registry.player_for(element).unwrap())
        .unwrap()
        .media
        .src
        .clone()
}

fn indicator_width(controller: &PageController, container: ElementId) -> Option<String> {
    let doc = controller.document();
    doc.children_of(container)
        .into_iter()
        .find(|&child| doc.has_class(child, "progress-indicator"))
        .and_then(|indicator| doc.style(indicator, "width").map(str::to_string))
}

fn make_ready(controller: &mut PageController, player: ElementId) {
    controller.handle(PageEvent::media(player, MediaSignal::LoadStart), 0.0);
    controller.handle(PageEvent::media(player, MediaSignal::CanPlay), 0.0);
}

fn make_playing(controller: &mut PageController, player: ElementId) {
    make_ready(controller, player);
    controller.handle(PageEvent::media(player, MediaSignal::Play), 0.0);
}

/// Drives one registry entry directly, bypassing the coordinator, to
/// fabricate states the event path would never produce.
fn force_playing(controller: &mut PageController, element: ElementId) {
    let id = controller.registry().player_for(element).unwrap();
    let player = controller.registry_mut().get_mut(id).unwrap();
    player.media.apply(&MediaSignal::LoadStart);
    player.media.apply(&MediaSignal::CanPlay);
    player.media.apply(&MediaSignal::Play);
}

#[derive(Clone, Default)]
struct SharedClipboard {
    writes: Rc<RefCell<Vec<String>>>,
}

impl ClipboardBackend for SharedClipboard {
    fn is_available(&self) -> bool {
        true
    }

    fn write_text(&mut self, text: &str) -> bool {
        self.writes.borrow_mut().push(text.to_string());
        true
    }
}

// ============================================================================
// MINIMAL PAGES
// ============================================================================

#[test]
fn test_page_without_nav_still_coordinates_playback() {
    let (doc, _items, players) = two_player_page();
    let mut controller = PageController::new(doc, PageOptions::default());

    // No nav bar: scrolls and stray clicks fall through harmlessly.
    controller.handle(PageEvent::scroll(50.0), 0.0);
    controller.handle(PageEvent::click(players[0]), 1.0);
    controller.tick(2.0);

    make_playing(&mut controller, players[0]);
    make_playing(&mut controller, players[1]);
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Paused);
    assert_eq!(state_of(&controller, players[1]), PlaybackState::Playing);

    controller.handle(PageEvent::key_down(Key::Escape), 3.0);
    assert_eq!(controller.stats().playing, 0);
}

#[test]
fn test_page_with_nav_only() {
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    doc.set_viewport_size(800.0, 600.0);
    let nav = doc.create_element("nav");
    doc.set_attr(nav, "class", "navigation");
    set_rect(&mut doc, nav, 0.0, 0.0, 800.0, 60.0);

    let mut controller = PageController::new(doc, PageOptions::default());
    controller.handle(PageEvent::scroll(10.0), 0.0);
    controller.handle(PageEvent::key_down(Key::Escape), 1.0);
    controller.tick(2.0);

    assert_eq!(controller.stats(), PlaybackStats::default());
    assert_eq!(controller.pending_lazy_loads(), 0);
}

#[test]
fn test_player_without_container_skips_decoration() {
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    doc.set_viewport_size(800.0, 600.0);
    let player = doc.create_element("audio");
    doc.set_attr(player, "src", "audio/solo.mp3");
    set_rect(&mut doc, player, 0.0, 100.0, 800.0, 60.0);

    let mut controller = PageController::new(doc, PageOptions::default());
    assert_eq!(controller.registry().len(), 1);

    // The lifecycle still runs, it just has nowhere to draw.
    controller.handle(PageEvent::media(player, MediaSignal::LoadStart), 0.0);
    assert!(controller.document().elements_with_class("loading").is_empty());
    controller.handle(PageEvent::media(player, MediaSignal::CanPlay), 1.0);
    controller.handle(PageEvent::media(player, MediaSignal::Play), 2.0);
    controller.handle(
        PageEvent::media(
            player,
            MediaSignal::TimeUpdate {
                position: 10.0,
                duration: 100.0,
            },
        ),
        3.0,
    );
    assert!(controller.document().children_of(player).is_empty());
    assert_eq!(state_of(&controller, player), PlaybackState::Playing);
}

// ============================================================================
// FAULT ISOLATION
// ============================================================================

#[test]
fn test_errored_player_left_out_of_pause_sweeps() {
    let (doc, items, players) = two_player_page();
    let mut controller = PageController::new(doc, PageOptions::default());

    make_playing(&mut controller, players[0]);
    controller.handle(
        PageEvent::media(
            players[0],
            MediaSignal::Error {
                message: "stream reset".to_string(),
            },
        ),
        1.0,
    );
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Errored);
    assert!(controller.document().has_class(items[0], "error"));

    // Another player starting must not touch the broken one.
    make_playing(&mut controller, players[1]);
    assert_eq!(state_of(&controller, players[1]), PlaybackState::Playing);
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Errored);
    assert!(controller.document().has_class(items[0], "error"));

    // Neither does the global interrupt.
    controller.handle(PageEvent::key_down(Key::Escape), 2.0);
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Errored);
    assert_eq!(state_of(&controller, players[1]), PlaybackState::Paused);
}

#[test]
fn test_error_on_one_player_never_disturbs_another() {
    let (doc, _items, players) = two_player_page();
    let mut controller = PageController::new(doc, PageOptions::default());

    make_playing(&mut controller, players[0]);
    controller.handle(PageEvent::media(players[1], MediaSignal::LoadStart), 1.0);
    controller.handle(
        PageEvent::media(
            players[1],
            MediaSignal::Error {
                message: "dns failure".to_string(),
            },
        ),
        2.0,
    );

    assert_eq!(state_of(&controller, players[0]), PlaybackState::Playing);
    assert_eq!(controller.stats().playing, 1);
    assert_eq!(controller.stats().errored, 1);
}

#[test]
fn test_late_timeupdate_after_error_keeps_error_state() {
    let (doc, items, players) = two_player_page();
    let mut controller = PageController::new(doc, PageOptions::default());

    make_playing(&mut controller, players[0]);
    controller.handle(
        PageEvent::media(
            players[0],
            MediaSignal::TimeUpdate {
                position: 25.0,
                duration: 100.0,
            },
        ),
        1.0,
    );
    assert_eq!(indicator_width(&controller, items[0]).as_deref(), Some("25%"));

    controller.handle(
        PageEvent::media(
            players[0],
            MediaSignal::Error {
                message: "decode failed".to_string(),
            },
        ),
        2.0,
    );

    // A buffered progress report arrives after the failure and is dropped.
    controller.handle(
        PageEvent::media(
            players[0],
            MediaSignal::TimeUpdate {
                position: 50.0,
                duration: 100.0,
            },
        ),
        3.0,
    );
    assert_eq!(indicator_width(&controller, items[0]).as_deref(), Some("25%"));
    assert!(controller.document().has_class(items[0], "error"));
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Errored);
}

#[test]
fn test_stray_signals_change_nothing() {
    let (doc, items, players) = two_player_page();
    let mut controller = PageController::new(doc, PageOptions::default());

    // Signals that make no sense while idle are dropped.
    controller.handle(PageEvent::media(players[0], MediaSignal::Pause), 0.0);
    controller.handle(PageEvent::media(players[0], MediaSignal::Ended), 1.0);
    controller.handle(
        PageEvent::media(
            players[0],
            MediaSignal::TimeUpdate {
                position: 10.0,
                duration: 100.0,
            },
        ),
        2.0,
    );
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Idle);
    assert_eq!(indicator_width(&controller, items[0]), None);

    // Ended without ever playing is equally meaningless.
    make_ready(&mut controller, players[0]);
    controller.handle(PageEvent::media(players[0], MediaSignal::Ended), 3.0);
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Ready);
}

// ============================================================================
// INJECTED FAULTS
// ============================================================================

#[test]
fn test_escape_recovers_even_double_playing() {
    let (doc, _items, players) = two_player_page();
    let mut controller = PageController::new(doc, PageOptions::default());

    // Fabricate the state the coordinator is supposed to prevent.
    force_playing(&mut controller, players[0]);
    force_playing(&mut controller, players[1]);
    assert_eq!(controller.stats().playing, 2);

    controller.handle(PageEvent::key_down(Key::Escape), 0.0);
    assert_eq!(controller.stats().playing, 0);
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Paused);
    assert_eq!(state_of(&controller, players[1]), PlaybackState::Paused);
}

#[test]
fn test_play_sweep_recovers_double_playing() {
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    doc.set_viewport_size(800.0, 600.0);
    let (_item_a, player_a) = item_with_player(&mut doc, 100.0, "audio/a.mp3");
    let (_item_b, player_b) = item_with_player(&mut doc, 220.0, "audio/b.mp3");
    let (_item_c, player_c) = item_with_player(&mut doc, 340.0, "audio/c.mp3");
    let mut controller = PageController::new(doc, PageOptions::default());

    force_playing(&mut controller, player_a);
    force_playing(&mut controller, player_b);
    assert_eq!(controller.stats().playing, 2);

    // One legitimate play sweeps every sibling, not just "the" other one.
    make_playing(&mut controller, player_c);
    assert_eq!(controller.stats().playing, 1);
    assert_eq!(state_of(&controller, player_a), PlaybackState::Paused);
    assert_eq!(state_of(&controller, player_b), PlaybackState::Paused);
    assert_eq!(state_of(&controller, player_c), PlaybackState::Playing);
}

// ============================================================================
// LAZY LOADING
// ============================================================================

#[test]
fn test_offscreen_audio_never_loads() {
    let (doc, _item, player) = deferred_page("audio/far.mp3", 5000.0);
    let mut controller = PageController::new(doc, PageOptions::default());

    for (i, y) in [0.0, 800.0, 2000.0, 4300.0].into_iter().enumerate() {
        controller.handle(PageEvent::scroll(y), i as f64);
        controller.tick(i as f64 + 0.5);
    }

    assert_eq!(src_of(&controller, player), "pending");
    assert_eq!(state_of(&controller, player), PlaybackState::Idle);
    assert_eq!(controller.pending_lazy_loads(), 1);
}

#[test]
fn test_visible_deferred_assigns_exactly_once() {
    let (doc, _item, player) = deferred_page("audio/near.mp3", 100.0);
    let mut controller = PageController::new(doc, PageOptions::default());

    controller.tick(0.0);
    let resolved = "https://lab.test/showcase/audio/near.mp3";
    assert_eq!(src_of(&controller, player), resolved);
    assert_eq!(state_of(&controller, player), PlaybackState::Loading);
    assert_eq!(controller.pending_lazy_loads(), 0);

    // Repeat visibility changes cannot trigger a second assignment.
    controller.tick(1.0);
    controller.handle(PageEvent::scroll(3000.0), 2.0);
    controller.tick(3.0);
    controller.handle(PageEvent::scroll(0.0), 4.0);
    controller.tick(5.0);
    assert_eq!(src_of(&controller, player), resolved);
    assert_eq!(state_of(&controller, player), PlaybackState::Loading);
}

#[test]
fn test_absolute_deferred_locator_passes_through() {
    let (doc, _item, player) = deferred_page("https://cdn.lab.test/mix.mp3", 100.0);
    let mut controller = PageController::new(doc, PageOptions::default());

    controller.tick(0.0);
    assert_eq!(src_of(&controller, player), "https://cdn.lab.test/mix.mp3");
}

#[test]
fn test_relative_locator_without_base_kept_verbatim() {
    let mut doc = PageDocument::new("about:blank");
    doc.set_viewport_size(800.0, 600.0);
    let item = doc.create_element("div");
    doc.set_attr(item, "class", "comparison-item");
    set_rect(&mut doc, item, 0.0, 100.0, 800.0, 100.0);
    let player = doc.create_child(item, "audio");
    doc.set_attr(player, "data-src", "audio/a.mp3");
    set_rect(&mut doc, player, 20.0, 110.0, 760.0, 60.0);

    let mut controller = PageController::new(doc, PageOptions::default());
    controller.tick(0.0);
    assert_eq!(src_of(&controller, player), "audio/a.mp3");
}

#[test]
fn test_unsupported_observer_goes_eager() {
    let (mut doc, item, player) = deferred_page("audio/far.mp3", 5000.0);
    let section = doc.create_element("section");
    doc.set_attr(section, "class", "section");
    set_rect(&mut doc, section, 0.0, 4000.0, 800.0, 400.0);

    let mut options = PageOptions::default();
    options.observer_support = ObserverSupport::Unsupported;
    let mut controller = PageController::new(doc, options);

    // Without observer support everything is treated as visible at once.
    controller.tick(0.0);
    assert_eq!(
        src_of(&controller, player),
        "https://lab.test/showcase/audio/far.mp3"
    );
    assert_eq!(state_of(&controller, player), PlaybackState::Loading);
    assert_eq!(controller.pending_lazy_loads(), 0);
    let doc = controller.document();
    assert!(doc.has_class(section, "animate-in"));
    assert!(doc.has_class(item, "loading"));
}

// ============================================================================
// HOSTILE INPUT
// ============================================================================

#[test]
fn test_scroll_beyond_content_clamps() {
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    doc.set_viewport_size(800.0, 600.0);
    let (_item, _player) = item_with_player(&mut doc, 100.0, "audio/a.mp3");
    let footer = doc.create_element("footer");
    set_rect(&mut doc, footer, 0.0, 3000.0, 800.0, 200.0);

    let mut controller = PageController::new(doc, PageOptions::default());
    controller.handle(PageEvent::scroll(99_999.0), 0.0);
    assert_eq!(controller.document().scroll_y(), 2600.0);

    controller.handle(PageEvent::scroll(-50.0), 1.0);
    assert_eq!(controller.document().scroll_y(), 0.0);
}

#[test]
fn test_foreign_element_id_is_ignored() {
    let (doc, _items, players) = two_player_page();
    let mut controller = PageController::new(doc, PageOptions::default());

    // An id minted by a different document, out of range for this page.
    let mut other = PageDocument::default();
    let mut foreign = other.create_element("div");
    for _ in 0..64 {
        foreign = other.create_element("div");
    }

    controller.handle(PageEvent::click(foreign), 0.0);
    controller.handle(PageEvent::media(foreign, MediaSignal::Play), 1.0);
    controller.tick(2.0);

    assert_eq!(controller.document().scroll_y(), 0.0);
    assert_eq!(controller.stats().playing, 0);
    assert_eq!(state_of(&controller, players[0]), PlaybackState::Idle);
}

#[test]
fn test_media_signal_for_non_player_is_dropped() {
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    doc.set_viewport_size(800.0, 600.0);
    let paragraph = doc.create_element("p");
    set_rect(&mut doc, paragraph, 0.0, 100.0, 800.0, 40.0);
    let (_item, player) = item_with_player(&mut doc, 200.0, "audio/a.mp3");

    let mut controller = PageController::new(doc, PageOptions::default());
    controller.handle(PageEvent::media(paragraph, MediaSignal::LoadStart), 0.0);
    controller.handle(PageEvent::media(paragraph, MediaSignal::Play), 1.0);

    assert_eq!(
        controller.stats(),
        PlaybackStats {
            players: 1,
            playing: 0,
            loading: 0,
            errored: 0
        }
    );
    assert_eq!(state_of(&controller, player), PlaybackState::Idle);
}

#[test]
fn test_overlay_class_never_doubles_over_signal_storm() {
    let (doc, items, players) = two_player_page();
    let item = items[0];
    let player = players[0];
    let mut controller = PageController::new(doc, PageOptions::default());

    let steps: Vec<(MediaSignal, Option<&str>)> = vec![
        (MediaSignal::LoadStart, Some("loading")),
        (
            MediaSignal::Error {
                message: "net down".to_string(),
            },
            Some("error"),
        ),
        // A retry clears the error overlay.
        (MediaSignal::LoadStart, Some("loading")),
        (MediaSignal::CanPlay, None),
        (MediaSignal::Play, None),
        (MediaSignal::Pause, None),
        (MediaSignal::Play, None),
        (
            MediaSignal::Error {
                message: "decode failed".to_string(),
            },
            Some("error"),
        ),
    ];

    for (i, (signal, expected)) in steps.into_iter().enumerate() {
        controller.handle(PageEvent::media(player, signal), i as f64);
        let doc = controller.document();
        let loading = doc.has_class(item, "loading");
        let error = doc.has_class(item, "error");
        assert!(!(loading && error), "both overlays present after step {i}");
        match expected {
            Some("loading") => assert!(loading, "expected loading overlay after step {i}"),
            Some("error") => assert!(error, "expected error overlay after step {i}"),
            _ => assert!(!loading && !error, "expected no overlay after step {i}"),
        }
    }
}

#[test]
fn test_exclusivity_holds_over_signal_storm() {
    let mut doc = PageDocument::new("https://lab.test/grid/");
    doc.set_viewport_size(800.0, 600.0);
    let mut players = Vec::new();
    for i in 0..6 {
        let (_, player) =
            item_with_player(&mut doc, 100.0 + 120.0 * i as f64, &format!("audio/track-{i}.mp3"));
        players.push(player);
    }

    let mut controller = PageController::new(doc, PageOptions::default());
    for &player in &players {
        make_ready(&mut controller, player);
    }

    let storm = [
        (players[0], MediaSignal::Play),
        (players[3], MediaSignal::Play),
        (players[3], MediaSignal::Pause),
        (players[1], MediaSignal::Play),
        (players[2], MediaSignal::Play),
        (
            players[2],
            MediaSignal::Error {
                message: "decode failed".to_string(),
            },
        ),
        (players[4], MediaSignal::Play),
        (players[5], MediaSignal::Play),
        (players[4], MediaSignal::Play),
    ];
    for (i, (player, signal)) in storm.into_iter().enumerate() {
        controller.handle(PageEvent::media(player, signal), i as f64);
        assert!(
            controller.stats().playing <= 1,
            "more than one player audible after event {i}"
        );
    }

    controller.handle(PageEvent::key_down(Key::Escape), 99.0);
    assert_eq!(controller.stats().playing, 0);
    assert_eq!(controller.stats().errored, 1);
    assert_eq!(state_of(&controller, players[2]), PlaybackState::Errored);
    assert_eq!(state_of(&controller, players[4]), PlaybackState::Paused);
    assert_eq!(state_of(&controller, players[5]), PlaybackState::Paused);
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_options_from_json_shape_the_controller() {
    let options = PageOptions::from_json(
        r#"{
            "observer_support": "unsupported",
            "toast": { "enter_delay_ms": 0.0, "visible_ms": 500.0, "fade_ms": 100.0 }
        }"#,
    )
    .unwrap();

    let (mut doc, _item, player) = deferred_page("audio/far.mp3", 5000.0);
    let cite = doc.create_element("div");
    doc.set_attr(cite, "class", "citation-box");
    set_rect(&mut doc, cite, 0.0, 200.0, 600.0, 100.0);
    if let Some(el) = doc.element_mut(cite) {
        el.text = "Doe et al. 2025".to_string();
    }

    let clipboard = SharedClipboard::default();
    let mut controller = PageController::with_clipboards(
        doc,
        options,
        Box::new(clipboard.clone()),
        Box::new(UnavailableClipboard),
    );

    // Degraded observer support: the far player loads on the first cycle.
    controller.tick(0.0);
    assert_eq!(
        src_of(&controller, player),
        "https://lab.test/showcase/audio/far.mp3"
    );

    // The shortened toast timeline is honored.
    controller.handle(PageEvent::click(cite), 10.0);
    controller.tick(10.0);
    assert_eq!(controller.toasts()[0].phase, ToastPhase::Visible);
    controller.tick(520.0);
    assert_eq!(controller.toasts()[0].phase, ToastPhase::Exiting);
    controller.tick(620.0);
    assert!(controller.toasts().is_empty());
    assert_eq!(clipboard.writes.borrow().as_slice(), ["Doe et al. 2025"]);
}

#[test]
fn test_zero_viewport_observes_nothing() {
    // Viewport dimensions never reported by the host.
    let mut doc = PageDocument::new("https://lab.test/showcase/");
    let item = doc.create_element("div");
    doc.set_attr(item, "class", "comparison-item");
    set_rect(&mut doc, item, 0.0, 0.0, 800.0, 100.0);
    let player = doc.create_child(item, "audio");
    doc.set_attr(player, "data-src", "audio/zero.mp3");
    set_rect(&mut doc, player, 20.0, 10.0, 760.0, 60.0);
    let section = doc.create_element("section");
    doc.set_attr(section, "class", "section");
    set_rect(&mut doc, section, 0.0, 0.0, 800.0, 400.0);

    let mut controller = PageController::new(doc, PageOptions::default());
    controller.tick(0.0);
    controller.tick(1.0);

    assert_eq!(controller.pending_lazy_loads(), 1);
    assert_eq!(src_of(&controller, player), "");
    assert!(!controller.document().has_class(section, "animate-in"));
}
