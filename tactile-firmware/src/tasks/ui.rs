//! Demo UI consumer
//!
//! Logs typed text and navigation edges, and drives the long-press state
//! the way a menu would: a select held past the threshold turns into a
//! long press until any key is released.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use heapless::String;

use tactile_core::{Edge, KeyEvent};

use crate::channels::{EDGES, KEY_EVENTS, LONG_PRESS};

/// How often the UI looks at the edge flags
const UI_INTERVAL_MS: u64 = 50;

/// Select held this long becomes a long press
const LONG_PRESS_MS: u64 = 500;

const DIRECTIONS: [Edge; 4] = [Edge::Up, Edge::Down, Edge::Left, Edge::Right];

/// UI task - consumes key events and edges
#[embassy_executor::task]
pub async fn ui_task() {
    info!("UI task started");

    let mut ticker = Ticker::every(Duration::from_millis(UI_INTERVAL_MS));
    let mut select_since: Option<Instant> = None;

    loop {
        match select(KEY_EVENTS.receive(), ticker.next()).await {
            Either::First(event) => log_event(&event),
            Either::Second(()) => {
                poll_edges();
                select_since = track_long_press(select_since);
            }
        }
    }
}

fn log_event(event: &KeyEvent) {
    let mut text: String<64> = String::new();
    for &ch in event.text() {
        if text.push(ch).is_err() {
            break;
        }
    }

    info!(
        "Key: \"{}\" mods={=u8:#x} fn={} enter={} del={}",
        text.as_str(),
        event.modifier_mask,
        event.fn_key,
        event.enter,
        event.delete_requested
    );
    if event.exit_requested {
        info!("Exit requested");
    }
}

fn poll_edges() {
    for edge in DIRECTIONS {
        if EDGES.take(edge) {
            info!("Nav: {}", edge);
        }
    }
    if EDGES.take(Edge::Previous) {
        debug!("Nav: previous");
    }
    if EDGES.take(Edge::Next) {
        debug!("Nav: next");
    }
    if EDGES.take(Edge::Escape) {
        info!("Nav: escape");
    }
    if EDGES.take(Edge::AnyKey) {
        trace!("Activity");
    }
}

/// Arm on select, promote to long press after the threshold
fn track_long_press(since: Option<Instant>) -> Option<Instant> {
    match since {
        None => {
            if !EDGES.check(Edge::Select) {
                return None;
            }
            info!("Nav: select");
            LONG_PRESS.arm();
            Some(Instant::now())
        }
        Some(start) => {
            if !LONG_PRESS.is_pending() {
                if LONG_PRESS.is_active() {
                    info!("Long press released");
                    LONG_PRESS.set_active(false);
                }
                return None;
            }

            if !LONG_PRESS.is_active() && start.elapsed() >= Duration::from_millis(LONG_PRESS_MS) {
                info!("Long press");
                LONG_PRESS.set_active(true);
            }
            if LONG_PRESS.is_active() && EDGES.take(Edge::Select) {
                debug!("Select repeat");
            }
            Some(start)
        }
    }
}
