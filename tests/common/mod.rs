#![allow(dead_code)]

use mapglide::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Owned copy of a tile request
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub source: String,
    pub center: GeoCoordinate,
    pub magnification: i32,
    pub width: i32,
    pub height: i32,
}

/// Provider that yields a fixed tile list on every request
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    pub requests: Rc<RefCell<Vec<RecordedRequest>>>,
    pub tiles: Rc<RefCell<Vec<TileArrival>>>,
}

impl ScriptedProvider {
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl TileProvider for ScriptedProvider {
    fn magnification_min(&self) -> i32 {
        0
    }

    fn magnification_max(&self) -> i32 {
        18
    }

    fn tile_size(&self) -> u32 {
        256
    }

    fn tile_count(&self) -> usize {
        self.tiles.borrow().len()
    }

    fn cached_tile_count(&self) -> usize {
        7
    }

    fn request_visible_tiles(&mut self, request: &TileRequest<'_>, sink: &mut dyn TileSink) {
        self.requests.borrow_mut().push(RecordedRequest {
            source: request.source.to_string(),
            center: request.center,
            magnification: request.magnification,
            width: request.width,
            height: request.height,
        });
        for tile in self.tiles.borrow().iter() {
            sink.tile_arrived(tile);
        }
    }
}

pub struct Harness {
    pub viewport: ViewportController,
    pub clock: ManualClock,
    pub timer: ManualTimer,
    pub provider: ScriptedProvider,
}

impl Harness {
    pub fn new(center: GeoCoordinate, magnification: i32, width: i32, height: i32) -> Self {
        let clock = ManualClock::new(10_000);
        let timer = ManualTimer::new();
        let provider = ScriptedProvider::default();
        let viewport = ViewportController::builder()
            .with_center(center, magnification)
            .with_size(width, height)
            .with_clock(Box::new(clock.clone()))
            .with_map_source("test")
            .build(Box::new(provider.clone()), Box::new(timer.clone()))
            .unwrap();
        Self {
            viewport,
            clock,
            timer,
            provider,
        }
    }

    /// Advances one pan interval and fires the timer if armed
    pub fn step(&mut self) -> Option<TickOutcome> {
        self.clock.advance(30);
        if self.timer.is_armed() {
            Some(self.viewport.on_timer())
        } else {
            None
        }
    }

    /// Steps until motion settles; returns the number of ticks taken
    pub fn run_until_settled(&mut self, max_ticks: usize) -> Option<usize> {
        for tick in 1..=max_ticks {
            match self.step() {
                Some(TickOutcome::Settled) => return Some(tick),
                None => return Some(tick - 1),
                _ => {}
            }
        }
        None
    }
}
