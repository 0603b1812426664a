use mapglide::prelude::*;

/// Provider that reports one tile at the requested centre
struct CenterTileProvider {
    next_image: u64,
}

impl TileProvider for CenterTileProvider {
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
        self.next_image as usize
    }

    fn request_visible_tiles(&mut self, request: &TileRequest<'_>, sink: &mut dyn TileSink) {
        self.next_image += 1;
        sink.tile_arrived(&TileArrival {
            center: request.center,
            magnification: request.magnification,
            image: ImageHandle(self.next_image),
        });
    }
}

fn pump(viewport: &mut ViewportController, clock: &ManualClock, timer: &ManualTimer) -> usize {
    let mut ticks = 0;
    while timer.is_armed() && ticks < 1_000 {
        clock.advance(30);
        viewport.on_timer();
        ticks += 1;
    }
    ticks
}

/// Drives the viewport without a UI, pumping the timer by hand
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("mapglide headless demo");
    println!("======================");

    let config = ViewportConfig::from_json_str(
        r#"{ "motion": { "average_points": 12 }, "overlay": { "show_debug_info": false } }"#,
    )?;
    let clock = ManualClock::new(0);
    let timer = ManualTimer::new();
    let mut viewport = ViewportBuilder::new()
        .with_config(config)
        .with_clock(Box::new(clock.clone()))
        .with_center(GeoCoordinate::new(-122.4194, 37.7749), 12)
        .with_size(1024, 768)
        .with_map_source("osm")
        .build(
            Box::new(CenterTileProvider { next_image: 0 }),
            Box::new(timer.clone()),
        )?;

    viewport.on_viewport_updated(|event| {
        let ViewportEvent::Updated {
            center,
            magnification,
        } = event;
        log::debug!(
            "updated: {:.4}, {:.4} at {}",
            center.lon,
            center.lat,
            magnification
        );
    });

    let destinations = [
        ("Oakland", GeoCoordinate::new(-122.2711, 37.8044)),
        ("Berkeley", GeoCoordinate::new(-122.2727, 37.8716)),
    ];
    for (name, geo) in destinations {
        viewport.set_center_position(geo, false, false);
        let ticks = pump(&mut viewport, &clock, &timer);
        let current = viewport.current_center();
        println!(
            "  {:<10} reached {:.4}, {:.4} after {} ticks",
            name, current.lon, current.lat, ticks
        );
    }

    for key in [KeyCode::ArrowRight, KeyCode::ArrowUp, KeyCode::Digit(3)] {
        viewport.handle_key_input(key);
        pump(&mut viewport, &clock, &timer);
    }
    println!(
        "  after keys: magnification {} at {:.4}, {:.4}",
        viewport.magnification(),
        viewport.current_center().lon,
        viewport.current_center().lat
    );

    let mut surface = RecordingSurface::new();
    viewport.render_frame(&mut surface, ScreenPoint::new(0, 0));
    println!("  frame: {} draw commands", surface.commands().len());
    for text in surface.texts() {
        println!("    {}", text);
    }

    Ok(())
}
