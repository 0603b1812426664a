mod common;

/// Frame rendering through a recording surface
#[cfg(test)]
mod rendering_tests {
    use crate::common::Harness;
    use mapglide::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingOverlay {
        calls: Rc<RefCell<Vec<(Rect, i32)>>>,
    }

    impl ViewportOverlay for RecordingOverlay {
        fn draw_overlay(&mut self, surface: &mut dyn RenderSurface, bounds: Rect, magnification: i32) {
            self.calls.borrow_mut().push((bounds, magnification));
            surface.fill_rect(Rect::new(bounds.x, bounds.y, 2, 2), 0xff0000);
        }
    }

    fn tile_at(h: &Harness, dx: i64, dy: i64, image: u64) -> TileArrival {
        let px = h.viewport.current_center_pixels().offset(dx, dy);
        TileArrival {
            center: WebMercator::default().to_geo(px),
            magnification: px.magnification,
            image: ImageHandle(image),
        }
    }

    #[test]
    fn test_tiles_are_centred_on_their_position() {
        let mut h = Harness::new(GeoCoordinate::new(7.0, 45.0), 12, 320, 480);
        let tiles = vec![tile_at(&h, 0, 0, 1), tile_at(&h, 256, 256, 2)];
        *h.provider.tiles.borrow_mut() = tiles;

        let mut surface = RecordingSurface::new();
        h.viewport.render_frame(&mut surface, ScreenPoint::new(10, 20));

        let images: Vec<_> = surface.images().collect();
        assert_eq!(
            images,
            vec![
                (ImageHandle(1), 10 + 160 - 128, 20 + 240 - 128),
                // North-east: right and up on screen
                (ImageHandle(2), 10 + 160 + 256 - 128, 20 + 240 - 256 - 128),
            ]
        );
    }

    #[test]
    fn test_tiles_at_other_magnification_are_dropped() {
        let mut h = Harness::new(GeoCoordinate::new(0.0, 0.0), 10, 320, 480);
        h.provider.tiles.borrow_mut().push(TileArrival {
            center: GeoCoordinate::new(0.0, 0.0),
            magnification: 9,
            image: ImageHandle(4),
        });

        let mut surface = RecordingSurface::new();
        h.viewport.render_frame(&mut surface, ScreenPoint::new(0, 0));
        assert_eq!(surface.images().count(), 0);
    }

    #[test]
    fn test_frame_is_clipped_and_balanced() {
        let mut h = Harness::new(GeoCoordinate::new(0.0, 0.0), 10, 320, 480);
        let mut surface = RecordingSurface::new();
        h.viewport.render_frame(&mut surface, ScreenPoint::new(5, 6));

        let commands = surface.commands();
        assert_eq!(commands.first(), Some(&DrawCommand::PushClip(Rect::new(5, 6, 320, 480))));
        assert_eq!(commands.last(), Some(&DrawCommand::PopClip));
        assert_eq!(surface.clip_depth(), 0);
    }

    #[test]
    fn test_overlay_runs_between_tiles_and_chrome() {
        let mut h = Harness::new(GeoCoordinate::new(0.0, 0.0), 10, 320, 480);
        h.provider
            .tiles
            .borrow_mut()
            .push(tile_at(&h, 0, 0, 9));
        let calls = Rc::new(RefCell::new(Vec::new()));
        h.viewport.set_overlay(Box::new(RecordingOverlay {
            calls: calls.clone(),
        }));

        let mut surface = RecordingSurface::new();
        h.viewport.render_frame(&mut surface, ScreenPoint::new(0, 0));

        assert_eq!(*calls.borrow(), vec![(Rect::new(0, 0, 320, 480), 10)]);

        let commands = surface.commands();
        let image = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Image { .. }))
            .unwrap();
        let overlay = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { color: 0xff0000, .. }))
            .unwrap();
        let text = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .unwrap();
        assert!(image < overlay && overlay < text);
    }

    #[test]
    fn test_chrome_reports_view() {
        let mut h = Harness::new(GeoCoordinate::new(10.0, 20.5), 10, 320, 480);
        let mut surface = RecordingSurface::new();
        h.viewport.render_frame(&mut surface, ScreenPoint::new(0, 0));

        let texts: Vec<String> = surface.texts().map(str::to_string).collect();
        assert_eq!(texts.len(), 3);
        assert!(texts[0].ends_with(" m/px"));
        assert!(texts[1].starts_with("10.0000 20.5"));
        assert_eq!(texts[2], "Tiles: 0 Cache: 7");
    }

    #[test]
    fn test_unsized_viewport_requests_nothing() {
        let mut h = Harness::new(GeoCoordinate::new(0.0, 0.0), 10, 320, 0);
        let mut surface = RecordingSurface::new();
        h.viewport.render_frame(&mut surface, ScreenPoint::new(0, 0));

        assert_eq!(h.provider.request_count(), 0);
        assert_eq!(surface.images().count(), 0);
        assert_eq!(surface.clip_depth(), 0);
    }

    #[test]
    fn test_scale_is_forwarded_to_images() {
        let mut h = Harness::new(GeoCoordinate::new(0.0, 0.0), 10, 320, 480);
        h.provider
            .tiles
            .borrow_mut()
            .push(tile_at(&h, 0, 0, 3));
        h.viewport.set_scale(2.0);

        let mut surface = RecordingSurface::new();
        h.viewport.render_frame(&mut surface, ScreenPoint::new(0, 0));
        assert!(surface.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Image { scale, .. } if *scale == 2.0
        )));
    }
}
