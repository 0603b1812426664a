use crate::core::bounds::Rect;
use crate::tiles::ImageHandle;

/// Drawing primitives the viewport needs from its host
pub trait RenderSurface {
    /// Intersects the clip region with `rect` and saves the previous one
    fn push_clip_rect(&mut self, rect: Rect);

    /// Restores the clip region saved by the matching push
    fn pop_clip_rect(&mut self);

    /// Fills `rect` with a 0xRRGGBB colour
    fn fill_rect(&mut self, rect: Rect, color: u32);

    /// Draws an image with its top-left corner at `(x, y)`, scaled by `scale`
    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32, scale: f64);

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u32);
}

/// Commands recorded by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PushClip(Rect),
    PopClip,
    FillRect {
        rect: Rect,
        color: u32,
    },
    Image {
        image: ImageHandle,
        x: i32,
        y: i32,
        scale: f64,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: u32,
    },
}

/// Surface that queues commands instead of drawing; used headless and in
/// tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    drawing_queue: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current drawing queue
    pub fn commands(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    /// Innermost clip region, if any
    pub fn clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    pub fn images(&self) -> impl Iterator<Item = (ImageHandle, i32, i32)> + '_ {
        self.drawing_queue.iter().filter_map(|cmd| match cmd {
            DrawCommand::Image { image, x, y, .. } => Some((*image, *x, *y)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.drawing_queue.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Clear the drawing queue
    pub fn clear(&mut self) {
        self.drawing_queue.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn push_clip_rect(&mut self, rect: Rect) {
        let clipped = match self.clip_stack.last() {
            Some(outer) => intersect(outer, &rect),
            None => rect,
        };
        self.clip_stack.push(clipped);
        self.drawing_queue.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip_rect(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("pop_clip_rect without matching push");
        }
        self.drawing_queue.push(DrawCommand::PopClip);
    }

    fn fill_rect(&mut self, rect: Rect, color: u32) {
        self.drawing_queue.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_image(&mut self, image: ImageHandle, x: i32, y: i32, scale: f64) {
        self.drawing_queue.push(DrawCommand::Image { image, x, y, scale });
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u32) {
        self.drawing_queue.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}

fn intersect(a: &Rect, b: &Rect) -> Rect {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = (a.x + a.width).min(b.x + b.width);
    let y1 = (a.y + a.height).min(b.y + b.height);
    Rect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
}
