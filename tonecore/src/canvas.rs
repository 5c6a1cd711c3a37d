//! Drawing surface model: freehand strokes, sequence markers and one-stroke undo.
//!
//! The canvas keeps retained shapes addressed by handle so the UI can repaint them
//! every frame. Horizontal position maps to time, vertical position to a note lane.

use crate::note::Note;
use crate::palette::PaletteColor;
use crate::sequence::Sequence;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Handle of a shape on the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Segment {
        from: Point,
        to: Point,
        color: PaletteColor,
        width: f32,
    },
    Marker {
        center: Point,
        radius: f32,
        color: PaletteColor,
    },
}

#[derive(Debug)]
pub struct Canvas {
    width: f32,
    height: f32,
    stroke_width: f32,
    marker_radius: f32,
    shapes: BTreeMap<ShapeId, Shape>,
    /// Segment handles per drag gesture, most recent last
    strokes: Vec<Vec<ShapeId>>,
    /// Last pen position while drawing
    pen: Option<Point>,
    color: PaletteColor,
    next_id: u64,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            stroke_width: 2.0,
            marker_radius: 5.0,
            shapes: BTreeMap::new(),
            strokes: Vec::new(),
            pen: None,
            color: PaletteColor::default(),
            next_id: 0,
        }
    }

    pub fn with_style(mut self, stroke_width: f32, marker_radius: f32) -> Self {
        self.stroke_width = stroke_width;
        self.marker_radius = marker_radius;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn color(&self) -> PaletteColor {
        self.color
    }

    pub fn set_color(&mut self, color: PaletteColor) {
        self.color = color;
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, s)| (*id, s))
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Time value for a horizontal position; the full width spans one second per note.
    pub fn time_at(&self, x: f32) -> f64 {
        (x / self.width) as f64 * Note::COUNT as f64
    }

    /// Horizontal position for a time value, inverse of `time_at`
    pub fn x_at(&self, time: f64) -> f32 {
        (time / Note::COUNT as f64) as f32 * self.width
    }

    pub fn press(&mut self, at: Point) {
        self.pen = Some(at);
        self.strokes.push(Vec::new());
    }

    /// Extend the current stroke to `at`.
    ///
    /// Returns the note under the pen and its time value, or `None` when not drawing.
    pub fn move_to(&mut self, at: Point) -> Option<(Note, f64)> {
        let from = self.pen?;
        let id = self.add(Shape::Segment {
            from,
            to: at,
            color: self.color,
            width: self.stroke_width,
        });
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.push(id);
        }
        self.pen = Some(at);
        Some((Note::nearest_to(at.y), self.time_at(at.x)))
    }

    pub fn release(&mut self) {
        self.pen = None;
    }

    /// Erase the most recent stroke. Returns false when there was none.
    pub fn undo(&mut self) -> bool {
        match self.strokes.pop() {
            Some(stroke) => {
                for id in stroke {
                    // may already be gone after a clear
                    self.shapes.remove(&id);
                }
                true
            }
            None => false,
        }
    }

    /// Remove every shape. The stroke stack is kept.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Clear, then mark each event at its time and lane in the current color.
    pub fn draw_sequence(&mut self, sequence: &Sequence) {
        self.clear();
        for event in sequence {
            let center = Point::new(self.x_at(event.time), event.note.lane());
            self.add(Shape::Marker {
                center,
                radius: self.marker_radius,
                color: self.color,
            });
        }
    }

    fn add(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }
}
