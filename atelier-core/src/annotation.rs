//! Photo annotation geometry. Positions are stored as fractions of the
//! photo's width and height so markers replay at any render size.

use shared_types::{Annotation, Photo};
use std::sync::atomic::{AtomicI64, Ordering};

pub const STORED_MARKER_COLOR: &str = "#E74C3C";
pub const PENDING_MARKER_COLOR: &str = "#3498DB";
pub const MARKER_RADIUS: f64 = 8.0;

/// Pixel size of the surface the photo is drawn on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel position to normalized fractions, clamped to the photo
    pub fn normalize(&self, px: f64, py: f64) -> (f64, f64) {
        (fraction(px, self.width), fraction(py, self.height))
    }

    pub fn to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.width, y * self.height)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(400.0, 320.0)
    }
}

fn fraction(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / extent).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Image { url: String, width: f64, height: f64 },
    Marker {
        x: f64,
        y: f64,
        radius: f64,
        color: &'static str,
        label: Option<String>,
    },
}

/// Draw list for `photo` at `surface` size: clear, the image, one numbered
/// marker per stored annotation, then the unnumbered pending marker.
pub fn render(photo: &Photo, pending: Option<&Annotation>, surface: &Surface) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(photo.annotations.len() + 3);
    commands.push(DrawCommand::Clear {
        width: surface.width,
        height: surface.height,
    });
    commands.push(DrawCommand::Image {
        url: photo.url.clone(),
        width: surface.width,
        height: surface.height,
    });

    for (index, annotation) in photo.annotations.iter().enumerate() {
        let (x, y) = surface.to_pixels(annotation.x, annotation.y);
        commands.push(DrawCommand::Marker {
            x,
            y,
            radius: MARKER_RADIUS,
            color: STORED_MARKER_COLOR,
            label: Some((index + 1).to_string()),
        });
    }

    if let Some(pending) = pending {
        let (x, y) = surface.to_pixels(pending.x, pending.y);
        commands.push(DrawCommand::Marker {
            x,
            y,
            radius: MARKER_RADIUS,
            color: PENDING_MARKER_COLOR,
            label: None,
        });
    }

    commands
}

/// Hands out increasing ids for photos and annotations created client side
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicI64,
}

impl IdAllocator {
    pub fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    /// Seeded from the wall clock in milliseconds
    pub fn from_clock() -> Self {
        Self::starting_at(chrono::Utc::now().timestamp_millis())
    }

    pub fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_with(points: &[(f64, f64)]) -> Photo {
        Photo {
            id: 1,
            name: "wall.jpg".to_string(),
            url: "blob:wall".to_string(),
            annotations: points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| Annotation {
                    id: i as i64,
                    x: *x,
                    y: *y,
                    text: format!("note {}", i),
                    is_editing: false,
                })
                .collect(),
        }
    }

    fn markers(commands: &[DrawCommand]) -> Vec<(f64, f64, &'static str, Option<String>)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Marker { x, y, color, label, .. } => Some((*x, *y, *color, label.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_positions_scale_with_surface() {
        let small = Surface::new(400.0, 320.0);
        let (x, y) = small.normalize(100.0, 80.0);
        assert_eq!((x, y), (0.25, 0.25));

        let large = Surface::new(1200.0, 960.0);
        let photo = photo_with(&[(x, y)]);
        let drawn = markers(&render(&photo, None, &large));
        assert_eq!(drawn, vec![(300.0, 240.0, STORED_MARKER_COLOR, Some("1".to_string()))]);
    }

    #[test]
    fn test_render_order_and_labels() {
        let photo = photo_with(&[(0.1, 0.1), (0.5, 0.5)]);
        let pending = Annotation {
            id: 99,
            x: 0.9,
            y: 0.9,
            text: String::new(),
            is_editing: true,
        };

        let commands = render(&photo, Some(&pending), &Surface::default());
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(commands[1], DrawCommand::Image { .. }));

        let drawn = markers(&commands);
        assert_eq!(drawn.len(), 3);
        assert_eq!(drawn[0].3.as_deref(), Some("1"));
        assert_eq!(drawn[1].3.as_deref(), Some("2"));
        assert_eq!(drawn[2].2, PENDING_MARKER_COLOR);
        assert_eq!(drawn[2].3, None);
    }

    #[test]
    fn test_clicks_outside_are_clamped() {
        let surface = Surface::default();
        assert_eq!(surface.normalize(-20.0, 500.0), (0.0, 1.0));
        assert_eq!(Surface::new(0.0, 0.0).normalize(10.0, 10.0), (0.0, 0.0));
    }

    #[test]
    fn test_ids_increase() {
        let ids = IdAllocator::starting_at(100);
        assert_eq!(ids.next_id(), 100);
        assert_eq!(ids.next_id(), 101);
    }
}
