// File: crates/tract-core/src/picker.rs
// Summary: Point-in-segment picking, active segment selection state, and selection notifications.

use tracing::trace;

use crate::geometry::{CrossSection, Point2};
use crate::simulation::TractGeometry;
use crate::view::ViewTransform;

/// Index of the first segment, in centerline order, whose quad contains `point`.
/// Overlapping later segments are never reported.
pub fn pick(point: Point2, sections: &[CrossSection]) -> Option<usize> {
    sections.iter().position(|s| s.quad().contains(point))
}

/// Map a pixel to simulation space and ask the geometry which segment holds it.
/// The default containment scan reads one snapshot of the provider.
pub fn pick_segment<G: TractGeometry + ?Sized>(
    pixel: (f64, f64),
    transform: &ViewTransform,
    geometry: &G,
) -> Option<usize> {
    if geometry.section_count() == 0 {
        return None;
    }
    let world = transform.to_world(pixel.0, pixel.1);
    let hit = geometry.find_segment_containing(world);
    trace!(px = pixel.0, py = pixel.1, x = world.x, y = world.y, ?hit, "pick");
    hit
}

/// Notification sent to the host after the active segment changed by picking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    SegmentSelected { index: usize },
}

/// Receiver of selection notifications (typically triggers a repaint of dependent views).
pub trait SelectionListener {
    fn selection_changed(&self, event: SelectionEvent);
}

impl<F: Fn(SelectionEvent)> SelectionListener for F {
    fn selection_changed(&self, event: SelectionEvent) {
        self(event)
    }
}

/// Active segment owned by the interaction layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentSelection {
    active: usize,
}

impl SegmentSelection {
    pub fn new() -> Self { Self::default() }

    /// Raw stored index, which may exceed the current section count.
    pub fn active(&self) -> usize { self.active }

    /// Active index clamped into `[0, count - 1]`; `None` without segments.
    pub fn active_clamped(&self, count: usize) -> Option<usize> {
        if count == 0 { None } else { Some(self.active.min(count - 1)) }
    }

    /// Step toward the inlet, saturating at 0. Returns whether the index moved.
    pub fn select_previous(&mut self) -> bool {
        let prev = self.active;
        self.active = self.active.saturating_sub(1);
        self.active != prev
    }

    /// Step toward the outlet, saturating at `count - 1`. Returns whether the index moved.
    pub fn select_next(&mut self, count: usize) -> bool {
        let prev = self.active;
        self.active = (self.active + 1).min(count.saturating_sub(1));
        self.active != prev
    }

    pub fn reset(&mut self) {
        self.active = 0;
    }

    /// Set the index directly, clamped into `[0, count - 1]`.
    pub fn set_active(&mut self, index: usize, count: usize) {
        self.active = index.min(count.saturating_sub(1));
    }

    /// Pick at `pixel`; on a hit, make it active and notify `listener`.
    /// A miss leaves the selection untouched and sends nothing.
    pub fn pick<G: TractGeometry + ?Sized, L: SelectionListener + ?Sized>(
        &mut self,
        pixel: (f64, f64),
        transform: &ViewTransform,
        geometry: &G,
        listener: &L,
    ) -> Option<usize> {
        let index = pick_segment(pixel, transform, geometry)?;
        self.active = index;
        listener.selection_changed(SelectionEvent::SegmentSelected { index });
        Some(index)
    }
}
