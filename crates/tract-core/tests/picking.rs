// File: crates/tract-core/tests/picking.rs
// Purpose: Validate first-match picking, no-match outcomes, selection navigation and notifications.

use std::cell::{Cell, RefCell};

use tract_core::{
    pick, pick_segment, CrossSection, Point2, SectionList, SegmentSelection, SelectionEvent, TractGeometry,
    Vec2, ViewError, ViewTransform, Viewport, WorldBoundingBox,
};

fn up() -> Vec2 {
    Vec2::new(0.0, 1.0)
}

/// Three consecutive straight segments along +x, 2 cm long, 1 cm half-width.
fn tube() -> SectionList {
    (0..3)
        .map(|i| {
            let x0 = 2.0 * i as f64;
            CrossSection::straight(Point2::new(x0, 0.0), Point2::new(x0 + 2.0, 0.0), up(), 1.0)
        })
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn overlapping_segments_lowest_index_wins() {
    let a = CrossSection::straight(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), up(), 1.0);
    let b = CrossSection::straight(Point2::new(1.0, 0.0), Point2::new(3.0, 0.0), up(), 2.0);
    let p = Point2::new(2.0, 0.5);
    assert!(a.quad().contains(p) && b.quad().contains(p));
    assert_eq!(pick(p, &[a, b]), Some(0));
    assert_eq!(pick(p, &[b, a]), Some(0));
    // Only the wider segment reaches this point.
    assert_eq!(pick(Point2::new(2.0, 1.5), &[a, b]), Some(1));
}

/// Same tube traversed along -x: segment `i` spans x in [-2i - 2, -2i].
fn reversed_tube() -> SectionList {
    (0..3)
        .map(|i| {
            let x0 = -2.0 * i as f64;
            CrossSection::straight(Point2::new(x0, 0.0), Point2::new(x0 - 2.0, 0.0), up(), 1.0)
        })
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn shared_seam_goes_to_lower_index_in_both_directions() {
    let fwd = tube();
    assert_eq!(pick(Point2::new(2.0, 0.0), fwd.sections()), Some(0));
    assert_eq!(pick(Point2::new(4.0, 0.5), fwd.sections()), Some(1));

    let rev = reversed_tube();
    assert_eq!(pick(Point2::new(-2.0, 0.0), rev.sections()), Some(0));
    assert_eq!(pick(Point2::new(-4.0, -0.5), rev.sections()), Some(1));
}

#[test]
fn outline_edges_are_inside() {
    let t = tube();
    assert_eq!(pick(Point2::new(1.0, 1.0), t.sections()), Some(0));
    assert_eq!(pick(Point2::new(1.0, -1.0), t.sections()), Some(0));
    assert_eq!(pick(Point2::new(0.0, 0.3), t.sections()), Some(0));
    assert_eq!(pick(Point2::new(6.0, 0.0), t.sections()), Some(2));
    assert_eq!(pick(Point2::new(1.0, 1.0 + 1e-6), t.sections()), None);

    let rev = reversed_tube();
    assert_eq!(pick(Point2::new(-1.0, 1.0), rev.sections()), Some(0));
    assert_eq!(pick(Point2::new(-1.0, -1.0), rev.sections()), Some(0));
}

#[test]
fn miss_is_none() {
    let t = tube();
    assert_eq!(pick(Point2::new(3.0, 5.0), t.sections()), None);
    assert_eq!(pick(Point2::new(-1.0, 0.0), t.sections()), None);
    assert_eq!(pick(Point2::new(0.0, 0.0), &[]), None);
    assert_eq!(t.find_segment_containing(Point2::new(3.0, 0.2)), Some(1));
}

#[test]
fn pick_from_pixel_goes_through_inverse_mapping() {
    let t = tube();
    let bbox = t.world_bounding_box().expect("bbox");
    assert_eq!((bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y), (0.0, 6.0, -1.0, 1.0));
    let view = ViewTransform::compute(&bbox, Viewport::new(300, 300)).unwrap();

    let (px, py) = view.to_pixel(Point2::new(5.0, 0.0));
    assert_eq!(pick_segment((px, py), &view, &t), Some(2));
    assert_eq!(pick_segment((px, 0.0), &view, &t), None);

    let empty = SectionList::default();
    assert_eq!(pick_segment((px, py), &view, &empty), None);
}

#[test]
fn selection_updates_and_notifies_only_on_hit() {
    let t = tube();
    let view = ViewTransform::compute(&t.world_bounding_box().unwrap(), Viewport::new(200, 200)).unwrap();
    let events = RefCell::new(Vec::new());
    let listener = |e: SelectionEvent| events.borrow_mut().push(e);

    let mut sel = SegmentSelection::new();
    let hit = view.to_pixel(Point2::new(3.0, 0.0));
    assert_eq!(sel.pick(hit, &view, &t, &listener), Some(1));
    assert_eq!(sel.active(), 1);

    assert_eq!(sel.pick((hit.0, 1.0), &view, &t, &listener), None);
    assert_eq!(sel.active(), 1);

    assert_eq!(*events.borrow(), vec![SelectionEvent::SegmentSelected { index: 1 }]);
}

#[test]
fn navigation_saturates() {
    let mut sel = SegmentSelection::new();
    assert!(!sel.select_previous());
    assert_eq!(sel.active(), 0);
    assert!(sel.select_next(3));
    assert!(sel.select_next(3));
    assert!(!sel.select_next(3));
    assert_eq!(sel.active(), 2);
    assert!(sel.select_previous());
    assert_eq!(sel.active(), 1);
    sel.reset();
    assert_eq!(sel.active(), 0);
    assert!(!sel.select_next(0));
    assert_eq!(sel.active(), 0);

    sel.set_active(9, 4);
    assert_eq!(sel.active(), 3);
    assert_eq!(sel.active_clamped(2), Some(1));
    assert_eq!(sel.active_clamped(0), None);
}

#[test]
fn out_of_range_section_is_a_contract_error() {
    let t = tube();
    assert_eq!(t.cross_section(3), Err(ViewError::SectionOutOfRange { index: 3, count: 3 }));
    assert!(t.cross_section(2).is_ok());
    let snap = t.snapshot().unwrap();
    assert_eq!(snap, t);
    assert_eq!(snap.len(), 3);
}

/// Provider relying on the default trait methods.
struct Remote(Vec<CrossSection>);

impl TractGeometry for Remote {
    fn section_count(&self) -> usize { self.0.len() }
    fn cross_section(&self, index: usize) -> Result<CrossSection, ViewError> {
        self.0.get(index).copied().ok_or(ViewError::SectionOutOfRange { index, count: self.0.len() })
    }
    fn world_bounding_box(&self) -> Option<tract_core::WorldBoundingBox> { None }
}

#[test]
fn default_containment_matches_local_pick() {
    let sections = tube().sections().to_vec();
    let remote = Remote(sections.clone());
    for &(x, y) in &[(0.5, 0.0), (2.5, 0.9), (5.9, -0.9), (7.0, 0.0), (3.0, 3.0)] {
        let p = Point2::new(x, y);
        assert_eq!(remote.find_segment_containing(p), pick(p, &sections));
    }
    assert_eq!(remote.snapshot().unwrap().sections(), &sections[..]);
}

/// Provider whose bounding box drifts each time a section is read.
struct Drifting {
    sections: Vec<CrossSection>,
    reads: Cell<u32>,
}

impl TractGeometry for Drifting {
    fn section_count(&self) -> usize { self.sections.len() }
    fn cross_section(&self, index: usize) -> Result<CrossSection, ViewError> {
        self.reads.set(self.reads.get() + 1);
        self.sections.get(index).copied().ok_or(ViewError::SectionOutOfRange { index, count: self.sections.len() })
    }
    fn world_bounding_box(&self) -> Option<WorldBoundingBox> {
        Some(WorldBoundingBox::new(0.0, -1.0, 6.0 + self.reads.get() as f64, 1.0))
    }
}

#[test]
fn snapshot_pins_bounding_box_with_sections() {
    let geom = Drifting { sections: tube().sections().to_vec(), reads: Cell::new(0) };
    let snap = geom.snapshot().unwrap();
    assert_eq!(snap.len(), 3);
    assert_eq!(snap.world_bounding_box(), Some(WorldBoundingBox::new(0.0, -1.0, 6.0, 1.0)));
    // The live provider has moved on; the snapshot has not.
    assert_eq!(geom.world_bounding_box(), Some(WorldBoundingBox::new(0.0, -1.0, 9.0, 1.0)));
    assert_eq!(snap.world_bounding_box(), Some(WorldBoundingBox::new(0.0, -1.0, 6.0, 1.0)));

    let mut grown = snap.clone();
    grown.push(CrossSection::straight(Point2::new(6.0, 0.0), Point2::new(8.0, 0.0), up(), 2.0));
    assert_eq!(grown.world_bounding_box(), Some(WorldBoundingBox::new(0.0, -2.0, 8.0, 2.0)));
}

/// Provider that claims one more section than it can serve.
struct ShortRead(Vec<CrossSection>);

impl TractGeometry for ShortRead {
    fn section_count(&self) -> usize { self.0.len() + 1 }
    fn cross_section(&self, index: usize) -> Result<CrossSection, ViewError> {
        self.0.get(index).copied().ok_or(ViewError::SectionOutOfRange { index, count: self.0.len() })
    }
    fn world_bounding_box(&self) -> Option<WorldBoundingBox> { None }
}

#[test]
fn broken_provider_pick_reports_nothing() {
    let geom = ShortRead(tube().sections().to_vec());
    assert_eq!(geom.snapshot(), Err(ViewError::SectionOutOfRange { index: 3, count: 3 }));
    assert_eq!(geom.find_segment_containing(Point2::new(1.0, 0.0)), None);
}
