// File: crates/tract-core/src/simulation.rs
// Summary: Geometry provider interface consumed from the simulation, plus an in-memory snapshot.

use tracing::warn;

use crate::error::ViewError;
use crate::geometry::{CrossSection, Point2};
use crate::picker::pick;
use crate::types::WorldBoundingBox;

/// Read-only view of the simulated tract geometry.
pub trait TractGeometry {
    fn section_count(&self) -> usize;

    /// Bounds-checked access; `index` must lie in `[0, section_count - 1]`.
    fn cross_section(&self, index: usize) -> Result<CrossSection, ViewError>;

    /// Sagittal-plane bounding box, `None` when there is no geometry.
    fn world_bounding_box(&self) -> Option<WorldBoundingBox>;

    /// First segment (lowest index) whose quad contains `point`.
    ///
    /// Scans one snapshot. Providers with their own spatial index may
    /// override this as long as the lowest matching index still wins.
    fn find_segment_containing(&self, point: Point2) -> Option<usize> {
        match self.snapshot() {
            Ok(sections) => pick(point, sections.sections()),
            Err(e) => {
                warn!(error = %e, "geometry provider failed during pick");
                None
            }
        }
    }

    /// Read the bounding box once, then copy every section, so a frame or a
    /// pick scan works on one consistent view of the provider.
    fn snapshot(&self) -> Result<SectionList, ViewError> {
        let bbox = self.world_bounding_box();
        let sections = (0..self.section_count())
            .map(|i| self.cross_section(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SectionList { sections, bbox })
    }
}

/// Ordered sections held in memory (centerline order).
///
/// The bounding box is either pinned (as read from a provider) or derived
/// from the quad corners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionList {
    sections: Vec<CrossSection>,
    bbox: Option<WorldBoundingBox>,
}

impl SectionList {
    pub fn new(sections: Vec<CrossSection>) -> Self {
        Self { sections, bbox: None }
    }

    /// Pin the bounding box instead of deriving it from the quads.
    pub fn with_bounding_box(mut self, bbox: WorldBoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn sections(&self) -> &[CrossSection] { &self.sections }
    pub fn is_empty(&self) -> bool { self.sections.is_empty() }
    pub fn len(&self) -> usize { self.sections.len() }

    /// Append a section; a pinned bounding box no longer applies afterwards.
    pub fn push(&mut self, section: CrossSection) {
        self.sections.push(section);
        self.bbox = None;
    }
}

impl From<Vec<CrossSection>> for SectionList {
    fn from(sections: Vec<CrossSection>) -> Self { Self::new(sections) }
}

impl TractGeometry for SectionList {
    fn section_count(&self) -> usize { self.sections.len() }

    fn cross_section(&self, index: usize) -> Result<CrossSection, ViewError> {
        self.sections
            .get(index)
            .copied()
            .ok_or(ViewError::SectionOutOfRange { index, count: self.sections.len() })
    }

    /// Pinned box, else the box around every quad corner.
    fn world_bounding_box(&self) -> Option<WorldBoundingBox> {
        if self.bbox.is_some() {
            return self.bbox;
        }
        let first = self.sections.first()?.quad().in_min;
        let mut bbox = WorldBoundingBox::new(first.x, first.y, first.x, first.y);
        for s in &self.sections {
            for c in s.quad().corners() {
                bbox.include(c.x, c.y);
            }
        }
        Some(bbox)
    }

    fn find_segment_containing(&self, point: Point2) -> Option<usize> {
        pick(point, &self.sections)
    }

    fn snapshot(&self) -> Result<SectionList, ViewError> {
        Ok(self.clone())
    }
}
