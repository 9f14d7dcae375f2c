use lens_types::CaptureRegion;

/// Pointer drag in progress: where inside the region the pointer grabbed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    pub dragging: bool,
    pub anchor: (i32, i32),
}

/// Owns the monitored rectangle and the drag flag.
///
/// Lives on the interactive loop; the worker never sees it, only the
/// `CaptureRegion` copy taken into each request.
#[derive(Debug, Default)]
pub struct RegionTracker {
    region: Option<CaptureRegion>,
    drag: DragState,
}

impl RegionTracker {
    pub fn new(region: Option<CaptureRegion>) -> Self {
        Self {
            region,
            drag: DragState::default(),
        }
    }

    /// Replace the region; a fresh selection also ends any drag
    pub fn set_region(&mut self, region: CaptureRegion) {
        self.region = Some(region);
        self.drag = DragState::default();
    }

    pub fn clear(&mut self) {
        self.region = None;
        self.drag = DragState::default();
    }

    pub fn current_region(&self) -> Option<CaptureRegion> {
        self.region
    }

    pub fn begin_drag(&mut self, anchor: (i32, i32)) {
        self.drag = DragState {
            dragging: true,
            anchor,
        };
    }

    pub fn end_drag(&mut self) {
        self.drag.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.dragging
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Pointer pressed: start dragging if it landed inside the region
    pub fn pointer_down(&mut self, x: i32, y: i32) -> bool {
        match self.region {
            Some(region) if region.contains(x, y) => {
                self.begin_drag((x - region.x, y - region.y));
                true
            }
            _ => false,
        }
    }

    /// Pointer moved: keep the anchor under the pointer
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Option<CaptureRegion> {
        if !self.drag.dragging {
            return None;
        }
        let region = self.region?;
        let moved = region.moved_to(x - self.drag.anchor.0, y - self.drag.anchor.1);
        self.region = Some(moved);
        Some(moved)
    }

    pub fn pointer_up(&mut self) {
        self.end_drag();
    }
}
