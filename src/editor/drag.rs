//! Drag session bookkeeping and handle hit-testing
//!
//! A drag snapshots the geometry when it starts. Every update recomputes the
//! result from that snapshot and the cumulative pointer offset, so repeated
//! pointer events never accumulate drift.

use crate::domain::{Point, Rect, ResizeHandle};
use crate::error::EditorError;

#[derive(Debug, Clone, Copy)]
struct DragSession {
    start: Rect,
    current: Rect,
}

/// At most one active drag session
#[derive(Debug, Default)]
pub struct DragManager {
    session: Option<DragSession>,
    // Geometry the last session ended with
    last: Option<Rect>,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session from `geometry`
    pub fn start(&mut self, geometry: Rect) -> Result<(), EditorError> {
        if self.session.is_some() {
            log::error!("Drag started while another drag session is active");
            return Err(EditorError::DragAlreadyActive);
        }
        self.session = Some(DragSession {
            start: geometry,
            current: geometry,
        });
        Ok(())
    }

    /// Geometry after dragging `handle` by `(dx, dy)` since the session start
    pub fn update(&mut self, handle: ResizeHandle, dx: f32, dy: f32) -> Result<Rect, EditorError> {
        let session = self.session_mut()?;
        session.current = resize(session.start, handle, dx, dy);
        Ok(session.current)
    }

    /// Geometry after moving the whole shape by `(dx, dy)` since the session start
    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<Rect, EditorError> {
        let session = self.session_mut()?;
        session.current = session.start.translate(dx, dy);
        Ok(session.current)
    }

    /// Close the session, returning its last geometry
    pub fn end(&mut self) -> Option<Rect> {
        let ended = self.session.take().map(|s| s.current);
        if ended.is_some() {
            self.last = ended;
        }
        ended
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Latest geometry of the active session, or the geometry the previous
    /// session ended with. `None` before any drag.
    pub fn current_geometry(&self) -> Option<Rect> {
        self.session.map(|s| s.current).or(self.last)
    }

    /// Snapshot taken when the active session started
    pub fn start_geometry(&self) -> Option<Rect> {
        self.session.map(|s| s.start)
    }

    fn session_mut(&mut self) -> Result<&mut DragSession, EditorError> {
        match self.session.as_mut() {
            Some(session) => Ok(session),
            None => {
                log::error!("Drag update without an active drag session");
                Err(EditorError::NoActiveDrag)
            }
        }
    }
}

/// Apply a pointer offset to the edges a handle controls
///
/// The result is not normalized: width or height go negative when an edge is
/// dragged past the opposite one.
pub fn resize(start: Rect, handle: ResizeHandle, dx: f32, dy: f32) -> Rect {
    let mut r = start;
    if handle.moves_top() {
        r.y = start.y + dy;
        r.h = start.h - dy;
    }
    if handle.moves_bottom() {
        r.h = start.h + dy;
    }
    if handle.moves_left() {
        r.x = start.x + dx;
        r.w = start.w - dx;
    }
    if handle.moves_right() {
        r.w = start.w + dx;
    }
    r
}

/// Which handle of `rect` (if any) lies under `p`
///
/// Corners are checked first by Euclidean distance, then edges by
/// perpendicular distance while `p` is within the edge's span.
pub fn classify_hit(p: Point, rect: &Rect, click_radius: f32) -> ResizeHandle {
    let corners = [
        (ResizeHandle::NW, rect.top_left()),
        (ResizeHandle::NE, rect.top_right()),
        (ResizeHandle::SW, rect.bottom_left()),
        (ResizeHandle::SE, rect.bottom_right()),
    ];
    if let Some((handle, _)) = corners
        .iter()
        .find(|(_, corner)| p.distance(*corner) < click_radius)
    {
        return *handle;
    }

    let within_x = p.x >= rect.x && p.x <= rect.right();
    let within_y = p.y >= rect.y && p.y <= rect.bottom();
    if within_y && (p.x - rect.x).abs() < click_radius {
        ResizeHandle::W
    } else if within_y && (p.x - rect.right()).abs() < click_radius {
        ResizeHandle::E
    } else if within_x && (p.y - rect.y).abs() < click_radius {
        ResizeHandle::N
    } else if within_x && (p.y - rect.bottom()).abs() < click_radius {
        ResizeHandle::S
    } else {
        ResizeHandle::None
    }
}
