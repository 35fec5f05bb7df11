//! The host list surface as seen by the drag list.
//!
//! The drag list never lays out or paints rows itself. It drives a
//! [`ListSurface`] implemented by the host toolkit: looking rows up by
//! coordinate, toggling their visibility and opacity, scrolling, and
//! showing a floating snapshot above the list.
//!
//! # Positions
//!
//! Every `position` here is a surface position: header rows come first, so
//! data row `i` sits at position `header_count() + i`.
//!
//! # Coordinates
//!
//! Row bounds and pointer coordinates are list-local. Overlay coordinates
//! are global; [`ListSurface::global_origin`] converts between the two.

use draglist_core::{Point, Rect, Size};

/// Rendering and overlay capabilities of a host list.
pub trait ListSurface {
    /// A captured image of a row, shown in the overlay while dragging.
    type Snapshot;

    /// The row position under a list-local point.
    ///
    /// `None` for dividers, empty space and anything outside the list.
    fn position_at(&self, point: Point) -> Option<usize>;

    /// List-local bounds of the row at `position`.
    ///
    /// `None` unless the row is currently realized on screen.
    fn item_bounds(&self, position: usize) -> Option<Rect>;

    /// Scroll so that the row at `position` starts `offset` pixels below
    /// the list's top edge.
    fn scroll_to_position_with_offset(&mut self, position: usize, offset: f32);

    /// Show or hide a realized row. Unrealized rows are ignored.
    fn set_item_visibility(&mut self, position: usize, visible: bool);

    /// Current opacity of a realized row.
    fn item_alpha(&self, position: usize) -> Option<f32>;

    /// Set the opacity of a realized row.
    fn set_item_alpha(&mut self, position: usize, alpha: f32);

    /// Scroll the content of a realized row horizontally. Positive values
    /// move the content left.
    fn set_item_scroll_x(&mut self, position: usize, scroll_x: f32);

    /// Position of the first realized row.
    fn first_visible_position(&self) -> usize;

    /// Number of header rows preceding the data rows.
    fn header_count(&self) -> usize;

    /// Whether every row fits on screen, so the list cannot scroll.
    fn is_fully_visible(&self) -> bool;

    /// Size of the list viewport.
    fn size(&self) -> Size;

    /// Global coordinate of the list's top-left corner.
    fn global_origin(&self) -> Point;

    /// Capture the current rendering of a realized row.
    fn capture_snapshot(&mut self, position: usize) -> Option<Self::Snapshot>;

    /// Show `snapshot` at global `at` with the given opacity.
    fn show_overlay_snapshot(&mut self, snapshot: &Self::Snapshot, at: Point, alpha: f32);

    /// Move the overlay shown by [`show_overlay_snapshot`](Self::show_overlay_snapshot).
    fn update_overlay_position(&mut self, at: Point);

    /// Remove the overlay.
    fn hide_overlay_snapshot(&mut self);

    /// Whether `position` is realized and at or after the first visible row.
    fn is_realized(&self, position: usize) -> bool {
        position >= self.first_visible_position() && self.item_bounds(position).is_some()
    }
}
