//! The drag list gesture state machine.
//!
//! [`DragListView`] turns a single-pointer event stream into one of three
//! interactions on top of a host [`ListSurface`]:
//!
//! - **Idle / scroll**: the host's own scrolling and click handling run;
//!   every event is passed through.
//! - **Dragging**: a pointer-down in the drag handle zone (the right quarter
//!   of the row by default) lifts the row into a floating snapshot. Crossing
//!   into another row swaps the two items in the model immediately.
//! - **Deleting**: a mostly horizontal leftward swipe slides the row out
//!   and fades it. On release the row either springs back or settles out
//!   and is removed from the model.
//!
//! The view never reads the clock. Pointer events carry their timestamp,
//! and the host calls [`DragListView::tick`] once per frame while
//! [`DragListView::is_animating`] is true and whenever
//! [`DragListView::next_deadline`] passes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use draglist_core::logging::{span_names, targets};
use draglist_core::{
    ConnectionId, DragListError, PerfSpan, Point, Result, Signal, TimerManager, lerp, lerp_int,
    percent_of_range,
};

use crate::config::DragListConfig;
use crate::model::{DataMutation, ItemModel, ModelSignals, ReorderModel};

use super::events::{PointerEvent, PointerPhase};
use super::session::{DeleteState, DragState, GestureMode, GestureSession, SessionMode};
use super::settle::SettleAnimation;
use super::surface::ListSurface;

/// Actions deferred through the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    /// Hide the dragged row once its snapshot is on screen.
    HideDraggedRow,
}

/// Connections to the structural signals of the attached model.
#[derive(Debug, Clone, Copy)]
struct ModelWatch {
    swapped: ConnectionId,
    inserted: ConnectionId,
    removed: ConnectionId,
    reset: ConnectionId,
}

impl ModelWatch {
    /// Raises `changed` on every structural change of the model.
    fn connect(signals: &ModelSignals, changed: &Arc<AtomicBool>) -> Self {
        let flag = changed.clone();
        let swapped = signals
            .rows_swapped
            .connect(move |_| flag.store(true, Ordering::SeqCst));
        let flag = changed.clone();
        let inserted = signals
            .rows_inserted
            .connect(move |_| flag.store(true, Ordering::SeqCst));
        let flag = changed.clone();
        let removed = signals
            .rows_removed
            .connect(move |_| flag.store(true, Ordering::SeqCst));
        let flag = changed.clone();
        let reset = signals
            .model_reset
            .connect(move |_| flag.store(true, Ordering::SeqCst));
        Self {
            swapped,
            inserted,
            removed,
            reset,
        }
    }

    fn disconnect(self, signals: &ModelSignals) {
        signals.rows_swapped.disconnect(self.swapped);
        signals.rows_inserted.disconnect(self.inserted);
        signals.rows_removed.disconnect(self.removed);
        signals.model_reset.disconnect(self.reset);
    }
}

/// Opacity of a row being swiped away: `base_alpha` at rest, fading
/// linearly to fully transparent at one row width.
pub fn delete_alpha(base_alpha: f32, scroll_x: f32, width: f32) -> f32 {
    if scroll_x >= width {
        return 0.0;
    }
    percent_of_range(0.0, width, scroll_x.max(0.0))
        .map_or(base_alpha, |p| lerp(base_alpha, 0.0, p))
}

/// A list with long-press drag reordering and swipe-to-delete.
///
/// # Type Parameters
///
/// - `T`: the item type of the attached model.
/// - `S`: the host surface the view drives.
///
/// # Signals
///
/// - `item_clicked(usize)`: a row was clicked (data index)
/// - `item_long_clicked(usize)`: a row was long-clicked (data index)
/// - `data_mutated(DataMutation)`: the view changed the model
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use draglist::prelude::*;
///
/// let store = Arc::new(ListStore::new(vec!["a", "b", "c"]));
/// let mut list = DragListView::new(host_surface, DragListConfig::default())
///     .with_model(store.clone())?;
///
/// list.data_mutated.connect(|change| println!("{change:?}"));
///
/// // From the host's input handler:
/// if !list.handle_pointer(&event) {
///     host_surface_default_scroll(&event);
/// }
/// ```
pub struct DragListView<T: 'static, S: ListSurface> {
    surface: S,
    config: DragListConfig,
    model: Option<Arc<dyn ItemModel<T>>>,
    session: Option<GestureSession<S::Snapshot>>,
    settle: Option<SettleAnimation>,
    timers: TimerManager<DeferredAction>,
    /// Raised by any structural model change; cleared after the view's own.
    model_changed: Arc<AtomicBool>,
    watch: Option<ModelWatch>,

    // Signals
    /// Emitted when a row is clicked, with its data index.
    pub item_clicked: Signal<usize>,
    /// Emitted when a row is long-clicked, with its data index.
    pub item_long_clicked: Signal<usize>,
    /// Emitted after every swap, removal, insertion or reset the view performs.
    pub data_mutated: Signal<DataMutation>,
}

impl<T: 'static, S: ListSurface> DragListView<T, S> {
    /// Creates a view over `surface` with no model attached.
    pub fn new(surface: S, config: DragListConfig) -> Self {
        Self {
            surface,
            config,
            model: None,
            session: None,
            settle: None,
            timers: TimerManager::new(),
            model_changed: Arc::new(AtomicBool::new(false)),
            watch: None,
            item_clicked: Signal::new(),
            item_long_clicked: Signal::new(),
            data_mutated: Signal::new(),
        }
    }

    /// Attaches a model using builder pattern.
    pub fn with_model(mut self, model: Arc<dyn ItemModel<T>>) -> Result<Self> {
        self.set_model(model)?;
        Ok(self)
    }

    /// Attaches a model.
    ///
    /// Fails with [`DragListError::AdapterTypeMismatch`] if the model does
    /// not implement [`ReorderModel`]. Any live gesture is cancelled and a
    /// running settle is finished against the previous model first.
    ///
    /// The view watches the model's structural signals. A change made behind
    /// its back abandons the live gesture and any running settle.
    pub fn set_model(&mut self, model: Arc<dyn ItemModel<T>>) -> Result<()> {
        if model.as_reorderable().is_none() {
            let err = DragListError::adapter_mismatch(
                "the model must implement ReorderModel (swap, remove, insert)",
            );
            tracing::error!(target: targets::GESTURE, %err, "model rejected");
            return Err(err);
        }

        self.sync_with_model();
        self.cancel_session();
        self.finish_settle();

        if let (Some(old), Some(watch)) = (&self.model, self.watch.take()) {
            watch.disconnect(old.signals());
        }
        self.watch = Some(ModelWatch::connect(model.signals(), &self.model_changed));
        self.model_changed.store(false, Ordering::SeqCst);
        self.model = Some(model);
        Ok(())
    }

    /// The attached model.
    pub fn model(&self) -> Option<&Arc<dyn ItemModel<T>>> {
        self.model.as_ref()
    }

    pub fn config(&self) -> &DragListConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Caps the auto-scroll bias. Non-positive values are ignored.
    pub fn set_auto_scroll_max_distance(&mut self, distance: f32) {
        if distance > 0.0 {
            self.config.auto_scroll_max_distance = distance;
        }
    }

    pub fn auto_scroll_max_distance(&self) -> f32 {
        self.config.auto_scroll_max_distance
    }

    /// The current interaction mode.
    pub fn mode(&self) -> GestureMode {
        self.session
            .as_ref()
            .map_or(GestureMode::Idle, GestureSession::gesture_mode)
    }

    /// Whether a pointer gesture is being tracked.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the current gesture was recognized as a vertical scroll.
    pub fn is_scrolling(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(GestureSession::is_scrolling)
    }

    /// Whether a settle animation needs per-frame ticks.
    pub fn is_animating(&self) -> bool {
        self.settle.is_some()
    }

    /// The earliest moment [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        let timer = self.timers.next_deadline();
        let settle = self.settle.as_ref().map(SettleAnimation::deadline);
        match (timer, settle) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Dispatches a pointer event by phase.
    ///
    /// Returns `true` if the view consumed the event. `false` means the host
    /// should apply its default scroll/click behavior.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let _perf = PerfSpan::new(span_names::POINTER);
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(event),
            PointerPhase::Move => self.on_pointer_move(event),
            PointerPhase::Up => self.on_pointer_up(event),
            PointerPhase::Cancel => self.on_pointer_cancel(event),
        }
    }

    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> bool {
        self.sync_with_model();
        if self.session.is_some() {
            tracing::warn!(
                target: targets::GESTURE,
                "pointer-down while a gesture is live, resetting session"
            );
            self.cancel_session();
        }
        self.finish_settle();

        let anchor = match self.row_position_at(event.pos) {
            Ok(anchor) => anchor,
            Err(err) => {
                tracing::trace!(target: targets::GESTURE, %err, "pointer-down passed through");
                return false;
            }
        };

        let mut session = GestureSession::new(event.pos, anchor);
        session.velocity.add_sample(event.timestamp, event.pos.x);

        let handle_start = self.surface.size().width * self.config.drag_handle_start;
        let mut consumed = false;
        if event.pos.x >= handle_start {
            if let Some(drag) = self.start_drag(anchor, event) {
                session.mode = SessionMode::Dragging(drag);
                consumed = true;
            }
        }

        self.session = Some(session);
        consumed
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> bool {
        self.sync_with_model();
        let Some(mut session) = self.session.take() else {
            return false;
        };
        session.current = event.pos;
        session.velocity.add_sample(event.timestamp, event.pos.x);

        let consumed = match session.gesture_mode() {
            GestureMode::Dragging => {
                if let SessionMode::Dragging(drag) = &mut session.mode {
                    self.update_drag(drag, event.pos);
                }
                true
            }
            GestureMode::Deleting => {
                let scroll_x = session.scroll_x();
                if let SessionMode::Deleting(state) = &mut session.mode {
                    self.update_delete(state, scroll_x);
                }
                true
            }
            GestureMode::Idle if session.is_scrolling() => false,
            GestureMode::Idle => self.detect_delete(&mut session, event.pos),
        };

        self.session = Some(session);
        consumed
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> bool {
        self.sync_with_model();
        let Some(session) = self.session.take() else {
            return false;
        };

        match session.mode {
            SessionMode::Dragging(drag) => {
                self.stop_drag(drag);
                true
            }
            SessionMode::Deleting(state) => {
                self.release_delete(state, session.velocity.velocity_per_100ms(), event.timestamp);
                true
            }
            SessionMode::Idle { .. } => false,
        }
    }

    /// Ends the gesture without committing anything.
    ///
    /// A drag keeps the exchanges it already made. A delete springs back.
    pub fn on_pointer_cancel(&mut self, _event: &PointerEvent) -> bool {
        self.sync_with_model();
        self.cancel_session()
    }

    // =========================================================================
    // Host click routing
    // =========================================================================

    /// Routes a click recognized by the host at surface `position`.
    pub fn on_item_click(&mut self, position: usize) -> bool {
        self.sync_with_model();
        if self.gesture_in_progress() {
            return false;
        }
        let Some(position) = self.valid_position(Some(position)) else {
            return false;
        };
        self.item_clicked.emit(position - self.surface.header_count());
        true
    }

    /// Routes a long-click recognized by the host at surface `position`.
    ///
    /// Suppressed (returns `false`) while dragging or deleting. Otherwise it
    /// also disables delete detection for the rest of the current gesture.
    pub fn on_item_long_click(&mut self, position: usize) -> bool {
        self.sync_with_model();
        if self.gesture_in_progress() {
            tracing::debug!(target: targets::GESTURE, position, "long-click suppressed during gesture");
            return false;
        }
        let Some(position) = self.valid_position(Some(position)) else {
            return false;
        };
        self.set_long_click_flag();
        self.item_long_clicked.emit(position - self.surface.header_count());
        true
    }

    /// Disables delete detection until the pointer is released.
    pub fn set_long_click_flag(&mut self) {
        if let Some(session) = &mut self.session {
            session.long_click_flag = true;
        }
    }

    /// Re-enables delete detection for the current gesture.
    pub fn reset_long_click_flag(&mut self) {
        if let Some(session) = &mut self.session {
            session.long_click_flag = false;
        }
    }

    // =========================================================================
    // Frame and timer driving
    // =========================================================================

    /// Delivers expired deferred actions and advances the settle animation.
    pub fn tick(&mut self, now: Instant) {
        self.sync_with_model();
        for (_, action) in self.timers.process_expired(now) {
            match action {
                DeferredAction::HideDraggedRow => self.hide_dragged_row(),
            }
        }

        let Some(settle) = &self.settle else {
            return;
        };
        let _perf = PerfSpan::new(span_names::SETTLE);
        let frame = settle.sample(now);
        self.surface.set_item_scroll_x(settle.position, frame.offset);
        tracing::trace!(target: targets::ANIMATION, offset = frame.offset, "settle frame");

        if frame.finished {
            if let Some(settle) = self.settle.take() {
                self.complete_settle(settle);
            }
        }
    }

    // =========================================================================
    // Model mutation
    // =========================================================================

    /// Inserts `item` at data index `row`.
    pub fn insert_item(&mut self, row: usize, item: T) -> Result<()> {
        self.settle_before_mutation();
        self.reorder()?.insert_row(row, item)?;
        self.model_changed.store(false, Ordering::SeqCst);
        self.data_mutated.emit(DataMutation::Inserted { row });
        Ok(())
    }

    /// Removes and returns the item at data index `row`.
    pub fn remove_item(&mut self, row: usize) -> Result<T> {
        self.settle_before_mutation();
        let item = self.reorder()?.remove_row(row)?;
        self.model_changed.store(false, Ordering::SeqCst);
        self.data_mutated.emit(DataMutation::Removed { row });
        Ok(item)
    }

    /// Replaces every item.
    pub fn replace_items(&mut self, items: Vec<T>) -> Result<()> {
        self.settle_before_mutation();
        let len = items.len();
        self.reorder()?.replace_all(items);
        self.model_changed.store(false, Ordering::SeqCst);
        self.data_mutated.emit(DataMutation::Reset { len });
        Ok(())
    }

    // =========================================================================
    // Dragging
    // =========================================================================

    fn start_drag(&mut self, anchor: usize, event: &PointerEvent) -> Option<DragState<S::Snapshot>> {
        let Some(bounds) = self.surface.item_bounds(anchor) else {
            tracing::debug!(target: targets::GESTURE, anchor, "drag not started, row not realized");
            return None;
        };
        let Some(snapshot) = self.surface.capture_snapshot(anchor) else {
            tracing::debug!(target: targets::GESTURE, anchor, "drag not started, snapshot capture failed");
            return None;
        };

        let origin = self.surface.global_origin();
        let height = self.surface.size().height;
        let item_height = bounds.height();
        let fallback_max_y = origin.y + height - item_height;
        let max_y = if self.surface.is_fully_visible() {
            self.last_position()
                .and_then(|last| self.surface.item_bounds(last))
                .map_or(fallback_max_y, |last| origin.y + last.top())
        } else {
            fallback_max_y
        };

        let hide_timer =
            self.timers
                .start_one_shot(event.timestamp, self.config.hide_delay(), DeferredAction::HideDraggedRow);

        let drag = DragState {
            from: anchor,
            to: anchor,
            touch_offset: event.pos - bounds.top_left(),
            item_height,
            min_y: origin.y,
            max_y,
            overlay_x: origin.x + bounds.left(),
            snapshot,
            hide_timer: Some(hide_timer),
        };

        let y = drag.clamp_y(origin.y + event.pos.y - drag.touch_offset.y);
        self.surface.show_overlay_snapshot(
            &drag.snapshot,
            Point::new(drag.overlay_x, y),
            self.config.snapshot_alpha,
        );

        tracing::debug!(target: targets::GESTURE, anchor, min_y = drag.min_y, max_y = drag.max_y, "drag started");
        Some(drag)
    }

    fn update_drag(&mut self, drag: &mut DragState<S::Snapshot>, pos: Point) {
        let origin = self.surface.global_origin();
        let y = drag.clamp_y(origin.y + pos.y - drag.touch_offset.y);
        self.surface
            .update_overlay_position(Point::new(drag.overlay_x, y));

        // An invalid position keeps the last valid target.
        if let Some(position) = self.valid_position(self.surface.position_at(pos)) {
            drag.to = position;
        }

        if drag.from != drag.to && self.exchange(drag.from, drag.to) {
            drag.from = drag.to;
        }

        self.auto_scroll(drag, pos.y);
        tracing::trace!(target: targets::GESTURE, from = drag.from, to = drag.to, overlay_y = y, "drag moved");
    }

    /// Swaps the rows at surface positions `from` and `to` in the model and
    /// moves the hidden slot along with the pointer.
    fn exchange(&mut self, from: usize, to: usize) -> bool {
        let headers = self.surface.header_count();
        let count = self.row_count();
        let (Some(a), Some(b)) = (from.checked_sub(headers), to.checked_sub(headers)) else {
            return false;
        };
        if a >= count || b >= count {
            return false;
        }

        self.commit_mutation(|model| model.swap_rows(a, b));
        self.surface.set_item_visibility(from, true);
        self.surface.set_item_visibility(to, false);
        self.data_mutated.emit(DataMutation::Swapped { a, b });

        tracing::debug!(target: targets::GESTURE, from, to, "rows exchanged");
        true
    }

    /// Nudges the list toward the edge the snapshot is pressed against.
    fn auto_scroll(&mut self, drag: &DragState<S::Snapshot>, pointer_y: f32) {
        let item_height = drag.item_height;
        let height = self.surface.size().height;
        let bias = self.config.effective_auto_scroll_bias() as i32;
        let drag_y = pointer_y - drag.touch_offset.y;

        let step = if drag_y < item_height {
            percent_of_range(item_height, 0.0, drag_y.max(0.0)).map(|p| lerp_int(0, bias, p))
        } else if drag_y > height - 2.0 * item_height {
            let value = (height - drag_y - item_height).max(0.0);
            percent_of_range(item_height, 0.0, value).map(|p| lerp_int(0, -bias, p))
        } else {
            None
        };

        let Some(step) = step else {
            return;
        };
        if !self.surface.is_realized(drag.to) {
            return;
        }
        let Some(bounds) = self.surface.item_bounds(drag.to) else {
            return;
        };

        let offset = bounds.top() + step as f32;
        self.surface.scroll_to_position_with_offset(drag.to, offset);
        tracing::trace!(target: targets::GESTURE, position = drag.to, offset, "auto-scroll");
    }

    fn stop_drag(&mut self, drag: DragState<S::Snapshot>) {
        if let Some(id) = drag.hide_timer {
            if self.timers.stop(id).is_err() {
                tracing::trace!(target: targets::GESTURE, "hide timer already fired");
            }
        }
        self.surface.set_item_visibility(drag.to, true);
        self.surface.hide_overlay_snapshot();
        tracing::debug!(target: targets::GESTURE, to = drag.to, "drag finished");
        // The snapshot is released when `drag` drops here.
    }

    fn hide_dragged_row(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        let anchor = session.anchor;
        if let SessionMode::Dragging(drag) = &mut session.mode {
            drag.hide_timer = None;
            if drag.to == anchor {
                self.surface.set_item_visibility(anchor, false);
                tracing::trace!(target: targets::GESTURE, anchor, "dragged row hidden");
            }
        }
    }

    // =========================================================================
    // Deleting
    // =========================================================================

    fn detect_delete(&mut self, session: &mut GestureSession<S::Snapshot>, pos: Point) -> bool {
        let dx = session.origin.x - pos.x;
        let dy = (pos.y - session.origin.y).abs();

        if !session.long_click_flag && dx >= self.config.delete_min_dx && dy <= self.config.delete_y_slop {
            let Some(mut state) = self.start_delete(session.anchor) else {
                return false;
            };
            self.update_delete(&mut state, session.scroll_x());
            session.mode = SessionMode::Deleting(state);
            return true;
        }

        if dy >= self.config.delete_y_slop {
            session.mode = SessionMode::Idle { scrolling: true };
            tracing::debug!(target: targets::GESTURE, dy, "vertical scroll recognized");
        }
        false
    }

    fn start_delete(&mut self, position: usize) -> Option<DeleteState> {
        let Some(bounds) = self.surface.item_bounds(position) else {
            tracing::debug!(target: targets::GESTURE, position, "delete not started, row not realized");
            return None;
        };
        let base_alpha = self.surface.item_alpha(position).unwrap_or(1.0);
        tracing::debug!(target: targets::GESTURE, position, base_alpha, "delete started");
        Some(DeleteState {
            position,
            base_alpha,
            width: bounds.width(),
            scroll_x: 0.0,
        })
    }

    fn update_delete(&mut self, state: &mut DeleteState, scroll_x: f32) {
        state.scroll_x = scroll_x;
        let alpha = delete_alpha(state.base_alpha, scroll_x, state.width);
        self.surface.set_item_scroll_x(state.position, scroll_x);
        self.surface.set_item_alpha(state.position, alpha);
        tracing::trace!(target: targets::GESTURE, scroll_x, alpha, "delete moved");
    }

    fn release_delete(&mut self, state: DeleteState, velocity: f32, now: Instant) {
        let threshold = self.config.delete_velocity_threshold();
        let past_fraction = state.scroll_x > state.width * self.config.delete_commit_fraction;

        if past_fraction || velocity < threshold {
            let settle = SettleAnimation::commit(
                state.position,
                state.scroll_x,
                state.width,
                state.base_alpha,
                now,
                self.config.settle_duration(),
            );
            tracing::debug!(
                target: targets::GESTURE,
                position = state.position,
                scroll_x = state.scroll_x,
                velocity,
                duration_ms = settle.duration().as_millis() as u64,
                "delete committed"
            );
            self.settle = Some(settle);
        } else {
            self.reset_row(state.position, state.base_alpha);
            tracing::debug!(target: targets::GESTURE, position = state.position, velocity, "delete cancelled");
        }
    }

    fn reset_row(&mut self, position: usize, alpha: f32) {
        self.surface.set_item_scroll_x(position, 0.0);
        self.surface.set_item_alpha(position, alpha);
    }

    fn complete_settle(&mut self, settle: SettleAnimation) {
        // Resetting the last row of a list that cannot scroll would flash
        // it back in just before it disappears.
        let skip_reset =
            self.surface.is_fully_visible() && self.last_position() == Some(settle.position);
        if !skip_reset {
            self.reset_row(settle.position, settle.restore_alpha);
        }

        let row = settle.position - self.surface.header_count();
        self.commit_mutation(|model| model.remove_row(row));
        self.data_mutated.emit(DataMutation::Removed { row });
        tracing::debug!(target: targets::ANIMATION, row, skip_reset, "settle finished, row removed");
    }

    /// Jumps a running settle to its end, performing its removal.
    fn finish_settle(&mut self) {
        let Some(settle) = self.settle.take() else {
            return;
        };
        let frame = settle.sample(settle.deadline());
        self.surface.set_item_scroll_x(settle.position, frame.offset);
        self.complete_settle(settle);
    }

    fn settle_before_mutation(&mut self) {
        self.sync_with_model();
        self.cancel_session();
        self.finish_settle();
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Ends the live session on the cancel path. Returns `true` if a drag or
    /// delete was in progress.
    fn cancel_session(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        match session.mode {
            SessionMode::Dragging(drag) => {
                self.stop_drag(drag);
                true
            }
            SessionMode::Deleting(state) => {
                self.reset_row(state.position, state.base_alpha);
                tracing::debug!(target: targets::GESTURE, position = state.position, "delete cancelled");
                true
            }
            SessionMode::Idle { .. } => false,
        }
    }

    /// Abandons the live session and any running settle if the model was
    /// changed by someone other than this view.
    fn sync_with_model(&mut self) {
        if !self.model_changed.swap(false, Ordering::SeqCst) {
            return;
        }
        if self.session.is_none() && self.settle.is_none() {
            return;
        }

        tracing::warn!(target: targets::GESTURE, "model changed outside the view, abandoning gesture");
        self.cancel_session();
        if let Some(settle) = self.settle.take() {
            self.reset_row(settle.position, settle.restore_alpha);
            tracing::debug!(target: targets::ANIMATION, position = settle.position, "settle abandoned, nothing removed");
        }
    }

    fn gesture_in_progress(&self) -> bool {
        matches!(self.mode(), GestureMode::Dragging | GestureMode::Deleting)
    }

    fn row_count(&self) -> usize {
        self.model.as_ref().map_or(0, |model| model.row_count())
    }

    fn last_position(&self) -> Option<usize> {
        let count = self.row_count();
        (count > 0).then(|| self.surface.header_count() + count - 1)
    }

    /// The surface position of the data row under a list-local point.
    pub fn row_position_at(&self, point: Point) -> Result<usize> {
        self.valid_position(self.surface.position_at(point))
            .ok_or(DragListError::InvalidPosition {
                x: point.x,
                y: point.y,
            })
    }

    /// Keeps only positions that address a data row.
    fn valid_position(&self, position: Option<usize>) -> Option<usize> {
        let headers = self.surface.header_count();
        let count = self.row_count();
        position.filter(|&p| p >= headers && p < headers + count)
    }

    fn reorder(&self) -> Result<&dyn ReorderModel<T>> {
        self.model
            .as_deref()
            .and_then(|model| model.as_reorderable())
            .ok_or_else(|| DragListError::adapter_mismatch("no reorderable model attached"))
    }

    /// Applies a mutation the gesture logic has already bounds-checked.
    /// A failure means the view and the model disagree, which is fatal.
    fn commit_mutation<R>(&self, mutate: impl FnOnce(&dyn ReorderModel<T>) -> Result<R>) -> R {
        match self.reorder().and_then(mutate) {
            Ok(value) => {
                self.model_changed.store(false, Ordering::SeqCst);
                value
            }
            Err(err) => {
                tracing::error!(target: targets::MODEL, %err, "model mutation failed during gesture");
                panic!("drag list invariant violated: {err}");
            }
        }
    }
}

impl<T: 'static, S: ListSurface> Drop for DragListView<T, S> {
    fn drop(&mut self) {
        if let (Some(model), Some(watch)) = (&self.model, self.watch.take()) {
            watch.disconnect(model.signals());
        }
    }
}
