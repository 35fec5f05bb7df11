//! A recording list surface for driving `DragListView` without a toolkit.
//!
//! Rows have a uniform height and start at the top of the viewport. The
//! surface records every command it receives but never scrolls itself, so
//! positions stay put for the whole test.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use draglist::prelude::*;

pub const ROW_HEIGHT: f32 = 50.0;
pub const WIDTH: f32 = 300.0;
pub const HEIGHT: f32 = 500.0;
pub const ORIGIN: Point = Point::new(20.0, 100.0);

/// Installs a test subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("draglist=trace,draglist_core=debug")
        .with_test_writer()
        .try_init();
}

/// A command the view sent to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    ScrollTo(usize, f32),
    SetVisible(usize, bool),
    SetAlpha(usize, f32),
    SetScrollX(usize, f32),
    Capture(usize),
    ShowOverlay(Point, f32),
    MoveOverlay(Point),
    HideOverlay,
}

/// A captured row image. Counts itself in `live` until dropped.
#[derive(Debug)]
pub struct FakeSnapshot {
    pub position: usize,
    live: Arc<AtomicUsize>,
}

impl Drop for FakeSnapshot {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct FakeSurface {
    pub headers: usize,
    pub fail_capture: bool,
    pub calls: Vec<Call>,
    pub overlay: Option<Point>,
    rows: Arc<AtomicUsize>,
    invalidations: Arc<AtomicUsize>,
    live_snapshots: Arc<AtomicUsize>,
    alpha: HashMap<usize, f32>,
    visible: HashMap<usize, bool>,
    scroll_x: HashMap<usize, f32>,
}

impl FakeSurface {
    pub fn new(headers: usize, data_rows: usize) -> Self {
        Self {
            headers,
            fail_capture: false,
            calls: Vec::new(),
            overlay: None,
            rows: Arc::new(AtomicUsize::new(data_rows)),
            invalidations: Arc::new(AtomicUsize::new(0)),
            live_snapshots: Arc::new(AtomicUsize::new(0)),
            alpha: HashMap::new(),
            visible: HashMap::new(),
            scroll_x: HashMap::new(),
        }
    }

    /// Keeps the surface's row count in step with `store`, the way a host
    /// list invalidates itself on `data_changed`.
    pub fn follow(&self, store: &Arc<ListStore<&'static str>>) {
        let rows = self.rows.clone();
        let invalidations = self.invalidations.clone();
        let weak: Weak<ListStore<&'static str>> = Arc::downgrade(store);
        store.signals().data_changed.connect(move |_| {
            if let Some(store) = weak.upgrade() {
                rows.store(store.len(), Ordering::SeqCst);
            }
            invalidations.fetch_add(1, Ordering::SeqCst);
        });
    }

    fn total_rows(&self) -> usize {
        self.headers + self.rows.load(Ordering::SeqCst)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub fn live_snapshots(&self) -> usize {
        self.live_snapshots.load(Ordering::SeqCst)
    }

    pub fn alpha_of(&self, position: usize) -> f32 {
        self.alpha.get(&position).copied().unwrap_or(1.0)
    }

    pub fn scroll_x_of(&self, position: usize) -> f32 {
        self.scroll_x.get(&position).copied().unwrap_or(0.0)
    }

    pub fn is_visible(&self, position: usize) -> bool {
        self.visible.get(&position).copied().unwrap_or(true)
    }

    /// Sets a row's opacity without recording a call.
    pub fn preset_alpha(&mut self, position: usize, alpha: f32) {
        self.alpha.insert(position, alpha);
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl ListSurface for FakeSurface {
    type Snapshot = FakeSnapshot;

    fn position_at(&self, point: Point) -> Option<usize> {
        if point.x < 0.0 || point.x >= WIDTH || point.y < 0.0 || point.y >= HEIGHT {
            return None;
        }
        let position = (point.y / ROW_HEIGHT) as usize;
        (position < self.total_rows()).then_some(position)
    }

    fn item_bounds(&self, position: usize) -> Option<Rect> {
        let top = position as f32 * ROW_HEIGHT;
        (position < self.total_rows() && top < HEIGHT)
            .then(|| Rect::new(0.0, top, WIDTH, ROW_HEIGHT))
    }

    fn scroll_to_position_with_offset(&mut self, position: usize, offset: f32) {
        self.calls.push(Call::ScrollTo(position, offset));
    }

    fn set_item_visibility(&mut self, position: usize, visible: bool) {
        self.visible.insert(position, visible);
        self.calls.push(Call::SetVisible(position, visible));
    }

    fn item_alpha(&self, position: usize) -> Option<f32> {
        self.item_bounds(position).map(|_| self.alpha_of(position))
    }

    fn set_item_alpha(&mut self, position: usize, alpha: f32) {
        self.alpha.insert(position, alpha);
        self.calls.push(Call::SetAlpha(position, alpha));
    }

    fn set_item_scroll_x(&mut self, position: usize, scroll_x: f32) {
        self.scroll_x.insert(position, scroll_x);
        self.calls.push(Call::SetScrollX(position, scroll_x));
    }

    fn first_visible_position(&self) -> usize {
        0
    }

    fn header_count(&self) -> usize {
        self.headers
    }

    fn is_fully_visible(&self) -> bool {
        (self.total_rows() as f32) * ROW_HEIGHT < HEIGHT
    }

    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }

    fn global_origin(&self) -> Point {
        ORIGIN
    }

    fn capture_snapshot(&mut self, position: usize) -> Option<FakeSnapshot> {
        self.calls.push(Call::Capture(position));
        if self.fail_capture {
            return None;
        }
        self.live_snapshots.fetch_add(1, Ordering::SeqCst);
        Some(FakeSnapshot {
            position,
            live: self.live_snapshots.clone(),
        })
    }

    fn show_overlay_snapshot(&mut self, _snapshot: &FakeSnapshot, at: Point, alpha: f32) {
        self.overlay = Some(at);
        self.calls.push(Call::ShowOverlay(at, alpha));
    }

    fn update_overlay_position(&mut self, at: Point) {
        self.overlay = Some(at);
        self.calls.push(Call::MoveOverlay(at));
    }

    fn hide_overlay_snapshot(&mut self) {
        self.overlay = None;
        self.calls.push(Call::HideOverlay);
    }
}

pub type TestList = DragListView<&'static str, FakeSurface>;

/// A view over `items` with `headers` header rows, plus the backing store.
pub fn setup(items: &[&'static str], headers: usize) -> (TestList, Arc<ListStore<&'static str>>) {
    init_tracing();
    let store = Arc::new(ListStore::new(items.to_vec()));
    let surface = FakeSurface::new(headers, items.len());
    surface.follow(&store);
    let model: Arc<dyn ItemModel<&'static str>> = store.clone();
    let list = DragListView::new(surface, DragListConfig::default())
        .with_model(model)
        .unwrap();
    (list, store)
}

/// Twenty items: a list taller than the viewport.
pub fn long_items() -> Vec<&'static str> {
    vec![
        "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13",
        "r14", "r15", "r16", "r17", "r18", "r19",
    ]
}

/// Records every `data_mutated` emission.
pub fn record_mutations(list: &TestList) -> Arc<parking_lot::Mutex<Vec<DataMutation>>> {
    let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log_clone = log.clone();
    list.data_mutated
        .connect(move |mutation| log_clone.lock().push(*mutation));
    log
}

/// A fixed test clock.
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    pub fn down(&self, ms: u64, x: f32, y: f32) -> PointerEvent {
        PointerEvent::down(x, y, self.at(ms))
    }

    pub fn moved(&self, ms: u64, x: f32, y: f32) -> PointerEvent {
        PointerEvent::moved(x, y, self.at(ms))
    }

    pub fn up(&self, ms: u64, x: f32, y: f32) -> PointerEvent {
        PointerEvent::up(x, y, self.at(ms))
    }

    pub fn cancel(&self, ms: u64, x: f32, y: f32) -> PointerEvent {
        PointerEvent::cancel(x, y, self.at(ms))
    }
}
