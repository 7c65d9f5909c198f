//! In-memory host: an element tree that records styles, and a scheduler
//! driven by a virtual clock.
//!
//! Useful for computing grid layouts without a browser and for exercising the
//! lifecycle deterministically. Both types are cheap handles over shared
//! state, so a caller can keep a clone while the grid owns another.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use magic_grid_core::{ElementTree, HostError, Scheduler, Size, Style, StyleSink};

/// Handle to an element in a [`HeadlessDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    selector: Option<String>,
    size: Size,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    styles: BTreeMap<&'static str, String>,
}

#[derive(Debug, Default)]
struct DocumentState {
    nodes: Vec<NodeData>,
    style_writes: usize,
}

/// Element tree with fixed, caller-controlled sizes.
///
/// Selectors match exactly against the string a node was registered with;
/// the first registered node wins.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container reachable through `selector`.
    pub fn add_container(&self, selector: impl Into<String>, width: f64) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.nodes.push(NodeData {
            selector: Some(selector.into()),
            size: Size::new(width, 0.0),
            ..Default::default()
        });
        NodeId(state.nodes.len() - 1)
    }

    /// Append a child of the given size to `parent`.
    pub fn append_item(&self, parent: NodeId, size: Size) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        state.nodes.push(NodeData {
            size,
            parent: Some(parent),
            ..Default::default()
        });
        state.nodes[parent.0].children.push(id);
        id
    }

    /// Detach `node` from its parent.
    pub fn remove(&self, node: NodeId) {
        let mut state = self.state.borrow_mut();
        if let Some(parent) = state.nodes[node.0].parent.take() {
            state.nodes[parent.0].children.retain(|&child| child != node);
        }
    }

    /// Change the rendered size of `node`.
    pub fn set_size(&self, node: NodeId, size: Size) {
        self.state.borrow_mut().nodes[node.0].size = size;
    }

    /// Change only the width of `node`, as a viewport resize would.
    pub fn set_width(&self, node: NodeId, width: f64) {
        self.state.borrow_mut().nodes[node.0].size.width = width;
    }

    /// Last value written for a CSS property on `node`.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.state.borrow().nodes[node.0].styles.get(property).cloned()
    }

    /// Total number of style directives received so far.
    pub fn style_writes(&self) -> usize {
        self.state.borrow().style_writes
    }
}

impl ElementTree for HeadlessDocument {
    type Node = NodeId;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|node| node.selector.as_deref() == Some(selector))
            .map(NodeId)
    }

    fn children(&self, container: &NodeId) -> Vec<NodeId> {
        self.state.borrow().nodes[container.0].children.clone()
    }

    fn measure(&self, node: &NodeId) -> Size {
        self.state.borrow().nodes[node.0].size
    }
}

impl StyleSink for HeadlessDocument {
    type Node = NodeId;

    fn set_style(&self, node: &NodeId, style: &Style) {
        let mut state = self.state.borrow_mut();
        state.style_writes += 1;
        state.nodes[node.0].styles.insert(style.property(), style.value());
    }
}

/// Handle to a timer or listener registered with a [`ManualScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

enum Task {
    Interval {
        period: Duration,
        callback: Option<Box<dyn FnMut()>>,
    },
    Timeout(Option<Box<dyn FnOnce()>>),
}

struct Timer {
    due: Duration,
    task: Task,
}

enum Due {
    Interval(Box<dyn FnMut()>),
    Timeout(Box<dyn FnOnce()>),
}

#[derive(Default)]
struct SchedulerState {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
    /// `None` while the listener is running
    resize_listeners: BTreeMap<TimerId, Option<Box<dyn FnMut()>>>,
}

impl SchedulerState {
    fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Scheduler whose clock only moves when told to.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Move the clock forward, running every timer that falls due on the way
    /// in due order (registration order on ties).
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now + by;

        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(id, timer)| (timer.due, **id))
                    .map(|(id, timer)| (*id, timer.due));
                let Some((id, at)) = next else {
                    break;
                };
                state.now = at;

                let is_timeout = matches!(
                    state.timers.get(&id).map(|timer| &timer.task),
                    Some(Task::Timeout(_))
                );
                if is_timeout {
                    match state.timers.remove(&id).map(|timer| timer.task) {
                        Some(Task::Timeout(Some(callback))) => Some((id, Due::Timeout(callback))),
                        _ => None,
                    }
                } else {
                    match state.timers.get_mut(&id).map(|timer| &mut timer.task) {
                        Some(Task::Interval { callback, .. }) => {
                            callback.take().map(|callback| (id, Due::Interval(callback)))
                        }
                        _ => None,
                    }
                }
            };

            match due {
                Some((_, Due::Timeout(callback))) => callback(),
                Some((id, Due::Interval(mut callback))) => {
                    callback();
                    // Re-arm unless the callback cleared its own interval.
                    let mut state = self.state.borrow_mut();
                    if let Some(timer) = state.timers.get_mut(&id) {
                        if let Task::Interval { period, callback: slot } = &mut timer.task {
                            *slot = Some(callback);
                            timer.due += *period;
                        }
                    }
                }
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
    }

    /// Shorthand for [`advance`](Self::advance) in milliseconds.
    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Deliver one resize event to every listener.
    pub fn fire_resize(&self) {
        let ids: Vec<TimerId> = self.state.borrow().resize_listeners.keys().copied().collect();

        for id in ids {
            let callback = self
                .state
                .borrow_mut()
                .resize_listeners
                .get_mut(&id)
                .and_then(Option::take);
            let Some(mut callback) = callback else {
                continue;
            };
            callback();
            if let Some(slot) = self.state.borrow_mut().resize_listeners.get_mut(&id) {
                *slot = Some(callback);
            }
        }
    }

    /// Number of registered intervals.
    pub fn active_intervals(&self) -> usize {
        self.count(|task| matches!(task, Task::Interval { .. }))
    }

    /// Number of timeouts that have neither fired nor been cleared.
    pub fn pending_timeouts(&self) -> usize {
        self.count(|task| matches!(task, Task::Timeout(_)))
    }

    pub fn resize_listeners(&self) -> usize {
        self.state.borrow().resize_listeners.len()
    }

    fn count(&self, predicate: impl Fn(&Task) -> bool) -> usize {
        self.state
            .borrow()
            .timers
            .values()
            .filter(|timer| predicate(&timer.task))
            .count()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("timers", &state.timers.len())
            .field("resize_listeners", &state.resize_listeners.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn set_interval(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<TimerId, HostError> {
        if period.is_zero() {
            return Err(HostError::Scheduler {
                reason: "interval period must be greater than zero".to_string(),
            });
        }
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let due = state.now + period;
        state.timers.insert(
            id,
            Timer {
                due,
                task: Task::Interval {
                    period,
                    callback: Some(callback),
                },
            },
        );
        Ok(id)
    }

    fn clear_interval(&self, handle: TimerId) {
        self.state.borrow_mut().timers.remove(&handle);
    }

    fn set_timeout(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<TimerId, HostError> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let due = state.now + delay;
        state.timers.insert(
            id,
            Timer {
                due,
                task: Task::Timeout(Some(callback)),
            },
        );
        Ok(id)
    }

    fn clear_timeout(&self, handle: TimerId) {
        self.state.borrow_mut().timers.remove(&handle);
    }

    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<TimerId, HostError> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.resize_listeners.insert(id, Some(callback));
        Ok(id)
    }

    fn remove_resize_listener(&self, handle: TimerId) {
        self.state.borrow_mut().resize_listeners.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_query_and_children() {
        let doc = HeadlessDocument::new();
        let grid = doc.add_container(".grid", 800.0);
        let a = doc.append_item(grid, Size::new(100.0, 50.0));
        let b = doc.append_item(grid, Size::new(100.0, 70.0));

        assert_eq!(doc.query_selector(".grid"), Some(grid));
        assert_eq!(doc.query_selector(".missing"), None);
        assert_eq!(doc.children(&grid), vec![a, b]);

        doc.remove(a);
        assert_eq!(doc.children(&grid), vec![b]);
        assert_eq!(doc.measure(&b), Size::new(100.0, 70.0));
    }

    #[test]
    fn test_style_recording() {
        let doc = HeadlessDocument::new();
        let grid = doc.add_container(".grid", 800.0);

        doc.set_style(&grid, &Style::Height(120.0));
        doc.set_style(&grid, &Style::Height(240.0));

        assert_eq!(doc.style(grid, "height").as_deref(), Some("240px"));
        assert_eq!(doc.style(grid, "left"), None);
        assert_eq!(doc.style_writes(), 2);
    }

    #[test]
    fn test_interval_runs_until_cleared() {
        let scheduler = ManualScheduler::new();
        let ticks = Rc::new(Cell::new(0));

        let counter = ticks.clone();
        let id = scheduler
            .set_interval(Duration::from_millis(100), Box::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        scheduler.advance_ms(350);
        assert_eq!(ticks.get(), 3);

        scheduler.clear_interval(id);
        scheduler.advance_ms(500);
        assert_eq!(ticks.get(), 3);
        assert_eq!(scheduler.active_intervals(), 0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let scheduler = ManualScheduler::new();
        assert!(scheduler.set_interval(Duration::ZERO, Box::new(|| {})).is_err());
    }

    #[test]
    fn test_timeout_fires_once() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(0));

        let counter = fired.clone();
        scheduler
            .set_timeout(Duration::from_millis(200), Box::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        scheduler.advance_ms(199);
        assert_eq!(fired.get(), 0);
        assert_eq!(scheduler.pending_timeouts(), 1);

        scheduler.advance_ms(1);
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.pending_timeouts(), 0);

        scheduler.advance_ms(1000);
        assert_eq!(fired.get(), 1);
        assert_eq!(scheduler.now(), Duration::from_millis(1200));
    }

    #[test]
    fn test_resize_listeners() {
        let scheduler = ManualScheduler::new();
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let id = scheduler
            .on_resize(Box::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        scheduler.fire_resize();
        scheduler.fire_resize();
        assert_eq!(calls.get(), 2);

        scheduler.remove_resize_listener(id);
        scheduler.fire_resize();
        assert_eq!(calls.get(), 2);
        assert_eq!(scheduler.resize_listeners(), 0);
    }
}
