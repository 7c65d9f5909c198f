//! Lifecycle controller.
//!
//! Drives a grid from construction to steady state:
//!
//! ```text
//! Unstarted -> Initialized -> Listening
//!                   |              ^
//!                   +-> Polling ---+
//! ```
//!
//! Any state may move to `Disposed`. Host callbacks hold a `Weak` reference
//! to the engine state, so they turn into no-ops once the grid is gone.

use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

use magic_grid_core::{
    ConfigError, ElementTree, GridConfig, GridOptions, LayoutError, PositionMode, Scheduler, Size,
    Style, StyleSink, TRANSITION_HINT,
};
use magic_grid_layout::{is_ready, GridLayout, MasonryLayout};

/// Observable lifecycle state of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Configuration accepted, nothing queried yet
    Unstarted,
    /// Container queried; waiting to decide between direct start and polling
    Initialized,
    /// Waiting for all items to appear
    Polling,
    /// Laid out and following resize events
    Listening,
    /// Timers and subscriptions released
    Disposed,
}

enum Phase<H> {
    Unstarted,
    Initialized,
    Polling(H),
    Listening(H),
    Disposed,
}

impl<H> Phase<H> {
    fn state(&self) -> LifecycleState {
        match self {
            Self::Unstarted => LifecycleState::Unstarted,
            Self::Initialized => LifecycleState::Initialized,
            Self::Polling(_) => LifecycleState::Polling,
            Self::Listening(_) => LifecycleState::Listening,
            Self::Disposed => LifecycleState::Disposed,
        }
    }
}

struct Inner<T: ElementTree, S, C: Scheduler> {
    config: GridConfig,
    layout: MasonryLayout,
    tree: T,
    sink: S,
    scheduler: C,
    container: Option<T::Node>,
    items: Vec<T::Node>,
    /// Set once the one-time styles have been written
    started: bool,
    phase: Phase<C::Handle>,
    pending_relayout: Option<C::Handle>,
    last_layout: Option<GridLayout>,
}

impl<T: ElementTree, S, C: Scheduler> Inner<T, S, C> {
    fn dispose(&mut self) {
        match mem::replace(&mut self.phase, Phase::Disposed) {
            Phase::Polling(handle) => self.scheduler.clear_interval(handle),
            Phase::Listening(handle) => self.scheduler.remove_resize_listener(handle),
            Phase::Disposed => return,
            Phase::Unstarted | Phase::Initialized => {}
        }
        if let Some(pending) = self.pending_relayout.take() {
            self.scheduler.clear_timeout(pending);
        }
        tracing::debug!(container = self.config.container(), "grid disposed");
    }
}

impl<T, S, C> Inner<T, S, C>
where
    T: ElementTree,
    S: StyleSink<Node = T::Node>,
    C: Scheduler,
{
    /// Re-query the container and its children.
    fn refresh(&mut self) {
        self.container = self.tree.query_selector(self.config.container());
        self.items = match &self.container {
            Some(container) => self.tree.children(container),
            None => Vec::new(),
        };
    }

    fn ready(&self) -> bool {
        is_ready(
            self.config.completeness(),
            self.container.is_some(),
            self.items.len(),
        )
    }

    /// Write the one-time positioning styles.
    fn init_styles(&mut self) {
        if self.started || !self.ready() {
            return;
        }
        let Some(container) = &self.container else {
            return;
        };

        self.sink
            .set_style(container, &Style::Position(PositionMode::Relative));
        for item in &self.items {
            self.sink
                .set_style(item, &Style::Position(PositionMode::Absolute));
            if self.config.animate() {
                self.sink
                    .set_style(item, &Style::Transition(TRANSITION_HINT.to_string()));
            }
        }

        self.started = true;
        tracing::debug!(items = self.items.len(), "grid styles initialized");
    }

    /// Measure everything afresh, lay out, and write the offsets.
    fn run_pass(&mut self) -> Result<(), LayoutError> {
        let container = self
            .container
            .clone()
            .ok_or_else(|| LayoutError::ContainerMissing {
                selector: self.config.container().to_string(),
            })?;
        self.items = self.tree.children(&container);

        let width = self.tree.measure(&container).width;
        let sizes: Vec<Size> = self.items.iter().map(|item| self.tree.measure(item)).collect();
        let layout = self.layout.layout(width, &sizes)?;

        for placement in &layout.placements {
            let item = &self.items[placement.index];
            self.sink.set_style(item, &Style::Left(placement.left));
            self.sink.set_style(item, &Style::Top(placement.top));
        }
        self.sink.set_style(&container, &Style::Height(layout.height));

        self.last_layout = Some(layout);
        Ok(())
    }

    /// Lay out if the grid has started, starting it first when it can.
    ///
    /// A container that was missing at start is looked up again, and the
    /// one-time styles are written as soon as the grid is ready. Nothing is
    /// positioned before then.
    fn position_items(&mut self) {
        if self.container.is_none() {
            self.refresh();
        }
        self.init_styles();
        if !self.started {
            tracing::debug!(
                container = self.config.container(),
                "grid not ready; layout pass skipped"
            );
            return;
        }
        if let Err(err) = self.run_pass() {
            tracing::debug!(%err, "layout pass skipped");
        }
    }
}

impl<T, S, C> Inner<T, S, C>
where
    T: ElementTree + 'static,
    S: StyleSink<Node = T::Node> + 'static,
    C: Scheduler + 'static,
{
    /// Lay out now and follow resize events from here on.
    fn go_live(&mut self, this: Weak<RefCell<Self>>) {
        self.position_items();

        let on_resize = Box::new(move || Self::on_resize(&this));
        match self.scheduler.on_resize(on_resize) {
            Ok(handle) => {
                self.phase = Phase::Listening(handle);
                tracing::debug!(container = self.config.container(), "grid listening");
            }
            Err(err) => tracing::warn!(%err, "could not subscribe to resize events"),
        }
    }

    fn start_polling(&mut self, this: Weak<RefCell<Self>>) {
        let period = self.config.timings().poll_interval;
        let tick = Box::new(move || Self::poll_tick(&this));
        match self.scheduler.set_interval(period, tick) {
            Ok(handle) => {
                self.phase = Phase::Polling(handle);
                tracing::debug!(?period, "waiting for grid items");
            }
            Err(err) => tracing::warn!(%err, "could not start readiness polling"),
        }
    }

    fn poll_tick(this: &Weak<RefCell<Self>>) {
        let Some(rc) = this.upgrade() else {
            return;
        };
        let mut inner = rc.borrow_mut();
        if !matches!(inner.phase, Phase::Polling(_)) {
            return;
        }

        inner.refresh();
        if !inner.ready() {
            tracing::trace!(items = inner.items.len(), "grid not ready");
            return;
        }

        if let Phase::Polling(handle) = mem::replace(&mut inner.phase, Phase::Initialized) {
            inner.scheduler.clear_interval(handle);
        }
        inner.go_live(this.clone());
    }

    fn on_resize(this: &Weak<RefCell<Self>>) {
        let Some(rc) = this.upgrade() else {
            return;
        };
        let mut inner = rc.borrow_mut();
        if !matches!(inner.phase, Phase::Listening(_)) {
            return;
        }

        if let Some(pending) = inner.pending_relayout.take() {
            inner.scheduler.clear_timeout(pending);
        }

        let delay = inner.config.timings().resize_debounce;
        let weak = this.clone();
        let relayout = Box::new(move || Self::relayout_due(&weak));
        match inner.scheduler.set_timeout(delay, relayout) {
            Ok(handle) => inner.pending_relayout = Some(handle),
            Err(err) => {
                tracing::warn!(%err, "could not debounce resize; relayout now");
                inner.position_items();
            }
        }
    }

    fn relayout_due(this: &Weak<RefCell<Self>>) {
        let Some(rc) = this.upgrade() else {
            return;
        };
        let mut inner = rc.borrow_mut();
        // The timer has fired; its handle must not be cleared again.
        inner.pending_relayout = None;
        if matches!(inner.phase, Phase::Disposed) {
            return;
        }
        tracing::trace!("relayout after resize");
        inner.position_items();
    }
}

/// A masonry grid bound to a container in a host document.
///
/// Construction validates the options and starts the grid: it lays out at
/// once if every item is present, or polls until they are. Dropping the grid
/// disposes it.
pub struct MagicGrid<T: ElementTree, S, C: Scheduler> {
    inner: Rc<RefCell<Inner<T, S, C>>>,
}

impl<T, S, C> MagicGrid<T, S, C>
where
    T: ElementTree + 'static,
    S: StyleSink<Node = T::Node> + 'static,
    C: Scheduler + 'static,
{
    /// Validate `options` and start a grid.
    ///
    /// Fails only on invalid options, before touching the document.
    pub fn new(options: GridOptions, tree: T, sink: S, scheduler: C) -> Result<Self, ConfigError> {
        Ok(Self::with_config(options.validate()?, tree, sink, scheduler))
    }

    /// Start a grid from an already validated configuration.
    pub fn with_config(config: GridConfig, tree: T, sink: S, scheduler: C) -> Self {
        let inner = Inner {
            layout: MasonryLayout::from_config(&config),
            config,
            tree,
            sink,
            scheduler,
            container: None,
            items: Vec::new(),
            started: false,
            phase: Phase::Unstarted,
            pending_relayout: None,
            last_layout: None,
        };
        let grid = Self {
            inner: Rc::new(RefCell::new(inner)),
        };

        let this = Rc::downgrade(&grid.inner);
        {
            let mut inner = grid.inner.borrow_mut();
            inner.refresh();
            inner.phase = Phase::Initialized;
            inner.init_styles();

            if inner.ready() {
                inner.go_live(this);
            } else {
                inner.start_polling(this);
            }
        }

        grid
    }

    /// Recompute and apply the layout now.
    ///
    /// This is what a resize eventually triggers; call it after changing the
    /// grid's content programmatically. Does nothing while the grid is still
    /// waiting for its items, or once disposed.
    pub fn reposition(&self) {
        let mut inner = self.inner.borrow_mut();
        match inner.phase.state() {
            LifecycleState::Listening | LifecycleState::Initialized => inner.position_items(),
            LifecycleState::Polling => {
                tracing::debug!("grid still waiting for items; reposition ignored")
            }
            LifecycleState::Unstarted | LifecycleState::Disposed => {}
        }
    }
}

impl<T: ElementTree, S, C: Scheduler> MagicGrid<T, S, C> {
    /// Cancel polling, any pending relayout, and the resize subscription.
    pub fn dispose(&self) {
        self.inner.borrow_mut().dispose();
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.borrow().phase.state()
    }

    /// Whether the one-time styles have been applied.
    pub fn is_started(&self) -> bool {
        self.inner.borrow().started
    }

    /// Layout from the most recent successful pass.
    pub fn last_layout(&self) -> Option<GridLayout> {
        self.inner.borrow().last_layout.clone()
    }

    pub fn config(&self) -> GridConfig {
        self.inner.borrow().config.clone()
    }
}

impl<T: ElementTree, S, C: Scheduler> Drop for MagicGrid<T, S, C> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.dispose();
        }
    }
}

impl<T: ElementTree, S, C: Scheduler> std::fmt::Debug for MagicGrid<T, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("MagicGrid")
                .field("container", &inner.config.container())
                .field("state", &inner.phase.state())
                .field("started", &inner.started)
                .field("items", &inner.items.len())
                .finish_non_exhaustive(),
            Err(_) => f.debug_struct("MagicGrid").finish_non_exhaustive(),
        }
    }
}
