//! Highlighting a located field.
//!
//! At most one control is highlighted at a time. A highlight marks the
//! control, scrolls it into view, optionally shows a "ready to paste"
//! tooltip that removes itself after [`TOOLTIP_TIMEOUT`], and arms a one-shot
//! observer: the first value change reported through
//! [`Highlighter::on_input`] emits a [`FieldFilled`] event and clears the
//! highlight after [`CLEAR_AFTER_FILL`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::document::Document;
use super::matcher::locate;
use crate::error::LocatorError;

/// How long a value tooltip stays up.
pub const TOOLTIP_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay between a field being filled and its highlight being removed.
pub const CLEAR_AFTER_FILL: Duration = Duration::from_secs(1);

/// Handle to a tooltip created by a [`HighlightSurface`].
pub type TooltipId = u64;

// == Highlight Surface ==
/// Visual side effects a host page must provide.
///
/// Methods take `&self`; implementations mutate the page they wrap.
pub trait HighlightSurface: Document + Send + Sync + 'static {
    /// Applies the persistent highlight marker.
    fn add_marker(&self, element: &Self::Element);

    fn remove_marker(&self, element: &Self::Element);

    fn scroll_into_view(&self, element: &Self::Element);

    /// Shows `text` anchored near `element`.
    fn show_tooltip(&self, element: &Self::Element, text: &str) -> TooltipId;

    /// Removes a tooltip. Must tolerate ids that are already gone.
    fn remove_tooltip(&self, tooltip: TooltipId);
}

/// Emitted the first time a highlighted field's value changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFilled {
    pub field_name: String,
    pub value: String,
}

struct ActiveHighlight<E> {
    /// Distinguishes highlight cycles so stale timers leave newer ones alone
    generation: u64,
    field_name: String,
    element: E,
    tooltip: Option<TooltipId>,
    tooltip_timer: Option<JoinHandle<()>>,
    clear_timer: Option<JoinHandle<()>>,
    /// Whether the one-shot input observer is still attached
    armed: bool,
}

struct HighlightState<E> {
    generation: u64,
    active: Option<ActiveHighlight<E>>,
}

// == Highlighter ==
/// Owns the single active highlight on one page.
pub struct Highlighter<S: HighlightSurface> {
    surface: Arc<S>,
    state: Arc<Mutex<HighlightState<S::Element>>>,
    events: UnboundedSender<FieldFilled>,
    runtime: Handle,
}

impl<S> Highlighter<S>
where
    S: HighlightSurface,
    S::Element: Send + 'static,
{
    /// Creates a highlighter over `surface` and the receiver for its
    /// field-filled events.
    ///
    /// # Errors
    /// `HostUnavailable` when no Tokio runtime is available for timers.
    pub fn new(
        surface: Arc<S>,
    ) -> Result<(Self, UnboundedReceiver<FieldFilled>), LocatorError> {
        let runtime =
            Handle::try_current().map_err(|err| LocatorError::HostUnavailable(err.to_string()))?;
        let (events, receiver) = mpsc::unbounded_channel();

        let highlighter = Self {
            surface,
            state: Arc::new(Mutex::new(HighlightState {
                generation: 0,
                active: None,
            })),
            events,
            runtime,
        };
        Ok((highlighter, receiver))
    }

    /// Locates `field_name` and highlights it, replacing any previous
    /// highlight. Returns the highlighted control, or `None` if the page has
    /// no matching field.
    pub fn highlight(&self, field_name: &str, value_hint: Option<&str>) -> Option<S::Element> {
        self.clear();

        let Some(found) = locate(self.surface.as_ref(), field_name) else {
            debug!(field = %field_name, "Field not found, nothing highlighted");
            return None;
        };
        let element = found.element;

        self.surface.add_marker(&element);
        self.surface.scroll_into_view(&element);

        let mut state = lock(&self.state);
        state.generation += 1;
        let generation = state.generation;

        let tooltip = value_hint
            .filter(|value| !value.is_empty())
            .map(|value| {
                self.surface
                    .show_tooltip(&element, &format!("Ready to paste: {value}"))
            });
        let tooltip_timer = tooltip.map(|id| self.spawn_tooltip_expiry(generation, id));

        // A concurrent call may have installed its own highlight since our clear
        let previous = state.active.replace(ActiveHighlight {
            generation,
            field_name: field_name.to_string(),
            element: element.clone(),
            tooltip,
            tooltip_timer,
            clear_timer: None,
            armed: true,
        });
        drop(state);

        if let Some(previous) = previous {
            let same_element = previous.element == element;
            release(self.surface.as_ref(), previous);
            if same_element {
                self.surface.add_marker(&element);
            }
        }

        info!(field = %field_name, strategy = ?found.strategy, "Field highlighted");
        Some(element)
    }

    /// Reports that `element`'s value changed to `value`.
    ///
    /// Returns true if this fired the observer of the active highlight. The
    /// observer fires at most once per highlight.
    pub fn on_input(&self, element: &S::Element, value: &str) -> bool {
        let mut state = lock(&self.state);
        let Some(active) = state.active.as_mut() else {
            return false;
        };
        if !active.armed || active.element != *element {
            return false;
        }

        active.armed = false;
        let event = FieldFilled {
            field_name: active.field_name.clone(),
            value: value.to_string(),
        };
        active.clear_timer = Some(self.spawn_delayed_clear(active.generation));
        drop(state);

        debug!(field = %event.field_name, "Highlighted field filled");
        if self.events.send(event).is_err() {
            debug!("Field-filled receiver dropped");
        }
        true
    }

    /// Removes the active highlight and tooltip and cancels pending timers.
    pub fn clear(&self) {
        let active = lock(&self.state).active.take();
        if let Some(active) = active {
            release(self.surface.as_ref(), active);
        }
    }

    /// Page teardown: no highlight, tooltip or timer survives navigation.
    pub fn teardown(&self) {
        self.clear();
        debug!("Highlighter torn down");
    }

    /// The currently highlighted control.
    pub fn active(&self) -> Option<S::Element> {
        lock(&self.state)
            .active
            .as_ref()
            .map(|active| active.element.clone())
    }

    fn spawn_tooltip_expiry(&self, generation: u64, tooltip: TooltipId) -> JoinHandle<()> {
        let surface = Arc::clone(&self.surface);
        let state = Arc::clone(&self.state);

        self.runtime.spawn(async move {
            tokio::time::sleep(TOOLTIP_TIMEOUT).await;

            let expired = {
                let mut state = lock(&state);
                match state.active.as_mut() {
                    Some(active) if active.generation == generation => {
                        active.tooltip_timer = None;
                        active.tooltip.take()
                    }
                    _ => None,
                }
            };
            // A cleared highlight already removed its tooltip
            if let Some(id) = expired.filter(|id| *id == tooltip) {
                surface.remove_tooltip(id);
            }
        })
    }

    fn spawn_delayed_clear(&self, generation: u64) -> JoinHandle<()> {
        let surface = Arc::clone(&self.surface);
        let state = Arc::clone(&self.state);

        self.runtime.spawn(async move {
            tokio::time::sleep(CLEAR_AFTER_FILL).await;

            let finished = {
                let mut state = lock(&state);
                let current = state
                    .active
                    .as_ref()
                    .is_some_and(|active| active.generation == generation);
                if current {
                    state.active.take()
                } else {
                    None
                }
            };
            if let Some(mut active) = finished {
                // This task is the clear timer; don't abort ourselves
                active.clear_timer = None;
                release(surface.as_ref(), active);
            }
        })
    }
}

impl<S: HighlightSurface> Drop for Highlighter<S> {
    fn drop(&mut self) {
        let active = lock(&self.state).active.take();
        if let Some(active) = active {
            release(self.surface.as_ref(), active);
        }
    }
}

fn lock<E>(state: &Mutex<HighlightState<E>>) -> MutexGuard<'_, HighlightState<E>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn release<S: HighlightSurface + ?Sized>(surface: &S, active: ActiveHighlight<S::Element>) {
    for timer in [active.tooltip_timer, active.clear_timer].into_iter().flatten() {
        timer.abort();
    }
    surface.remove_marker(&active.element);
    if let Some(tooltip) = active.tooltip {
        surface.remove_tooltip(tooltip);
    }
}
