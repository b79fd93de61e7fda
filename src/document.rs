use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::topology::{Change, Element, ElementId, ElementUpdate, Plan};

/// Receiver of the editing engine's output.
///
/// The engine never mutates a plan it did not build itself; it reads the
/// current snapshot and reports every mutation through these callbacks.
pub trait ElementSink {
    /// The current plan snapshot, used for snapping and projection.
    fn snapshot(&self) -> &Plan;

    /// Adds an element, returning its id, or `None` if the sink rejected it.
    fn add_element(&mut self, element: Element) -> Option<ElementId>;

    /// Applies a partial update. Returns `false` if the sink rejected it.
    fn update_element(&mut self, id: ElementId, update: ElementUpdate) -> bool;

    /// Deletes an element. Returns `false` if the sink rejected it.
    fn delete_element(&mut self, id: ElementId) -> bool;

    /// Called when a wall drawing session ends normally.
    fn session_finished(&mut self) {}

    /// Routes a change to the matching callback.
    fn submit(&mut self, change: Change) -> bool {
        match change {
            Change::Add(element) => self.add_element(element).is_some(),
            Change::Update(id, update) => self.update_element(id, update),
            Change::Delete(id) => self.delete_element(id),
        }
    }
}

/// The stock sink: owns the current plan and replaces it on every change.
///
/// Each change is applied to a copy of the snapshot, and the copy only
/// replaces the snapshot when the change succeeded.
#[derive(Debug, Clone, Default)]
pub struct Document {
    plan: Plan,
    finished_sessions: usize,
}

impl Document {
    /// Creates an empty document using the configured corner weld tolerance.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self::from_plan(Plan::with_vertex_tolerance(config.vertex_tolerance))
    }

    #[must_use]
    pub fn from_plan(plan: Plan) -> Self {
        Self {
            plan,
            finished_sessions: 0,
        }
    }

    #[must_use]
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Number of wall drawing sessions that ended normally.
    #[must_use]
    pub fn finished_sessions(&self) -> usize {
        self.finished_sessions
    }

    fn commit(&mut self, change: &Change) -> Option<Option<ElementId>> {
        let mut next = self.plan.clone();
        match next.apply(change) {
            Ok(added) => {
                debug!(?change, "change applied");
                self.plan = next;
                Some(added)
            }
            Err(err) => {
                warn!(%err, ?change, "change rejected");
                None
            }
        }
    }
}

impl ElementSink for Document {
    fn snapshot(&self) -> &Plan {
        &self.plan
    }

    fn add_element(&mut self, element: Element) -> Option<ElementId> {
        self.commit(&Change::Add(element)).flatten()
    }

    fn update_element(&mut self, id: ElementId, update: ElementUpdate) -> bool {
        self.commit(&Change::Update(id, update)).is_some()
    }

    fn delete_element(&mut self, id: ElementId) -> bool {
        self.commit(&Change::Delete(id)).is_some()
    }

    fn session_finished(&mut self) {
        self.finished_sessions += 1;
        debug!(walls = self.plan.walls().count(), "wall drawing session finished");
    }
}
