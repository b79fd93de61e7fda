use crate::config::OrphanPolicy;
use crate::error::{PlanError, Result};
use crate::topology::{Change, ElementId, ElementUpdate, OpeningUpdate, Plan};

/// Deletes one element, resolving the openings of a deleted wall according
/// to an [`OrphanPolicy`].
pub struct DeleteElement {
    element: ElementId,
}

impl DeleteElement {
    /// Creates a new `DeleteElement` operation.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self { element }
    }

    /// Returns the changes that delete the element.
    ///
    /// For a wall with openings, `Detach` emits one update per opening
    /// clearing its wall reference before the delete, and `Cascade` deletes
    /// the openings first.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::EntityNotFound` for an unknown element and
    /// `PlanError::HasDependents` when the policy is `Reject` and the wall
    /// still hosts openings.
    pub fn execute(&self, plan: &Plan, policy: OrphanPolicy) -> Result<Vec<Change>> {
        plan.element(self.element)?;
        let ElementId::Wall(wall) = self.element else {
            return Ok(vec![Change::Delete(self.element)]);
        };

        let hosted = plan.dependents(wall);
        let mut changes: Vec<Change> = match policy {
            OrphanPolicy::Reject if !hosted.is_empty() => {
                return Err(PlanError::HasDependents {
                    count: hosted.len(),
                }
                .into());
            }
            OrphanPolicy::Reject => Vec::new(),
            OrphanPolicy::Detach => hosted
                .iter()
                .map(|&opening| {
                    Change::Update(
                        opening.into(),
                        ElementUpdate::Opening(OpeningUpdate {
                            wall: Some(None),
                            ..OpeningUpdate::default()
                        }),
                    )
                })
                .collect(),
            OrphanPolicy::Cascade => hosted
                .iter()
                .map(|&opening| Change::Delete(opening.into()))
                .collect(),
        };
        changes.push(Change::Delete(self.element));
        Ok(changes)
    }
}
