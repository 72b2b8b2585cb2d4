//! The ordered, duplicate-free waypoint collection.
//!
//! [`RouteStore`] is the single source of truth for the route. Every
//! successful mutation publishes a new [`RouteSnapshot`] with a fresh
//! revision; the list view and the map view both render from a snapshot, so
//! they never observe different revisions.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    ActiveField, CommitError, ConflictError, InputModeController, ValidationError, Waypoint,
};

/// An immutable view of the route at one revision.
///
/// Cloning is cheap. Two snapshots share identity when they come from the
/// same revision.
#[derive(Debug, Clone)]
pub struct RouteSnapshot {
    revision: u64,
    waypoints: Arc<[Waypoint]>,
}

impl Default for RouteSnapshot {
    fn default() -> Self {
        Self {
            revision: 0,
            waypoints: Arc::from(Vec::new()),
        }
    }
}

impl PartialEq for RouteSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.waypoints == other.waypoints
    }
}

impl RouteSnapshot {
    /// Revision number, increasing with every mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Waypoints in route order.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the route has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Whether both snapshots are the same revision of the same store.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.waypoints, &other.waypoints)
    }

    /// The sequence with the elements at `first` and `second` exchanged.
    ///
    /// Returns `None` when either index is out of range.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::{CoordinatePair, RouteStore, Waypoint};
    ///
    /// let mut store = RouteStore::default();
    /// store.add(Waypoint::new(CoordinatePair::new(1.0, 1.0), "Street 1"))?;
    /// store.add(Waypoint::new(CoordinatePair::new(2.0, 2.0), "Street 2"))?;
    ///
    /// let swapped = store.snapshot().swapped(0, 1).expect("indices in range");
    /// assert_eq!(swapped[0].address, "Street 2");
    /// # Ok::<(), waypoint_core::ConflictError>(())
    /// ```
    #[must_use]
    pub fn swapped(&self, first: usize, second: usize) -> Option<Vec<Waypoint>> {
        if first >= self.len() || second >= self.len() {
            return None;
        }
        let mut sequence = self.waypoints.to_vec();
        sequence.swap(first, second);
        Some(sequence)
    }

    /// The sequence with the element at `index` replaced by `waypoint`.
    ///
    /// All other elements keep their order. Returns `None` when `index` is
    /// out of range.
    #[must_use]
    pub fn relocated(&self, index: usize, waypoint: Waypoint) -> Option<Vec<Waypoint>> {
        let mut sequence = self.waypoints.to_vec();
        let slot = sequence.get_mut(index)?;
        *slot = waypoint;
        Some(sequence)
    }
}

/// Owner of the route.
///
/// # Examples
/// ```
/// use waypoint_core::{CoordinatePair, RouteStore, Waypoint};
///
/// let mut store = RouteStore::default();
/// let stop = Waypoint::new(CoordinatePair::new(20.5, 54.7), "Street 1");
/// store.add(stop.clone())?;
/// assert!(store.add(stop).is_err());
/// assert_eq!(store.snapshot().len(), 1);
/// # Ok::<(), waypoint_core::ConflictError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    current: RouteSnapshot,
}

impl RouteStore {
    /// The current revision of the route.
    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        self.current.clone()
    }

    /// Whether a waypoint with `address` is in the route.
    #[must_use]
    pub fn contains(&self, address: &str) -> bool {
        self.current
            .waypoints()
            .iter()
            .any(|waypoint| waypoint.address == address)
    }

    /// Append `waypoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError`] and leaves the route unchanged when a
    /// waypoint with the same address exists.
    pub fn add(&mut self, waypoint: Waypoint) -> Result<(), ConflictError> {
        if self.contains(&waypoint.address) {
            return Err(ConflictError {
                address: waypoint.address,
            });
        }
        let mut sequence = self.current.waypoints().to_vec();
        sequence.push(waypoint);
        self.publish(sequence);
        Ok(())
    }

    /// Remove the waypoint with `address`. Returns whether one was removed.
    pub fn remove(&mut self, address: &str) -> bool {
        if !self.contains(address) {
            return false;
        }
        let sequence = self
            .current
            .waypoints()
            .iter()
            .filter(|waypoint| waypoint.address != address)
            .cloned()
            .collect();
        self.publish(sequence);
        true
    }

    /// Replace the whole sequence.
    ///
    /// Build the sequence with [`RouteSnapshot::swapped`] or
    /// [`RouteSnapshot::relocated`].
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError`] naming the first repeated address and leaves
    /// the route unchanged when `sequence` holds duplicates.
    pub fn reorder(&mut self, sequence: Vec<Waypoint>) -> Result<(), ConflictError> {
        let mut seen = HashSet::with_capacity(sequence.len());
        if let Some(duplicate) = sequence
            .iter()
            .find(|waypoint| !seen.insert(waypoint.address.as_str()))
        {
            return Err(ConflictError {
                address: duplicate.address.clone(),
            });
        }
        self.publish(sequence);
        Ok(())
    }

    /// Commit the pending address from `input`, the address field's "+"
    /// action.
    ///
    /// On success the pending address and the address text are cleared. On
    /// failure the error is displayed against the address field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyAddress`] when nothing was typed,
    /// [`ValidationError::AddressNotChosen`] when text was typed but no
    /// candidate confirmed, and [`CommitError::Conflict`] when the address is
    /// already in the route.
    pub fn commit_from_pending(
        &mut self,
        input: &mut InputModeController,
    ) -> Result<Waypoint, CommitError> {
        let Some(pending) = input.pending().cloned() else {
            let error = if input.text(ActiveField::Address).is_empty() {
                ValidationError::EmptyAddress
            } else {
                ValidationError::AddressNotChosen
            };
            input.show_error(ActiveField::Address, error.to_string());
            return Err(error.into());
        };
        if input.text(ActiveField::Address) != pending.address {
            input.set_text(ActiveField::Address, pending.address.clone());
        }
        let waypoint = pending.to_waypoint();
        match self.add(waypoint.clone()) {
            Ok(()) => {
                input.finish_commit();
                Ok(waypoint)
            }
            Err(conflict) => {
                input.show_error(ActiveField::Address, conflict.to_string());
                Err(conflict.into())
            }
        }
    }

    fn publish(&mut self, sequence: Vec<Waypoint>) {
        self.current = RouteSnapshot {
            revision: self.current.revision + 1,
            waypoints: Arc::from(sequence),
        };
    }
}
