//! Drag-and-drop reordering of the route list.

use serde::{Deserialize, Serialize};

use crate::{ConflictError, RouteStore};

/// Data carried by a list drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// Index of the dragged list element.
    pub origin: usize,
}

/// Translates list drops into swaps.
///
/// Tracks the hovered drop target so the list can style it; any drop clears
/// it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragReorderController {
    hover: Option<usize>,
}

impl DragReorderController {
    /// Begin dragging the element at `origin`.
    #[must_use]
    pub const fn drag_start(&mut self, origin: usize) -> DragPayload {
        self.hover = None;
        DragPayload { origin }
    }

    /// The pointer entered the element at `target`.
    pub const fn drag_enter(&mut self, target: usize) {
        self.hover = Some(target);
    }

    /// The pointer left the element at `target`.
    pub fn drag_leave(&mut self, target: usize) {
        if self.hover == Some(target) {
            self.hover = None;
        }
    }

    /// The element currently styled as a drop target.
    #[must_use]
    pub const fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Swap the dragged element with the one at `target`.
    ///
    /// Returns whether the route changed. Identical indices and indices
    /// outside the route are a no-op.
    ///
    /// # Errors
    ///
    /// Propagates [`RouteStore::reorder`] errors; a swap of a duplicate-free
    /// route never produces one.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::{CoordinatePair, DragReorderController, RouteStore, Waypoint};
    ///
    /// let mut route = RouteStore::default();
    /// route.add(Waypoint::new(CoordinatePair::new(1.0, 1.0), "Street 1"))?;
    /// route.add(Waypoint::new(CoordinatePair::new(2.0, 2.0), "Street 2"))?;
    ///
    /// let mut drag = DragReorderController::default();
    /// let payload = drag.drag_start(0);
    /// assert!(drag.drop(payload, 1, &mut route)?);
    /// assert_eq!(route.snapshot().waypoints()[0].address, "Street 2");
    /// # Ok::<(), waypoint_core::ConflictError>(())
    /// ```
    pub fn drop(
        &mut self,
        payload: DragPayload,
        target: usize,
        route: &mut RouteStore,
    ) -> Result<bool, ConflictError> {
        self.hover = None;
        if payload.origin == target {
            return Ok(false);
        }
        let Some(sequence) = route.snapshot().swapped(payload.origin, target) else {
            return Ok(false);
        };
        route.reorder(sequence)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoordinatePair, Waypoint};
    use rstest::{fixture, rstest};

    #[fixture]
    fn route() -> RouteStore {
        let mut route = RouteStore::default();
        for (i, address) in ["Street 1", "Street 2", "Street 3"].into_iter().enumerate() {
            let lon = f64::from(u8::try_from(i).expect("small index"));
            route
                .add(Waypoint::new(CoordinatePair::new(lon, 50.0), address))
                .expect("unique");
        }
        route
    }

    fn addresses(route: &RouteStore) -> Vec<String> {
        route
            .snapshot()
            .waypoints()
            .iter()
            .map(|w| w.address.clone())
            .collect()
    }

    #[rstest]
    #[case(0, 2, ["Street 3", "Street 2", "Street 1"])]
    #[case(2, 1, ["Street 1", "Street 3", "Street 2"])]
    fn drop_swaps_positions(
        mut route: RouteStore,
        #[case] origin: usize,
        #[case] target: usize,
        #[case] expected: [&str; 3],
    ) {
        let mut drag = DragReorderController::default();
        let payload = drag.drag_start(origin);
        assert!(drag.drop(payload, target, &mut route).expect("swap"));
        assert_eq!(addresses(&route), expected);
    }

    #[rstest]
    fn same_index_is_a_no_op(mut route: RouteStore) {
        let before = route.snapshot();
        let mut drag = DragReorderController::default();
        let payload = drag.drag_start(1);
        assert!(!drag.drop(payload, 1, &mut route).expect("no-op"));
        assert!(route.snapshot().same_identity(&before));
    }

    #[rstest]
    fn out_of_range_target_is_ignored(mut route: RouteStore) {
        let mut drag = DragReorderController::default();
        let payload = drag.drag_start(0);
        assert!(!drag.drop(payload, 7, &mut route).expect("no-op"));
        assert_eq!(addresses(&route), ["Street 1", "Street 2", "Street 3"]);
    }

    #[rstest]
    fn drop_resets_hover_state(mut route: RouteStore) {
        let mut drag = DragReorderController::default();
        let payload = drag.drag_start(0);
        drag.drag_enter(2);
        drag.drag_leave(1);
        assert_eq!(drag.hover(), Some(2));
        drag.drop(payload, 2, &mut route).expect("swap");
        assert_eq!(drag.hover(), None);
    }
}
