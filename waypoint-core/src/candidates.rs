//! The suggestion list shown under the active field.
//!
//! [`CandidateListController`] builds scoped queries, stamps each with a
//! [`QueryTicket`], and accepts a response only when its ticket is the latest
//! one issued for a field that is still active and non-empty. Responses that
//! lose this race are dropped.

use serde::{Deserialize, Serialize};

use crate::{
    ActiveField, CoordinatePair, DefaultCity, EngineConfig, GeoKind, GeoResult, GeocodeQuery,
};

/// A provider suggestion the user has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Position of the suggestion.
    pub pos: CoordinatePair,
    /// Short display name.
    pub name: String,
    /// Full formatted address.
    pub address: String,
    /// Parent description, empty when the provider gave none.
    pub parent: String,
}

impl Candidate {
    /// Row label: `name (parent)`, or just the name.
    ///
    /// # Examples
    /// ```
    /// use waypoint_core::{Candidate, CoordinatePair};
    ///
    /// let row = Candidate {
    ///     pos: CoordinatePair::new(13.4, 52.5),
    ///     name: "Berlin".into(),
    ///     address: "Germany, Berlin".into(),
    ///     parent: "Germany".into(),
    /// };
    /// assert_eq!(row.label(), "Berlin (Germany)");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        if self.parent.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.parent)
        }
    }
}

impl From<GeoResult> for Candidate {
    fn from(result: GeoResult) -> Self {
        Self {
            pos: result.pos,
            name: result.name,
            address: result.address,
            parent: result.parent.unwrap_or_default(),
        }
    }
}

/// Identifies one outgoing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryTicket {
    /// Field whose text produced the query.
    pub field: ActiveField,
    /// Monotonic sequence number shared by both fields.
    pub seq: u64,
}

/// Displayed candidates and the highlight cursor.
///
/// `highlight` of `None` means nothing is highlighted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateList {
    entries: Vec<Candidate>,
    highlight: Option<usize>,
}

impl CandidateList {
    /// Candidates in provider order.
    #[must_use]
    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    /// Index of the highlighted row.
    #[must_use]
    pub const fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// The highlighted candidate.
    #[must_use]
    pub fn highlighted(&self) -> Option<&Candidate> {
        self.highlight.and_then(|index| self.entries.get(index))
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is collapsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct LatestTickets {
    city: u64,
    address: u64,
}

impl LatestTickets {
    const fn get(&self, field: ActiveField) -> u64 {
        match field {
            ActiveField::City => self.city,
            ActiveField::Address => self.address,
        }
    }

    const fn set(&mut self, field: ActiveField, seq: u64) {
        match field {
            ActiveField::City => self.city = seq,
            ActiveField::Address => self.address = seq,
        }
    }
}

/// Owns the candidate list, its cursor and the query sequence.
#[derive(Debug, Clone)]
pub struct CandidateListController {
    list: CandidateList,
    next_seq: u64,
    latest: LatestTickets,
    cap: usize,
    address_page_size: u16,
    city_page_size: u16,
    city_kinds: Vec<GeoKind>,
}

impl Default for CandidateListController {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl CandidateListController {
    /// Create a controller with the list limits from `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            list: CandidateList::default(),
            next_seq: 0,
            latest: LatestTickets::default(),
            cap: config.candidate_cap,
            address_page_size: config.address_page_size,
            city_page_size: config.city_page_size,
            city_kinds: config.city_kinds.clone(),
        }
    }

    /// The displayed list.
    #[must_use]
    pub const fn list(&self) -> &CandidateList {
        &self.list
    }

    /// Build the query for `text` typed into `field` and stamp it as the
    /// latest for that field.
    ///
    /// Address queries are prefixed with the default city; city queries ask
    /// for a larger page so administrative areas survive filtering.
    pub fn issue_query(
        &mut self,
        field: ActiveField,
        text: &str,
        default_city: Option<&DefaultCity>,
    ) -> (QueryTicket, GeocodeQuery) {
        let query = match (field, default_city) {
            (ActiveField::City, _) => GeocodeQuery::new(text, self.city_page_size),
            (ActiveField::Address, Some(city)) => {
                GeocodeQuery::new(text, self.address_page_size).with_scope(city.address.clone())
            }
            (ActiveField::Address, None) => GeocodeQuery::new(text, self.address_page_size),
        };
        (self.stamp(field), query)
    }

    fn stamp(&mut self, field: ActiveField) -> QueryTicket {
        self.next_seq += 1;
        self.latest.set(field, self.next_seq);
        QueryTicket {
            field,
            seq: self.next_seq,
        }
    }

    /// Discard every in-flight query for `field`.
    pub fn invalidate(&mut self, field: ActiveField) {
        self.stamp(field);
    }

    /// Whether a response for `ticket` may still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: QueryTicket, active: ActiveField, field_text: &str) -> bool {
        ticket.seq == self.latest.get(ticket.field)
            && ticket.field == active
            && !field_text.is_empty()
    }

    /// Whether `result` may be offered for `field`.
    #[must_use]
    pub fn is_admissible(&self, field: ActiveField, result: &GeoResult) -> bool {
        match field {
            ActiveField::City => self.city_kinds.contains(&result.kind),
            ActiveField::Address => true,
        }
    }

    /// Replace the list with the admissible `results` for `ticket`.
    ///
    /// `active` and `field_text` must be read at the moment the response
    /// lands. Returns `false`, leaving the list untouched, when the response
    /// is stale.
    pub fn accept_response(
        &mut self,
        ticket: QueryTicket,
        results: Vec<GeoResult>,
        active: ActiveField,
        field_text: &str,
    ) -> bool {
        if !self.is_current(ticket, active, field_text) {
            return false;
        }
        let entries = results
            .into_iter()
            .filter(|result| self.is_admissible(ticket.field, result))
            .take(self.cap)
            .map(Candidate::from)
            .collect();
        self.list = CandidateList {
            entries,
            highlight: None,
        };
        true
    }

    /// Move the highlight up, stopping at "nothing highlighted".
    pub fn move_up(&mut self) {
        self.list.highlight = match self.list.highlight {
            Some(0) | None => None,
            Some(index) => Some(index - 1),
        };
    }

    /// Move the highlight down, stopping at the last row.
    pub fn move_down(&mut self) {
        let next = self.list.highlight.map_or(0, |index| index + 1);
        if next < self.list.len() {
            self.list.highlight = Some(next);
        }
    }

    /// Highlight the row under the pointer.
    pub fn hover(&mut self, index: usize) {
        if index < self.list.len() {
            self.list.highlight = Some(index);
        }
    }

    /// The candidate at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.list.entries.get(index)
    }

    /// Empty the list and reset the cursor.
    pub fn clear(&mut self) {
        self.list = CandidateList::default();
    }
}
