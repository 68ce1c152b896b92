use crate::normalize::{census_availability, CensusAvailability};
use crate::types::{Direction, MigrationRecord, Order, Query, RankedFlow};
use crate::util::percentage;
use serde::Serialize;

/// Elementwise sums over a filtered record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlowTotals {
    pub count: u64,
    pub male: u64,
    pub female: u64,
    pub rural: u64,
    pub urban: u64,
}

impl FlowTotals {
    fn add(&mut self, r: &MigrationRecord) {
        self.count = self.count.saturating_add(r.count);
        self.male = self.male.saturating_add(r.male);
        self.female = self.female.saturating_add(r.female);
        self.rural = self.rural.saturating_add(r.rural);
        self.urban = self.urban.saturating_add(r.urban);
    }

    /// `male / female`, or `None` when there are no female migrants.
    pub fn male_female_ratio(&self) -> Option<f64> {
        if self.female == 0 {
            return None;
        }
        Some(self.male as f64 / self.female as f64)
    }

    /// Urban share of the rural + urban total, in percent (0 when empty).
    pub fn urban_share(&self) -> f64 {
        percentage(self.urban, self.urban + self.rural)
    }
}

/// Records matching one [`Query`] plus their totals.
#[derive(Debug, Clone)]
pub struct FlowView<'a> {
    pub query: Query,
    pub filtered: Vec<&'a MigrationRecord>,
    pub totals: FlowTotals,
}

pub fn matches(record: &MigrationRecord, query: &Query) -> bool {
    let Some(selected) = query.selected() else {
        return false;
    };
    if record.count < query.threshold {
        return false;
    }
    match query.direction {
        Direction::Inflow => record.destination == selected,
        Direction::Outflow => record.origin == selected,
    }
}

/// Filter `records` by entity, direction and threshold and total the result.
///
/// Without a selected entity the view is empty.
pub fn query<'a>(records: &'a [MigrationRecord], query: &Query) -> FlowView<'a> {
    let filtered: Vec<&MigrationRecord> = records.iter().filter(|r| matches(r, query)).collect();
    let mut totals = FlowTotals::default();
    for r in &filtered {
        totals.add(r);
    }
    FlowView { query: query.clone(), filtered, totals }
}

impl<'a> FlowView<'a> {
    /// The entity on the non-selected side of a record.
    pub fn counterpart<'r>(&self, record: &'r MigrationRecord) -> &'r str {
        match self.query.direction {
            Direction::Inflow => &record.origin,
            Direction::Outflow => &record.destination,
        }
    }

    /// Filtered records sorted by count. Equal counts keep input order.
    pub fn sorted(&self, order: Order) -> Vec<&'a MigrationRecord> {
        let mut sorted = self.filtered.clone();
        match order {
            Order::Highest => sorted.sort_by(|a, b| b.count.cmp(&a.count)),
            Order::Lowest => sorted.sort_by(|a, b| a.count.cmp(&b.count)),
        }
        sorted
    }

    pub fn top_n(&self, k: usize, order: Order) -> Vec<RankedFlow> {
        self.sorted(order)
            .into_iter()
            .take(k)
            .map(|r| RankedFlow { name: self.counterpart(r).to_string(), value: r.count })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// `false` when the selected entity has no census-era data at all, as
    /// opposed to having been filtered down to nothing.
    pub fn is_supported(&self) -> bool {
        match self.query.selected() {
            Some(name) => census_availability(name) == CensusAvailability::Available,
            None => true,
        }
    }
}
