use crate::auxiliary::{sum_columns, AuxiliaryRow};
use crate::flows::{FlowTotals, FlowView};
use crate::schema::{duration, reason};
use crate::types::{
    BreakdownRow, CounterpartRow, DurationRow, Order, ProfileSummary, Query, ReasonRow,
};
use crate::util::{format_int, format_number, percentage};
use std::collections::HashMap;

/// Bar-chart rows: the `k` highest or lowest counterparts.
pub fn generate_ranking(view: &FlowView<'_>, k: usize, order: Order) -> Vec<CounterpartRow> {
    view.top_n(k, order)
        .into_iter()
        .enumerate()
        .map(|(idx, flow)| CounterpartRow {
            rank: idx + 1,
            state: flow.name,
            migrants: format_int(flow.value),
        })
        .collect()
}

/// Every counterpart in the view, highest count first.
pub fn generate_counterpart_table(view: &FlowView<'_>) -> Vec<CounterpartRow> {
    generate_ranking(view, view.filtered.len(), Order::Highest)
}

fn breakdown(pairs: [(&str, u64); 2]) -> Vec<BreakdownRow> {
    let whole = pairs[0].1 + pairs[1].1;
    pairs
        .into_iter()
        .map(|(label, value)| BreakdownRow {
            category: label.to_string(),
            persons: format_int(value),
            share_pct: format_number(percentage(value, whole), 1),
        })
        .collect()
}

pub fn generate_gender_breakdown(totals: &FlowTotals) -> Vec<BreakdownRow> {
    breakdown([("Male", totals.male), ("Female", totals.female)])
}

pub fn generate_area_breakdown(totals: &FlowTotals) -> Vec<BreakdownRow> {
    breakdown([("Urban", totals.urban), ("Rural", totals.rural)])
}

pub fn generate_duration_report(rows: &[AuxiliaryRow], query: &Query) -> Vec<DurationRow> {
    let sums = sum_columns(rows, query, &duration::columns());
    duration::BUCKETS
        .iter()
        .map(|(column, label)| DurationRow {
            duration: label.to_string(),
            persons: format_int(sums.get(*column).copied().unwrap_or(0)),
        })
        .collect()
}

pub fn generate_reason_report(rows: &[AuxiliaryRow], query: &Query) -> Vec<ReasonRow> {
    use reason::Breakdown;
    let persons = sum_columns(rows, query, &reason::columns(Breakdown::Persons));
    let males = sum_columns(rows, query, &reason::columns(Breakdown::Males));
    let females = sum_columns(rows, query, &reason::columns(Breakdown::Females));
    let cell = |sums: &HashMap<String, i64>, b: Breakdown, r: &str| {
        format_int(sums.get(&reason::column(b, r)).copied().unwrap_or(0))
    };
    reason::REASONS
        .iter()
        .map(|(key, label)| ReasonRow {
            reason: label.to_string(),
            persons: cell(&persons, Breakdown::Persons, *key),
            males: cell(&males, Breakdown::Males, *key),
            females: cell(&females, Breakdown::Females, *key),
        })
        .collect()
}

pub fn generate_summary(view: &FlowView<'_>) -> ProfileSummary {
    let t = view.totals;
    ProfileSummary {
        entity: view.query.selected().unwrap_or_default().to_string(),
        direction: view.query.direction,
        threshold: view.query.threshold,
        records: view.filtered.len(),
        total: t.count,
        male: t.male,
        female: t.female,
        rural: t.rural,
        urban: t.urban,
        male_female_ratio: t.male_female_ratio(),
        urban_share_pct: t.urban_share(),
        generated_at: chrono::Utc::now(),
    }
}
