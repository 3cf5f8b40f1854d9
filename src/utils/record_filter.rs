use std::cmp::Reverse;

use crate::model::month::month_index;
use crate::model::slip::{AllowanceType, SlipRecord};

pub const ALL_MONTHS: &str = "All";
pub const ALL_TYPES: &str = "All Types";

/// Month selector value. `All` disables month filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthSelection {
    All,
    Only(String),
}

impl From<&str> for MonthSelection {
    fn from(value: &str) -> Self {
        if value == ALL_MONTHS {
            MonthSelection::All
        } else {
            MonthSelection::Only(value.to_string())
        }
    }
}

/// Category selector value. `All` disables category filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSelection {
    All,
    Only(String),
}

impl From<&str> for TypeSelection {
    fn from(value: &str) -> Self {
        if value == ALL_TYPES {
            TypeSelection::All
        } else {
            TypeSelection::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year: i32,
    pub month: MonthSelection,
    pub allowance_type: Option<TypeSelection>,
    pub query: String,
}

impl FilterCriteria {
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            month: MonthSelection::All,
            allowance_type: None,
            query: String::new(),
        }
    }

    pub fn month(mut self, month: impl Into<MonthSelection>) -> Self {
        self.month = month.into();
        self
    }

    pub fn allowance_type(mut self, selection: impl Into<TypeSelection>) -> Self {
        self.allowance_type = Some(selection.into());
        self
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }
}

/// Field accessors the engine needs from a record type.
///
/// One view per page replaces the per-page copies of the filter code: the
/// searchable fields and the optional tie-break are the only things that vary.
pub struct RecordView<T> {
    pub year: fn(&T) -> i32,
    pub month: fn(&T) -> &str,
    pub category: Option<fn(&T) -> Option<&str>>,
    pub search_fields: fn(&T) -> Vec<&str>,
    /// secondary ascending key for records sharing a month
    pub tie_break: Option<fn(&T) -> u8>,
}

fn slip_year(record: &SlipRecord) -> i32 {
    record.year
}

fn slip_month(record: &SlipRecord) -> &str {
    &record.month
}

fn slip_type(record: &SlipRecord) -> Option<&str> {
    record.allowance_type.as_deref()
}

fn slip_search_fields(record: &SlipRecord) -> Vec<&str> {
    vec![
        record.month.as_str(),
        record.document_ref.as_str(),
        record.id.as_str(),
    ]
}

fn allowance_search_fields(record: &SlipRecord) -> Vec<&str> {
    let mut fields = slip_search_fields(record);
    if let Some(kind) = record.allowance_type.as_deref() {
        fields.push(kind);
    }
    fields
}

/// Known types first (Father, Mother, Spouse), unknown types after them.
fn allowance_rank(record: &SlipRecord) -> u8 {
    match record.allowance_type.as_deref().map(AllowanceType::priority_of) {
        Some(0) | None => u8::MAX,
        Some(priority) => priority,
    }
}

/// Salary and incentive slips.
pub const SLIP_VIEW: RecordView<SlipRecord> = RecordView {
    year: slip_year,
    month: slip_month,
    category: None,
    search_fields: slip_search_fields,
    tie_break: None,
};

pub const ALLOWANCE_VIEW: RecordView<SlipRecord> = RecordView {
    year: slip_year,
    month: slip_month,
    category: Some(slip_type),
    search_fields: allowance_search_fields,
    tie_break: Some(allowance_rank),
};

/// Filter `records` by `criteria` and order the result by month, latest first.
///
/// Steps run in a fixed order: year, month, category, free text, then a stable
/// sort. The input slice is never touched; the result borrows from it.
pub fn filter_and_sort<'a, T>(
    records: &'a [T],
    criteria: &FilterCriteria,
    view: &RecordView<T>,
) -> Vec<&'a T> {
    let query = criteria.query.trim().to_lowercase();

    let mut items: Vec<&T> = records
        .iter()
        .filter(|r| (view.year)(r) == criteria.year)
        .filter(|r| match &criteria.month {
            MonthSelection::All => true,
            MonthSelection::Only(month) => (view.month)(r) == month,
        })
        .filter(|r| match (&criteria.allowance_type, view.category) {
            (Some(TypeSelection::Only(wanted)), Some(category)) => {
                category(r) == Some(wanted.as_str())
            }
            _ => true,
        })
        .filter(|r| {
            query.is_empty()
                || (view.search_fields)(r)
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
        })
        .collect();

    // sort_by_key is stable, equal keys keep input order
    items.sort_by_key(|r| {
        let secondary = view.tie_break.map(|rank| rank(r)).unwrap_or(0);
        (Reverse(month_index((view.month)(r))), secondary)
    });

    tracing::debug!(
        year = criteria.year,
        total = records.len(),
        found = items.len(),
        "Filtered records"
    );

    items
}

/// Distinct years present in the collection, latest first.
pub fn distinct_years<T>(records: &[T], view: &RecordView<T>) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| (view.year)(r)).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Distinct months present for `year`, in calendar order.
///
/// Names that are not canonical months keep first-seen order after the
/// recognized ones.
pub fn months_for_year<T>(records: &[T], year: i32, view: &RecordView<T>) -> Vec<String> {
    let mut months: Vec<String> = Vec::new();
    for record in records.iter().filter(|r| (view.year)(r) == year) {
        let month = (view.month)(record);
        if !months.iter().any(|m| m == month) {
            months.push(month.to_string());
        }
    }

    // unknown names (index 0) go last, stable among themselves
    months.sort_by_key(|m| match month_index(m) {
        0 => u8::MAX,
        index => index,
    });
    months
}
