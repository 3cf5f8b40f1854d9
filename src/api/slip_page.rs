use chrono::{Datelike, NaiveDate};
use strum::IntoEnumIterator;

use crate::model::month::Month;
use crate::model::slip::{AllowanceType, SlipRecord};
use crate::utils::record_filter::{
    distinct_years, filter_and_sort, months_for_year, FilterCriteria, MonthSelection, RecordView,
    TypeSelection, ALLOWANCE_VIEW, ALL_MONTHS, ALL_TYPES, SLIP_VIEW,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageKind {
    Salary,
    Incentive,
    Allowance,
}

impl PageKind {
    pub fn view(self) -> &'static RecordView<SlipRecord> {
        match self {
            PageKind::Salary | PageKind::Incentive => &SLIP_VIEW,
            PageKind::Allowance => &ALLOWANCE_VIEW,
        }
    }

    fn nouns(self) -> (&'static str, &'static str) {
        match self {
            PageKind::Salary | PageKind::Incentive => ("slip", "slips"),
            PageKind::Allowance => ("allowance", "allowances"),
        }
    }
}

/// Current year when it has data, otherwise the latest year with data,
/// otherwise the current year.
pub fn default_year(years: &[i32], current_year: i32) -> i32 {
    if years.contains(&current_year) {
        current_year
    } else {
        years.first().copied().unwrap_or(current_year)
    }
}

/// "1 slip found", "3 slips found"
pub fn found_label(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{} {} found", count, noun)
}

/// Everything a slip list needs to render.
#[derive(Debug, PartialEq)]
pub struct SlipListView<'a> {
    pub years: Vec<i32>,
    /// starts with the "All" sentinel on salary and incentive pages
    pub month_options: Vec<String>,
    /// empty outside the allowance page
    pub type_options: Vec<String>,
    pub criteria: FilterCriteria,
    pub items: Vec<&'a SlipRecord>,
    pub found: usize,
    pub found_label: String,
}

/// Selection state of one slip list page over an immutable record set.
#[derive(Debug, Clone)]
pub struct SlipPage<'a> {
    kind: PageKind,
    records: &'a [SlipRecord],
    today: NaiveDate,
    criteria: FilterCriteria,
}

impl<'a> SlipPage<'a> {
    pub fn open(kind: PageKind, records: &'a [SlipRecord], today: NaiveDate) -> Self {
        let years = distinct_years(records, kind.view());
        let mut criteria = FilterCriteria::for_year(default_year(&years, today.year()));
        if kind == PageKind::Allowance {
            criteria.allowance_type = Some(TypeSelection::All);
            criteria.month = current_month(today);
        }

        let mut page = Self {
            kind,
            records,
            today,
            criteria,
        };
        page.reset_month();
        page
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Changing the year resets the month selection.
    pub fn select_year(&mut self, year: i32) {
        self.criteria.year = year;
        self.reset_month();
    }

    pub fn select_month(&mut self, month: &str) {
        self.criteria.month = MonthSelection::from(month);
    }

    /// Only the allowance page has a type selector; elsewhere this is a no-op.
    pub fn select_type(&mut self, allowance_type: &str) {
        if self.kind == PageKind::Allowance {
            self.criteria.allowance_type = Some(TypeSelection::from(allowance_type));
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.criteria.query = query.to_string();
    }

    pub fn months(&self) -> Vec<String> {
        months_for_year(self.records, self.criteria.year, self.kind.view())
    }

    pub fn view(&self) -> SlipListView<'a> {
        let items = filter_and_sort(self.records, &self.criteria, self.kind.view());
        let (singular, plural) = self.kind.nouns();

        let mut month_options = self.months();
        if self.kind != PageKind::Allowance {
            month_options.insert(0, ALL_MONTHS.to_string());
        }

        let type_options = if self.kind == PageKind::Allowance {
            std::iter::once(ALL_TYPES)
                .chain(AllowanceType::iter().map(AllowanceType::label))
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        SlipListView {
            years: distinct_years(self.records, self.kind.view()),
            month_options,
            type_options,
            criteria: self.criteria.clone(),
            found: items.len(),
            found_label: found_label(items.len(), singular, plural),
            items,
        }
    }

    pub fn download_file_name(&self, record: &SlipRecord) -> String {
        match self.kind {
            PageKind::Salary => format!("salary-slip-{}-{}.pdf", record.month, record.year),
            PageKind::Incentive => format!("incentive-slip-{}-{}.pdf", record.month, record.year),
            PageKind::Allowance => {
                let kind = record
                    .allowance_type
                    .as_deref()
                    .unwrap_or("allowance")
                    .to_lowercase()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join("-");
                format!("allowance-{}-{}-{}.pdf", kind, record.month, record.year)
            }
        }
    }

    fn reset_month(&mut self) {
        self.criteria.month = match self.kind {
            PageKind::Salary | PageKind::Incentive => MonthSelection::All,
            PageKind::Allowance => self.allowance_month(),
        };
    }

    /// The allowance list always shows a single month: the current one in the
    /// current year, elsewhere the selection if the year has it, else the
    /// year's first month.
    fn allowance_month(&self) -> MonthSelection {
        if self.criteria.year == self.today.year() {
            return current_month(self.today);
        }

        let months = self.months();
        match &self.criteria.month {
            MonthSelection::Only(selected) if months.contains(selected) => {
                self.criteria.month.clone()
            }
            _ => months
                .first()
                .map(|m| MonthSelection::Only(m.clone()))
                .unwrap_or_else(|| self.criteria.month.clone()),
        }
    }
}

fn current_month(today: NaiveDate) -> MonthSelection {
    Month::from_number(today.month())
        .map(|m| MonthSelection::Only(m.name().to_string()))
        .unwrap_or(MonthSelection::All)
}
