//! Year/month/day select controller for the birth-date form.
//!
//! Every setter runs its whole cascade before returning: a year change recomputes the
//! month bound (clearing a month that fell out of it), a year or month change recomputes
//! the day bound, and finally the callback fires if the three fields form a real date.

use crate::calendar::{self, MONTHS_IN_YEAR};
use crate::models::{Bounds, Field, FieldChange, OptionLists, Selection};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

pub struct DatePicker<F> {
    today: NaiveDate,
    selection: Selection,
    bounds: Bounds,
    initialized: bool,
    on_birth_change: F,
}

impl<F: FnMut(&str)> DatePicker<F> {
    pub fn new(today: NaiveDate, on_birth_change: F) -> Self {
        Self {
            today,
            selection: Selection::default(),
            bounds: Bounds {
                year_range: calendar::year_range(today),
                month_range: MONTHS_IN_YEAR,
                day_range: 0,
            },
            initialized: false,
            on_birth_change,
        }
    }

    /// Rebuilds a picker around a selection it emitted earlier. Bounds are derived again
    /// from the selection, which is kept as given. The callback does not fire.
    pub fn restore(today: NaiveDate, selection: Selection, on_birth_change: F) -> Self {
        let mut picker = Self::new(today, on_birth_change);
        picker.selection = selection;
        picker.bounds.month_range = picker.month_bound();
        picker.refresh_day_range();
        picker.initialized = true;
        picker
    }

    /// Seeds the fields from `seed` on the first call only. An absent or unparsable seed
    /// leaves the fields empty. Seeding runs the bound cascades but never the callback.
    pub fn initialize(&mut self, seed: Option<&str>) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let Some(seed) = seed else {
            return;
        };
        let Some(date) = calendar::parse_date(seed) else {
            debug!(seed, "ignoring unparsable seed date");
            return;
        };

        self.selection = Selection {
            year: date.year().to_string(),
            month: date.month().to_string(),
            day: date.day().to_string(),
        };
        self.cascade_year();
        self.refresh_day_range();
    }

    pub fn set_year(&mut self, value: impl Into<String>) {
        self.selection.year = value.into();
        self.cascade_year();
        self.refresh_day_range();
        self.notify();
    }

    pub fn set_month(&mut self, value: impl Into<String>) {
        self.selection.month = value.into();
        self.refresh_day_range();
        self.notify();
    }

    /// Replaces the day only. A day beyond the current day bound is accepted as is; the
    /// composed date check keeps it from reaching the callback.
    pub fn set_day(&mut self, value: impl Into<String>) {
        self.selection.day = value.into();
        self.notify();
    }

    pub fn apply(&mut self, change: FieldChange) {
        match change.field {
            Field::Year => self.set_year(change.value),
            Field::Month => self.set_month(change.value),
            Field::Day => self.set_day(change.value),
        }
    }

    pub fn year(&self) -> &str {
        &self.selection.year
    }

    pub fn month(&self) -> &str {
        &self.selection.month
    }

    pub fn day(&self) -> &str {
        &self.selection.day
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn into_selection(self) -> Selection {
        self.selection
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_day_disabled(&self) -> bool {
        self.selection.year.is_empty() || self.selection.month.is_empty()
    }

    /// `YYYY-M-D` built from the fields, if they name a real calendar date.
    pub fn composed_date(&self) -> Option<String> {
        let Selection { year, month, day } = &self.selection;
        if !self.selection.is_complete() {
            return None;
        }
        calendar::parse_composed(year, month, day)?;
        Some(format!("{year}-{month}-{day}"))
    }

    pub fn options(&self) -> OptionLists {
        let current_year = self.today.year();
        OptionLists {
            years: (0..self.bounds.year_range)
                .map(|offset| current_year - offset as i32)
                .collect(),
            months: (1..=self.bounds.month_range).collect(),
            days: (1..=self.bounds.day_range).collect(),
            day_disabled: self.is_day_disabled(),
        }
    }

    /// In the current year only months already finished are offered.
    fn month_bound(&self) -> u32 {
        match calendar::parse_year(&self.selection.year) {
            Some(year) if year == self.today.year() => self.today.month0(),
            _ => MONTHS_IN_YEAR,
        }
    }

    fn cascade_year(&mut self) {
        let bound = self.month_bound();
        self.bounds.month_range = bound;
        if bound < MONTHS_IN_YEAR {
            let selected = self.selection.month.parse::<u32>().unwrap_or(0);
            if selected > bound {
                debug!(month = %self.selection.month, bound, "clearing month beyond bound");
                self.selection.month.clear();
            }
        }
    }

    fn refresh_day_range(&mut self) {
        self.bounds.day_range = if self.is_day_disabled() {
            0
        } else {
            calendar::parse_year(&self.selection.year)
                .zip(self.selection.month.parse::<u32>().ok())
                .and_then(|(year, month)| calendar::days_in_month(year, month))
                .unwrap_or(0)
        };
    }

    fn notify(&mut self) {
        if let Some(date) = self.composed_date() {
            debug!(%date, "birth date selected");
            (self.on_birth_change)(&date);
        }
    }
}
