use serde::{Deserialize, Serialize};

/// The visitor's in-progress choice. An empty string means the field is unselected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Selection {
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub day: String,
}

impl Selection {
    pub fn is_complete(&self) -> bool {
        !self.year.is_empty() && !self.month.is_empty() && !self.day.is_empty()
    }
}

/// Option counts currently offered by each select list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub year_range: u32,
    pub month_range: u32,
    pub day_range: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Year,
    Month,
    #[serde(alias = "days")]
    Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: Field,
    #[serde(default)]
    pub value: String,
}

/// Values rendered into the three select lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLists {
    pub years: Vec<i32>,
    pub months: Vec<u32>,
    pub days: Vec<u32>,
    pub day_disabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PickerRequest {
    #[serde(default)]
    pub selection: Selection,
    pub change: Option<FieldChange>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PickerResponse {
    pub selection: Selection,
    pub bounds: Bounds,
    pub options: OptionLists,
    pub birth_date: Option<String>,
}
