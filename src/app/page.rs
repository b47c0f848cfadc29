//! View model of the page: select lists, labels and display areas, keyed by their element ids.

use crate::domain::model::Address;
use crate::utils::error::{DappError, Result};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectList<T> {
    id: &'static str,
    options: Vec<T>,
    selected: usize,
}

impl<T: Clone + PartialEq> SelectList<T> {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            options: Vec::new(),
            selected: 0,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Appends options; existing ones stay.
    pub fn append(&mut self, items: impl IntoIterator<Item = T>) {
        self.options.extend(items);
    }

    pub fn clear(&mut self) {
        self.options.clear();
        self.selected = 0;
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&T> {
        self.options.get(self.selected)
    }

    pub fn select(&mut self, index: usize) -> Result<&T> {
        if index >= self.options.len() {
            return Err(DappError::SelectionError {
                list: self.id.to_string(),
                index,
            });
        }
        self.selected = index;
        Ok(&self.options[index])
    }

    pub fn select_value(&mut self, value: &T) -> Result<()> {
        let index = self
            .options
            .iter()
            .position(|o| o == value)
            .unwrap_or(self.options.len());
        self.select(index).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
}

impl Row {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Shows the error text when there is one, otherwise the value.
    pub fn from_outcome<T: Display>(label: impl Into<String>, outcome: &Result<T>) -> Self {
        let value = match outcome {
            Ok(value) => value.to_string(),
            Err(e) => e.to_string(),
        };
        Self::new(label, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub description: Option<String>,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            rows: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub select_airline: SelectList<Address>,
    pub select_account: SelectList<Address>,
    pub populate_registered: SelectList<Address>,
    pub populate_funded: SelectList<Address>,
    pub populate_flights: SelectList<String>,
    pub passenger_list: SelectList<Address>,
    pub passenger_list2: SelectList<Address>,
    pub flight_time: String,
    pub flight_airline: String,
    /// `display-wrapper`: sections accumulate.
    pub display_wrapper: Vec<Section>,
    /// `display-balance`: replaced on every update.
    pub display_balance: Option<Section>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            select_airline: SelectList::new("selectAirline"),
            select_account: SelectList::new("selectAccount"),
            populate_registered: SelectList::new("populateRegistered"),
            populate_funded: SelectList::new("populateFunded"),
            populate_flights: SelectList::new("populateFlights"),
            passenger_list: SelectList::new("passengerList"),
            passenger_list2: SelectList::new("passengerList2"),
            flight_time: String::new(),
            flight_airline: String::new(),
            display_wrapper: Vec::new(),
            display_balance: None,
        }
    }
}

impl Page {
    pub fn display(&mut self, section: Section) {
        self.display_wrapper.push(section);
    }
}
