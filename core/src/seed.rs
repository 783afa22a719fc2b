//! Sample data for demos and tests.

use chrono::NaiveDate;

use crate::error::TodoError;
use crate::model::{ToDo, ToDoInput};
use crate::repository::ToDoRepository;

const fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid sample date"),
    }
}

const SAMPLES: [(&str, NaiveDate, i32); 5] = [
    ("Bake christmas cookies.", day(2023, 12, 24), 1),
    ("Feed cats.", day(2023, 11, 3), 3),
    ("Prepare exam questions.", day(2024, 6, 5), 3),
    ("Change tires.", day(2023, 10, 31), 1),
    ("Do laundry.", day(2023, 11, 5), 2),
];

/// Five sample items, deliberately not in deadline order.
pub fn sample_todos() -> Vec<ToDoInput> {
    SAMPLES
        .into_iter()
        .map(|(description, deadline, priority)| ToDoInput::new(description, deadline, priority))
        .collect()
}

/// Store every item through [`ToDoRepository::add`], stopping at the first
/// failure.
pub async fn seed(
    repo: &ToDoRepository,
    items: impl IntoIterator<Item = ToDoInput>,
) -> Result<Vec<ToDo>, TodoError> {
    let mut stored = Vec::new();
    for item in items {
        stored.push(repo.add(item).await?);
    }
    Ok(stored)
}
