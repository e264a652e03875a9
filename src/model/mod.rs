//! Model layer - person records and their repository

pub mod person;

pub use person::{sample_people, Person, PersonRepository};
