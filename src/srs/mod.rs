//! Spaced repetition scheduling: when each learned word is next due, and how
//! quiz outcomes move that date.

pub mod intervals;
pub mod policy;
pub mod record;

pub use intervals::{
    IntervalTable,
    DEFAULT_INTERVALS_DAYS,
};
pub use policy::{
    SrsPolicy,
    FIRST_REVIEW_DELAY_DAYS,
};
pub use record::{
    SrsRecord,
    SrsStore,
};
