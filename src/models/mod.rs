pub mod entry;
pub mod rating;

pub use entry::{saved_snapshot, CachedEntry, EntrySnapshot};
pub use rating::{RatingDimension, RatingSettings};
