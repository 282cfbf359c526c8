pub mod api;
pub mod date_range;
pub mod item;

pub use date_range::DateRange;
pub use item::*;
