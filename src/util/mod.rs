// Dataset helpers.
// Date spans and list membership checks used when assembling mined datasets.

pub mod dates;
pub mod lists;

pub use dates::{DaySpan, days_between};
pub use lists::{Containee, in_list, in_list_count};
