pub mod names;

pub use names::{humanize, underscore};
