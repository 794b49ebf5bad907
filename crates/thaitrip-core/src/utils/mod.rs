pub mod format;

pub use format::{format_list, format_price, format_stars, truncate_string};
