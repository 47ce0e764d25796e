pub mod display_time;
pub mod pagination;
