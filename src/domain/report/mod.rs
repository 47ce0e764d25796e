pub mod action;
pub mod category;
pub mod entity;
pub mod errors;
pub mod status;
