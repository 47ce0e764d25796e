mod cache;
pub mod catalog;
pub mod console;
pub mod dispatcher;
pub mod mapper;
