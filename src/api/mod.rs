pub mod employee;
pub mod export;
pub mod form;
pub mod records;
