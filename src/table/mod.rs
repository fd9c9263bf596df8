pub mod renderer;

pub use renderer::{AttendanceTable, TableSnapshot, TableView};
