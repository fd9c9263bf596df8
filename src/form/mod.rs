pub mod controller;

pub use controller::{FormController, FormError, FormView};
