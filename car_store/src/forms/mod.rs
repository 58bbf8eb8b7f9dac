//! Add/edit car forms.
//!
//! Forms keep what the user typed verbatim. Coercion to typed values happens
//! once, on submit, through [`CarForm::to_input`].

pub mod car_form;
pub mod errors;

pub use car_form::CarForm;
pub use errors::{FormError, FormResult};
