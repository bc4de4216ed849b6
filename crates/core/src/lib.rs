//! Domain types for the Tomohigara bug-report form.
//!
//! Everything in this crate is pure: field values, the error set, the
//! validation rules, attachment limits, the submission status machine,
//! locale negotiation and the message dictionaries. I/O lives in
//! `tomohigara-client` and `tomohigara-api`.

pub mod attachment;
pub mod error;
pub mod error_set;
pub mod fields;
pub mod locale;
pub mod messages;
pub mod status;
pub mod validation;
pub mod verification;
