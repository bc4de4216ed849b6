//! Client-side submission pipeline for the Tomohigara bug-report form.
//!
//! - [`attachments`]: screenshot ingestion, previews, deletion
//! - [`form`]: the form state machine and submission controller
//! - [`mount`]: a mounted form with its clipboard paste listener
//! - [`payload`] / [`transport`]: the multipart request and its delivery

pub mod attachments;
pub mod config;
pub mod form;
pub mod mount;
pub mod payload;
pub mod preview;
pub mod transport;
pub mod verification;

#[cfg(test)]
mod testing;
