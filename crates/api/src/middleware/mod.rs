//! Request middleware.
//!
//! - [`locale::locale_redirect`] -- sends unprefixed page requests to their
//!   `/{lang}/...` location.

pub mod locale;
