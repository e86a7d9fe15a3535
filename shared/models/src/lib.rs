//! # Wersmatch Core Domain Models
//!
//! Domain models for the WERS/sales code cross-reference service.
//! All models implement serialization with serde; request models carry
//! validation rules from the validator crate.
//!
//! ## Key Models
//!
//! - **MatchedCode**: A feature code found in the document, paired with its resolved sales code
//! - **MatchReport**: The ordered result set produced by one cross-reference run
//! - **MatchRequest**: The validated form parameters accompanying an upload

pub mod matching;
pub mod request;


pub use matching::*;
pub use request::*;
