pub mod config;
pub mod docx;
pub mod error;
pub mod logging;
pub mod matching;
pub mod sheet;
pub mod validation;

pub use config::*;
pub use docx::*;
pub use error::*;
pub use logging::*;
pub use matching::*;
pub use sheet::*;
pub use validation::*;
