//! Query services over typed programs.
//!
//! Every query starts by locating the node under the cursor with
//! [`locate::locate`], classifies it into a [`locate::Target`], and then
//! answers from the declaration or from the occurrence set of that target.

pub mod definition;
pub mod hints;
pub mod hover;
pub mod locate;
pub mod occurrences;
pub mod protocol;
pub mod references;
pub mod rename;
pub mod span;

mod error;

pub use error::AnalyzerError;
