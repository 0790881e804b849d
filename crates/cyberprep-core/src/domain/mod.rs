//! Domain records - what users submit and how it is stamped for storage.

mod proposal;
mod report;
mod stamped;

pub use proposal::ProposedQuestion;
pub use report::ReportedQuestion;
pub use stamped::Stamped;
