pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorCategory, RoasterError};
pub use traits::AnalysisStore;
pub use types::{
    AnalysisRecord, AnalysisRequest, AnalysisView, DocumentUpload, StatusCheck,
    STATUS_LIST_LIMIT,
};
