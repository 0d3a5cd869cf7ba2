// Upload surface: multipart intake, batch execution, HTML/JSON/CSV responses.
// Extraction and inference stay in `batch`; nothing here inspects document text.

pub mod handlers;
pub mod upload;
