use std::panic::{self, AssertUnwindSafe};

use super::ExtractionError;

/// Extracts the text layer of a PDF held in memory.
///
/// pdf-extract panics on some malformed inputs, so the call is isolated with
/// `catch_unwind` and a panic is reported as a parsing failure.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(pdf_bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::PdfParsing(e.to_string())),
        Err(_) => Err(ExtractionError::PdfParsing(
            "extractor panicked on malformed input".to_string(),
        )),
    }
}
