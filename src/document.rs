//! Uploaded file handling.
//!
//! Uploads may be raster images or PDFs. Images go to the external OCR
//! engine; PDFs carry their own text layer, recovered here. Anything else
//! is rejected before any engine is called.

use crate::error::ServiceError;

/// What an upload turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Image,
    Pdf,
}

/// Checks that the uploaded bytes look like an image in a known format or
/// a PDF, rejecting anything else as unreadable input. Full decoding is the
/// engines' job; the gate only sniffs the container.
pub fn sniff_document(data: &[u8]) -> Result<DocumentKind, ServiceError> {
    if image::guess_format(data).is_ok() {
        return Ok(DocumentKind::Image);
    }
    if data.starts_with(b"%PDF") {
        return Ok(DocumentKind::Pdf);
    }
    Err(ServiceError::unreadable_input(
        "file is neither a known image format nor a PDF document",
    ))
}

/// Recovers the embedded text layer of a PDF. A PDF whose text cannot be
/// read is unreadable input, same as undecodable image bytes.
pub fn pdf_text(data: &[u8]) -> Result<String, ServiceError> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| ServiceError::unreadable_input(format!("Could not read PDF text: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 grayscale PNG: signature, IHDR, IDAT, IEND.
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00,
        0x00, 0x3a, 0x7e, 0x9b, 0x55, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9c, 0x63, 0x62, 0x00, 0x00, 0x00, 0x06, 0x00, 0x03, 0x36, 0x37, 0x7c, 0xa8, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn png_bytes_sniff_as_image() {
        assert_eq!(sniff_document(TINY_PNG).unwrap(), DocumentKind::Image);
    }

    #[test]
    fn jpeg_magic_sniffs_as_image() {
        let jpeg_header = [0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x49, 0x46, 0x00];
        assert_eq!(sniff_document(&jpeg_header).unwrap(), DocumentKind::Image);
    }

    #[test]
    fn pdf_magic_sniffs_as_pdf() {
        assert_eq!(
            sniff_document(b"%PDF-1.4 rest of the file").unwrap(),
            DocumentKind::Pdf
        );
    }

    #[test]
    fn garbage_is_unreadable_input() {
        let err = sniff_document(b"definitely not a document").unwrap_err();
        assert_eq!(err.error_code(), "UNREADABLE_INPUT");
    }

    #[test]
    fn empty_upload_is_unreadable_input() {
        let err = sniff_document(&[]).unwrap_err();
        assert_eq!(err.error_code(), "UNREADABLE_INPUT");
    }
}
