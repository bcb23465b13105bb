//! Test fixtures: minimal PNG/PDF/DOCX blobs.

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Minimal valid PDF.
pub fn create_test_pdf() -> Vec<u8> {
    b"%PDF-1.4
1 0 obj
<< /Type /Catalog /Pages 2 0 R >>
endobj
2 0 obj
<< /Type /Pages /Kids [3 0 R] /Count 1 >>
endobj
trailer
<< /Size 3 /Root 1 0 R >>
%%EOF"
        .to_vec()
}

/// Zip local-file-header magic; enough for a DOCX upload that is never opened.
pub fn create_test_docx() -> Vec<u8> {
    let mut docx = vec![0x50, 0x4B, 0x03, 0x04];
    docx.extend_from_slice(b"[Content_Types].xml");
    docx
}

/// `len` bytes of padding behind a PNG signature.
pub fn create_png_of_size(len: usize) -> Vec<u8> {
    let mut png = create_minimal_png();
    png.resize(len, 0);
    png
}

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
