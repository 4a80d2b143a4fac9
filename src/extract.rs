//! Document text extraction for uploaded files (.txt, .pdf, .docx)

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use pyo3::prelude::*;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Extraction failure reasons; collapsed to an empty string at the
/// public boundary
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("not a regular file: {0}")]
    NotAFile(String),

    #[error("unsupported file extension: {0:?}")]
    Unsupported(Option<String>),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to extract PDF text: {0}")]
    Pdf(String),

    #[error("failed to extract DOCX text: {0}")]
    Docx(String),
}

/// Extract text from .txt, .pdf, .docx files.
///
/// Returns an empty string for missing files, unsupported extensions,
/// or any extraction failure; it never raises to the caller.
pub fn extract_text(path: &str) -> String {
    match try_extract_text(path) {
        Ok(text) => text,
        Err(err @ (ExtractError::NotAFile(_) | ExtractError::Unsupported(_))) => {
            debug!("extraction skipped for {}: {}", path, err);
            String::new()
        }
        Err(err) => {
            warn!("extraction failed for {}: {}", path, err);
            String::new()
        }
    }
}

/// Fallible extraction, dispatched on the lowercased path extension
pub(crate) fn try_extract_text(path: &str) -> Result<String, ExtractError> {
    let path = Path::new(path);
    if !path.is_file() {
        return Err(ExtractError::NotAFile(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("pdf") => extract_pdf(path),
        Some("docx") => extract_docx(path),
        Some("txt") => extract_plain(path),
        other => Err(ExtractError::Unsupported(other.map(str::to_string))),
    }
}

/// Concatenate the extracted text of every page
fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let doc = lopdf::Document::load(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let mut text = String::new();
    for (page_num, _page_id) in doc.get_pages() {
        // A page that yields no text contributes an empty segment
        match doc.extract_text(&[page_num]) {
            Ok(content) => text.push_str(&content),
            Err(e) => debug!("no text on page {}: {}", page_num, e),
        }
    }
    Ok(text)
}

/// Join paragraph texts from word/document.xml with newlines
fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing word/document.xml: {}", e)))?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    parse_document_xml(&document_xml)
}

fn parse_document_xml(xml: &str) -> Result<String, ExtractError> {
    // Run text is taken verbatim; markup whitespace outside w:t is ignored
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => current.clear(),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    let run = e.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                    current.push_str(&run);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
    }

    Ok(paragraphs.join("\n").trim().to_string())
}

/// Read a plain-text file, replacing invalid byte sequences
fn extract_plain(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ============= Python Binding =============

#[pyfunction]
#[pyo3(name = "extract_text")]
pub fn py_extract_text(path: &str) -> PyResult<String> {
    Ok(extract_text(path))
}
