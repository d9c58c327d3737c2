//! Document-level attributes set by the page while it composes.
//!
//! The page knows its language, direction and title; the runner owns the
//! `<html>` element. Pages call `set_document` during composition and the
//! runner reads the result after the frame is painted.

use std::cell::RefCell;

use crate::TextDirection;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    /// BCP 47 language tag for `<html lang>`.
    pub lang: String,
    pub dir: TextDirection,
    pub title: String,
}

thread_local! {
    static DOCUMENT: RefCell<DocumentMeta> = RefCell::new(DocumentMeta::default());
}

pub fn set_document(meta: DocumentMeta) {
    DOCUMENT.with(|d| *d.borrow_mut() = meta);
}

/// The attributes from the most recent `set_document`; `lang` defaults to
/// `"en"`.
pub fn document() -> DocumentMeta {
    let mut meta = DOCUMENT.with(|d| d.borrow().clone());
    if meta.lang.is_empty() {
        meta.lang = "en".to_string();
    }
    meta
}
