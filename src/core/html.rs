// src/core/html.rs

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// First descendant of `el` matching `sel`.
pub fn first<'a>(el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    el.select(sel).next()
}

/// Visible text of `el`, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Trimmed attribute value; empty counts as absent.
pub fn attr_trimmed<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).map(str::trim).filter(|v| !v.is_empty())
}
