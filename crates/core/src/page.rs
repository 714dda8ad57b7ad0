//! Newspaper-page rendering of a comparison.
//!
//! Pure display: article + citations in, fixed-width text out.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::article::{ComparisonData, GroundingSource, ProductDetails};
use crate::edit::ProductSlot;

/// Masthead printed above every edition.
pub const MASTHEAD: &str = "THE EDITORIAL REVIEW";

/// Narrowest page we lay out; narrower requests are widened.
pub const MIN_PAGE_WIDTH: usize = 40;

/// Render the final edition at `width` columns.
pub fn render_page(data: &ComparisonData, sources: &[GroundingSource], width: usize) -> String {
    let width = width.max(MIN_PAGE_WIDTH);
    let heavy = "=".repeat(width);
    let light = "-".repeat(width);
    let mut out = String::new();

    push_line(&mut out, &heavy);
    push_line(&mut out, &center(MASTHEAD, width));
    push_line(&mut out, &heavy);
    push_line(
        &mut out,
        &spread(&data.category.to_uppercase(), &data.date, width),
    );
    push_line(&mut out, &light);
    out.push('\n');

    for line in wrap(&data.title.to_uppercase(), width) {
        push_line(&mut out, &center(&line, width));
    }
    for line in wrap(&data.subtitle, width) {
        push_line(&mut out, &center(&line, width));
    }
    out.push('\n');
    push_line(&mut out, &format!("By {}", data.author));
    out.push('\n');
    push_paragraph(&mut out, &data.summary, width);

    push_product(&mut out, &data.product_a, ProductSlot::A.fallback_name(), width);
    push_product(&mut out, &data.product_b, ProductSlot::B.fallback_name(), width);

    push_line(&mut out, &heavy);
    push_line(&mut out, &center("THE VERDICT", width));
    push_line(&mut out, &light);
    push_paragraph(&mut out, &data.verdict, width);

    if !sources.is_empty() {
        push_line(&mut out, &light);
        push_line(&mut out, "Sources");
        for (i, source) in sources.iter().enumerate() {
            let title = if source.title.trim().is_empty() { &source.uri } else { &source.title };
            push_line(&mut out, &format!("[{}] {}", i + 1, title));
            push_line(&mut out, &format!("    {}", source.uri));
        }
    }
    push_line(&mut out, &heavy);
    out
}

fn push_product(out: &mut String, product: &ProductDetails, fallback: &str, width: usize) {
    let light = "-".repeat(width);
    push_line(out, &light);
    push_line(
        out,
        &spread(&product.display_name(fallback).to_uppercase(), &stars(product.rating), width),
    );
    push_line(out, &format!("Price: {}", product.price_range));
    if let Some(image) = product.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
        push_line(out, &format!("Image: {}", image));
    }
    out.push('\n');
    push_list(out, "Strengths", '+', &product.pros, width);
    push_list(out, "Drawbacks", '-', &product.cons, width);
    push_line(out, &format!("Buy Now -> {}", product.affiliate_url));
    out.push('\n');
}

fn push_list(out: &mut String, label: &str, bullet: char, items: &[String], width: usize) {
    push_line(out, label);
    let items: Vec<&String> = items.iter().filter(|s| !s.trim().is_empty()).collect();
    if items.is_empty() {
        push_line(out, "  (none listed)");
    }
    for item in items {
        for (i, line) in wrap(item, width.saturating_sub(4)).into_iter().enumerate() {
            let prefix = if i == 0 { format!("  {} ", bullet) } else { "    ".to_string() };
            push_line(out, &format!("{}{}", prefix, line));
        }
    }
    out.push('\n');
}

fn push_paragraph(out: &mut String, text: &str, width: usize) {
    for para in text.split("\n\n") {
        for line in wrap(para, width) {
            push_line(out, &line);
        }
        out.push('\n');
    }
}

fn push_line(out: &mut String, line: &str) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Star bar for a 0-5 rating, rounded to the nearest half star.
pub fn stars(rating: f64) -> String {
    let halves = (rating.clamp(0.0, 5.0) * 2.0).round() as usize;
    let full = halves / 2;
    let half = halves % 2;
    let empty = 5 - full - half;
    format!(
        "{}{}{} {:.1}/5",
        "\u{2605}".repeat(full),
        if half == 1 { "\u{00BD}" } else { "" },
        "\u{2606}".repeat(empty),
        rating.clamp(0.0, 5.0),
    )
}

/// Greedy word wrap on display width. Words wider than a line get a
/// line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn spread(left: &str, right: &str, width: usize) -> String {
    let gap = width.saturating_sub(left.width() + right.width()).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}
