//! Full dashboard page assembly.
//!
//! # Architecture
//! - `layout.rs`: page structure and the addressable render targets
//! - `css.rs`: skeleton and banner styling

mod css;
mod layout;

use std::collections::BTreeMap;

use fundboard_core::DateRange;

use crate::target::RenderTarget;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_ICONS_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css";

/// Generate the complete dashboard HTML document.
pub fn document(
    slots: &BTreeMap<RenderTarget, String>,
    banners: &[String],
    range: Option<&DateRange>,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dashboard</title>
    <link rel="stylesheet" href="{bootstrap}">
    <link rel="stylesheet" href="{icons}">
    <style>
{css}
    </style>
</head>
<body>
{html}
</body>
</html>"#,
        bootstrap = BOOTSTRAP_CSS,
        icons = BOOTSTRAP_ICONS_CSS,
        css = css::STYLES,
        html = layout::body(slots, banners, range),
    )
}
