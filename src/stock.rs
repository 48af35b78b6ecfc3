//! Stock icon previews for `Gtk.STOCK_*` constants.

pub const STOCK_PREFIX: &str = "Gtk.STOCK_";

/// Where rendered stock icon images live, relative to the generated page.
const STOCK_IMAGE_DIR: &str = "../_static/stock";

/// `Gtk.STOCK_MEDIA_PLAY` → `gtk-media-play`
pub fn stock_icon_name(name: &str) -> Option<String> {
    let id = name.strip_prefix(STOCK_PREFIX)?;
    if id.is_empty() {
        return None;
    }
    Some(format!("gtk-{}", id.to_lowercase().replace('_', "-")))
}

/// reST image snippet for a stock constant, empty for anything else.
pub fn parse_stock_icon(name: &str) -> String {
    match stock_icon_name(name) {
        Some(icon) => format!("\n\n.. image:: {}/{}.png\n", STOCK_IMAGE_DIR, icon),
        None => String::new(),
    }
}
