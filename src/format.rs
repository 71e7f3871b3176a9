//! Presentation helpers shared by the list and detail views

use ratatui::style::Color;

use crate::config::Endpoints;
use crate::state::{Ability, CatalogEntry, Sprites};

/// Top of the stat scale; a full bar.
pub const STAT_MAX: f64 = 255.0;
pub const NEUTRAL: Color = Color::Rgb(0x9e, 0x9e, 0x9e);
/// Stats shown by the compact detail layout, in order.
pub const COMPACT_STATS: [&str; 3] = ["hp", "attack", "defense"];

/// Trailing numeric path segment of a resource URL.
pub fn id_from_url(url: &str) -> Option<&str> {
    let segment = url.split('/').filter(|part| !part.is_empty()).last()?;
    segment
        .chars()
        .all(|ch| ch.is_ascii_digit())
        .then_some(segment)
}

pub fn thumbnail_url(endpoints: &Endpoints, entry: &CatalogEntry) -> Option<String> {
    id_from_url(&entry.url).map(|id| endpoints.thumbnail_url(id))
}

/// First character uppercased, the rest unchanged.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize every space separated word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

pub fn padded_id(id: u32) -> String {
    format!("{id:03}")
}

pub fn format_height(decimeters: u32) -> String {
    format!("{} m", f64::from(decimeters) / 10.0)
}

pub fn format_weight(hectograms: u32) -> String {
    format!("{} kg", f64::from(hectograms) / 10.0)
}

/// Bar fill in percent. Not clamped: values over the scale exceed 100.
pub fn stat_percent(base_value: u32) -> f64 {
    f64::from(base_value) / STAT_MAX * 100.0
}

/// Filled cells of a bar `width` cells wide. Overflow is cut at the edge.
pub fn bar_cells(percent: f64, width: u16) -> u16 {
    let cells = (percent / 100.0 * f64::from(width)).round();
    if cells <= 0.0 {
        0
    } else {
        (cells as u64).min(u64::from(width)) as u16
    }
}

pub fn stat_label(name: &str) -> String {
    if name == "hp" {
        return "HP".to_string();
    }
    capitalize_words(&name.replace('-', " ").replace("special", "Sp."))
}

pub fn stat_color(name: &str) -> Color {
    match name {
        "hp" => Color::Rgb(0xef, 0x53, 0x50),
        "attack" => Color::Rgb(0xfb, 0x8c, 0x00),
        "defense" => Color::Rgb(0xff, 0xca, 0x28),
        "special-attack" => Color::Rgb(0x42, 0xa5, 0xf5),
        "special-defense" => Color::Rgb(0x66, 0xbb, 0x6a),
        "speed" => Color::Rgb(0xec, 0x40, 0x7a),
        _ => NEUTRAL,
    }
}

pub fn type_color(name: &str) -> Color {
    match name {
        "normal" => Color::Rgb(0xa8, 0xa7, 0x7a),
        "fire" => Color::Rgb(0xee, 0x81, 0x30),
        "water" => Color::Rgb(0x63, 0x90, 0xf0),
        "electric" => Color::Rgb(0xf7, 0xd0, 0x2c),
        "grass" => Color::Rgb(0x7a, 0xc7, 0x4c),
        "ice" => Color::Rgb(0x96, 0xd9, 0xd6),
        "fighting" => Color::Rgb(0xc2, 0x2e, 0x28),
        "poison" => Color::Rgb(0xa3, 0x3e, 0xa1),
        "ground" => Color::Rgb(0xe2, 0xbf, 0x65),
        "flying" => Color::Rgb(0xa9, 0x8f, 0xf3),
        "psychic" => Color::Rgb(0xf9, 0x55, 0x87),
        "bug" => Color::Rgb(0xa6, 0xb9, 0x1a),
        "rock" => Color::Rgb(0xb6, 0xa1, 0x36),
        "ghost" => Color::Rgb(0x73, 0x57, 0x97),
        "dragon" => Color::Rgb(0x6f, 0x35, 0xfc),
        "dark" => Color::Rgb(0x70, 0x57, 0x46),
        "steel" => Color::Rgb(0xb7, 0xb7, 0xce),
        "fairy" => Color::Rgb(0xd6, 0x85, 0xad),
        _ => NEUTRAL,
    }
}

pub fn ability_label(ability: &Ability) -> String {
    let label = capitalize_words(&ability.name.replace('-', " "));
    if ability.is_hidden {
        format!("{label} (Hidden)")
    } else {
        label
    }
}

/// Official artwork, else the default sprite. Empty strings count as absent.
pub fn primary_image(sprites: &Sprites) -> Option<&str> {
    sprites
        .official_artwork
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| sprites.front_default.as_deref().filter(|url| !url.is_empty()))
}
