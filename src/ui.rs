//! Line-oriented rendering for the interactive session
//!
//! Pure string builders, so the exact output shapes can be asserted in
//! tests. Blank place fields are substituted with their sentinels here, at
//! render time; the cached documents keep whatever the API returned.

use crate::data::{ParkSite, PlacesResponse, NO_ADDRESS, NO_CATEGORY, NO_CITY};

/// Rule printed around section headers
pub const RULE: &str = "-----------------------------------------";

/// Substitutes `fallback` when `value` is blank
fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Header block plus numbered summary lines for a state's sites
pub fn site_list_lines(state: &str, sites: &[ParkSite]) -> Vec<String> {
    let mut lines = vec![
        RULE.to_string(),
        format!("List of national sites in {}", state),
        RULE.to_string(),
    ];
    for (index, site) in sites.iter().enumerate() {
        lines.push(format!("[{}] {}", index + 1, site.summary()));
    }
    lines
}

/// Header block plus one line per nearby place
pub fn place_lines(site_name: &str, places: &PlacesResponse) -> Vec<String> {
    let mut lines = vec![
        RULE.to_string(),
        format!("Places near {}", site_name),
        RULE.to_string(),
    ];
    for place in &places.search_results {
        let category = display_or(&place.fields.group_sic_code_name, NO_CATEGORY);
        let address = display_or(&place.fields.address, NO_ADDRESS);
        let city = display_or(&place.fields.city, NO_CITY);
        lines.push(format!("{} ({}): {}, {}", place.name, category, address, city));
    }
    lines
}
