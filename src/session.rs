//! Interactive session loop
//!
//! Drives the state → site list → nearby places traversal. Input handling
//! lives in [`Session::handle_line`], a transition that consumes one line
//! and returns the lines to print plus whether the loop continues, so the
//! whole traversal can be unit tested without touching stdin. Bad input and
//! failed retrievals both turn into inline `[Error]` lines; neither ends
//! the session.

use tracing::{info, warn};

use crate::data::{ParkSite, PlacesClient, SiteClient, StateDirectory};
use crate::ui;

/// Prompt shown while waiting for a state name
pub const STATE_PROMPT: &str =
    "Enter a state name (e.g. Michigan, michigan), or \"exit\" to quit: ";

/// Prompt shown while a site listing is open
pub const SITE_PROMPT: &str = "Choose the number for detail search or \"exit\" or \"back\": ";

/// Inline error for an unusable menu selection
pub const INVALID_INPUT: &str = "[Error] Invalid input";

/// Inline error for an unrecognized state name
pub const INVALID_STATE: &str = "[Error] Enter proper state name";

/// What the caller should do after a handled line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Where the session currently is
enum View {
    StatePrompt,
    SiteList { sites: Vec<ParkSite> },
}

/// One user's interactive traversal of the directory
pub struct Session {
    directory: StateDirectory,
    sites: SiteClient,
    places: PlacesClient,
    view: View,
}

impl Session {
    /// Creates a session at the state prompt.
    ///
    /// # Arguments
    /// * `directory` - Resolved state directory for this session
    /// * `sites` - Site client sharing the session cache
    /// * `places` - Places client sharing the session cache
    pub fn new(directory: StateDirectory, sites: SiteClient, places: PlacesClient) -> Self {
        Self {
            directory,
            sites,
            places,
            view: View::StatePrompt,
        }
    }

    /// The prompt for the current view
    pub fn prompt(&self) -> &'static str {
        match self.view {
            View::StatePrompt => STATE_PROMPT,
            View::SiteList { .. } => SITE_PROMPT,
        }
    }

    /// Handles one line of user input.
    ///
    /// # Returns
    /// * The lines to print, in order, and whether the loop continues
    pub async fn handle_line(&mut self, line: &str) -> (Vec<String>, Flow) {
        let input = line.trim();
        match self.view {
            View::StatePrompt => self.handle_state_input(input).await,
            View::SiteList { .. } => self.handle_selection_input(input).await,
        }
    }

    /// State-prompt input: "exit" or a state name, matched case-insensitively
    async fn handle_state_input(&mut self, input: &str) -> (Vec<String>, Flow) {
        let state = input.to_lowercase();
        if state == "exit" {
            return (Vec::new(), Flow::Exit);
        }

        let listing_url = match self.directory.listing_url(&state) {
            Some(url) => url.to_string(),
            None => return (vec![INVALID_STATE.to_string()], Flow::Continue),
        };

        info!("loading sites for {}", state);
        match self.sites.sites_for_state(&listing_url).await {
            Ok(sites) => {
                let lines = ui::site_list_lines(&state, &sites);
                self.view = View::SiteList { sites };
                (lines, Flow::Continue)
            }
            Err(err) => {
                warn!("failed to load sites for {}: {}", state, err);
                (
                    vec![format!("[Error] Could not load sites for {}: {}", state, err)],
                    Flow::Continue,
                )
            }
        }
    }

    /// Listing input: "exit", "back", or a 1-based index into the listing
    async fn handle_selection_input(&mut self, input: &str) -> (Vec<String>, Flow) {
        if input == "exit" {
            return (Vec::new(), Flow::Exit);
        }
        if input == "back" {
            self.view = View::StatePrompt;
            return (Vec::new(), Flow::Continue);
        }

        let site = {
            let sites = match &self.view {
                View::SiteList { sites } => sites,
                View::StatePrompt => return (vec![INVALID_INPUT.to_string()], Flow::Continue),
            };
            match parse_selection(input, sites.len()) {
                Some(index) => sites[index].clone(),
                None => return (vec![INVALID_INPUT.to_string()], Flow::Continue),
            }
        };

        info!("loading places near {}", site.name);
        match self.places.nearby_places(&site).await {
            Ok(places) => (ui::place_lines(&site.name, &places), Flow::Continue),
            Err(err) => {
                warn!("failed to load places near {}: {}", site.name, err);
                (
                    vec![format!(
                        "[Error] Could not load places near {}: {}",
                        site.name, err
                    )],
                    Flow::Continue,
                )
            }
        }
    }
}

/// Interprets `input` as a 1-based listing index.
///
/// Only unsigned digit strings qualify, so negative numbers and other signed
/// forms are rejected outright; zero and past-the-end values are rejected as
/// out of range.
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: usize = input.parse().ok()?;
    if value == 0 || value > len {
        return None;
    }
    Some(value - 1)
}
