//! Core data models and retrieval clients for Park Scout
//!
//! This module contains the national-site record type and the three clients
//! that populate it: the state directory resolver, the site loader, and the
//! nearby-places client.

pub mod directory;
pub mod places;
pub mod sites;

pub use directory::{DirectoryClient, DirectoryError, StateDirectory};
pub use places::{PlaceFields, PlaceResult, PlacesClient, PlacesError, PlacesResponse};
pub use sites::{SiteClient, SiteError};

use serde::{Deserialize, Serialize};

/// Sentinel stored when a detail page has no designation element
pub const NO_CATEGORY: &str = "No Category";
/// Sentinel for a record constructed without a name
pub const NO_NAME: &str = "No Name";
/// Sentinel for a missing address, also used when rendering places
pub const NO_ADDRESS: &str = "No Address";
/// Sentinel for a record constructed without a postal code
pub const NO_ZIP_CODE: &str = "No Zip-Code";
/// Sentinel stored when a detail page has no phone element
pub const NO_PHONE_NUMBER: &str = "No Phone Number";
/// Sentinel used when rendering a place with no city field
pub const NO_CITY: &str = "No City";

/// One national site's descriptive record.
///
/// Every field is always populated: either with the value extracted from
/// the site's detail page or with the matching sentinel when the page omits
/// that element. Records are built once per unique detail URL and are
/// immutable afterwards; the cache hands out clones.
///
/// Postal codes are kept verbatim (a 9-digit code like "82190-0168" keeps
/// its hyphen) and are passed straight through as an API parameter, never
/// interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkSite {
    /// Designation such as "National Park", or the category sentinel
    pub category: String,
    /// Site name from the detail-page title
    pub name: String,
    /// "City, Region" composite from the detail-page address block
    pub address: String,
    /// Postal code, verbatim
    pub postal_code: String,
    /// Contact phone, or the phone sentinel
    pub phone: String,
}

impl ParkSite {
    /// One-line summary used in numbered site listings.
    ///
    /// # Returns
    /// * A line of the form `Name (Category): Address Zip`
    pub fn summary(&self) -> String {
        format!(
            "{} ({}): {} {}",
            self.name, self.category, self.address, self.postal_code
        )
    }
}

impl Default for ParkSite {
    fn default() -> Self {
        Self {
            category: NO_CATEGORY.to_string(),
            name: NO_NAME.to_string(),
            address: NO_ADDRESS.to_string(),
            postal_code: NO_ZIP_CODE.to_string(),
            phone: NO_PHONE_NUMBER.to_string(),
        }
    }
}
