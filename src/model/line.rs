use serde::{Deserialize, Serialize};

/// A transit line found on one of the listing pages.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LineDescriptor {
    /// Number/name as published. Not unique across areas.
    #[serde(rename = "line")]
    pub line_id: String,
    #[serde(rename = "url")]
    pub detail_url: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    /// Set by whoever asked for the listing page, never read from the page itself.
    pub area: Area,
    pub route: Route,
}

/// Start and end terminus of a line. Both halves are non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Route {
    pub start: String,
    pub end: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum VehicleType {
    #[serde(rename = "bus")]
    Bus,
    #[serde(rename = "mini-bus")]
    MiniBus,
    #[serde(rename = "tram")]
    Tram,
    #[default]
    #[serde(rename = "trolley")]
    Trolley,
}

impl VehicleType {
    /// CSS class marking a listing element as this vehicle type, checked in this order.
    /// Trolleys carry no marker.
    pub const MARKERS: [(&'static str, VehicleType); 3] = [
        ("buses", VehicleType::Bus),
        ("minibuses", VehicleType::MiniBus),
        ("trams", VehicleType::Tram),
    ];

    /// Picks the vehicle type from an element's classes, trolley if nothing matches.
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str> + Clone) -> Self {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| classes.clone().into_iter().any(|c| c == *marker))
            .map(|(_, vehicle_type)| *vehicle_type)
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Area {
    #[serde(rename = "urban")]
    Urban,
    #[serde(rename = "metropolis")]
    Metropolitan,
}

impl Area {
    /// Every area with a published listing page, urban first.
    pub const ALL: [Area; 2] = [Area::Urban, Area::Metropolitan];

    /// Listing page path, relative to the site's base url.
    pub fn listing_path(self) -> &'static str {
        match self {
            Area::Urban => "/index.php/en/timetables/urban-lines",
            Area::Metropolitan => "/index.php/en/timetables/metropolitan-lines",
        }
    }
}
