use serde::{Deserialize, Serialize};

/// Trip details a prospective customer submits through the contact form.
///
/// Every field is kept as submitted; missing form fields deserialize to empty
/// strings so that validation, not extraction, decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingInquiry {
    pub full_name: String,
    pub phone: String,
    pub trip_type: String,
    pub vehicle_pref: String,
    pub seats: String,
    pub travel_date: String,
    pub pickup_location: String,
    pub drop_location: String,
    pub route_details: String,
}

impl BookingInquiry {
    pub fn value(&self, field: InquiryField) -> &str {
        match field {
            InquiryField::FullName => &self.full_name,
            InquiryField::Phone => &self.phone,
            InquiryField::TripType => &self.trip_type,
            InquiryField::VehiclePref => &self.vehicle_pref,
            InquiryField::Seats => &self.seats,
            InquiryField::TravelDate => &self.travel_date,
            InquiryField::PickupLocation => &self.pickup_location,
            InquiryField::DropLocation => &self.drop_location,
            InquiryField::RouteDetails => &self.route_details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryField {
    FullName,
    Phone,
    TripType,
    VehiclePref,
    Seats,
    TravelDate,
    PickupLocation,
    DropLocation,
    RouteDetails,
}

impl InquiryField {
    /// Form order of the fields that are always present.
    pub const COMMON: [InquiryField; 6] = [
        Self::FullName,
        Self::Phone,
        Self::TripType,
        Self::VehiclePref,
        Self::Seats,
        Self::TravelDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Phone => "phone",
            Self::TripType => "trip_type",
            Self::VehiclePref => "vehicle_pref",
            Self::Seats => "seats",
            Self::TravelDate => "travel_date",
            Self::PickupLocation => "pickup_location",
            Self::DropLocation => "drop_location",
            Self::RouteDetails => "route_details",
        }
    }

    /// Label used in the composed message line (`*Label:* value`).
    pub fn message_label(self) -> &'static str {
        match self {
            Self::FullName => "Name",
            Self::Phone => "Phone",
            Self::TripType => "Trip Type",
            Self::VehiclePref => "Vehicle",
            Self::Seats => "Passengers",
            Self::TravelDate => "Date",
            Self::PickupLocation => "From",
            Self::DropLocation => "To",
            Self::RouteDetails => "Route",
        }
    }
}

/// Which location inputs the booking form carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteFields {
    /// Optional pickup and drop inputs.
    #[default]
    Split,
    /// One required free-text route description.
    Combined,
}

impl RouteFields {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "split" | "pickup_drop" | "a" => Some(Self::Split),
            "combined" | "route" | "b" => Some(Self::Combined),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Combined => "combined",
        }
    }

    /// Form order of the location fields for this layout.
    pub fn location_fields(self) -> &'static [InquiryField] {
        match self {
            Self::Split => &[InquiryField::PickupLocation, InquiryField::DropLocation],
            Self::Combined => &[InquiryField::RouteDetails],
        }
    }

    /// Every field the form carries, in the order the message lists them.
    pub fn form_fields(self) -> Vec<InquiryField> {
        InquiryField::COMMON
            .iter()
            .chain(self.location_fields())
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedInquiry {
    pub message: String,
    pub encoded_message: String,
    pub whatsapp_url: String,
}
