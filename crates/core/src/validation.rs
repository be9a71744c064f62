use std::fmt;

use serde::Serialize;

use crate::error::InquiryError;
use crate::models::{BookingInquiry, InquiryField, RouteFields};

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;
pub const MIN_PHONE_LEN: usize = 10;
pub const MAX_PHONE_LEN: usize = 15;
pub const MIN_ROUTE_LEN: usize = 10;
pub const MAX_ROUTE_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: InquiryField,
    pub message: String,
}

/// Field-level outcome of validating one inquiry, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: InquiryField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn fields(&self) -> Vec<InquiryField> {
        self.errors.iter().map(|error| error.field).collect()
    }

    fn reject(&mut self, field: InquiryField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field.as_str(), error.message))
            .collect::<Vec<_>>();
        f.write_str(&rendered.join("; "))
    }
}

#[derive(Debug, Clone)]
pub struct InquiryPolicy {
    vehicle_options: Vec<String>,
    route_fields: RouteFields,
}

impl InquiryPolicy {
    pub fn new(vehicle_options: Vec<String>, route_fields: RouteFields) -> Self {
        Self {
            vehicle_options,
            route_fields,
        }
    }

    pub fn route_fields(&self) -> RouteFields {
        self.route_fields
    }

    pub fn validate(&self, inquiry: &BookingInquiry) -> ValidationReport {
        let mut report = ValidationReport::default();

        let name_len = input_len(&inquiry.full_name);
        if name_len < MIN_NAME_LEN {
            report.reject(
                InquiryField::FullName,
                format!("Name must be at least {MIN_NAME_LEN} characters"),
            );
        } else if name_len > MAX_NAME_LEN {
            report.reject(InquiryField::FullName, too_long(MAX_NAME_LEN));
        }

        // Length only: numbering plans and country codes are left to the caller.
        let phone_len = input_len(&inquiry.phone);
        if phone_len < MIN_PHONE_LEN {
            report.reject(InquiryField::Phone, "Please enter a valid phone number");
        } else if phone_len > MAX_PHONE_LEN {
            report.reject(InquiryField::Phone, too_long(MAX_PHONE_LEN));
        }

        if inquiry.trip_type.is_empty() {
            report.reject(InquiryField::TripType, "Please select a trip type");
        }

        if inquiry.vehicle_pref.is_empty() {
            report.reject(InquiryField::VehiclePref, "Please select a vehicle");
        } else if !self
            .vehicle_options
            .iter()
            .any(|option| option == &inquiry.vehicle_pref)
        {
            report.reject(
                InquiryField::VehiclePref,
                "Please select a vehicle from the list",
            );
        }

        if inquiry.seats.is_empty() {
            report.reject(InquiryField::Seats, "Please enter number of passengers");
        }

        if inquiry.travel_date.is_empty() {
            report.reject(InquiryField::TravelDate, "Please select a travel date");
        }

        if self.route_fields == RouteFields::Combined {
            let route_len = input_len(&inquiry.route_details);
            if route_len < MIN_ROUTE_LEN {
                report.reject(
                    InquiryField::RouteDetails,
                    format!("Route details must be at least {MIN_ROUTE_LEN} characters"),
                );
            } else if route_len > MAX_ROUTE_LEN {
                report.reject(
                    InquiryField::RouteDetails,
                    format!("Route details must be at most {MAX_ROUTE_LEN} characters"),
                );
            }
        }

        report
    }

    pub fn check(&self, inquiry: &BookingInquiry) -> Result<(), InquiryError> {
        let report = self.validate(inquiry);
        if report.is_valid() {
            Ok(())
        } else {
            Err(InquiryError::Invalid(report))
        }
    }
}

/// Length the way browser form controls count it, in UTF-16 code units.
fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn too_long(max: usize) -> String {
    format!("String must contain at most {max} character(s)")
}
