use crate::error::InquiryError;
use crate::message::{pct_encode, whatsapp_link, InquiryFormatter};
use crate::models::{BookingInquiry, ComposedInquiry, RouteFields};
use crate::site::SiteProfile;
use crate::validation::{InquiryPolicy, ValidationReport};

/// Validate-then-format pipeline for booking inquiries of one business.
#[derive(Debug, Clone)]
pub struct InquiryDesk {
    policy: InquiryPolicy,
    formatter: InquiryFormatter,
    whatsapp_number: String,
}

impl InquiryDesk {
    pub fn new(profile: &SiteProfile, route_fields: RouteFields) -> Self {
        Self {
            policy: InquiryPolicy::new(profile.vehicle_options.clone(), route_fields),
            formatter: InquiryFormatter::for_business(&profile.short_name),
            whatsapp_number: profile.whatsapp_number.clone(),
        }
    }

    pub fn route_fields(&self) -> RouteFields {
        self.policy.route_fields()
    }

    pub fn validate(&self, inquiry: &BookingInquiry) -> ValidationReport {
        self.policy.validate(inquiry)
    }

    /// Produces the message and deep link, or the field errors blocking it.
    pub fn compose(&self, inquiry: &BookingInquiry) -> Result<ComposedInquiry, InquiryError> {
        self.policy.check(inquiry)?;

        let message = self.formatter.compose(inquiry, self.policy.route_fields());
        Ok(ComposedInquiry {
            encoded_message: pct_encode(&message),
            whatsapp_url: whatsapp_link(&self.whatsapp_number, Some(&message)),
            message,
        })
    }
}
