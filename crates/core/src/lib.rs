pub mod desk;
pub mod error;
pub mod message;
pub mod models;
pub mod site;
pub mod validation;

pub use desk::InquiryDesk;
pub use error::{ConfigError, InquiryError};
pub use message::{extract_message, pct_encode, whatsapp_link, InquiryFormatter};
pub use models::*;
pub use site::{FleetCard, NavLink, Promise, SiteProfile, Stat, WEDDING_CHAT_TEXT};
pub use validation::{FieldError, InquiryPolicy, ValidationReport};
