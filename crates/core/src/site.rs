use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::message::whatsapp_link;

pub const WEDDING_CHAT_TEXT: &str = "Hello! I'm planning a wedding and need transport assistance.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetCard {
    pub name: String,
    pub category: String,
    pub image: String,
    pub features: Vec<String>,
    pub ideal_for: String,
    /// Vehicle option pre-selected on the contact form by "Book Now".
    pub books_as: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promise {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    pub business_name: String,
    pub short_name: String,
    pub tagline: String,
    pub public_url: String,
    pub phone_display: String,
    pub phone_dial: String,
    pub whatsapp_number: String,
    pub email: String,
    pub address_lines: Vec<String>,
    pub instagram_url: String,
    pub map_embed_url: String,
    pub vehicle_options: Vec<String>,
    pub fleet: Vec<FleetCard>,
    pub rental_services: Vec<String>,
    pub footer_services: Vec<String>,
    pub trust_badges: Vec<String>,
    pub footer_badges: Vec<String>,
    pub stats: Vec<Stat>,
    pub promises: Vec<Promise>,
    pub nav_links: Vec<NavLink>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            business_name: "Bright Tours & Travels".to_string(),
            short_name: "Bright Tours".to_string(),
            tagline: "Travel Made Easy. Verified service provider in Bidar with All India Permits."
                .to_string(),
            public_url: "https://brighttours.in".to_string(),
            phone_display: "+91 90351 19555".to_string(),
            phone_dial: "+919035119555".to_string(),
            whatsapp_number: "919035119555".to_string(),
            email: "brightgroup9595@gmail.com".to_string(),
            address_lines: strings(&[
                "1st Floor, KRE Society Complex,",
                "Opp. Karnataka Pharmacy College,",
                "Gumpa Road, Bidar - 585403",
            ]),
            instagram_url: "https://www.instagram.com/toursandtravelsbright".to_string(),
            map_embed_url: "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d30370.777779643853!2d77.47584935300623!3d17.915951866081834!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bcec736d7f37ddd%3A0xbca074da1d1f5082!2sThe%20Bright%20Academy!5e0!3m2!1sen!2sin!4v1768234795159!5m2!1sen!2sin".to_string(),
            vehicle_options: strings(&["Innova/SUV", "Tempo Traveller", "Luxury Bus", "Sedan"]),
            fleet: vec![
                FleetCard {
                    name: "Luxury Bus".to_string(),
                    category: "Large Group".to_string(),
                    image: "/assets/luxury-bus.jpg".to_string(),
                    features: strings(&[
                        "40+ Seats",
                        "Push-back Seats",
                        "Ample Luggage",
                        "Mood Lighting",
                    ]),
                    ideal_for: "Weddings, School Trips, Corporate Events".to_string(),
                    books_as: "Luxury Bus".to_string(),
                },
                FleetCard {
                    name: "Tempo Traveller".to_string(),
                    category: "Mid-Sized Group".to_string(),
                    image: "/assets/tempo-traveller.jpg".to_string(),
                    features: strings(&[
                        "12/14/17 Seater",
                        "AC / Non-AC",
                        "Music System",
                        "Comfortable Seating",
                    ]),
                    ideal_for: "Family Pilgrimages, Group Tours".to_string(),
                    books_as: "Tempo Traveller".to_string(),
                },
                FleetCard {
                    name: "Innova Crysta / SUV".to_string(),
                    category: "Family".to_string(),
                    image: "/assets/innova-crysta.jpg".to_string(),
                    features: strings(&[
                        "6+1 Seater",
                        "Captain Seats",
                        "Air Conditioned",
                        "Premium Comfort",
                    ]),
                    ideal_for: "Family Outings, Business Travel".to_string(),
                    books_as: "Innova/SUV".to_string(),
                },
            ],
            rental_services: strings(&[
                "Daily & Weekly Rentals",
                "Doorstep Delivery & Pickup",
                "Hourly Rental Options",
                "Inter-city Cab Services",
            ]),
            footer_services: strings(&[
                "Wedding Logistics",
                "Outstation Trips",
                "Airport Transfers",
                "Pilgrimage Tours",
                "Corporate Rentals",
            ]),
            trust_badges: strings(&[
                "Verified Business",
                "On Time, Every Time",
                "50+ Happy Weddings",
                "All India Permit",
            ]),
            footer_badges: strings(&[
                "All India Permit",
                "Sanitized Vehicles",
                "Professional Chauffeurs",
            ]),
            stats: vec![
                Stat {
                    number: "50+".to_string(),
                    label: "Happy Weddings".to_string(),
                },
                Stat {
                    number: "10+".to_string(),
                    label: "Years Experience".to_string(),
                },
            ],
            promises: vec![
                promise(
                    "On Time",
                    "We value your time as much as you do. Punctuality is our hallmark.",
                ),
                promise(
                    "Safe & Secure",
                    "Rigorous maintenance and vetted chauffeurs for your peace of mind.",
                ),
                promise(
                    "Professional",
                    "Experienced drivers who prioritize your comfort and safety above all.",
                ),
                promise(
                    "Quality First",
                    "From booking to destination, experience premium service at every step.",
                ),
            ],
            nav_links: vec![
                nav("Home", "/"),
                nav("About", "/#about"),
                nav("Services", "/#services"),
                nav("Contact", "/contact"),
            ],
        }
    }
}

impl SiteProfile {
    /// Replaces the chat number; it must be 10-15 ASCII digits (country code included).
    pub fn with_whatsapp_number(mut self, number: &str) -> Result<Self, ConfigError> {
        let number = number.trim();
        let digits_only = number.chars().all(|ch| ch.is_ascii_digit());
        if !digits_only || !(10..=15).contains(&number.len()) {
            return Err(ConfigError::InvalidWhatsAppNumber(number.to_string()));
        }
        self.whatsapp_number = number.to_string();
        Ok(self)
    }

    pub fn vehicle_names(&self) -> &[String] {
        &self.vehicle_options
    }

    pub fn is_known_vehicle(&self, name: &str) -> bool {
        self.vehicle_options.iter().any(|option| option == name)
    }

    /// Maps a requested pre-selection (option or fleet card name) to a form option.
    pub fn preselect_vehicle(&self, requested: &str) -> Option<&str> {
        let requested = requested.trim();
        if let Some(option) = self
            .vehicle_options
            .iter()
            .find(|option| option.as_str() == requested)
        {
            return Some(option.as_str());
        }

        self.fleet
            .iter()
            .find(|card| card.name == requested)
            .map(|card| card.books_as.as_str())
            .filter(|option| self.is_known_vehicle(option))
    }

    pub fn whatsapp_chat_url(&self) -> String {
        whatsapp_link(&self.whatsapp_number, None)
    }

    pub fn whatsapp_link(&self, text: &str) -> String {
        whatsapp_link(&self.whatsapp_number, Some(text))
    }

    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}{}", self.public_url.trim_end_matches('/'), path)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn promise(title: &str, description: &str) -> Promise {
    Promise {
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn nav(name: &str, path: &str) -> NavLink {
    NavLink {
        name: name.to_string(),
        path: path.to_string(),
    }
}
