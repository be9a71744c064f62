//! Server-side HTML for the public pages.
//!
//! Every page is the shared layout (navigation, footer, floating chat button)
//! around a page body. All interpolated text goes through [`escape_html`].

use bright_core::{
    pct_encode, BookingInquiry, InquiryField, RouteFields, SiteProfile, ValidationReport,
    WEDDING_CHAT_TEXT,
};

const WHATSAPP_ICON_PATH: &str = "M17.472 14.382c-.297-.149-1.758-.867-2.03-.967-.273-.099-.471-.148-.67.15-.197.297-.767.966-.94 1.164-.173.199-.347.223-.644.075-.297-.15-1.255-.463-2.39-1.475-.883-.788-1.48-1.761-1.653-2.059-.173-.297-.018-.458.13-.606.134-.133.298-.347.446-.52.149-.174.198-.298.298-.497.099-.198.05-.371-.025-.52-.075-.149-.669-1.612-.916-2.207-.242-.579-.487-.5-.669-.51-.173-.008-.371-.01-.57-.01-.198 0-.52.074-.792.372-.272.297-1.04 1.016-1.04 2.479 0 1.462 1.065 2.875 1.213 3.074.149.198 2.096 3.2 5.077 4.487.709.306 1.262.489 1.694.625.712.227 1.36.195 1.871.118.571-.085 1.758-.719 2.006-1.413.248-.694.248-1.289.173-1.413-.074-.124-.272-.198-.57-.347m-5.421 7.403h-.004a9.87 9.87 0 01-5.031-1.378l-.361-.214-3.741.982.998-3.648-.235-.374a9.86 9.86 0 01-1.51-5.26c.001-5.45 4.436-9.884 9.888-9.884 2.64 0 5.122 1.03 6.988 2.898a9.825 9.825 0 012.893 6.994c-.003 5.45-4.437 9.884-9.885 9.884m8.413-18.297A11.815 11.815 0 0012.05 0C5.495 0 .16 5.335.157 11.892c0 2.096.547 4.142 1.588 5.945L.057 24l6.305-1.654a11.882 11.882 0 005.683 1.448h.005c6.554 0 11.89-5.335 11.893-11.893a11.821 11.821 0 00-3.48-8.413Z";

pub struct Page<'a> {
    pub title: String,
    pub description: &'a str,
    pub canonical_path: &'a str,
    pub active_nav: Option<&'a str>,
}

pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

pub fn layout(profile: &SiteProfile, page: &Page<'_>, body: &str, year: i32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{canonical}">
<link rel="icon" href="/logo.png">
</head>
<body>
{navbar}
<main class="overflow-x-hidden">
{body}
</main>
{footer}
{whatsapp}
</body>
</html>
"#,
        title = escape_html(&page.title),
        description = escape_html(page.description),
        canonical = escape_html(&profile.canonical_url(page.canonical_path)),
        navbar = navbar(profile, page.active_nav),
        body = body,
        footer = footer(profile, year),
        whatsapp = whatsapp_button(profile),
    )
}

fn navbar(profile: &SiteProfile, active: Option<&str>) -> String {
    let links = profile
        .nav_links
        .iter()
        .map(|link| {
            let current = if active == Some(link.name.as_str()) {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(
                r#"<li><a href="{}"{}>{}</a></li>"#,
                escape_html(&link.path),
                current,
                escape_html(&link.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<header class="navbar">
<nav aria-label="Main">
<a class="brand" href="/"><img src="/logo.png" alt="{short} Logo"><span>{short}</span></a>
<ul class="nav-links">
{links}
</ul>
<a class="nav-phone" href="tel:{dial}">{phone}</a>
<a class="btn-primary" href="/contact">Get Quote</a>
</nav>
</header>"#,
        short = escape_html(&profile.short_name),
        links = links,
        dial = escape_html(&profile.phone_dial),
        phone = escape_html(&profile.phone_display),
    )
}

fn footer(profile: &SiteProfile, year: i32) -> String {
    let quick_links = [
        ("Home", "/"),
        ("About Us", "/about"),
        ("Our Fleet", "/services"),
        ("Contact", "/contact"),
    ]
    .iter()
    .map(|(name, path)| format!(r#"<li><a href="{path}">{name}</a></li>"#))
    .collect::<Vec<_>>()
    .join("\n");

    let badges = profile
        .footer_badges
        .iter()
        .map(|badge| format!("<span>{}</span>", escape_html(badge)))
        .collect::<Vec<_>>()
        .join("<span>•</span>");

    format!(
        r#"<footer class="footer">
<section class="footer-brand">
<h3>{short}</h3>
<p class="footer-sub">&amp; Travels</p>
<p>{tagline}</p>
<a href="{instagram}" target="_blank" rel="noopener noreferrer" aria-label="Follow us on Instagram">Instagram</a>
</section>
<section>
<h4>Quick Links</h4>
<ul>
{quick_links}
</ul>
</section>
<section>
<h4>Our Services</h4>
{services}
</section>
<section>
<h4>Contact Us</h4>
<address>{address}</address>
<p><a href="tel:{dial}">{phone}</a></p>
<p><a href="mailto:{email}">{email}</a></p>
</section>
<div class="footer-bottom">
<p>© {year} {business}. All Rights Reserved.</p>
<p class="footer-badges">{badges}</p>
</div>
</footer>"#,
        short = escape_html(&profile.short_name),
        tagline = escape_html(&profile.tagline),
        instagram = escape_html(&profile.instagram_url),
        quick_links = quick_links,
        services = list(&profile.footer_services),
        address = address(&profile.address_lines),
        dial = escape_html(&profile.phone_dial),
        phone = escape_html(&profile.phone_display),
        email = escape_html(&profile.email),
        year = year,
        business = escape_html(&profile.business_name),
        badges = badges,
    )
}

fn whatsapp_button(profile: &SiteProfile) -> String {
    format!(
        r#"<a class="whatsapp-float" href="{href}" target="_blank" rel="noopener noreferrer" aria-label="Chat with us on WhatsApp">
<img src="/assets/whatsapp.svg" alt="WhatsApp">
<span class="whatsapp-float-label">Chat with us</span>
</a>"#,
        href = escape_html(&profile.whatsapp_chat_url()),
    )
}

pub fn home_page(profile: &SiteProfile, year: i32) -> String {
    let body = [
        hero(profile),
        about(profile),
        services(profile),
        location(profile),
    ]
    .join("\n");

    let page = Page {
        title: format!("{} | Luxury Car & Bus Rental Bidar", profile.business_name),
        description: "Premium car and bus rental services in Bidar, Karnataka. Wedding logistics, outstation trips, airport transfers with professional chauffeurs. All India Permit.",
        canonical_path: "/",
        active_nav: Some("Home"),
    };
    layout(profile, &page, &body, year)
}

fn hero(profile: &SiteProfile) -> String {
    let badges = profile
        .trust_badges
        .iter()
        .map(|badge| format!("<li>{}</li>", escape_html(badge)))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<section class="hero">
<img class="hero-bg" src="/assets/hero-bus.jpg" alt="Luxury tour bus on scenic mountain highway">
<p class="eyebrow">Premium Travel Services</p>
<h1>Luxury on Wheels. <span>Your Journey, Our Drive.</span></h1>
<p>From wedding logistics to cross-country adventures. Experience travel with All India Permits and professional chauffeurs who put your comfort first.</p>
<div class="hero-actions">
<a class="btn-hero" href="/#services">View Our Fleet</a>
<a class="btn-hero-outline" href="/contact">Book Your Ride</a>
</div>
<ul class="trust-badges">
{badges}
</ul>
</section>"#
    )
}

fn about(profile: &SiteProfile) -> String {
    let stats = profile
        .stats
        .iter()
        .map(|stat| {
            format!(
                r#"<div class="stat"><strong>{}</strong><span>{}</span></div>"#,
                escape_html(&stat.number),
                escape_html(&stat.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let promises = profile
        .promises
        .iter()
        .map(|promise| {
            format!(
                "<article class=\"promise\"><h4>{}</h4><p>{}</p></article>",
                escape_html(&promise.title),
                escape_html(&promise.description)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let business = escape_html(&profile.business_name);
    format!(
        r#"<section id="about" class="about">
<img class="section-bg" src="/assets/chauffeur-service.jpg" alt="Professional chauffeur service">
<h2>Travel Made Easy</h2>
<p>At {business}, we believe that the journey is just as important as the destination. Whether it's a weekend getaway, a family pilgrimage, or the most important day of your life – your wedding – we ensure every mile is traveled in comfort and style.</p>
<p>Our fleet of well-maintained vehicles, combined with professional chauffeurs who understand the roads and respect your time, makes us the trusted choice for families and businesses across Karnataka and beyond.</p>
<p>With All India Permits and a commitment to safety, we've successfully served hundreds of happy families, making their travel dreams a reality.</p>
<div class="stats">
{stats}
</div>
<h3>Our Promise</h3>
<div class="promises">
{promises}
</div>
</section>"#
    )
}

fn services(profile: &SiteProfile) -> String {
    let cards = profile
        .fleet
        .iter()
        .map(|card| {
            let features = list(&card.features);
            format!(
                r#"<article class="fleet-card">
<img src="{image}" alt="{name}" loading="lazy">
<span class="category">{category}</span>
<h3>{name}</h3>
{features}
<p class="ideal-for">Ideal for: {ideal_for}</p>
<a class="btn-primary" href="/contact?vehicle={vehicle}">Book Now</a>
</article>"#,
                image = escape_html(&card.image),
                name = escape_html(&card.name),
                category = escape_html(&card.category),
                features = features,
                ideal_for = escape_html(&card.ideal_for),
                vehicle = pct_encode(&card.books_as),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<section id="services" class="services">
<h2>Choose Your Ride</h2>
<div class="fleet-grid">
{cards}
</div>
<div class="rental-services">
{rental}
</div>
<div class="wedding-special">
<img class="section-bg" src="/assets/wedding-car.jpg" alt="Luxury wedding car transport">
<p class="eyebrow">Wedding Season Special</p>
<h2>Legacies are built on Perfect Moments.</h2>
<p>Your wedding logistics should be flawless. From luxury bridal cars to comfortable guest shuttles, we ensure every journey is as memorable as the destination.</p>
<a class="btn-primary" href="/contact">Plan Your Transport</a>
<a class="btn-whatsapp" href="{wedding_chat}" target="_blank" rel="noopener noreferrer">Chat on WhatsApp</a>
</div>
</section>"#,
        cards = cards,
        rental = list(&profile.rental_services),
        wedding_chat = escape_html(&profile.whatsapp_link(WEDDING_CHAT_TEXT)),
    )
}

fn location(profile: &SiteProfile) -> String {
    format!(
        r#"<section id="location" class="location">
<p class="eyebrow">Find Us</p>
<h2>Visit Our Office</h2>
<address>{address}<br>Karnataka</address>
<p><a href="tel:{dial}">{phone}</a></p>
<a class="btn-primary" href="/contact">Get in Touch</a>
{map}
</section>"#,
        address = address(&profile.address_lines),
        dial = escape_html(&profile.phone_dial),
        phone = escape_html(&profile.phone_display),
        map = map_embed(profile),
    )
}

fn map_embed(profile: &SiteProfile) -> String {
    format!(
        r#"<iframe class="map" src="{src}" width="100%" height="400" style="border:0" allowfullscreen loading="lazy" referrerpolicy="no-referrer-when-downgrade" title="{business} Location"></iframe>"#,
        src = escape_html(&profile.map_embed_url),
        business = escape_html(&profile.business_name),
    )
}

pub fn contact_page(
    profile: &SiteProfile,
    route_fields: RouteFields,
    form: &BookingInquiry,
    report: Option<&ValidationReport>,
    year: i32,
) -> String {
    let alert = match report {
        Some(report) if !report.is_valid() => format!(
            r#"<p class="form-alert" role="alert">Please correct the {} highlighted field(s) below.</p>"#,
            report.errors().len()
        ),
        _ => String::new(),
    };

    let fields = route_fields
        .form_fields()
        .into_iter()
        .map(|field| form_field(profile, field, form.value(field), report))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<section class="page-hero">
<img class="hero-bg" src="/assets/contact-bg.jpg" alt="Contact Background">
<p class="eyebrow">Get in Touch</p>
<h1>Book Your Ride</h1>
<p>Ready to explore? Fill out the form below and we'll get back to you with a personalized quote within hours.</p>
</section>
<section class="contact">
<div class="contact-info">
<p class="eyebrow">Contact Information</p>
<h2>Get in Touch</h2>
<p>Ready to explore? Book now and make memories that last. We're here to help you plan the perfect journey.</p>
<a class="contact-card" href="tel:{dial}"><h4>Call Us</h4><p>{phone}</p></a>
<a class="contact-card" href="{chat}" target="_blank" rel="noopener noreferrer"><h4>WhatsApp</h4><p>Quick response guaranteed</p></a>
<div class="contact-card"><h4>Office Address</h4><address>{address}</address></div>
<div class="contact-card"><h4>Email</h4><p>{email}</p></div>
</div>
<div class="booking-form">
<h3>Request a Quote</h3>
<p>Fill in your travel details and we'll send you a customized quote.</p>
{alert}
<form method="post" action="/contact">
{fields}
<button type="submit" class="btn-primary"><svg viewBox="0 0 24 24" aria-hidden="true"><path d="{icon}"/></svg>Get Quote via WhatsApp</button>
<p class="form-note">We typically respond within 30 minutes during business hours.</p>
</form>
</div>
</section>
<section class="map-section">
{map}
</section>"#,
        dial = escape_html(&profile.phone_dial),
        phone = escape_html(&profile.phone_display),
        chat = escape_html(&profile.whatsapp_chat_url()),
        address = address(&profile.address_lines),
        email = escape_html(&profile.email),
        alert = alert,
        fields = fields,
        icon = WHATSAPP_ICON_PATH,
        map = map_embed(profile),
    );

    let page = Page {
        title: format!("Contact Us | {} Bidar", profile.business_name),
        description: "Book your luxury travel vehicle today. Contact Bright Tours & Travels for weddings, corporate events, and outstation trips in Bidar.",
        canonical_path: "/contact",
        active_nav: Some("Contact"),
    };
    layout(profile, &page, &body, year)
}

fn form_field(
    profile: &SiteProfile,
    field: InquiryField,
    value: &str,
    report: Option<&ValidationReport>,
) -> String {
    let name = field.as_str();
    let error = report.and_then(|report| report.error_for(field));
    let (label, required) = field_label(field);

    let mut attributes = format!(r#"id="{name}" name="{name}""#);
    if required {
        attributes.push_str(" required");
    }
    if let Some((min, max)) = field_length(field) {
        attributes.push_str(&format!(r#" minlength="{min}" maxlength="{max}""#));
    }
    if field == InquiryField::Seats {
        attributes.push_str(r#" min="1""#);
    }
    if error.is_some() {
        attributes.push_str(&format!(
            r#" aria-invalid="true" aria-describedby="{name}-error""#
        ));
    }

    let value = escape_html(value);
    let control = match field {
        InquiryField::VehiclePref => {
            let options = profile
                .vehicle_names()
                .iter()
                .map(|option| {
                    let selected = if escape_html(option) == value {
                        " selected"
                    } else {
                        ""
                    };
                    let option = escape_html(option);
                    format!(r#"<option value="{option}"{selected}>{option}</option>"#)
                })
                .collect::<Vec<_>>()
                .join("");
            format!(
                r#"<select {attributes}><option value="">Select vehicle</option>{options}</select>"#
            )
        }
        InquiryField::RouteDetails => format!(
            r#"<textarea {attributes} rows="3" placeholder="{placeholder}">{value}</textarea>"#,
            placeholder = field_placeholder(field),
        ),
        _ => format!(
            r#"<input {attributes} type="{kind}" value="{value}" placeholder="{placeholder}">"#,
            kind = field_input_type(field),
            placeholder = field_placeholder(field),
        ),
    };

    let error = error
        .map(|message| {
            format!(
                r#"<p class="field-error" id="{name}-error">{}</p>"#,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="form-field">
<label for="{name}">{label}</label>
{control}
{error}
</div>"#
    )
}

fn field_label(field: InquiryField) -> (&'static str, bool) {
    match field {
        InquiryField::FullName => ("Full Name *", true),
        InquiryField::Phone => ("Phone Number *", true),
        InquiryField::TripType => ("Type of Trip *", true),
        InquiryField::VehiclePref => ("Vehicle Preference *", true),
        InquiryField::Seats => ("Number of Passengers *", true),
        InquiryField::TravelDate => ("Travel Date *", true),
        InquiryField::PickupLocation => ("From (Pickup Location)", false),
        InquiryField::DropLocation => ("To (Drop Location)", false),
        InquiryField::RouteDetails => ("Route Details *", true),
    }
}

fn field_length(field: InquiryField) -> Option<(usize, usize)> {
    use bright_core::validation::{
        MAX_NAME_LEN, MAX_PHONE_LEN, MAX_ROUTE_LEN, MIN_NAME_LEN, MIN_PHONE_LEN, MIN_ROUTE_LEN,
    };

    match field {
        InquiryField::FullName => Some((MIN_NAME_LEN, MAX_NAME_LEN)),
        InquiryField::Phone => Some((MIN_PHONE_LEN, MAX_PHONE_LEN)),
        InquiryField::RouteDetails => Some((MIN_ROUTE_LEN, MAX_ROUTE_LEN)),
        _ => None,
    }
}

fn field_input_type(field: InquiryField) -> &'static str {
    match field {
        InquiryField::Phone => "tel",
        InquiryField::Seats => "number",
        InquiryField::TravelDate => "date",
        _ => "text",
    }
}

fn field_placeholder(field: InquiryField) -> &'static str {
    match field {
        InquiryField::FullName => "Your name",
        InquiryField::Phone => "+91 XXXXX XXXXX",
        InquiryField::TripType => "e.g. Wedding, Outstation, etc.",
        InquiryField::Seats => "e.g., 15",
        InquiryField::PickupLocation => "Enter pickup city/location",
        InquiryField::DropLocation => "Enter drop city/location",
        InquiryField::RouteDetails => "e.g. Bidar to Hyderabad, return the same evening",
        InquiryField::VehiclePref | InquiryField::TravelDate => "",
    }
}

/// Short page for 404s and throttled submissions.
pub fn notice_page(profile: &SiteProfile, title: &str, message: &str, year: i32) -> String {
    let body = format!(
        r#"<section class="notice">
<h1>{title}</h1>
<p>{message}</p>
<a class="btn-primary" href="/">Back to Home</a>
</section>"#,
        title = escape_html(title),
        message = escape_html(message),
    );
    let page = Page {
        title: format!("{} | {}", title, profile.business_name),
        description: "",
        canonical_path: "/",
        active_nav: None,
    };
    layout(profile, &page, &body, year)
}

fn list(items: &[String]) -> String {
    let items = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect::<Vec<_>>()
        .join("");
    format!("<ul>{items}</ul>")
}

fn address(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bright_core::{InquiryDesk, InquiryField};

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn home_page_marks_home_active_and_links_fleet_to_contact() {
        let html = home_page(&SiteProfile::default(), 2026);
        assert!(html.contains(r#"<a href="/" aria-current="page">Home</a>"#));
        assert!(html.contains(r#"id="about""#));
        assert!(html.contains(r#"id="services""#));
        assert!(html.contains(r#"href="/contact?vehicle=Innova%2FSUV""#));
        assert!(html.contains("© 2026 Bright Tours &amp; Travels. All Rights Reserved."));
        assert!(html.contains("https://wa.me/919035119555?text=Hello!%20I&#39;m%20planning"));
    }

    #[test]
    fn navbar_quote_goes_to_contact_and_phone_is_separate() {
        let html = notice_page(&SiteProfile::default(), "Hi", "There", 2026);
        assert!(html.contains(r#"<a class="btn-primary" href="/contact">Get Quote</a>"#));
        assert!(html.contains(r#"<a class="nav-phone" href="tel:+919035119555">+91 90351 19555</a>"#));
        assert!(!html.contains(r#"href="tel:+919035119555">Get Quote"#));
    }

    #[test]
    fn contact_page_shows_errors_next_to_fields() {
        let profile = SiteProfile::default();
        let desk = InquiryDesk::new(&profile, RouteFields::Split);
        let form = BookingInquiry {
            full_name: "A".to_string(),
            vehicle_pref: "Sedan".to_string(),
            ..BookingInquiry::default()
        };
        let report = desk.validate(&form);
        let html = contact_page(&profile, RouteFields::Split, &form, Some(&report), 2026);

        assert!(html.contains(r#"<p class="field-error" id="full_name-error">Name must be at least 2 characters</p>"#));
        assert!(html.contains(r#"<option value="Sedan" selected>Sedan</option>"#));
        assert!(html.contains(r#"value="A""#));
        assert!(html.contains(r#"<a href="/contact" aria-current="page">Contact</a>"#));
        assert!(!html.contains(r#"id="route_details""#));
        assert!(report.error_for(InquiryField::PickupLocation).is_none());
    }

    #[test]
    fn combined_layout_renders_route_textarea() {
        let html = contact_page(
            &SiteProfile::default(),
            RouteFields::Combined,
            &BookingInquiry::default(),
            None,
            2026,
        );
        assert!(html.contains(r#"<textarea id="route_details" name="route_details" required minlength="10" maxlength="500""#));
        assert!(!html.contains(r#"id="pickup_location""#));
        assert!(!html.contains("form-alert"));
    }

    #[test]
    fn submitted_values_are_escaped() {
        let form = BookingInquiry {
            full_name: r#""><script>alert(1)</script>"#.to_string(),
            ..BookingInquiry::default()
        };
        let html = contact_page(&SiteProfile::default(), RouteFields::Split, &form, None, 2026);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}
