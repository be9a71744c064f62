use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bright_core::{
    extract_message, BookingInquiry, ComposedInquiry, InquiryDesk, InquiryError, RouteFields,
    SiteProfile,
};
use bright_observability::{init_tracing_to, LogTarget};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "brightctl")]
#[command(about = "Bright Tours booking inquiry tools")]
struct Cli {
    /// Chat number inquiries are addressed to (digits, country code first).
    #[arg(long, env = "BRIGHT_WHATSAPP_NUMBER")]
    whatsapp_number: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate an inquiry and print its message and WhatsApp link.
    Link(LinkArgs),
    /// Print the pre-filled text carried by a WhatsApp link.
    Decode { link: String },
    Fleet,
    Vehicles,
}

#[derive(Debug, Args)]
struct LinkArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    trip_type: String,
    #[arg(long)]
    vehicle: String,
    #[arg(long)]
    seats: String,
    #[arg(long)]
    date: String,
    #[arg(long, default_value = "")]
    from: String,
    #[arg(long, default_value = "")]
    to: String,
    /// Single route description; switches to the combined route layout.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    route: Option<String>,
}

impl LinkArgs {
    fn into_inquiry(self) -> (BookingInquiry, RouteFields) {
        let route_fields = if self.route.is_some() {
            RouteFields::Combined
        } else {
            RouteFields::Split
        };

        let inquiry = BookingInquiry {
            full_name: self.name,
            phone: self.phone,
            trip_type: self.trip_type,
            vehicle_pref: self.vehicle,
            seats: self.seats,
            travel_date: self.date,
            pickup_location: self.from,
            drop_location: self.to,
            route_details: self.route.unwrap_or_default(),
        };
        (inquiry, route_fields)
    }
}

fn main() -> Result<ExitCode> {
    // stdout carries command output; logs must not interleave with it.
    init_tracing_to("brightctl", LogTarget::Stderr);
    let cli = Cli::parse();

    let mut profile = SiteProfile::default();
    if let Some(number) = cli.whatsapp_number.as_deref() {
        profile = profile
            .with_whatsapp_number(number)
            .context("invalid --whatsapp-number")?;
    }

    let accepted = run(
        cli.command,
        &profile,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Executes one command; `Ok(false)` means the inquiry was rejected.
fn run(
    command: Command,
    profile: &SiteProfile,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool> {
    match command {
        Command::Link(args) => match compose_link(profile, args) {
            Ok(composed) => writeln!(out, "{}", serde_json::to_string_pretty(&composed)?)?,
            Err(rejected) => {
                let report = rejected.report();
                tracing::debug!(fields = report.errors().len(), "inquiry rejected");
                writeln!(err, "inquiry rejected:")?;
                for error in report.errors() {
                    writeln!(err, "- {}: {}", error.field.as_str(), error.message)?;
                }
                return Ok(false);
            }
        },
        Command::Decode { link } => {
            let message = extract_message(&link).context("link carries no text parameter")?;
            writeln!(out, "{message}")?;
        }
        Command::Fleet => {
            writeln!(out, "{}", serde_json::to_string_pretty(&profile.fleet)?)?;
        }
        Command::Vehicles => {
            for name in profile.vehicle_names() {
                writeln!(out, "{name}")?;
            }
        }
    }

    Ok(true)
}

fn compose_link(profile: &SiteProfile, args: LinkArgs) -> Result<ComposedInquiry, InquiryError> {
    let (inquiry, route_fields) = args.into_inquiry();
    let composed = InquiryDesk::new(profile, route_fields).compose(&inquiry)?;
    tracing::debug!(route_fields = route_fields.as_code(), "inquiry composed");
    Ok(composed)
}
