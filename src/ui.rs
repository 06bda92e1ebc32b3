use crate::api::{BookingAnalysis, BookingRecord};
use crate::app::{AppEvent, Level, Notification, UiSignal};
use crate::booking::BookingIntent;
use crate::conversation::{ChatEntry, Role};
use crate::error::RestavoError;
use crate::favorites::FavoriteSet;
use crate::pricing::HotelListing;
use crate::session::User;
use colored::Colorize;

/// Message severity levels for consistent UI feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageSeverity {
    /// Recoverable issues, non-critical problems
    Warning,
    /// Actual failures (network, server rejections, bad input)
    Error,
    Info,
    Success,
}

impl MessageSeverity {
    pub fn prefix(&self) -> colored::ColoredString {
        match self {
            Self::Warning => "Warning:".bright_yellow().bold(),
            Self::Error => "Error:".bright_red().bold(),
            Self::Info => "Info:".bright_cyan().bold(),
            Self::Success => "Success:".bright_green().bold(),
        }
    }
}

impl From<Level> for MessageSeverity {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => Self::Info,
            Level::Success => Self::Success,
            Level::Error => Self::Error,
        }
    }
}

/// Terminal rendering. Reads state handed to it and never mutates the app.
pub struct UI;

impl UI {
    pub fn print_message(severity: MessageSeverity, message: &str) {
        eprintln!("{} {}", severity.prefix(), message);
    }

    pub fn print_warning(message: &str) {
        Self::print_message(MessageSeverity::Warning, message);
    }

    pub fn print_error(message: &str) {
        Self::print_message(MessageSeverity::Error, message);
    }

    pub fn print_info(message: &str) {
        Self::print_message(MessageSeverity::Info, message);
    }

    pub fn print_error_with_hint(error: &RestavoError) {
        eprintln!("{} {}", MessageSeverity::Error.prefix(), error);
        if let Some(hint) = error.hint() {
            eprintln!("  {} {}", "Hint:".bright_cyan(), hint);
        }
    }

    pub fn print_notification(notification: &Notification) {
        Self::print_message(notification.level.into(), &notification.text);
    }

    pub fn print_event(event: &AppEvent) {
        match event {
            AppEvent::Notice(notification) => Self::print_notification(notification),
            AppEvent::Signal(UiSignal::PromptLogin) => {
                println!(
                    "{} {}",
                    "Sign in:".bright_cyan().bold(),
                    "/login <user> <password>  (or /register <user> <password>)".dimmed()
                );
            }
            AppEvent::Signal(UiSignal::SwitchToLogin) => {
                println!(
                    "{} {}",
                    "Next:".bright_cyan().bold(),
                    "sign in with /login <user> <password>".dimmed()
                );
            }
            AppEvent::Signal(UiSignal::FavoritesLocked) => {
                println!("{}", "Sign in to see your favorite hotels.".dimmed());
            }
        }
    }

    pub fn print_welcome(base_url: &str) {
        println!("{}", "Restavo - Hotel Price Comparison".bright_cyan().bold());
        println!("{} {}", "Backend:".bright_green(), base_url.dimmed());
        println!("{}", "Type a message to chat with the travel assistant.".dimmed());
        println!("{}", "Type /help to list commands, /exit to quit.".dimmed());
        println!();
    }

    pub fn print_goodbye() {
        println!("{}", "Goodbye!".bright_cyan());
    }

    pub fn print_help(commands: &[(&str, &str)]) {
        println!();
        for (usage, description) in commands {
            println!("  {:<42} {}", usage.bright_green(), description.dimmed());
        }
        println!();
    }

    pub fn print_status(user: Option<&User>) {
        match user {
            Some(user) => println!(
                "{} {} {}",
                "Signed in as".bright_green(),
                user.display_name().bold(),
                format!("({})", user.username).dimmed()
            ),
            None => println!("{}", "Not signed in.".bright_yellow()),
        }
    }

    pub fn print_pending(intent: &BookingIntent) {
        println!(
            "{} {} ({} → {}), completes after you sign in",
            "Pending booking:".bright_yellow(),
            intent.hotel_name.bold(),
            intent.check_in,
            intent.check_out
        );
    }

    pub fn print_signed_in(user: &User) {
        println!(
            "{} {}!",
            "Welcome,".bright_green(),
            user.display_name().bold()
        );
    }

    pub fn print_waiting(message: &str) {
        println!("{}", message.truecolor(0xFF, 0x99, 0x33));
    }

    pub fn print_listings(city: &str, min_rating: f64, listings: &[&HotelListing], favorites: &FavoriteSet) {
        println!();
        if listings.is_empty() {
            println!(
                "{}",
                format!("No hotels in {} rated {:.1} or higher.", city, min_rating).bright_yellow()
            );
            println!();
            return;
        }

        println!(
            "{}",
            format!("Hotels in {} rated {:.1}+ (cheapest first)", city, min_rating)
                .bright_cyan()
                .bold()
        );
        println!("{}", "─".repeat(60).bright_cyan());

        for listing in listings {
            let marker = if favorites.contains(listing.name()) {
                "♥".bright_red().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "{} {} {}",
                marker,
                listing.name().bold(),
                format!("★ {:.1}", listing.entry.rating).bright_yellow()
            );
            println!("    {}", listing.entry.amenities.join(", ").dimmed());
            println!("    {}", listing.image_url.dimmed());
            for (vendor, price) in &listing.quote.prices {
                let line = format!("    {:<14} {:>8}", vendor, format_price(*price));
                if *vendor == listing.quote.cheapest_vendor {
                    println!("{} {}", line.bright_green(), "best price".bright_green().bold());
                } else {
                    println!("{}", line);
                }
            }
            println!();
        }
    }

    pub fn print_favorite_toggled(name: &str, is_favorite: bool) {
        if is_favorite {
            println!("{} {}", "♥ Added to favorites:".bright_red(), name.bold());
        } else {
            println!("{} {}", "Removed from favorites:".dimmed(), name);
        }
    }

    pub fn print_favorites(hotels: &[&HotelListing]) {
        println!();
        if hotels.is_empty() {
            println!("{}", "You have no favorite hotels yet. Use /fav <hotel name>.".dimmed());
            println!();
            return;
        }

        println!(
            "{} {}",
            "Your favorite hotels".bright_cyan().bold(),
            format!("({})", hotels.len()).dimmed()
        );
        for hotel in hotels {
            println!(
                "  {} {} {} {}",
                "♥".bright_red(),
                hotel.name().bold(),
                format!("({})", hotel.city()).dimmed(),
                format!("from {}", format_price(hotel.quote.cheapest_price)).bright_green()
            );
        }
        println!();
    }

    pub fn print_booking_reference(booking_id: i64) {
        println!("{} #{}", "Booking reference:".bright_green(), booking_id);
    }

    pub fn print_bookings(bookings: &[BookingRecord]) {
        println!();
        if bookings.is_empty() {
            println!("{}", "You have no bookings yet.".dimmed());
            println!();
            return;
        }

        println!("{}", "Your bookings".bright_cyan().bold());
        println!("{}", "─".repeat(60).bright_cyan());
        for booking in bookings {
            println!(
                "{} {} {}",
                format!("#{:<5}", booking.id).bright_white(),
                booking.hotel_name.bold(),
                format!("({})", booking.city).dimmed()
            );
            println!(
                "       {} → {}   {}",
                booking.check_in,
                booking.check_out,
                format!("${:.2}", booking.price).bright_green()
            );
        }
        println!();
    }

    pub fn print_analysis(analysis: &BookingAnalysis) {
        println!();
        println!("{}", analysis.title.bright_cyan().bold());
        println!("{}", "─".repeat(60).bright_cyan());
        println!("{}", "Price".bright_white().bold());
        println!("  {}", analysis.price_analysis);
        if !analysis.activity_suggestions.is_empty() {
            println!("{}", "Things to do".bright_white().bold());
            for activity in &analysis.activity_suggestions {
                println!("  • {} {}", activity.name.bold(), activity.reason.dimmed());
            }
        }
        println!("{}", "Summary".bright_white().bold());
        println!("  {}", analysis.summary);
        println!();
    }

    pub fn print_chat_entry(entry: &ChatEntry) {
        match entry.role {
            Role::User => println!("{} {}", "You:".bright_green().bold(), entry.text),
            Role::Model => {
                println!("{}", "Assistant:".bright_blue().bold());
                println!("{}", entry.text);
            }
        }
    }

    pub fn print_chat_history(entries: &[ChatEntry]) {
        println!();
        for entry in entries {
            Self::print_chat_entry(entry);
            println!();
        }
    }
}

fn format_price(price: u32) -> String {
    let s = price.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    format!("${}", result.chars().rev().collect::<String>())
}
