use super::{CommandResult, COMMANDS};
use crate::api::Transport;
use crate::booking::{BookingIntent, BookingOutcome};
use crate::error::{RestavoError, Result};
use crate::pricing::HotelListing;
use crate::repl::Repl;
use crate::ui::UI;
use chrono::{Days, Local, NaiveDate};

pub async fn login_command<T: Transport>(
    repl: &mut Repl<T>,
    username: &str,
    password: &str,
) -> Result<CommandResult> {
    let user = repl.app.login(username, password).await?;
    UI::print_signed_in(&user);
    Ok(CommandResult::Continue)
}

pub async fn register_command<T: Transport>(
    repl: &mut Repl<T>,
    username: &str,
    password: &str,
) -> Result<CommandResult> {
    repl.app.register(username, password).await?;
    Ok(CommandResult::Continue)
}

pub async fn logout_command<T: Transport>(repl: &mut Repl<T>) -> Result<CommandResult> {
    repl.app.logout().await?;
    Ok(CommandResult::Continue)
}

pub async fn status_command<T: Transport>(repl: &mut Repl<T>) -> Result<CommandResult> {
    let user = repl.app.check_status().await.cloned();
    UI::print_status(user.as_ref());
    if let Some(intent) = repl.app.pending().get() {
        UI::print_pending(intent);
    }
    Ok(CommandResult::Continue)
}

pub fn search_command<T: Transport>(
    repl: &mut Repl<T>,
    city: &str,
    min_rating: Option<f64>,
) -> Result<CommandResult> {
    let min_rating = min_rating.unwrap_or(repl.config.default_min_rating);
    let listings = repl.app.search(city, min_rating);
    UI::print_listings(city, min_rating, &listings, repl.app.favorites());
    if listings.is_empty() {
        UI::print_info(&format!(
            "Available cities: {}",
            repl.app.catalog().cities().join(", ")
        ));
    }
    Ok(CommandResult::Continue)
}

pub async fn favorite_command<T: Transport>(
    repl: &mut Repl<T>,
    hotel: &str,
) -> Result<CommandResult> {
    let (name, city) = {
        let listing = find_hotel(repl, hotel)?;
        (listing.name(), listing.city())
    };

    let is_favorite = repl.app.toggle_favorite(name, city).await?;
    UI::print_favorite_toggled(name, is_favorite);
    Ok(CommandResult::Continue)
}

pub async fn favorites_command<T: Transport>(repl: &mut Repl<T>) -> Result<CommandResult> {
    if let Err(e) = repl.app.refresh_favorites().await {
        UI::print_warning(&format!("Could not refresh favorites, showing saved list: {}", e));
    }
    if repl.app.session().is_authenticated() {
        UI::print_favorites(&repl.app.favorite_hotels());
    }
    Ok(CommandResult::Continue)
}

pub async fn book_command<T: Transport>(
    repl: &mut Repl<T>,
    hotel: &str,
    dates: Option<(NaiveDate, NaiveDate)>,
) -> Result<CommandResult> {
    let (check_in, check_out) = match dates {
        Some(dates) => dates,
        None => default_stay(repl.config.default_stay_nights)?,
    };

    let intent = {
        let listing = find_hotel(repl, hotel)?;
        BookingIntent::new(
            listing.name(),
            listing.city(),
            check_in,
            check_out,
            f64::from(listing.quote.cheapest_price),
        )?
    };

    match repl.app.attempt_booking(intent).await? {
        BookingOutcome::Submitted(response) => {
            if let Some(id) = response.booking_id {
                UI::print_booking_reference(id);
            }
        }
        BookingOutcome::Deferred | BookingOutcome::Rejected => {}
    }
    Ok(CommandResult::Continue)
}

pub async fn bookings_command<T: Transport>(repl: &mut Repl<T>) -> Result<CommandResult> {
    let bookings = repl.app.list_bookings().await?;
    UI::print_bookings(&bookings);
    Ok(CommandResult::Continue)
}

pub async fn cancel_command<T: Transport>(
    repl: &mut Repl<T>,
    booking_id: i64,
) -> Result<CommandResult> {
    let bookings = repl.app.cancel_booking(booking_id).await?;
    repl.render_events();
    UI::print_bookings(&bookings);
    Ok(CommandResult::Continue)
}

pub async fn analyze_command<T: Transport>(
    repl: &mut Repl<T>,
    booking_id: i64,
) -> Result<CommandResult> {
    UI::print_waiting("Analyzing your booking...");
    let analysis = repl.app.analyze_booking(booking_id).await?;
    UI::print_analysis(&analysis);
    Ok(CommandResult::Continue)
}

pub fn chat_command<T: Transport>(repl: &mut Repl<T>) -> Result<CommandResult> {
    UI::print_chat_history(repl.app.chat().entries());
    Ok(CommandResult::Continue)
}

pub fn help_command() -> Result<CommandResult> {
    UI::print_help(COMMANDS);
    Ok(CommandResult::Continue)
}

pub fn exit_command() -> Result<CommandResult> {
    UI::print_goodbye();
    Ok(CommandResult::Exit)
}

fn find_hotel<'a, T: Transport>(repl: &'a Repl<T>, hotel: &str) -> Result<&'a HotelListing> {
    repl.app.catalog().find(hotel).ok_or_else(|| {
        RestavoError::Validation(format!(
            "No hotel named '{}'. Use /search <city> to see what's available.",
            hotel
        ))
    })
}

/// Check in today, check out after the configured number of nights.
fn default_stay(nights: u32) -> Result<(NaiveDate, NaiveDate)> {
    let check_in = Local::now().date_naive();
    let check_out = check_in
        .checked_add_days(Days::new(u64::from(nights)))
        .ok_or_else(|| RestavoError::Validation("Stay length is out of range.".to_string()))?;
    Ok((check_in, check_out))
}
