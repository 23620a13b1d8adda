//! Hotel booking demo
//!
//! - `contracts` - `HotelBooking` bindings
//! - `forms` - input validation and call data
//! - `client` - contract reads and room listing
//! - `commands` - the `dapp hotel` subcommands

pub mod client;
pub mod commands;
pub mod contracts;
pub mod forms;

use clap::Subcommand;
use eyre::Result;

use crate::config::HotelConfig;
use forms::{AddReviewForm, AddRoomForm, BookRoomForm, SetAvailabilityForm, TokenAmountForm};

pub use client::{HotelClient, Review, Room};
pub use forms::RoomCategory;

#[derive(Debug, Subcommand)]
pub enum HotelCommand {
    /// List every room with its reviews
    Rooms,

    /// Show one room and its current booking
    Room {
        #[arg(long)]
        id: u64,
    },

    /// Add a room (owner only)
    AddRoom(AddRoomForm),

    /// Book a room for a number of nights
    Book(BookRoomForm),

    /// Review a room
    Review(AddReviewForm),

    /// Open or close a room for booking (owner only)
    SetAvailability(SetAvailabilityForm),

    /// Withdraw collected tokens (owner only)
    Withdraw(TokenAmountForm),

    /// Approve the booking contract to spend tokens
    Approve(TokenAmountForm),
}

pub async fn run(command: &HotelCommand, config: &HotelConfig) -> Result<()> {
    match command {
        HotelCommand::Rooms => commands::list_rooms(config).await,
        HotelCommand::Room { id } => commands::show_room(config, *id).await,
        HotelCommand::AddRoom(form) => commands::add_room(config, form).await,
        HotelCommand::Book(form) => commands::book_room(config, form).await,
        HotelCommand::Review(form) => commands::add_review(config, form).await,
        HotelCommand::SetAvailability(form) => commands::set_availability(config, form).await,
        HotelCommand::Withdraw(form) => commands::withdraw(config, form).await,
        HotelCommand::Approve(form) => commands::approve(config, form).await,
    }
}
