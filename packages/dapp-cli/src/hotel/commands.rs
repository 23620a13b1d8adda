//! `dapp hotel ...` subcommands

use alloy::primitives::U256;
use crosslayer_rs::evm::{EvmReader, EvmWriter};
use crosslayer_rs::units::format_ether;
use eyre::Result;
use tracing::{info, warn};

use super::client::{rooms_listing, HotelClient, TOKEN_SYMBOL};
use super::forms::{
    approve_calldata, withdraw_calldata, AddReviewForm, AddRoomForm, BookRoomForm,
    SetAvailabilityForm, TokenAmountForm,
};
use crate::config::HotelConfig;
use crate::notify::Notifier;

/// Signed session against the hotel contracts
struct Session {
    reader: EvmReader,
    writer: EvmWriter,
    notifier: Notifier,
}

impl Session {
    fn open(config: &HotelConfig) -> Result<Self> {
        let private_key = config.chain.private_key()?;
        Ok(Self {
            reader: EvmReader::new(&config.chain.rpc_url)?,
            writer: EvmWriter::new(&config.chain.rpc_url, private_key.expose())?,
            notifier: Notifier::new(&config.chain.explorer_url),
        })
    }

    fn client<'a>(&'a self, config: &HotelConfig) -> HotelClient<'a> {
        HotelClient::new(&self.reader, config.booking, config.token)
    }

    /// Warn when the signer is not the contract owner; the contract will revert
    async fn check_owner(&self, config: &HotelConfig) -> Result<()> {
        let owner = self.client(config).owner().await?;
        if owner != self.writer.address() {
            warn!(
                owner = %owner,
                signer = %self.writer.address(),
                "Only the hotel owner can do this"
            );
        }
        Ok(())
    }
}

pub async fn list_rooms(config: &HotelConfig) -> Result<()> {
    let reader = EvmReader::new(&config.chain.rpc_url)?;
    let client = HotelClient::new(&reader, config.booking, config.token);

    let rooms = client.rooms().await?;
    info!(booking = %config.booking, count = rooms.len(), "Loaded rooms");
    for line in rooms_listing(&rooms) {
        println!("{}", line);
    }
    Ok(())
}

pub async fn show_room(config: &HotelConfig, room: u64) -> Result<()> {
    let reader = EvmReader::new(&config.chain.rpc_url)?;
    let client = HotelClient::new(&reader, config.booking, config.token);

    let room_id = U256::from(room);
    if room_id >= client.room_count().await? {
        return Err(eyre::eyre!("Room #{} does not exist", room_id));
    }

    for line in client.room_details(room_id).await?.display_lines() {
        println!("{}", line);
    }

    let booking = client.booking_details(room_id).await?;
    if !booking.guest.is_zero() {
        println!(
            "  Booked by {} from {} to {}",
            booking.guest,
            crate::format_timestamp(booking.check_in),
            crate::format_timestamp(booking.check_out)
        );
    }
    Ok(())
}

pub async fn add_room(config: &HotelConfig, form: &AddRoomForm) -> Result<()> {
    let room = form.validate()?;
    let session = Session::open(config)?;
    session.check_owner(config).await?;

    info!(
        category = %room.category,
        price = %format_ether(room.price_per_night),
        "Adding room"
    );
    session
        .notifier
        .send(&session.writer, config.booking, room.calldata(), None)
        .await?;
    Ok(())
}

pub async fn book_room(config: &HotelConfig, form: &BookRoomForm) -> Result<()> {
    let stay = form.validate()?;
    let session = Session::open(config)?;
    let client = session.client(config);

    let room = client.room(stay.room_id).await?;
    if !room.is_available {
        return Err(eyre::eyre!("Room #{} is not available", room.id));
    }

    let cost = stay.cost(room.price_per_night);
    let allowance = client.allowance(session.writer.address()).await?;
    if allowance < cost {
        warn!(
            "Booking costs {} {} but only {} {} is approved; run `dapp hotel approve` first",
            format_ether(cost),
            TOKEN_SYMBOL,
            format_ether(allowance),
            TOKEN_SYMBOL
        );
    }

    info!(
        room = %room.id,
        category = room.category_label(),
        nights = stay.nights,
        "Booking room"
    );
    session
        .notifier
        .send(&session.writer, config.booking, stay.calldata(room.category), None)
        .await?;
    Ok(())
}

pub async fn add_review(config: &HotelConfig, form: &AddReviewForm) -> Result<()> {
    let review = form.validate()?;
    let session = Session::open(config)?;

    info!(room = %review.room_id, rating = review.rating, "Adding review");
    session
        .notifier
        .send(&session.writer, config.booking, review.calldata(), None)
        .await?;
    Ok(())
}

pub async fn set_availability(config: &HotelConfig, form: &SetAvailabilityForm) -> Result<()> {
    let change = form.validate()?;
    let session = Session::open(config)?;
    session.check_owner(config).await?;

    info!(room = %change.room_id, available = change.available, "Setting availability");
    session
        .notifier
        .send(&session.writer, config.booking, change.calldata(), None)
        .await?;
    Ok(())
}

pub async fn withdraw(config: &HotelConfig, form: &TokenAmountForm) -> Result<()> {
    let amount = form.validate()?;
    let session = Session::open(config)?;
    session.check_owner(config).await?;

    info!(amount = %format_ether(amount), "Withdrawing tokens");
    session
        .notifier
        .send(&session.writer, config.booking, withdraw_calldata(amount), None)
        .await?;
    Ok(())
}

pub async fn approve(config: &HotelConfig, form: &TokenAmountForm) -> Result<()> {
    let amount = form.validate()?;
    let session = Session::open(config)?;

    let token = session.client(config).payment_token().await?;
    if token != config.token {
        warn!(configured = %config.token, contract = %token, "Booking contract uses a different token");
    }

    info!(amount = %format_ether(amount), spender = %config.booking, "Approving tokens");
    session
        .notifier
        .send(
            &session.writer,
            config.token,
            approve_calldata(config.booking, amount),
            None,
        )
        .await?;
    Ok(())
}
