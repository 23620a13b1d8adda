//! Hotel forms
//!
//! Each form holds the raw command line input and validates it into a value
//! that knows its contract call data.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use chrono::{NaiveDate, Utc};
use clap::Args;
use crosslayer_rs::evm::ERC20;
use crosslayer_rs::units::ETHER_DECIMALS;
use std::fmt;

use super::contracts::HotelBooking;
use crate::forms::{
    in_range, non_empty, parse_bool, parse_positive_amount, FieldError, FormError, Validator,
};

pub const SECONDS_PER_NIGHT: u64 = 86_400;
pub const MIN_NIGHTS: u32 = 1;
pub const DEFAULT_NIGHTS: u32 = 3;
pub const MAX_NIGHTS: u32 = 100;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// `HotelBooking.RoomCategory`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RoomCategory {
    Presidential = 0,
    Deluxe = 1,
    Suite = 2,
}

impl RoomCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RoomCategory::Presidential => "Presidential",
            RoomCategory::Deluxe => "Deluxe",
            RoomCategory::Suite => "Suite",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Presidential" => Some(RoomCategory::Presidential),
            "Deluxe" => Some(RoomCategory::Deluxe),
            "Suite" => Some(RoomCategory::Suite),
            _ => None,
        }
    }

    /// Label of a raw on-chain value; empty for unknown values
    pub fn label_of(raw: u8) -> &'static str {
        RoomCategory::try_from(raw).map(|c| c.label()).unwrap_or("")
    }
}

impl TryFrom<u8> for RoomCategory {
    type Error = FieldError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(RoomCategory::Presidential),
            1 => Ok(RoomCategory::Deluxe),
            2 => Ok(RoomCategory::Suite),
            _ => Err(FieldError::new(
                "category",
                "must be 0 (Presidential), 1 (Deluxe) or 2 (Suite)",
            )),
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Add room (admin)
// ============================================================================

#[derive(Debug, Clone, Args)]
pub struct AddRoomForm {
    /// 0 Presidential, 1 Deluxe, 2 Suite
    #[arg(long, default_value_t = 0)]
    pub category: u8,

    /// Price per night in tokens, e.g. 12.5
    #[arg(long)]
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub category: RoomCategory,
    pub price_per_night: U256,
}

impl AddRoomForm {
    pub fn validate(&self) -> Result<NewRoom, FormError> {
        let mut v = Validator::new();
        let category = v.check(RoomCategory::try_from(self.category));
        let price = v.check(parse_positive_amount("price", &self.price, ETHER_DECIMALS));

        v.finish(|| {
            Some(NewRoom {
                category: category?,
                price_per_night: price?,
            })
        })
    }
}

impl NewRoom {
    pub fn calldata(&self) -> Bytes {
        HotelBooking::addRoomCall {
            category: self.category as u8,
            pricePerNight: self.price_per_night,
        }
        .abi_encode()
        .into()
    }
}

// ============================================================================
// Book room
// ============================================================================

#[derive(Debug, Clone, Args)]
pub struct BookRoomForm {
    /// Room to book; its category is looked up on chain
    #[arg(long)]
    pub room: u64,

    /// Check-in date as YYYY-MM-DD (default: today, UTC)
    #[arg(long)]
    pub check_in: Option<String>,

    /// Number of nights (1-100)
    #[arg(long, default_value_t = DEFAULT_NIGHTS)]
    pub nights: u32,
}

/// Validated stay; check-in is midnight UTC of the chosen day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub room_id: U256,
    pub nights: u32,
    pub check_in: u64,
    pub check_out: u64,
}

impl BookRoomForm {
    pub fn validate(&self) -> Result<Stay, FormError> {
        let mut v = Validator::new();
        let check_in = v.check(parse_check_in(self.check_in.as_deref()));
        let nights = v.check(
            in_range("nights", self.nights, MIN_NIGHTS, MAX_NIGHTS).map_err(|_| {
                if self.nights < MIN_NIGHTS {
                    FieldError::new("nights", "Duration can not be less than 1")
                } else {
                    FieldError::new("nights", "Duration can not be more than 100")
                }
            }),
        );

        v.finish(|| {
            let check_in = check_in?;
            let nights = nights?;
            Some(Stay {
                room_id: U256::from(self.room),
                nights,
                check_in,
                check_out: check_in + u64::from(nights) * SECONDS_PER_NIGHT,
            })
        })
    }
}

fn parse_check_in(raw: Option<&str>) -> Result<u64, FieldError> {
    let date = match raw {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            FieldError::new("check_in", format!("\"{}\" is not a YYYY-MM-DD date", raw))
        })?,
        None => Utc::now().date_naive(),
    };

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| FieldError::new("check_in", "invalid date"))?
        .and_utc()
        .timestamp();

    u64::try_from(midnight).map_err(|_| FieldError::new("check_in", "date is before 1970"))
}

impl Stay {
    /// `bookRoomByCategory` call data for the category of the chosen room
    pub fn calldata(&self, category: u8) -> Bytes {
        HotelBooking::bookRoomByCategoryCall {
            category,
            checkInDate: U256::from(self.check_in),
            checkOutDate: U256::from(self.check_out),
        }
        .abi_encode()
        .into()
    }

    /// Token amount the booking contract charges for this stay
    pub fn cost(&self, price_per_night: U256) -> U256 {
        price_per_night.saturating_mul(U256::from(self.nights))
    }
}

// ============================================================================
// Review
// ============================================================================

#[derive(Debug, Clone, Args)]
pub struct AddReviewForm {
    #[arg(long)]
    pub room: u64,

    /// 1-5 stars
    #[arg(long)]
    pub rating: u8,

    #[arg(long)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub room_id: U256,
    pub rating: u8,
    pub comment: String,
}

impl AddReviewForm {
    pub fn validate(&self) -> Result<NewReview, FormError> {
        let mut v = Validator::new();
        let rating = v.check(in_range("rating", self.rating, MIN_RATING, MAX_RATING));
        let comment = v.check(non_empty("comment", &self.comment));

        v.finish(|| {
            Some(NewReview {
                room_id: U256::from(self.room),
                rating: rating?,
                comment: comment?,
            })
        })
    }
}

impl NewReview {
    pub fn calldata(&self) -> Bytes {
        HotelBooking::addReviewCall {
            roomId: self.room_id,
            rating: self.rating,
            comment: self.comment.clone(),
        }
        .abi_encode()
        .into()
    }
}

// ============================================================================
// Availability (admin)
// ============================================================================

#[derive(Debug, Clone, Args)]
pub struct SetAvailabilityForm {
    #[arg(long)]
    pub room: u64,

    /// "true" or "false"
    #[arg(long)]
    pub available: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityChange {
    pub room_id: U256,
    pub available: bool,
}

impl SetAvailabilityForm {
    pub fn validate(&self) -> Result<AvailabilityChange, FormError> {
        let mut v = Validator::new();
        let available = v.check(parse_bool("available", &self.available));

        v.finish(|| {
            Some(AvailabilityChange {
                room_id: U256::from(self.room),
                available: available?,
            })
        })
    }
}

impl AvailabilityChange {
    pub fn calldata(&self) -> Bytes {
        HotelBooking::setRoomAvailabilityCall {
            roomId: self.room_id,
            isAvailable: self.available,
        }
        .abi_encode()
        .into()
    }
}

// ============================================================================
// Token amounts: withdraw (admin) and approve (guest)
// ============================================================================

#[derive(Debug, Clone, Args)]
pub struct TokenAmountForm {
    /// Amount in tokens, e.g. 100
    #[arg(long)]
    pub amount: String,
}

impl TokenAmountForm {
    pub fn validate(&self) -> Result<U256, FormError> {
        let mut v = Validator::new();
        let amount = v.check(parse_positive_amount("amount", &self.amount, ETHER_DECIMALS));
        v.finish(|| amount)
    }
}

pub fn withdraw_calldata(amount: U256) -> Bytes {
    HotelBooking::withdrawTokensCall { amount }.abi_encode().into()
}

/// Let the booking contract spend `amount` of the guest's tokens
pub fn approve_calldata(booking: Address, amount: U256) -> Bytes {
    ERC20::approveCall {
        spender: booking,
        amount,
    }
    .abi_encode()
    .into()
}
