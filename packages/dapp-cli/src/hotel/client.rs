//! Read side of the hotel booking contract

use alloy::primitives::{Address, U256};
use crosslayer_rs::evm::{EvmReader, ERC20};
use crosslayer_rs::units::format_ether;
use eyre::{Result, WrapErr};

use super::contracts::HotelBooking;
use super::forms::RoomCategory;

pub const TOKEN_SYMBOL: &str = "MHT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub guest: Address,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: U256,
    pub category: u8,
    pub price_per_night: U256,
    pub is_available: bool,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub guest: Address,
    pub check_in: U256,
    pub check_out: U256,
    pub category: String,
}

impl From<HotelBooking::Review> for Review {
    fn from(r: HotelBooking::Review) -> Self {
        Self {
            guest: r.guest,
            rating: r.rating,
            comment: r.comment,
        }
    }
}

impl From<HotelBooking::Room> for Room {
    fn from(r: HotelBooking::Room) -> Self {
        Self {
            id: r.id,
            category: r.category,
            price_per_night: r.pricePerNight,
            is_available: r.isAvailable,
            reviews: r.reviews.into_iter().map(Review::from).collect(),
        }
    }
}

impl Room {
    pub fn category_label(&self) -> &'static str {
        RoomCategory::label_of(self.category)
    }

    /// Lines printed for one room card
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Room #{} - {}", self.id, self.category_label()),
            format!(
                "  Price per Night: {} {}",
                format_ether(self.price_per_night),
                TOKEN_SYMBOL
            ),
            format!(
                "  {}",
                if self.is_available {
                    "Available"
                } else {
                    "Unavailable"
                }
            ),
            "  Reviews:".to_string(),
        ];

        if self.reviews.is_empty() {
            lines.push("    No reviews yet.".to_string());
        } else {
            for review in &self.reviews {
                lines.push(format!("    {} - {} stars", review.comment, review.rating));
            }
        }
        lines
    }
}

/// Lines printed by `hotel rooms`
pub fn rooms_listing(rooms: &[Room]) -> Vec<String> {
    if rooms.is_empty() {
        return vec!["No rooms available".to_string()];
    }
    rooms.iter().flat_map(Room::display_lines).collect()
}

pub struct HotelClient<'a> {
    reader: &'a EvmReader,
    booking: Address,
    token: Address,
}

impl<'a> HotelClient<'a> {
    pub fn new(reader: &'a EvmReader, booking: Address, token: Address) -> Self {
        Self {
            reader,
            booking,
            token,
        }
    }

    pub fn booking(&self) -> Address {
        self.booking
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub async fn rooms(&self) -> Result<Vec<Room>> {
        let contract = HotelBooking::new(self.booking, self.reader.provider());
        let rooms = contract
            .getAllRooms()
            .call()
            .await
            .wrap_err("Failed to query getAllRooms")?
            ._0;
        Ok(rooms.into_iter().map(Room::from).collect())
    }

    pub async fn room(&self, room_id: U256) -> Result<Room> {
        self.rooms()
            .await?
            .into_iter()
            .find(|r| r.id == room_id)
            .ok_or_else(|| eyre::eyre!("Room #{} does not exist", room_id))
    }

    /// `getRoomDetails`, which reports the category by name
    pub async fn room_details(&self, room_id: U256) -> Result<Room> {
        let contract = HotelBooking::new(self.booking, self.reader.provider());
        let details = contract
            .getRoomDetails(room_id)
            .call()
            .await
            .wrap_err_with(|| format!("Failed to query room #{}", room_id))?;

        let category = RoomCategory::from_label(&details.category)
            .ok_or_else(|| eyre::eyre!("Unknown room category {:?}", details.category))?;
        Ok(Room {
            id: room_id,
            category: category as u8,
            price_per_night: details.pricePerNight,
            is_available: details.isAvailable,
            reviews: details.reviews.into_iter().map(Review::from).collect(),
        })
    }

    pub async fn room_count(&self) -> Result<U256> {
        let contract = HotelBooking::new(self.booking, self.reader.provider());
        Ok(contract
            .roomCount()
            .call()
            .await
            .wrap_err("Failed to query roomCount")?
            ._0)
    }

    /// Payment token configured in the booking contract
    pub async fn payment_token(&self) -> Result<Address> {
        let contract = HotelBooking::new(self.booking, self.reader.provider());
        Ok(contract
            .token()
            .call()
            .await
            .wrap_err("Failed to query token")?
            ._0)
    }

    pub async fn booking_details(&self, room_id: U256) -> Result<BookingDetails> {
        let contract = HotelBooking::new(self.booking, self.reader.provider());
        let details = contract
            .getBookingDetails(room_id)
            .call()
            .await
            .wrap_err_with(|| format!("Failed to query booking of room #{}", room_id))?;

        Ok(BookingDetails {
            guest: details.guest,
            check_in: details.checkInDate,
            check_out: details.checkOutDate,
            category: details.category,
        })
    }

    pub async fn owner(&self) -> Result<Address> {
        let contract = HotelBooking::new(self.booking, self.reader.provider());
        Ok(contract
            .owner()
            .call()
            .await
            .wrap_err("Failed to query owner")?
            ._0)
    }

    /// Tokens `guest` has approved the booking contract to spend
    pub async fn allowance(&self, guest: Address) -> Result<U256> {
        let token = ERC20::new(self.token, self.reader.provider());
        Ok(token
            .allowance(guest, self.booking)
            .call()
            .await
            .wrap_err("Failed to query token allowance")?
            ._0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(reviews: Vec<Review>) -> Room {
        Room {
            id: U256::from(3),
            category: 0,
            price_per_night: U256::from(1_500_000_000_000_000_000u128),
            is_available: true,
            reviews,
        }
    }

    #[test]
    fn test_room_without_reviews() {
        assert_eq!(
            room(vec![]).display_lines(),
            vec![
                "Room #3 - Presidential",
                "  Price per Night: 1.5 MHT",
                "  Available",
                "  Reviews:",
                "    No reviews yet.",
            ]
        );
    }

    #[test]
    fn test_room_with_reviews() {
        let mut r = room(vec![Review {
            guest: Address::repeat_byte(0x01),
            rating: 4,
            comment: "Great stay".into(),
        }]);
        r.is_available = false;

        let lines = r.display_lines();
        assert_eq!(lines[2], "  Unavailable");
        assert_eq!(lines[4], "    Great stay - 4 stars");
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(rooms_listing(&[]), vec!["No rooms available"]);
    }

    #[test]
    fn test_from_binding() {
        let raw = HotelBooking::Room {
            id: U256::from(1),
            category: 2,
            pricePerNight: U256::from(10),
            isAvailable: true,
            reviews: vec![HotelBooking::Review {
                guest: Address::ZERO,
                rating: 5,
                comment: "Quiet".into(),
            }],
        };
        let room = Room::from(raw);
        assert_eq!(room.category_label(), "Suite");
        assert_eq!(room.reviews[0].comment, "Quiet");
    }
}
