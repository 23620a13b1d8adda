//! Hotel booking contract bindings
//!
//! Rooms are paid for in the hotel's ERC20 token; see
//! [`crosslayer_rs::evm::ERC20`] for the approval call.

use alloy::sol;

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract HotelBooking {
        struct Review {
            address guest;
            uint8 rating;
            string comment;
        }

        struct Room {
            uint256 id;
            uint8 category;
            uint256 pricePerNight;
            bool isAvailable;
            Review[] reviews;
        }

        function addRoom(uint8 category, uint256 pricePerNight) external;
        function addReview(uint256 roomId, uint8 rating, string memory comment) external;
        function bookRoomByCategory(uint8 category, uint256 checkInDate, uint256 checkOutDate) external;
        function setRoomAvailability(uint256 roomId, bool isAvailable) external;
        function withdrawTokens(uint256 amount) external;

        function getAllRooms() external view returns (Room[] memory);
        function getRoomDetails(uint256 roomId) external view returns (
            string memory category,
            uint256 pricePerNight,
            bool isAvailable,
            Review[] memory reviews
        );
        function getBookingDetails(uint256 roomId) external view returns (
            address guest,
            uint256 checkInDate,
            uint256 checkOutDate,
            string memory category
        );
        function owner() external view returns (address);
        function roomCount() external view returns (uint256);
        function token() external view returns (address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_write_selectors() {
        let selector = |sig: &str| keccak256(sig.as_bytes())[..4].to_vec();
        assert_eq!(
            HotelBooking::addRoomCall::SELECTOR.to_vec(),
            selector("addRoom(uint8,uint256)")
        );
        assert_eq!(
            HotelBooking::bookRoomByCategoryCall::SELECTOR.to_vec(),
            selector("bookRoomByCategory(uint8,uint256,uint256)")
        );
        assert_eq!(
            HotelBooking::addReviewCall::SELECTOR.to_vec(),
            selector("addReview(uint256,uint8,string)")
        );
        assert_eq!(
            HotelBooking::setRoomAvailabilityCall::SELECTOR.to_vec(),
            selector("setRoomAvailability(uint256,bool)")
        );
        assert_eq!(
            HotelBooking::withdrawTokensCall::SELECTOR.to_vec(),
            selector("withdrawTokens(uint256)")
        );
    }
}
