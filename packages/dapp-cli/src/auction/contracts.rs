//! Public auction bindings
//!
//! `AuctionFactory` deploys one `PublicAuction` per sale and keeps the list.

use alloy::sol;

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract AuctionFactory {
        function auctions(uint256) external view returns (address);
        function createAuction(address _beneficiary, uint256 _biddingTime, uint256 _cooldownTime) external returns (address);
        function getAuctions() external view returns (address[] memory);
    }
}

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract PublicAuction {
        function bid() external payable;
        function withdraw() external;
        function finalizeAuction() external;

        function auctionEndTime() external view returns (uint256);
        function auctionFinalized() external view returns (bool);
        function beneficiary() external view returns (address);
        function cooldownTime() external view returns (uint256);
        function highestBid() external view returns (uint256);
        function highestBidder() external view returns (address);
        function lastBidTime(address) external view returns (uint256);
        function pendingReturns(address) external view returns (uint256);
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
            AuctionFactory::createAuctionCall::SELECTOR.to_vec(),
            selector("createAuction(address,uint256,uint256)")
        );
        assert_eq!(PublicAuction::bidCall::SELECTOR.to_vec(), selector("bid()"));
        assert_eq!(PublicAuction::withdrawCall::SELECTOR.to_vec(), selector("withdraw()"));
        assert_eq!(
            PublicAuction::finalizeAuctionCall::SELECTOR.to_vec(),
            selector("finalizeAuction()")
        );
    }
}
