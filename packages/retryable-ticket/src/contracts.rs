//! Demo contract bindings
//!
//! `RetryableTicketL1` forwards `setValues` to its L2 counterpart as a
//! retryable ticket. `RetryableTicketL2` only accepts `setValues` from the
//! aliased L1 contract.

use alloy::sol;

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract RetryableTicketL1 {
        function setValuesInL2(
            bool _myBool,
            uint256 _myUint,
            address _myAddress,
            string memory _myString,
            uint256 maxSubmissionCost,
            uint256 maxGas,
            uint256 gasPriceBid
        ) public payable returns (uint256);

        function updateL2Target(address _l2Target) public;

        function showValues() public view returns (bool, uint256, address, string memory);
    }
}

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract RetryableTicketL2 {
        function setValues(bool _myBool, uint256 _myUint, address _myAddress, string memory _myString) public;

        function showValues() public view returns (bool, uint256, address, string memory);
    }
}

pub const L1_CONTRACT_NAME: &str = "RetryableTicketL1";
pub const L2_CONTRACT_NAME: &str = "RetryableTicketL2";
