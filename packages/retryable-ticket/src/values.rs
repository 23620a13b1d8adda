//! The `(bool, uint256, address, string)` state both demo contracts hold

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};

use crate::contracts::{RetryableTicketL1, RetryableTicketL2};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractValues {
    pub my_bool: bool,
    pub my_uint: U256,
    pub my_address: Address,
    pub my_string: String,
}

impl ContractValues {
    /// Constructor values of the L1 contract
    pub fn l1_initial() -> Self {
        Self {
            my_bool: false,
            my_uint: U256::from(111111u64),
            my_address: address!("1111111111111111111111111111111111111111"),
            my_string: "Hello world in L1".to_string(),
        }
    }

    /// Constructor values of the L2 contract
    pub fn l2_initial() -> Self {
        Self {
            my_bool: false,
            my_uint: U256::from(222222u64),
            my_address: address!("2222222222222222222222222222222222222222"),
            my_string: "Hello world in L2".to_string(),
        }
    }

    /// Values the demo sends from L1 to L2
    pub fn demo_update() -> Self {
        Self {
            my_bool: true,
            my_uint: U256::from(666666u64),
            my_address: address!("6666666666666666666666666666666666666666"),
            my_string: "RetryableTicket from far, far away".to_string(),
        }
    }

    /// `RetryableTicketL1(values..., l2Target, inbox)` constructor arguments
    pub fn l1_constructor_args(&self, l2_target: Address, inbox: Address) -> Vec<u8> {
        (
            self.my_bool,
            self.my_uint,
            self.my_address,
            self.my_string.clone(),
            l2_target,
            inbox,
        )
            .abi_encode_params()
    }

    /// `RetryableTicketL2(values..., l1Target)` constructor arguments
    pub fn l2_constructor_args(&self, l1_target: Address) -> Vec<u8> {
        (
            self.my_bool,
            self.my_uint,
            self.my_address,
            self.my_string.clone(),
            l1_target,
        )
            .abi_encode_params()
    }

    /// Call data for `RetryableTicketL2.setValues`, carried by the retryable
    pub fn set_values_calldata(&self) -> Bytes {
        RetryableTicketL2::setValuesCall {
            _myBool: self.my_bool,
            _myUint: self.my_uint,
            _myAddress: self.my_address,
            _myString: self.my_string.clone(),
        }
        .abi_encode()
        .into()
    }

    /// Lines printed by `show` and `demo`, e.g. `Current L2 uint256 value: "222222"`
    pub fn display_lines(&self, label: &str) -> Vec<String> {
        vec![
            format!("{} boolean value: \"{}\"", label, self.my_bool),
            format!("{} uint256 value: \"{}\"", label, self.my_uint),
            format!("{} address value: \"{}\"", label, self.my_address),
            format!("{} string value: \"{}\"", label, self.my_string),
        ]
    }

    pub fn print(&self, label: &str) {
        for line in self.display_lines(label) {
            println!("{}", line);
        }
    }
}

impl From<RetryableTicketL1::showValuesReturn> for ContractValues {
    fn from(ret: RetryableTicketL1::showValuesReturn) -> Self {
        Self {
            my_bool: ret._0,
            my_uint: ret._1,
            my_address: ret._2,
            my_string: ret._3,
        }
    }
}

impl From<RetryableTicketL2::showValuesReturn> for ContractValues {
    fn from(ret: RetryableTicketL2::showValuesReturn) -> Self {
        Self {
            my_bool: ret._0,
            my_uint: ret._1,
            my_address: ret._2,
            my_string: ret._3,
        }
    }
}
