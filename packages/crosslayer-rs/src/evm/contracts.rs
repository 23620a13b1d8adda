//! ERC20 contract ABI shared by the demos
//!
//! The hotel booking contract charges in an ERC20 token; guests approve the
//! booking contract before reserving a room.

use alloy::sol;

sol! {
    /// Minimal ERC20 interface
    #[derive(Debug)]
    #[sol(rpc)]
    contract ERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
