//! Contract interfaces for the BetEth game and its token
//!
//! Only the entry points the relay touches are declared here.

use alloy::sol;

sol! {
    /// BetEth game contract. It is also the ERC-20 the game mints.
    interface IBetEthGame {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);

        function betsOpen() external view returns (bool);
        function winner() external view returns (address);
        function getEthUsdPrice() external view returns (int256);
        function bethEthToken() external view returns (address);

        function openBets() external;
        function closeBets() external;
        function purchaseTokens() external payable;
        function bet(string prediction) external;
        function setWinner() external;
    }
}

sol! {
    /// Token that the game pulls from the bettor on purchase
    interface IBethEthToken {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
