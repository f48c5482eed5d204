//! ABI bindings for the pension strategy, its underlying ERC-20 and the ERC-4626 yield sub-vaults.

use alloy::sol;

sol! {
    /// Pension strategy: ERC-4626 style vault with vesting and inheritance extensions.
    #[sol(rpc)]
    interface IPensionStrategy {
        /// Vault shares held by `account`.
        function balanceOf(address account) external view returns (uint256);

        /// Unix time of the account's first deposit, 0 if none.
        function depositTimestamps(address account) external view returns (uint256);

        /// Designated beneficiary, zero address if unset.
        function beneficiaries(address account) external view returns (address);

        /// Principal deposited by `account`, 18 decimals.
        function totalDeposited(address account) external view returns (uint256);

        /// Monthly claims already paid to `account`.
        function claimedMonths(address account) external view returns (uint256);

        function deposit(uint256 assets, address receiver) external returns (uint256 shares);

        function withdraw(uint256 assets, address receiver, address owner) external returns (uint256 shares);

        function setBeneficiary(address beneficiary) external;

        /// Pays every vested month not yet claimed (principal + yield share).
        function claimMonthlyPension() external;

        /// Pays out `owner`'s position to the caller once the inactivity period has passed.
        function claimAsBeneficiary(address owner) external;
    }

    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);

        function allowance(address owner, address spender) external view returns (uint256);

        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Yield sub-vault (sDAI, sUSDS).
    #[sol(rpc)]
    interface IERC4626 {
        function convertToAssets(uint256 shares) external view returns (uint256);
    }
}
