use soroban_sdk::contracttype;

/// Error categories, one per failure class of the staking engine.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed input: zero amounts, out-of-range periods, unknown keys.
    Validation = 1,
    /// A per-staker ceiling (buckets, withdrawals) would be exceeded.
    Limit = 2,
    /// The ledger is not in a state that supports the operation.
    State = 3,
    /// The caller lacks the role the operation requires.
    Authorization = 4,
    /// Contract-level conditions such as initialisation and pausing.
    System = 5,
    /// A checked arithmetic step would overflow or underflow.
    Arithmetic = 6,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Paused = 3,

    Unauthorized = 10,
    NotProtocolMember = 11,

    InvalidAmount = 20,
    InvalidUnstakingPeriod = 21,
    InvalidConfig = 22,
    NothingRequested = 23,
    PeriodNotIncreased = 24,
    InvalidEpochLength = 25,
    UnstakingPeriodNotFound = 26,
    WithdrawalNotFound = 27,
    AmountExceedsLocked = 28,

    UnstakingPeriodsLimitReached = 30,
    WithdrawalsLimitReached = 31,

    NothingToWithdraw = 40,
    NothingToCompound = 41,
    NothingToClaim = 42,
    WithdrawalAlreadyReleased = 43,
    ProtocolMemberExists = 44,
    ProtocolMemberNotFound = 45,
    NoPendingAdmin = 46,

    Overflow = 50,
    Underflow = 51,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidAmount
            | ContractError::InvalidUnstakingPeriod
            | ContractError::InvalidConfig
            | ContractError::NothingRequested
            | ContractError::PeriodNotIncreased
            | ContractError::InvalidEpochLength
            | ContractError::UnstakingPeriodNotFound
            | ContractError::WithdrawalNotFound
            | ContractError::AmountExceedsLocked => ErrorCategory::Validation,
            ContractError::UnstakingPeriodsLimitReached | ContractError::WithdrawalsLimitReached => {
                ErrorCategory::Limit
            }
            ContractError::NothingToWithdraw
            | ContractError::NothingToCompound
            | ContractError::NothingToClaim
            | ContractError::WithdrawalAlreadyReleased
            | ContractError::ProtocolMemberExists
            | ContractError::ProtocolMemberNotFound
            | ContractError::NoPendingAdmin => ErrorCategory::State,
            ContractError::Unauthorized | ContractError::NotProtocolMember => {
                ErrorCategory::Authorization
            }
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Paused => ErrorCategory::System,
            ContractError::Overflow | ContractError::Underflow => ErrorCategory::Arithmetic,
        }
    }

    /// Human-readable reason for off-chain tooling.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Paused => "Staking operations are paused",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::NotProtocolMember => "Caller is not a protocol member",
            ContractError::InvalidAmount => "Amount is zero, negative or below the minimum stake",
            ContractError::InvalidUnstakingPeriod => "Unstaking period is outside the allowed range",
            ContractError::InvalidConfig => "Configuration value is out of range",
            ContractError::NothingRequested => "Must claim at least one reward stream",
            ContractError::PeriodNotIncreased => "Unstaking period can only be increased",
            ContractError::InvalidEpochLength => "Epoch length must be positive",
            ContractError::UnstakingPeriodNotFound => "No stake exists for this unstaking period",
            ContractError::WithdrawalNotFound => "No pending withdrawal matches amount and period",
            ContractError::AmountExceedsLocked => "Unstake amount exceeds the locked amount",
            ContractError::UnstakingPeriodsLimitReached => "Unstaking periods limit was reached",
            ContractError::WithdrawalsLimitReached => {
                "Withdrawals limit reached, wait until one of them is released"
            }
            ContractError::NothingToWithdraw => "No withdrawal has matured yet",
            ContractError::NothingToCompound => "No primary reward to compound",
            ContractError::NothingToClaim => "No reward to claim for a requested stream",
            ContractError::WithdrawalAlreadyReleased => "Withdrawal has already matured",
            ContractError::ProtocolMemberExists => "Address is already a protocol member",
            ContractError::ProtocolMemberNotFound => "Protocol member not found",
            ContractError::NoPendingAdmin => "No admin transfer is pending",
            ContractError::Overflow => "Arithmetic overflow",
            ContractError::Underflow => "Arithmetic underflow",
        }
    }
}
