use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // ROUND CONFIGURATION ERRORS (10-19)
    // ============================================
    /// Round's basic price is zero (round not configured)
    ZeroBasicPriceConfig = 10,
    /// Round's floor price is zero (round not configured)
    ZeroMinPriceConfig = 11,
    /// Current time precedes the round's start time
    SaleNotStarted = 12,

    // ============================================
    // PAYMENT / SUPPLY ERRORS (20-29)
    // ============================================
    /// Attached payment below the required total
    CannotUnderpayForMint = 20,
    /// Request would exceed remaining global capacity
    AmountGreaterThanRemaining = 21,
    /// Amount must be positive and arithmetic must not overflow
    InvalidAmount = 22,
    /// Sweep may not touch the collected payment-token balance
    CannotSweepPaymentToken = 23,

    // ============================================
    // OPTION LIFECYCLE ERRORS (30-39)
    // ============================================
    /// No option record under this id
    OptionNotFound = 30,
    /// Caller does not hold the claim, or it was already exercised
    NotOptionOwner = 31,
    /// Option has not reached its maturity instant
    NotExercisableYet = 32,
}
