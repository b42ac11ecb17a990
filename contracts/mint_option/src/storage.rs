use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundConfig {
    /// Unix timestamp when the round opens; purchases before this fail
    pub start_time: u64,
    /// Price per unit at term length zero, in the payment token's
    /// smallest unit; zero means the round is not configured
    pub basic_price: i128,
    /// Floor the discounted price never drops below; zero means the
    /// round is not configured
    pub min_price: i128,
    /// Price reduction per whole waiting-term unit
    pub discount_per_term_unit: i128,
    /// Seconds per waiting-term unit
    pub term_unit: u64,
    /// Whether option purchases debit the shared cap at issue time
    /// (synced) or only at exercise time (un-synced)
    pub sync_supply: bool,
}

impl RoundConfig {
    /// The zero-valued placeholder returned for rounds never configured.
    pub fn unset() -> Self {
        RoundConfig {
            start_time: 0,
            basic_price: 0,
            min_price: 0,
            discount_per_term_unit: 0,
            term_unit: 0,
            sync_supply: false,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionStatus {
    /// Claim issued and waiting out its term
    Issued = 0,
    /// Claim converted into a minted unit; terminal
    Exercised = 1,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OptionRecord {
    /// Round the claim was purchased in
    pub round_id: u32,
    /// Timestamp of purchase
    pub issued_at: u64,
    /// Waiting-term units the buyer committed to
    pub term_length: u32,
    /// issued_at + term_length × term_unit, fixed at issue
    pub exercisable_at: u64,
    /// True when the round was un-synced at issue, i.e. the supply
    /// debit is still owed at exercise time
    pub deferred_supply: bool,
    /// Lifecycle state; never deleted once Exercised
    pub status: OptionStatus,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Operator,
    Receiver,
    PaymentToken,
    ItemToken,
    OptionToken,
    Cap,
    Minted,
    Config(u32), // round id → RoundConfig
    Option(u64), // option id → OptionRecord
    Initialized,
}
