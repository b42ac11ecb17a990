use crate::storage::RoundConfig;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct ConfigSetEvent {
    pub round_id: u32,
    pub config: RoundConfig,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenPurchasedEvent {
    pub round_id: u32,
    pub buyer: Address,
    pub amount: u32,
    pub paid: i128,
    pub refunded: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OptionPurchasedEvent {
    pub round_id: u32,
    pub buyer: Address,
    pub option_id: u64,
    pub term_length: u32,
    pub price: i128,
    pub exercisable_at: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OptionExercisedEvent {
    pub option_id: u64,
    pub holder: Address,
    pub item_id: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ClaimedEvent {
    pub receiver: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SweptEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
}
