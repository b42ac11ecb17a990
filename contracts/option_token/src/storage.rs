use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Admins(Address),  // address → minting rights flag
    Owner(u64),       // option id → current holder
    Exercisable(u64), // option id → maturity timestamp (informational)
    Counter,
    Initialized,
}
