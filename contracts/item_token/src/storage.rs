use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Admins(Address), // address → minting rights flag
    Owner(u64),      // item id → current owner
    TotalMinted,
    Cap,
    Initialized,
}
