use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Authorization errors
    NotAdmin = 3,
    NotTokenOwner = 4,

    // Claim errors
    NonexistentToken = 5,
    InvalidAmount = 6,
}
