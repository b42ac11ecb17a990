#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{AdminSetEvent, MintEvent, TransferEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

#[contract]
pub struct ItemToken;

#[contractimpl]
impl ItemToken {
    /// Initialize the registry with a fixed supply cap
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidAmount`: Cap must be positive
    pub fn initialize(env: Env, admin: Address, cap: u64) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        if cap == 0 {
            return Err(Error::InvalidAmount);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Cap, &cap);
        env.storage().instance().set(&DataKey::TotalMinted, &0u64);

        Ok(())
    }

    /// Grant or revoke minting rights (e.g. for the sale engine contract)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_admin(env: Env, address: Address, allowed: bool) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Admins(address.clone()), &allowed);

        env.events().publish(
            (Symbol::new(&env, "admin_set"), address.clone()),
            AdminSetEvent { address, allowed },
        );

        Ok(())
    }

    /// Mint `amount` items to `to`, returning the new sequential ids
    ///
    /// Ids start at 1. The cap here is an independent backstop: callers
    /// are expected to do their own supply accounting before minting.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount is zero
    /// - `NotAdmin`: Minter has no minting rights
    /// - `CapExceeded`: Mint would push total past the cap
    pub fn mint(env: Env, minter: Address, to: Address, amount: u32) -> Result<Vec<u64>, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        minter.require_auth();

        if !Self::is_admin(env.clone(), minter) {
            return Err(Error::NotAdmin);
        }

        let cap: u64 = env
            .storage()
            .instance()
            .get(&DataKey::Cap)
            .ok_or(Error::NotInitialized)?;
        let total: u64 = env
            .storage()
            .instance()
            .get(&DataKey::TotalMinted)
            .unwrap_or(0);

        let new_total = total
            .checked_add(u64::from(amount))
            .ok_or(Error::InvalidAmount)?;
        if new_total > cap {
            return Err(Error::CapExceeded);
        }

        let mut ids = Vec::new(&env);
        for offset in 1..=u64::from(amount) {
            let item_id = total + offset;
            env.storage().instance().set(&DataKey::Owner(item_id), &to);
            ids.push_back(item_id);
        }

        env.storage().instance().set(&DataKey::TotalMinted, &new_total);

        env.events().publish(
            (Symbol::new(&env, "mint"), to.clone()),
            MintEvent {
                to: to.clone(),
                first_id: total + 1,
                amount,
            },
        );

        Ok(ids)
    }

    /// Transfer an item between holders
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NonexistentToken`: No item under this id
    /// - `NotTokenOwner`: `from` does not hold the item
    pub fn transfer(env: Env, from: Address, to: Address, item_id: u64) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        from.require_auth();

        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner(item_id))
            .ok_or(Error::NonexistentToken)?;

        if owner != from {
            return Err(Error::NotTokenOwner);
        }

        env.storage().instance().set(&DataKey::Owner(item_id), &to);

        env.events().publish(
            (Symbol::new(&env, "transfer"), item_id),
            TransferEvent { from, to, item_id },
        );

        Ok(())
    }

    /// Get the current holder of an item
    pub fn owner_of(env: Env, item_id: u64) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner(item_id))
            .ok_or(Error::NonexistentToken)
    }

    /// Check if an address holds minting rights
    pub fn is_admin(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Admins(address))
            .unwrap_or(false)
    }

    /// Total items minted so far
    pub fn total_minted(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TotalMinted)
            .unwrap_or(0)
    }

    /// Fixed supply cap
    pub fn cap(env: Env) -> Result<u64, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Cap)
            .ok_or(Error::NotInitialized)
    }
}
