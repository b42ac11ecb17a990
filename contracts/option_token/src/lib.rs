#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{AdminSetEvent, MintEvent, RetireEvent, TransferEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

#[contract]
pub struct OptionToken;

#[contractimpl]
impl OptionToken {
    /// Initialize the claim registry
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Counter, &0u64);

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

    /// Mint one option claim to `to`, returning the new sequential id
    ///
    /// `exercisable_at` is recorded for external display only; the sale
    /// engine keeps its own authoritative maturity record.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotAdmin`: Minter has no minting rights
    pub fn mint(env: Env, minter: Address, to: Address, exercisable_at: u64) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        minter.require_auth();

        if !Self::is_admin(env.clone(), minter) {
            return Err(Error::NotAdmin);
        }

        let counter: u64 = env
            .storage()
            .instance()
            .get(&DataKey::Counter)
            .unwrap_or(0);
        let option_id = counter.checked_add(1).ok_or(Error::InvalidAmount)?;

        env.storage().instance().set(&DataKey::Owner(option_id), &to);
        env.storage()
            .instance()
            .set(&DataKey::Exercisable(option_id), &exercisable_at);
        env.storage().instance().set(&DataKey::Counter, &option_id);

        env.events().publish(
            (Symbol::new(&env, "mint"), to.clone()),
            MintEvent {
                to: to.clone(),
                option_id,
                exercisable_at,
            },
        );

        Ok(option_id)
    }

    /// Transfer an option claim between holders
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NonexistentToken`: No claim under this id
    /// - `NotTokenOwner`: `from` does not hold the claim
    pub fn transfer(env: Env, from: Address, to: Address, option_id: u64) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        from.require_auth();

        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner(option_id))
            .ok_or(Error::NonexistentToken)?;

        if owner != from {
            return Err(Error::NotTokenOwner);
        }

        env.storage().instance().set(&DataKey::Owner(option_id), &to);

        env.events().publish(
            (Symbol::new(&env, "transfer"), option_id),
            TransferEvent { from, to, option_id },
        );

        Ok(())
    }

    /// Move a spent claim into the registry's own custody
    ///
    /// Burn-equivalent: the record survives as an audit trail, and
    /// self-custody is the sentinel that marks it spent.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `NotAdmin`: Caller has no minting rights
    /// - `NonexistentToken`: No claim under this id
    pub fn retire(env: Env, caller: Address, option_id: u64) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        caller.require_auth();

        if !Self::is_admin(env.clone(), caller) {
            return Err(Error::NotAdmin);
        }

        if !env.storage().instance().has(&DataKey::Owner(option_id)) {
            return Err(Error::NonexistentToken);
        }

        env.storage()
            .instance()
            .set(&DataKey::Owner(option_id), &env.current_contract_address());

        env.events().publish(
            (Symbol::new(&env, "retire"), option_id),
            RetireEvent { option_id },
        );

        Ok(())
    }

    /// Get the current holder of a claim
    pub fn owner_of(env: Env, option_id: u64) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner(option_id))
            .ok_or(Error::NonexistentToken)
    }

    /// Informational maturity lookup
    pub fn exercisable(env: Env, option_id: u64) -> Result<u64, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Exercisable(option_id))
            .ok_or(Error::NonexistentToken)
    }

    /// Check if an address holds minting rights
    pub fn is_admin(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Admins(address))
            .unwrap_or(false)
    }

    /// Total claims minted so far
    pub fn total_minted(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::Counter).unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    fn setup() -> (Env, Address, OptionTokenClient<'static>, Address) {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register_contract(None, OptionToken);
        let client = OptionTokenClient::new(&env, &contract_id);

        let admin = Address::generate(&env);
        client.initialize(&admin);

        (env, admin, client, contract_id)
    }

    #[test]
    fn test_initialize_once() {
        let (_env, admin, client, _id) = setup();

        let result = client.try_initialize(&admin);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    }

    #[test]
    fn test_mint_records_maturity() {
        let (env, _admin, client, _id) = setup();

        let minter = Address::generate(&env);
        let holder = Address::generate(&env);
        client.set_admin(&minter, &true);

        let id = client.mint(&minter, &holder, &80_000);
        assert_eq!(id, 1);
        assert_eq!(client.owner_of(&1), holder);
        assert_eq!(client.exercisable(&1), 80_000);
        assert_eq!(client.total_minted(), 1);

        let next = client.mint(&minter, &holder, &90_000);
        assert_eq!(next, 2);
    }

    #[test]
    fn test_mint_requires_admin() {
        let (env, _admin, client, _id) = setup();

        let minter = Address::generate(&env);
        let holder = Address::generate(&env);

        let result = client.try_mint(&minter, &holder, &0);
        assert_eq!(result, Err(Ok(Error::NotAdmin)));
    }

    #[test]
    fn test_transfer() {
        let (env, _admin, client, _id) = setup();

        let minter = Address::generate(&env);
        let holder1 = Address::generate(&env);
        let holder2 = Address::generate(&env);
        client.set_admin(&minter, &true);

        client.mint(&minter, &holder1, &0);
        client.transfer(&holder1, &holder2, &1);
        assert_eq!(client.owner_of(&1), holder2);

        let result = client.try_transfer(&holder1, &holder2, &1);
        assert_eq!(result, Err(Ok(Error::NotTokenOwner)));
    }

    #[test]
    fn test_retire_moves_custody_to_registry() {
        let (env, _admin, client, contract_id) = setup();

        let minter = Address::generate(&env);
        let holder = Address::generate(&env);
        client.set_admin(&minter, &true);

        client.mint(&minter, &holder, &0);
        client.retire(&minter, &1);

        assert_eq!(client.owner_of(&1), contract_id);

        // record survives retirement
        assert_eq!(client.exercisable(&1), 0);
    }

    #[test]
    fn test_retire_requires_admin() {
        let (env, _admin, client, _id) = setup();

        let minter = Address::generate(&env);
        let stranger = Address::generate(&env);
        let holder = Address::generate(&env);
        client.set_admin(&minter, &true);

        client.mint(&minter, &holder, &0);

        let result = client.try_retire(&stranger, &1);
        assert_eq!(result, Err(Ok(Error::NotAdmin)));
    }

    #[test]
    fn test_lookup_nonexistent() {
        let (_env, _admin, client, _id) = setup();

        assert_eq!(client.try_owner_of(&9), Err(Ok(Error::NonexistentToken)));
        assert_eq!(client.try_exercisable(&9), Err(Ok(Error::NonexistentToken)));
    }
}
