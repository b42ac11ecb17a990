#![no_std]

mod error;
mod events;
mod pricing;
mod storage;
mod supply;

pub use error::Error;
use events::*;
use storage::{DataKey, OptionRecord, OptionStatus, RoundConfig};
use supply::SupplyMode;

use soroban_sdk::{contract, contractimpl, token, vec, Address, Env, IntoVal, Symbol, Vec};

#[contract]
pub struct MintOption;

#[contractimpl]
impl MintOption {
    // ============================================
    // INITIALIZATION & CONFIGURATION
    // ============================================

    /// Initialize the sale engine
    ///
    /// The engine must separately be granted minting rights on both
    /// registries by whoever administers them; it does not manage or
    /// verify that grant itself.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidAmount`: Cap must be positive
    pub fn initialize(
        env: Env,
        operator: Address,
        receiver: Address,
        payment_token: Address,
        item_token: Address,
        option_token: Address,
        cap: u32,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        if cap == 0 {
            return Err(Error::InvalidAmount);
        }

        operator.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Operator, &operator);
        env.storage().instance().set(&DataKey::Receiver, &receiver);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, &payment_token);
        env.storage().instance().set(&DataKey::ItemToken, &item_token);
        env.storage()
            .instance()
            .set(&DataKey::OptionToken, &option_token);
        env.storage().instance().set(&DataKey::Cap, &cap);
        env.storage().instance().set(&DataKey::Minted, &0u32);

        Ok(())
    }

    /// Set or overwrite a round's sale parameters
    ///
    /// No value validation happens here: a round may be parked with zero
    /// prices and only becomes purchasable once both prices are non-zero.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_config(env: Env, round_id: u32, config: RoundConfig) -> Result<(), Error> {
        let operator: Address = env
            .storage()
            .instance()
            .get(&DataKey::Operator)
            .ok_or(Error::NotInitialized)?;
        operator.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Config(round_id), &config);

        env.events().publish(
            (Symbol::new(&env, "config_set"), round_id),
            ConfigSetEvent { round_id, config },
        );

        Ok(())
    }

    /// Get a round's parameters, zero-valued if never set
    pub fn get_config(env: Env, round_id: u32) -> RoundConfig {
        env.storage()
            .instance()
            .get::<DataKey, RoundConfig>(&DataKey::Config(round_id))
            .unwrap_or(RoundConfig::unset())
    }

    // ============================================
    // PURCHASE PATH A: IMMEDIATE MINT
    // ============================================

    /// Buy `amount` units at the round's basic price
    ///
    /// `payment` is the attached value; any excess over the required
    /// total is refunded in the same invocation.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ZeroBasicPriceConfig`: Round's basic price is zero
    /// - `ZeroMinPriceConfig`: Round's floor price is zero
    /// - `SaleNotStarted`: Round has not opened yet
    /// - `InvalidAmount`: Amount is zero or arithmetic overflows
    /// - `CannotUnderpayForMint`: Payment below required total
    /// - `AmountGreaterThanRemaining`: Would exceed remaining capacity
    pub fn purchase_token(
        env: Env,
        buyer: Address,
        round_id: u32,
        amount: u32,
        payment: i128,
    ) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        buyer.require_auth();

        let config = Self::get_config(env.clone(), round_id);
        Self::check_round_open(&env, &config)?;

        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let required =
            pricing::required_payment(config.basic_price, amount).ok_or(Error::InvalidAmount)?;
        if payment < required {
            return Err(Error::CannotUnderpayForMint);
        }

        let cap = Self::cap(env.clone())?;
        let minted = Self::minted(env.clone());
        let new_minted = supply::checked_commit(minted, amount, cap)
            .ok_or(Error::AmountGreaterThanRemaining)?;

        // All checks passed; mutations from here on
        Self::collect_and_refund(&env, &buyer, payment, required)?;
        env.storage().instance().set(&DataKey::Minted, &new_minted);
        Self::mint_items(&env, &buyer, amount)?;

        env.events().publish(
            (Symbol::new(&env, "token_purchased"), round_id, buyer.clone()),
            TokenPurchasedEvent {
                round_id,
                buyer,
                amount,
                paid: required,
                refunded: payment - required,
            },
        );

        Ok(())
    }

    // ============================================
    // PURCHASE PATH B: OPTION ISSUANCE
    // ============================================

    /// Buy `amount` option claims at a term-length discount
    ///
    /// Each claim is an independently tracked, independently exercisable
    /// right to one unit once `term_length × term_unit` seconds have
    /// passed. Returns the issued claim ids.
    ///
    /// In a synced round the claims debit the shared cap immediately; in
    /// an un-synced round issuance only probes remaining capacity and the
    /// debit is owed at exercise time.
    ///
    /// # Errors
    /// Same kinds as `purchase_token`, at the discounted price.
    pub fn purchase_option(
        env: Env,
        buyer: Address,
        round_id: u32,
        term_length: u32,
        amount: u32,
        payment: i128,
    ) -> Result<Vec<u64>, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        buyer.require_auth();

        let config = Self::get_config(env.clone(), round_id);
        Self::check_round_open(&env, &config)?;

        if amount == 0 {
            return Err(Error::InvalidAmount);
        }

        let price = pricing::price_for(&config, term_length).ok_or(Error::InvalidAmount)?;
        let required = pricing::required_payment(price, amount).ok_or(Error::InvalidAmount)?;
        if payment < required {
            return Err(Error::CannotUnderpayForMint);
        }

        let issued_at = env.ledger().timestamp();
        let term_seconds = u64::from(term_length)
            .checked_mul(config.term_unit)
            .ok_or(Error::InvalidAmount)?;
        let exercisable_at = issued_at
            .checked_add(term_seconds)
            .ok_or(Error::InvalidAmount)?;

        let cap = Self::cap(env.clone())?;
        let minted = Self::minted(env.clone());
        let new_minted = supply::checked_commit(minted, amount, cap)
            .ok_or(Error::AmountGreaterThanRemaining)?;

        let mode = SupplyMode::for_round(config.sync_supply);

        // All checks passed; mutations from here on
        Self::collect_and_refund(&env, &buyer, payment, required)?;
        if mode.debits_at_issue() {
            env.storage().instance().set(&DataKey::Minted, &new_minted);
        }

        let option_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::OptionToken)
            .ok_or(Error::NotInitialized)?;

        let mut ids = Vec::new(&env);
        for _ in 0..amount {
            let option_id: u64 = env.invoke_contract(
                &option_token,
                &Symbol::new(&env, "mint"),
                vec![
                    &env,
                    env.current_contract_address().to_val(),
                    buyer.to_val(),
                    exercisable_at.into_val(&env),
                ],
            );

            env.storage().instance().set(
                &DataKey::Option(option_id),
                &OptionRecord {
                    round_id,
                    issued_at,
                    term_length,
                    exercisable_at,
                    deferred_supply: !mode.debits_at_issue(),
                    status: OptionStatus::Issued,
                },
            );

            env.events().publish(
                (Symbol::new(&env, "option_purchased"), round_id, buyer.clone()),
                OptionPurchasedEvent {
                    round_id,
                    buyer: buyer.clone(),
                    option_id,
                    term_length,
                    price,
                    exercisable_at,
                },
            );

            ids.push_back(option_id);
        }

        Ok(ids)
    }

    /// Convert a matured option claim into a minted unit
    ///
    /// The claim's custody moves to the option registry itself (the
    /// burn-equivalent), so a repeat attempt fails the ownership check.
    /// `NotOptionOwner` deliberately covers both a non-owner caller and
    /// an already-exercised claim.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `OptionNotFound`: No record under this id
    /// - `NotOptionOwner`: Caller is not the holder, or claim is spent
    /// - `NotExercisableYet`: Maturity instant not reached
    /// - `AmountGreaterThanRemaining`: Deferred debit finds the cap
    ///   exhausted by intervening direct purchases
    pub fn exercise_option(env: Env, caller: Address, option_id: u64) -> Result<u64, Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        caller.require_auth();

        let mut record: OptionRecord = env
            .storage()
            .instance()
            .get(&DataKey::Option(option_id))
            .ok_or(Error::OptionNotFound)?;

        let option_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::OptionToken)
            .ok_or(Error::NotInitialized)?;

        let holder: Address = env.invoke_contract(
            &option_token,
            &Symbol::new(&env, "owner_of"),
            vec![&env, option_id.into_val(&env)],
        );

        if record.status == OptionStatus::Exercised || holder != caller {
            return Err(Error::NotOptionOwner);
        }

        if env.ledger().timestamp() < record.exercisable_at {
            return Err(Error::NotExercisableYet);
        }

        if record.deferred_supply {
            let cap = Self::cap(env.clone())?;
            let minted = Self::minted(env.clone());
            let new_minted = supply::checked_commit(minted, 1, cap)
                .ok_or(Error::AmountGreaterThanRemaining)?;
            env.storage().instance().set(&DataKey::Minted, &new_minted);
        }

        record.status = OptionStatus::Exercised;
        env.storage()
            .instance()
            .set(&DataKey::Option(option_id), &record);

        // custody to the registry itself marks the claim spent
        env.invoke_contract::<()>(
            &option_token,
            &Symbol::new(&env, "retire"),
            vec![
                &env,
                env.current_contract_address().to_val(),
                option_id.into_val(&env),
            ],
        );

        let item_id = Self::mint_items(&env, &caller, 1)?;

        env.events().publish(
            (Symbol::new(&env, "option_exercised"), option_id),
            OptionExercisedEvent {
                option_id,
                holder: caller,
                item_id,
            },
        );

        Ok(item_id)
    }

    // ============================================
    // SETTLEMENT
    // ============================================

    /// Move the engine's entire collected payment balance to the receiver
    ///
    /// Calling with a zero balance succeeds and moves nothing. Returns
    /// the amount moved.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn claim(env: Env) -> Result<i128, Error> {
        let operator: Address = env
            .storage()
            .instance()
            .get(&DataKey::Operator)
            .ok_or(Error::NotInitialized)?;
        operator.require_auth();

        let receiver: Address = env
            .storage()
            .instance()
            .get(&DataKey::Receiver)
            .ok_or(Error::NotInitialized)?;
        let payment_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)?;

        let client = token::Client::new(&env, &payment_token);
        let balance = client.balance(&env.current_contract_address());

        if balance > 0 {
            client.transfer(&env.current_contract_address(), &receiver, &balance);

            env.events().publish(
                (Symbol::new(&env, "claimed"), receiver.clone()),
                ClaimedEvent {
                    receiver,
                    amount: balance,
                },
            );
        }

        Ok(balance)
    }

    /// Recover a foreign token sent to the engine by mistake
    ///
    /// Does not touch the committed-supply counter or round state. The
    /// collected payment-token balance is off limits; only `claim` moves
    /// it, and only to the fixed receiver.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount must be positive
    /// - `CannotSweepPaymentToken`: Token is the payment token
    pub fn sweep(env: Env, token: Address, to: Address, amount: i128) -> Result<(), Error> {
        let operator: Address = env
            .storage()
            .instance()
            .get(&DataKey::Operator)
            .ok_or(Error::NotInitialized)?;
        operator.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let payment_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)?;
        if token == payment_token {
            return Err(Error::CannotSweepPaymentToken);
        }

        let client = token::Client::new(&env, &token);
        client.transfer(&env.current_contract_address(), &to, &amount);

        env.events().publish(
            (Symbol::new(&env, "swept"), token.clone()),
            SweptEvent { token, to, amount },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Get an option's engine-side record
    pub fn get_option(env: Env, option_id: u64) -> Result<OptionRecord, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Option(option_id))
            .ok_or(Error::OptionNotFound)
    }

    /// Units committed against the cap so far
    pub fn minted(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::Minted).unwrap_or(0)
    }

    /// Fixed global supply cap
    pub fn cap(env: Env) -> Result<u32, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Cap)
            .ok_or(Error::NotInitialized)
    }

    /// Units still available to direct purchases and synced issuance
    pub fn remaining(env: Env) -> Result<u32, Error> {
        let cap = Self::cap(env.clone())?;
        Ok(cap.saturating_sub(Self::minted(env)))
    }

    /// Quote the unit price a round would charge for a waiting term
    ///
    /// # Errors
    /// - `ZeroBasicPriceConfig` / `ZeroMinPriceConfig`: Round unconfigured
    pub fn price_of(env: Env, round_id: u32, term_length: u32) -> Result<i128, Error> {
        let config = Self::get_config(env.clone(), round_id);
        if config.basic_price == 0 {
            return Err(Error::ZeroBasicPriceConfig);
        }
        if config.min_price == 0 {
            return Err(Error::ZeroMinPriceConfig);
        }
        pricing::price_for(&config, term_length).ok_or(Error::InvalidAmount)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_round_open(env: &Env, config: &RoundConfig) -> Result<(), Error> {
        if config.basic_price == 0 {
            return Err(Error::ZeroBasicPriceConfig);
        }
        if config.min_price == 0 {
            return Err(Error::ZeroMinPriceConfig);
        }
        if env.ledger().timestamp() < config.start_time {
            return Err(Error::SaleNotStarted);
        }
        Ok(())
    }

    /// Pull the attached payment in, send back any excess over `required`
    fn collect_and_refund(
        env: &Env,
        buyer: &Address,
        payment: i128,
        required: i128,
    ) -> Result<(), Error> {
        let payment_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)?;

        let client = token::Client::new(env, &payment_token);
        client.transfer(buyer, &env.current_contract_address(), &payment);

        let refund = payment - required;
        if refund > 0 {
            client.transfer(&env.current_contract_address(), buyer, &refund);
        }

        Ok(())
    }

    /// Mint `amount` units to `to` via the item registry, returning the
    /// first minted id
    fn mint_items(env: &Env, to: &Address, amount: u32) -> Result<u64, Error> {
        let item_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::ItemToken)
            .ok_or(Error::NotInitialized)?;

        let ids: Vec<u64> = env.invoke_contract(
            &item_token,
            &Symbol::new(env, "mint"),
            vec![
                env,
                env.current_contract_address().to_val(),
                to.to_val(),
                amount.into_val(env),
            ],
        );

        ids.get(0).ok_or(Error::InvalidAmount)
    }
}
