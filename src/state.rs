// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use linera_sdk::{
    linera_base_types::{AccountOwner, Amount},
    views::{linera_views, LogView, RegisterView, RootView, View, ViewStorageContext},
};
use lottery::{minimum_entry, LotteryError};

/// The application state for the Lottery.
#[derive(RootView)]
#[view(context = ViewStorageContext)]
pub struct LotteryState {
    /// The account that instantiated the lottery. Set once, never changed.
    pub manager: RegisterView<Option<AccountOwner>>,
    /// Everyone who entered, in entry order. The same owner may appear more
    /// than once if they entered repeatedly.
    pub players: LogView<AccountOwner>,
    /// Sum of all accepted entry payments not yet paid out.
    pub pot: RegisterView<Amount>,
}

impl LotteryState {
    /// Records an entry paid with `amount`. The payment itself is moved by the
    /// contract; this only updates the bookkeeping.
    pub fn enter(&mut self, owner: AccountOwner, amount: Amount) -> Result<(), LotteryError> {
        let minimum = minimum_entry();
        if amount < minimum {
            return Err(LotteryError::InsufficientPayment { amount, minimum });
        }
        self.players.push(owner);
        self.pot.set(self.pot.get().saturating_add(amount));
        Ok(())
    }

    /// All entries so far, in entry order.
    pub async fn players(&self) -> Result<Vec<AccountOwner>, LotteryError> {
        let count = self.players.count();
        Ok(self.players.read(0..count).await?)
    }

    /// Selects the winning entry for `seed`, empties the player list and
    /// zeroes the pot. Returns the winner and the prize so the contract can
    /// move the funds. The seed is reduced modulo the number of entries, so
    /// an owner's chance is proportional to how many times they entered.
    pub async fn pick_winner(&mut self, seed: u64) -> Result<(AccountOwner, Amount), LotteryError> {
        let players = self.players().await?;
        if players.is_empty() {
            return Err(LotteryError::NoPlayers);
        }
        let index = (seed % players.len() as u64) as usize;
        let winner = players[index].clone();
        let prize = *self.pot.get();

        self.players.clear();
        self.pot.set(Amount::ZERO);

        Ok((winner, prize))
    }
}
