// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/*! ABI definitions for the Lottery application */

use async_graphql::{Request, Response};
use linera_sdk::linera_base_types::{AccountOwner, Amount, ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest payment accepted by an [`Enter`](LotteryOperation::Enter)
/// operation: 0.01 native tokens.
pub fn minimum_entry() -> Amount {
    Amount::from_millis(10)
}

pub struct LotteryAbi;

impl ContractAbi for LotteryAbi {
    type Operation = LotteryOperation;
    type Response = LotteryResponse;
}

impl ServiceAbi for LotteryAbi {
    type Query = Request;
    type QueryResponse = Response;
}

#[derive(Debug, Deserialize, Serialize)]
pub enum LotteryOperation {
    /// Join the lottery by paying `amount` from `owner`'s account.
    /// Rejected if `amount` is below [`minimum_entry`].
    Enter {
        owner: AccountOwner,
        amount: Amount,
    },
    /// Draw a pseudo-random winner, pay out the whole pot and reset the
    /// player list. Only the manager may call this.
    PickWinner,

    // Queries
    GetPlayers,
    GetManager,
    GetPot,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum LotteryResponse {
    Ok,
    /// All entries so far, in entry order, duplicates included.
    Players(Vec<AccountOwner>),
    Manager(Option<AccountOwner>),
    Pot(Amount),
    WinnerPicked {
        winner: AccountOwner,
        prize: Amount,
    },
}

/// Why a lottery transition was rejected. A rejected operation aborts the
/// whole transaction, so no partial state ever persists.
#[derive(Debug, Error)]
pub enum LotteryError {
    #[error("entry payment {amount} is below the minimum of {minimum}")]
    InsufficientPayment { amount: Amount, minimum: Amount },

    #[error("only the manager may pick a winner")]
    Unauthorized,

    #[error("cannot pick a winner before anyone has entered")]
    NoPlayers,

    #[error("storage error: {0}")]
    Storage(#[from] linera_sdk::views::ViewError),
}
