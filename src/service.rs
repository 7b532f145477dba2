// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(target_arch = "wasm32", no_main)]

mod state;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Object, Request, Response, Schema};
use linera_sdk::{
    linera_base_types::{AccountOwner, Amount, WithServiceAbi},
    views::View,
    Service, ServiceRuntime,
};
use lottery::{LotteryAbi, LotteryOperation};

use self::state::LotteryState;

pub struct LotteryService {
    state: Arc<LotteryState>,
    runtime: Arc<ServiceRuntime<Self>>,
}

linera_sdk::service!(LotteryService);

impl WithServiceAbi for LotteryService {
    type Abi = LotteryAbi;
}

impl Service for LotteryService {
    type Parameters = ();

    async fn new(runtime: ServiceRuntime<Self>) -> Self {
        let state = LotteryState::load(runtime.root_view_storage_context())
            .await
            .expect("Failed to load state");
        LotteryService {
            state: Arc::new(state),
            runtime: Arc::new(runtime),
        }
    }

    async fn handle_query(&self, request: Request) -> Response {
        let schema = Schema::build(
            QueryRoot {
                state: self.state.clone(),
            },
            MutationRoot {
                runtime: self.runtime.clone(),
            },
            EmptySubscription,
        )
        .finish();
        schema.execute(request).await
    }
}

struct QueryRoot {
    state: Arc<LotteryState>,
}

#[Object]
impl QueryRoot {
    /// Everyone who entered the current round, in entry order.
    async fn players(&self) -> Vec<String> {
        let count = self.state.players.count();
        self.state
            .players
            .read(0..count)
            .await
            .expect("Failed to read players")
            .into_iter()
            .map(|player| player.to_string())
            .collect()
    }

    /// Number of entries in the current round.
    async fn player_count(&self) -> u64 {
        self.state.players.count() as u64
    }

    /// The account that instantiated the lottery.
    async fn manager(&self) -> Option<String> {
        self.state
            .manager
            .get()
            .as_ref()
            .map(|manager| manager.to_string())
    }

    /// Total value currently held for the next winner.
    async fn pot(&self) -> String {
        format!("{}", self.state.pot.get())
    }

    /// Smallest payment accepted by the enter mutation.
    async fn minimum_entry(&self) -> String {
        format!("{}", lottery::minimum_entry())
    }
}

struct MutationRoot {
    runtime: Arc<ServiceRuntime<LotteryService>>,
}

#[Object]
impl MutationRoot {
    /// Enter the lottery by paying `amount` from `owner`'s account.
    async fn enter(&self, owner: AccountOwner, amount: String) -> String {
        self.runtime.schedule_operation(&LotteryOperation::Enter {
            owner,
            amount: amount.parse::<Amount>().unwrap_or_default(),
        });

        "Enter operation scheduled".to_string()
    }

    /// Draw a winner and pay out the pot. Only the manager's signature will
    /// be accepted by the contract.
    async fn pick_winner(&self) -> String {
        self.runtime.schedule_operation(&LotteryOperation::PickWinner);

        "PickWinner operation scheduled".to_string()
    }
}
