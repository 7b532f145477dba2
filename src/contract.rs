// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(target_arch = "wasm32", no_main)]

mod state;

use linera_sdk::{
    linera_base_types::{Account, AccountOwner, Amount, WithContractAbi},
    views::{RootView, View},
    Contract, ContractRuntime,
};
use lottery::{LotteryAbi, LotteryError, LotteryOperation, LotteryResponse};

use self::state::LotteryState;

pub struct LotteryContract {
    state: LotteryState,
    runtime: ContractRuntime<Self>,
}

linera_sdk::contract!(LotteryContract);

impl WithContractAbi for LotteryContract {
    type Abi = LotteryAbi;
}

impl Contract for LotteryContract {
    type Message = ();
    type Parameters = ();
    type InstantiationArgument = ();
    type EventValue = ();

    async fn load(runtime: ContractRuntime<Self>) -> Self {
        let state = LotteryState::load(runtime.root_view_storage_context())
            .await
            .expect("Failed to load state");
        LotteryContract { state, runtime }
    }

    async fn instantiate(&mut self, _arg: Self::InstantiationArgument) {
        // Validate params access
        let _ = self.runtime.application_parameters();
        let creator = self
            .runtime
            .authenticated_signer()
            .expect("Lottery must be instantiated by a signed block");
        self.state.manager.set(Some(creator));
    }

    async fn execute_operation(&mut self, operation: Self::Operation) -> Self::Response {
        match operation {
            LotteryOperation::Enter { owner, amount } => {
                self.runtime
                    .check_account_permission(owner)
                    .expect("Permission for Enter operation");

                eprintln!("Lottery::Enter - owner: {owner:?}, amount: {amount}");

                if let Err(err) = self.state.enter(owner, amount) {
                    panic!("Failed to enter the lottery: {err}");
                }

                // The pot lives in the chain balance until a winner is drawn.
                let pot_account = Account {
                    chain_id: self.runtime.chain_id(),
                    owner: AccountOwner::CHAIN,
                };
                self.runtime.transfer(owner, pot_account, amount);

                LotteryResponse::Ok
            }

            LotteryOperation::PickWinner => {
                let caller = self
                    .runtime
                    .authenticated_signer()
                    .expect("PickWinner must come from a signed block");
                if Some(caller) != *self.state.manager.get() {
                    panic!("Failed to pick a winner: {}", LotteryError::Unauthorized);
                }

                let seed = self.draw_seed(&caller);
                match self.state.pick_winner(seed).await {
                    Ok((winner, prize)) => {
                        eprintln!("Lottery::PickWinner - winner: {winner:?}, prize: {prize}");
                        if prize > Amount::ZERO {
                            let winner_account = Account {
                                chain_id: self.runtime.chain_id(),
                                owner: winner.clone(),
                            };
                            self.runtime
                                .transfer(AccountOwner::CHAIN, winner_account, prize);
                        }
                        LotteryResponse::WinnerPicked { winner, prize }
                    }
                    Err(err) => panic!("Failed to pick a winner: {err}"),
                }
            }

            // Query operations
            LotteryOperation::GetPlayers => match self.state.players().await {
                Ok(players) => LotteryResponse::Players(players),
                Err(err) => panic!("Failed to read players: {err}"),
            },

            LotteryOperation::GetManager => {
                LotteryResponse::Manager(self.state.manager.get().clone())
            }

            LotteryOperation::GetPot => LotteryResponse::Pot(*self.state.pot.get()),
        }
    }

    async fn execute_message(&mut self, _message: Self::Message) {
        panic!("Lottery does not accept cross-chain messages");
    }

    async fn store(mut self) {
        self.state.save().await.expect("Failed to save state");
    }
}

impl LotteryContract {
    /// Pseudo-random seed mixed from the block timestamp, the block height
    /// and the caller identity. Weak by construction: block producers and the
    /// caller can bias it. Kept as-is, matching the original contract.
    fn draw_seed(&mut self, caller: &AccountOwner) -> u64 {
        let timestamp = self.runtime.system_time().micros();
        let mut seed = timestamp.wrapping_add(self.runtime.block_height().into());
        for byte in caller.to_string().into_bytes() {
            seed = seed.rotate_left(5) ^ u64::from(byte);
        }
        seed
    }
}
