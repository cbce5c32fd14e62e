//! Assembling a payment into an unsigned transaction.
//!
//! A build runs through three stages:
//!
//! 1. **Gathering**: spendable inputs and the current height are fetched
//!    concurrently. Either failing aborts the build.
//! 2. **Balancing**: the payment output value is settled. In the native-fee
//!    path a value below the minimum aborts before any fetch; when the fee is
//!    paid in a token the value is raised to the minimum and the shortfall
//!    is taken out of the nanoErg the fee box releases.
//! 3. **Finalizing**: change is routed to a resolved change address and, for
//!    a token fee, the fee box is spent with its successor output.

use nautilus_crypto::AddressResolver;
use nautilus_transactions::{
    parse_fee_boxes, select_best_fee_box, FeeBox, OutputCandidate, TransactionBuilder,
    TransactionError, UnsignedTransaction,
};
use nautilus_types::{AssetAmount, ProtocolParams, Token, TokenId};

use crate::chain::ChainSource;
use crate::change_address::{resolve_change_address, AddressBook, ChangePolicy};
use crate::config::WalletConfig;
use crate::error::WalletError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStage {
    Gathering,
    Balancing,
    Finalizing,
}

/// How the miner fee is paid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeSettings {
    /// Native pseudo id, or the token offered to a fee box.
    pub asset_id: TokenId,
    /// Fee in base units of `asset_id`.
    pub amount: u64,
    /// Lowest acceptable fee-box rate in nanoErg per token unit.
    pub min_rate: Option<u64>,
}

impl FeeSettings {
    pub fn native(amount: u64) -> Self {
        Self {
            asset_id: TokenId::native(),
            amount,
            min_rate: None,
        }
    }

    pub fn token(asset_id: TokenId, units: u64, min_rate: Option<u64>) -> Self {
        Self {
            asset_id,
            amount: units,
            min_rate,
        }
    }

    pub fn is_native(&self) -> bool {
        self.asset_id.is_native()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    pub recipient: String,
    /// Native and token amounts to send; zero amounts are ignored.
    pub assets: Vec<AssetAmount>,
    pub fee: FeeSettings,
}

impl PaymentRequest {
    fn native_amount(&self) -> Result<u64, WalletError> {
        self.assets
            .iter()
            .filter(|a| a.asset_id.is_native())
            .try_fold(0u64, |acc, a| acc.checked_add(a.amount))
            .ok_or(WalletError::TransactionBuild(TransactionError::Overflow))
    }
}

/// Builds unsigned payment transactions against a chain source and address book.
pub struct TransactionAssembler<C, B> {
    chain: C,
    book: B,
    resolver: AddressResolver,
    params: ProtocolParams,
    policy: ChangePolicy,
}

impl<C: ChainSource, B: AddressBook> TransactionAssembler<C, B> {
    pub fn new(chain: C, book: B, config: &WalletConfig) -> Self {
        Self {
            chain,
            book,
            resolver: AddressResolver::new(config.network),
            params: config.protocol_params(),
            policy: config.change_policy(),
        }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn book(&self) -> &B {
        &self.book
    }

    /// Build a transaction paying `request.assets` to `request.recipient`.
    ///
    /// Either the whole transaction is produced or an error is returned.
    pub async fn create_p2p_transaction(
        &self,
        request: &PaymentRequest,
    ) -> Result<UnsignedTransaction, WalletError> {
        let recipient_tree = self.resolver.decode(&request.recipient)?.ergo_tree();
        let token_fee = !request.fee.is_native();
        let mut sending = request.native_amount()?;
        let min = self.params.min_box_value;

        if !token_fee && sending < min {
            return Err(WalletError::BelowMinimumValue);
        }
        if token_fee && request.fee.amount == 0 {
            return Err(WalletError::InvalidFee("fee token amount is zero".into()));
        }

        tracing::debug!(stage = ?BuildStage::Gathering, "fetching inputs and height");
        let (inputs, height) =
            tokio::join!(self.chain.spendable_inputs(), self.chain.current_height());
        let inputs = match inputs {
            Ok(inputs) if !inputs.is_empty() => inputs,
            Ok(_) => return Err(WalletError::UnableToFetchInputs),
            Err(err) => {
                tracing::warn!(%err, "input fetch failed");
                return Err(WalletError::UnableToFetchInputs);
            }
        };
        let height = match height {
            Ok(Some(height)) if height > 0 => height,
            Ok(_) => return Err(WalletError::UnableToFetchHeight),
            Err(err) => {
                tracing::warn!(%err, "height fetch failed");
                return Err(WalletError::UnableToFetchHeight);
            }
        };

        tracing::debug!(stage = ?BuildStage::Balancing, height, inputs = inputs.len(), "balancing");
        let (fee, fee_box) = if token_fee {
            let fee_box = self.select_fee_box(&request.fee).await?;
            let released = fee_box
                .released_value(request.fee.amount)
                .ok_or(TransactionError::Overflow)?;
            let fee = if sending < min {
                let shortfall = min - sending;
                sending = min;
                released
                    .checked_sub(shortfall)
                    .filter(|fee| *fee > 0)
                    .ok_or(WalletError::InsufficientLiquidity)?
            } else {
                released
            };
            (fee, Some(fee_box))
        } else {
            (request.fee.amount, None)
        };

        let payment = OutputCandidate::new(sending, recipient_tree).add_tokens(
            request
                .assets
                .iter()
                .filter(|a| !a.asset_id.is_native() && !a.is_zero())
                .map(|a| Token::new(a.asset_id.clone(), a.amount)),
        )?;

        tracing::debug!(stage = ?BuildStage::Finalizing, fee, "resolving change address");
        let change_address =
            resolve_change_address(&self.book, &self.policy, &request.recipient).await?;
        let change_tree = self.resolver.script_from_address(&change_address)?;

        let mut builder = TransactionBuilder::new(height, self.params.clone())
            .from(inputs)
            .to(payment)
            .pay_fee(fee)
            .send_change_to(change_tree);
        if let Some(fee_box) = fee_box {
            builder = builder.swap_fee_with(fee_box, request.fee.amount);
        }

        let tx = builder.build()?;
        tracing::info!(
            height,
            inputs = tx.inputs.len(),
            outputs = tx.outputs.len(),
            fee = tx.fee,
            "assembled payment"
        );
        Ok(tx)
    }

    async fn select_fee_box(&self, fee: &FeeSettings) -> Result<FeeBox, WalletError> {
        let raw = self
            .chain
            .fee_boxes(&fee.asset_id)
            .await
            .map_err(WalletError::UnableToFetchFeeBoxes)?;
        let min_rate = fee.min_rate.unwrap_or(0);
        let candidates: Vec<FeeBox> = parse_fee_boxes(raw)
            .into_iter()
            .filter(|b| b.token_id == fee.asset_id && b.rate >= min_rate)
            .collect();

        select_best_fee_box(&candidates, fee.amount, self.params.min_box_value)
            .cloned()
            .ok_or(WalletError::InsufficientLiquidity)
    }
}
