//! Indexer box responses and their mapping onto [`ErgoBox`].

use serde::Deserialize;
use std::collections::BTreeMap;
use std::future::Future;

use nautilus_types::ergo_box::amount_string;
use nautilus_types::{BoxId, ErgoBox, Registers, Token, TokenId};

use crate::chain::{paginate, Page, PageParams};
use crate::config::WalletConfig;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerRegister {
    pub serialized_value: String,
    #[serde(default)]
    pub sigma_type: String,
    #[serde(default)]
    pub rendered_value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerToken {
    pub token_id: TokenId,
    #[serde(default)]
    pub index: u32,
    #[serde(with = "amount_string")]
    pub amount: u64,
    pub name: Option<String>,
    pub decimals: Option<u8>,
    #[serde(rename = "type")]
    pub token_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerBox {
    pub box_id: BoxId,
    pub transaction_id: String,
    #[serde(default)]
    pub block_id: String,
    #[serde(with = "amount_string")]
    pub value: u64,
    pub index: u16,
    #[serde(default)]
    pub global_index: u64,
    pub creation_height: u32,
    #[serde(default)]
    pub settlement_height: u32,
    pub ergo_tree: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub assets: Vec<ExplorerToken>,
    #[serde(default)]
    pub additional_registers: BTreeMap<String, ExplorerRegister>,
    pub spent_transaction_id: Option<String>,
    #[serde(default = "default_main_chain")]
    pub main_chain: bool,
}

fn default_main_chain() -> bool {
    true
}

impl ExplorerBox {
    pub fn is_unspent(&self) -> bool {
        self.spent_transaction_id.is_none()
    }
}

impl From<ExplorerBox> for ErgoBox {
    fn from(b: ExplorerBox) -> Self {
        let additional_registers: Registers = b
            .additional_registers
            .into_iter()
            .map(|(name, register)| (name, register.serialized_value))
            .collect();

        ErgoBox {
            box_id: b.box_id,
            transaction_id: b.transaction_id,
            index: b.index,
            ergo_tree: b.ergo_tree,
            creation_height: b.creation_height,
            value: b.value,
            assets: b
                .assets
                .into_iter()
                .map(|t| Token::new(t.token_id, t.amount))
                .collect(),
            additional_registers,
        }
    }
}

/// Map unspent main-chain explorer boxes to [`ErgoBox`]es.
pub fn spendable_boxes(boxes: impl IntoIterator<Item = ExplorerBox>) -> Vec<ErgoBox> {
    boxes
        .into_iter()
        .filter(|b| b.main_chain && b.is_unspent())
        .map(ErgoBox::from)
        .collect()
}

/// Page through an indexer box listing and keep the spendable boxes.
///
/// Pages are `config.explorer_page_size` boxes wide.
pub async fn fetch_spendable_boxes<E, F, Fut>(
    config: &WalletConfig,
    fetch: F,
) -> Result<Vec<ErgoBox>, E>
where
    F: FnMut(PageParams) -> Fut,
    Fut: Future<Output = Result<Page<ExplorerBox>, E>>,
{
    let boxes = paginate(config.explorer_page_size, fetch).await?;
    let spendable = spendable_boxes(boxes);
    tracing::debug!(count = spendable.len(), "fetched spendable boxes");
    Ok(spendable)
}
