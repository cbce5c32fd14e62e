//! EIP-4 token metadata decoded from the minting box registers.
//!
//! `R7` holds the asset type (and subtype) as a byte collection; NFTs carry
//! the artwork hash in `R8` and the artwork URL in `R9`, either alone or
//! paired with a cover image URL.

use serde::{Deserialize, Serialize};

use nautilus_sigma::{
    decode_collection_of_bytes, decode_tuple_of_collections, is_collection_of_bytes, is_tuple,
    TextEncoding,
};
use nautilus_types::ergo_box::amount_string;
use nautilus_types::{BoxId, Registers, TokenId};

const NFT_TYPE: &str = "01";
const MEMBERSHIP_TYPE: &str = "03";
const EIP4_STANDARD: &str = "EIP-004";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Nft,
    MembershipToken,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStandard {
    Eip4,
    Unstandardized,
}

/// The minting box as returned alongside token info.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintingBox {
    pub transaction_id: String,
    #[serde(default)]
    pub additional_registers: Registers,
}

/// Token info as reported by an indexer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token_id: TokenId,
    pub box_id: BoxId,
    #[serde(with = "amount_string")]
    pub emission_amount: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub decimals: Option<u8>,
    #[serde(rename = "type")]
    pub standard: Option<String>,
    #[serde(rename = "box")]
    pub minting_box: Option<MintingBox>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    pub id: TokenId,
    pub minting_box_id: BoxId,
    pub minting_transaction_id: String,
    pub emission_amount: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub decimals: u8,
    pub asset_type: AssetType,
    /// Raw `R7` hex, e.g. `0101` for a picture artwork.
    pub subtype: Option<String>,
    pub standard: AssetStandard,
    pub artwork_hash: Option<String>,
    pub artwork_url: Option<String>,
    pub artwork_cover: Option<String>,
}

fn asset_type(r7: Option<&str>) -> AssetType {
    match r7 {
        Some(t) if t.starts_with(NFT_TYPE) => AssetType::Nft,
        Some(t) if t.starts_with(MEMBERSHIP_TYPE) => AssetType::MembershipToken,
        _ => AssetType::Unknown,
    }
}

/// Decode EIP-4 metadata; `None` when the minting box is unknown.
pub fn parse_eip4_asset(info: &TokenInfo) -> Option<AssetMetadata> {
    let minting_box = info.minting_box.as_ref()?;
    let registers = &minting_box.additional_registers;
    let register = |name: &str| registers.get(name).map(String::as_str);

    let type_hex = register("R7")
        .and_then(|r| decode_collection_of_bytes(r, TextEncoding::Hex))
        .filter(|t| !t.is_empty());

    let mut metadata = AssetMetadata {
        id: info.token_id.clone(),
        minting_box_id: info.box_id.clone(),
        minting_transaction_id: minting_box.transaction_id.clone(),
        emission_amount: info.emission_amount,
        name: info.name.clone(),
        description: info.description.clone(),
        decimals: info.decimals.unwrap_or(0),
        asset_type: asset_type(type_hex.as_deref()),
        subtype: type_hex,
        standard: match info.standard.as_deref() {
            Some(EIP4_STANDARD) => AssetStandard::Eip4,
            _ => AssetStandard::Unstandardized,
        },
        artwork_hash: None,
        artwork_url: None,
        artwork_cover: None,
    };

    if metadata.asset_type == AssetType::Nft {
        metadata.artwork_hash =
            register("R8").and_then(|r| decode_collection_of_bytes(r, TextEncoding::Hex));

        match register("R9") {
            Some(r9) if is_collection_of_bytes(r9) => {
                metadata.artwork_url = decode_collection_of_bytes(r9, TextEncoding::Utf8);
            }
            Some(r9) if is_tuple(r9) => {
                let mut parts = decode_tuple_of_collections(r9, TextEncoding::Utf8).into_iter();
                metadata.artwork_url = parts.next().flatten();
                metadata.artwork_cover = parts.next().flatten();
            }
            _ => {}
        }
    }

    Some(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nautilus_sigma::encode_collection_of_bytes;

    fn info(registers: &[(&str, String)]) -> TokenInfo {
        TokenInfo {
            token_id: TokenId::new("aa".repeat(32)).unwrap(),
            box_id: BoxId::new("bb".repeat(32)).unwrap(),
            emission_amount: 1,
            name: Some("Art".into()),
            description: None,
            decimals: None,
            standard: Some(EIP4_STANDARD.into()),
            minting_box: Some(MintingBox {
                transaction_id: "cc".repeat(32),
                additional_registers: registers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            }),
        }
    }

    #[test]
    fn nft_with_single_url() {
        let meta = parse_eip4_asset(&info(&[
            ("R7", encode_collection_of_bytes(&[0x01, 0x01])),
            ("R8", encode_collection_of_bytes(&[0xde, 0xad])),
            ("R9", encode_collection_of_bytes(b"ipfs://x")),
        ]))
        .unwrap();
        assert_eq!(meta.asset_type, AssetType::Nft);
        assert_eq!(meta.subtype.as_deref(), Some("0101"));
        assert_eq!(meta.artwork_hash.as_deref(), Some("dead"));
        assert_eq!(meta.artwork_url.as_deref(), Some("ipfs://x"));
        assert_eq!(meta.artwork_cover, None);
        assert_eq!(meta.standard, AssetStandard::Eip4);
        assert_eq!(meta.decimals, 0);
    }

    #[test]
    fn nft_with_url_and_cover_tuple() {
        // (Coll[Byte], Coll[Byte]) = ("ab", "cd")
        let meta = parse_eip4_asset(&info(&[
            ("R7", encode_collection_of_bytes(&[0x01, 0x02])),
            ("R9", "3c0e0e026162026364".to_string()),
        ]))
        .unwrap();
        assert_eq!(meta.artwork_url.as_deref(), Some("ab"));
        assert_eq!(meta.artwork_cover.as_deref(), Some("cd"));
    }

    #[test]
    fn fungible_token_has_no_artwork() {
        let meta = parse_eip4_asset(&info(&[(
            "R9",
            encode_collection_of_bytes(b"ignored"),
        )]))
        .unwrap();
        assert_eq!(meta.asset_type, AssetType::Unknown);
        assert_eq!(meta.subtype, None);
        assert_eq!(meta.artwork_url, None);
    }

    #[test]
    fn membership_token() {
        let meta = parse_eip4_asset(&info(&[("R7", encode_collection_of_bytes(&[0x03, 0x01]))]))
            .unwrap();
        assert_eq!(meta.asset_type, AssetType::MembershipToken);
    }

    #[test]
    fn missing_minting_box() {
        let mut token = info(&[]);
        token.minting_box = None;
        assert!(parse_eip4_asset(&token).is_none());
    }
}
