//! Network-qualified address encoding.
//!
//! Layout: `base58(prefix || content || checksum)` where
//! - `prefix = network_nibble | kind` (`0x00`/`0x10` plus `1` P2PK, `2` P2SH, `3` P2S)
//! - `content` is the 33-byte key, the 24-byte script hash or the raw script
//! - `checksum = Blake2b-256(prefix || content)[0..4]`

use nautilus_types::{Network, PublicKey, P2PK_TREE_PREFIX};
use std::fmt;
use std::str::FromStr;

use crate::error::AddressError;
use crate::hash::{checksum, CHECKSUM_LEN};

const P2SH_TREE_PREFIX: &str = "00ea02d193b4cbe4e3010e040004300e18";
const P2SH_TREE_SUFFIX: &str = "d40801";
const P2SH_HASH_LEN: usize = 24;

/// What an address commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Pay-to-public-key.
    P2pk,
    /// Pay-to-script-hash.
    P2sh,
    /// Pay-to-script.
    P2s,
}

impl AddressKind {
    fn code(&self) -> u8 {
        match self {
            Self::P2pk => 1,
            Self::P2sh => 2,
            Self::P2s => 3,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::P2pk),
            2 => Some(Self::P2sh),
            3 => Some(Self::P2s),
            _ => None,
        }
    }
}

/// A decoded address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    kind: AddressKind,
    content: Vec<u8>,
}

impl Address {
    pub fn p2pk(network: Network, public_key: &PublicKey) -> Self {
        Self {
            network,
            kind: AddressKind::P2pk,
            content: public_key.as_bytes().to_vec(),
        }
    }

    pub fn p2s(network: Network, tree: Vec<u8>) -> Self {
        Self {
            network,
            kind: AddressKind::P2s,
            content: tree,
        }
    }

    /// Classify a hex-encoded ErgoTree: P2PK and P2SH templates are
    /// recognised, anything else becomes P2S.
    pub fn from_ergo_tree(network: Network, tree_hex: &str) -> Result<Self, AddressError> {
        let tree_hex = tree_hex.to_lowercase();
        let tree =
            hex::decode(&tree_hex).map_err(|e| AddressError::InvalidScript(e.to_string()))?;

        if let Some(pk_hex) = tree_hex.strip_prefix(P2PK_TREE_PREFIX) {
            if let Ok(pk) = PublicKey::from_hex(pk_hex) {
                return Ok(Self::p2pk(network, &pk));
            }
        }

        if let Some(hash_hex) = tree_hex
            .strip_prefix(P2SH_TREE_PREFIX)
            .and_then(|rest| rest.strip_suffix(P2SH_TREE_SUFFIX))
        {
            if hash_hex.len() == P2SH_HASH_LEN * 2 {
                let content = hex::decode(hash_hex)
                    .map_err(|e| AddressError::InvalidScript(e.to_string()))?;
                return Ok(Self {
                    network,
                    kind: AddressKind::P2sh,
                    content,
                });
            }
        }

        Ok(Self::p2s(network, tree))
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The embedded key of a P2PK address.
    pub fn public_key(&self) -> Option<PublicKey> {
        match self.kind {
            AddressKind::P2pk => PublicKey::from_slice(&self.content).ok(),
            _ => None,
        }
    }

    /// The hex-encoded ErgoTree this address pays to.
    pub fn ergo_tree(&self) -> String {
        let content = hex::encode(&self.content);
        match self.kind {
            AddressKind::P2pk => format!("{P2PK_TREE_PREFIX}{content}"),
            AddressKind::P2sh => format!("{P2SH_TREE_PREFIX}{content}{P2SH_TREE_SUFFIX}"),
            AddressKind::P2s => content,
        }
    }

    fn prefix(&self) -> u8 {
        self.network.prefix() | self.kind.code()
    }

    pub fn encode(&self) -> String {
        let prefix = [self.prefix()];
        let checksum = checksum(&[&prefix, &self.content]);

        let mut bytes = Vec::with_capacity(1 + self.content.len() + CHECKSUM_LEN);
        bytes.push(prefix[0]);
        bytes.extend_from_slice(&self.content);
        bytes.extend_from_slice(&checksum);
        bs58::encode(bytes).into_string()
    }

    /// Structural decode: base58, checksum, prefix and payload shape.
    ///
    /// The network is reported, not checked; see
    /// [`AddressResolver::is_valid_address`](crate::AddressResolver::is_valid_address).
    pub fn decode(s: &str) -> Result<Self, AddressError> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::InvalidBase58(e.to_string()))?;
        if bytes.len() <= 1 + CHECKSUM_LEN {
            return Err(AddressError::TooShort(bytes.len()));
        }

        let (body, tail) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
        if tail != checksum(&[body]) {
            return Err(AddressError::ChecksumMismatch);
        }

        let prefix = body[0];
        let network = Network::from_prefix(prefix).ok_or(AddressError::UnknownNetwork(prefix))?;
        let kind =
            AddressKind::from_code(prefix & 0x0f).ok_or(AddressError::UnknownKind(prefix))?;
        let content = body[1..].to_vec();

        match kind {
            AddressKind::P2pk => {
                PublicKey::from_slice(&content)
                    .map_err(|e| AddressError::InvalidPublicKey(e.to_string()))?;
            }
            AddressKind::P2sh if content.len() != P2SH_HASH_LEN => {
                return Err(AddressError::InvalidScriptHash(content.len()));
            }
            _ => {}
        }

        Ok(Self {
            network,
            kind,
            content,
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
