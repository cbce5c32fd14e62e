//! Locating `ProveDlog` public keys in scripts and registers.

use nautilus_types::{PublicKey, Registers, P2PK_TREE_PREFIX, PUBLIC_KEY_HEX_LEN};

use crate::ergo_tree::tree_constants;

/// Wrappings a key can appear under, outermost first:
/// `Coll[Byte]` of a P2PK tree, `Coll[Byte]` of the key, `SigmaProp`,
/// `GroupElement`, bare.
const KEY_WRAPPINGS: [&str; 5] = ["0e240008cd", "0e21", "08cd", "07", ""];

/// Match `constant` against the known public-key shapes.
pub fn public_key_from_constant(constant: &str) -> Option<PublicKey> {
    let constant = constant.to_lowercase();
    KEY_WRAPPINGS.iter().find_map(|prefix| {
        let payload = constant.strip_prefix(prefix)?;
        if payload.len() != PUBLIC_KEY_HEX_LEN {
            return None;
        }
        PublicKey::from_hex(payload).ok()
    })
}

/// The key of a pay-to-public-key tree, if `ergo_tree` is one.
pub fn p2pk_public_key(ergo_tree: &str) -> Option<PublicKey> {
    let payload = ergo_tree.to_lowercase();
    let payload = payload.strip_prefix(P2PK_TREE_PREFIX)?;
    if payload.len() != PUBLIC_KEY_HEX_LEN {
        return None;
    }
    PublicKey::from_hex(payload).ok()
}

fn push_unique(keys: &mut Vec<PublicKey>, key: PublicKey) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

/// Keys held in the segregated constants of `ergo_tree`, first occurrence order.
pub fn public_keys_from_ergo_tree(ergo_tree: &str) -> Vec<PublicKey> {
    let mut keys = Vec::new();
    for constant in tree_constants(ergo_tree) {
        if let Some(key) = public_key_from_constant(&constant) {
            push_unique(&mut keys, key);
        }
    }
    keys
}

/// Keys held directly in register values, in register-name order.
pub fn public_keys_from_registers(registers: &Registers) -> Vec<PublicKey> {
    let mut keys = Vec::new();
    for value in registers.values() {
        if let Some(key) = public_key_from_constant(value) {
            push_unique(&mut keys, key);
        }
    }
    keys
}

/// Every public key a box's script or registers refer to.
///
/// A P2PK tree yields exactly its own key. For any other tree the script
/// constants are scanned first, then the registers; duplicates keep their
/// first position.
pub fn extract_public_keys(ergo_tree: &str, registers: &Registers) -> Vec<PublicKey> {
    if let Some(key) = p2pk_public_key(ergo_tree) {
        return vec![key];
    }

    let mut keys = public_keys_from_ergo_tree(ergo_tree);
    for key in public_keys_from_registers(registers) {
        push_unique(&mut keys, key);
    }
    tracing::debug!(count = keys.len(), "extracted public keys");
    keys
}
