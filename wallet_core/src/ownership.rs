//! Which addresses an input or output belongs to.

use nautilus_crypto::AddressResolver;
use nautilus_sigma::extract_public_keys;
use nautilus_transactions::OutputCandidate;
use nautilus_types::{ErgoBox, P2PK_TREE_PREFIX};

/// Addresses able to spend `input`, first occurrence order.
///
/// A P2PK input maps to its own address; any other script maps to every
/// public key found in its constants and registers.
pub fn addresses_from_input(resolver: &AddressResolver, input: &ErgoBox) -> Vec<String> {
    extract_public_keys(&input.ergo_tree, &input.additional_registers)
        .iter()
        .map(|key| resolver.address_from_public_key(key))
        .collect()
}

/// Addresses involved in spending `inputs`, deduplicated across inputs.
pub fn extract_addresses_from_inputs<'a>(
    resolver: &AddressResolver,
    inputs: impl IntoIterator<Item = &'a ErgoBox>,
) -> Vec<String> {
    let mut addresses: Vec<String> = Vec::new();
    for input in inputs {
        for address in addresses_from_input(resolver, input) {
            if !addresses.contains(&address) {
                addresses.push(address);
            }
        }
    }
    addresses
}

/// The last P2PK output paying one of `own_addresses`, taken as the change.
pub fn change_address_from_outputs(
    resolver: &AddressResolver,
    outputs: &[OutputCandidate],
    own_addresses: &[String],
) -> Option<String> {
    outputs
        .iter()
        .filter(|o| o.ergo_tree.starts_with(P2PK_TREE_PREFIX))
        .filter_map(|o| resolver.address_from_script(&o.ergo_tree).ok())
        .filter(|address| own_addresses.contains(address))
        .last()
}
