//! Value-conservation checks over an assembled transaction.

use crate::error::TransactionError;
use crate::unsigned::UnsignedTransaction;

/// Check the balance invariants of `tx`.
///
/// Native value must balance exactly (`inputs == outputs + fee`) and no
/// token may leave in greater quantity than it entered. Stateless: nothing
/// about the inputs being unspent is checked here.
pub fn verify_conservation(tx: &UnsignedTransaction) -> Result<(), TransactionError> {
    let input_value = tx.input_value().ok_or(TransactionError::Overflow)?;
    let spent = tx
        .output_value()
        .and_then(|v| v.checked_add(tx.fee))
        .ok_or(TransactionError::Overflow)?;

    if input_value != spent {
        return Err(TransactionError::ConservationViolated(format!(
            "inputs hold {input_value} nanoErg, outputs and fee take {spent}"
        )));
    }

    let inputs = tx.input_tokens().ok_or(TransactionError::Overflow)?;
    let outputs = tx.output_tokens().ok_or(TransactionError::Overflow)?;
    for (token_id, out_amount) in &outputs {
        let in_amount = inputs.get(token_id).copied().unwrap_or(0);
        if *out_amount > in_amount {
            return Err(TransactionError::ConservationViolated(format!(
                "{token_id}: outputs take {out_amount}, inputs hold {in_amount}"
            )));
        }
    }

    if let Some(output) = tx
        .outputs
        .iter()
        .find(|o| o.assets.iter().any(|t| t.amount == 0))
    {
        return Err(TransactionError::ConservationViolated(format!(
            "output to {} carries a zero token amount",
            output.ergo_tree
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unsigned::{OutputCandidate, UnsignedInput};
    use nautilus_types::{BoxId, ErgoBox, Registers, Token, TokenId};

    fn token() -> TokenId {
        TokenId::new("cc".repeat(32)).unwrap()
    }

    fn input(value: u64, tokens: u64) -> UnsignedInput {
        let assets = if tokens > 0 {
            vec![Token::new(token(), tokens)]
        } else {
            Vec::new()
        };
        UnsignedInput::new(ErgoBox {
            box_id: BoxId::new("01".repeat(32)).unwrap(),
            transaction_id: "02".repeat(32),
            index: 0,
            ergo_tree: "0008cd".to_string(),
            creation_height: 1,
            value,
            assets,
            additional_registers: Registers::new(),
        })
    }

    fn tx(inputs: Vec<UnsignedInput>, outputs: Vec<OutputCandidate>, fee: u64) -> UnsignedTransaction {
        UnsignedTransaction {
            inputs,
            outputs,
            fee,
            height: 100,
        }
    }

    #[test]
    fn balanced_transaction_passes() {
        let t = tx(
            vec![input(3_000_000, 10)],
            vec![
                OutputCandidate::new(1_000_000, "aa").add_token(token(), 4).unwrap(),
                OutputCandidate::new(1_900_000, "bb").add_token(token(), 6).unwrap(),
            ],
            100_000,
        );
        assert_eq!(verify_conservation(&t), Ok(()));
    }

    #[test]
    fn burned_tokens_are_allowed() {
        let t = tx(
            vec![input(2_000_000, 10)],
            vec![OutputCandidate::new(1_900_000, "aa").add_token(token(), 3).unwrap()],
            100_000,
        );
        assert!(verify_conservation(&t).is_ok());
    }

    #[test]
    fn unbalanced_native_value_fails() {
        let t = tx(
            vec![input(2_000_000, 0)],
            vec![OutputCandidate::new(1_000_000, "aa")],
            100_000,
        );
        assert!(matches!(
            verify_conservation(&t),
            Err(TransactionError::ConservationViolated(_))
        ));
    }

    #[test]
    fn minted_tokens_fail() {
        let t = tx(
            vec![input(2_000_000, 1)],
            vec![OutputCandidate::new(1_900_000, "aa").add_token(token(), 2).unwrap()],
            100_000,
        );
        assert!(verify_conservation(&t).is_err());
    }

    #[test]
    fn zero_token_amount_fails() {
        let mut out = OutputCandidate::new(1_900_000, "aa");
        out.assets.push(Token::new(token(), 0));
        let t = tx(vec![input(2_000_000, 5)], vec![out], 100_000);
        assert!(verify_conservation(&t).is_err());
    }
}
