//! Nullable chain source: programmed boxes and height.

use std::cell::{Cell, RefCell};

use nautilus_types::{ErgoBox, TokenId};
use nautilus_wallet_core::{ChainError, ChainSource};

/// A chain source that answers from memory.
///
/// Each response can be replaced with a failure to exercise abort paths.
pub struct NullChain {
    inputs: RefCell<Result<Vec<ErgoBox>, ChainError>>,
    height: Cell<Option<u32>>,
    height_error: RefCell<Option<ChainError>>,
    fee_boxes: RefCell<Result<Vec<ErgoBox>, ChainError>>,
    input_calls: Cell<usize>,
    height_calls: Cell<usize>,
    fee_box_requests: RefCell<Vec<TokenId>>,
}

impl NullChain {
    pub fn new() -> Self {
        Self {
            inputs: RefCell::new(Ok(Vec::new())),
            height: Cell::new(None),
            height_error: RefCell::new(None),
            fee_boxes: RefCell::new(Ok(Vec::new())),
            input_calls: Cell::new(0),
            height_calls: Cell::new(0),
            fee_box_requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_inputs(self, inputs: Vec<ErgoBox>) -> Self {
        *self.inputs.borrow_mut() = Ok(inputs);
        self
    }

    pub fn with_height(self, height: u32) -> Self {
        self.height.set(Some(height));
        self
    }

    pub fn with_fee_boxes(self, boxes: Vec<ErgoBox>) -> Self {
        *self.fee_boxes.borrow_mut() = Ok(boxes);
        self
    }

    /// Make the next input fetches fail.
    pub fn fail_inputs(&self, reason: &str) {
        *self.inputs.borrow_mut() = Err(ChainError::Request(reason.to_string()));
    }

    /// Make the next height fetches fail.
    pub fn fail_height(&self, reason: &str) {
        *self.height_error.borrow_mut() = Some(ChainError::Request(reason.to_string()));
    }

    /// Make the next fee-box fetches fail.
    pub fn fail_fee_boxes(&self, reason: &str) {
        *self.fee_boxes.borrow_mut() = Err(ChainError::Request(reason.to_string()));
    }

    pub fn input_calls(&self) -> usize {
        self.input_calls.get()
    }

    pub fn height_calls(&self) -> usize {
        self.height_calls.get()
    }

    /// Token ids fee boxes were requested for, in call order.
    pub fn fee_box_requests(&self) -> Vec<TokenId> {
        self.fee_box_requests.borrow().clone()
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainSource for NullChain {
    async fn spendable_inputs(&self) -> Result<Vec<ErgoBox>, ChainError> {
        self.input_calls.set(self.input_calls.get() + 1);
        self.inputs.borrow().clone()
    }

    async fn current_height(&self) -> Result<Option<u32>, ChainError> {
        self.height_calls.set(self.height_calls.get() + 1);
        match self.height_error.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(self.height.get()),
        }
    }

    async fn fee_boxes(&self, token_id: &TokenId) -> Result<Vec<ErgoBox>, ChainError> {
        self.fee_box_requests.borrow_mut().push(token_id.clone());
        self.fee_boxes.borrow().clone()
    }
}
