use nautilus_nullables::{NullAddressBook, NullChain};
use nautilus_sigma::{encode_collection_of_bytes, encode_long_constant};
use nautilus_transactions::verify_conservation;
use nautilus_types::{AssetAmount, BoxId, ErgoBox, Network, Registers, Token, TokenId};
use nautilus_wallet_core::{
    AddressState, FeeSettings, PaymentRequest, TransactionAssembler, WalletConfig, WalletError,
};

const PK_WALLET: &str = "0278011ec0cf5feb92d61adb51dcb75876627ace6fd9446ab4cabc5313ab7b39a7";
const PK_RECIPIENT: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const PK_FRESH: &str = "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";

const WALLET: &str = "9fRusAarL1KkrWQVsxSRVYnvWxaAT2A96cKtNn9tvPh5XUyCisr";
const RECIPIENT: &str = "9fSgJ7BmUxBQJ454prQDQ7fQMBkXPLaAmDnimgTtjym6FYPHjAV";
const FRESH: &str = "9g2GcDzTD4byrbsV4YA24ZjPrwYeg6UbY46KbQSQFAa4YCo887G";
const TESTNET_RECIPIENT: &str = "3WwXpssaZwcNzaGMv3AgxBdTPJQBt5gCmqBsg3DykQ39bYdhJBsN";

const FEE_BOX_TREE: &str = "100204a00b08cd";

fn token(byte: u8) -> TokenId {
    TokenId::new(hex_id(byte)).unwrap()
}

fn hex_id(byte: u8) -> String {
    format!("{byte:02x}").repeat(32)
}

fn tree(pk: &str) -> String {
    format!("0008cd{pk}")
}

fn wallet_box(id: u8, value: u64, assets: Vec<Token>) -> ErgoBox {
    ErgoBox {
        box_id: BoxId::new(hex_id(id)).unwrap(),
        transaction_id: hex_id(0xee),
        index: 0,
        ergo_tree: tree(PK_WALLET),
        creation_height: 900,
        value,
        assets,
        additional_registers: Registers::new(),
    }
}

fn fee_box(id: u8, fee_token: u8, value: u64, rate: i64) -> ErgoBox {
    let mut registers = Registers::new();
    registers.insert("R4".into(), encode_collection_of_bytes(&[fee_token; 32]));
    registers.insert("R5".into(), encode_long_constant(rate));
    ErgoBox {
        box_id: BoxId::new(hex_id(id)).unwrap(),
        transaction_id: hex_id(0xdd),
        index: 0,
        ergo_tree: FEE_BOX_TREE.to_string(),
        creation_height: 800,
        value,
        assets: Vec::new(),
        additional_registers: registers,
    }
}

fn book() -> NullAddressBook {
    NullAddressBook::new().with_address(WALLET, AddressState::Used)
}

fn erg(amount: u64) -> AssetAmount {
    AssetAmount::new(TokenId::native(), amount, 9)
}

fn request(assets: Vec<AssetAmount>, fee: FeeSettings) -> PaymentRequest {
    PaymentRequest {
        recipient: RECIPIENT.to_string(),
        assets,
        fee,
    }
}

// ── Native fee ─────────────────────────────────────────────────────────

#[tokio::test]
async fn native_fee_payment_with_tokens() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![
            wallet_box(1, 5_000_000_000, vec![Token::new(token(0xaa), 100)]),
            wallet_box(2, 5_000_000_000, Vec::new()),
        ]);
    let assembler = TransactionAssembler::new(chain, book(), &WalletConfig::default());

    let tx = assembler
        .create_p2p_transaction(&request(
            vec![
                erg(2_000_000_000),
                AssetAmount::new(token(0xaa), 40, 0),
                AssetAmount::new(token(0xbb), 0, 0),
            ],
            FeeSettings::native(1_100_000),
        ))
        .await
        .unwrap();

    assert_eq!(tx.height, 1_000);
    assert_eq!(tx.fee, 1_100_000);
    assert_eq!(tx.inputs.len(), 2);
    assert_eq!(tx.outputs.len(), 2);

    let payment = &tx.outputs[0];
    assert_eq!(payment.ergo_tree, tree(PK_RECIPIENT));
    assert_eq!(payment.value, 2_000_000_000);
    assert_eq!(payment.assets, vec![Token::new(token(0xaa), 40)]);

    let change = tx.change_output().unwrap();
    assert_eq!(change.ergo_tree, tree(PK_WALLET));
    assert_eq!(change.value, 10_000_000_000 - 2_000_000_000 - 1_100_000);
    assert_eq!(change.token_amount(&token(0xaa)), 60);
    assert!(verify_conservation(&tx).is_ok());

    assert_eq!(assembler.chain().input_calls(), 1);
    assert_eq!(assembler.chain().height_calls(), 1);
    assert!(assembler.chain().fee_box_requests().is_empty());
}

#[tokio::test]
async fn below_minimum_aborts_before_fetching() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![wallet_box(1, 5_000_000_000, Vec::new())]);
    let assembler = TransactionAssembler::new(chain, book(), &WalletConfig::default());

    let err = assembler
        .create_p2p_transaction(&request(vec![erg(999_999)], FeeSettings::native(1_100_000)))
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::BelowMinimumValue));
    assert_eq!(assembler.chain().input_calls(), 0);
    assert_eq!(assembler.chain().height_calls(), 0);
}

#[tokio::test]
async fn missing_inputs_abort() {
    let assembler = TransactionAssembler::new(
        NullChain::new().with_height(1_000),
        book(),
        &WalletConfig::default(),
    );
    let req = request(vec![erg(1_000_000)], FeeSettings::native(1_100_000));
    let err = assembler.create_p2p_transaction(&req).await.unwrap_err();
    assert!(matches!(err, WalletError::UnableToFetchInputs));

    assembler.chain().fail_inputs("connection refused");
    let err = assembler.create_p2p_transaction(&req).await.unwrap_err();
    assert!(matches!(err, WalletError::UnableToFetchInputs));
    assert_eq!(
        err.to_string(),
        "unable to fetch inputs, please check your connection"
    );
}

#[tokio::test]
async fn missing_height_aborts() {
    let assembler = TransactionAssembler::new(
        NullChain::new().with_inputs(vec![wallet_box(1, 5_000_000_000, Vec::new())]),
        book(),
        &WalletConfig::default(),
    );
    let req = request(vec![erg(1_000_000)], FeeSettings::native(1_100_000));
    let err = assembler.create_p2p_transaction(&req).await.unwrap_err();
    assert!(matches!(err, WalletError::UnableToFetchHeight));

    assembler.chain().fail_height("timeout");
    let err = assembler.create_p2p_transaction(&req).await.unwrap_err();
    assert!(matches!(err, WalletError::UnableToFetchHeight));
    // Both fetches run on every attempt.
    assert_eq!(assembler.chain().input_calls(), 2);
}

#[tokio::test]
async fn recipient_on_other_network_is_rejected() {
    let assembler = TransactionAssembler::new(
        NullChain::new()
            .with_height(1_000)
            .with_inputs(vec![wallet_box(1, 5_000_000_000, Vec::new())]),
        book(),
        &WalletConfig::default(),
    );
    let mut req = request(vec![erg(1_000_000)], FeeSettings::native(1_100_000));
    req.recipient = TESTNET_RECIPIENT.to_string();
    let err = assembler.create_p2p_transaction(&req).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidAddress(_)));
}

#[tokio::test]
async fn testnet_wallet_accepts_testnet_recipient() {
    let config = WalletConfig {
        network: Network::Testnet,
        ..WalletConfig::default()
    };
    let book = NullAddressBook::new().with_address(
        "3WwX4SvyenfXM8ihM6GjAH4auUB1X9MnkAaQqeKfkaT5apiLMGN6",
        AddressState::Used,
    );
    let assembler = TransactionAssembler::new(
        NullChain::new()
            .with_height(1_000)
            .with_inputs(vec![wallet_box(1, 5_000_000_000, Vec::new())]),
        book,
        &config,
    );
    let mut req = request(vec![erg(1_000_000)], FeeSettings::native(1_100_000));
    req.recipient = TESTNET_RECIPIENT.to_string();
    let tx = assembler.create_p2p_transaction(&req).await.unwrap();
    assert_eq!(tx.outputs[0].ergo_tree, tree(PK_RECIPIENT));
    assert_eq!(tx.change_output().unwrap().ergo_tree, tree(PK_WALLET));
}

#[tokio::test]
async fn change_goes_to_fresh_address_when_avoiding_reuse() {
    let config = WalletConfig {
        avoid_address_reuse: true,
        ..WalletConfig::default()
    };
    let book = book().with_derivable(FRESH);
    let assembler = TransactionAssembler::new(
        NullChain::new()
            .with_height(1_000)
            .with_inputs(vec![wallet_box(1, 5_000_000_000, Vec::new())]),
        book,
        &config,
    );
    let tx = assembler
        .create_p2p_transaction(&request(vec![erg(1_000_000)], FeeSettings::native(1_100_000)))
        .await
        .unwrap();
    assert_eq!(tx.change_output().unwrap().ergo_tree, tree(PK_FRESH));
    assert_eq!(assembler.book().derivations(), vec![1]);
}

// ── Token fee ──────────────────────────────────────────────────────────

fn small_config() -> WalletConfig {
    WalletConfig {
        min_box_value: 20,
        ..WalletConfig::default()
    }
}

#[tokio::test]
async fn token_fee_bumps_payment_and_spends_fee_box() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![wallet_box(1, 1_000, vec![Token::new(token(0xf0), 10)])])
        .with_fee_boxes(vec![fee_box(0x0f, 0xf0, 1_000, 5)]);
    let assembler = TransactionAssembler::new(chain, book(), &small_config());

    let tx = assembler
        .create_p2p_transaction(&request(
            vec![erg(5)],
            FeeSettings::token(token(0xf0), 10, None),
        ))
        .await
        .unwrap();

    // Payment raised from 5 to the minimum; the 15 shortfall comes out of the 50 released.
    assert_eq!(tx.outputs[0].value, 20);
    assert_eq!(tx.fee, 35);

    let successor = &tx.outputs[1];
    assert_eq!(successor.ergo_tree, FEE_BOX_TREE);
    assert_eq!(successor.value, 1_000 - 10 * 5);
    assert_eq!(successor.token_amount(&token(0xf0)), 10);
    assert_eq!(
        successor.additional_registers.get("R6").cloned(),
        Some(format!("0e20{}", hex_id(0x0f)))
    );

    let fee_input = tx.inputs.last().unwrap();
    assert_eq!(fee_input.box_id().as_str(), hex_id(0x0f));
    assert_eq!(fee_input.extension.get(&0).map(String::as_str), Some("0402"));

    let change = tx.change_output().unwrap();
    assert_eq!(change.ergo_tree, tree(PK_WALLET));
    assert_eq!(change.value, 995);
    assert!(change.assets.is_empty());

    assert!(verify_conservation(&tx).is_ok());
    assert_eq!(assembler.chain().fee_box_requests(), vec![token(0xf0)]);
}

#[tokio::test]
async fn token_fee_keeps_payment_above_minimum() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![wallet_box(1, 1_000, vec![Token::new(token(0xf0), 10)])])
        .with_fee_boxes(vec![fee_box(0x0f, 0xf0, 1_000, 5)]);
    let assembler = TransactionAssembler::new(chain, book(), &small_config());

    let tx = assembler
        .create_p2p_transaction(&request(
            vec![erg(100)],
            FeeSettings::token(token(0xf0), 10, None),
        ))
        .await
        .unwrap();
    assert_eq!(tx.outputs[0].value, 100);
    assert_eq!(tx.fee, 50);
}

#[tokio::test]
async fn best_rate_box_is_selected() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![wallet_box(1, 1_000, vec![Token::new(token(0xf0), 10)])])
        .with_fee_boxes(vec![
            fee_box(0x01, 0xf0, 1_000, 4),
            fee_box(0x02, 0xf0, 1_000, 6),
            fee_box(0x03, 0xf0, 1_000, 6),
        ]);
    let assembler = TransactionAssembler::new(chain, book(), &small_config());
    let tx = assembler
        .create_p2p_transaction(&request(
            vec![erg(20)],
            FeeSettings::token(token(0xf0), 10, None),
        ))
        .await
        .unwrap();
    assert_eq!(tx.inputs.last().unwrap().box_id().as_str(), hex_id(0x02));
}

#[tokio::test]
async fn no_qualifying_fee_box_is_insufficient_liquidity() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![wallet_box(1, 1_000, vec![Token::new(token(0xf0), 10)])])
        .with_fee_boxes(vec![
            // Too small to release 50 and keep 20.
            fee_box(0x01, 0xf0, 60, 5),
            // Accepts another token.
            fee_box(0x02, 0xf1, 1_000, 5),
            // Below the requested minimum rate.
            fee_box(0x03, 0xf0, 1_000, 2),
        ]);
    let assembler = TransactionAssembler::new(chain, book(), &small_config());
    let err = assembler
        .create_p2p_transaction(&request(
            vec![erg(20)],
            FeeSettings::token(token(0xf0), 10, Some(3)),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InsufficientLiquidity));
    assert_eq!(
        err.to_string(),
        "insufficient liquidity in the selected price range"
    );
}

#[tokio::test]
async fn release_smaller_than_shortfall_is_insufficient_liquidity() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![wallet_box(1, 1_000, vec![Token::new(token(0xf0), 1)])])
        .with_fee_boxes(vec![fee_box(0x0f, 0xf0, 1_000, 5)]);
    let assembler = TransactionAssembler::new(chain, book(), &small_config());
    let err = assembler
        .create_p2p_transaction(&request(vec![], FeeSettings::token(token(0xf0), 1, None)))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InsufficientLiquidity));
}

#[tokio::test]
async fn fee_box_fetch_failure_aborts() {
    let chain = NullChain::new()
        .with_height(1_000)
        .with_inputs(vec![wallet_box(1, 1_000, vec![Token::new(token(0xf0), 10)])]);
    chain.fail_fee_boxes("indexer down");
    let assembler = TransactionAssembler::new(chain, book(), &small_config());
    let err = assembler
        .create_p2p_transaction(&request(
            vec![erg(20)],
            FeeSettings::token(token(0xf0), 10, None),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::UnableToFetchFeeBoxes(_)));
}

#[tokio::test]
async fn zero_fee_units_are_rejected() {
    let assembler = TransactionAssembler::new(NullChain::new(), book(), &small_config());
    let err = assembler
        .create_p2p_transaction(&request(vec![], FeeSettings::token(token(0xf0), 0, None)))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidFee(_)));
}
