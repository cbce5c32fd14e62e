//! Nautilus command line: inspect sigma constants and convert addresses.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nautilus_crypto::AddressResolver;
use nautilus_sigma::{
    decode_collection_of_bytes, decode_tuple_of_collections, decode_typed_tuple,
    extract_public_keys, FieldKind, TextEncoding,
};
use nautilus_types::{Network, PublicKey, Registers, PUBLIC_KEY_HEX_LEN};
use nautilus_utils::init_tracing;
use nautilus_wallet_core::WalletConfig;

#[derive(Parser)]
#[command(name = "nautilus", about = "Sigma constant and address toolkit")]
struct Cli {
    /// Network: "mainnet" or "testnet".
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, env = "NAUTILUS_NETWORK")]
    network: Option<Network>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "NAUTILUS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML wallet configuration file.
    #[arg(long, env = "NAUTILUS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a Coll[Byte] constant.
    DecodeColl {
        constant: String,
        /// Print the raw bytes as hex instead of UTF-8.
        #[arg(long)]
        hex: bool,
    },
    /// Decode a tuple constant.
    DecodeTuple {
        constant: String,
        /// Field kinds, e.g. "int,utf8,hex". Without it every field is a Coll[Byte].
        #[arg(long, value_delimiter = ',')]
        kinds: Vec<FieldKind>,
        #[arg(long)]
        hex: bool,
    },
    /// Address of a public key or an ErgoTree.
    Address { key_or_tree: String },
    /// ErgoTree an address pays to.
    Script { address: String },
    /// Check an address against the configured network.
    Validate { address: String },
    /// Public keys (and their addresses) referenced by a script and registers.
    Keys {
        ergo_tree: String,
        /// Register values as NAME=HEX, e.g. R4=0e21...
        #[arg(long = "register", value_parser = parse_register)]
        registers: Vec<(String, String)>,
    },
}

fn parse_register(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=HEX, got {s}"))?;
    Ok((name.to_uppercase(), value.to_string()))
}

fn encoding(hex: bool) -> TextEncoding {
    if hex {
        TextEncoding::Hex
    } else {
        TextEncoding::Utf8
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<WalletConfig> {
    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WalletConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(config.log_format, &config.log_level);
    tracing::debug!(network = %config.network, "starting");

    let resolver = AddressResolver::new(config.network);

    match cli.command {
        Command::DecodeColl { constant, hex } => {
            match decode_collection_of_bytes(&constant, encoding(hex)) {
                Some(value) => println!("{value}"),
                None => bail!("not a non-empty Coll[Byte] constant"),
            }
        }
        Command::DecodeTuple {
            constant,
            kinds,
            hex,
        } => {
            if kinds.is_empty() {
                for field in decode_tuple_of_collections(&constant, encoding(hex)) {
                    println!("{}", field.unwrap_or_default());
                }
            } else {
                for field in decode_typed_tuple(&constant, &kinds) {
                    println!("{field}");
                }
            }
        }
        Command::Address { key_or_tree } => {
            let address = if key_or_tree.len() == PUBLIC_KEY_HEX_LEN {
                let key = PublicKey::from_hex(&key_or_tree)?;
                resolver.address_from_public_key(&key)
            } else {
                resolver.address_from_script(&key_or_tree)?
            };
            println!("{address}");
        }
        Command::Script { address } => {
            println!("{}", resolver.script_from_address(&address)?);
        }
        Command::Validate { address } => match resolver.decode(&address) {
            Ok(decoded) => println!("valid {:?} address on {}", decoded.kind(), decoded.network()),
            Err(err) => bail!("invalid address: {err}"),
        },
        Command::Keys {
            ergo_tree,
            registers,
        } => {
            let registers: Registers = registers.into_iter().collect();
            let keys = extract_public_keys(&ergo_tree, &registers);
            if keys.is_empty() {
                tracing::info!("no public keys found");
            }
            for key in keys {
                println!("{} {}", key.to_hex(), resolver.address_from_public_key(&key));
            }
        }
    }

    Ok(())
}
