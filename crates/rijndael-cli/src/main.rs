//! Command-line interface for `rijndael-core`.

#![forbid(unsafe_code)]

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{Aes128Key, Aes192Key, Aes256Key, Block, CipherContext, CipherKey};
use tracing::{info, Level};

/// AES single-block CLI.
#[derive(Parser)]
#[command(
    name = "rijndael",
    version,
    author,
    about = "AES with algebraically derived constants"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Variant {
    Aes128,
    Aes192,
    #[default]
    Aes256,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt the FIPS-197 test block and decrypt it again.
    Demo,
    /// Encrypt one 16-byte block.
    Enc {
        /// Key size variant.
        #[arg(long, value_enum, default_value_t = Variant::Aes256)]
        variant: Variant,
        /// Key as hex (32, 48 or 64 characters depending on the variant).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Decrypt one 16-byte block.
    Dec {
        /// Key size variant.
        #[arg(long, value_enum, default_value_t = Variant::Aes256)]
        variant: Variant,
        /// Key as hex (32, 48 or 64 characters depending on the variant).
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Round-trip random blocks under a random key.
    Check {
        /// Key size variant.
        #[arg(long, value_enum, default_value_t = Variant::Aes256)]
        variant: Variant,
        /// Number of random samples to test.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Demo => cmd_demo(),
        Commands::Enc {
            variant,
            key_hex,
            block_hex,
        } => cmd_transform(variant, &key_hex, &block_hex, Direction::Encrypt),
        Commands::Dec {
            variant,
            key_hex,
            block_hex,
        } => cmd_transform(variant, &key_hex, &block_hex, Direction::Decrypt),
        Commands::Check {
            variant,
            samples,
            seed,
        } => match variant {
            Variant::Aes128 => cmd_check::<Aes128Key>(samples, seed),
            Variant::Aes192 => cmd_check::<Aes192Key>(samples, seed),
            Variant::Aes256 => cmd_check::<Aes256Key>(samples, seed),
        },
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_demo() -> Result<()> {
    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let plaintext: Block = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    let ctx = rijndael_core::init(&key).context("initialize AES-256 context")?;
    let mut block = plaintext;

    println!("Plaintext message:\n{}", grouped_hex(&block));
    ctx.encrypt_block(&mut block);
    println!("Ciphertext:\n{}", grouped_hex(&block));
    ctx.decrypt_block(&mut block);
    println!("Original message:\n{}", grouped_hex(&block));

    if block != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn cmd_transform(variant: Variant, key_hex: &str, block_hex: &str, dir: Direction) -> Result<()> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    let mut block = parse_block_hex(block_hex)?;
    match variant {
        Variant::Aes128 => apply::<Aes128Key>(&key, &mut block, dir)?,
        Variant::Aes192 => apply::<Aes192Key>(&key, &mut block, dir)?,
        Variant::Aes256 => apply::<Aes256Key>(&key, &mut block, dir)?,
    }
    println!("{}", hex::encode(block));
    Ok(())
}

fn apply<K: CipherKey>(key: &[u8], block: &mut Block, dir: Direction) -> Result<()> {
    let ctx = CipherContext::<K>::init(key).with_context(|| format!("{} key", K::NAME))?;
    match dir {
        Direction::Encrypt => ctx.encrypt_block(block),
        Direction::Decrypt => ctx.decrypt_block(block),
    }
    Ok(())
}

fn cmd_check<K: CipherKey>(samples: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = vec![0u8; K::LEN];
    rng.fill_bytes(&mut key);
    let ctx = CipherContext::<K>::init(&key).with_context(|| format!("{} key", K::NAME))?;

    for sample in 0..samples {
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        let mut state = block;
        ctx.encrypt_block(&mut state);
        ctx.decrypt_block(&mut state);
        if state != block {
            bail!("round trip mismatch on sample {sample}");
        }
    }
    info!(variant = K::NAME, samples, "round trips verified");
    println!("{} round trips ok ({})", samples, K::NAME);
    Ok(())
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    let Ok(block) = Block::try_from(bytes.as_slice()) else {
        bail!("block must be 16 bytes (32 hex characters), got {}", bytes.len());
    };
    Ok(block)
}

fn grouped_hex(block: &Block) -> String {
    block
        .chunks(4)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_block_rejects_wrong_length() {
        assert!(parse_block_hex("00112233").is_err());
        assert!(parse_block_hex("zz").is_err());
        let block = parse_block_hex(" 00112233445566778899aabbccddeeff\n").expect("valid block");
        assert_eq!(block[15], 0xff);
    }

    #[test]
    fn grouped_hex_splits_words() {
        let block: Block = core::array::from_fn(|i| i as u8);
        assert_eq!(
            grouped_hex(&block),
            "00010203 04050607 08090a0b 0c0d0e0f"
        );
    }

    #[test]
    fn apply_round_trips_and_checks_key_length() {
        let key = [0x42u8; 24];
        let mut block = [0x17u8; 16];
        apply::<Aes192Key>(&key, &mut block, Direction::Encrypt).expect("24-byte key");
        apply::<Aes192Key>(&key, &mut block, Direction::Decrypt).expect("24-byte key");
        assert_eq!(block, [0x17u8; 16]);
        assert!(apply::<Aes256Key>(&key, &mut block, Direction::Encrypt).is_err());
    }

    #[test]
    fn seeded_check_passes() {
        cmd_check::<Aes128Key>(4, Some(9)).expect("round trips");
    }

    #[test]
    fn cli_parses_variant() {
        let cli = Cli::try_parse_from([
            "rijndael",
            "enc",
            "--variant",
            "aes128",
            "--key-hex",
            "000102030405060708090a0b0c0d0e0f",
            "--block-hex",
            "00112233445566778899aabbccddeeff",
        ])
        .expect("valid args");
        assert!(matches!(
            cli.command,
            Commands::Enc {
                variant: Variant::Aes128,
                ..
            }
        ));
    }
}
