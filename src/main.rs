//! Generate a key pair, encrypt a message, decrypt it again and print every step
use anyhow::Result;
use clap::Parser;
use knapsack_cryptosystem::{decrypt, decrypt_blocks, encrypt, encrypt_blocks, KeyPair};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opts {
    /// The message to encrypt.
    message: String,

    /// The number of weights in the key, which is also the number of bits per block.
    #[arg(long, short, default_value_t = 8)]
    length: usize,

    /// Split the message into key-sized blocks instead of encrypting one block.
    #[arg(long)]
    blocks: bool,

    /// Seed key generation for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    let mut log = vec![];

    let keypair = match opts.seed {
        Some(seed) => KeyPair::keygen(opts.length, &mut ChaChaRng::seed_from_u64(seed))?,
        None => KeyPair::random(opts.length)?,
    }
    .log_into(&mut log);
    println!("Public key: {}", keypair.get_pk());
    println!("Private key: {}", keypair.get_sk());

    let decrypted = if opts.blocks {
        let ciphertext = encrypt_blocks(&opts.message, keypair.get_pk())?.log_into(&mut log);
        println!("Ciphertext: {:?}", ciphertext.get_blocks());
        decrypt_blocks(&ciphertext, keypair.get_sk())?.log_into(&mut log)
    } else {
        let ciphertext = encrypt(&opts.message, keypair.get_pk())?.log_into(&mut log);
        println!("Ciphertext: {ciphertext}");
        decrypt(ciphertext, keypair.get_sk())?.log_into(&mut log)
    };
    println!("Decrypted message: {decrypted:?}");

    println!("Execution log:");
    for line in log {
        println!("  {line}");
    }
    Ok(())
}
