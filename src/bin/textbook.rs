//! Walk through the textbook example w = [2, 3, 6, 13], q = 27, r = 5 one step at a time
use knapsack_cryptosystem::{
    decoding::{decompose, unblind},
    encoding::{knapsack_sum, render_bits},
    KeyPair,
};

fn main() {
    let keypair = KeyPair::from_parts(vec![2, 3, 6, 13], 27, 5).unwrap();
    println!("Private key: {}", keypair.get_sk());
    println!("Public key: {}", keypair.get_pk());

    let block = [1u8, 0, 1, 1];
    let ciphertext = knapsack_sum(&block, keypair.get_pk()).unwrap();
    println!("Block {} encrypts to {}", render_bits(&block), ciphertext);

    let (c_prime, trace) = unblind(ciphertext, keypair.get_sk()).unwrap().into_parts();
    for line in trace {
        println!("{line}");
    }
    let bits = decompose(c_prime, keypair.get_sk().get_weights()).unwrap();
    println!("Greedy decomposition of {} gives {}", c_prime, render_bits(&bits));
    assert_eq!(bits, block);
}
