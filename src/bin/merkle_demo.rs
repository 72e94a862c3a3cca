// Merkle proof demo and benchmark.
// - builds a tree over 2^n random transactions
// - prints it when small, extracts and verifies a proof for one of them
// - shows a tampered proof being rejected
// - times proof verification against rebuilding the whole tree
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{info, warn};
use merkle_tx::render::{PrettyTree, ProofDisplay};
use merkle_tx::{HashProvider, MerkleTree, ProofStep};
use rand::RngCore;

const TX_BYTES: usize = 16;
const VERIFY_WARMUP: usize = 5_000;
const REBUILD_WARMUP: usize = 50;
const REBUILD_ITERATIONS: usize = 200;
const PRETTY_MAX_EXPONENT: u32 = 5;

#[derive(Parser, Debug, Clone)]
#[command(name = "merkle-demo", about = "Merkle tree membership proof demo")]
struct Cli {
    /// Hash algorithm: MD5, SHA-1, SHA-224, SHA-256, SHA-384, SHA-512, SHA-512/224,
    /// SHA-512/256, SHA3-*, MurmurHash2 or MurmurHash2(seed=0x...)
    #[arg(default_value = "SHA-256", env = "MERKLE_ALGORITHM")]
    algorithm: String,

    /// The tree is built over 2^exponent transactions
    #[arg(default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=24))]
    exponent: u32,

    /// Index of the transaction to prove; out of range falls back to 0
    #[arg(default_value_t = 0)]
    index: usize,

    /// Timed verification iterations
    #[arg(default_value_t = 20_000)]
    iterations: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(&cli.log_level));

    let provider = match HashProvider::new(&cli.algorithm) {
        Ok(p) => p,
        Err(e) => {
            warn!("{}, falling back to SHA-256", e);
            HashProvider::default()
        }
    };
    let provider = Arc::new(provider);
    info!("hash algorithm: {}", provider.algorithm());

    let count = 1usize << cli.exponent;
    let txs = random_distinct_transactions(count, TX_BYTES);
    info!("generated {} random transactions (2^{})", count, cli.exponent);

    let tree = MerkleTree::build(txs.iter().cloned(), Arc::clone(&provider))
        .context("building merkle tree")?;
    if cli.exponent <= PRETTY_MAX_EXPONENT {
        println!("{}", PrettyTree::new(&tree));
    }

    let index = if cli.index < txs.len() { cli.index } else { 0 };
    let target = &txs[index];
    let proof = tree.proof_for(target);
    let root = tree.root_hash().to_owned();

    println!("Root: {}", root);
    println!("Target tx (index {}): {}", index, target);
    println!("Proof (length {}): {}", proof.len(), ProofDisplay(&proof));

    let ok = tree.verify(target, &proof, &root);
    println!("Verification: {}", verdict(ok));
    ensure!(ok, "proof for {} did not verify", target);

    let bad_proof = tamper_first_step(&proof);
    let ok_bad = tree.verify(target, &bad_proof, &root);
    println!("Verification (tampered proof): {}", verdict(ok_bad));

    let valid_ns = bench_verify(&tree, target, &proof, &root, cli.iterations);
    let invalid_ns = bench_verify(&tree, target, &bad_proof, &root, cli.iterations);
    let rebuild_ns = bench_rebuild(&txs, &provider, &root)?;

    println!();
    println!("=== Averages ===");
    println!("Verify valid proof    : {:.2} µs/op ({:.2} ns)", valid_ns / 1_000.0, valid_ns);
    println!("Verify tampered proof : {:.2} µs/op ({:.2} ns)", invalid_ns / 1_000.0, invalid_ns);
    println!("Rebuild whole tree    : {:.2} ms/op ({:.2} ns)", rebuild_ns / 1_000_000.0, rebuild_ns);
    println!("Speedup vs rebuild (valid)   : {:.1}x", rebuild_ns / valid_ns);
    println!("Speedup vs rebuild (tampered): {:.1}x", rebuild_ns / invalid_ns);

    Ok(())
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "Validated"
    } else {
        "False"
    }
}

/// Distinct lowercase hex strings of `bytes` random bytes each.
fn random_distinct_transactions(count: usize, bytes: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    let mut seen = HashSet::with_capacity(count * 2);
    let mut out = Vec::with_capacity(count);
    let mut buf = vec![0u8; bytes];
    while out.len() < count {
        rng.fill_bytes(&mut buf);
        let tx = hex::encode(&buf);
        if seen.insert(tx.clone()) {
            out.push(tx);
        }
    }
    out
}

/// Copy of `proof` with the last nibble of the first sibling hash rotated.
fn tamper_first_step(proof: &[ProofStep]) -> Vec<ProofStep> {
    let mut out = proof.to_vec();
    if let Some(first) = out.first_mut() {
        if let Some(c) = first.sibling_hash.pop() {
            first.sibling_hash.push(next_nibble(c));
        }
    }
    out
}

fn next_nibble(c: char) -> char {
    match c.to_ascii_lowercase() {
        'f' => '0',
        '9' => 'a',
        c => char::from(c as u8 + 1),
    }
}

/// Average ns per verification after a warm-up.
fn bench_verify(tree: &MerkleTree, tx: &str, proof: &[ProofStep], root: &str, iters: usize) -> f64 {
    for _ in 0..VERIFY_WARMUP {
        std::hint::black_box(tree.verify(tx, proof, root));
    }

    let iters = iters.max(1);
    let start = Instant::now();
    for _ in 0..iters {
        std::hint::black_box(tree.verify(tx, proof, root));
    }
    start.elapsed().as_nanos() as f64 / iters as f64
}

/// Average ns to validate the root by rebuilding the tree from scratch.
fn bench_rebuild(txs: &[String], provider: &Arc<HashProvider>, root: &str) -> Result<f64> {
    let rebuild = || -> Result<bool> {
        let t = MerkleTree::build(txs.iter().cloned(), Arc::clone(provider))?;
        Ok(t.root_hash() == root)
    };

    for _ in 0..REBUILD_WARMUP {
        std::hint::black_box(rebuild()?);
    }

    let start = Instant::now();
    for _ in 0..REBUILD_ITERATIONS {
        std::hint::black_box(rebuild()?);
    }
    Ok(start.elapsed().as_nanos() as f64 / REBUILD_ITERATIONS as f64)
}
