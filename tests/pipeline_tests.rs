use anyhow::anyhow;
use crossbeam_channel::{Receiver, Sender};
use signet::hashing::{checksum, digest};
use signet::{Pipeline, PipelineContext, SignOpts, combine_results, multi_hash, single_hash};
use std::sync::Arc;

fn ctx() -> Arc<PipelineContext> {
    Arc::new(PipelineContext::new(&SignOpts::default()))
}

/// Reference value for one item through single_hash.
fn expected_single_hash(n: u64) -> String {
    let ctx = ctx();
    let d = n.to_string();
    format!(
        "{}~{}",
        checksum(&d),
        checksum(&digest(&ctx.digest_lock, &d))
    )
}

/// Reference value for one item through multi_hash.
fn expected_multi_hash(data: &str) -> String {
    (0..6).map(|i| checksum(&format!("{i}{data}"))).collect()
}

// --- single_hash ---

#[test]
fn test_single_hash_one_item() {
    let out = Pipeline::source(ctx(), vec![42u64])
        .stage("single_hash", single_hash)
        .collect()
        .unwrap();
    assert_eq!(out, vec![expected_single_hash(42)]);
}

#[test]
fn test_single_hash_emits_every_item() {
    let inputs: Vec<u64> = (0..20).collect();
    let mut out = Pipeline::source(ctx(), inputs.clone())
        .stage("single_hash", single_hash)
        .collect()
        .unwrap();
    let mut expected: Vec<String> = inputs.iter().map(|&n| expected_single_hash(n)).collect();
    out.sort();
    expected.sort();
    assert_eq!(out, expected);
}

// --- multi_hash ---

#[test]
fn test_multi_hash_index_order() {
    let data = "abc".to_string();
    let expected = expected_multi_hash(&data);
    let out = Pipeline::source(ctx(), vec![data])
        .stage("multi_hash", multi_hash)
        .collect()
        .unwrap();
    assert_eq!(out, vec![expected]);
}

#[test]
fn test_multi_hash_many_items() {
    let inputs: Vec<String> = (0..50).map(|n| n.to_string()).collect();
    let mut out = Pipeline::source(ctx(), inputs.clone())
        .stage("multi_hash", multi_hash)
        .collect()
        .unwrap();
    let mut expected: Vec<String> = inputs.iter().map(|s| expected_multi_hash(s)).collect();
    out.sort();
    expected.sort();
    assert_eq!(out, expected);
}

// --- combine_results ---

#[test]
fn test_combine_sorts_and_joins() {
    let inputs = vec!["b".to_string(), "a".to_string(), "c".to_string()];
    let out = Pipeline::source(ctx(), inputs)
        .stage("combine_results", combine_results)
        .collect_one()
        .unwrap();
    assert_eq!(out, "a_b_c");
}

#[test]
fn test_combine_permutation_invariant() {
    let base = vec!["10".to_string(), "2".to_string(), "2".to_string(), "x".to_string()];
    let permuted = vec!["x".to_string(), "2".to_string(), "10".to_string(), "2".to_string()];
    let run = |input: Vec<String>| {
        Pipeline::source(ctx(), input)
            .stage("combine_results", combine_results)
            .collect_one()
            .unwrap()
    };
    assert_eq!(run(base), run(permuted));
}

#[test]
fn test_combine_empty_input_is_empty_string() {
    let out = Pipeline::source(ctx(), Vec::<String>::new())
        .stage("combine_results", combine_results)
        .collect_one()
        .unwrap();
    assert_eq!(out, "");
}

// --- orchestrator ---

#[test]
fn test_zero_stages_empty_input() {
    let out: Vec<u64> = Pipeline::source(ctx(), Vec::new()).collect().unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_zero_stages_passthrough_preserves_order() {
    // A single channel with one producer and one consumer is FIFO.
    let out = Pipeline::source(ctx(), vec![1u64, 2, 3]).collect().unwrap();
    assert_eq!(out, vec![1, 2, 3]);
}

#[test]
fn test_end_to_end_two_stage() {
    let mut expected = vec![expected_single_hash(0), expected_single_hash(1)];
    expected.sort();
    let expected = expected.join("_");

    let got = Pipeline::source(ctx(), vec![0u64, 1])
        .stage("single_hash", single_hash)
        .stage("combine_results", combine_results)
        .collect_one()
        .unwrap();
    assert_eq!(got, expected);
}

#[test]
fn test_full_pipeline_single_item() {
    let expected = expected_multi_hash(&expected_single_hash(7));
    assert_eq!(signet::sign(vec![7u64]).unwrap(), expected);
}

#[test]
fn test_full_pipeline_deterministic() {
    let run = || signet::sign(0..8u64).unwrap();
    let first = run();
    assert_eq!(first, run());
    assert_eq!(first, run());
}

#[test]
fn test_full_pipeline_empty_input() {
    assert_eq!(signet::sign(0..0u64).unwrap(), "");
}

#[test]
fn test_full_pipeline_large_input_drains() {
    let out = signet::sign(0..1000u64).unwrap();
    // 1000 sorted signatures joined by `_`.
    assert_eq!(out.split('_').count(), 1000);
    let parts: Vec<&str> = out.split('_').collect();
    let mut sorted = parts.clone();
    sorted.sort_unstable();
    assert_eq!(parts, sorted);
}

#[test]
fn test_small_channel_capacity_still_drains() {
    let opts = SignOpts { channel_cap: 1 };
    let expected = signet::sign(0..32u64).unwrap();
    assert_eq!(signet::sign_with_opts(0..32u64, &opts).unwrap(), expected);
}

// --- failure path ---

#[test]
fn test_stage_error_aborts_pipeline() {
    let res = Pipeline::source(ctx(), vec![1u64, 2, 3])
        .stage("boom", |rx: Receiver<u64>, _tx: Sender<String>, _ctx| {
            let _ = rx.recv();
            Err(anyhow!("boom"))
        })
        .stage("combine_results", combine_results)
        .collect();
    let err = res.unwrap_err();
    assert!(format!("{err:#}").contains("boom"));
}

#[test]
fn test_stage_error_does_not_deadlock_large_source() {
    // The failing stage drops its endpoints; the source must notice the
    // closed channel and stop feeding instead of blocking forever.
    let res = Pipeline::source(ctx(), (0..1000u64).collect::<Vec<_>>())
        .stage("boom", |_rx: Receiver<u64>, _tx: Sender<String>, _ctx| {
            Err(anyhow!("early failure"))
        })
        .collect();
    assert!(res.is_err());
}
