//! Delta Entry Tests.
//!
//! Verifies delta recording (FIFO window, overflow sentinel, duplicate
//! suppression) and candidate generation (correlation search, replay,
//! block deduplication, re-issue suppression).

use dcpt::table::entry::DeltaEntry;

const BLK_MASK: u64 = !63;

/// Feeds a miss-address sequence through a fresh entry with the default
/// window and delta width, returning the trained entry.
fn trained(addrs: &[u64]) -> DeltaEntry {
    let mut entry = DeltaEntry::new(0x1000, addrs[0], 12, 19);
    for &addr in &addrs[1..] {
        entry.record(addr);
    }
    entry
}

// ══════════════════════════════════════════════════════════
// 1. Recording
// ══════════════════════════════════════════════════════════

/// A fresh entry starts with the creation address and no deltas.
#[test]
fn fresh_entry_is_empty() {
    let entry = DeltaEntry::new(0x1000, 0x4000, 12, 19);
    assert_eq!(entry.tag(), 0x1000);
    assert_eq!(entry.last_addr(), 0x4000);
    assert_eq!(entry.last_prefetch(), 0, "No prefetch issued yet");
    assert!(entry.is_empty());
}

/// A constant stride records one delta per distinct address.
#[test]
fn stride_recording() {
    let entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0, 0x4100]);
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![64, 64, 64, 64]);
    assert_eq!(entry.last_addr(), 0x4100);
}

/// Repeating the last address adds no delta but is otherwise harmless.
#[test]
fn duplicate_address_ignored() {
    let mut entry = DeltaEntry::new(0x1000, 0x2000, 12, 19);
    entry.record(0x2000);
    assert!(entry.is_empty(), "A zero delta would alias the sentinel");
    assert_eq!(entry.last_addr(), 0x2000);
}

/// Negative deltas within range are recorded as-is.
#[test]
fn negative_delta_recorded() {
    let entry = trained(&[0x2000, 0x1FC0]);
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![-64]);
}

/// A delta whose magnitude exceeds the 12-bit mask records the 0 sentinel.
#[test]
fn overflow_records_sentinel() {
    // 0x1000 -> 0x1010 is +16; 0x1010 -> 0x1_000_000 overflows 0xFFF.
    let entry = trained(&[0x1000, 0x1010, 0x1_000_000]);
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![16, 0]);
}

/// A negative delta whose magnitude exceeds the mask also records the
/// sentinel; the magnitude check is on the absolute value.
#[test]
fn negative_overflow_records_sentinel() {
    let entry = trained(&[0x1_000_000, 0x1000]);
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![0]);
}

/// A delta exactly at the mask is still representable.
#[test]
fn delta_at_mask_boundary() {
    let entry = trained(&[0x1000, 0x1000 + 0xFFF]);
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![0xFFF]);
}

/// The window is a FIFO of fixed capacity: the oldest delta drops first.
#[test]
fn window_drops_oldest() {
    let mut entry = DeltaEntry::new(0x1000, 0, 12, 4);
    // Deltas 1, 2, 3, 4, 5, 6 in order.
    let mut addr = 0u64;
    for delta in 1..=6u64 {
        addr += delta;
        entry.record(addr);
    }
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![3, 4, 5, 6]);
    assert_eq!(entry.len(), 4, "Capacity bounds the window");
}

// ══════════════════════════════════════════════════════════
// 2. Candidate generation
// ══════════════════════════════════════════════════════════

/// Fewer than 2 * depth deltas can never contain a repeat of the pattern.
#[test]
fn too_few_deltas_produce_nothing() {
    let entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0]);
    assert_eq!(entry.len(), 3);
    assert!(entry.prefetch_candidates(2, BLK_MASK).is_empty());
}

/// A zero match depth produces nothing.
#[test]
fn zero_depth_produces_nothing() {
    let entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0, 0x4100]);
    assert!(entry.prefetch_candidates(0, BLK_MASK).is_empty());
}

/// A constant stride projects the stride forward from the last address.
///
/// Deltas [64, 64, 64, 64]: the pattern [64, 64] recurs at the window
/// start, and the two deltas after the match replay onto 0x4100.
#[test]
fn stride_projects_forward() {
    let entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0, 0x4100]);
    let candidates = entry.prefetch_candidates(2, BLK_MASK);
    assert_eq!(candidates, vec![0x4140, 0x4180]);
}

/// The earliest occurrence wins, maximizing the replayed continuation.
///
/// Deltas [64, 64, 64, 64, 64] match at position 0 and replay three
/// deltas, not the shorter tail a later occurrence would leave.
#[test]
fn earliest_match_maximizes_replay() {
    let entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0, 0x4100, 0x4140]);
    let candidates = entry.prefetch_candidates(2, BLK_MASK);
    assert_eq!(candidates, vec![0x4180, 0x41C0, 0x4200]);
}

/// No earlier occurrence of the pattern means no candidates.
#[test]
fn no_match_produces_nothing() {
    // Deltas [8, 16, 24, 32]: the pattern [24, 32] never occurred before.
    let entry = trained(&[0x1000, 0x1008, 0x1018, 0x1030, 0x1050]);
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![8, 16, 24, 32]);
    assert!(entry.prefetch_candidates(2, BLK_MASK).is_empty());
}

/// Sentinel zeros participate in matching like any other element.
#[test]
fn sentinel_participates_in_match() {
    // Deltas [16, 0, 16, 0]: pattern [16, 0] matches at position 0.
    // Replay: +16 lands at 0x3_000_010, the sentinel +0 stays in the same
    // block and is deduplicated.
    let entry = trained(&[0x1000, 0x1010, 0x2_000_000, 0x2_000_010, 0x3_000_000]);
    let deltas: Vec<i64> = entry.deltas().collect();
    assert_eq!(deltas, vec![16, 0, 16, 0]);
    let candidates = entry.prefetch_candidates(2, BLK_MASK);
    assert_eq!(candidates, vec![0x3_000_010]);
}

/// Only one candidate per cache block survives deduplication.
#[test]
fn candidates_deduplicated_by_block() {
    // Stride 16 inside a 64-byte block: both projected addresses fall in
    // the block of 0x4040.
    let entry = trained(&[0x4000, 0x4010, 0x4020, 0x4030, 0x4040]);
    let candidates = entry.prefetch_candidates(2, BLK_MASK);
    assert_eq!(candidates, vec![0x4050]);
}

// ══════════════════════════════════════════════════════════
// 3. Re-issue suppression
// ══════════════════════════════════════════════════════════

/// Reaching the last issued prefetch clears the list; the continuation
/// beyond it is still produced.
#[test]
fn suppression_keeps_continuation() {
    let mut entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0, 0x4100, 0x4140]);
    entry.set_last_prefetch(0x4180);
    // Replay: 0x4180 clears, then 0x41C0 and 0x4200 repopulate.
    let candidates = entry.prefetch_candidates(2, BLK_MASK);
    assert_eq!(candidates, vec![0x41C0, 0x4200]);
}

/// A projection ending exactly at the last issued prefetch yields nothing.
#[test]
fn suppression_at_tail_yields_empty() {
    let mut entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0, 0x4100]);
    entry.set_last_prefetch(0x4180);
    // Replay: 0x4140 appended, then 0x4180 clears the whole list.
    let candidates = entry.prefetch_candidates(2, BLK_MASK);
    assert!(
        candidates.is_empty(),
        "The full projected tail was already announced"
    );
}

/// Suppression in the middle drops the head of the projection only.
#[test]
fn suppression_mid_stream() {
    let mut entry = trained(&[0x4000, 0x4040, 0x4080, 0x40C0, 0x4100]);
    entry.set_last_prefetch(0x4140);
    // Replay: 0x4140 clears (nothing yet), 0x4180 survives.
    let candidates = entry.prefetch_candidates(2, BLK_MASK);
    assert_eq!(candidates, vec![0x4180]);
}
