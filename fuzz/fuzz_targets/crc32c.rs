//! Differential fuzzing of the CRC-32C engines.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Dispatcher, portable, hardware and bitwise reference all agree
//! - Splitting the raw register update anywhere gives the one-shot result

#![no_main]

use arbitrary::Arbitrary;
use castagnoli::{Dispatcher, Engine, Fixed, INIT, XOROUT, portable, reference};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
  capability: bool,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let expected = reference::crc32c(data);

  let dispatched = Dispatcher::new(Fixed(input.capability)).crc32(data);
  assert_eq!(
    dispatched, expected,
    "dispatch mismatch: ours={dispatched:#010x}, reference={expected:#010x}, len={}",
    data.len()
  );

  let table = portable::init_table();
  assert_eq!(portable::compute_slow(table, data), expected, "portable mismatch");

  if let Some(engine) = Engine::get() {
    assert_eq!(engine.compute_fast(data), expected, "{} mismatch", engine.name());
  }

  let split = input.split_point % (data.len() + 1);
  let (a, b) = data.split_at(split);
  let chained = portable::update(table, portable::update(table, INIT, a), b) ^ XOROUT;
  assert_eq!(chained, expected, "split mismatch at {split}");
});
