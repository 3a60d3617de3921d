//! First-use table construction under contention.
//!
//! This lives in its own test binary (its own process) so nothing has built
//! the table before the race starts.

#![cfg(feature = "std")]

use std::{
  sync::{Arc, Barrier},
  thread,
};

use castagnoli::{CHECK, Dispatcher, Fixed, Force, portable};

const THREADS: usize = 16;

#[test]
fn concurrent_first_use_builds_one_table() {
  assert!(!portable::table_ready(), "table built before the race");

  let barrier = Arc::new(Barrier::new(THREADS));
  let handles: Vec<_> = (0..THREADS)
    .map(|_| {
      let barrier = Arc::clone(&barrier);
      thread::spawn(move || {
        let dispatcher = Dispatcher::new(Fixed(false)).with_force(Force::Portable);
        barrier.wait();
        let crc = dispatcher.crc32(b"123456789");
        (crc, portable::init_table() as *const [u32; 256] as usize)
      })
    })
    .collect();

  let results: Vec<(u32, usize)> = handles
    .into_iter()
    .map(|handle| handle.join().expect("worker panicked"))
    .collect();

  assert!(results.iter().all(|&(crc, _)| crc == CHECK));
  let table = results[0].1;
  assert!(results.iter().all(|&(_, addr)| addr == table), "more than one table");

  assert!(portable::table_ready());
  assert_eq!(*portable::init_table(), portable::build_table());
}
