//! Mock host cache.
//!
//! A `mockall` mock of the host capability trait, used where a test wants
//! exact expectations on the calls the adapter makes (which addresses were
//! submitted, how many times, with what arguments).

use dcpt::host::{CacheBlock, HostCache, Packet};
use mockall::mock;

mock! {
    pub Host {}
    impl HostCache for Host {
        fn block_size(&self) -> u64;
        fn num_ways(&self) -> u32;
        fn get_set(&self, addr: u64) -> u32;
        fn get_way(&self, addr: u64, set: u32) -> u32;
        fn block(&self, index: usize) -> CacheBlock;
        fn read_queue(&self) -> &[Packet];
        fn write_queue(&self) -> &[Packet];
        fn prefetch_queue(&self) -> &[Packet];
        fn mshrs(&self) -> &[Packet];
        fn prefetch_line(&mut self, addr: u64, fill_this_level: bool, metadata: u32);
    }
}

impl MockHost {
    /// A mock whose queues are empty and whose lookups always miss, with
    /// the usual 64-byte-block, 4-way geometry.
    pub fn empty() -> Self {
        let mut host = MockHost::new();
        host.expect_block_size().return_const(64u64);
        host.expect_num_ways().return_const(4u32);
        host.expect_get_set().return_const(0u32);
        host.expect_get_way().return_const(4u32);
        host.expect_read_queue().return_const(Vec::<Packet>::new());
        host.expect_write_queue().return_const(Vec::<Packet>::new());
        host.expect_prefetch_queue().return_const(Vec::<Packet>::new());
        host.expect_mshrs().return_const(Vec::<Packet>::new());
        host
    }
}
