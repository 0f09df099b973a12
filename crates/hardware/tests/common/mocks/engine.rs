use mockall::mock;
use rvhart_core::core::ExecutionEngine;
use rvhart_core::isa::IsaDescriptor;

mock! {
    pub Engine {}
    impl ExecutionEngine for Engine {
        fn register_hart(&mut self, hart_id: u64, isa: &IsaDescriptor);
        fn synchronize_post_reset(&mut self, hart_id: u64);
    }
}

/// Engine that records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    /// `(hart_id, isa_string)` per `register_hart` call.
    pub registered: Vec<(u64, String)>,
    /// Hart ids per `synchronize_post_reset` call.
    pub synchronized: Vec<u64>,
}

impl ExecutionEngine for RecordingEngine {
    fn register_hart(&mut self, hart_id: u64, isa: &IsaDescriptor) {
        self.registered.push((hart_id, isa.isa_string()));
    }

    fn synchronize_post_reset(&mut self, hart_id: u64) {
        self.synchronized.push(hart_id);
    }
}
