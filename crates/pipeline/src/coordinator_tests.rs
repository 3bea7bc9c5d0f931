use super::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

struct StubPlugin {
    name: &'static str,
    start_fails: bool,
    stop_fails: bool,
    started: AtomicBool,
    stopped: AtomicBool,
}

impl StubPlugin {
    fn new(name: &'static str) -> Self {
        Self { name, start_fails: false, stop_fails: false, started: AtomicBool::new(false), stopped: AtomicBool::new(false) }
    }

    fn failing_start(name: &'static str) -> Self {
        Self { name, start_fails: true, stop_fails: false, started: AtomicBool::new(false), stopped: AtomicBool::new(false) }
    }

    fn failing_stop(name: &'static str) -> Self {
        Self { name, start_fails: false, stop_fails: true, started: AtomicBool::new(false), stopped: AtomicBool::new(false) }
    }
}

#[async_trait]
impl Plugin for StubPlugin {
    fn name(&self) -> &str {
        self.name
    }

    async fn init(&self, _bus: Arc<EventBus>, _state: Arc<StateStore>) {}

    async fn start(&self, _scope: Scope) -> Result<(), PipelineError> {
        if self.start_fails {
            return Err(PipelineError::StartFailed { name: self.name.to_string(), reason: "boom".to_string() });
        }
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), PipelineError> {
        self.stopped.store(true, Ordering::SeqCst);
        if self.stop_fails {
            return Err(PipelineError::StartFailed { name: self.name.to_string(), reason: "stop boom".to_string() });
        }
        Ok(())
    }
}

fn harness() -> PipelineCoordinator {
    PipelineCoordinator::new(Arc::new(EventBus::default()), Arc::new(StateStore::default()))
}

#[tokio::test]
async fn register_rejects_duplicate_names() {
    let coordinator = harness();
    coordinator.register(Arc::new(StubPlugin::new("command"))).await.unwrap();
    let err = coordinator.register(Arc::new(StubPlugin::new("command"))).await.unwrap_err();
    assert!(matches!(err, PipelineError::AlreadyRegistered { name } if name == "command"));
}

#[tokio::test]
async fn start_halts_at_first_failure() {
    let coordinator = harness();
    let good = Arc::new(StubPlugin::new("a"));
    let bad = Arc::new(StubPlugin::failing_start("b"));
    let never_reached = Arc::new(StubPlugin::new("c"));
    coordinator.register(good.clone()).await.unwrap();
    coordinator.register(bad.clone()).await.unwrap();
    coordinator.register(never_reached.clone()).await.unwrap();

    let result = coordinator.start().await;

    assert!(result.is_err());
    assert!(good.started.load(Ordering::SeqCst));
    assert!(!never_reached.started.load(Ordering::SeqCst));
}

#[tokio::test]
async fn stop_continues_past_individual_failures() {
    let coordinator = harness();
    let failing = Arc::new(StubPlugin::failing_stop("a"));
    let healthy = Arc::new(StubPlugin::new("b"));
    coordinator.register(failing.clone()).await.unwrap();
    coordinator.register(healthy.clone()).await.unwrap();
    coordinator.start().await.unwrap();

    coordinator.stop().await;

    assert!(failing.stopped.load(Ordering::SeqCst));
    assert!(healthy.stopped.load(Ordering::SeqCst));
}
