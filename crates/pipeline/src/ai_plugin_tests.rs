use super::*;
use crate::llm::NullLlmClient;
use oj2_core::{BlockKind, FakeClock};
use std::sync::atomic::{AtomicUsize, Ordering};

fn harness() -> (AiPlugin<FakeClock>, Arc<EventBus>, Arc<StateStore>) {
    let bus = Arc::new(EventBus::new(16));
    let state = Arc::new(StateStore::default());
    let plugin = AiPlugin::new(FakeClock::new(), Arc::new(NullLlmClient::new("canned fix")));
    (plugin, bus, state)
}

fn failed_block(output: &str) -> Block {
    let mut block = Block::new(BlockId::new(), BlockKind::Command, "some-cmd", 1_000, "/tmp");
    block.output = output.to_string();
    block.exit_code = Some(1);
    block
}

#[tokio::test]
async fn dictionary_match_adds_suggestion_and_publishes() {
    let (plugin, bus, state) = harness();
    plugin.init(bus.clone(), state.clone()).await;
    plugin.start(crate::scope::scope().1).await.unwrap();

    let block = failed_block("bash: foo: Permission denied");
    state.add_block(block.clone());

    let seen = Arc::new(AtomicUsize::new(0));
    let seen2 = seen.clone();
    bus.subscribe(Topic::AiSuggestion, Arc::new(move |_event: &Event| {
        seen2.fetch_add(1, Ordering::SeqCst);
    }));

    bus.publish(Event::new(Topic::CommandError, "command", 1_000, json!({})).with_block(block.id));

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    let suggestions = state.get_suggestions_for(block.id);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].kind, oj2_core::SuggestionKind::Fix);
}

#[tokio::test]
async fn unmatched_output_adds_no_suggestion() {
    let (plugin, bus, state) = harness();
    plugin.init(bus.clone(), state.clone()).await;
    plugin.start(crate::scope::scope().1).await.unwrap();

    let block = failed_block("totally novel failure mode");
    state.add_block(block.clone());
    bus.publish(Event::new(Topic::CommandError, "command", 1_000, json!({})).with_block(block.id));

    assert!(state.get_suggestions_for(block.id).is_empty());
}

#[tokio::test]
async fn analyse_calls_llm_and_records_suggestion() {
    let (plugin, bus, state) = harness();
    plugin.init(bus.clone(), state.clone()).await;

    let block = failed_block("weird error");
    let suggestion = plugin.analyse(&block).await.unwrap();

    assert_eq!(suggestion.explanation, "canned fix");
    assert_eq!(state.get_suggestions_for(block.id).len(), 1);
}

#[tokio::test]
async fn answer_writes_response_into_block_output() {
    let (plugin, bus, state) = harness();
    plugin.init(bus.clone(), state.clone()).await;

    let mut block = Block::new(BlockId::new(), BlockKind::Ai, "?what's my cwd", 1_000, "/tmp");
    block.output.clear();
    state.add_block(block.clone());

    plugin.answer("what's my cwd", block.id).await.unwrap();

    let stored = state.get_block(block.id).unwrap();
    assert_eq!(stored.output, "canned fix");
}
