use std::time::Duration;

use konnyaku_config::Config;
use konnyaku_types::{AppEvent, DictionaryRecord, ProcessorResult};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::build_provider;
use crate::io::watcher_io;

#[tokio::test]
async fn test_partial_sink_spawns_from_sync_context() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    // Streaming callbacks are sync; they hand off to the runtime.
    let on_partial = move |partial: ProcessorResult| {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(AppEvent::StreamPartial(partial))
                .await
                .expect("send failed");
        });
    };

    on_partial(ProcessorResult::Translation {
        text: "hello".to_string(),
    });

    let result = timeout(Duration::from_secs(2), rx.recv()).await;

    match result {
        Ok(Ok(AppEvent::StreamPartial(ProcessorResult::Translation { text }))) => {
            assert_eq!(text, "hello");
        }
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - spawned send never arrived!"),
    }
}

#[tokio::test]
async fn test_stream_events_arrive_in_order() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(256);

    let snapshots = vec![
        DictionaryRecord {
            word: "cat".to_string(),
            ..Default::default()
        },
        DictionaryRecord {
            word: "cat".to_string(),
            definition: "A small domesticated feline.".to_string(),
            ..Default::default()
        },
    ];

    let final_record = snapshots.last().cloned().unwrap();
    tokio::spawn(async move {
        for snapshot in snapshots {
            tx.send(AppEvent::StreamPartial(ProcessorResult::Dictionary {
                data: snapshot,
            }))
            .await
            .expect("send failed");
        }
        tx.send(AppEvent::StreamDone(ProcessorResult::Dictionary {
            data: final_record,
        }))
        .await
        .expect("send failed");
    });

    let mut partials = 0;
    let done = timeout(Duration::from_secs(2), async {
        loop {
            match rx.recv().await.expect("recv failed") {
                AppEvent::StreamPartial(_) => partials += 1,
                AppEvent::StreamDone(result) => break result,
                other => panic!("unexpected event: {:?}", other),
            }
        }
    })
    .await
    .expect("Timeout waiting for stream events");

    assert_eq!(partials, 2);
    match done {
        ProcessorResult::Dictionary { data } => {
            assert_eq!(data.word, "cat");
            assert_eq!(data.definition, "A small domesticated feline.");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_one_shot_argument_becomes_text_input() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(64);

    watcher_io(Some("hello".to_string()), tx, CancellationToken::new())
        .await
        .expect("watcher failed");

    let result = timeout(Duration::from_secs(2), rx.recv()).await;
    match result {
        Ok(Ok(AppEvent::TextInput(text))) => assert_eq!(text, "hello"),
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - input event never arrived!"),
    }

    // Sender dropped after the one-shot send; the channel must be closed.
    assert!(rx.recv().await.is_err());
}

#[test]
fn test_build_provider_rejects_unknown_name() {
    let mut config = Config::default();
    config.provider.provider = "carrier-pigeon".to_string();

    let err = match build_provider(&config) {
        Err(e) => e,
        Ok(_) => panic!("expected build_provider to fail"),
    };
    assert!(err.to_string().contains("carrier-pigeon"));
}

#[test]
fn test_build_provider_known_names() {
    let mut config = Config::default();

    config.provider.provider = "gemini".to_string();
    let provider = build_provider(&config).expect("gemini should build");
    assert_eq!(provider.metadata().name, "Gemini");

    config.provider.provider = "openai".to_string();
    let provider = build_provider(&config).expect("openai should build");
    assert_eq!(provider.metadata().name, "OpenAI");
}
