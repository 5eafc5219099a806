// Request completion logging runs inside the per-request span

use std::sync::Arc;

use actix_web::test;
use parking_lot::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::support::app_builder::create_test_app;
use crate::support::test_state;

const LOGGER_MODULE: &str = "marquee_backend::middleware::structured_logger";

/// Module path of each event and the name of the span it was emitted in.
#[derive(Clone, Default)]
struct EventSpans(Arc<Mutex<Vec<(String, Option<String>)>>>);

impl<S> Layer<S> for EventSpans
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let module = event.metadata().module_path().unwrap_or_default().to_string();
        let span = ctx.event_span(event).map(|span| span.name().to_string());
        self.0.lock().push((module, span));
    }
}

#[actix_web::test]
async fn test_completion_event_is_inside_request_span() -> Result<(), Box<dyn std::error::Error>> {
    let captured = EventSpans::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = create_test_app(test_state()).await;
    for uri in ["/health", "/api/movie/all"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_service(&app, req).await;
    }

    let completions: Vec<_> = captured
        .0
        .lock()
        .iter()
        .filter(|(module, _)| module == LOGGER_MODULE)
        .map(|(_, span)| span.clone())
        .collect();

    // One success and one gate rejection
    assert_eq!(completions.len(), 2);
    for span in completions {
        assert_eq!(span.as_deref(), Some("request"));
    }
    Ok(())
}
