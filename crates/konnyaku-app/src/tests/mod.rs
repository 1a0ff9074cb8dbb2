mod render_tests;
mod stream_event_tests;
