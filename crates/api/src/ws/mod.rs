//! WebSocket live feed for dashboards.

mod stream;

pub use stream::stream_handler;
