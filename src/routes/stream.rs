// ABOUTME: Server-Sent Events endpoint streaming every newly published summary
// ABOUTME: Each connection gets its own session; keep-alive comments hold idle proxies open
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::server::ServerResources;
use crate::sse::StreamSession;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::{future, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;

/// Stream routes
pub struct StreamRoutes;

impl StreamRoutes {
    /// Create the stream route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/stream", get(Self::handle_stream))
            .with_state(resources)
    }

    async fn handle_stream(
        State(resources): State<Arc<ServerResources>>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        let session = StreamSession::open(Arc::clone(&resources.registry));
        let subscriber_id = session.id();

        let events = session.filter_map(move |message| {
            future::ready(match message.to_event() {
                Ok(event) => Some(Ok(event)),
                Err(e) => {
                    tracing::error!(%subscriber_id, "Failed to encode stream frame: {}", e);
                    None
                }
            })
        });

        Sse::new(events).keep_alive(KeepAlive::new().interval(resources.config.sse.keep_alive))
    }
}
