//! Data flow diagram
//!
//! How user interactions travel through React state, the client libraries
//! and the Supabase backend, including the realtime push path.

use tracing::debug;

use crate::catalog::base_config;
use crate::core::{DiagramConfig, Direction, Edge, EdgeStyle, Graph, NodeKind};

pub const TITLE: &str = "DOC+ Data Flow";
pub const FILENAME: &str = "doc_plus_dataflow";

pub fn config() -> DiagramConfig {
    base_config(TITLE, FILENAME, Direction::TopBottom)
}

pub fn declare(g: &mut Graph) {
    let doctor = g.node(NodeKind::Client, "Doctor");
    let patient = g.node(NodeKind::Client, "Patient");

    let (ui, query_client) = g.cluster("Frontend", |g| {
        (
            g.node(NodeKind::React, "React UI"),
            g.node(NodeKind::TypeScript, "React Query\n(State Management)"),
        )
    });

    let (supabase_js, clerk_react, openrouter) = g.cluster("API & Integration", |g| {
        (
            g.node(NodeKind::Sql, "@supabase/supabase-js"),
            g.node(NodeKind::Identity, "@clerk/clerk-react"),
            g.node(NodeKind::Server, "OpenRouter API"),
        )
    });

    let (realtime, rest_api, auth) = g.cluster("Supabase Backend", |g| {
        let realtime = g.node(NodeKind::Server, "Realtime Server\n(WebSocket)");
        let rest_api = g.node(NodeKind::Server, "REST API");
        let auth = g.node(NodeKind::Firewall, "Auth & RLS");
        let db = g.node(NodeKind::Postgres, "PostgreSQL");

        g.chain(&[rest_api, auth, db], Edge::new())
            .chain(&[realtime, auth, db], Edge::new());
        (realtime, rest_api, auth)
    });

    g.fan_in(&[doctor, patient], ui, Edge::labeled("Interact"));
    g.edge_with(ui, query_client, Edge::labeled("State"));

    g.edge_with(query_client, supabase_js, Edge::labeled("Queries"))
        .edge_with(query_client, clerk_react, Edge::labeled("Auth"));

    g.edge_with(ui, openrouter, Edge::labeled("AI Chat"));

    g.edge_with(supabase_js, rest_api, Edge::labeled("CRUD"))
        .edge_with(supabase_js, realtime, Edge::labeled("Subscribe"));

    g.edge_with(
        realtime,
        query_client,
        Edge::labeled("Push Updates").style(EdgeStyle::Dashed),
    );

    g.edge_with(clerk_react, auth, Edge::labeled("User Session"));

    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "Declared data flow diagram"
    );
}
