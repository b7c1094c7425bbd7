//! Main system architecture diagram
//!
//! Users, the React frontend, Clerk authentication, the Supabase backend,
//! external services and the integration layer, with labeled request paths
//! between them.

use tracing::debug;

use crate::catalog::base_config;
use crate::core::{DiagramConfig, Direction, Edge, Graph, NodeKind};

pub const TITLE: &str = "DOC+ Medical Assistant Architecture";
pub const FILENAME: &str = "doc_plus_architecture";

pub fn config() -> DiagramConfig {
    base_config(TITLE, FILENAME, Direction::TopBottom)
}

pub fn declare(g: &mut Graph) {
    let (doctor, patient) = g.cluster("Users", |g| {
        (
            g.node(NodeKind::Client, "Doctor"),
            g.node(NodeKind::Client, "Patient"),
        )
    });

    let (pages, components, hooks) = g.cluster("Frontend Layer", |g| {
        g.cluster("React Application", |g| {
            let pages = g.node(NodeKind::React, "Pages\n(Dashboard, Chat, Profile)");
            let components = g.node(
                NodeKind::React,
                "Components\n(ChatWindow, Sidebar,\nOnboarding)",
            );
            let contexts = g.node(NodeKind::TypeScript, "Contexts\n(AuthContext)");
            let hooks = g.node(
                NodeKind::TypeScript,
                "Custom Hooks\n(useChatSessions,\nuseDoctorPatientChat)",
            );

            g.edge(pages, components)
                .edge(components, contexts)
                .edge(components, hooks);
            (pages, components, hooks)
        })
    });

    let clerk = g.cluster("Authentication & Identity", |g| {
        g.node(NodeKind::Identity, "Clerk\n(User Auth & Management)")
    });

    let (postgres, supabase_api, edge_functions, storage) =
        g.cluster("Backend Services (Supabase)", |g| {
            let postgres = g.cluster("Database", |g| {
                let postgres = g.node(
                    NodeKind::Postgres,
                    "PostgreSQL\n(Patient, Doctor,\nChat Data)",
                );
                let rls = g.node(NodeKind::Firewall, "Row Level Security\n(RLS Policies)");
                g.link(postgres, rls);
                postgres
            });

            let supabase_api = g.node(NodeKind::Server, "Supabase API\n(REST & Realtime)");
            let edge_functions = g.node(NodeKind::Server, "Edge Functions\n(Serverless Logic)");
            let storage = g.node(NodeKind::Storage, "Supabase Storage\n(File Uploads)");

            g.fan_in(&[supabase_api, edge_functions], postgres, Edge::new());
            (postgres, supabase_api, edge_functions, storage)
        });

    let (openrouter, resend) = g.cluster("External Services", |g| {
        (
            g.node(NodeKind::Server, "OpenRouter API\n(GPT-OSS-20B)\nAI Models"),
            g.node(NodeKind::Server, "Resend\n(Email Service)"),
        )
    });

    let (supabase_client, openrouter_service) = g.cluster("Integration Layer", |g| {
        (
            g.node(NodeKind::Sql, "Supabase Client\n(Database Access)"),
            g.node(NodeKind::TypeScript, "OpenRouter Service\n(AI Integration)"),
        )
    });

    g.fan_in(&[doctor, patient], pages, Edge::labeled("Access"));
    g.edge_with(pages, clerk, Edge::labeled("Authentication"));

    g.edge_with(hooks, supabase_client, Edge::labeled("Query/Mutation"))
        .edge_with(components, openrouter_service, Edge::labeled("AI Requests"));

    g.edge_with(supabase_client, supabase_api, Edge::labeled("API Calls"))
        .edge_with(openrouter_service, openrouter, Edge::labeled("AI Inference"));

    g.edge_with(
        supabase_api,
        components,
        Edge::labeled("Real-time\nSubscriptions"),
    )
    .edge_with(edge_functions, resend, Edge::labeled("Notifications"))
    .edge_with(storage, components, Edge::labeled("File Access"));

    g.edge_with(clerk, postgres, Edge::labeled("User Info"));

    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "Declared architecture diagram"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> Graph {
        let mut g = Graph::new();
        declare(&mut g);
        g
    }

    #[test]
    fn test_counts() {
        let g = declared();
        assert_eq!(g.node_count(), 16);
        assert_eq!(g.cluster_count(), 8);
        assert_eq!(g.edge_count(), 17);
    }

    #[test]
    fn test_react_application_is_nested_in_frontend() {
        let g = declared();
        let app = g.find_cluster("React Application").unwrap();
        let frontend = g.find_cluster("Frontend Layer").unwrap();
        assert_eq!(app.parent, Some(frontend.id));
        assert_eq!(app.members.len(), 4);
    }

    #[test]
    fn test_database_link_is_undirected() {
        let g = declared();
        let postgres = g.find_node("PostgreSQL\n(Patient, Doctor,\nChat Data)").unwrap();
        let rls = g.find_node("Row Level Security\n(RLS Policies)").unwrap();
        let link = g
            .edges()
            .find(|e| e.from == postgres.id && e.to == rls.id)
            .unwrap();
        assert!(!link.attrs.directed);
        assert_eq!(g.cluster_of(rls.id).unwrap().name, "Database");
    }

    #[test]
    fn test_users_reach_pages() {
        let g = declared();
        let pages = g.find_node("Pages\n(Dashboard, Chat, Profile)").unwrap();
        let labels: Vec<_> = g
            .edges()
            .filter(|e| e.to == pages.id)
            .map(|e| e.attrs.label.as_deref())
            .collect();
        assert_eq!(labels, vec![Some("Access"), Some("Access")]);
    }

    #[test]
    fn test_config() {
        let config = config();
        assert_eq!(config.title, TITLE);
        assert_eq!(config.direction, Direction::TopBottom);
        assert_eq!(config.output_file_name(), "doc_plus_architecture.png");
    }
}
