//! Component-level diagram
//!
//! Frontend modules, hooks and services, and the database tables they touch.

use tracing::debug;

use crate::catalog::base_config;
use crate::core::{DiagramConfig, Direction, Edge, Graph, NodeKind};

pub const TITLE: &str = "DOC+ Component Architecture";
pub const FILENAME: &str = "doc_plus_components";

pub fn config() -> DiagramConfig {
    base_config(TITLE, FILENAME, Direction::LeftRight)
}

pub fn declare(g: &mut Graph) {
    let (doctor_chat, ai_chat, patient_chat, chat_interface) =
        g.cluster("Frontend Components", |g| {
            let doctor_chat = g.cluster("Doctor Module", |g| {
                let dashboard = g.node(NodeKind::React, "DoctorDashboard");
                let chat = g.node(NodeKind::React, "DoctorChat");
                let profile = g.node(NodeKind::React, "DoctorProfile");
                g.node(NodeKind::React, "DoctorOnboarding");
                g.node(NodeKind::React, "DoctorSidebar");

                g.fan_out(dashboard, &[chat, profile], Edge::new());
                chat
            });

            let (ai_chat, patient_chat) = g.cluster("Patient Module", |g| {
                let registration = g.node(NodeKind::React, "PatientRegistration");
                let profile = g.node(NodeKind::React, "PatientProfile");
                let ai_chat = g.node(NodeKind::React, "AIChat\n(Therapeutic)");
                let patient_chat = g.node(NodeKind::React, "PatientDoctorChat");
                g.node(NodeKind::React, "PatientSidebar");

                g.edge(registration, profile)
                    .fan_out(profile, &[ai_chat, patient_chat], Edge::new());
                (ai_chat, patient_chat)
            });

            let chat_interface = g.cluster("Shared Components", |g| {
                let interface = g.node(NodeKind::React, "ChatInterface");
                let window = g.node(NodeKind::React, "ChatWindow");
                let conversations = g.node(NodeKind::React, "ConversationList");
                g.node(NodeKind::React, "LoginPage");
                g.node(NodeKind::React, "RoleSelection");

                g.fan_out(interface, &[window, conversations], Edge::new());
                interface
            });

            (doctor_chat, ai_chat, patient_chat, chat_interface)
        });

    let openrouter_svc = g.cluster("Services Layer", |g| {
        g.node(NodeKind::TypeScript, "openRouterService\n(AI Integration)")
    });

    let hooks = g.cluster("Custom Hooks", |g| {
        [
            g.node(NodeKind::TypeScript, "useChatSessions"),
            g.node(NodeKind::TypeScript, "useDoctorPatientChat"),
        ]
    });

    let tables = g.cluster("Database Schema", |g| {
        let doctors = g.node(NodeKind::Sql, "doctors");
        let patients = g.node(NodeKind::Sql, "patients");
        let sessions = g.node(NodeKind::Sql, "chat_sessions");
        let messages = g.node(NodeKind::Sql, "chat_messages");

        g.fan_in(&[doctors, patients], sessions, Edge::new())
            .edge(sessions, messages);
        [doctors, patients, sessions]
    });

    g.fan_in(&[doctor_chat, patient_chat], chat_interface, Edge::new());
    g.fan_in(&[ai_chat, patient_chat], openrouter_svc, Edge::new());

    g.fan_out(chat_interface, &hooks, Edge::new());
    for hook in hooks {
        g.fan_out(hook, &tables, Edge::new());
    }

    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "Declared component diagram"
    );
}
