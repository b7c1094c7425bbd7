//! Text overview of the modeled system
//!
//! The overview is fixed content: a framed header followed by sections for
//! the project structure, the key data flows and the technology stack. It is
//! printed to the console and saved next to the diagrams.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::core::{dedent, BoxChars, DiagramError};

/// File name the overview is saved under
pub const REPORT_FILE_NAME: &str = "architecture_overview.txt";

/// Interior width of the header frame and the section rules
pub const REPORT_WIDTH: usize = 63;

pub const REPORT_TITLE: &str = "DOC+ Medical Assistant Architecture";

/// One titled block of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

impl Section {
    /// Create a section; the body's common indentation is stripped
    pub fn new(heading: impl Into<String>, body: &str) -> Self {
        Self {
            heading: heading.into(),
            body: dedent(body).trim_matches('\n').to_string(),
        }
    }
}

/// A framed, multi-section text report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    title: String,
    width: usize,
    sections: Vec<Section>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: REPORT_WIDTH,
            sections: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Append a section
    pub fn section(mut self, heading: impl Into<String>, body: &str) -> Self {
        self.sections.push(Section::new(heading, body));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Render the report text
    pub fn render(&self) -> String {
        let chars = BoxChars::double();
        let rule = chars.rule(self.width);

        let mut out = chars.frame(&self.title, self.width);
        out.push('\n');
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.heading);
            out.push_str(":\n\n");
            out.push_str(&section.body);
            out.push_str("\n\n");
            out.push_str(&rule);
            out.push('\n');
        }
        out
    }
}

const PROJECT_STRUCTURE: &str = r"
    ├── 🎨 Frontend (React + TypeScript + Vite)
    │   ├── Pages/
    │   │   ├── DoctorDashboard - Doctor main interface
    │   │   ├── DoctorChat - Doctor-patient messaging
    │   │   ├── AIChat - AI therapeutic chat for patients
    │   │   ├── PatientRegistration - New patient onboarding
    │   │   └── SignIn/SignUp - Authentication pages
    │   │
    │   ├── Components/
    │   │   ├── ChatInterface - Main chat UI component
    │   │   ├── ChatWindow - Message display and input
    │   │   ├── DoctorOnboarding - Doctor registration flow
    │   │   ├── DoctorProfile - Doctor information management
    │   │   └── PatientProfile - Patient information display
    │   │
    │   ├── Contexts/
    │   │   └── AuthContext - Global authentication state
    │   │
    │   ├── Hooks/
    │   │   ├── useChatSessions - Chat session management
    │   │   └── useDoctorPatientChat - Doctor-patient chat logic
    │   │
    │   ├── Services/
    │   │   └── openRouterService - AI integration service
    │   │
    │   └── Integrations/
    │       └── supabase/ - Supabase client configuration
    │
    ├── 🔐 Authentication (Clerk)
    │   ├── User Management
    │   ├── Session Handling
    │   └── Role-based Access Control (Doctor/Patient)
    │
    ├── 🗄️ Backend (Supabase)
    │   ├── PostgreSQL Database
    │   │   ├── doctors - Doctor profiles and credentials
    │   │   ├── patients - Patient records and medical history
    │   │   ├── chat_sessions - Conversation sessions
    │   │   └── chat_messages - Individual messages
    │   │
    │   ├── Row Level Security (RLS)
    │   │   ├── Doctor policies - Access to assigned patients
    │   │   └── Patient policies - Access to own data
    │   │
    │   ├── Edge Functions
    │   │   └── Serverless backend logic
    │   │
    │   └── Storage
    │       └── Medical file uploads
    │
    └── 🔌 External Services
        ├── OpenRouter API - AI/ML models (GPT-OSS-20B)
        └── Resend - Email delivery service
";

const KEY_DATA_FLOWS: &str = r"
    1. Doctor Registration:
       Doctor → Clerk Auth → Supabase → doctors table

    2. Patient Registration:
       Doctor → Patient Invitation → Email → Patient Signup
       → Clerk Auth → Supabase → patients table

    3. Chat Communication:
       User → ChatInterface → useChatSessions Hook
       → Supabase Realtime → chat_sessions/chat_messages

    4. AI Therapeutic Chat:
       Patient → AIChat → openRouterService
       → OpenRouter API → GPT-OSS-20B → Response

    5. File Upload:
       User → Component → Supabase Storage → File URL
       → Database Reference
";

const TECHNOLOGY_STACK: &str = r"
    Frontend:
    - React 18 + TypeScript
    - Vite (Build Tool)
    - Tailwind CSS + shadcn/ui
    - React Query (@tanstack/react-query)
    - React Router

    Authentication:
    - Clerk (@clerk/clerk-react)

    Backend:
    - Supabase (@supabase/supabase-js)
    - PostgreSQL (via Supabase)
    - Supabase Edge Functions

    AI/ML:
    - OpenRouter API
    - GPT-OSS-20B Model

    Other Services:
    - Resend (Email)
";

/// The DOC+ architecture overview report
pub fn architecture_overview() -> Report {
    Report::new(REPORT_TITLE)
        .section("📁 Project Structure", PROJECT_STRUCTURE)
        .section("🔄 Key Data Flows", KEY_DATA_FLOWS)
        .section("📊 Technology Stack", TECHNOLOGY_STACK)
}

/// Rendered overview text
pub fn overview() -> String {
    architecture_overview().render()
}

/// Print the overview to `console`, then save it to `path`
///
/// The file is truncated on every call. Write errors on either side are
/// returned; the file handle is flushed and closed before returning.
pub fn write_report(path: &Path, console: &mut dyn Write) -> Result<(), DiagramError> {
    let text = overview();
    writeln!(console, "{text}")?;

    {
        let mut file = BufWriter::new(File::create(path)?);
        file.write_all(text.as_bytes())?;
        file.flush()?;
    }
    debug!(path = %path.display(), bytes = text.len(), "Saved overview");

    writeln!(
        console,
        "\n✅ Architecture overview saved to '{}'",
        path.display()
    )?;
    info!(path = %path.display(), "Text overview written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::display_width;

    #[test]
    fn test_overview_starts_with_header() {
        let text = overview();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with('╔'));
        assert!(first.ends_with('╗'));
        assert_eq!(display_width(first), REPORT_WIDTH + 2);
    }

    #[test]
    fn test_header_lines_align() {
        let text = overview();
        let header: Vec<&str> = text.lines().take(3).collect();
        assert!(header[1].contains(REPORT_TITLE));
        assert_eq!(display_width(header[0]), display_width(header[1]));
        assert_eq!(display_width(header[1]), display_width(header[2]));
    }

    #[test]
    fn test_overview_sections() {
        let report = architecture_overview();
        let headings: Vec<&str> = report.sections().iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec!["📁 Project Structure", "🔄 Key Data Flows", "📊 Technology Stack"]
        );
        let text = report.render();
        assert!(text.contains("Technology Stack"));
        assert!(text.contains("└── 🔌 External Services"));
        assert!(text.contains("- Resend (Email)"));
    }

    #[test]
    fn test_section_body_is_dedented() {
        let report = architecture_overview();
        let flows = &report.sections()[1].body;
        assert!(flows.starts_with("1. Doctor Registration:"));
        assert!(flows.contains("\n   Doctor → Clerk Auth"));
        assert!(!flows.ends_with('\n'));
    }

    #[test]
    fn test_overview_is_deterministic() {
        assert_eq!(overview(), overview());
    }

    #[test]
    fn test_custom_report_render() {
        let report = Report::new("T").with_width(4).section("H", "  body");
        assert_eq!(report.render(), "╔════╗\n║ T  ║\n╚════╝\n\nH:\n\nbody\n\n════\n");
        assert_eq!(report.title(), "T");
    }
}
