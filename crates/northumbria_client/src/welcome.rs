//! Greeting shown while the thread is still empty.

pub const ASSISTANT_NAME: &str = "AskNorthumbria";
pub const TAGLINE: &str = "Your 24/7 Student Assistant";
pub const GREETING: &str = "Hello! I'm AskNorthumbria";
pub const INTRO: &str = "Your intelligent assistant for all university queries. I'm here to help with payments, appointments, courses, and any questions you have about Northumbria University.";
pub const PROMPT: &str = "How can I help you today?";
pub const FOOTER: &str =
    "AskNorthumbria can help with payments, appointments, courses, and general enquiries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 6] = [
    QuickAction {
        title: "Payment Help",
        description: "Tuition fees and payment plans",
    },
    QuickAction {
        title: "Book Appointment",
        description: "Schedule meetings with advisors",
    },
    QuickAction {
        title: "Course Information",
        description: "Modules, timetables, and resources",
    },
    QuickAction {
        title: "Academic Support",
        description: "Library, tutoring, and study help",
    },
    QuickAction {
        title: "Campus Services",
        description: "Facilities, maps, and locations",
    },
    QuickAction {
        title: "General Enquiries",
        description: "Any other questions or concerns",
    },
];
