//! Rule-based assistant: keyword-substring replies and health tips.
//!
//! No language understanding. The lower-cased message is scanned for
//! keyword substrings; the first matching category wins, then greeting
//! and thanks keywords override in that order.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::Serialize;

struct Category {
    name: &'static str,
    keywords: &'static [&'static str],
    reply: &'static str,
}

/// Checked in order; the first hit supplies the reply.
const CATEGORIES: &[Category] = &[
    Category {
        name: "symptoms",
        keywords: &["fever", "cold", "cough", "headache", "pain", "sick"],
        reply: "I understand you're not feeling well. For persistent symptoms, I recommend booking an appointment with a doctor. Would you like me to help you find a doctor?",
    },
    Category {
        name: "appointment",
        keywords: &["appointment", "book", "schedule", "doctor", "consult"],
        reply: "I can help you book an appointment! You can browse available doctors in the \"Doctors\" section. What specialty are you looking for?",
    },
    Category {
        name: "medicine",
        keywords: &["medicine", "medication", "prescription", "drug", "tablet"],
        reply: "You can view all your prescriptions in the \"Medical Records\" section. Would you like to set up a reminder for your medications?",
    },
    Category {
        name: "test",
        keywords: &["test", "lab", "blood test", "checkup", "report"],
        reply: "You can book lab tests from the \"Tests\" section. We offer home collection services too. What test are you looking for?",
    },
    Category {
        name: "reminder",
        keywords: &["reminder", "remind", "alert", "notification"],
        reply: "I can help set up reminders for medications, appointments, or tests. Go to the \"Reminders\" section to create a new reminder.",
    },
    Category {
        name: "emergency",
        keywords: &["emergency", "urgent", "critical", "serious", "ambulance"],
        reply: "🚨 For medical emergencies, please call 108 (ambulance) or visit the nearest emergency room immediately. This app is not for emergency situations.",
    },
];

const FALLBACK_REPLY: &str = "I'm here to help! You can ask me about:\n• Booking appointments\n• Finding doctors\n• Viewing medical records\n• Setting reminders\n• Booking lab tests";

const GREETINGS: &[&str] = &["hi", "hello", "hey", "namaste"];
const GREETING_REPLY: &str = "Hello! I'm Sanjeevni Assistant. How can I help you today?";

const THANKS: &[&str] = &["thank", "thanks"];
const THANKS_REPLY: &str = "You're welcome! Feel free to ask if you need anything else.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub user_message: String,
    pub bot_reply: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthTip {
    pub id: u32,
    pub category: &'static str,
    pub tip: &'static str,
    pub icon: &'static str,
}

const TIPS: &[HealthTip] = &[
    HealthTip {
        id: 1,
        category: "Nutrition",
        tip: "Drink at least 8 glasses of water daily to stay hydrated.",
        icon: "💧",
    },
    HealthTip {
        id: 2,
        category: "Exercise",
        tip: "Get at least 30 minutes of physical activity most days of the week.",
        icon: "🏃",
    },
    HealthTip {
        id: 3,
        category: "Sleep",
        tip: "Aim for 7-9 hours of quality sleep each night.",
        icon: "😴",
    },
    HealthTip {
        id: 4,
        category: "Mental Health",
        tip: "Practice stress management through meditation or deep breathing.",
        icon: "🧘",
    },
    HealthTip {
        id: 5,
        category: "Preventive Care",
        tip: "Schedule regular health checkups and screenings.",
        icon: "🏥",
    },
];

fn mentions_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

/// Pick the canned reply for `message`.
pub fn reply_for(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    let mut reply = CATEGORIES
        .iter()
        .find(|c| mentions_any(&lower, c.keywords))
        .map(|c| {
            tracing::debug!(category = c.name, "Assistant category matched");
            c.reply
        })
        .unwrap_or(FALLBACK_REPLY);

    if mentions_any(&lower, GREETINGS) {
        reply = GREETING_REPLY;
    }
    if mentions_any(&lower, THANKS) {
        reply = THANKS_REPLY;
    }
    reply
}

pub fn respond(message: &str) -> AssistantReply {
    AssistantReply {
        user_message: message.to_string(),
        bot_reply: reply_for(message),
        timestamp: Utc::now(),
    }
}

pub fn random_tip() -> &'static HealthTip {
    // TIPS is a non-empty const.
    TIPS.choose(&mut rand::thread_rng()).unwrap_or(&TIPS[0])
}
