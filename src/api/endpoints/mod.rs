pub mod appointments;
pub mod chatbot;
pub mod doctors;
pub mod health;
pub mod reminders;
