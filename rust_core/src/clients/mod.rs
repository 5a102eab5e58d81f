pub mod practicum;
pub mod telegram;

pub use practicum::PracticumClient;
pub use telegram::TelegramClient;
