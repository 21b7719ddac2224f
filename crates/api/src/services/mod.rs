pub mod notifications;
pub mod ocr;

pub use notifications::{notify_level, notify_level_best_effort, notify_user};
pub use ocr::{ReceiptAnalyzer, ReceiptFields};
