//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod input;
pub mod key_irq;
pub mod ui;

pub use input::{input_task, KeyBackend};
pub use key_irq::key_irq_task;
pub use ui::ui_task;
