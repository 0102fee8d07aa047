//! # Events Module
//!
//! Event-driven reporting of what an interactive session is doing.
//!
//! ## Design
//! The session emits events through a channel so the CLI (or any other
//! front end) can trace scores, frames and key presses without the core
//! knowing how they are presented.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             SessionEvent::FrameShown(info) => {
//!                 println!("frame {} at {:.2}", info.frame, info.cut_fraction)
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! session.run_with_events(&first, &second, &mut surface, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
