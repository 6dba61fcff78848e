//! # Desk State
//!
//! Everything a command needs, held in one [`Desk`] value.
//!
//! ```text
//! Desk<S: Storage>
//!   ├── store      S            (SQLite Database or MemoryStore)
//!   ├── config     DeskConfig   (read-only after open)
//!   └── numbering  Mutex<InvoiceNumbering>
//! ```

pub mod desk;

pub use desk::Desk;
