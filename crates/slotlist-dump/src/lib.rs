//! Text and Graphviz dumps of [`slotlist`] snapshots.
//!
//! Renderers take a read-only [`slotlist::Snapshot`] and never touch the
//! list itself. [`DumpSink`] writes numbered dump files into a caller-chosen
//! directory; its counter lives in the sink, so independent sinks never
//! share numbering.
//!
//! ```text
//! Snapshot ──► TextDump  (Display) ──► "list-0003.txt"
//!          └─► DotDump   (Display) ──► "list-0003.dot"   (DumpSink)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dot;
pub mod error;
pub mod sink;
pub mod text;

pub use dot::{render_dot, DotDump};
pub use error::DumpError;
pub use sink::{DumpFormat, DumpSink};
pub use text::{render_text, TextDump};
