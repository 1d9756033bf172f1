//! # polyglot-core
//!
//! Translatable records, locale settings, field-level fallback rules, and the
//! content resolver for Polyglot.

pub mod config;
pub mod error;
pub mod fields;
pub mod filled;
pub mod locale;
pub mod record;
pub mod resolver;
pub mod traits;
pub mod translations;

pub use config::shellexpand;
pub use error::PolyglotError;
pub use locale::LocaleSettings;
pub use record::{ContentKind, ContentRecord, PublishStatus, TranslatableRecord};
pub use resolver::{ContentResolver, FallbackReport, FallbackType};
pub use traits::{FieldCondition, LocalizedStore};
pub use translations::Translations;
