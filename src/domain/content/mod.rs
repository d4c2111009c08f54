//! Content module: the export lifecycle shared by articles, notes,
//! images and books.
//!
//! One generic [`ContentItem`] carries a domain-specific payload. The
//! payload type decides the domain tag and the natural key; everything
//! else (status machine, dedup, cache tags, events) is shared.

mod article;
mod book;
mod cache_tag;
mod domain;
mod errors;
mod events;
mod image;
mod item;
mod natural_key;
mod note;
mod outcome;
mod status;

pub use article::ArticlePayload;
pub use book::BookPayload;
pub use cache_tag::{build_content_cache_tag, build_count_cache_tag, invalidation_tags, CacheTag};
pub use domain::ContentDomain;
pub use errors::ContentError;
pub use events::{ContentCreated, ContentDeleted};
pub use image::{ImagePayload, ImageUpload};
pub use item::{ContentItem, ContentPayload};
pub use natural_key::{AssetPath, CanonicalUrl, Isbn, NaturalKey, NoteTitle};
pub use note::NotePayload;
pub use outcome::MutationOutcome;
pub use status::ExportStatus;
