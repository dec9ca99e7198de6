//! Search Module
//!
//! Client for the two MediaWiki/CirrusSearch backends being compared. Each
//! comparison run queries both backends with the same search text and
//! normalizes their responses into a pair of ordered result lists.

pub mod mediawiki;

pub use mediawiki::{MediaWikiClient, SearchError};
