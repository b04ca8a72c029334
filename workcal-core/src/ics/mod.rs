//! Calendar feed parsing.
//!
//! Only the small subset of RFC 5545 needed to pull planned sessions out of
//! a feed: line unfolding, a fixed set of properties, nested BEGIN/END
//! containers and VEVENTs inside the sync window.

mod content_line;
mod parse;

pub use parse::parse_feed;
