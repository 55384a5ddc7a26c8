//! Resolution engine turning catalog documents and assistant replies into
//! validated, district-tagged [`VenueRecord`]s.
//!
//! Every operation here is pure and total: malformed input degrades to an
//! empty result or `None`, never to an error.

pub mod block;
pub mod catalog;
pub mod district;
pub mod links;
pub mod maps_url;
pub mod picker;
pub mod pipeline;
pub mod render;

pub use block::extract_structured_block;
pub use catalog::{load_catalog, parse_catalog};
pub use district::{district_from_utterance, resolve_address, DistrictResolver};
pub use links::{scrape_map_links, scrape_map_links_for, strip_map_links};
pub use maps_url::to_embed_url;
pub use picker::{default_set_for_district, pick_for_district};
pub use pipeline::{
    cards_for_utterance, process_reply, process_reply_for, DistrictCards, DistrictSelection,
};
pub use render::{parse_places, render_catalog, PlaceResult};

pub use vetdir_core::{District, ParsedReply, VenueRecord};
