mod capped_feed;
mod tail;


pub use capped_feed::*;
pub use tail::*;
