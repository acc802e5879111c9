pub mod highlight;
pub mod segmenter;
pub mod token;

pub use highlight::{token_index_at, HighlightSynchronizer, PlaybackSession, SessionId};
pub use segmenter::{clickable_indices, segment, tokenize, Segments};
pub use token::{Token, TokenKind};
