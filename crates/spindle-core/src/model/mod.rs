pub mod ids;
pub mod normalized;
pub mod release;

pub use ids::{ArtistId, ReleaseId};
pub use normalized::NormalizedRecord;
pub use release::{null_as_default, Prices, RawRecord};
