//! Domain entity definitions.

mod backend;
mod lookup;
mod pending;
mod request;
mod response;
mod thumbnail;

pub use backend::BackendKind;
pub use lookup::{LookupCompletion, LookupHandle, LookupStatus};
pub use pending::PendingRequests;
pub use request::{PageUrl, RequestId};
pub use response::ThumbnailResponse;
pub use thumbnail::ThumbnailKey;
