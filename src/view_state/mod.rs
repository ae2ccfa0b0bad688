//! Per-screen observable state.
//!
//! Each holder owns its slices, a loading flag and an error slot, and is
//! driven by async calls from the front end. Every failure is turned into
//! a message on the error slot; nothing propagates past a holder.
//!
//! - [`StreamView`]: stream metadata, streamer profile, follow flag, chat
//! - [`ProfileView`]: own or other user's profile
//! - [`AuthView`]: login and registration
//! - [`LiveView`]: followed channels that are live
//! - [`SearchView`]: live streams and user search
//! - [`SettingsView`]: account settings

mod auth_view;
mod follow;
mod live_view;
mod observable;
mod profile_view;
mod search_view;
mod settings_view;
mod stream_view;

pub use auth_view::{AuthState, AuthView};
pub use live_view::LiveView;
pub use observable::{ErrorSlot, LoadingFlag, LoadingGuard, Slice, Ticket};
pub use profile_view::ProfileView;
pub use search_view::SearchView;
pub use settings_view::{SettingsView, UpdateState};
pub use stream_view::StreamView;
