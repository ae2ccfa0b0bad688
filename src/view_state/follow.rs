use tracing::{debug, warn};

use super::observable::Slice;
use crate::error::GlitchResult;
use crate::repository::Repository;

/// Two-phase follow toggle.
///
/// The local flag flips before the request goes out and flips back if the
/// server rejects it. Returns the new following state on success, or `None`
/// when the flag was written again or invalidated while the request was in
/// flight, in which case the outcome is dropped.
pub(crate) async fn toggle(
    repo: &Repository,
    following: &Slice<bool>,
    user_id: i64,
) -> Option<GlitchResult<bool>> {
    let was_following = following.get();
    let ticket = following.begin();
    following.commit(ticket, !was_following);

    let result = if was_following {
        repo.unfollow(user_id).await
    } else {
        repo.follow(user_id).await.map(|_| ())
    };

    if following.is_superseded(ticket) {
        debug!(user_id, "Follow toggle superseded, dropping result");
        return None;
    }

    match result {
        Ok(()) => {
            debug!(user_id, following = !was_following, "Follow toggled");
            Some(Ok(!was_following))
        }
        Err(e) => {
            warn!(user_id, "Follow toggle rejected, reverting: {}", e);
            following.set(was_following);
            Some(Err(e))
        }
    }
}

/// Look up whether the signed-in user follows `user_id` and commit it.
///
/// A failed check counts as not following.
pub(crate) async fn refresh(repo: &Repository, following: &Slice<bool>, user_id: i64) {
    let ticket = following.begin();
    let is_following = match repo.is_following(user_id).await {
        Ok(is_following) => is_following,
        Err(e) => {
            debug!(user_id, "Follow check failed: {}", e);
            false
        }
    };
    following.commit(ticket, is_following);
}
