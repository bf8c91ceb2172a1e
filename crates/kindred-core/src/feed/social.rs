use std::collections::HashSet;

use crate::domain::{GeoPoint, Post, UserProfile};

/// All posts, newest first. Equal timestamps keep their input order.
pub fn recent_feed(posts: &[Post]) -> Vec<Post> {
    let mut feed = posts.to_vec();
    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed
}

/// Posts from charities in `followed`, newest first.
pub fn following_feed(posts: &[Post], followed: &HashSet<String>) -> Vec<Post> {
    let mut feed: Vec<Post> = posts
        .iter()
        .filter(|p| p.charity_id.as_ref().is_some_and(|id| followed.contains(id)))
        .cloned()
        .collect();
    feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    feed
}

/// Pick the location for the local feed: the device location when the client
/// sent one, otherwise the location saved on the profile.
pub fn resolve_user_location(
    device: Option<GeoPoint>,
    profile: Option<&UserProfile>,
) -> Option<GeoPoint> {
    device.or_else(|| profile.and_then(|p| p.location))
}
