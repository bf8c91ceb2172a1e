use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Charity, GeoPoint, Post};
use crate::geo::{haversine_distance_km, km_to_miles};

/// A post paired with its distance from the user. Only lives for one filter call.
#[derive(Debug, Clone)]
pub struct DistanceAnnotatedPost<'a> {
    pub post: &'a Post,
    pub distance_miles: f64,
}

/// Result of [`filter_local_feed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocalFeed {
    /// Included posts, nearest first.
    pub posts: Vec<Post>,
    /// Distance in miles for exactly the included posts, keyed by post id.
    pub distances: HashMap<String, f64>,
}

impl LocalFeed {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn distance_of(&self, post_id: &str) -> Option<f64> {
        self.distances.get(post_id).copied()
    }
}

/// Id lookup over an already-loaded charity list.
#[derive(Debug, Default)]
pub struct CharityIndex<'a> {
    by_id: HashMap<&'a str, &'a Charity>,
}

impl<'a> CharityIndex<'a> {
    pub fn new(charities: &'a [Charity]) -> Self {
        Self {
            by_id: charities.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a Charity> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Build the local feed: posts from charities within `radius_miles` of the user.
///
/// Posts whose charity cannot be resolved, has no complete location, or lies
/// outside the radius are dropped silently. The radius is inclusive and is
/// used as given; clamping is the caller's policy (see [`super::radius`]).
///
/// The result is ordered by ascending distance, then newest first; posts tied
/// on both keep their input order.
pub fn filter_local_feed<'c, F>(
    posts: &[Post],
    resolve_charity: F,
    user_location: Option<GeoPoint>,
    radius_miles: f64,
) -> LocalFeed
where
    F: Fn(&str) -> Option<&'c Charity>,
{
    if user_location.is_none() || posts.is_empty() {
        return LocalFeed::default();
    }

    let mut included: Vec<DistanceAnnotatedPost<'_>> = Vec::new();
    let mut distances = HashMap::new();

    for post in posts {
        let Some(charity) = post.charity_id.as_deref().and_then(&resolve_charity) else {
            continue;
        };
        let Some(charity_point) = charity.coordinates() else {
            continue;
        };

        let distance = km_to_miles(haversine_distance_km(user_location, Some(charity_point)));

        // NaN never compares <= so it is treated like an undefined distance.
        let Some(distance_miles) = distance.filter(|d| *d <= radius_miles) else {
            continue;
        };

        distances.insert(post.id.clone(), distance_miles);
        included.push(DistanceAnnotatedPost {
            post,
            distance_miles,
        });
    }

    included.sort_by(|a, b| {
        a.distance_miles
            .total_cmp(&b.distance_miles)
            .then_with(|| b.post.timestamp.cmp(&a.post.timestamp))
    });

    LocalFeed {
        posts: included.into_iter().map(|a| a.post.clone()).collect(),
        distances,
    }
}
