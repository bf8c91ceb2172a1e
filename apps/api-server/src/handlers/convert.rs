//! Domain to wire conversions.

use kindred_core::domain::{Charity, Donation, GeoPoint, Post, UserProfile};
use kindred_core::feed::RadiusStep;
use kindred_shared::dto::{
    CharityResponse, DonationResponse, LocationDto, PostResponse, ProfileResponse, RadiusStepDto,
};

pub fn location_dto(point: GeoPoint) -> LocationDto {
    LocationDto {
        latitude: point.latitude,
        longitude: point.longitude,
    }
}

pub fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.clone(),
        charity_id: post.charity_id.clone(),
        user_id: post.user_id.clone(),
        content: post.content.clone(),
        image_url: post.image_url.clone(),
        timestamp: post.timestamp.to_rfc3339(),
    }
}

pub fn posts_response(posts: &[Post]) -> Vec<PostResponse> {
    posts.iter().map(post_response).collect()
}

/// Charity without the aggregate counters.
pub fn charity_response(charity: &Charity) -> CharityResponse {
    CharityResponse {
        id: charity.id.clone(),
        name: charity.name.clone(),
        description: charity.description.clone(),
        category: charity.category.clone(),
        image_url: charity.image_url.clone(),
        location: charity.coordinates().map(location_dto),
        follower_count: None,
        total_donated_cents: None,
    }
}

pub fn profile_response(profile: &UserProfile) -> ProfileResponse {
    ProfileResponse {
        id: profile.id.clone(),
        display_name: profile.display_name.clone(),
        location: profile.location.map(location_dto),
        feed_radius_miles: profile.feed_radius_miles,
    }
}

pub fn donation_response(donation: &Donation) -> DonationResponse {
    DonationResponse {
        id: donation.id.clone(),
        charity_id: donation.charity_id.clone(),
        amount_cents: donation.amount_cents,
        payment_intent_id: donation.payment_intent_id.clone(),
        created_at: donation.created_at.to_rfc3339(),
    }
}

pub fn radius_step(step: RadiusStepDto) -> RadiusStep {
    match step {
        RadiusStepDto::Increase => RadiusStep::Increase,
        RadiusStepDto::Decrease => RadiusStep::Decrease,
    }
}
