use chrono::{DateTime, Utc};
use serde_json::Map;

use crate::models::user::User;

const SEED: [(&str, &str, &str); 3] = [
    ("george.bluth@reqres.in", "George", "Bluth"),
    ("janet.weaver@reqres.in", "Janet", "Weaver"),
    ("tsion.israeli@reqres.in", "Tsion", "Israeli"),
];

pub fn seed_users(now: DateTime<Utc>) -> Vec<User> {
    SEED.iter()
        .zip(1u64..)
        .map(|(&(email, first_name, last_name), id)| User {
            id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: now,
            updated_at: now,
            avatar: Some(format!("https://reqres.in/img/faces/{}-image.jpg", id)),
            extra: Map::new(),
        })
        .collect()
}
