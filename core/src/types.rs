//! Domain DTOs for the users/posts API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Identifiers are kept as strings. Back ends in the wild emit them either as
//! JSON strings or JSON numbers, so deserialization accepts both and
//! normalizes to the decimal string form.

use serde::{Deserialize, Deserializer, Serialize};

/// Postal address of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub zipcode: String,
}

/// A user as returned by `GET /users` and `GET /users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: Address,
}

/// A post owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId", deserialize_with = "string_or_number")]
    pub user_id: String,
}

/// Request payload for creating a new post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// One page of items plus the counts needed to drive pagination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    /// Clamp `page` into `[1, total_pages]`. An empty result still has one
    /// (empty) page.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages.max(1))
    }
}

/// Single-line address as shown in the user table.
pub fn format_address(address: &Address) -> String {
    format!("{}, {}, {}", address.street, address.city, address.zipcode)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_accepts_numeric_ids() {
        let post: Post =
            serde_json::from_str(r#"{"id":7,"title":"t","body":"b","userId":3}"#).unwrap();
        assert_eq!(post.id, "7");
        assert_eq!(post.user_id, "3");
    }

    #[test]
    fn post_serializes_user_id_in_camel_case() {
        let post = Post {
            id: "1".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            user_id: "2".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], "2");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn user_tolerates_missing_phone_and_state() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","name":"Ann","email":"ann@example.com",
                "address":{"street":"1 Main St","city":"Springfield","zipcode":"12345"}}"#,
        )
        .unwrap();
        assert!(user.phone.is_empty());
        assert!(user.address.state.is_empty());
    }

    #[test]
    fn paginated_uses_camel_case_fields() {
        let page: Paginated<User> = serde_json::from_str(
            r#"{"data":[],"total":0,"pageNumber":1,"pageSize":4,"totalPages":0}"#,
        )
        .unwrap();
        assert_eq!(page.page_size, 4);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn clamp_page_stays_within_bounds() {
        let page = Paginated::<User> {
            data: Vec::new(),
            total: 10,
            page_number: 1,
            page_size: 4,
            total_pages: 3,
        };
        assert_eq!(page.clamp_page(0), 1);
        assert_eq!(page.clamp_page(2), 2);
        assert_eq!(page.clamp_page(9), 3);
    }

    #[test]
    fn clamp_page_on_empty_result_is_one() {
        let page = Paginated::<User> {
            data: Vec::new(),
            total: 0,
            page_number: 1,
            page_size: 4,
            total_pages: 0,
        };
        assert_eq!(page.clamp_page(5), 1);
    }

    #[test]
    fn format_address_skips_state() {
        let address = Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zipcode: "12345".to_string(),
        };
        assert_eq!(format_address(&address), "1 Main St, Springfield, 12345");
    }
}
