//! Outbound representations of snippets and users.
//!
//! Encoding is a pure function of the stored row, the configured
//! [`LinkStyle`], and the request's [`Links`]. Decoding lives in
//! `snippets_core::snippet`.

use std::str::FromStr;

use serde::Serialize;
use snippets_core::types::DbId;
use snippets_db::models::snippet::Snippet;
use snippets_db::models::user::User;

use crate::links::Links;

/// Resource prefix for snippets.
pub const SNIPPETS: &str = "snippets";
/// Resource prefix for users.
pub const USERS: &str = "users";
/// Detail action serving a snippet's highlighted HTML.
pub const HIGHLIGHT_ACTION: &str = "highlight";

/// How relationships are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Related entities appear as absolute locators; every entity carries a `url`.
    Hyperlink,
    /// Related entities appear as raw ids.
    Id,
}

impl FromStr for LinkStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hyperlink" => Ok(LinkStyle::Hyperlink),
            "id" => Ok(LinkStyle::Id),
            other => Err(format!(
                "API_LINK_STYLE must be 'hyperlink' or 'id', got '{other}'"
            )),
        }
    }
}

/// A reference to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Related {
    Id(DbId),
    Url(String),
}

/// Wire representation of a snippet.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetRepr {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    /// Owner's username; read-only.
    pub owner: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
}

/// Wire representation of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserRepr {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub id: DbId,
    pub username: String,
    pub snippets: Vec<Related>,
}

pub fn encode_snippet(snippet: &Snippet, style: LinkStyle, links: &Links) -> SnippetRepr {
    let (url, highlight) = match style {
        LinkStyle::Hyperlink => (
            Some(links.detail(SNIPPETS, snippet.id)),
            Some(links.action(SNIPPETS, snippet.id, HIGHLIGHT_ACTION)),
        ),
        LinkStyle::Id => (None, None),
    };

    SnippetRepr {
        url,
        id: snippet.id,
        highlight,
        owner: snippet.owner_username.clone(),
        title: snippet.title.clone(),
        code: snippet.code.clone(),
        linenos: snippet.linenos,
        language: snippet.language.clone(),
        style: snippet.style.clone(),
    }
}

/// Encode a user with the ids of the snippets they own, in list order.
pub fn encode_user(user: &User, snippet_ids: &[DbId], style: LinkStyle, links: &Links) -> UserRepr {
    let (url, snippets) = match style {
        LinkStyle::Hyperlink => (
            Some(links.detail(USERS, user.id)),
            snippet_ids
                .iter()
                .map(|id| Related::Url(links.detail(SNIPPETS, *id)))
                .collect(),
        ),
        LinkStyle::Id => (None, snippet_ids.iter().copied().map(Related::Id).collect()),
    };

    UserRepr {
        url,
        id: user.id,
        username: user.username.clone(),
        snippets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn snippet() -> Snippet {
        Snippet {
            id: 4,
            owner_id: 1,
            owner_username: "alice".into(),
            title: "hello".into(),
            code: "print('hello')".into(),
            linenos: false,
            language: "python".into(),
            style: "friendly".into(),
            highlighted: "<html></html>".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn user() -> User {
        User {
            id: 1,
            username: "alice".into(),
            password_hash: "secret".into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn links() -> Links {
        Links::new("http://testserver")
    }

    #[test]
    fn link_style_parses() {
        assert_eq!("hyperlink".parse::<LinkStyle>(), Ok(LinkStyle::Hyperlink));
        assert_eq!("id".parse::<LinkStyle>(), Ok(LinkStyle::Id));
        assert!("pk".parse::<LinkStyle>().is_err());
    }

    #[test]
    fn snippet_identifier_style() {
        let value = serde_json::to_value(encode_snippet(&snippet(), LinkStyle::Id, &links())).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 4,
                "owner": "alice",
                "title": "hello",
                "code": "print('hello')",
                "linenos": false,
                "language": "python",
                "style": "friendly",
            })
        );
    }

    #[test]
    fn snippet_hyperlinked_style() {
        let value =
            serde_json::to_value(encode_snippet(&snippet(), LinkStyle::Hyperlink, &links())).unwrap();
        assert_eq!(value["url"], "http://testserver/api/v1/snippets/4");
        assert_eq!(value["highlight"], "http://testserver/api/v1/snippets/4/highlight");
        assert_eq!(value["owner"], "alice");
        assert!(value.get("highlighted").is_none());
    }

    #[test]
    fn user_never_exposes_password_hash() {
        let value =
            serde_json::to_value(encode_user(&user(), &[4, 9], LinkStyle::Id, &links())).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "username": "alice", "snippets": [4, 9]})
        );
    }

    #[test]
    fn user_hyperlinked_style() {
        let value =
            serde_json::to_value(encode_user(&user(), &[4], LinkStyle::Hyperlink, &links()))
                .unwrap();
        assert_eq!(value["url"], "http://testserver/api/v1/users/1");
        assert_eq!(value["snippets"], json!(["http://testserver/api/v1/snippets/4"]));
    }
}
