//! Closed vocabulary of action kinds and HTTP methods.

use std::fmt;

/// Namespace shared by every action type string.
pub const ACTION_NAMESPACE: &str = "@@jsonapi-store";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Get,
    Post,
    Patch,
    Delete,
    Receive,
}

impl ActionKind {
    /// Namespaced action type, e.g. `@@jsonapi-store/GET`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Get => "@@jsonapi-store/GET",
            ActionKind::Post => "@@jsonapi-store/POST",
            ActionKind::Patch => "@@jsonapi-store/PATCH",
            ActionKind::Delete => "@@jsonapi-store/DELETE",
            ActionKind::Receive => "@@jsonapi-store/RECEIVE",
        }
    }

    /// The HTTP method for request kinds, `None` for `Receive`.
    pub const fn method(self) -> Option<Method> {
        match self {
            ActionKind::Get => Some(Method::Get),
            ActionKind::Post => Some(Method::Post),
            ActionKind::Patch => Some(Method::Patch),
            ActionKind::Delete => Some(Method::Delete),
            ActionKind::Receive => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method of a request action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    pub const fn kind(self) -> ActionKind {
        match self {
            Method::Get => ActionKind::Get,
            Method::Post => ActionKind::Post,
            Method::Patch => ActionKind::Patch,
            Method::Delete => ActionKind::Delete,
        }
    }

    /// Whether the request carries a `{ "data": ... }` body.
    pub const fn has_body(self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}
