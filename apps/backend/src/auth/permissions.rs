//! Static role-to-route-group permission table.

use crate::auth::claims::Role;

/// Groups of protected routes that share one permission rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    /// `/api/movie/**`
    Catalog,
    /// `/api/movie/rate/**`
    Ratings,
    /// `/api/movie/admin/reports/**`
    Moderation,
}

impl RouteGroup {
    /// Roles allowed to invoke routes in this group.
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            RouteGroup::Catalog => &[Role::Admin, Role::User],
            RouteGroup::Ratings => &[Role::Admin, Role::User],
            RouteGroup::Moderation => &[Role::Admin],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RouteGroup::Catalog => "catalog",
            RouteGroup::Ratings => "ratings",
            RouteGroup::Moderation => "moderation",
        }
    }
}
